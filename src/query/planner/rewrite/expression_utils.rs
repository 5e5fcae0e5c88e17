//! 表达式工具函数
//!
//! 提供重写规则共用的表达式处理函数：常量折叠、合取项去重、恒假判断

use crate::core::types::operators::BinaryOperator;
use crate::core::{Expression, Value};

/// 折叠表达式中的常量子表达式
///
/// 自底向上计算只包含字面量的运算，并化简布尔恒等式。
/// 运算出错（整数溢出、除零、类型不匹配）时保留原表达式，留给执行期报错。
/// 函数调用不求值，只折叠其参数。
pub fn fold_constants(expr: &Expression) -> Expression {
    match expr {
        Expression::Literal(_) | Expression::Column(_) => expr.clone(),
        Expression::Binary { left, op, right } => {
            let left = fold_constants(left);
            let right = fold_constants(right);
            fold_binary(left, *op, right)
        }
        Expression::Unary { op, operand } => {
            let operand = fold_constants(operand);
            if let Some(value) = operand.as_literal() {
                if let Ok(folded) = value.unary(*op) {
                    return Expression::Literal(folded);
                }
            }
            Expression::unary(*op, operand)
        }
        Expression::Function { name, args } => {
            Expression::function(name.clone(), args.iter().map(fold_constants).collect())
        }
    }
}

fn fold_binary(left: Expression, op: BinaryOperator, right: Expression) -> Expression {
    if let (Some(l), Some(r)) = (left.as_literal(), right.as_literal()) {
        if let Ok(value) = l.binary(op, r) {
            return Expression::Literal(value);
        }
        return Expression::binary(left, op, right);
    }

    // 布尔恒等式，三值逻辑下同样成立
    match op {
        BinaryOperator::And => match (bool_literal(&left), bool_literal(&right)) {
            (Some(false), _) | (_, Some(false)) => Expression::bool(false),
            (Some(true), _) => right,
            (_, Some(true)) => left,
            _ => Expression::binary(left, op, right),
        },
        BinaryOperator::Or => match (bool_literal(&left), bool_literal(&right)) {
            (Some(true), _) | (_, Some(true)) => Expression::bool(true),
            (Some(false), _) => right,
            (_, Some(false)) => left,
            _ => Expression::binary(left, op, right),
        },
        _ => Expression::binary(left, op, right),
    }
}

fn bool_literal(expr: &Expression) -> Option<bool> {
    match expr {
        Expression::Literal(Value::Bool(b)) => Some(*b),
        _ => None,
    }
}

/// 检查表达式是否为字面量 FALSE 或 NULL
///
/// 过滤条件为 FALSE 或 NULL 时不会有任何行通过
pub fn is_false_or_null_literal(expr: &Expression) -> bool {
    expr.as_literal().is_some_and(Value::is_false_or_null)
}

/// 合取项去重，保留首次出现的顺序
pub fn dedup_conjuncts(conjuncts: Vec<Expression>) -> Vec<Expression> {
    let mut unique: Vec<Expression> = Vec::with_capacity(conjuncts.len());
    for conjunct in conjuncts {
        if !unique.contains(&conjunct) {
            unique.push(conjunct);
        }
    }
    unique
}

/// 把两个过滤条件合并为一个，`first` 的合取项排在前面
pub fn merge_conditions(first: &Expression, second: &Expression) -> Expression {
    let mut conjuncts = first.split_conjuncts();
    conjuncts.extend(second.split_conjuncts());
    // 两侧都至少贡献一个合取项，结果非空
    Expression::conjunction(dedup_conjuncts(conjuncts)).unwrap_or_else(|| first.clone())
}
