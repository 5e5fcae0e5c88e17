//! 表达式类型定义
//!
//! 计划节点中的过滤条件、投影项、连接条件都使用此类型表示

use crate::core::types::operators::{BinaryOperator, Operator, UnaryOperator};
use crate::core::Value;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// 确定性且无副作用的函数白名单，名称不区分大小写
///
/// 不在名单中的函数一律视为不安全，例如 rand、now、uuid
pub const DETERMINISTIC_FUNCTIONS: &[&str] = &[
    "abs", "ceil", "floor", "round", "sqrt", "lower", "upper", "length", "concat", "substr",
    "trim", "coalesce",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    // 字面量
    Literal(Value),

    // 列引用
    Column(String),

    // 二元操作
    Binary {
        left: Box<Expression>,
        op: BinaryOperator,
        right: Box<Expression>,
    },

    // 一元操作
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },

    // 函数调用
    Function {
        name: String,
        args: Vec<Expression>,
    },
}

impl Expression {
    /// 创建字面量表达式
    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal(value.into())
    }

    /// 创建列引用表达式
    pub fn column(name: impl Into<String>) -> Self {
        Expression::Column(name.into())
    }

    /// 创建二元操作表达式
    pub fn binary(left: Expression, op: BinaryOperator, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// 创建一元操作表达式
    pub fn unary(op: UnaryOperator, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// 创建函数调用表达式
    pub fn function(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Function {
            name: name.into(),
            args,
        }
    }

    /// 获取子表达式
    pub fn children(&self) -> Vec<&Expression> {
        match self {
            Expression::Literal(_) | Expression::Column(_) => Vec::new(),
            Expression::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            Expression::Unary { operand, .. } => vec![operand.as_ref()],
            Expression::Function { args, .. } => args.iter().collect(),
        }
    }

    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Expression::Literal(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_column(&self) -> Option<&str> {
        match self {
            Expression::Column(name) => Some(name),
            _ => None,
        }
    }

    /// 检查表达式是否为字面量 TRUE
    pub fn is_true_literal(&self) -> bool {
        matches!(self, Expression::Literal(Value::Bool(true)))
    }

    /// 收集表达式引用的全部列名
    pub fn referenced_columns(&self) -> BTreeSet<String> {
        let mut columns = BTreeSet::new();
        self.collect_columns(&mut columns);
        columns
    }

    fn collect_columns(&self, columns: &mut BTreeSet<String>) {
        match self {
            Expression::Column(name) => {
                columns.insert(name.clone());
            }
            _ => {
                for child in self.children() {
                    child.collect_columns(columns);
                }
            }
        }
    }

    /// 检查表达式是否确定且无副作用
    pub fn is_deterministic(&self) -> bool {
        match self {
            Expression::Function { name, args } => {
                let lower = name.to_ascii_lowercase();
                DETERMINISTIC_FUNCTIONS.contains(&lower.as_str())
                    && args.iter().all(|a| a.is_deterministic())
            }
            _ => self.children().iter().all(|c| c.is_deterministic()),
        }
    }

    /// 用映射替换列引用，映射中不存在的列保持不变
    pub fn substitute(&self, mapping: &HashMap<String, Expression>) -> Expression {
        match self {
            Expression::Column(name) => mapping
                .get(name)
                .cloned()
                .unwrap_or_else(|| self.clone()),
            Expression::Literal(_) => self.clone(),
            Expression::Binary { left, op, right } => {
                Expression::binary(left.substitute(mapping), *op, right.substitute(mapping))
            }
            Expression::Unary { op, operand } => {
                Expression::unary(*op, operand.substitute(mapping))
            }
            Expression::Function { name, args } => Expression::function(
                name.clone(),
                args.iter().map(|a| a.substitute(mapping)).collect(),
            ),
        }
    }

    /// 按 AND 拆分为合取项，保持从左到右的顺序
    pub fn split_conjuncts(&self) -> Vec<Expression> {
        let mut conjuncts = Vec::new();
        self.collect_conjuncts(&mut conjuncts);
        conjuncts
    }

    fn collect_conjuncts(&self, out: &mut Vec<Expression>) {
        match self {
            Expression::Binary {
                left,
                op: BinaryOperator::And,
                right,
            } => {
                left.collect_conjuncts(out);
                right.collect_conjuncts(out);
            }
            _ => out.push(self.clone()),
        }
    }

    /// 将合取项用 AND 左结合连接，空列表返回 None
    pub fn conjunction(conjuncts: Vec<Expression>) -> Option<Expression> {
        conjuncts.into_iter().reduce(Expression::and)
    }

    fn precedence(&self) -> u8 {
        match self {
            Expression::Binary { op, .. } => op.precedence(),
            Expression::Unary { op, .. } => op.precedence(),
            _ => u8::MAX,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, needs_parens: bool) -> fmt::Result {
        if needs_parens {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(v) => write!(f, "{}", v),
            Expression::Column(name) => write!(f, "{}", name),
            Expression::Binary { left, op, right } => {
                let p = op.precedence();
                left.fmt_operand(f, left.precedence() < p)?;
                write!(f, " {} ", op)?;
                // 左结合：右侧同级也需要括号
                right.fmt_operand(f, right.precedence() <= p)
            }
            Expression::Unary { op, operand } => {
                let p = op.precedence();
                if op.is_postfix() {
                    operand.fmt_operand(f, operand.precedence() <= p)?;
                    write!(f, " {}", op)
                } else {
                    match op {
                        UnaryOperator::Not => write!(f, "NOT ")?,
                        _ => write!(f, "{}", op)?,
                    }
                    operand.fmt_operand(f, operand.precedence() < p)
                }
            }
            Expression::Function { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

// 便捷的构建器方法
impl Expression {
    /// 创建布尔字面量
    pub fn bool(value: bool) -> Self {
        Expression::Literal(Value::Bool(value))
    }

    /// 创建整数字面量
    pub fn int(value: i64) -> Self {
        Expression::Literal(Value::Int(value))
    }

    /// 创建浮点数字面量
    pub fn float(value: f64) -> Self {
        Expression::Literal(Value::Float(value))
    }

    /// 创建字符串字面量
    pub fn string(value: impl Into<String>) -> Self {
        Expression::Literal(Value::String(value.into()))
    }

    /// 创建 NULL 字面量
    pub fn null() -> Self {
        Expression::Literal(Value::Null)
    }

    pub fn eq(left: Expression, right: Expression) -> Self {
        Self::binary(left, BinaryOperator::Equal, right)
    }

    pub fn ne(left: Expression, right: Expression) -> Self {
        Self::binary(left, BinaryOperator::NotEqual, right)
    }

    pub fn lt(left: Expression, right: Expression) -> Self {
        Self::binary(left, BinaryOperator::LessThan, right)
    }

    pub fn le(left: Expression, right: Expression) -> Self {
        Self::binary(left, BinaryOperator::LessThanOrEqual, right)
    }

    pub fn gt(left: Expression, right: Expression) -> Self {
        Self::binary(left, BinaryOperator::GreaterThan, right)
    }

    pub fn ge(left: Expression, right: Expression) -> Self {
        Self::binary(left, BinaryOperator::GreaterThanOrEqual, right)
    }

    pub fn add(left: Expression, right: Expression) -> Self {
        Self::binary(left, BinaryOperator::Add, right)
    }

    pub fn sub(left: Expression, right: Expression) -> Self {
        Self::binary(left, BinaryOperator::Subtract, right)
    }

    pub fn mul(left: Expression, right: Expression) -> Self {
        Self::binary(left, BinaryOperator::Multiply, right)
    }

    pub fn div(left: Expression, right: Expression) -> Self {
        Self::binary(left, BinaryOperator::Divide, right)
    }

    pub fn and(left: Expression, right: Expression) -> Self {
        Self::binary(left, BinaryOperator::And, right)
    }

    pub fn or(left: Expression, right: Expression) -> Self {
        Self::binary(left, BinaryOperator::Or, right)
    }

    pub fn not(expr: Expression) -> Self {
        Self::unary(UnaryOperator::Not, expr)
    }

    pub fn is_null(expr: Expression) -> Self {
        Self::unary(UnaryOperator::IsNull, expr)
    }

    pub fn is_not_null(expr: Expression) -> Self {
        Self::unary(UnaryOperator::IsNotNull, expr)
    }
}
