//! 操作符类型定义
//!
//! 定义计划表达式中使用的二元、一元操作符

use serde::{Deserialize, Serialize};
use std::fmt;

/// 操作符特征定义
pub trait Operator {
    /// 获取操作符的名称
    fn name(&self) -> &str;

    /// 获取操作符的优先级
    fn precedence(&self) -> u8;

    /// 获取操作符的元数（操作数数量）
    fn arity(&self) -> usize;
}

/// 二元操作符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    // 算术操作
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,

    // 比较操作
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,

    // 逻辑操作
    And,
    Or,
}

impl BinaryOperator {
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Equal
                | BinaryOperator::NotEqual
                | BinaryOperator::LessThan
                | BinaryOperator::LessThanOrEqual
                | BinaryOperator::GreaterThan
                | BinaryOperator::GreaterThanOrEqual
        )
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOperator::And | BinaryOperator::Or)
    }
}

impl Operator for BinaryOperator {
    fn name(&self) -> &str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Equal => "=",
            BinaryOperator::NotEqual => "<>",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            // 优先级 1: 逻辑或
            BinaryOperator::Or => 1,

            // 优先级 2: 逻辑与
            BinaryOperator::And => 2,

            // 优先级 3: 比较操作
            BinaryOperator::Equal
            | BinaryOperator::NotEqual
            | BinaryOperator::LessThan
            | BinaryOperator::LessThanOrEqual
            | BinaryOperator::GreaterThan
            | BinaryOperator::GreaterThanOrEqual => 3,

            // 优先级 4: 加减法
            BinaryOperator::Add | BinaryOperator::Subtract => 4,

            // 优先级 5: 乘除法和取模
            BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Modulo => 5,
        }
    }

    fn arity(&self) -> usize {
        2
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 一元操作符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    Minus,
    Not,

    // 存在性检查
    IsNull,
    IsNotNull,
}

impl UnaryOperator {
    /// 后缀形式的操作符，如 `a IS NULL`
    pub fn is_postfix(&self) -> bool {
        matches!(self, UnaryOperator::IsNull | UnaryOperator::IsNotNull)
    }
}

impl Operator for UnaryOperator {
    fn name(&self) -> &str {
        match self {
            UnaryOperator::Minus => "-",
            UnaryOperator::Not => "NOT",
            UnaryOperator::IsNull => "IS NULL",
            UnaryOperator::IsNotNull => "IS NOT NULL",
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            UnaryOperator::Minus | UnaryOperator::Not => 6,
            UnaryOperator::IsNull | UnaryOperator::IsNotNull => 3,
        }
    }

    fn arity(&self) -> usize {
        1
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
