// 核心类型系统模块
//
// 包含计划表达式与操作符的类型定义

pub mod expression;
pub mod operators;

pub use expression::Expression;
pub use operators::{BinaryOperator, Operator, UnaryOperator};
