pub mod types;
pub mod value;

// 核心数据类型
pub use value::Value;

// 表达式系统类型
pub use types::expression::Expression;

pub use types::operators::{BinaryOperator, UnaryOperator};
