//! 常量折叠规则

pub mod fold_constant;

pub use fold_constant::{FoldConstant, FoldConstantFilter, FoldConstantJoin, FoldConstantProject};
