//! 自定义重写器
//!
//! 需要整棵计划信息的改写，以自定义作业的形式加入流水线

pub mod column_pruning;

pub use column_pruning::ColumnPruning;
