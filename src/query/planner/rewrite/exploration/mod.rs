//! 探索规则
//!
//! 探索规则与重写规则使用相同的接口，但转换结果作为备选计划登记到备忘录，
//! 工作计划保持不变。

pub mod pushdown_filter_through_project_cbo;

pub use pushdown_filter_through_project_cbo::{
    PushdownFilterThroughProjectCbo, PushdownFilterThroughProjectCboRule,
};
