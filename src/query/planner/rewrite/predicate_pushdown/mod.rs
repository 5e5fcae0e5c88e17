//! 谓词下推规则
//!
//! 将过滤条件下推到计划树的底层，减少数据处理量。

pub mod pushdown_filter_through_project;

pub use pushdown_filter_through_project::{
    filter_over_project_pattern, pushdown_filter_through_project, PushdownFilterThroughProject,
    PushdownFilterThroughProjectRule,
};
