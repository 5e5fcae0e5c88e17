//! 合并规则
//!
//! 合并连续的同类操作，减少中间结果

pub mod merge_filters;
pub mod merge_projects;

pub use merge_filters::{MergeFilters, MergeFiltersRule};
pub use merge_projects::{MergeProjects, MergeProjectsRule};
