//! 重写作业模块
//!
//! - `rewrite_job`: 作业与主题定义
//! - `plan_tree`: 自底向上与自顶向下的计划树遍历
//! - `custom`: 整树自定义重写
//! - `batch`: 批量执行与作业装配

pub mod batch;
pub mod custom;
pub mod plan_tree;
pub mod rewrite_job;

pub use batch::{
    bottom_up, bottom_up_with, custom, execute_jobs, jobs, top_down, topic, BatchRewriteJob,
};
pub use custom::{CustomRewriteError, CustomRewriteJob, CustomRewriter, CustomRewriterSupplier};
pub use plan_tree::{PlanTreeRewriteJob, TraversalOrder};
pub use rewrite_job::{JobEntry, RewriteJob, TopicRewriteJob};
