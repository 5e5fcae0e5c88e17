//! 消除规则
//!
//! 消除结果已知的过滤、冗余的非空判断以及不产生行的 LIMIT

pub mod eliminate_filter;
pub mod eliminate_limit;
pub mod eliminate_not_null;

pub use eliminate_filter::{EliminateFilter, EliminateFilterRule};
pub use eliminate_limit::{EliminateLimit, EliminateLimitRule};
pub use eliminate_not_null::{EliminateNotNull, EliminateNotNullRule};
