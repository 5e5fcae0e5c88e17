//! 计划模块
//!
//! - `plan`: 计划节点定义
//! - `rewrite`: 基于规则的计划重写引擎

pub mod plan;
pub mod rewrite;

pub use plan::{PlanNodeEnum, PlanRef};
