//! PlanRewrite - rule-driven logical plan rewrite engine
//!
//! This crate provides the rewrite layer of a cost-based query optimizer:
//! pattern rules, bottom-up and top-down traversal jobs, fixed-point
//! convergence control and named rule phases assembled into pipelines.

pub mod config;
pub mod core;
pub mod query;
pub mod utils;
