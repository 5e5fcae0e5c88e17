//! 计划重写模块
//!
//! 规则驱动的逻辑计划重写引擎。规则按模式匹配计划子树并给出替换，
//! 作业决定规则以何种顺序、在哪些节点上、执行多少轮，
//! 流水线把作业按主题组织成严格有序的阶段。
//!
//! # 模块结构
//!
//! - `context`: 优化上下文、作业上下文与统计
//! - `pattern`: 模式匹配定义
//! - `result`: 重写错误、匹配结果与转换结果
//! - `rule`: 重写规则与规则工厂 trait
//! - `rule_type`: 规则类型
//! - `macros`: 规则工厂与作业装配宏
//! - `jobs`: 计划树遍历作业、自定义作业与批量执行
//! - `pipeline`: 默认的重写与探索流水线
//!
//! # 规则分类
//!
//! ## 常量折叠 (constant_folding)
//! 计算只含字面量的子表达式并化简布尔恒等式。
//!
//! ## 消除规则 (elimination)
//! - 条件为常量的过滤 (`EliminateFilterRule`)
//! - 非空列上的 IS NOT NULL (`EliminateNotNullRule`)
//! - LIMIT 0 (`EliminateLimitRule`)
//!
//! ## 合并规则 (merge)
//! 合并连续的过滤与投影。
//!
//! ## 谓词下推规则 (predicate_pushdown)
//! 将过滤条件下推到投影之下。
//!
//! ## 探索规则 (exploration)
//! 与谓词下推相同的变换，结果登记到备忘录作为备选计划。
//!
//! ## 自定义重写 (custom)
//! 整树列裁剪。
//!
//! # 使用示例
//!
//! ```ignore
//! use planrewrite::query::planner::rewrite::optimize;
//!
//! let outcome = optimize(plan, &mut memo, &catalog, OptimizerConfig::default())?;
//! println!("{}", outcome.plan.explain());
//! ```

// 核心类型模块
pub mod context;
pub mod expression_utils;
pub mod pattern;
pub mod result;
pub mod rule;
pub mod rule_type;

// 宏模块
pub mod macros;

// 作业与流水线
pub mod jobs;
pub mod pipeline;

// 具体规则模块
pub mod constant_folding;
pub mod custom;
pub mod elimination;
pub mod exploration;
pub mod merge;
pub mod predicate_pushdown;

#[cfg(test)]
pub(crate) mod test_support;

// ==================== 导出核心类型 ====================

pub use context::{JobContext, OptimizationContext, OptimizationStats};
pub use pattern::{MatchNode, Pattern};
pub use result::{MatchedResult, RewriteError, RewriteResult, TransformResult};
pub use rule::{RewriteRule, Rule, RuleFactory, RuleKind};
pub use rule_type::RuleType;

pub use jobs::{
    bottom_up, bottom_up_with, custom as custom_job, execute_jobs, top_down, topic,
    BatchRewriteJob, CustomRewriteError, CustomRewriter, JobEntry, RewriteJob, TraversalOrder,
};
pub use pipeline::{optimize, run_batch, Explorer, OptimizationOutcome, Optimizer, Rewriter};

// 统一导出所有重写规则
pub use constant_folding::*;
pub use custom::*;
pub use elimination::*;
pub use exploration::*;
pub use merge::*;
pub use predicate_pushdown::*;
