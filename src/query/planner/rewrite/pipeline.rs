//! 重写流水线
//!
//! `Rewriter` 是默认的启发式重写流水线，`Explorer` 为基于代价的优化登记备选计划。
//! 流水线在构造时一次性装配，之后只读，可以通过 Arc 在多个线程间共享；
//! 每次优化运行使用自己的 `OptimizationContext`。

use log::{debug, info};

use crate::config::OptimizerConfig;
use crate::query::optimizer::catalog::Catalog;
use crate::query::optimizer::memo::Memo;
use crate::query::planner::plan::PlanRef;
use crate::query::planner::rewrite::constant_folding::FoldConstant;
use crate::query::planner::rewrite::context::{OptimizationContext, OptimizationStats};
use crate::query::planner::rewrite::custom::ColumnPruning;
use crate::query::planner::rewrite::elimination::{
    EliminateFilter, EliminateLimit, EliminateNotNull,
};
use crate::query::planner::rewrite::exploration::PushdownFilterThroughProjectCbo;
use crate::query::planner::rewrite::jobs::{
    bottom_up, custom, execute_jobs, top_down, BatchRewriteJob, CustomRewriter, RewriteJob,
};
use crate::query::planner::rewrite::merge::{MergeFilters, MergeProjects};
use crate::query::planner::rewrite::predicate_pushdown::PushdownFilterThroughProject;
use crate::query::planner::rewrite::result::RewriteResult;
use crate::query::planner::rewrite::rule_type::RuleType;
use crate::{jobs, topic};

/// `Optimizer` 在该主题的作业之前插入探索流水线
const EXPLORATION_POINT: &str = "predicate pushdown";

/// 一次优化运行的结果
#[derive(Debug, Clone)]
pub struct OptimizationOutcome {
    pub plan: PlanRef,
    pub stats: OptimizationStats,
}

/// 默认重写流水线
///
/// 1. 常量折叠
/// 2. 过滤消除
/// 3. 谓词下推（自顶向下，反复执行直到不再改写）
/// 4. 投影合并
/// 5. 列裁剪
///
/// 谓词下推所在主题是探索点，见 [`Rewriter::split_at_exploration_point`]
#[derive(Debug, Clone)]
pub struct Rewriter {
    jobs: Vec<RewriteJob>,
}

impl Rewriter {
    pub fn new() -> RewriteResult<Self> {
        let jobs = jobs![
            topic!("constant folding", bottom_up(&[&FoldConstant])?),
            topic!(
                "filter elimination",
                bottom_up(&[&EliminateFilter, &EliminateNotNull, &EliminateLimit])?
            ),
            topic!(
                "predicate pushdown",
                top_down(
                    &[&MergeFilters, &PushdownFilterThroughProject, &EliminateFilter],
                    false
                )?
            ),
            topic!("project merging", bottom_up(&[&MergeProjects])?),
            custom(RuleType::ColumnPruning, || {
                Box::new(ColumnPruning::new()) as Box<dyn CustomRewriter>
            }),
        ];
        Ok(Self { jobs })
    }

    /// 在探索点处把作业分为前后两段
    ///
    /// 没有探索点主题时前段包含全部作业
    pub fn split_at_exploration_point(&self) -> (&[RewriteJob], &[RewriteJob]) {
        let at = self
            .jobs
            .iter()
            .position(|job| job.topic() == Some(EXPLORATION_POINT))
            .unwrap_or(self.jobs.len());
        self.jobs.split_at(at)
    }
}

impl BatchRewriteJob for Rewriter {
    fn get_jobs(&self) -> &[RewriteJob] {
        &self.jobs
    }
}

/// 探索流水线，把过滤与投影的交换登记为备选计划
#[derive(Debug, Clone)]
pub struct Explorer {
    jobs: Vec<RewriteJob>,
}

impl Explorer {
    pub fn new() -> RewriteResult<Self> {
        let jobs = jobs![topic!(
            "exploration",
            top_down(&[&PushdownFilterThroughProjectCbo], false)?
        )];
        Ok(Self { jobs })
    }
}

impl BatchRewriteJob for Explorer {
    fn get_jobs(&self) -> &[RewriteJob] {
        &self.jobs
    }
}

/// 在新的上下文中执行一个批量作业
pub fn run_batch<B>(
    batch: &B,
    plan: PlanRef,
    memo: &mut dyn Memo,
    catalog: &dyn Catalog,
    config: OptimizerConfig,
) -> RewriteResult<OptimizationOutcome>
where
    B: BatchRewriteJob + ?Sized,
{
    let mut ctx = OptimizationContext::new(plan, memo, catalog, config);
    batch.execute(&mut ctx)?;
    let (plan, stats) = ctx.finish();
    Ok(OptimizationOutcome { plan, stats })
}

/// 重写加探索的完整优化器
///
/// 探索流水线在常量折叠与过滤消除之后、谓词下推之前执行，
/// 登记的备选计划以规范化后的节点 id 为分组，改写过程中这些 id 保持不变。
#[derive(Debug, Clone)]
pub struct Optimizer {
    rewriter: Rewriter,
    explorer: Explorer,
}

impl Optimizer {
    pub fn new() -> RewriteResult<Self> {
        Ok(Self {
            rewriter: Rewriter::new()?,
            explorer: Explorer::new()?,
        })
    }

    pub fn rewriter(&self) -> &Rewriter {
        &self.rewriter
    }

    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    /// 执行重写流水线，并在探索点插入探索流水线
    pub fn optimize(
        &self,
        plan: PlanRef,
        memo: &mut dyn Memo,
        catalog: &dyn Catalog,
        config: OptimizerConfig,
    ) -> RewriteResult<OptimizationOutcome> {
        info!("开始优化计划, 节点数: {}", plan.node_count());
        let mut ctx = OptimizationContext::new(plan, memo, catalog, config);
        let (normalization, restructuring) = self.rewriter.split_at_exploration_point();
        execute_jobs(normalization, &mut ctx)?;
        self.explorer.execute(&mut ctx)?;
        execute_jobs(restructuring, &mut ctx)?;
        let (plan, stats) = ctx.finish();
        info!(
            "优化完成, 节点数: {}, 规则生效 {} 次, 作业执行 {} 轮, 备选计划 {} 个",
            plan.node_count(),
            stats.total_rule_applications(),
            stats.job_passes(),
            stats.alternatives_registered()
        );
        debug!("优化统计: {}", stats.to_formatted_string());
        Ok(OptimizationOutcome { plan, stats })
    }
}

/// 使用默认流水线优化计划
pub fn optimize(
    plan: PlanRef,
    memo: &mut dyn Memo,
    catalog: &dyn Catalog,
    config: OptimizerConfig,
) -> RewriteResult<OptimizationOutcome> {
    Optimizer::new()?.optimize(plan, memo, catalog, config)
}
