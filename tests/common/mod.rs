//! 集成测试共享工具模块
//!
//! 提供计划夹具、测试专用规则与运行辅助函数，供所有集成测试使用

#![allow(dead_code)]

pub mod assertions;

use std::sync::{Arc, Mutex};

use planrewrite::config::OptimizerConfig;
use planrewrite::core::Expression;
use planrewrite::query::optimizer::{GroupMemo, MemoryCatalog};
use planrewrite::query::planner::plan::{
    LimitNode, PlanNode, PlanNodeFactory, PlanNodeKind, PlanRef, ProjectItem, SingleInputNode,
};
use planrewrite::query::planner::rewrite::{
    run_batch, BatchRewriteJob, CustomRewriteError, CustomRewriter, MatchedResult,
    OptimizationContext, OptimizationOutcome, Pattern, RewriteError, RewriteJob, RewriteResult,
    RewriteRule, Rule, RuleFactory, RuleType, TransformResult,
};

// ==================== 计划夹具 ====================

/// `Filter(a > 2 AND b = 0) -> Project(c + d AS a, e AS b) -> Scan(t: c, d, e)`
pub fn pushdown_example() -> PlanRef {
    let mut factory = PlanNodeFactory::new();
    let scan = factory.scan("t", &["c", "d", "e"]);
    let project = factory.project(
        scan,
        vec![
            ProjectItem::new(
                Expression::add(Expression::column("c"), Expression::column("d")),
                "a",
            ),
            ProjectItem::new(Expression::column("e"), "b"),
        ],
    );
    factory.filter(
        project,
        Expression::and(
            Expression::gt(Expression::column("a"), Expression::int(2)),
            Expression::eq(Expression::column("b"), Expression::int(0)),
        ),
    )
}

/// `Filter(x > 1) -> Project(a AS x, b) -> Filter(b = 0) -> Scan(t: a, b)`
pub fn filter_project_filter() -> PlanRef {
    let mut factory = PlanNodeFactory::new();
    let scan = factory.scan("t", &["a", "b"]);
    let lower = factory.filter(
        scan,
        Expression::eq(Expression::column("b"), Expression::int(0)),
    );
    let project = factory.project(
        lower,
        vec![
            ProjectItem::new(Expression::column("a"), "x"),
            ProjectItem::column("b"),
        ],
    );
    factory.filter(
        project,
        Expression::gt(Expression::column("x"), Expression::int(1)),
    )
}

/// `Limit(offset: 0, count) -> Scan(t: a)`
pub fn limit_over_scan(count: u64) -> PlanRef {
    let mut factory = PlanNodeFactory::new();
    let scan = factory.scan("t", &["a"]);
    factory.limit(scan, 0, count)
}

// ==================== 运行辅助 ====================

/// 由调用方给定作业列表的批量作业
#[derive(Debug)]
pub struct JobList(pub Vec<RewriteJob>);

impl BatchRewriteJob for JobList {
    fn get_jobs(&self) -> &[RewriteJob] {
        &self.0
    }
}

/// 在新的上下文中运行作业列表
pub fn run_jobs(
    jobs: Vec<RewriteJob>,
    plan: PlanRef,
    config: OptimizerConfig,
) -> RewriteResult<OptimizationOutcome> {
    let mut memo = GroupMemo::new();
    let catalog = MemoryCatalog::new();
    run_batch(&JobList(jobs), plan, &mut memo, &catalog, config)
}

/// 由固定规则列表构成的工厂
pub struct RuleList {
    pub name: &'static str,
    pub rules: Vec<Rule>,
}

impl RuleList {
    pub fn new(name: &'static str, rules: Vec<Rule>) -> Self {
        Self { name, rules }
    }
}

impl RuleFactory for RuleList {
    fn name(&self) -> &'static str {
        self.name
    }

    fn build_rules(&self) -> Vec<Rule> {
        self.rules.clone()
    }
}

fn replace_limit_count(
    matched: &MatchedResult,
    from: Option<u64>,
    to: u64,
) -> Option<TransformResult> {
    let limit = matched.root().as_limit()?;
    if limit.count() == to || from.is_some_and(|f| f != limit.count()) {
        return None;
    }
    let node = LimitNode::new(limit.id(), Arc::clone(limit.input()), limit.offset(), to);
    Some(TransformResult::replace(Arc::new(node.into_enum())))
}

// ==================== 测试专用规则 ====================

/// 把 count 为 1 的 Limit 改为 2
#[derive(Debug)]
pub struct ToggleUp;

impl RewriteRule for ToggleUp {
    fn rule_type(&self) -> RuleType {
        RuleType::UserDefined("ToggleUp")
    }

    fn pattern(&self) -> Pattern {
        Pattern::new(PlanNodeKind::Limit)
    }

    fn transform(
        &self,
        matched: &MatchedResult,
        _ctx: &mut OptimizationContext<'_>,
    ) -> RewriteResult<Option<TransformResult>> {
        Ok(replace_limit_count(matched, Some(1), 2))
    }
}

/// 把 count 为 2 的 Limit 改回 1，与 `ToggleUp` 构成振荡
#[derive(Debug)]
pub struct ToggleDown;

impl RewriteRule for ToggleDown {
    fn rule_type(&self) -> RuleType {
        RuleType::UserDefined("ToggleDown")
    }

    fn pattern(&self) -> Pattern {
        Pattern::new(PlanNodeKind::Limit)
    }

    fn transform(
        &self,
        matched: &MatchedResult,
        _ctx: &mut OptimizationContext<'_>,
    ) -> RewriteResult<Option<TransformResult>> {
        Ok(replace_limit_count(matched, Some(2), 1))
    }
}

/// 按已完成的轮数奇偶把 Limit 的 count 设为 1 或 2
///
/// 同一轮内结果稳定，相邻两轮之间来回切换
#[derive(Debug)]
pub struct PassParity;

impl RewriteRule for PassParity {
    fn rule_type(&self) -> RuleType {
        RuleType::UserDefined("PassParity")
    }

    fn pattern(&self) -> Pattern {
        Pattern::new(PlanNodeKind::Limit)
    }

    fn transform(
        &self,
        matched: &MatchedResult,
        ctx: &mut OptimizationContext<'_>,
    ) -> RewriteResult<Option<TransformResult>> {
        let target = (ctx.stats().job_passes() % 2) as u64 + 1;
        Ok(replace_limit_count(matched, None, target))
    }
}

/// 在任何 Scan 上报错的规则
#[derive(Debug)]
pub struct FailingRule;

impl RewriteRule for FailingRule {
    fn rule_type(&self) -> RuleType {
        RuleType::UserDefined("Failing")
    }

    fn pattern(&self) -> Pattern {
        Pattern::new(PlanNodeKind::Scan)
    }

    fn transform(
        &self,
        matched: &MatchedResult,
        _ctx: &mut OptimizationContext<'_>,
    ) -> RewriteResult<Option<TransformResult>> {
        Err(RewriteError::rule_application(
            self.rule_type(),
            matched.root(),
            "扫描节点缺少统计信息",
        ))
    }
}

/// 总是失败的自定义重写器
pub struct BrokenRewriter;

impl CustomRewriter for BrokenRewriter {
    fn rewrite_root(
        &mut self,
        _plan: PlanRef,
        _ctx: &mut OptimizationContext<'_>,
    ) -> Result<PlanRef, CustomRewriteError> {
        Err("外部服务不可用".into())
    }
}

/// 只记录执行顺序、不修改计划的自定义重写器
pub struct Recorder {
    pub name: &'static str,
    pub log: Arc<Mutex<Vec<&'static str>>>,
}

impl CustomRewriter for Recorder {
    fn rewrite_root(
        &mut self,
        plan: PlanRef,
        _ctx: &mut OptimizationContext<'_>,
    ) -> Result<PlanRef, CustomRewriteError> {
        self.log
            .lock()
            .map_err(|_| "执行记录已损坏")?
            .push(self.name);
        Ok(plan)
    }
}
