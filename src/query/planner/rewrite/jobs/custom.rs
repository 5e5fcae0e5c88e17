//! 自定义重写作业
//!
//! 自定义重写器一次性接收整棵计划并返回新的计划，适合需要全局信息的改写。
//! 每次执行都通过提供者创建新的重写器实例，实例内部状态不会跨查询共享。

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::query::planner::plan::PlanRef;
use crate::query::planner::rewrite::context::OptimizationContext;
use crate::query::planner::rewrite::result::{RewriteError, RewriteResult};
use crate::query::planner::rewrite::rule_type::RuleType;

/// 自定义重写器的错误类型
pub type CustomRewriteError = Box<dyn Error + Send + Sync>;

/// 自定义重写器
pub trait CustomRewriter {
    /// 改写整棵计划
    ///
    /// 不需要改写时原样返回输入
    fn rewrite_root(
        &mut self,
        plan: PlanRef,
        ctx: &mut OptimizationContext<'_>,
    ) -> Result<PlanRef, CustomRewriteError>;
}

/// 重写器提供者
pub type CustomRewriterSupplier = Arc<dyn Fn() -> Box<dyn CustomRewriter> + Send + Sync>;

/// 自定义重写作业，总是只执行一轮
#[derive(Clone)]
pub struct CustomRewriteJob {
    rule_type: RuleType,
    supplier: CustomRewriterSupplier,
    pub(crate) topic: Option<String>,
}

impl fmt::Debug for CustomRewriteJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRewriteJob")
            .field("rule_type", &self.rule_type)
            .field("topic", &self.topic)
            .finish()
    }
}

impl CustomRewriteJob {
    pub fn new(rule_type: RuleType, supplier: CustomRewriterSupplier) -> Self {
        Self {
            rule_type,
            supplier,
            topic: None,
        }
    }

    pub fn rule_type(&self) -> RuleType {
        self.rule_type
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub(crate) fn describe(&self) -> String {
        format!("custom({})", self.rule_type)
    }

    pub fn execute(&self, ctx: &mut OptimizationContext<'_>) -> RewriteResult<()> {
        if ctx.is_rule_disabled(self.rule_type) {
            debug!("自定义重写 {} 已被禁用，跳过", self.rule_type);
            return Ok(());
        }

        let mut rewriter = (self.supplier)();
        let before = Arc::clone(ctx.plan());
        let after = rewriter
            .rewrite_root(Arc::clone(&before), ctx)
            .map_err(|e| RewriteError::custom_rewriter(self.rule_type, e))?;

        if Arc::ptr_eq(&before, &after) || before.explain() == after.explain() {
            return Ok(());
        }
        debug!("自定义重写 {} 改写了计划", self.rule_type);
        ctx.set_plan(after);
        ctx.stats_mut().record_rule_application(self.rule_type);
        ctx.job_context_mut().set_rewritten(true);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OptimizerConfig;
    use crate::query::optimizer::catalog::MemoryCatalog;
    use crate::query::optimizer::memo::GroupMemo;
    use crate::query::planner::plan::{LimitNode, PlanNode, PlanNodeFactory};

    struct WrapInLimit;

    impl CustomRewriter for WrapInLimit {
        fn rewrite_root(
            &mut self,
            plan: PlanRef,
            ctx: &mut OptimizationContext<'_>,
        ) -> Result<PlanRef, CustomRewriteError> {
            let id = ctx.next_node_id();
            Ok(LimitNode::new(id, plan, 0, 1)
                .into_enum()
                .into_ref())
        }
    }

    struct Failing;

    impl CustomRewriter for Failing {
        fn rewrite_root(
            &mut self,
            _plan: PlanRef,
            _ctx: &mut OptimizationContext<'_>,
        ) -> Result<PlanRef, CustomRewriteError> {
            Err("统计信息缺失".into())
        }
    }

    #[test]
    fn test_custom_job_rewrites_plan() {
        let mut factory = PlanNodeFactory::new();
        let plan = factory.scan("t", &["a"]);

        let mut memo = GroupMemo::new();
        let catalog = MemoryCatalog::new();
        let mut ctx =
            OptimizationContext::new(plan, &mut memo, &catalog, OptimizerConfig::default());

        let job = CustomRewriteJob::new(
            RuleType::UserDefined("WrapInLimit"),
            Arc::new(|| Box::new(WrapInLimit) as Box<dyn CustomRewriter>),
        );
        job.execute(&mut ctx).expect("作业应该成功");

        assert!(ctx.job_context().is_rewritten());
        assert_eq!(ctx.plan().name(), "Limit");
        assert_eq!(ctx.plan().id(), 2);
    }

    #[test]
    fn test_custom_job_error_carries_rule_type() {
        let mut factory = PlanNodeFactory::new();
        let plan = factory.scan("t", &["a"]);

        let mut memo = GroupMemo::new();
        let catalog = MemoryCatalog::new();
        let mut ctx =
            OptimizationContext::new(plan, &mut memo, &catalog, OptimizerConfig::default());

        let job = CustomRewriteJob::new(
            RuleType::UserDefined("Failing"),
            Arc::new(|| Box::new(Failing) as Box<dyn CustomRewriter>),
        );
        let err = job.execute(&mut ctx).expect_err("应该失败");
        assert_eq!(err.rule_type(), Some(RuleType::UserDefined("Failing")));
        assert!(err.to_string().contains("统计信息缺失"));
    }

    #[test]
    fn test_disabled_custom_job() {
        let mut factory = PlanNodeFactory::new();
        let plan = factory.scan("t", &["a"]);

        let mut memo = GroupMemo::new();
        let catalog = MemoryCatalog::new();
        let config = OptimizerConfig::default().with_disabled_rule("Failing");
        let mut ctx = OptimizationContext::new(plan, &mut memo, &catalog, config);

        let job = CustomRewriteJob::new(
            RuleType::UserDefined("Failing"),
            Arc::new(|| Box::new(Failing) as Box<dyn CustomRewriter>),
        );
        assert!(job.execute(&mut ctx).is_ok());
        assert!(!ctx.job_context().is_rewritten());
    }
}
