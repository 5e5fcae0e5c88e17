//! 批量重写作业
//!
//! 一个流水线就是一组按顺序执行的重写作业。
//! 非 once 作业会反复执行，直到某一轮没有改写计划。
//! 最多允许 `max_iteration_rounds` 轮改写，之后的确认轮仍有改写时返回未收敛错误。

use std::collections::VecDeque;
use std::sync::Arc;

use log::{debug, trace};

use super::custom::{CustomRewriteJob, CustomRewriter};
use super::plan_tree::{PlanTreeRewriteJob, TraversalOrder};
use super::rewrite_job::{JobEntry, RewriteJob, TopicRewriteJob};
use crate::query::planner::rewrite::context::OptimizationContext;
use crate::query::planner::rewrite::result::{RewriteError, RewriteResult};
use crate::query::planner::rewrite::rule::{Rule, RuleFactory};
use crate::query::planner::rewrite::rule_type::RuleType;

/// 批量重写作业
pub trait BatchRewriteJob {
    /// 按执行顺序返回作业
    fn get_jobs(&self) -> &[RewriteJob];

    /// 依次执行所有作业
    fn execute(&self, ctx: &mut OptimizationContext<'_>) -> RewriteResult<()> {
        execute_jobs(self.get_jobs(), ctx)
    }
}

/// 依次执行作业，非 once 作业执行到不再改写为止
pub fn execute_jobs(jobs: &[RewriteJob], ctx: &mut OptimizationContext<'_>) -> RewriteResult<()> {
    for job in jobs {
        execute_job(job, ctx)?;
    }
    Ok(())
}

fn execute_job(job: &RewriteJob, ctx: &mut OptimizationContext<'_>) -> RewriteResult<()> {
    let cap = ctx.config().max_iteration_rounds;
    let history_size = ctx.config().shape_history_size;
    let mut shapes: VecDeque<String> = VecDeque::with_capacity(history_size + 1);
    let mut passes = 0usize;

    debug!("执行重写作业 {}", job.description());
    loop {
        ctx.job_context_mut().reset();
        job.execute(ctx)?;
        passes += 1;
        ctx.stats_mut().record_job_pass();

        let rewritten = ctx.job_context().is_rewritten();
        trace!("作业 {} 第 {} 轮, 改写: {}", job.description(), passes, rewritten);
        if job.is_once() || !rewritten {
            break;
        }

        if history_size > 0 {
            if shapes.len() == history_size {
                shapes.pop_front();
            }
            shapes.push_back(ctx.plan().explain());
        }
        if passes > cap {
            return Err(RewriteError::non_termination(
                job.description(),
                cap,
                shapes.into_iter().collect(),
            ));
        }
    }
    Ok(())
}

// ==================== 作业装配 ====================

/// 展平作业条目，主题内的作业保持原有顺序
pub fn jobs(entries: Vec<JobEntry>) -> Vec<RewriteJob> {
    let mut out = Vec::new();
    for entry in entries {
        entry.flatten_into(&mut out);
    }
    out
}

/// 创建带名称的主题
pub fn topic(name: impl Into<String>, entries: Vec<JobEntry>) -> TopicRewriteJob {
    TopicRewriteJob {
        name: name.into(),
        jobs: entries,
    }
}

/// 自底向上遍历，只执行一轮
pub fn bottom_up(factories: &[&dyn RuleFactory]) -> RewriteResult<RewriteJob> {
    bottom_up_with(factories, true)
}

/// 自底向上遍历，由调用方指定是否只执行一轮
pub fn bottom_up_with(factories: &[&dyn RuleFactory], once: bool) -> RewriteResult<RewriteJob> {
    plan_tree(TraversalOrder::BottomUp, factories, once)
}

/// 自顶向下遍历，由调用方指定是否只执行一轮
pub fn top_down(factories: &[&dyn RuleFactory], once: bool) -> RewriteResult<RewriteJob> {
    plan_tree(TraversalOrder::TopDown, factories, once)
}

/// 自定义重写作业，每次执行时由提供者创建重写器
pub fn custom<F>(rule_type: RuleType, supplier: F) -> RewriteJob
where
    F: Fn() -> Box<dyn CustomRewriter> + Send + Sync + 'static,
{
    RewriteJob::Custom(CustomRewriteJob::new(rule_type, Arc::new(supplier)))
}

fn plan_tree(
    order: TraversalOrder,
    factories: &[&dyn RuleFactory],
    once: bool,
) -> RewriteResult<RewriteJob> {
    let rules = collect_rules(factories)?;
    Ok(RewriteJob::PlanTree(PlanTreeRewriteJob::new(
        order, rules, once,
    )))
}

/// 按工厂顺序收集规则
fn collect_rules(factories: &[&dyn RuleFactory]) -> RewriteResult<Vec<Rule>> {
    let mut rules = Vec::new();
    for factory in factories {
        let built = factory.build_rules();
        if built.is_empty() {
            return Err(RewriteError::empty_rule_factory(factory.name()));
        }
        rules.extend(built);
    }
    if rules.is_empty() {
        return Err(RewriteError::EmptyRuleSet);
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::planner::plan::PlanNodeKind;
    use crate::query::planner::rewrite::pattern::Pattern;
    use crate::query::planner::rewrite::result::{MatchedResult, TransformResult};
    use crate::query::planner::rewrite::rule::RewriteRule;

    #[derive(Debug)]
    struct NamedRule(&'static str);

    impl RewriteRule for NamedRule {
        fn rule_type(&self) -> RuleType {
            RuleType::UserDefined(self.0)
        }

        fn pattern(&self) -> Pattern {
            Pattern::new(PlanNodeKind::Scan)
        }

        fn transform(
            &self,
            _matched: &MatchedResult,
            _ctx: &mut OptimizationContext<'_>,
        ) -> RewriteResult<Option<TransformResult>> {
            Ok(None)
        }
    }

    struct Factory(&'static str, Vec<&'static str>);

    impl RuleFactory for Factory {
        fn name(&self) -> &'static str {
            self.0
        }

        fn build_rules(&self) -> Vec<Rule> {
            self.1
                .iter()
                .map(|name| Arc::new(NamedRule(*name)) as Rule)
                .collect()
        }
    }

    #[test]
    fn test_rule_order_follows_factories() {
        let first = Factory("First", vec!["A", "B"]);
        let second = Factory("Second", vec!["C"]);
        let job = top_down(&[&first, &second], false).expect("装配应该成功");

        match &job {
            RewriteJob::PlanTree(job) => {
                let names: Vec<&str> = job.rules().iter().map(|r| r.name()).collect();
                assert_eq!(names, vec!["A", "B", "C"]);
                assert_eq!(job.order(), TraversalOrder::TopDown);
            }
            RewriteJob::Custom(_) => panic!("期望计划树作业"),
        }
        assert!(!job.is_once());
        assert!(bottom_up(&[&first]).expect("装配应该成功").is_once());
    }

    #[test]
    fn test_empty_rule_set() {
        assert!(matches!(bottom_up(&[]), Err(RewriteError::EmptyRuleSet)));

        let empty = Factory("Nothing", vec![]);
        let full = Factory("Full", vec!["A"]);
        match top_down(&[&full, &empty], true) {
            Err(RewriteError::EmptyRuleFactory { factory }) => assert_eq!(factory, "Nothing"),
            other => panic!("期望空工厂错误，实际为 {:?}", other),
        }
    }

    #[test]
    fn test_topics_flatten_in_order() {
        let a = Factory("A", vec!["A"]);
        let b = Factory("B", vec!["B"]);
        let c = Factory("C", vec!["C"]);

        let flat = jobs(vec![
            topic(
                "outer",
                vec![
                    bottom_up(&[&a]).expect("装配应该成功").into(),
                    topic("inner", vec![bottom_up(&[&b]).expect("装配应该成功").into()]).into(),
                ],
            )
            .into(),
            bottom_up(&[&c]).expect("装配应该成功").into(),
        ]);

        let descriptions: Vec<String> = flat.iter().map(|j| j.description()).collect();
        assert_eq!(
            descriptions,
            vec![
                "[outer] bottom-up(A)".to_string(),
                "[outer / inner] bottom-up(B)".to_string(),
                "bottom-up(C)".to_string(),
            ]
        );
    }
}
