//! 过滤与投影交换的探索规则

use crate::define_rule_factory;
use crate::query::planner::rewrite::context::OptimizationContext;
use crate::query::planner::rewrite::pattern::Pattern;
use crate::query::planner::rewrite::predicate_pushdown::{
    filter_over_project_pattern, pushdown_filter_through_project,
};
use crate::query::planner::rewrite::result::{MatchedResult, RewriteResult, TransformResult};
use crate::query::planner::rewrite::rule::{RewriteRule, RuleKind};
use crate::query::planner::rewrite::rule_type::RuleType;

/// 把 `Project -> Filter` 作为 `Filter -> Project` 的等价备选登记到备忘录
///
/// 与重写版本共用同一个转换函数和规则类型
#[derive(Debug, Default)]
pub struct PushdownFilterThroughProjectCboRule;

impl PushdownFilterThroughProjectCboRule {
    pub fn new() -> Self {
        Self
    }
}

impl RewriteRule for PushdownFilterThroughProjectCboRule {
    fn rule_type(&self) -> RuleType {
        RuleType::PushdownFilterThroughProject
    }

    fn name(&self) -> &'static str {
        "PushdownFilterThroughProjectCbo"
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Exploration
    }

    fn pattern(&self) -> Pattern {
        filter_over_project_pattern()
    }

    fn transform(
        &self,
        matched: &MatchedResult,
        ctx: &mut OptimizationContext<'_>,
    ) -> RewriteResult<Option<TransformResult>> {
        let Some(filter) = matched.root().as_filter() else {
            return Ok(None);
        };
        Ok(pushdown_filter_through_project(filter, ctx).map(TransformResult::replace))
    }
}

define_rule_factory! {
    name: PushdownFilterThroughProjectCbo,
    rules: [PushdownFilterThroughProjectCboRule]
}
