//! 合并多个过滤操作的规则

use std::sync::Arc;

use crate::define_rule_factory;
use crate::query::planner::plan::{PlanNode, PlanNodeKind, SingleInputNode};
use crate::query::planner::rewrite::context::OptimizationContext;
use crate::query::planner::rewrite::expression_utils::merge_conditions;
use crate::query::planner::rewrite::pattern::Pattern;
use crate::query::planner::rewrite::result::{MatchedResult, RewriteResult, TransformResult};
use crate::query::planner::rewrite::rule::RewriteRule;
use crate::query::planner::rewrite::rule_type::RuleType;

/// 合并多个过滤操作的规则
///
/// # 转换示例
///
/// Before:
/// ```text
///   Filter(col2 > 200)
///       |
///   Filter(col1 > 100)
///       |
///   Scan
/// ```
///
/// After:
/// ```text
///   Filter(col1 > 100 AND col2 > 200)
///       |
///   Scan
/// ```
///
/// # 适用条件
///
/// - 当前节点为Filter节点
/// - 子节点也为Filter节点
///
/// 下层条件的合取项排在前面，重复的合取项只保留一次。合并后的节点沿用上层 Filter 的 id。
#[derive(Debug, Default)]
pub struct MergeFiltersRule;

impl MergeFiltersRule {
    pub fn new() -> Self {
        Self
    }
}

impl RewriteRule for MergeFiltersRule {
    fn rule_type(&self) -> RuleType {
        RuleType::MergeFilters
    }

    fn pattern(&self) -> Pattern {
        Pattern::with_filter_matcher().with_dependency_kind(PlanNodeKind::Filter)
    }

    fn transform(
        &self,
        matched: &MatchedResult,
        _ctx: &mut OptimizationContext<'_>,
    ) -> RewriteResult<Option<TransformResult>> {
        let Some(top) = matched.root().as_filter() else {
            return Ok(None);
        };
        let Some(child) = top.input().as_filter() else {
            return Ok(None);
        };

        let combined = merge_conditions(child.condition(), top.condition());
        let merged = top
            .with_condition(combined)
            .with_input(Arc::clone(child.input()))
            .into_enum();
        Ok(Some(TransformResult::replace(Arc::new(merged))))
    }
}

define_rule_factory! {
    name: MergeFilters,
    rules: [MergeFiltersRule]
}
