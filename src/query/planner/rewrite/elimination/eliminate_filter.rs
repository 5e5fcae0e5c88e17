//! 消除冗余过滤操作的规则

use std::sync::Arc;

use crate::define_rule_factory;
use crate::query::planner::plan::{EmptyNode, PlanNode, SingleInputNode};
use crate::query::planner::rewrite::context::OptimizationContext;
use crate::query::planner::rewrite::expression_utils::is_false_or_null_literal;
use crate::query::planner::rewrite::pattern::Pattern;
use crate::query::planner::rewrite::result::{MatchedResult, RewriteResult, TransformResult};
use crate::query::planner::rewrite::rule::RewriteRule;
use crate::query::planner::rewrite::rule_type::RuleType;

/// 消除条件为常量的过滤操作
///
/// # 转换示例
///
/// Before:
/// ```text
///   Filter(TRUE)
///       |
///   Scan
/// ```
///
/// After:
/// ```text
///   Scan
/// ```
///
/// 条件为 FALSE 或 NULL 时整个子树替换为输出列相同的 Empty 节点。
///
/// # 适用条件
///
/// - 过滤条件是布尔字面量或 NULL
#[derive(Debug, Default)]
pub struct EliminateFilterRule;

impl EliminateFilterRule {
    pub fn new() -> Self {
        Self
    }
}

impl RewriteRule for EliminateFilterRule {
    fn rule_type(&self) -> RuleType {
        RuleType::EliminateFilter
    }

    fn pattern(&self) -> Pattern {
        Pattern::with_filter_matcher()
    }

    fn transform(
        &self,
        matched: &MatchedResult,
        ctx: &mut OptimizationContext<'_>,
    ) -> RewriteResult<Option<TransformResult>> {
        let Some(filter) = matched.root().as_filter() else {
            return Ok(None);
        };

        if filter.condition().is_true_literal() {
            return Ok(Some(TransformResult::replace(Arc::clone(filter.input()))));
        }
        if is_false_or_null_literal(filter.condition()) {
            let empty = EmptyNode::new(ctx.next_node_id(), filter.input().output_columns());
            return Ok(Some(TransformResult::replace(Arc::new(empty.into_enum()))));
        }
        Ok(None)
    }
}

define_rule_factory! {
    /// 过滤消除规则集
    name: EliminateFilter,
    rules: [EliminateFilterRule]
}
