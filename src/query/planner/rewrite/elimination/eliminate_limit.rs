//! 消除 LIMIT 0 的规则

use std::sync::Arc;

use crate::define_rule_factory;
use crate::query::planner::plan::{EmptyNode, PlanNode, SingleInputNode};
use crate::query::planner::rewrite::context::OptimizationContext;
use crate::query::planner::rewrite::pattern::Pattern;
use crate::query::planner::rewrite::result::{MatchedResult, RewriteResult, TransformResult};
use crate::query::planner::rewrite::rule::RewriteRule;
use crate::query::planner::rewrite::rule_type::RuleType;

/// `Limit(count: 0)` 不产生任何行，替换为输出列相同的 Empty 节点
#[derive(Debug, Default)]
pub struct EliminateLimitRule;

impl EliminateLimitRule {
    pub fn new() -> Self {
        Self
    }
}

impl RewriteRule for EliminateLimitRule {
    fn rule_type(&self) -> RuleType {
        RuleType::EliminateLimit
    }

    fn pattern(&self) -> Pattern {
        Pattern::with_limit_matcher()
    }

    fn transform(
        &self,
        matched: &MatchedResult,
        ctx: &mut OptimizationContext<'_>,
    ) -> RewriteResult<Option<TransformResult>> {
        let Some(limit) = matched.root().as_limit() else {
            return Ok(None);
        };
        if limit.count() != 0 {
            return Ok(None);
        }
        let empty = EmptyNode::new(ctx.next_node_id(), limit.input().output_columns());
        Ok(Some(TransformResult::replace(Arc::new(empty.into_enum()))))
    }
}

define_rule_factory! {
    name: EliminateLimit,
    rules: [EliminateLimitRule]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::planner::plan::PlanNodeFactory;
    use crate::query::planner::rewrite::test_support::{
        apply_rule, assert_no_match_on_every_kind, single,
    };

    #[test]
    fn test_no_match_on_every_kind() {
        assert_no_match_on_every_kind(&EliminateLimitRule);
    }

    #[test]
    fn test_limit_zero_becomes_empty() {
        let mut factory = PlanNodeFactory::new();
        let scan = factory.scan("t", &["a", "b"]);
        let limit = factory.limit(scan, 5, 0);

        let result = single(apply_rule(&EliminateLimitRule, &limit).expect("不应该报错"));
        assert_eq!(result.to_string(), "Empty(a, b)");
        assert_eq!(result.id(), 3);
    }
}
