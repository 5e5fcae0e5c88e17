//! 消除非空列上 IS NOT NULL 判断的规则

use std::sync::Arc;

use log::trace;

use crate::core::{Expression, UnaryOperator};
use crate::define_rule_factory;
use crate::query::planner::plan::{PlanNode, PlanNodeKind, SingleInputNode};
use crate::query::planner::rewrite::context::OptimizationContext;
use crate::query::planner::rewrite::pattern::Pattern;
use crate::query::planner::rewrite::result::{MatchedResult, RewriteResult, TransformResult};
use crate::query::planner::rewrite::rule::RewriteRule;
use crate::query::planner::rewrite::rule_type::RuleType;

/// 消除扫描之上对非空列的 IS NOT NULL 判断
///
/// # 转换示例
///
/// Before:
/// ```text
///   Filter(id IS NOT NULL AND a > 1)
///       |
///   Scan(t: id, a)
/// ```
///
/// After:
/// ```text
///   Filter(a > 1)
///       |
///   Scan(t: id, a)
/// ```
///
/// # 适用条件
///
/// - Filter 直接位于 Scan 之上
/// - 目录中该列声明为不可为空
#[derive(Debug, Default)]
pub struct EliminateNotNullRule;

impl EliminateNotNullRule {
    pub fn new() -> Self {
        Self
    }
}

impl RewriteRule for EliminateNotNullRule {
    fn rule_type(&self) -> RuleType {
        RuleType::EliminateNotNull
    }

    fn pattern(&self) -> Pattern {
        Pattern::with_filter_matcher().with_dependency_kind(PlanNodeKind::Scan)
    }

    fn transform(
        &self,
        matched: &MatchedResult,
        ctx: &mut OptimizationContext<'_>,
    ) -> RewriteResult<Option<TransformResult>> {
        let Some(filter) = matched.root().as_filter() else {
            return Ok(None);
        };
        let Some(scan) = filter.input().as_scan() else {
            return Ok(None);
        };

        let conjuncts = filter.condition().split_conjuncts();
        let total = conjuncts.len();
        let remaining: Vec<Expression> = conjuncts
            .into_iter()
            .filter(|conjunct| {
                let Some(column) = not_null_column(conjunct) else {
                    return true;
                };
                let redundant = scan.columns().iter().any(|c| c == column)
                    && ctx.catalog().is_nullable(scan.table(), column) == Some(false);
                if redundant {
                    trace!("{}.{} 不可为空，移除 IS NOT NULL 判断", scan.table(), column);
                }
                !redundant
            })
            .collect();

        if remaining.len() == total {
            return Ok(None);
        }
        match Expression::conjunction(remaining) {
            Some(condition) => {
                let node = filter.with_condition(condition).into_enum();
                Ok(Some(TransformResult::replace(Arc::new(node))))
            }
            None => Ok(Some(TransformResult::replace(Arc::clone(filter.input())))),
        }
    }
}

/// `col IS NOT NULL` 形式时返回列名
fn not_null_column(expr: &Expression) -> Option<&str> {
    match expr {
        Expression::Unary {
            op: UnaryOperator::IsNotNull,
            operand,
        } => operand.as_column(),
        _ => None,
    }
}

define_rule_factory! {
    name: EliminateNotNull,
    rules: [EliminateNotNullRule]
}
