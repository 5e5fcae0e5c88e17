//! 常量折叠规则
//!
//! 分别折叠 Filter 条件、Project 投影项与 Join 连接条件中的常量子表达式。
//! 折叠结果与原表达式相同时视为不匹配，保证规则不会反复触发。

use std::sync::Arc;

use crate::define_rule_factory;
use crate::query::planner::plan::{PlanNode, ProjectItem};
use crate::query::planner::rewrite::context::OptimizationContext;
use crate::query::planner::rewrite::expression_utils::fold_constants;
use crate::query::planner::rewrite::pattern::Pattern;
use crate::query::planner::rewrite::result::{MatchedResult, RewriteResult, TransformResult};
use crate::query::planner::rewrite::rule::RewriteRule;
use crate::query::planner::rewrite::rule_type::RuleType;

/// 折叠过滤条件中的常量
///
/// # 转换示例
///
/// Before:
/// ```text
///   Filter(a > 1 + 2 AND TRUE)
///       |
///   Scan
/// ```
///
/// After:
/// ```text
///   Filter(a > 3)
///       |
///   Scan
/// ```
#[derive(Debug, Default)]
pub struct FoldConstantFilter;

impl FoldConstantFilter {
    pub fn new() -> Self {
        Self
    }
}

impl RewriteRule for FoldConstantFilter {
    fn rule_type(&self) -> RuleType {
        RuleType::FoldConstantFilter
    }

    fn pattern(&self) -> Pattern {
        Pattern::with_filter_matcher()
    }

    fn transform(
        &self,
        matched: &MatchedResult,
        _ctx: &mut OptimizationContext<'_>,
    ) -> RewriteResult<Option<TransformResult>> {
        let Some(filter) = matched.root().as_filter() else {
            return Ok(None);
        };

        let folded = fold_constants(filter.condition());
        if &folded == filter.condition() {
            return Ok(None);
        }
        let node = filter.with_condition(folded).into_enum();
        Ok(Some(TransformResult::replace(Arc::new(node))))
    }
}

/// 折叠投影项中的常量
#[derive(Debug, Default)]
pub struct FoldConstantProject;

impl FoldConstantProject {
    pub fn new() -> Self {
        Self
    }
}

impl RewriteRule for FoldConstantProject {
    fn rule_type(&self) -> RuleType {
        RuleType::FoldConstantProject
    }

    fn pattern(&self) -> Pattern {
        Pattern::with_project_matcher()
    }

    fn transform(
        &self,
        matched: &MatchedResult,
        _ctx: &mut OptimizationContext<'_>,
    ) -> RewriteResult<Option<TransformResult>> {
        let Some(project) = matched.root().as_project() else {
            return Ok(None);
        };

        let mut changed = false;
        let items: Vec<ProjectItem> = project
            .items()
            .iter()
            .map(|item| {
                let folded = fold_constants(&item.expr);
                changed |= folded != item.expr;
                ProjectItem::new(folded, item.alias.clone())
            })
            .collect();
        if !changed {
            return Ok(None);
        }
        let node = project.with_items(items).into_enum();
        Ok(Some(TransformResult::replace(Arc::new(node))))
    }
}

/// 折叠连接条件中的常量
#[derive(Debug, Default)]
pub struct FoldConstantJoin;

impl FoldConstantJoin {
    pub fn new() -> Self {
        Self
    }
}

impl RewriteRule for FoldConstantJoin {
    fn rule_type(&self) -> RuleType {
        RuleType::FoldConstantJoin
    }

    fn pattern(&self) -> Pattern {
        Pattern::with_join_matcher()
    }

    fn transform(
        &self,
        matched: &MatchedResult,
        _ctx: &mut OptimizationContext<'_>,
    ) -> RewriteResult<Option<TransformResult>> {
        let Some(join) = matched.root().as_join() else {
            return Ok(None);
        };
        let Some(condition) = join.condition() else {
            return Ok(None);
        };

        let folded = fold_constants(condition);
        if &folded == condition {
            return Ok(None);
        }
        let node = join.with_condition(Some(folded)).into_enum();
        Ok(Some(TransformResult::replace(Arc::new(node))))
    }
}

define_rule_factory! {
    /// 常量折叠规则集
    name: FoldConstant,
    rules: [FoldConstantFilter, FoldConstantProject, FoldConstantJoin]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Expression;
    use crate::query::planner::plan::{JoinType, PlanNodeFactory};
    use crate::query::planner::rewrite::rule::RuleFactory;
    use crate::query::planner::rewrite::test_support::{
        apply_rule, assert_no_match_on_every_kind, single,
    };

    #[test]
    fn test_factory_builds_three_rules() {
        let rules = FoldConstant.build_rules();
        let names: Vec<&str> = rules.iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec!["FoldConstantFilter", "FoldConstantProject", "FoldConstantJoin"]
        );
    }

    #[test]
    fn test_no_match_on_every_kind() {
        assert_no_match_on_every_kind(&FoldConstantFilter);
        assert_no_match_on_every_kind(&FoldConstantProject);
        assert_no_match_on_every_kind(&FoldConstantJoin);
    }

    #[test]
    fn test_fold_filter_keeps_id() {
        let mut factory = PlanNodeFactory::new();
        let scan = factory.scan("t", &["a"]);
        let filter = factory.filter(
            scan,
            Expression::and(
                Expression::gt(
                    Expression::column("a"),
                    Expression::add(Expression::int(1), Expression::int(2)),
                ),
                Expression::bool(true),
            ),
        );

        let result = single(apply_rule(&FoldConstantFilter, &filter).expect("不应该报错"));
        assert_eq!(result.id(), filter.id());
        assert_eq!(result.to_string(), "Filter(a > 3)");
    }

    #[test]
    fn test_fold_project_and_join() {
        let mut factory = PlanNodeFactory::new();
        let scan = factory.scan("t", &["a"]);
        let project = factory.project(
            scan,
            vec![ProjectItem::new(
                Expression::mul(Expression::int(2), Expression::int(5)),
                "ten",
            )],
        );
        let result = single(apply_rule(&FoldConstantProject, &project).expect("不应该报错"));
        assert_eq!(result.to_string(), "Project(10 AS ten)");

        let left = factory.scan("l", &["a"]);
        let right = factory.scan("r", &["b"]);
        let join = factory.join(
            left,
            right,
            JoinType::Inner,
            Some(Expression::and(
                Expression::eq(Expression::column("a"), Expression::column("b")),
                Expression::eq(Expression::int(1), Expression::int(1)),
            )),
        );
        let result = single(apply_rule(&FoldConstantJoin, &join).expect("不应该报错"));
        assert_eq!(result.to_string(), "Join(INNER, on: a = b)");
    }

    #[test]
    fn test_division_by_zero_is_not_folded() {
        let mut factory = PlanNodeFactory::new();
        let scan = factory.scan("t", &["a"]);
        let filter = factory.filter(
            scan,
            Expression::gt(
                Expression::column("a"),
                Expression::div(Expression::int(1), Expression::int(0)),
            ),
        );
        assert!(apply_rule(&FoldConstantFilter, &filter)
            .expect("不应该报错")
            .is_none());
    }
}
