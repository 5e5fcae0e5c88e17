//! 将过滤条件下推到投影之下的规则
//!
//! 谓词中引用的每个投影输出列都替换为其定义表达式，
//! 使得下推后的条件在每一行上与原条件取值相同。

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::trace;

use crate::core::Expression;
use crate::define_rule_factory;
use crate::query::planner::plan::{
    FilterNode, PlanNode, PlanNodeKind, PlanRef, ProjectNode, SingleInputNode,
};
use crate::query::planner::rewrite::context::OptimizationContext;
use crate::query::planner::rewrite::pattern::Pattern;
use crate::query::planner::rewrite::result::{MatchedResult, RewriteResult, TransformResult};
use crate::query::planner::rewrite::rule::RewriteRule;
use crate::query::planner::rewrite::rule_type::RuleType;

/// Filter -> Project 的匹配模式，重写与探索两个版本共用
pub fn filter_over_project_pattern() -> Pattern {
    Pattern::with_filter_matcher().with_dependency_kind(PlanNodeKind::Project)
}

/// 交换 Filter 与 Project，并把谓词通过投影映射改写
///
/// 满足以下全部条件时返回 `Project -> Filter` 子树，否则返回 None：
/// - 投影别名互不重复
/// - 谓词引用的列都是投影输出列
/// - 谓词本身以及被引用列的定义表达式都是确定性的
///
/// 新的 Project 沿用原 Filter 的 id，下推后的 Filter 分配新 id。
pub fn pushdown_filter_through_project(
    filter: &FilterNode,
    ctx: &mut OptimizationContext<'_>,
) -> Option<PlanRef> {
    let project = filter.input().as_project()?;
    let mapping = safe_mapping(filter.condition(), project)?;

    let predicate = filter.condition().substitute(&mapping);
    trace!("谓词 {} 改写为 {}", filter.condition(), predicate);

    let pushed = FilterNode::new(ctx.next_node_id(), Arc::clone(project.input()), predicate);
    let lifted = ProjectNode::new(
        filter.id(),
        Arc::new(pushed.into_enum()),
        project.items().to_vec(),
    );
    Some(Arc::new(lifted.into_enum()))
}

/// 构建谓词改写所需的映射，映射不安全时返回 None
fn safe_mapping(
    predicate: &Expression,
    project: &ProjectNode,
) -> Option<HashMap<String, Expression>> {
    if !predicate.is_deterministic() {
        return None;
    }

    let mut seen = HashSet::new();
    if !project.items().iter().all(|item| seen.insert(item.alias.as_str())) {
        return None;
    }

    let definitions: HashMap<&str, &Expression> = project
        .items()
        .iter()
        .map(|item| (item.alias.as_str(), &item.expr))
        .collect();

    let mut mapping = HashMap::new();
    for column in predicate.referenced_columns() {
        let definition = definitions.get(column.as_str())?;
        if !definition.is_deterministic() {
            return None;
        }
        mapping.insert(column, (*definition).clone());
    }
    Some(mapping)
}

/// 将过滤条件下推到投影之下
///
/// # 转换示例
///
/// Before:
/// ```text
///   Filter(a > 2 AND b = 0)
///       |
///   Project(c + d AS a, e AS b)
///       |
///   Scan
/// ```
///
/// After:
/// ```text
///   Project(c + d AS a, e AS b)
///       |
///   Filter(c + d > 2 AND e = 0)
///       |
///   Scan
/// ```
#[derive(Debug, Default)]
pub struct PushdownFilterThroughProjectRule;

impl PushdownFilterThroughProjectRule {
    pub fn new() -> Self {
        Self
    }
}

impl RewriteRule for PushdownFilterThroughProjectRule {
    fn rule_type(&self) -> RuleType {
        RuleType::PushdownFilterThroughProject
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
    /// 谓词下推规则集
    name: PushdownFilterThroughProject,
    rules: [PushdownFilterThroughProjectRule]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::planner::plan::{PlanNodeFactory, ProjectItem};
    use crate::query::planner::rewrite::test_support::{
        apply_rule, assert_no_match_on_every_kind, single,
    };

    fn example() -> PlanRef {
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

    #[test]
    fn test_no_match_on_every_kind() {
        assert_no_match_on_every_kind(&PushdownFilterThroughProjectRule);
    }

    #[test]
    fn test_pushdown_rewrites_predicate() {
        let plan = example();
        let result = single(
            apply_rule(&PushdownFilterThroughProjectRule, &plan).expect("不应该报错"),
        );

        assert_eq!(
            result.explain(),
            "Project(c + d AS a, e AS b)\n  Filter(c + d > 2 AND e = 0)\n    Scan(t: c, d, e)"
        );
        assert_eq!(result.id(), plan.id());
        assert!(result.children()[0].id() > plan.max_id());

        // 结果的根是 Project，不会再次匹配
        assert!(apply_rule(&PushdownFilterThroughProjectRule, &result)
            .expect("不应该报错")
            .is_none());
    }

    #[test]
    fn test_refuses_unsafe_mappings() {
        let mut factory = PlanNodeFactory::new();
        let scan = factory.scan("t", &["c"]);

        // 定义表达式不确定
        let project = factory.project(
            scan.clone(),
            vec![ProjectItem::new(Expression::function("rand", vec![]), "a")],
        );
        let filter = factory.filter(
            project,
            Expression::gt(Expression::column("a"), Expression::int(0)),
        );
        assert!(apply_rule(&PushdownFilterThroughProjectRule, &filter)
            .expect("不应该报错")
            .is_none());

        // 谓词引用了投影之外的列
        let project = factory.project(scan.clone(), vec![ProjectItem::column("c")]);
        let filter = factory.filter(
            project,
            Expression::gt(Expression::column("z"), Expression::int(0)),
        );
        assert!(apply_rule(&PushdownFilterThroughProjectRule, &filter)
            .expect("不应该报错")
            .is_none());

        // 别名重复
        let project = factory.project(
            scan,
            vec![
                ProjectItem::new(Expression::column("c"), "a"),
                ProjectItem::new(Expression::int(1), "a"),
            ],
        );
        let filter = factory.filter(
            project,
            Expression::gt(Expression::column("a"), Expression::int(0)),
        );
        assert!(apply_rule(&PushdownFilterThroughProjectRule, &filter)
            .expect("不应该报错")
            .is_none());
    }

    #[test]
    fn test_refuses_non_deterministic_predicate() {
        let mut factory = PlanNodeFactory::new();
        let scan = factory.scan("t", &["c"]);
        let project = factory.project(scan, vec![ProjectItem::column("c")]);
        let filter = factory.filter(
            project,
            Expression::gt(Expression::function("random", vec![]), Expression::column("c")),
        );
        assert!(apply_rule(&PushdownFilterThroughProjectRule, &filter)
            .expect("不应该报错")
            .is_none());
    }
}
