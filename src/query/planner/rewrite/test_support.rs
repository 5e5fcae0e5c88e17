//! 规则单元测试的公共夹具

use crate::config::OptimizerConfig;
use crate::core::Expression;
use crate::query::optimizer::catalog::{Catalog, MemoryCatalog};
use crate::query::optimizer::memo::GroupMemo;
use crate::query::planner::plan::{JoinType, PlanNodeFactory, PlanRef, ProjectItem, SortItem};
use crate::query::planner::rewrite::context::OptimizationContext;
use crate::query::planner::rewrite::result::{RewriteResult, TransformResult};
use crate::query::planner::rewrite::rule::RewriteRule;

/// 每种节点类型各一个，内容不会触发任何内置规则
pub(crate) fn one_of_each_kind() -> Vec<PlanRef> {
    let mut f = PlanNodeFactory::new();
    let scan = f.scan("t", &["a", "b"]);
    let filter = {
        let s = f.scan("t", &["a", "b"]);
        f.filter(s, Expression::gt(Expression::column("a"), Expression::int(1)))
    };
    let project = {
        let s = f.scan("t", &["a", "b"]);
        f.project(s, vec![ProjectItem::column("a"), ProjectItem::column("b")])
    };
    let join = {
        let l = f.scan("l", &["a", "b"]);
        let r = f.scan("r", &["c"]);
        f.join(
            l,
            r,
            JoinType::Inner,
            Some(Expression::eq(Expression::column("a"), Expression::column("c"))),
        )
    };
    let aggregate = {
        let s = f.scan("t", &["a", "b"]);
        f.aggregate(
            s,
            &["a"],
            vec![ProjectItem::new(
                Expression::function("count", vec![Expression::column("b")]),
                "cnt",
            )],
        )
    };
    let sort = {
        let s = f.scan("t", &["a", "b"]);
        f.sort(s, vec![SortItem::asc("a")])
    };
    let limit = {
        let s = f.scan("t", &["a", "b"]);
        f.limit(s, 0, 10)
    };
    let empty = f.empty(&["a"]);
    vec![scan, filter, project, join, aggregate, sort, limit, empty]
}

/// 在单个节点上尝试一次规则
pub(crate) fn apply_rule(
    rule: &dyn RewriteRule,
    plan: &PlanRef,
) -> RewriteResult<Option<TransformResult>> {
    apply_rule_with_catalog(rule, plan, &MemoryCatalog::new())
}

pub(crate) fn apply_rule_with_catalog(
    rule: &dyn RewriteRule,
    plan: &PlanRef,
    catalog: &dyn Catalog,
) -> RewriteResult<Option<TransformResult>> {
    let Some(matched) = rule.try_match(plan) else {
        return Ok(None);
    };
    let mut memo = GroupMemo::new();
    let mut ctx = OptimizationContext::new(
        PlanRef::clone(plan),
        &mut memo,
        catalog,
        OptimizerConfig::default(),
    );
    rule.transform(&matched, &mut ctx)
}

/// 断言规则对所有样例节点都不匹配
pub(crate) fn assert_no_match_on_every_kind(rule: &dyn RewriteRule) {
    for node in one_of_each_kind() {
        let result = apply_rule(rule, &node).expect("规则不应该报错");
        assert!(
            result.is_none(),
            "规则 {} 不应该在 {} 上生效",
            rule.name(),
            node.name()
        );
    }
}

/// 取出唯一的替换节点
pub(crate) fn single(result: Option<TransformResult>) -> PlanRef {
    let result = result.expect("规则应该生效");
    assert_eq!(result.new_nodes.len(), 1);
    PlanRef::clone(&result.new_nodes[0])
}
