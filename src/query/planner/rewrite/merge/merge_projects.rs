//! 合并连续投影规则
//!
//! 当两个 Project 节点连续出现时，把上层投影项中的列引用替换为下层的定义表达式，
//! 合并为一个 Project 节点，减少不必要的中间结果生成
//!
//! 示例:
//! ```text
//! Project(x + 1 AS y) -> Project(a * 2 AS x)  =>  Project(a * 2 + 1 AS y)
//! ```
//!
//! 适用条件:
//! - 两个 Project 节点连续出现
//! - 下层别名互不重复，且上层引用的列都由下层产生
//! - 下层投影表达式全部是确定性的

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::core::Expression;
use crate::define_rule_factory;
use crate::query::planner::plan::{PlanNode, PlanNodeKind, ProjectItem, SingleInputNode};
use crate::query::planner::rewrite::context::OptimizationContext;
use crate::query::planner::rewrite::pattern::Pattern;
use crate::query::planner::rewrite::result::{MatchedResult, RewriteResult, TransformResult};
use crate::query::planner::rewrite::rule::RewriteRule;
use crate::query::planner::rewrite::rule_type::RuleType;

/// 合并连续投影规则
#[derive(Debug, Default)]
pub struct MergeProjectsRule;

impl MergeProjectsRule {
    pub fn new() -> Self {
        Self
    }
}

impl RewriteRule for MergeProjectsRule {
    fn rule_type(&self) -> RuleType {
        RuleType::MergeProjects
    }

    fn pattern(&self) -> Pattern {
        Pattern::with_project_matcher().with_dependency_kind(PlanNodeKind::Project)
    }

    fn transform(
        &self,
        matched: &MatchedResult,
        _ctx: &mut OptimizationContext<'_>,
    ) -> RewriteResult<Option<TransformResult>> {
        let Some(outer) = matched.root().as_project() else {
            return Ok(None);
        };
        let Some(inner) = outer.input().as_project() else {
            return Ok(None);
        };

        // 非确定性表达式被展开后可能被求值多次
        if inner.items().iter().any(|item| !item.expr.is_deterministic()) {
            return Ok(None);
        }

        let mut seen = HashSet::new();
        if !inner.items().iter().all(|item| seen.insert(item.alias.as_str())) {
            return Ok(None);
        }
        let mapping: HashMap<String, Expression> = inner
            .items()
            .iter()
            .map(|item| (item.alias.clone(), item.expr.clone()))
            .collect();

        let resolvable = outer
            .items()
            .iter()
            .flat_map(|item| item.expr.referenced_columns())
            .all(|column| mapping.contains_key(&column));
        if !resolvable {
            return Ok(None);
        }

        let items = outer
            .items()
            .iter()
            .map(|item| ProjectItem::new(item.expr.substitute(&mapping), item.alias.clone()))
            .collect();
        let merged = outer
            .with_items(items)
            .with_input(Arc::clone(inner.input()))
            .into_enum();
        Ok(Some(TransformResult::replace(Arc::new(merged))))
    }
}

define_rule_factory! {
    name: MergeProjects,
    rules: [MergeProjectsRule]
}
