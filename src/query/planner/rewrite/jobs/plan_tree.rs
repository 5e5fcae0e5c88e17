//! 计划树遍历作业
//!
//! 按自底向上或自顶向下的顺序访问计划树，在每个节点上依次尝试规则。
//! 重写规则生效后从规则列表开头重新尝试，直到该节点上没有规则再生效。
//! 子节点改变时用 `with_new_children` 重建父节点，父节点保留原 id，
//! 未改变的子树通过 Arc 共享。

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use log::{debug, trace, warn};

use crate::query::planner::plan::PlanRef;
use crate::query::planner::rewrite::context::OptimizationContext;
use crate::query::planner::rewrite::result::{RewriteError, RewriteResult, TransformResult};
use crate::query::planner::rewrite::rule::{Rule, RuleKind};

/// 遍历顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    /// 先子节点后父节点
    BottomUp,
    /// 先父节点后子节点
    TopDown,
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraversalOrder::BottomUp => write!(f, "bottom-up"),
            TraversalOrder::TopDown => write!(f, "top-down"),
        }
    }
}

type VisitFn = fn(
    &PlanTreeRewriteJob,
    &PlanRef,
    &[&Rule],
    &mut OptimizationContext<'_>,
) -> RewriteResult<PlanRef>;

/// 计划树重写作业
#[derive(Debug, Clone)]
pub struct PlanTreeRewriteJob {
    order: TraversalOrder,
    rules: Vec<Rule>,
    once: bool,
    pub(crate) topic: Option<String>,
}

impl PlanTreeRewriteJob {
    pub fn new(order: TraversalOrder, rules: Vec<Rule>, once: bool) -> Self {
        Self {
            order,
            rules,
            once,
            topic: None,
        }
    }

    pub fn order(&self) -> TraversalOrder {
        self.order
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_once(&self) -> bool {
        self.once
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub(crate) fn describe(&self) -> String {
        let names: Vec<&str> = self.rules.iter().map(|r| r.name()).collect();
        format!("{}({})", self.order, names.join(", "))
    }

    /// 执行一轮遍历
    pub fn execute(&self, ctx: &mut OptimizationContext<'_>) -> RewriteResult<()> {
        let rules: Vec<&Rule> = self
            .rules
            .iter()
            .filter(|rule| !ctx.is_rule_disabled(rule.rule_type()))
            .collect();
        if rules.is_empty() {
            debug!("作业 {} 的规则全部被禁用，跳过", self.describe());
            return Ok(());
        }

        let root = Arc::clone(ctx.plan());
        let rewritten = match self.order {
            TraversalOrder::BottomUp => self.rewrite_bottom_up(&root, &rules, ctx)?,
            TraversalOrder::TopDown => self.rewrite_top_down(&root, &rules, ctx)?,
        };
        if !Arc::ptr_eq(&root, &rewritten) {
            ctx.set_plan(rewritten);
        }
        Ok(())
    }

    fn rewrite_bottom_up(
        &self,
        node: &PlanRef,
        rules: &[&Rule],
        ctx: &mut OptimizationContext<'_>,
    ) -> RewriteResult<PlanRef> {
        let rebuilt = self.rewrite_children(node, rules, ctx, Self::rewrite_bottom_up)?;
        self.apply_rules(rebuilt, rules, ctx)
    }

    fn rewrite_top_down(
        &self,
        node: &PlanRef,
        rules: &[&Rule],
        ctx: &mut OptimizationContext<'_>,
    ) -> RewriteResult<PlanRef> {
        let current = self.apply_rules(Arc::clone(node), rules, ctx)?;
        self.rewrite_children(&current, rules, ctx, Self::rewrite_top_down)
    }

    /// 递归处理子节点，有子节点改变时重建当前节点
    fn rewrite_children(
        &self,
        node: &PlanRef,
        rules: &[&Rule],
        ctx: &mut OptimizationContext<'_>,
        visit: VisitFn,
    ) -> RewriteResult<PlanRef> {
        let children = node.children();
        if children.is_empty() {
            return Ok(Arc::clone(node));
        }

        let mut changed = false;
        let mut new_children = Vec::with_capacity(children.len());
        for child in children {
            let new_child = visit(self, child, rules, ctx)?;
            changed |= !Arc::ptr_eq(child, &new_child);
            new_children.push(new_child);
        }

        if changed {
            Ok(Arc::new(node.with_new_children(new_children)?))
        } else {
            Ok(Arc::clone(node))
        }
    }

    /// 在单个节点上应用规则直到不动点
    fn apply_rules(
        &self,
        mut node: PlanRef,
        rules: &[&Rule],
        ctx: &mut OptimizationContext<'_>,
    ) -> RewriteResult<PlanRef> {
        let cap = ctx.config().max_node_applications;
        let history_size = ctx.config().shape_history_size;
        let mut shapes: VecDeque<String> = VecDeque::with_capacity(history_size + 1);
        let mut applications = 0usize;

        'fixpoint: loop {
            for rule in rules {
                let Some(matched) = rule.try_match(&node) else {
                    continue;
                };
                trace!("规则 {} 匹配节点 {}[{}]", rule.name(), node.name(), node.id());
                let Some(result) = rule.transform(&matched, ctx)? else {
                    continue;
                };

                match rule.kind() {
                    RuleKind::Rewrite => {
                        let replacement = single_replacement(rule, &node, result)?;
                        if is_identical(&node, &replacement) {
                            warn!(
                                "规则 {} 在节点 {}[{}] 上返回了相同的计划，视为未匹配",
                                rule.name(),
                                node.name(),
                                node.id()
                            );
                            continue;
                        }
                        if applications >= cap {
                            return Err(RewriteError::non_termination(
                                format!("{} at {}[{}]", self.describe(), node.name(), node.id()),
                                applications,
                                shapes.into_iter().collect(),
                            ));
                        }

                        debug!(
                            "规则 {} 改写节点 {}[{}] -> {}[{}]",
                            rule.name(),
                            node.name(),
                            node.id(),
                            replacement.name(),
                            replacement.id()
                        );
                        applications += 1;
                        ctx.stats_mut().record_rule_application(rule.rule_type());
                        ctx.job_context_mut().set_rewritten(true);

                        if history_size > 0 {
                            if shapes.len() == history_size {
                                shapes.pop_front();
                            }
                            shapes.push_back(replacement.explain());
                        }
                        node = replacement;
                        continue 'fixpoint;
                    }
                    RuleKind::Exploration => {
                        let group_id = matched.root().id();
                        let mut added = false;
                        for candidate in result.new_nodes {
                            added |= ctx.register_alternative(group_id, candidate)?;
                        }
                        if added {
                            debug!("规则 {} 为分组 {} 登记了新的备选计划", rule.name(), group_id);
                            ctx.stats_mut().record_rule_application(rule.rule_type());
                            ctx.job_context_mut().set_rewritten(true);
                        }
                    }
                }
            }
            return Ok(node);
        }
    }
}

/// 重写规则必须返回恰好一个替换节点
fn single_replacement(
    rule: &Rule,
    node: &PlanRef,
    result: TransformResult,
) -> RewriteResult<PlanRef> {
    let count = result.new_nodes.len();
    let mut nodes = result.new_nodes.into_iter();
    match (nodes.next(), count) {
        (Some(replacement), 1) => Ok(replacement),
        _ => Err(RewriteError::rule_application(
            rule.rule_type(),
            node,
            format!("重写规则必须返回一个替换节点，实际返回 {} 个", count),
        )),
    }
}

fn is_identical(node: &PlanRef, replacement: &PlanRef) -> bool {
    Arc::ptr_eq(node, replacement)
        || (node.id() == replacement.id() && node.explain() == replacement.explain())
}
