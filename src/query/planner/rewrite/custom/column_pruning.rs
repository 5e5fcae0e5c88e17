//! 列裁剪
//!
//! 从根节点向下传递"上层需要的列"集合，裁剪掉没有被任何上层使用的
//! 投影项、聚合输出与扫描列。根节点的输出列保持不变。
//! 至少保留一列，避免产生没有输出列的节点。

use std::collections::BTreeSet;
use std::sync::Arc;

use log::debug;

use crate::core::Expression;
use crate::query::planner::plan::{
    BinaryInputNode, PlanNodeEnum, PlanRef, ProjectItem, SingleInputNode,
};
use crate::query::planner::rewrite::context::OptimizationContext;
use crate::query::planner::rewrite::jobs::{CustomRewriteError, CustomRewriter};

/// 列裁剪重写器
///
/// 每次运行创建新实例，`pruned` 只统计本次运行裁剪掉的列数
#[derive(Debug, Default)]
pub struct ColumnPruning {
    pruned: usize,
}

impl ColumnPruning {
    pub fn new() -> Self {
        Self::default()
    }

    /// 本次运行裁剪掉的列数
    pub fn pruned(&self) -> usize {
        self.pruned
    }

    fn prune(&mut self, node: &PlanRef, required: &BTreeSet<String>) -> PlanRef {
        match node.as_ref() {
            PlanNodeEnum::Scan(scan) => {
                let kept = keep_at_least_one(
                    scan.columns().iter().filter(|c| required.contains(*c)).cloned().collect(),
                    scan.columns().first(),
                );
                if kept.len() == scan.columns().len() {
                    return Arc::clone(node);
                }
                self.pruned += scan.columns().len() - kept.len();
                Arc::new(PlanNodeEnum::Scan(scan.with_columns(kept)))
            }
            PlanNodeEnum::Project(project) => {
                let kept: Vec<ProjectItem> = keep_at_least_one(
                    project
                        .items()
                        .iter()
                        .filter(|item| required.contains(&item.alias))
                        .cloned()
                        .collect(),
                    project.items().first(),
                );
                let child_required = referenced_columns(kept.iter().map(|item| &item.expr));
                let input = self.prune(project.input(), &child_required);

                let removed = project.items().len() - kept.len();
                if removed == 0 && Arc::ptr_eq(&input, project.input()) {
                    return Arc::clone(node);
                }
                self.pruned += removed;
                Arc::new(PlanNodeEnum::Project(
                    project.with_items(kept).with_input(input),
                ))
            }
            PlanNodeEnum::Aggregate(agg) => {
                let mut kept: Vec<ProjectItem> = agg
                    .aggregates()
                    .iter()
                    .filter(|item| required.contains(&item.alias))
                    .cloned()
                    .collect();
                if kept.is_empty() && agg.group_keys().is_empty() {
                    kept.extend(agg.aggregates().first().cloned());
                }
                let mut child_required = referenced_columns(kept.iter().map(|item| &item.expr));
                child_required.extend(agg.group_keys().iter().cloned());
                let input = self.prune(agg.input(), &child_required);

                let removed = agg.aggregates().len() - kept.len();
                if removed == 0 && Arc::ptr_eq(&input, agg.input()) {
                    return Arc::clone(node);
                }
                self.pruned += removed;
                Arc::new(PlanNodeEnum::Aggregate(
                    agg.with_aggregates(kept).with_input(input),
                ))
            }
            PlanNodeEnum::Filter(filter) => {
                let mut child_required = required.clone();
                child_required.extend(filter.condition().referenced_columns());
                let input = self.prune(filter.input(), &child_required);
                if Arc::ptr_eq(&input, filter.input()) {
                    return Arc::clone(node);
                }
                Arc::new(PlanNodeEnum::Filter(filter.with_input(input)))
            }
            PlanNodeEnum::Sort(sort) => {
                let mut child_required = required.clone();
                child_required.extend(sort.sort_items().iter().map(|item| item.column.clone()));
                let input = self.prune(sort.input(), &child_required);
                if Arc::ptr_eq(&input, sort.input()) {
                    return Arc::clone(node);
                }
                Arc::new(PlanNodeEnum::Sort(sort.with_input(input)))
            }
            PlanNodeEnum::Limit(limit) => {
                let input = self.prune(limit.input(), required);
                if Arc::ptr_eq(&input, limit.input()) {
                    return Arc::clone(node);
                }
                Arc::new(PlanNodeEnum::Limit(limit.with_input(input)))
            }
            PlanNodeEnum::Join(join) => {
                let mut needed = required.clone();
                if let Some(condition) = join.condition() {
                    needed.extend(condition.referenced_columns());
                }
                let left_required = restrict(&needed, join.left());
                let right_required = restrict(&needed, join.right());
                let left = self.prune(join.left(), &left_required);
                let right = self.prune(join.right(), &right_required);
                if Arc::ptr_eq(&left, join.left()) && Arc::ptr_eq(&right, join.right()) {
                    return Arc::clone(node);
                }
                Arc::new(PlanNodeEnum::Join(join.with_inputs(left, right)))
            }
            PlanNodeEnum::Empty(_) => Arc::clone(node),
        }
    }
}

impl CustomRewriter for ColumnPruning {
    fn rewrite_root(
        &mut self,
        plan: PlanRef,
        _ctx: &mut OptimizationContext<'_>,
    ) -> Result<PlanRef, CustomRewriteError> {
        let required: BTreeSet<String> = plan.output_columns().into_iter().collect();
        let pruned = self.prune(&plan, &required);
        if self.pruned > 0 {
            debug!("列裁剪移除了 {} 个未使用的列", self.pruned);
        }
        Ok(pruned)
    }
}

fn referenced_columns<'a>(exprs: impl Iterator<Item = &'a Expression>) -> BTreeSet<String> {
    exprs.flat_map(|expr| expr.referenced_columns()).collect()
}

/// 只保留子节点能提供的列
fn restrict(needed: &BTreeSet<String>, child: &PlanRef) -> BTreeSet<String> {
    child
        .output_columns()
        .into_iter()
        .filter(|column| needed.contains(column))
        .collect()
}

fn keep_at_least_one<T: Clone>(mut kept: Vec<T>, fallback: Option<&T>) -> Vec<T> {
    if kept.is_empty() {
        kept.extend(fallback.cloned());
    }
    kept
}
