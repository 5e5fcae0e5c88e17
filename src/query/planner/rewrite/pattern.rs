//! 模式匹配定义
//!
//! 提供计划节点的模式匹配功能，用于重写规则识别特定计划结构。
//! 匹配只检查节点类型标签以及模式中显式列出的子节点，
//! 不会访问模式之外的子树。

use std::sync::Arc;

use crate::query::planner::plan::{PlanNodeEnum, PlanNodeKind, PlanRef};
use crate::query::planner::rewrite::result::MatchedResult;

/// 模式结构体
///
/// 用于匹配计划树的特定结构。
/// 包含当前节点的匹配条件和子节点的模式，子节点模式按位置对应。
#[derive(Debug, Clone)]
pub struct Pattern {
    /// 当前节点的匹配条件
    pub node: MatchNode,
    /// 子节点的模式列表，为空时不检查子节点
    pub dependencies: Vec<Pattern>,
}

impl Pattern {
    /// 匹配任意节点的模式
    pub fn any() -> Self {
        Self::with_node(MatchNode::Any)
    }

    /// 使用指定节点创建模式
    pub fn with_node(node: MatchNode) -> Self {
        Self {
            node,
            dependencies: Vec::new(),
        }
    }

    /// 使用节点类型创建模式
    pub fn new(kind: PlanNodeKind) -> Self {
        Self::with_node(MatchNode::Single(kind))
    }

    /// 使用多个可能的节点类型创建模式
    pub fn multi(kinds: Vec<PlanNodeKind>) -> Self {
        Self::with_node(MatchNode::Multi(kinds))
    }

    /// 添加子节点模式
    pub fn with_dependency(mut self, dependency: Pattern) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// 使用节点类型添加子节点模式
    pub fn with_dependency_kind(mut self, kind: PlanNodeKind) -> Self {
        self.dependencies.push(Self::new(kind));
        self
    }

    /// 检查模式是否匹配给定的计划节点
    pub fn matches(&self, plan_node: &PlanNodeEnum) -> bool {
        if !self.node.matches(plan_node.kind()) {
            return false;
        }
        if self.dependencies.is_empty() {
            return true;
        }

        let children = plan_node.children();
        children.len() == self.dependencies.len()
            && self
                .dependencies
                .iter()
                .zip(children)
                .all(|(pattern, child)| pattern.matches(child))
    }

    /// 匹配并收集节点，结果按模式先序排列
    pub fn match_plan(&self, plan: &PlanRef) -> Option<MatchedResult> {
        if !self.matches(plan) {
            return None;
        }
        let mut result = MatchedResult::new(Arc::clone(plan));
        self.collect_dependencies(plan, &mut result);
        Some(result)
    }

    fn collect_dependencies(&self, plan: &PlanNodeEnum, result: &mut MatchedResult) {
        for (pattern, child) in self.dependencies.iter().zip(plan.children()) {
            result.add_node(Arc::clone(child));
            pattern.collect_dependencies(child, result);
        }
    }

    // ==================== 便捷构造方法 ====================

    /// 创建匹配 Filter 节点的模式
    pub fn with_filter_matcher() -> Self {
        Self::new(PlanNodeKind::Filter)
    }

    /// 创建匹配 Project 节点的模式
    pub fn with_project_matcher() -> Self {
        Self::new(PlanNodeKind::Project)
    }

    /// 创建匹配 Limit 节点的模式
    pub fn with_limit_matcher() -> Self {
        Self::new(PlanNodeKind::Limit)
    }

    /// 创建匹配 Join 节点的模式
    pub fn with_join_matcher() -> Self {
        Self::new(PlanNodeKind::Join)
    }
}

/// 节点匹配枚举
///
/// 定义如何匹配单个计划节点
#[derive(Debug, Clone)]
pub enum MatchNode {
    /// 匹配单个特定类型的节点
    Single(PlanNodeKind),
    /// 匹配多个可能类型中的任意一个
    Multi(Vec<PlanNodeKind>),
    /// 匹配任何节点
    Any,
}

impl MatchNode {
    /// 检查节点类型是否匹配
    pub fn matches(&self, kind: PlanNodeKind) -> bool {
        match self {
            MatchNode::Single(expected) => *expected == kind,
            MatchNode::Multi(kinds) => kinds.contains(&kind),
            MatchNode::Any => true,
        }
    }
}
