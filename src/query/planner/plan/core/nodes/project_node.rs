//! 投影节点实现
//!
//! ProjectNode 用于根据指定的列表达式投影输入数据流

use super::plan_node_enum::PlanRef;
use crate::core::Expression;
use crate::define_plan_node;
use crate::query::planner::plan::core::node_id_generator::PlanNodeId;
use std::fmt;

/// 投影项：表达式及其输出列名
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectItem {
    pub expr: Expression,
    pub alias: String,
}

impl ProjectItem {
    pub fn new(expr: Expression, alias: impl Into<String>) -> Self {
        Self {
            expr,
            alias: alias.into(),
        }
    }

    /// 原样透传一列
    pub fn column(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            expr: Expression::Column(name.clone()),
            alias: name,
        }
    }

    /// 是否为同名列的透传
    pub fn is_passthrough(&self) -> bool {
        self.expr.as_column() == Some(self.alias.as_str())
    }
}

impl fmt::Display for ProjectItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_passthrough() {
            write!(f, "{}", self.alias)
        } else {
            write!(f, "{} AS {}", self.expr, self.alias)
        }
    }
}

define_plan_node! {
    pub struct ProjectNode {
        items: Vec<ProjectItem>,
    }
    enum: Project
    input: SingleInputNode
}

impl ProjectNode {
    /// 创建新的投影节点
    pub fn new(id: PlanNodeId, input: PlanRef, items: Vec<ProjectItem>) -> Self {
        Self { id, input, items }
    }

    /// 获取投影项
    pub fn items(&self) -> &[ProjectItem] {
        &self.items
    }

    /// 输出列名
    pub fn aliases(&self) -> Vec<String> {
        self.items.iter().map(|item| item.alias.clone()).collect()
    }

    /// 以新的投影项重建节点，保留 id 与输入
    pub fn with_items(&self, items: Vec<ProjectItem>) -> Self {
        Self {
            items,
            ..self.clone()
        }
    }
}
