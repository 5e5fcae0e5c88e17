//! 聚合节点实现
//!
//! AggregateNode 按分组列聚合输入，输出分组列及聚合结果列

use super::plan_node_enum::PlanRef;
use super::project_node::ProjectItem;
use crate::define_plan_node;
use crate::query::planner::plan::core::node_id_generator::PlanNodeId;

define_plan_node! {
    pub struct AggregateNode {
        group_keys: Vec<String>,
        aggregates: Vec<ProjectItem>,
    }
    enum: Aggregate
    input: SingleInputNode
}

impl AggregateNode {
    /// 创建新的聚合节点
    pub fn new(
        id: PlanNodeId,
        input: PlanRef,
        group_keys: Vec<String>,
        aggregates: Vec<ProjectItem>,
    ) -> Self {
        Self {
            id,
            input,
            group_keys,
            aggregates,
        }
    }

    /// 获取分组键
    pub fn group_keys(&self) -> &[String] {
        &self.group_keys
    }

    /// 获取聚合项
    pub fn aggregates(&self) -> &[ProjectItem] {
        &self.aggregates
    }

    /// 以新的聚合项重建节点，保留 id、输入与分组键
    pub fn with_aggregates(&self, aggregates: Vec<ProjectItem>) -> Self {
        Self {
            aggregates,
            ..self.clone()
        }
    }
}
