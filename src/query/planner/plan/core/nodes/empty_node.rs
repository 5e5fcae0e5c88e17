//! 空结果节点实现
//!
//! EmptyNode 不产生任何行，只保留输出列，常由消除规则生成

use crate::define_plan_node;
use crate::query::planner::plan::core::node_id_generator::PlanNodeId;

define_plan_node! {
    pub struct EmptyNode {
        columns: Vec<String>,
    }
    enum: Empty
    input: ZeroInputNode
}

impl EmptyNode {
    pub fn new(id: PlanNodeId, columns: Vec<String>) -> Self {
        Self { id, columns }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// 以新的列集合重建节点，保留 id
    pub fn with_columns(&self, columns: Vec<String>) -> Self {
        Self {
            columns,
            ..self.clone()
        }
    }
}
