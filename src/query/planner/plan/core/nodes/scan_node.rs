//! 扫描节点实现
//!
//! ScanNode 读取一张表的指定列，是计划树的叶子节点

use crate::define_plan_node;
use crate::query::planner::plan::core::node_id_generator::PlanNodeId;

define_plan_node! {
    pub struct ScanNode {
        table: String,
        columns: Vec<String>,
    }
    enum: Scan
    input: ZeroInputNode
}

impl ScanNode {
    /// 创建新的扫描节点
    pub fn new(id: PlanNodeId, table: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            id,
            table: table.into(),
            columns,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// 获取扫描列
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::planner::plan::core::nodes::plan_node_traits::PlanNode;

    #[test]
    fn test_scan_node_creation() {
        let scan = ScanNode::new(7, "t", vec!["a".to_string(), "b".to_string()]);
        assert_eq!(scan.id(), 7);
        assert_eq!(scan.type_name(), "ScanNode");
        assert_eq!(PlanNode::name(&scan), "Scan");
        assert_eq!(scan.table(), "t");

        let pruned = scan.with_columns(vec!["a".to_string()]);
        assert_eq!(pruned.id(), 7);
        assert_eq!(pruned.columns(), &["a".to_string()]);
    }
}
