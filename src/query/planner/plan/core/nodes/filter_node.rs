//! 过滤节点实现
//!
//! FilterNode 用于根据指定的条件过滤输入数据流

use super::plan_node_enum::PlanRef;
use crate::core::Expression;
use crate::define_plan_node;
use crate::query::planner::plan::core::node_id_generator::PlanNodeId;

define_plan_node! {
    pub struct FilterNode {
        condition: Expression,
    }
    enum: Filter
    input: SingleInputNode
}

impl FilterNode {
    /// 创建新的过滤节点
    pub fn new(id: PlanNodeId, input: PlanRef, condition: Expression) -> Self {
        Self {
            id,
            input,
            condition,
        }
    }

    /// 获取过滤条件
    pub fn condition(&self) -> &Expression {
        &self.condition
    }

    /// 以新的过滤条件重建节点，保留 id 与输入
    pub fn with_condition(&self, condition: Expression) -> Self {
        Self {
            condition,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::planner::plan::core::nodes::plan_node_traits::{PlanNode, SingleInputNode};
    use crate::query::planner::plan::core::nodes::scan_node::ScanNode;
    use std::sync::Arc;

    #[test]
    fn test_filter_node_creation() {
        let scan: PlanRef = Arc::new(ScanNode::new(1, "t", vec!["a".to_string()]).into_enum());
        let condition = Expression::gt(Expression::column("a"), Expression::int(1));
        let filter = FilterNode::new(2, scan.clone(), condition.clone());

        assert_eq!(filter.type_name(), "FilterNode");
        assert_eq!(filter.condition(), &condition);
        assert!(Arc::ptr_eq(filter.input(), &scan));
    }

    #[test]
    fn test_filter_with_input_keeps_id() {
        let scan: PlanRef = Arc::new(ScanNode::new(1, "t", vec!["a".to_string()]).into_enum());
        let other: PlanRef = Arc::new(ScanNode::new(3, "u", vec!["a".to_string()]).into_enum());
        let filter = FilterNode::new(2, scan, Expression::bool(true));

        let rebuilt = filter.with_input(other.clone());
        assert_eq!(rebuilt.id(), 2);
        assert!(Arc::ptr_eq(rebuilt.input(), &other));
    }
}
