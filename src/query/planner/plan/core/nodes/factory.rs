//! 节点工厂实现
//!
//! 提供统一的节点创建接口，为每个新节点分配唯一 id

use super::plan_node_enum::{
    AggregateNode, EmptyNode, FilterNode, JoinNode, JoinType, LimitNode, PlanRef, ProjectItem,
    ProjectNode, ScanNode, SortItem, SortNode,
};
use super::plan_node_traits::PlanNode;
use crate::core::Expression;
use crate::query::planner::plan::core::node_id_generator::{NodeIdGenerator, PlanNodeId};

/// 节点工厂
///
/// 持有自己的 id 生成器，用于构建一棵新的计划树
#[derive(Debug, Default)]
pub struct PlanNodeFactory {
    ids: NodeIdGenerator,
}

impl PlanNodeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 分配下一个节点 id
    pub fn next_id(&mut self) -> PlanNodeId {
        self.ids.next_id()
    }

    /// 创建扫描节点
    pub fn scan(&mut self, table: &str, columns: &[&str]) -> PlanRef {
        let columns = columns.iter().map(|c| c.to_string()).collect();
        ScanNode::new(self.next_id(), table, columns)
            .into_enum()
            .into_ref()
    }

    /// 创建过滤节点
    pub fn filter(&mut self, input: PlanRef, condition: Expression) -> PlanRef {
        FilterNode::new(self.next_id(), input, condition)
            .into_enum()
            .into_ref()
    }

    /// 创建投影节点
    pub fn project(&mut self, input: PlanRef, items: Vec<ProjectItem>) -> PlanRef {
        ProjectNode::new(self.next_id(), input, items)
            .into_enum()
            .into_ref()
    }

    /// 创建连接节点
    pub fn join(
        &mut self,
        left: PlanRef,
        right: PlanRef,
        join_type: JoinType,
        condition: Option<Expression>,
    ) -> PlanRef {
        JoinNode::new(self.next_id(), left, right, join_type, condition)
            .into_enum()
            .into_ref()
    }

    /// 创建聚合节点
    pub fn aggregate(
        &mut self,
        input: PlanRef,
        group_keys: &[&str],
        aggregates: Vec<ProjectItem>,
    ) -> PlanRef {
        let group_keys = group_keys.iter().map(|k| k.to_string()).collect();
        AggregateNode::new(self.next_id(), input, group_keys, aggregates)
            .into_enum()
            .into_ref()
    }

    /// 创建排序节点
    pub fn sort(&mut self, input: PlanRef, sort_items: Vec<SortItem>) -> PlanRef {
        SortNode::new(self.next_id(), input, sort_items)
            .into_enum()
            .into_ref()
    }

    /// 创建限制节点
    pub fn limit(&mut self, input: PlanRef, offset: u64, count: u64) -> PlanRef {
        LimitNode::new(self.next_id(), input, offset, count)
            .into_enum()
            .into_ref()
    }

    /// 创建空结果节点
    pub fn empty(&mut self, columns: &[&str]) -> PlanRef {
        let columns = columns.iter().map(|c| c.to_string()).collect();
        EmptyNode::new(self.next_id(), columns).into_enum().into_ref()
    }
}
