//! 排序节点实现
//!
//! SortNode 用于对输入数据进行排序操作，LimitNode 截取输入的一段行

use super::plan_node_enum::PlanRef;
use crate::define_plan_node;
use crate::query::planner::plan::core::node_id_generator::PlanNodeId;
use std::fmt;

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderDirection {
    Asc,
    Desc,
}

/// 排序项定义
/// 包含列名和排序方向
#[derive(Debug, Clone, PartialEq)]
pub struct SortItem {
    /// 排序列名
    pub column: String,
    /// 排序方向
    pub direction: OrderDirection,
}

impl SortItem {
    /// 创建新的排序项
    pub fn new(column: impl Into<String>, direction: OrderDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    /// 创建升序排序项
    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(column, OrderDirection::Asc)
    }

    /// 创建降序排序项
    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(column, OrderDirection::Desc)
    }
}

impl fmt::Display for SortItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            OrderDirection::Asc => write!(f, "{} ASC", self.column),
            OrderDirection::Desc => write!(f, "{} DESC", self.column),
        }
    }
}

define_plan_node! {
    pub struct SortNode {
        sort_items: Vec<SortItem>,
    }
    enum: Sort
    input: SingleInputNode
}

impl SortNode {
    /// 创建新的排序节点
    pub fn new(id: PlanNodeId, input: PlanRef, sort_items: Vec<SortItem>) -> Self {
        Self {
            id,
            input,
            sort_items,
        }
    }

    /// 获取排序字段
    pub fn sort_items(&self) -> &[SortItem] {
        &self.sort_items
    }
}

define_plan_node! {
    pub struct LimitNode {
        offset: u64,
        count: u64,
    }
    enum: Limit
    input: SingleInputNode
}

impl LimitNode {
    /// 创建新的限制节点
    pub fn new(id: PlanNodeId, input: PlanRef, offset: u64, count: u64) -> Self {
        Self {
            id,
            input,
            offset,
            count,
        }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}
