//! 连接节点实现
//!
//! JoinNode 按连接类型与可选的连接条件组合左右两个输入

use super::plan_node_enum::PlanRef;
use crate::core::Expression;
use crate::define_plan_node;
use crate::query::planner::plan::core::node_id_generator::PlanNodeId;
use std::fmt;

/// 连接类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JoinType::Inner => "INNER",
            JoinType::Left => "LEFT",
            JoinType::Right => "RIGHT",
            JoinType::Full => "FULL",
            JoinType::Cross => "CROSS",
        };
        write!(f, "{}", name)
    }
}

define_plan_node! {
    pub struct JoinNode {
        join_type: JoinType,
        condition: Option<Expression>,
    }
    enum: Join
    input: BinaryInputNode
}

impl JoinNode {
    /// 创建新的连接节点
    pub fn new(
        id: PlanNodeId,
        left: PlanRef,
        right: PlanRef,
        join_type: JoinType,
        condition: Option<Expression>,
    ) -> Self {
        Self {
            id,
            left,
            right,
            join_type,
            condition,
        }
    }

    pub fn join_type(&self) -> JoinType {
        self.join_type
    }

    /// 获取连接条件
    pub fn condition(&self) -> Option<&Expression> {
        self.condition.as_ref()
    }

    /// 以新的连接条件重建节点，保留 id 与输入
    pub fn with_condition(&self, condition: Option<Expression>) -> Self {
        Self {
            condition,
            ..self.clone()
        }
    }
}
