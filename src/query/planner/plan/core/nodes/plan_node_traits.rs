//! PlanNode 统一特征定义
//!
//! 定义所有计划节点需要实现的基础特征

use super::plan_node_enum::{PlanNodeEnum, PlanRef};
use crate::query::planner::plan::core::node_id_generator::PlanNodeId;

/// PlanNode 基础特征
pub trait PlanNode {
    /// 获取节点的唯一ID
    fn id(&self) -> PlanNodeId;

    /// 获取节点类型的名称
    fn name(&self) -> &'static str;

    /// 转换为 PlanNodeEnum
    fn into_enum(self) -> PlanNodeEnum;
}

/// 零输入节点特征
pub trait ZeroInputNode: PlanNode {}

/// 单输入节点特征
///
/// 适用于只有一个输入的节点
pub trait SingleInputNode: PlanNode {
    /// 获取输入节点
    fn input(&self) -> &PlanRef;

    /// 以新的输入重建节点，保留节点 id 与其余属性
    fn with_input(&self, input: PlanRef) -> Self
    where
        Self: Sized;
}

/// 双输入节点特征
pub trait BinaryInputNode: PlanNode {
    fn left(&self) -> &PlanRef;

    fn right(&self) -> &PlanRef;

    /// 以新的左右输入重建节点，保留节点 id 与其余属性
    fn with_inputs(&self, left: PlanRef, right: PlanRef) -> Self
    where
        Self: Sized;
}
