//! 节点ID生成器
//!
//! 为单次优化运行分配计划节点ID。每次运行持有自己的生成器，
//! 起始值取初始计划中的最大 id 加一，互不干扰。

/// 计划节点ID，同时作为备忘录中的分组标识
pub type PlanNodeId = i64;

/// 节点ID生成器
#[derive(Debug, Clone)]
pub struct NodeIdGenerator {
    next: PlanNodeId,
}

impl NodeIdGenerator {
    /// 从 1 开始分配，0 保留为无效ID
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// 从给定 id 之后开始分配
    pub fn starting_after(max_id: PlanNodeId) -> Self {
        Self {
            next: max_id.max(0) + 1,
        }
    }

    /// 获取下一个唯一ID
    pub fn next_id(&mut self) -> PlanNodeId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// 查看下一个将要分配的ID
    pub fn peek(&self) -> PlanNodeId {
        self.next
    }
}

impl Default for NodeIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
