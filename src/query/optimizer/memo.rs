//! 备忘录定义
//!
//! 探索规则把等价的备选计划登记到备忘录中，由后续的代价模型挑选。
//! 分组以被匹配节点的 id 为标识。代价计算与挑选不在此处实现。

use std::collections::{BTreeMap, HashSet};

use crate::query::planner::plan::{PlanNodeId, PlanRef};
use crate::query::planner::rewrite::result::{RewriteError, RewriteResult};

/// 备忘录接口
pub trait Memo: Send {
    /// 登记一个备选计划
    ///
    /// 仅当该备选在分组中结构上是新的时返回 `true`
    fn register_alternative(
        &mut self,
        group_id: PlanNodeId,
        candidate: PlanRef,
    ) -> RewriteResult<bool>;
}

/// 分组：同一逻辑子计划的全部已知等价形式
#[derive(Debug, Default)]
pub struct OptGroup {
    pub id: PlanNodeId,
    alternatives: Vec<PlanRef>,
    fingerprints: HashSet<String>,
}

impl OptGroup {
    pub fn new(id: PlanNodeId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// 按登记顺序排列的备选计划
    pub fn alternatives(&self) -> &[PlanRef] {
        &self.alternatives
    }

    fn add_alternative(&mut self, candidate: PlanRef) -> bool {
        // 以不含 id 的计划文本作为结构指纹
        if !self.fingerprints.insert(candidate.explain()) {
            return false;
        }
        self.alternatives.push(candidate);
        true
    }
}

/// 基于分组表的备忘录实现
#[derive(Debug, Default)]
pub struct GroupMemo {
    groups: BTreeMap<PlanNodeId, OptGroup>,
    max_alternatives_per_group: Option<usize>,
}

impl GroupMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// 限制单个分组的备选数量，超出时登记失败
    pub fn with_max_alternatives_per_group(mut self, limit: usize) -> Self {
        self.max_alternatives_per_group = Some(limit);
        self
    }

    pub fn group(&self, group_id: PlanNodeId) -> Option<&OptGroup> {
        self.groups.get(&group_id)
    }

    /// 指定分组的备选计划，分组不存在时为空
    pub fn alternatives(&self, group_id: PlanNodeId) -> &[PlanRef] {
        self.groups
            .get(&group_id)
            .map(|group| group.alternatives())
            .unwrap_or(&[])
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn total_alternatives(&self) -> usize {
        self.groups.values().map(|g| g.alternatives.len()).sum()
    }
}

impl Memo for GroupMemo {
    fn register_alternative(
        &mut self,
        group_id: PlanNodeId,
        candidate: PlanRef,
    ) -> RewriteResult<bool> {
        let limit = self.max_alternatives_per_group;
        let group = self
            .groups
            .entry(group_id)
            .or_insert_with(|| OptGroup::new(group_id));

        if let Some(limit) = limit {
            if group.alternatives.len() >= limit
                && !group.fingerprints.contains(&candidate.explain())
            {
                return Err(RewriteError::memo(format!(
                    "分组 {} 的备选计划数量已达上限 {}",
                    group_id, limit
                )));
            }
        }

        let added = group.add_alternative(candidate);
        if added {
            log::debug!("分组 {} 新增备选计划, 当前共 {} 个", group_id, group.alternatives.len());
        }
        Ok(added)
    }
}
