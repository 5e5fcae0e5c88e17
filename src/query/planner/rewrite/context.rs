//! 重写上下文定义
//!
//! `OptimizationContext` 管理单个查询一次优化运行的全部状态：
//! 当前计划根、作业上下文、备忘录与目录句柄、运行配置、节点 id 分配与统计。
//! 上下文只被一个线程独占写入，不同查询各自持有自己的上下文。

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::config::OptimizerConfig;
use crate::query::optimizer::catalog::Catalog;
use crate::query::optimizer::memo::Memo;
use crate::query::planner::plan::{NodeIdGenerator, PlanNodeId, PlanRef};
use crate::query::planner::rewrite::result::RewriteResult;
use crate::query::planner::rewrite::rule_type::RuleType;

/// 作业上下文
///
/// 记录最近一轮遍历是否改写了计划
#[derive(Debug, Default, Clone)]
pub struct JobContext {
    rewritten: bool,
}

impl JobContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_rewritten(&self) -> bool {
        self.rewritten
    }

    pub fn set_rewritten(&mut self, rewritten: bool) {
        self.rewritten = rewritten;
    }

    /// 每轮遍历开始前重置
    pub fn reset(&mut self) {
        self.rewritten = false;
    }
}

/// 优化统计
///
/// 规则生效次数按规则名称记录，便于导出
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationStats {
    rule_applications: BTreeMap<String, usize>,
    job_passes: usize,
    alternatives_registered: usize,
}

impl OptimizationStats {
    /// 记录一次规则生效
    pub fn record_rule_application(&mut self, rule_type: RuleType) {
        *self
            .rule_applications
            .entry(rule_type.name().to_string())
            .or_insert(0) += 1;
    }

    pub fn record_job_pass(&mut self) {
        self.job_passes += 1;
    }

    pub fn record_alternative(&mut self) {
        self.alternatives_registered += 1;
    }

    /// 指定规则的生效次数
    pub fn rule_applications(&self, rule_type: RuleType) -> usize {
        self.rule_applications
            .get(rule_type.name())
            .copied()
            .unwrap_or(0)
    }

    pub fn total_rule_applications(&self) -> usize {
        self.rule_applications.values().sum()
    }

    pub fn job_passes(&self) -> usize {
        self.job_passes
    }

    pub fn alternatives_registered(&self) -> usize {
        self.alternatives_registered
    }

    /// 导出为 JSON 字符串
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// 从 JSON 字符串导入
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// 导出为格式化字符串，规则按名称排序
    pub fn to_formatted_string(&self) -> String {
        let rules: Vec<String> = self
            .rule_applications
            .iter()
            .map(|(name, count)| format!("{}={}", name, count))
            .collect();
        format!(
            "rule_applications: {}, job_passes: {}, alternatives: {}, rules: [{}]",
            self.total_rule_applications(),
            self.job_passes,
            self.alternatives_registered,
            rules.join(", ")
        )
    }
}

/// 优化上下文
pub struct OptimizationContext<'a> {
    plan: PlanRef,
    job_context: JobContext,
    memo: &'a mut dyn Memo,
    catalog: &'a dyn Catalog,
    config: OptimizerConfig,
    disabled_rules: HashSet<String>,
    ids: NodeIdGenerator,
    stats: OptimizationStats,
}

impl<'a> OptimizationContext<'a> {
    /// 创建新的优化上下文
    ///
    /// 新节点的 id 从初始计划的最大 id 之后开始分配
    pub fn new(
        plan: PlanRef,
        memo: &'a mut dyn Memo,
        catalog: &'a dyn Catalog,
        config: OptimizerConfig,
    ) -> Self {
        let ids = NodeIdGenerator::starting_after(plan.max_id());
        let disabled_rules = config.disabled_rules.iter().cloned().collect();
        Self {
            plan,
            job_context: JobContext::new(),
            memo,
            catalog,
            config,
            disabled_rules,
            ids,
            stats: OptimizationStats::default(),
        }
    }

    /// 当前计划根
    pub fn plan(&self) -> &PlanRef {
        &self.plan
    }

    pub fn set_plan(&mut self, plan: PlanRef) {
        self.plan = plan;
    }

    pub fn job_context(&self) -> &JobContext {
        &self.job_context
    }

    pub fn job_context_mut(&mut self) -> &mut JobContext {
        &mut self.job_context
    }

    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog
    }

    /// 向备忘录登记备选计划，返回是否为新的备选
    pub fn register_alternative(
        &mut self,
        group_id: PlanNodeId,
        candidate: PlanRef,
    ) -> RewriteResult<bool> {
        let added = self.memo.register_alternative(group_id, candidate)?;
        if added {
            self.stats.record_alternative();
        }
        Ok(added)
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// 规则是否被配置禁用
    pub fn is_rule_disabled(&self, rule_type: RuleType) -> bool {
        self.disabled_rules.contains(rule_type.name())
    }

    /// 为规则新建的节点分配 id
    pub fn next_node_id(&mut self) -> PlanNodeId {
        self.ids.next_id()
    }

    pub fn stats(&self) -> &OptimizationStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut OptimizationStats {
        &mut self.stats
    }

    /// 结束本次优化，取出计划与统计
    pub fn finish(self) -> (PlanRef, OptimizationStats) {
        (self.plan, self.stats)
    }
}
