//! 重写结果定义
//!
//! 定义重写错误、模式匹配结果与规则转换结果

use crate::query::planner::plan::{PlanNodeEnum, PlanRef};
use crate::query::planner::rewrite::rule_type::RuleType;

/// 重写错误类型
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    #[error(
        "重写作业未收敛: {job} 在 {iterations} 轮后仍在改写计划, 最近的计划形状:\n{}",
        .recent_shapes.join("\n----\n")
    )]
    NonTermination {
        job: String,
        iterations: usize,
        recent_shapes: Vec<String>,
    },

    #[error("重写作业的规则集为空")]
    EmptyRuleSet,

    #[error("规则工厂 {factory} 未生成任何规则")]
    EmptyRuleFactory { factory: String },

    #[error("规则 {rule_type} 应用于节点 {node} 失败: {message}")]
    RuleApplication {
        rule_type: RuleType,
        node: String,
        message: String,
    },

    #[error("自定义重写 {rule_type} 失败: {source}")]
    CustomRewriter {
        rule_type: RuleType,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("无效的计划结构: {0}")]
    InvalidPlanStructure(String),

    #[error("备忘录错误: {0}")]
    Memo(String),
}

impl RewriteError {
    pub fn non_termination(
        job: impl Into<String>,
        iterations: usize,
        recent_shapes: Vec<String>,
    ) -> Self {
        Self::NonTermination {
            job: job.into(),
            iterations,
            recent_shapes,
        }
    }

    pub fn empty_rule_factory(factory: impl Into<String>) -> Self {
        Self::EmptyRuleFactory {
            factory: factory.into(),
        }
    }

    /// 规则应用失败，节点以 `名称[id]` 标识
    pub fn rule_application(
        rule_type: RuleType,
        node: &PlanNodeEnum,
        message: impl Into<String>,
    ) -> Self {
        Self::RuleApplication {
            rule_type,
            node: format!("{}[{}]", node.name(), node.id()),
            message: message.into(),
        }
    }

    pub fn custom_rewriter(
        rule_type: RuleType,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::CustomRewriter {
            rule_type,
            source: source.into(),
        }
    }

    pub fn invalid_plan_structure(msg: impl Into<String>) -> Self {
        Self::InvalidPlanStructure(msg.into())
    }

    pub fn memo(msg: impl Into<String>) -> Self {
        Self::Memo(msg.into())
    }

    /// 错误关联的规则类型
    pub fn rule_type(&self) -> Option<RuleType> {
        match self {
            Self::RuleApplication { rule_type, .. } | Self::CustomRewriter { rule_type, .. } => {
                Some(*rule_type)
            }
            _ => None,
        }
    }
}

/// 重写结果类型
pub type RewriteResult<T> = std::result::Result<T, RewriteError>;

/// 转换结果
///
/// 重写规则返回恰好一个替换节点，探索规则可以返回多个备选
#[derive(Debug, Default, Clone)]
pub struct TransformResult {
    /// 新的计划节点列表
    pub new_nodes: Vec<PlanRef>,
}

impl TransformResult {
    /// 创建新的转换结果
    pub fn new() -> Self {
        Self::default()
    }

    /// 以单个节点替换匹配的子树
    pub fn replace(node: PlanRef) -> Self {
        Self {
            new_nodes: vec![node],
        }
    }

    /// 添加新的计划节点
    pub fn add_new_node(&mut self, node: PlanRef) {
        self.new_nodes.push(node);
    }
}

/// 匹配结果
///
/// 按模式的先序顺序记录匹配到的节点，第一个为根节点
#[derive(Debug, Clone)]
pub struct MatchedResult {
    nodes: Vec<PlanRef>,
}

impl MatchedResult {
    /// 以根节点创建匹配结果
    pub fn new(root: PlanRef) -> Self {
        Self { nodes: vec![root] }
    }

    /// 添加匹配的节点
    pub fn add_node(&mut self, node: PlanRef) {
        self.nodes.push(node);
    }

    /// 匹配的根节点
    pub fn root(&self) -> &PlanRef {
        // new() 保证至少有根节点
        &self.nodes[0]
    }

    /// 按先序下标获取匹配节点，0 为根节点
    pub fn node(&self, index: usize) -> Option<&PlanRef> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[PlanRef] {
        &self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::planner::plan::PlanNodeFactory;
    use std::sync::Arc;

    #[test]
    fn test_transform_result() {
        let mut result = TransformResult::new();
        assert!(result.new_nodes.is_empty());

        let mut factory = PlanNodeFactory::new();
        let scan = factory.scan("t", &["a"]);
        result.add_new_node(scan.clone());
        assert_eq!(result.new_nodes.len(), 1);

        let replaced = TransformResult::replace(scan.clone());
        assert!(Arc::ptr_eq(&replaced.new_nodes[0], &scan));
    }

    #[test]
    fn test_matched_result() {
        let mut factory = PlanNodeFactory::new();
        let scan = factory.scan("t", &["a"]);
        let filter = factory.filter(scan.clone(), crate::core::Expression::bool(true));

        let mut result = MatchedResult::new(filter.clone());
        result.add_node(scan.clone());

        assert_eq!(result.root().id(), filter.id());
        assert_eq!(result.node(1).map(|n| n.id()), Some(scan.id()));
        assert!(result.node(2).is_none());
    }

    #[test]
    fn test_rewrite_error_messages() {
        let mut factory = PlanNodeFactory::new();
        let scan = factory.scan("t", &["a"]);

        let err = RewriteError::rule_application(RuleType::MergeFilters, &scan, "缺少子节点");
        assert!(err.to_string().contains("MergeFilters"));
        assert!(err.to_string().contains("Scan[1]"));
        assert_eq!(err.rule_type(), Some(RuleType::MergeFilters));

        let err = RewriteError::non_termination("top-down", 3, vec!["A".into(), "B".into()]);
        assert!(err.to_string().contains("A\n----\nB"));
        assert_eq!(err.rule_type(), None);

        let err = RewriteError::custom_rewriter(RuleType::ColumnPruning, "磁盘已满");
        assert!(err.to_string().contains("磁盘已满"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
