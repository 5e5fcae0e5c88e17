//! 重写规则 trait 定义
//!
//! 规则由模式和转换组成。重写规则用唯一的替换节点取代匹配的子树，
//! 探索规则把转换结果作为等价备选登记到备忘录。
//! 规则工厂负责构建一组相关规则，构建过程无副作用，结果可跨线程共享。

use std::fmt;
use std::sync::Arc;

use crate::query::planner::plan::PlanRef;
use crate::query::planner::rewrite::context::OptimizationContext;
use crate::query::planner::rewrite::pattern::Pattern;
use crate::query::planner::rewrite::result::{MatchedResult, RewriteResult, TransformResult};
use crate::query::planner::rewrite::rule_type::RuleType;

/// 规则种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// 直接替换匹配的子树
    Rewrite,
    /// 向备忘录登记备选计划，不修改工作计划
    Exploration,
}

/// 重写规则 trait
///
/// 所有规则必须实现此 trait。
/// 规则通过模式匹配识别计划树的特定结构，然后应用转换。
///
/// # 示例
/// ```ignore
/// #[derive(Debug)]
/// struct MyRule;
///
/// impl RewriteRule for MyRule {
///     fn rule_type(&self) -> RuleType {
///         RuleType::UserDefined("MyRule")
///     }
///
///     fn pattern(&self) -> Pattern {
///         Pattern::with_filter_matcher()
///     }
///
///     fn transform(
///         &self,
///         matched: &MatchedResult,
///         ctx: &mut OptimizationContext<'_>,
///     ) -> RewriteResult<Option<TransformResult>> {
///         Ok(None)
///     }
/// }
/// ```
pub trait RewriteRule: fmt::Debug + Send + Sync {
    /// 规则类型
    fn rule_type(&self) -> RuleType;

    /// 规则名称
    fn name(&self) -> &'static str {
        self.rule_type().name()
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Rewrite
    }

    /// 返回规则的模式
    fn pattern(&self) -> Pattern;

    /// 匹配模式
    ///
    /// 只检查节点类型标签与模式列出的子节点，不匹配时返回 None
    fn try_match(&self, node: &PlanRef) -> Option<MatchedResult> {
        self.pattern().match_plan(node)
    }

    /// 应用转换
    ///
    /// # 返回
    /// - `Ok(Some(result))`: 转换成功
    /// - `Ok(None)`: 没有有益的改写，视为不匹配
    /// - `Err(e)`: 转换违反结构前提，中止本次优化
    fn transform(
        &self,
        matched: &MatchedResult,
        ctx: &mut OptimizationContext<'_>,
    ) -> RewriteResult<Option<TransformResult>>;
}

/// 共享的规则实例
pub type Rule = Arc<dyn RewriteRule>;

/// 规则工厂
pub trait RuleFactory: Send + Sync {
    /// 工厂名称，用于装配错误与日志
    fn name(&self) -> &'static str;

    /// 构建规则，按顺序返回
    fn build_rules(&self) -> Vec<Rule>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Expression;
    use crate::query::planner::plan::{PlanNodeFactory, PlanNodeKind};

    #[derive(Debug)]
    struct NoopRule;

    impl RewriteRule for NoopRule {
        fn rule_type(&self) -> RuleType {
            RuleType::UserDefined("Noop")
        }

        fn pattern(&self) -> Pattern {
            Pattern::new(PlanNodeKind::Scan)
        }

        fn transform(
            &self,
            _matched: &MatchedResult,
            _ctx: &mut OptimizationContext<'_>,
        ) -> RewriteResult<Option<TransformResult>> {
            Ok(None)
        }
    }

    #[test]
    fn test_rule_defaults() {
        let rule: Rule = Arc::new(NoopRule);
        assert_eq!(rule.name(), "Noop");
        assert_eq!(rule.kind(), RuleKind::Rewrite);
    }

    #[test]
    fn test_rule_try_match() {
        let mut factory = PlanNodeFactory::new();
        let scan = factory.scan("t", &["a"]);
        let filter = factory.filter(scan.clone(), Expression::bool(true));

        let rule = NoopRule;
        assert!(rule.try_match(&scan).is_some());
        assert!(rule.try_match(&filter).is_none());
    }
}
