//! 重写规则宏定义
//!
//! 提供声明式宏用于简化规则工厂与作业列表的定义，减少样板代码。

// ==================== 规则工厂宏 ====================

/// 定义规则工厂
///
/// 生成零大小的工厂结构体，`build_rules` 按列出的顺序返回规则实例
///
/// # 示例
/// ```ignore
/// define_rule_factory! {
///     /// 常量折叠规则
///     name: FoldConstant,
///     rules: [FoldConstantFilter, FoldConstantProject]
/// }
/// ```
#[macro_export]
macro_rules! define_rule_factory {
    (
        $(#[$meta:meta])*
        name: $name:ident,
        rules: [$($rule:expr),* $(,)?]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl $crate::query::planner::rewrite::rule::RuleFactory for $name {
            fn name(&self) -> &'static str {
                stringify!($name)
            }

            fn build_rules(&self) -> Vec<$crate::query::planner::rewrite::rule::Rule> {
                vec![
                    $(
                        ::std::sync::Arc::new($rule) as $crate::query::planner::rewrite::rule::Rule,
                    )*
                ]
            }
        }
    };
}

// ==================== 作业装配宏 ====================

/// 按顺序展平作业与主题
///
/// # 示例
/// ```ignore
/// let jobs = jobs![
///     topic!("filter elimination", bottom_up(&[&EliminateFilter])?),
///     custom(RuleType::ColumnPruning, || Box::new(ColumnPruning::new())),
/// ];
/// ```
#[macro_export]
macro_rules! jobs {
    ($($entry:expr),* $(,)?) => {
        $crate::query::planner::rewrite::jobs::jobs(vec![
            $($crate::query::planner::rewrite::jobs::JobEntry::from($entry)),*
        ])
    };
}

/// 创建主题
#[macro_export]
macro_rules! topic {
    ($name:expr $(, $entry:expr)* $(,)?) => {
        $crate::query::planner::rewrite::jobs::topic(
            $name,
            vec![$($crate::query::planner::rewrite::jobs::JobEntry::from($entry)),*],
        )
    };
}

pub use crate::define_rule_factory;
pub use crate::jobs;
pub use crate::topic;
