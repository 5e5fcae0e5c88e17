//! 规则类型
//!
//! 每条规则携带一个 RuleType，用于日志、规则集组合、禁用配置与错误诊断

use std::fmt;

/// 规则类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleType {
    // 常量折叠
    FoldConstantFilter,
    FoldConstantProject,
    FoldConstantJoin,

    // 消除规则
    EliminateFilter,
    EliminateNotNull,
    EliminateLimit,

    // 合并规则
    MergeFilters,
    MergeProjects,

    // 谓词下推，重写与探索两个版本共用
    PushdownFilterThroughProject,

    // 自定义重写
    ColumnPruning,

    /// 调用方自行定义的规则
    UserDefined(&'static str),
}

impl RuleType {
    /// 内置规则类型
    pub const BUILTIN: [RuleType; 10] = [
        RuleType::FoldConstantFilter,
        RuleType::FoldConstantProject,
        RuleType::FoldConstantJoin,
        RuleType::EliminateFilter,
        RuleType::EliminateNotNull,
        RuleType::EliminateLimit,
        RuleType::MergeFilters,
        RuleType::MergeProjects,
        RuleType::PushdownFilterThroughProject,
        RuleType::ColumnPruning,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RuleType::FoldConstantFilter => "FoldConstantFilter",
            RuleType::FoldConstantProject => "FoldConstantProject",
            RuleType::FoldConstantJoin => "FoldConstantJoin",
            RuleType::EliminateFilter => "EliminateFilter",
            RuleType::EliminateNotNull => "EliminateNotNull",
            RuleType::EliminateLimit => "EliminateLimit",
            RuleType::MergeFilters => "MergeFilters",
            RuleType::MergeProjects => "MergeProjects",
            RuleType::PushdownFilterThroughProject => "PushdownFilterThroughProject",
            RuleType::ColumnPruning => "ColumnPruning",
            RuleType::UserDefined(name) => *name,
        }
    }

    /// 按名称查找内置规则类型
    pub fn from_name(name: &str) -> Option<RuleType> {
        Self::BUILTIN.iter().copied().find(|t| t.name() == name)
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_type_names() {
        assert_eq!(RuleType::MergeFilters.to_string(), "MergeFilters");
        assert_eq!(RuleType::UserDefined("Toggle").name(), "Toggle");
        assert_eq!(
            RuleType::from_name("EliminateLimit"),
            Some(RuleType::EliminateLimit)
        );
        assert_eq!(RuleType::from_name("Toggle"), None);
    }

    #[test]
    fn test_builtin_names_are_unique() {
        let mut names: Vec<&str> = RuleType::BUILTIN.iter().map(|t| t.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), RuleType::BUILTIN.len());
    }
}
