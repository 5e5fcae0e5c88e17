//! PlanNode 枚举定义
//!
//! 计划树由不可变节点组成，子节点通过 `PlanRef` 共享。
//! 重写时只重建从变化点到根的路径，未变化的子树按引用复用。

use std::fmt;
use std::sync::Arc;

use super::plan_node_traits::{BinaryInputNode, PlanNode, SingleInputNode};
use crate::query::planner::plan::core::explain;
use crate::query::planner::plan::core::node_id_generator::PlanNodeId;
use crate::query::planner::rewrite::result::{RewriteError, RewriteResult};

// 导入并重新导出所有具体的节点类型
pub use super::aggregate_node::AggregateNode;
pub use super::empty_node::EmptyNode;
pub use super::filter_node::FilterNode;
pub use super::join_node::{JoinNode, JoinType};
pub use super::project_node::{ProjectItem, ProjectNode};
pub use super::scan_node::ScanNode;
pub use super::sort_node::{LimitNode, OrderDirection, SortItem, SortNode};

/// 共享的计划节点引用
pub type PlanRef = Arc<PlanNodeEnum>;

/// PlanNode 枚举，包含所有可能的节点类型
///
/// 这个枚举避免了动态分发的性能开销
#[derive(Debug, Clone, PartialEq)]
pub enum PlanNodeEnum {
    /// 扫描节点
    Scan(ScanNode),
    /// 过滤节点
    Filter(FilterNode),
    /// 投影节点
    Project(ProjectNode),
    /// 连接节点
    Join(JoinNode),
    /// 聚合节点
    Aggregate(AggregateNode),
    /// 排序节点
    Sort(SortNode),
    /// 限制节点
    Limit(LimitNode),
    /// 空结果节点
    Empty(EmptyNode),
}

/// 节点类型标签，用于模式匹配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanNodeKind {
    Scan,
    Filter,
    Project,
    Join,
    Aggregate,
    Sort,
    Limit,
    Empty,
}

impl PlanNodeKind {
    /// 所有节点类型
    pub const ALL: [PlanNodeKind; 8] = [
        PlanNodeKind::Scan,
        PlanNodeKind::Filter,
        PlanNodeKind::Project,
        PlanNodeKind::Join,
        PlanNodeKind::Aggregate,
        PlanNodeKind::Sort,
        PlanNodeKind::Limit,
        PlanNodeKind::Empty,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PlanNodeKind::Scan => "Scan",
            PlanNodeKind::Filter => "Filter",
            PlanNodeKind::Project => "Project",
            PlanNodeKind::Join => "Join",
            PlanNodeKind::Aggregate => "Aggregate",
            PlanNodeKind::Sort => "Sort",
            PlanNodeKind::Limit => "Limit",
            PlanNodeKind::Empty => "Empty",
        }
    }

    /// 该类型节点的子节点数量
    pub fn arity(&self) -> usize {
        match self {
            PlanNodeKind::Scan | PlanNodeKind::Empty => 0,
            PlanNodeKind::Join => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for PlanNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

macro_rules! plan_node_accessors {
    ($($method:ident => $variant:ident($node:ty)),* $(,)?) => {
        impl PlanNodeEnum {
            $(
                pub fn $method(&self) -> Option<&$node> {
                    match self {
                        PlanNodeEnum::$variant(node) => Some(node),
                        _ => None,
                    }
                }
            )*
        }
    };
}

plan_node_accessors! {
    as_scan => Scan(ScanNode),
    as_filter => Filter(FilterNode),
    as_project => Project(ProjectNode),
    as_join => Join(JoinNode),
    as_aggregate => Aggregate(AggregateNode),
    as_sort => Sort(SortNode),
    as_limit => Limit(LimitNode),
    as_empty => Empty(EmptyNode),
}

impl PlanNodeEnum {
    /// 获取节点ID
    pub fn id(&self) -> PlanNodeId {
        match self {
            PlanNodeEnum::Scan(node) => node.id(),
            PlanNodeEnum::Filter(node) => node.id(),
            PlanNodeEnum::Project(node) => node.id(),
            PlanNodeEnum::Join(node) => node.id(),
            PlanNodeEnum::Aggregate(node) => node.id(),
            PlanNodeEnum::Sort(node) => node.id(),
            PlanNodeEnum::Limit(node) => node.id(),
            PlanNodeEnum::Empty(node) => node.id(),
        }
    }

    pub fn kind(&self) -> PlanNodeKind {
        match self {
            PlanNodeEnum::Scan(_) => PlanNodeKind::Scan,
            PlanNodeEnum::Filter(_) => PlanNodeKind::Filter,
            PlanNodeEnum::Project(_) => PlanNodeKind::Project,
            PlanNodeEnum::Join(_) => PlanNodeKind::Join,
            PlanNodeEnum::Aggregate(_) => PlanNodeKind::Aggregate,
            PlanNodeEnum::Sort(_) => PlanNodeKind::Sort,
            PlanNodeEnum::Limit(_) => PlanNodeKind::Limit,
            PlanNodeEnum::Empty(_) => PlanNodeKind::Empty,
        }
    }

    /// 获取节点名称
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// 获取子节点，按输入顺序排列
    pub fn children(&self) -> Vec<&PlanRef> {
        match self {
            PlanNodeEnum::Scan(_) | PlanNodeEnum::Empty(_) => Vec::new(),
            PlanNodeEnum::Filter(node) => vec![node.input()],
            PlanNodeEnum::Project(node) => vec![node.input()],
            PlanNodeEnum::Aggregate(node) => vec![node.input()],
            PlanNodeEnum::Sort(node) => vec![node.input()],
            PlanNodeEnum::Limit(node) => vec![node.input()],
            PlanNodeEnum::Join(node) => vec![node.left(), node.right()],
        }
    }

    /// 以新的子节点重建同类型节点，保留 id 与其余属性
    ///
    /// 子节点数量与节点类型不符时返回结构错误
    pub fn with_new_children(&self, children: Vec<PlanRef>) -> RewriteResult<PlanNodeEnum> {
        let rebuilt = match (self, children.as_slice()) {
            (PlanNodeEnum::Scan(_) | PlanNodeEnum::Empty(_), []) => self.clone(),
            (PlanNodeEnum::Filter(node), [input]) => {
                PlanNodeEnum::Filter(node.with_input(Arc::clone(input)))
            }
            (PlanNodeEnum::Project(node), [input]) => {
                PlanNodeEnum::Project(node.with_input(Arc::clone(input)))
            }
            (PlanNodeEnum::Aggregate(node), [input]) => {
                PlanNodeEnum::Aggregate(node.with_input(Arc::clone(input)))
            }
            (PlanNodeEnum::Sort(node), [input]) => {
                PlanNodeEnum::Sort(node.with_input(Arc::clone(input)))
            }
            (PlanNodeEnum::Limit(node), [input]) => {
                PlanNodeEnum::Limit(node.with_input(Arc::clone(input)))
            }
            (PlanNodeEnum::Join(node), [left, right]) => {
                PlanNodeEnum::Join(node.with_inputs(Arc::clone(left), Arc::clone(right)))
            }
            _ => {
                return Err(RewriteError::invalid_plan_structure(format!(
                    "{}[{}] 需要 {} 个子节点, 实际为 {}",
                    self.name(),
                    self.id(),
                    self.kind().arity(),
                    children.len()
                )))
            }
        };
        Ok(rebuilt)
    }

    /// 节点输出的列名
    pub fn output_columns(&self) -> Vec<String> {
        match self {
            PlanNodeEnum::Scan(node) => node.columns().to_vec(),
            PlanNodeEnum::Empty(node) => node.columns().to_vec(),
            PlanNodeEnum::Project(node) => node.aliases(),
            PlanNodeEnum::Aggregate(node) => node
                .group_keys()
                .iter()
                .cloned()
                .chain(node.aggregates().iter().map(|item| item.alias.clone()))
                .collect(),
            PlanNodeEnum::Join(node) => {
                let mut columns = node.left().output_columns();
                columns.extend(node.right().output_columns());
                columns
            }
            PlanNodeEnum::Filter(node) => node.input().output_columns(),
            PlanNodeEnum::Sort(node) => node.input().output_columns(),
            PlanNodeEnum::Limit(node) => node.input().output_columns(),
        }
    }

    /// 不含节点 id 的缩进文本，结构相同的计划得到相同文本
    pub fn explain(&self) -> String {
        explain::explain(self)
    }

    /// 子树中最大的节点 id
    pub fn max_id(&self) -> PlanNodeId {
        self.children()
            .into_iter()
            .map(|child| child.max_id())
            .fold(self.id(), PlanNodeId::max)
    }

    /// 子树中的节点数量
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(|child| child.node_count())
            .sum::<usize>()
    }

    pub fn into_ref(self) -> PlanRef {
        Arc::new(self)
    }
}

impl fmt::Display for PlanNodeEnum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", explain::describe(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Expression;

    fn scan(id: PlanNodeId, columns: &[&str]) -> PlanRef {
        ScanNode::new(id, "t", columns.iter().map(|c| c.to_string()).collect())
            .into_enum()
            .into_ref()
    }

    #[test]
    fn test_kind_and_name() {
        let node = scan(1, &["a"]);
        assert_eq!(node.kind(), PlanNodeKind::Scan);
        assert_eq!(node.name(), "Scan");
        assert_eq!(node.as_scan().map(|s| s.table()), Some("t"));
        assert!(node.as_filter().is_none());
    }

    #[test]
    fn test_with_new_children_keeps_id() {
        let child = scan(1, &["a"]);
        let filter = FilterNode::new(2, child, Expression::bool(true)).into_enum();

        let replacement = scan(3, &["a"]);
        let rebuilt = filter
            .with_new_children(vec![replacement.clone()])
            .expect("重建应该成功");
        assert_eq!(rebuilt.id(), 2);
        assert!(Arc::ptr_eq(rebuilt.children()[0], &replacement));
    }

    #[test]
    fn test_with_new_children_checks_arity() {
        let filter = FilterNode::new(2, scan(1, &["a"]), Expression::bool(true)).into_enum();
        let result = filter.with_new_children(Vec::new());
        assert!(matches!(result, Err(RewriteError::InvalidPlanStructure(_))));

        let join = JoinNode::new(5, scan(3, &["a"]), scan(4, &["b"]), JoinType::Cross, None)
            .into_enum();
        assert!(join.with_new_children(vec![scan(6, &["a"])]).is_err());
        let rebuilt = join
            .with_new_children(vec![scan(7, &["x"]), scan(8, &["y"])])
            .expect("重建应该成功");
        assert_eq!(rebuilt.output_columns(), vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_output_columns() {
        let input = scan(1, &["g", "v"]);
        let agg = AggregateNode::new(
            2,
            input,
            vec!["g".to_string()],
            vec![ProjectItem::new(
                Expression::function("sum", vec![Expression::column("v")]),
                "total",
            )],
        )
        .into_enum();
        assert_eq!(agg.output_columns(), vec!["g".to_string(), "total".to_string()]);
    }

    #[test]
    fn test_max_id_and_node_count() {
        let left = scan(4, &["a"]);
        let right = scan(9, &["b"]);
        let join = JoinNode::new(2, left, right, JoinType::Inner, None).into_enum();
        let limit = LimitNode::new(1, join.into_ref(), 0, 10).into_enum();
        assert_eq!(limit.max_id(), 9);
        assert_eq!(limit.node_count(), 4);
    }
}
