pub mod aggregate_node;
pub mod empty_node;
pub mod factory;
pub mod filter_node;
pub mod join_node;
pub mod macros;
pub mod plan_node_enum;
pub mod plan_node_traits;
pub mod project_node;
pub mod scan_node;
pub mod sort_node;

pub use aggregate_node::AggregateNode;
pub use empty_node::EmptyNode;
pub use factory::PlanNodeFactory;
pub use filter_node::FilterNode;
pub use join_node::{JoinNode, JoinType};
pub use plan_node_enum::{PlanNodeEnum, PlanNodeKind, PlanRef};
pub use plan_node_traits::*;
pub use project_node::{ProjectItem, ProjectNode};
pub use scan_node::ScanNode;
pub use sort_node::{LimitNode, OrderDirection, SortItem, SortNode};
