pub mod explain;
pub mod nodes;
pub mod node_id_generator;

pub use explain::{describe, explain, explain_with_ids};
pub use node_id_generator::{NodeIdGenerator, PlanNodeId};
pub use nodes::plan_node_enum::{PlanNodeEnum, PlanNodeKind, PlanRef};
pub use nodes::plan_node_traits::PlanNode;
pub use nodes::{
    AggregateNode, EmptyNode, FilterNode, JoinNode, JoinType, LimitNode, OrderDirection,
    PlanNodeFactory, ProjectItem, ProjectNode, ScanNode, SortItem, SortNode,
};
