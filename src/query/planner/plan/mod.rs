pub mod core;

pub use self::core::nodes::*;
pub use self::core::{NodeIdGenerator, PlanNodeId};
