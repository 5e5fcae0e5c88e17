//! 计划节点宏定义
//!
//! 提供宏来简化计划节点的定义，减少样板代码

/// 定义计划节点的宏
///
/// 按输入数量生成节点结构体、id 访问器以及 `PlanNode` 等特征实现。
/// 子节点以 `PlanRef` 持有，替换输入时保留原节点 id。
///
/// # 示例
/// ```ignore
/// define_plan_node! {
///     pub struct FilterNode {
///         condition: Expression,
///     }
///     enum: Filter
///     input: SingleInputNode
/// }
/// ```
#[macro_export]
macro_rules! define_plan_node {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $($field:ident: $type:ty),* $(,)?
        }
        enum: $variant:ident
        input: ZeroInputNode
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            id: $crate::query::planner::plan::core::node_id_generator::PlanNodeId,
            $($field: $type,)*
        }

        impl $name {
            pub fn id(&self) -> $crate::query::planner::plan::core::node_id_generator::PlanNodeId {
                self.id
            }

            pub fn type_name(&self) -> &'static str {
                stringify!($name)
            }
        }

        impl $crate::query::planner::plan::core::nodes::plan_node_traits::PlanNode for $name {
            fn id(&self) -> $crate::query::planner::plan::core::node_id_generator::PlanNodeId {
                self.id
            }

            fn name(&self) -> &'static str {
                stringify!($variant)
            }

            fn into_enum(self) -> $crate::query::planner::plan::core::nodes::plan_node_enum::PlanNodeEnum {
                $crate::query::planner::plan::core::nodes::plan_node_enum::PlanNodeEnum::$variant(self)
            }
        }

        impl $crate::query::planner::plan::core::nodes::plan_node_traits::ZeroInputNode for $name {}
    };

    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $($field:ident: $type:ty),* $(,)?
        }
        enum: $variant:ident
        input: SingleInputNode
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            id: $crate::query::planner::plan::core::node_id_generator::PlanNodeId,
            input: $crate::query::planner::plan::core::nodes::plan_node_enum::PlanRef,
            $($field: $type,)*
        }

        impl $name {
            pub fn id(&self) -> $crate::query::planner::plan::core::node_id_generator::PlanNodeId {
                self.id
            }

            pub fn type_name(&self) -> &'static str {
                stringify!($name)
            }
        }

        impl $crate::query::planner::plan::core::nodes::plan_node_traits::PlanNode for $name {
            fn id(&self) -> $crate::query::planner::plan::core::node_id_generator::PlanNodeId {
                self.id
            }

            fn name(&self) -> &'static str {
                stringify!($variant)
            }

            fn into_enum(self) -> $crate::query::planner::plan::core::nodes::plan_node_enum::PlanNodeEnum {
                $crate::query::planner::plan::core::nodes::plan_node_enum::PlanNodeEnum::$variant(self)
            }
        }

        impl $crate::query::planner::plan::core::nodes::plan_node_traits::SingleInputNode for $name {
            fn input(&self) -> &$crate::query::planner::plan::core::nodes::plan_node_enum::PlanRef {
                &self.input
            }

            fn with_input(
                &self,
                input: $crate::query::planner::plan::core::nodes::plan_node_enum::PlanRef,
            ) -> Self {
                Self {
                    input,
                    ..self.clone()
                }
            }
        }
    };

    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $($field:ident: $type:ty),* $(,)?
        }
        enum: $variant:ident
        input: BinaryInputNode
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            id: $crate::query::planner::plan::core::node_id_generator::PlanNodeId,
            left: $crate::query::planner::plan::core::nodes::plan_node_enum::PlanRef,
            right: $crate::query::planner::plan::core::nodes::plan_node_enum::PlanRef,
            $($field: $type,)*
        }

        impl $name {
            pub fn id(&self) -> $crate::query::planner::plan::core::node_id_generator::PlanNodeId {
                self.id
            }

            pub fn type_name(&self) -> &'static str {
                stringify!($name)
            }
        }

        impl $crate::query::planner::plan::core::nodes::plan_node_traits::PlanNode for $name {
            fn id(&self) -> $crate::query::planner::plan::core::node_id_generator::PlanNodeId {
                self.id
            }

            fn name(&self) -> &'static str {
                stringify!($variant)
            }

            fn into_enum(self) -> $crate::query::planner::plan::core::nodes::plan_node_enum::PlanNodeEnum {
                $crate::query::planner::plan::core::nodes::plan_node_enum::PlanNodeEnum::$variant(self)
            }
        }

        impl $crate::query::planner::plan::core::nodes::plan_node_traits::BinaryInputNode for $name {
            fn left(&self) -> &$crate::query::planner::plan::core::nodes::plan_node_enum::PlanRef {
                &self.left
            }

            fn right(&self) -> &$crate::query::planner::plan::core::nodes::plan_node_enum::PlanRef {
                &self.right
            }

            fn with_inputs(
                &self,
                left: $crate::query::planner::plan::core::nodes::plan_node_enum::PlanRef,
                right: $crate::query::planner::plan::core::nodes::plan_node_enum::PlanRef,
            ) -> Self {
                Self {
                    left,
                    right,
                    ..self.clone()
                }
            }
        }
    };
}
