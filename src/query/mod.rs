// 查询优化模块
//
// - planner: 计划节点与重写规则
// - optimizer: 重写过程依赖的外部协作者（备忘录、目录）

pub mod optimizer;
pub mod planner;
