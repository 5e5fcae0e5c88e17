//! 优化器协作者模块
//!
//! - `memo`: 探索规则登记备选计划的备忘录
//! - `catalog`: 规则只读查询的表结构目录

pub mod catalog;
pub mod memo;

pub use catalog::{Catalog, ColumnDef, MemoryCatalog};
pub use memo::{GroupMemo, Memo, OptGroup};
