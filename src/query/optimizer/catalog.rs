//! 目录接口
//!
//! 重写规则在匹配与转换时只读地查询表结构，例如列是否可为空

use std::collections::HashMap;

/// 只读目录接口
pub trait Catalog: Send + Sync {
    /// 表的全部列名，表不存在时返回 None
    fn table_columns(&self, table: &str) -> Option<Vec<String>>;

    /// 列是否可为空，表或列不存在时返回 None
    fn is_nullable(&self, table: &str, column: &str) -> Option<bool>;
}

/// 列定义
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub nullable: bool,
}

/// 内存目录
#[derive(Debug, Default, Clone)]
pub struct MemoryCatalog {
    tables: HashMap<String, Vec<ColumnDef>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一张表，列以 (列名, 是否可为空) 给出
    pub fn with_table(mut self, table: &str, columns: &[(&str, bool)]) -> Self {
        self.add_table(table, columns);
        self
    }

    pub fn add_table(&mut self, table: &str, columns: &[(&str, bool)]) {
        let columns = columns
            .iter()
            .map(|(name, nullable)| ColumnDef {
                name: name.to_string(),
                nullable: *nullable,
            })
            .collect();
        self.tables.insert(table.to_string(), columns);
    }
}

impl Catalog for MemoryCatalog {
    fn table_columns(&self, table: &str) -> Option<Vec<String>> {
        self.tables
            .get(table)
            .map(|columns| columns.iter().map(|c| c.name.clone()).collect())
    }

    fn is_nullable(&self, table: &str, column: &str) -> Option<bool> {
        self.tables
            .get(table)?
            .iter()
            .find(|c| c.name == column)
            .map(|c| c.nullable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_catalog_lookup() {
        let catalog = MemoryCatalog::new().with_table("t", &[("id", false), ("name", true)]);

        assert_eq!(
            catalog.table_columns("t"),
            Some(vec!["id".to_string(), "name".to_string()])
        );
        assert_eq!(catalog.is_nullable("t", "id"), Some(false));
        assert_eq!(catalog.is_nullable("t", "name"), Some(true));
        assert_eq!(catalog.is_nullable("t", "missing"), None);
        assert_eq!(catalog.table_columns("u"), None);
    }
}
