//! 计划文本化
//!
//! `explain` 生成不含节点 id 的缩进文本，结构相同的计划得到相同文本，
//! 因此也被用作变化检测、备忘录去重与诊断信息中的计划形状。
//! `explain_with_ids` 额外标注节点 id，仅用于调试日志。

use super::nodes::plan_node_enum::PlanNodeEnum;

const INDENT: &str = "  ";

/// 单个节点的一行描述，不含子节点与 id
pub fn describe(node: &PlanNodeEnum) -> String {
    match node {
        PlanNodeEnum::Scan(scan) => {
            format!("Scan({}: {})", scan.table(), scan.columns().join(", "))
        }
        PlanNodeEnum::Filter(filter) => format!("Filter({})", filter.condition()),
        PlanNodeEnum::Project(project) => format!(
            "Project({})",
            join_display(project.items().iter())
        ),
        PlanNodeEnum::Join(join) => match join.condition() {
            Some(condition) => format!("Join({}, on: {})", join.join_type(), condition),
            None => format!("Join({})", join.join_type()),
        },
        PlanNodeEnum::Aggregate(agg) => format!(
            "Aggregate(group by: [{}], aggregates: [{}])",
            agg.group_keys().join(", "),
            join_display(agg.aggregates().iter())
        ),
        PlanNodeEnum::Sort(sort) => format!("Sort({})", join_display(sort.sort_items().iter())),
        PlanNodeEnum::Limit(limit) => {
            format!("Limit(offset: {}, count: {})", limit.offset(), limit.count())
        }
        PlanNodeEnum::Empty(empty) => format!("Empty({})", empty.columns().join(", ")),
    }
}

/// 整棵计划树的缩进文本
pub fn explain(node: &PlanNodeEnum) -> String {
    let mut out = String::new();
    write_tree(node, 0, false, &mut out);
    out
}

/// 带节点 id 的缩进文本
pub fn explain_with_ids(node: &PlanNodeEnum) -> String {
    let mut out = String::new();
    write_tree(node, 0, true, &mut out);
    out
}

fn write_tree(node: &PlanNodeEnum, depth: usize, with_ids: bool, out: &mut String) {
    if !out.is_empty() {
        out.push('\n');
    }
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    if with_ids {
        out.push_str(&format!("#{} ", node.id()));
    }
    out.push_str(&describe(node));
    for child in node.children() {
        write_tree(child, depth + 1, with_ids, out);
    }
}

fn join_display<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
    items
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
