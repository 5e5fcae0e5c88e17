//! 自定义断言辅助模块
//!
//! 提供测试中的常用断言函数

use planrewrite::query::planner::plan::PlanRef;
use planrewrite::query::planner::rewrite::{RewriteError, RewriteResult};

/// 断言结果成功，返回内部值
pub fn assert_ok<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
    result.expect("操作应该成功")
}

/// 断言结果失败并匹配错误消息
pub fn assert_err_with<T: std::fmt::Debug, E: std::fmt::Display>(
    result: Result<T, E>,
    expected_msg: &str,
) {
    let err = result.expect_err("操作应该失败");
    let err_str = err.to_string();
    assert!(
        err_str.contains(expected_msg),
        "错误消息应包含 '{}', 实际是 '{}'",
        expected_msg,
        err_str
    );
}

/// 断言计划的指纹与期望一致
pub fn assert_plan(plan: &PlanRef, expected: &str) {
    let actual = plan.explain();
    assert_eq!(
        actual, expected,
        "计划不匹配:\n期望:\n{}\n实际:\n{}",
        expected, actual
    );
}

/// 断言结果为未收敛错误，返回 (作业描述, 轮数, 最近的计划形状)
pub fn assert_non_termination<T: std::fmt::Debug>(
    result: RewriteResult<T>,
) -> (String, usize, Vec<String>) {
    match result {
        Err(RewriteError::NonTermination {
            job,
            iterations,
            recent_shapes,
        }) => (job, iterations, recent_shapes),
        other => panic!("期望未收敛错误, 实际是 {:?}", other),
    }
}
