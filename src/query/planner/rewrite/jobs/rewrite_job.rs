//! 重写作业
//!
//! 可执行的作业只有两种：计划树遍历作业与自定义作业。
//! 主题只在装配阶段存在，由 `jobs` 展平为有序的作业序列，
//! 展平时把主题名记录在作业上，仅用于日志。

use super::custom::CustomRewriteJob;
use super::plan_tree::PlanTreeRewriteJob;
use crate::query::planner::rewrite::context::OptimizationContext;
use crate::query::planner::rewrite::result::RewriteResult;

/// 可执行的重写作业
#[derive(Debug, Clone)]
pub enum RewriteJob {
    PlanTree(PlanTreeRewriteJob),
    Custom(CustomRewriteJob),
}

impl RewriteJob {
    /// 是否只执行一轮
    pub fn is_once(&self) -> bool {
        match self {
            RewriteJob::PlanTree(job) => job.is_once(),
            RewriteJob::Custom(_) => true,
        }
    }

    /// 执行一轮
    pub fn execute(&self, ctx: &mut OptimizationContext<'_>) -> RewriteResult<()> {
        match self {
            RewriteJob::PlanTree(job) => job.execute(ctx),
            RewriteJob::Custom(job) => job.execute(ctx),
        }
    }

    /// 作业所属的主题
    pub fn topic(&self) -> Option<&str> {
        match self {
            RewriteJob::PlanTree(job) => job.topic(),
            RewriteJob::Custom(job) => job.topic(),
        }
    }

    pub(crate) fn stamp_topic(&mut self, name: &str) {
        let current = match self {
            RewriteJob::PlanTree(job) => &mut job.topic,
            RewriteJob::Custom(job) => &mut job.topic,
        };
        // 嵌套主题从外到内拼接
        *current = Some(match current.take() {
            Some(inner) => format!("{} / {}", name, inner),
            None => name.to_string(),
        });
    }

    /// 作业的可读描述，用于日志与未收敛错误
    pub fn description(&self) -> String {
        let body = match self {
            RewriteJob::PlanTree(job) => job.describe(),
            RewriteJob::Custom(job) => job.describe(),
        };
        match self.topic() {
            Some(topic) => format!("[{}] {}", topic, body),
            None => body,
        }
    }
}

/// 主题：带名称的有序作业组，只用于装配
#[derive(Debug, Clone)]
pub struct TopicRewriteJob {
    pub name: String,
    pub jobs: Vec<JobEntry>,
}

/// 装配阶段的作业条目
#[derive(Debug, Clone)]
pub enum JobEntry {
    Job(RewriteJob),
    Topic(TopicRewriteJob),
}

impl From<RewriteJob> for JobEntry {
    fn from(job: RewriteJob) -> Self {
        JobEntry::Job(job)
    }
}

impl From<TopicRewriteJob> for JobEntry {
    fn from(topic: TopicRewriteJob) -> Self {
        JobEntry::Topic(topic)
    }
}

impl JobEntry {
    /// 递归展平为可执行作业，保持相对顺序
    pub fn flatten_into(self, out: &mut Vec<RewriteJob>) {
        match self {
            JobEntry::Job(job) => out.push(job),
            JobEntry::Topic(topic) => {
                let start = out.len();
                for entry in topic.jobs {
                    entry.flatten_into(out);
                }
                for job in &mut out[start..] {
                    job.stamp_topic(&topic.name);
                }
            }
        }
    }
}
