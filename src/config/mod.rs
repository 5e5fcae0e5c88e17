use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub optimizer: OptimizerConfig,
    pub log: LogConfig,
}

/// 重写引擎配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct OptimizerConfig {
    /// 非 once 作业允许的最大改写轮数，之后再执行一轮确认
    pub max_iteration_rounds: usize,
    /// 单个节点上连续规则应用的上限，超出视为规则振荡
    pub max_node_applications: usize,
    /// 未收敛错误中保留的最近计划形状数量
    pub shape_history_size: usize,
    /// 禁用的规则名称
    pub disabled_rules: Vec<String>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_iteration_rounds: 100,
            max_node_applications: 10_000,
            shape_history_size: 4,
            disabled_rules: Vec::new(),
        }
    }
}

impl OptimizerConfig {
    pub fn with_max_iteration_rounds(mut self, rounds: usize) -> Self {
        self.max_iteration_rounds = rounds;
        self
    }

    pub fn with_max_node_applications(mut self, applications: usize) -> Self {
        self.max_node_applications = applications;
        self
    }

    pub fn with_disabled_rule(mut self, rule_name: impl Into<String>) -> Self {
        self.disabled_rules.push(rule_name.into());
        self
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub dir: String,
    pub file: String,
    pub max_file_size: u64,
    pub max_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: "logs".to_string(),
            file: "planrewrite".to_string(),
            max_file_size: 100 * 1024 * 1024, // 100MB
            max_files: 5,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        if config.optimizer.max_iteration_rounds == 0 {
            return Err("max_iteration_rounds 必须大于 0".into());
        }
        if config.optimizer.max_node_applications == 0 {
            return Err("max_node_applications 必须大于 0".into());
        }
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
