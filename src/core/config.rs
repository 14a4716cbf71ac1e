//! 配置管理系统 (Configuration Management)
//!
//! 负责 `config.toml` 的反序列化及其层级结构映射，文件缺失时回退默认值。

use std::collections::HashMap;
use std::path::Path;

use bon::Builder;
use config::{Config, File};
use serde::Deserialize;

use crate::core::error::Result;

/// 宿主侧全局配置：按标识覆盖各个源的参数
#[derive(Debug, Deserialize, Builder, Clone, Default)]
pub struct AppConfig {
    /// 源特定配置覆盖映射
    #[serde(default)]
    #[builder(default)]
    pub sources: HashMap<String, SourceConfig>,
}

/// `since` 截止时间的过滤策略
///
/// 两种观测到的行为都保留为显式选项：`Keep` 只记录更新时间、不过滤；
/// `Drop` 在章节行进入结果列表之前剔除早于截止时间的行。
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SinceFilter {
    #[default]
    Keep,
    Drop,
}

/// 单个源的配置覆盖
#[derive(Debug, Deserialize, Builder, Clone, Default)]
pub struct SourceConfig {
    /// 自定义域名 (用于镜像站点)
    pub base_url: Option<String>,
    /// `since` 截止时间过滤策略
    #[serde(default)]
    #[builder(default)]
    pub since_filter: SinceFilter,
}

impl AppConfig {
    /// 从文件系统中加载并解析配置
    pub fn load() -> Result<Self> {
        let config_path = Path::new("config.toml");
        let builder = Config::builder();

        let builder = if config_path.exists() {
            builder.add_source(File::from(config_path))
        } else {
            builder
        };

        let settings = builder.build()?;
        Ok(settings.try_deserialize()?)
    }

    /// 取指定源的覆盖配置，没有配置时返回默认值
    pub fn source(&self, id: &str) -> SourceConfig {
        self.sources.get(id).cloned().unwrap_or_default()
    }
}
