// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::domain::services::import_validator::{ImportRules, DEFAULT_MAX_FILE_BYTES};

/// 环境变量前缀，例如 `DOWNLOAD_CENTER__BACKEND__BASE_URL`
pub const ENV_PREFIX: &str = "DOWNLOAD_CENTER";

/// 应用程序配置设置
///
/// 包含服务器、下载服务后端、导入规则和指标导出等配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 下载服务后端配置
    pub backend: BackendSettings,
    /// CSV 导入规则
    pub import: ImportRules,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 下载服务后端配置
#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    /// 后端 API 根地址
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 访问令牌，设置后以 Bearer 方式附加
    #[serde(default)]
    pub token: Option<String>,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出端监听地址
    pub listen_addr: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加：内置默认值、`config/default`、`config/{APP_ENVIRONMENT}`、
    /// 以 `DOWNLOAD_CENTER` 为前缀的环境变量
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 只包含内置默认值的构建器
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("backend.base_url", "http://localhost:8000/")?
            .set_default("backend.timeout_secs", 30)?
            .set_default("import.max_file_bytes", DEFAULT_MAX_FILE_BYTES as i64)?
            .set_default("import.allow_empty_liveroom_id", false)?
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
