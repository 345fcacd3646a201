//! # 配置模块
//!
//! ## 设计思路
//!
//! 将解析链路中所有“可调参数”集中到 `ResolverConfig`，保证行为可观测、可测试。
//! 默认值即生产行为：单次请求 10 秒超时，固定的兼容性文件名。
//!
//! ## 实现思路
//!
//! - `Default` 提供与旧表单一致的取值。
//! - `#[serde(default)]` 允许设置文件只覆盖部分字段。
//! - `validate` 在装载外部设置后做范围校验。

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// URL 来源的合成文件名（与实际格式无关，仅作兼容标签）。
pub const URL_IMAGE_FILENAME: &str = "url_image.jpg";
/// 剪贴板来源的合成文件名。
pub const PASTED_IMAGE_FILENAME: &str = "pasted_image.png";
/// 默认的网络请求超时（秒）。
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
/// 允许配置的最大超时（秒）。
pub const MAX_FETCH_TIMEOUT_SECS: u64 = 300;
/// 默认的单张图片体积上限（字节）。
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// 图片来源解析配置。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// 单次 HTTP GET 的整体超时（秒），覆盖连接与读取响应体。
    pub fetch_timeout_secs: u64,
    /// 下载响应体与上传文件允许的最大体积（字节）。
    pub max_file_size: u64,
    /// URL 来源产物使用的文件名。
    pub url_filename: String,
    /// 剪贴板来源产物使用的文件名。
    pub paste_filename: String,
    /// 请求头 `User-Agent`。
    pub user_agent: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            url_filename: URL_IMAGE_FILENAME.to_string(),
            paste_filename: PASTED_IMAGE_FILENAME.to_string(),
            user_agent: concat!("image-intake/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ResolverConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// 校验配置取值范围，返回可直接展示的说明。
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=MAX_FETCH_TIMEOUT_SECS).contains(&self.fetch_timeout_secs) {
            return Err(format!(
                "fetch_timeout_secs 必须在 1~{} 秒之间（当前：{}）",
                MAX_FETCH_TIMEOUT_SECS, self.fetch_timeout_secs
            ));
        }
        if self.max_file_size == 0 {
            return Err("max_file_size 必须大于 0".to_string());
        }
        if self.url_filename.trim().is_empty() || self.paste_filename.trim().is_empty() {
            return Err("合成文件名不能为空".to_string());
        }
        Ok(())
    }
}
