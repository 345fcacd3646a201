//! 解析器设置装载
//!
//! 从 JSON 设置文件读取 `ResolverConfig`，缺省字段沿用默认值；装载后统一校验取值范围。

use std::fs;
use std::path::Path;

use crate::error::AppError;
use crate::image_source::ResolverConfig;

/// 读取设置文件；文件不存在时返回默认配置。
pub fn load_settings(path: &Path) -> Result<ResolverConfig, AppError> {
    if !path.exists() {
        log::info!("设置文件不存在，使用默认配置：{}", path.display());
        return Ok(ResolverConfig::default());
    }

    let content = fs::read_to_string(path)?;
    parse_settings(&content)
}

/// 解析并校验 JSON 设置内容。
pub fn parse_settings(content: &str) -> Result<ResolverConfig, AppError> {
    let config = serde_json::from_str::<ResolverConfig>(content)
        .map_err(|e| AppError::Settings(format!("解析设置文件失败: {}", e)))?;

    config.validate().map_err(AppError::Settings)?;
    Ok(config)
}

/// 应用命令行覆盖项后重新校验。
pub fn with_timeout_override(mut config: ResolverConfig, timeout_secs: Option<u64>) -> Result<ResolverConfig, AppError> {
    if let Some(secs) = timeout_secs {
        config.fetch_timeout_secs = secs;
    }

    config.validate().map_err(AppError::Settings)?;
    Ok(config)
}
