//! # URL 加载模块
//!
//! ## 设计思路
//!
//! 每次解析只发出一次 GET 请求，不重试，只有一个整体超时。
//! 校验顺序固定：状态码 → 声明的内容类型 → 声明的长度 → 分块读取响应体。
//! 内容类型不是 `image/*` 时直接短路，不读取也不解析响应体。
//!
//! ## 实现思路
//!
//! - 传输层失败（URL 非法、DNS、连接、超时、非 2xx、读取中断、超出体积上限）统一映射为 `NetworkError`。
//! - 缺失 `Content-Type` 视为空字符串，按非图片处理。
//! - 响应体逐块累加，超过 `max_file_size` 立即停止，不等待完整下载。
//! - 日志与错误消息中的 URL 去掉 query 与 fragment，避免泄露令牌。

use bytes::{Bytes, BytesMut};

use super::{ImageSourceResolver, ResolutionError};

const IMAGE_MEDIA_PREFIX: &str = "image/";

/// 判断声明的内容类型是否为图片（前缀比较，大小写不敏感）。
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .trim_start()
        .get(..IMAGE_MEDIA_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(IMAGE_MEDIA_PREFIX))
}

impl ImageSourceResolver {
    /// 获取 URL 对应的原始响应体，完成状态码、内容类型与体积校验。
    pub(super) async fn fetch_image_bytes(&self, url: &str) -> Result<Bytes, ResolutionError> {
        log::info!("🌐 开始获取图片 - URL: {}", Self::redact_url(url));

        let mut response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e, url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolutionError::NetworkError(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("请求失败")
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .unwrap_or_default();

        if !is_image_content_type(&content_type) {
            return Err(ResolutionError::NotAnImage(content_type));
        }

        let limit = self.config.max_file_size;
        let declared_len = response.content_length();
        if let Some(len) = declared_len {
            if len > limit {
                return Err(Self::oversized(len, limit));
            }
        }

        let initial_capacity = declared_len.unwrap_or(0).min(limit) as usize;
        let mut body = BytesMut::with_capacity(initial_capacity);
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| self.map_reqwest_error(e, url))?
        {
            let received = (body.len() + chunk.len()) as u64;
            if received > limit {
                return Err(Self::oversized(received, limit));
            }
            body.extend_from_slice(&chunk);
        }

        log::debug!("✅ 下载完成 - {} bytes（{}）", body.len(), content_type);
        Ok(body.freeze())
    }

    fn oversized(size: u64, limit: u64) -> ResolutionError {
        ResolutionError::NetworkError(format!(
            "图片过大：至少 {:.2} MB（限制：{:.2} MB）",
            size as f64 / 1024.0 / 1024.0,
            limit as f64 / 1024.0 / 1024.0
        ))
    }

    /// 统一映射 reqwest 错误到解析错误，消息中的 URL 已脱敏。
    fn map_reqwest_error(&self, e: reqwest::Error, url: &str) -> ResolutionError {
        let detail = e.to_string().replace(url, &Self::redact_url(url));

        let message = if e.is_timeout() {
            format!("请求超时（{}秒）", self.config.fetch_timeout_secs)
        } else if e.is_builder() {
            format!("URL 无效：{}", detail)
        } else if e.is_connect() {
            format!("无法连接：{}", detail)
        } else {
            format!("请求失败：{}", detail)
        };

        ResolutionError::NetworkError(message)
    }

    /// 去掉 query、fragment 与用户信息后的 URL，用于日志与错误消息。
    pub(super) fn redact_url(url: &str) -> String {
        match reqwest::Url::parse(url) {
            Ok(mut parsed) => {
                parsed.set_query(None);
                parsed.set_fragment(None);
                let _ = parsed.set_username("");
                let _ = parsed.set_password(None);
                parsed.to_string()
            }
            Err(_) => "<invalid-url>".to_string(),
        }
    }
}
