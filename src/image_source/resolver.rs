//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `ImageSourceResolver` 只负责“输入方式 + 原始负载 → 产物或失败原因”的决策，
//! 不与任何展示层绑定。三种方式各自独立，互不共享状态转移：
//! 1. 上传文件：直接包装，不做解码校验
//! 2. 输入 URL：一次 GET → 内容类型校验 → 解码校验
//! 3. 剪贴板粘贴：能力校验 → 位图重新编码为 PNG
//!
//! ## 实现思路
//!
//! - 返回 `Option<ResolutionOutcome>`：`None` 表示“尚无选择”（空字符串 URL、剪贴板没有图片），
//!   与失败严格区分。
//! - HTTP 客户端在构造时创建并复用，超时取自配置。
//! - 记录 `mode/outcome/elapsed`，失败只在 debug 级别记录（失败由展示层呈现）。

use std::time::Instant;

use bytes::Bytes;

use super::source::{ImageArtifact, PastedBitmap, RawInput, ResolutionOutcome};
use super::{ResolutionError, ResolverConfig};

/// 图片来源解析器。
pub struct ImageSourceResolver {
    pub(super) config: ResolverConfig,
    pub(super) http: reqwest::Client,
}

impl ImageSourceResolver {
    /// 根据配置创建解析器，同时构建复用型 HTTP 客户端。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use image_intake::image_source::{ImageSourceResolver, ResolverConfig};
    ///
    /// let resolver = ImageSourceResolver::new(ResolverConfig::default())?;
    /// # Ok::<(), image_intake::image_source::ResolutionError>(())
    /// ```
    pub fn new(config: ResolverConfig) -> Result<Self, ResolutionError> {
        let http = reqwest::Client::builder()
            .timeout(config.fetch_timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ResolutionError::NetworkError(format!("无法创建 HTTP 客户端：{}", e)))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// 解析主入口。
    ///
    /// `paste_available` 为启动时探测到的剪贴板能力；返回 `None` 表示没有任何结果。
    pub async fn resolve(&self, input: RawInput, paste_available: bool) -> Option<ResolutionOutcome> {
        let mode = input.mode();
        let start = Instant::now();

        let result = match input {
            RawInput::UploadFile { filename, bytes } => Some(Ok(self.resolve_upload(filename, bytes))),
            RawInput::EnterUrl { url } => {
                if url.is_empty() {
                    None
                } else {
                    Some(self.resolve_url(&url).await)
                }
            }
            RawInput::PasteFromClipboard { bitmap } => self.resolve_paste(bitmap, paste_available),
        };

        let Some(result) = result else {
            log::debug!("⏳ {} 尚无输入，保持等待", mode.as_str());
            return None;
        };

        match &result {
            Ok(artifact) => log::info!(
                "✅ 图片解析完成 - mode={} file={} bytes={} elapsed={}ms",
                mode.as_str(),
                artifact.filename(),
                artifact.len(),
                start.elapsed().as_millis()
            ),
            Err(err) => log::debug!(
                "图片解析失败 - mode={} code={} elapsed={}ms：{}",
                mode.as_str(),
                err.code(),
                start.elapsed().as_millis(),
                err
            ),
        }

        Some(ResolutionOutcome::from(result))
    }

    /// 上传文件：字节原样保留，元信息解码失败静默忽略。
    fn resolve_upload(&self, filename: String, bytes: Bytes) -> ImageArtifact {
        let metadata = Self::inspect_metadata(&bytes);
        ImageArtifact::new(bytes, filename, metadata)
    }

    async fn resolve_url(&self, url: &str) -> Result<ImageArtifact, ResolutionError> {
        let body = self.fetch_image_bytes(url).await?;
        let metadata = Self::decode_for_validation(&body)?;

        Ok(ImageArtifact::new(body, self.config.url_filename.clone(), Some(metadata)))
    }

    fn resolve_paste(
        &self,
        bitmap: Option<PastedBitmap>,
        paste_available: bool,
    ) -> Option<Result<ImageArtifact, ResolutionError>> {
        if !paste_available {
            return Some(Err(ResolutionError::ClipboardUnavailable));
        }

        let bitmap = bitmap?;
        Some(Self::encode_pasted_bitmap(&bitmap).map(|(png, metadata)| {
            ImageArtifact::new(Bytes::from(png), self.config.paste_filename.clone(), Some(metadata))
        }))
    }
}
