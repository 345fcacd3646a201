//! # 数据源与结果模型
//!
//! ## 设计思路
//!
//! 将“外部输入”和“解析结果”解耦：
//! - `RawInput` 表示某种输入方式下用户给出的原始负载
//! - `ImageArtifact` 表示本次解析产出的内存图片（字节 + 合成文件名 + 元信息）
//! - `ResolutionOutcome` 二选一：成功产物或失败原因
//!
//! 所有实体只在单次解析调用内存活，不缓存、不持久化。

use std::fmt;

use bytes::Bytes;
use image::ColorType;
use serde::Serialize;

use super::{InputMode, ResolutionError};

/// 剪贴板捕获到的 RGBA8 位图。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PastedBitmap {
    pub width: usize,
    pub height: usize,
    /// `width * height * 4` 字节的 RGBA 像素。
    pub rgba: Vec<u8>,
}

/// 某种输入方式对应的原始输入。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    /// 用户上传的文件字节及其声明文件名。
    UploadFile { filename: String, bytes: Bytes },
    /// 用户输入的图片地址。
    EnterUrl { url: String },
    /// 剪贴板捕获结果；`None` 表示尚未复制图片或用户取消。
    PasteFromClipboard { bitmap: Option<PastedBitmap> },
}

impl RawInput {
    pub fn mode(&self) -> InputMode {
        match self {
            Self::UploadFile { .. } => InputMode::UploadFile,
            Self::EnterUrl { .. } => InputMode::EnterUrl,
            Self::PasteFromClipboard { .. } => InputMode::PasteFromClipboard,
        }
    }
}

/// 图片色彩模式，按常见图像库的模式名展示。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorMode {
    L,
    La,
    Rgb,
    Rgba,
    L16,
    La16,
    Rgb16,
    Rgba16,
    Rgb32F,
    Rgba32F,
    Unknown,
}

impl From<ColorType> for ColorMode {
    fn from(color: ColorType) -> Self {
        match color {
            ColorType::L8 => Self::L,
            ColorType::La8 => Self::La,
            ColorType::Rgb8 => Self::Rgb,
            ColorType::Rgba8 => Self::Rgba,
            ColorType::L16 => Self::L16,
            ColorType::La16 => Self::La16,
            ColorType::Rgb16 => Self::Rgb16,
            ColorType::Rgba16 => Self::Rgba16,
            ColorType::Rgb32F => Self::Rgb32F,
            ColorType::Rgba32F => Self::Rgba32F,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::L => "L",
            Self::La => "LA",
            Self::Rgb => "RGB",
            Self::Rgba => "RGBA",
            Self::L16 => "I;16",
            Self::La16 => "LA;16",
            Self::Rgb16 => "RGB;16",
            Self::Rgba16 => "RGBA;16",
            Self::Rgb32F => "RGBF",
            Self::Rgba32F => "RGBAF",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

/// 解码得到的图片元信息。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    pub color_mode: ColorMode,
}

/// 解析成功的图片产物。
///
/// 文件名只是兼容性标签（例如 URL 来源固定为 `url_image.jpg`），不保证与真实格式一致；
/// 需要真实格式时使用 [`ImageArtifact::sniffed_mime`]。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageArtifact {
    pub(crate) bytes: Bytes,
    pub(crate) filename: String,
    pub(crate) metadata: Option<ImageMetadata>,
}

impl ImageArtifact {
    pub(crate) fn new(bytes: Bytes, filename: impl Into<String>, metadata: Option<ImageMetadata>) -> Self {
        Self {
            bytes,
            filename: filename.into(),
            metadata,
        }
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// 元信息；解码失败时静默缺省。
    pub fn metadata(&self) -> Option<ImageMetadata> {
        self.metadata
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 通过文件签名（magic bytes）识别真实 MIME 类型。
    pub fn sniffed_mime(&self) -> Option<&'static str> {
        infer::get(&self.bytes)
            .filter(|kind| kind.matcher_type() == infer::MatcherType::Image)
            .map(|kind| kind.mime_type())
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

/// 单次解析的结果：恰好一个分支有值。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    Resolved(ImageArtifact),
    Failed(ResolutionError),
}

impl ResolutionOutcome {
    pub fn artifact(&self) -> Option<&ImageArtifact> {
        match self {
            Self::Resolved(artifact) => Some(artifact),
            Self::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ResolutionError> {
        match self {
            Self::Resolved(_) => None,
            Self::Failed(error) => Some(error),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

impl From<Result<ImageArtifact, ResolutionError>> for ResolutionOutcome {
    fn from(result: Result<ImageArtifact, ResolutionError>) -> Self {
        match result {
            Ok(artifact) => Self::Resolved(artifact),
            Err(error) => Self::Failed(error),
        }
    }
}
