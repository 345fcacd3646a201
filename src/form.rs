//! # 图片输入表单
//!
//! ## 设计思路
//!
//! 表单是解析器之上的展示层状态机：
//!
//! ```text
//! NoSelectionYet ──选择方式──▶ AwaitingInput ──提交输入──▶ Resolved | Failed
//!                                   ▲                          │
//!                                   └──────再次提交（隐式重启）─┘
//! ```
//!
//! - 可选方式由启动时的剪贴板能力决定（动态菜单）。
//! - 开始新一轮解析时丢弃上一次的产物。
//! - 失败只终结本次尝试，消息原样展示给用户。
//!
//! ## 实现思路
//!
//! 状态与消息渲染分离：`state()` 给程序判断，`messages()` 给人看，`report()` 给 JSON。

use std::path::Path;

use serde::Serialize;

use crate::error::AppError;
use crate::image_source::{
    ImageArtifact, ImageMetadata, ImageSourceResolver, InputMode, PasteCapture, RawInput,
    ResolutionError, ResolutionOutcome, offered_modes,
};

/// 上传允许的扩展名（大小写不敏感）。
pub const ACCEPTED_UPLOAD_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// 判断上传文件名的扩展名是否在允许列表内。
pub fn is_accepted_upload(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            ACCEPTED_UPLOAD_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// 校验上传体积是否超过上限。
pub fn check_upload_size(filename: &str, size: u64, limit: u64) -> Result<(), AppError> {
    if size > limit {
        return Err(AppError::UploadTooLarge {
            filename: filename.to_string(),
            size,
            limit,
        });
    }
    Ok(())
}

/// 表单状态。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    NoSelectionYet,
    AwaitingInput(InputMode),
    Resolved { mode: InputMode, artifact: ImageArtifact },
    Failed { mode: InputMode, error: ResolutionError },
}

impl FormState {
    pub fn mode(&self) -> Option<InputMode> {
        match self {
            Self::NoSelectionYet => None,
            Self::AwaitingInput(mode) => Some(*mode),
            Self::Resolved { mode, .. } | Self::Failed { mode, .. } => Some(*mode),
        }
    }

    fn status(&self) -> &'static str {
        match self {
            Self::NoSelectionYet | Self::AwaitingInput(_) => "pending",
            Self::Resolved { .. } => "resolved",
            Self::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// 一条展示给用户的消息。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormMessage {
    pub level: MessageLevel,
    pub text: String,
}

impl FormMessage {
    fn new(level: MessageLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// 可序列化的表单结果报告。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormReport {
    pub mode: Option<InputMode>,
    pub status: &'static str,
    pub filename: Option<String>,
    pub byte_len: Option<usize>,
    pub sniffed_mime: Option<&'static str>,
    pub metadata: Option<ImageMetadata>,
    pub error_code: Option<&'static str>,
    pub error_message: Option<String>,
}

/// 图片输入表单。
pub struct ImageInputForm {
    resolver: ImageSourceResolver,
    paste_available: bool,
    state: FormState,
}

impl ImageInputForm {
    /// `paste_available` 应来自启动时探测的剪贴板能力。
    pub fn new(resolver: ImageSourceResolver, paste_available: bool) -> Self {
        Self {
            resolver,
            paste_available,
            state: FormState::NoSelectionYet,
        }
    }

    /// 上传与下载共用的体积上限（字节）。
    pub fn max_file_size(&self) -> u64 {
        self.resolver.config().max_file_size
    }

    pub fn paste_available(&self) -> bool {
        self.paste_available
    }

    pub fn offered_modes(&self) -> &'static [InputMode] {
        offered_modes(self.paste_available)
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// 当前选中的图片（仅在 `Resolved` 状态下存在）。
    pub fn selected_image(&self) -> Option<&ImageArtifact> {
        match &self.state {
            FormState::Resolved { artifact, .. } => Some(artifact),
            _ => None,
        }
    }

    /// 选择输入方式；切换方式会丢弃已有结果。
    pub fn choose_mode(&mut self, mode: InputMode) -> Result<(), AppError> {
        if !self.offered_modes().contains(&mode) {
            return Err(AppError::ModeNotOffered(mode));
        }

        log::debug!("选择输入方式：{}", mode.as_str());
        self.state = FormState::AwaitingInput(mode);
        Ok(())
    }

    /// 提交与当前方式匹配的原始输入并解析。
    pub async fn submit(&mut self, input: RawInput) -> Result<&FormState, AppError> {
        let mode = self.expect_mode(input.mode())?;

        // 新一轮提交开始，先丢弃上一次的产物
        self.state = FormState::AwaitingInput(mode);

        if let RawInput::UploadFile { filename, bytes } = &input {
            if !is_accepted_upload(filename) {
                return Err(AppError::UnsupportedUpload(filename.clone()));
            }
            check_upload_size(filename, bytes.len() as u64, self.resolver.config().max_file_size)?;
        }

        match self.resolver.resolve(input, self.paste_available).await {
            Some(ResolutionOutcome::Resolved(artifact)) => {
                self.state = FormState::Resolved { mode, artifact };
            }
            Some(ResolutionOutcome::Failed(error)) => {
                self.state = FormState::Failed { mode, error };
            }
            None => {}
        }

        Ok(&self.state)
    }

    /// 执行一次粘贴捕获并提交结果。
    pub async fn paste<C>(&mut self, capture: &mut C) -> Result<&FormState, AppError>
    where
        C: PasteCapture + ?Sized,
    {
        let mode = self.expect_mode(InputMode::PasteFromClipboard)?;

        match capture.capture() {
            Ok(bitmap) => self.submit(RawInput::PasteFromClipboard { bitmap }).await,
            Err(error) => {
                self.state = FormState::Failed { mode, error };
                Ok(&self.state)
            }
        }
    }

    fn expect_mode(&self, actual: InputMode) -> Result<InputMode, AppError> {
        let expected = self.state.mode().ok_or(AppError::NoModeChosen)?;
        if expected != actual {
            return Err(AppError::ModeMismatch { expected, actual });
        }
        Ok(expected)
    }

    /// 渲染当前状态对应的用户消息。
    pub fn messages(&self) -> Vec<FormMessage> {
        let mut messages = Vec::new();

        if !self.paste_available {
            messages.push(FormMessage::new(
                MessageLevel::Warning,
                "未检测到可用的系统剪贴板，「从剪贴板粘贴」方式不可用",
            ));
        }

        match &self.state {
            FormState::NoSelectionYet => {
                messages.push(FormMessage::new(MessageLevel::Info, "👆 请选择一种方式提供图片"));
            }
            FormState::AwaitingInput(mode) => {
                messages.push(FormMessage::new(MessageLevel::Info, Self::prompt_for(*mode)));
                messages.push(FormMessage::new(MessageLevel::Info, "👆 请通过上面的方式选择一张图片"));
            }
            FormState::Resolved { mode, artifact } => {
                messages.push(FormMessage::new(MessageLevel::Success, Self::success_for(*mode)));

                let caption = match mode {
                    InputMode::PasteFromClipboard => "粘贴的图片",
                    InputMode::UploadFile | InputMode::EnterUrl => "选中的图片",
                };
                messages.push(FormMessage::new(
                    MessageLevel::Info,
                    format!("📸 {}：{}（{} 字节）", caption, artifact.filename(), artifact.len()),
                ));
                messages.push(FormMessage::new(MessageLevel::Info, "✨ 图片已就绪，可以继续处理！"));

                if let Some(metadata) = artifact.metadata() {
                    messages.push(FormMessage::new(
                        MessageLevel::Info,
                        format!("图片尺寸：{} x {} 像素", metadata.width, metadata.height),
                    ));
                    messages.push(FormMessage::new(
                        MessageLevel::Info,
                        format!("图片模式：{}", metadata.color_mode),
                    ));
                }
            }
            FormState::Failed { error, .. } => {
                messages.push(FormMessage::new(MessageLevel::Error, format!("❌ {}", error)));
            }
        }

        messages
    }

    /// 生成可序列化的结果报告。
    pub fn report(&self) -> FormReport {
        let artifact = self.selected_image();
        let error = match &self.state {
            FormState::Failed { error, .. } => Some(error),
            _ => None,
        };

        FormReport {
            mode: self.state.mode(),
            status: self.state.status(),
            filename: artifact.map(|a| a.filename().to_string()),
            byte_len: artifact.map(ImageArtifact::len),
            sniffed_mime: artifact.and_then(ImageArtifact::sniffed_mime),
            metadata: artifact.and_then(ImageArtifact::metadata),
            error_code: error.map(ResolutionError::code),
            error_message: error.map(|e| e.to_string()),
        }
    }

    fn prompt_for(mode: InputMode) -> &'static str {
        match mode {
            InputMode::UploadFile => "请选择一张图片（jpg / jpeg / png / gif / bmp / webp）",
            InputMode::EnterUrl => "请输入图片 URL",
            InputMode::PasteFromClipboard => "📋 先复制一张图片（Ctrl+C / Cmd+C），再执行粘贴",
        }
    }

    fn success_for(mode: InputMode) -> &'static str {
        match mode {
            InputMode::UploadFile => "文件上传成功！",
            InputMode::EnterUrl => "✅ 已从 URL 加载图片！",
            InputMode::PasteFromClipboard => "✅ 图片粘贴成功！",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_extension_filter_is_case_insensitive() {
        assert!(is_accepted_upload("photo.JPG"));
        assert!(is_accepted_upload("dir/anim.gif"));
        assert!(is_accepted_upload("a.webp"));
        assert!(!is_accepted_upload("notes.txt"));
        assert!(!is_accepted_upload("no_extension"));
    }

    #[test]
    fn upload_size_check_allows_exact_limit() {
        assert!(check_upload_size("a.png", 10, 10).is_ok());
        assert!(matches!(
            check_upload_size("a.png", 11, 10),
            Err(AppError::UploadTooLarge { size: 11, limit: 10, .. })
        ));
    }

    #[test]
    fn pending_states_report_pending_status() {
        assert_eq!(FormState::NoSelectionYet.status(), "pending");
        assert_eq!(FormState::AwaitingInput(InputMode::EnterUrl).status(), "pending");
        assert_eq!(FormState::AwaitingInput(InputMode::EnterUrl).mode(), Some(InputMode::EnterUrl));
    }
}
