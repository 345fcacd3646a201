//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载解析链路中的所有失败原因，替代异常式控制流。
//! 每个分支都是用户可见、非致命的，只终结当前这一次尝试，用户可以立即换输入重试。
//! 通过 `thiserror` 保持人类可读消息，同时让展示层可以按分支穷尽匹配。

/// 图片来源解析失败原因。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    /// 传输层失败：URL 非法、DNS、连接、超时、非 2xx 状态码等。
    #[error("获取 URL 失败：{0}")]
    NetworkError(String),

    /// 响应声明的内容类型不是 `image/*`，携带原始声明值。
    #[error("该 URL 指向的不是有效图片（Content-Type：{0:?}），请检查后重试")]
    NotAnImage(String),

    /// 响应体无法被解码为图片。
    #[error("无法处理该 URL 返回的图片：{0}")]
    DecodeError(String),

    /// 当前环境不具备剪贴板粘贴能力。
    #[error("当前环境不支持从剪贴板粘贴图片")]
    ClipboardUnavailable,

    /// 粘贴得到的位图无法重新编码。
    #[error("处理粘贴图片失败：{0}")]
    PasteDecodeError(String),
}

impl ResolutionError {
    /// 稳定的错误码，供 JSON 报告与前端分支使用。
    pub fn code(&self) -> &'static str {
        match self {
            Self::NetworkError(_) => "network_error",
            Self::NotAnImage(_) => "not_an_image",
            Self::DecodeError(_) => "decode_error",
            Self::ClipboardUnavailable => "clipboard_unavailable",
            Self::PasteDecodeError(_) => "paste_decode_error",
        }
    }
}

impl From<ResolutionError> for String {
    fn from(error: ResolutionError) -> Self {
        error.to_string()
    }
}
