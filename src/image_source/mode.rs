//! # 输入方式
//!
//! 可选输入方式依赖启动时探测到的剪贴板能力：能力缺失时“从剪贴板粘贴”不出现在菜单里。

use std::fmt;

use serde::Serialize;

/// 用户选择的图片输入方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    UploadFile,
    EnterUrl,
    PasteFromClipboard,
}

const WITH_PASTE: [InputMode; 3] = [
    InputMode::UploadFile,
    InputMode::EnterUrl,
    InputMode::PasteFromClipboard,
];
const WITHOUT_PASTE: [InputMode; 2] = [InputMode::UploadFile, InputMode::EnterUrl];

impl InputMode {
    pub const ALL: [InputMode; 3] = WITH_PASTE;

    /// 菜单展示文案。
    pub fn label(self) -> &'static str {
        match self {
            Self::UploadFile => "上传文件",
            Self::EnterUrl => "输入 URL",
            Self::PasteFromClipboard => "从剪贴板粘贴",
        }
    }

    /// 命令行与报告中使用的稳定标识。
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UploadFile => "upload_file",
            Self::EnterUrl => "enter_url",
            Self::PasteFromClipboard => "paste_from_clipboard",
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 根据剪贴板能力构建可选输入方式（动态菜单）。
pub fn offered_modes(paste_available: bool) -> &'static [InputMode] {
    if paste_available {
        &WITH_PASTE
    } else {
        &WITHOUT_PASTE
    }
}
