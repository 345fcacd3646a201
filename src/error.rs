//! 统一错误类型模块
//!
//! # 设计思路
//!
//! `ResolutionError` 描述一次解析尝试的失败原因（用户可见、可重试）；
//! `AppError` 描述表单/命令行层面的误用与环境错误（读文件、设置、方式不匹配）。
//! 两者分开，避免把“输入不合法”与“图片不可用”混为一谈。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `ResolutionError` 与 `std::io::Error` 提供 `From` 转换，无需手动 map。
//! - 实现 `Serialize` 将错误序列化为字符串，便于 JSON 报告输出。

use serde::Serialize;

use crate::image_source::{InputMode, ResolutionError};

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 解析尝试失败（网络 / 非图片 / 解码 / 剪贴板）
    #[error("{0}")]
    Resolution(#[from] ResolutionError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 设置文件读取或校验失败
    #[error("设置无效: {0}")]
    Settings(String),

    /// 当前环境未提供该输入方式
    #[error("当前环境不提供输入方式：{0}")]
    ModeNotOffered(InputMode),

    /// 提交的输入与已选择的方式不一致
    #[error("输入方式不匹配：已选择「{expected}」，收到「{actual}」")]
    ModeMismatch { expected: InputMode, actual: InputMode },

    /// 尚未选择输入方式就提交
    #[error("请先选择输入方式")]
    NoModeChosen,

    /// 上传文件超过体积上限
    #[error("文件过大：{filename}（{size} 字节，限制：{limit} 字节）")]
    UploadTooLarge { filename: String, size: u64, limit: u64 },

    /// 上传文件扩展名不在允许列表内
    #[error("不支持的文件类型：{0}（可选：jpg / jpeg / png / gif / bmp / webp）")]
    UnsupportedUpload(String),
}

/// 将错误序列化为人类可读的字符串。
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
