//! # 剪贴板粘贴模块
//!
//! ## 设计思路
//!
//! 剪贴板能力是进程级、启动后只读的布尔标志：首次访问时探测一次，之后只读。
//! 粘贴捕获通过 `PasteCapture` trait 抽象，系统实现基于 `arboard`，
//! 测试可注入闭包替身，避免依赖真实桌面环境。
//!
//! ## 实现思路
//!
//! - 能否打开剪贴板句柄即视为能力可用。
//! - 剪贴板里没有图片（`ContentNotAvailable`）返回 `Ok(None)`，不算错误。

use once_cell::sync::OnceCell;

use super::source::PastedBitmap;
use super::ResolutionError;

static PASTE_AVAILABLE: OnceCell<bool> = OnceCell::new();

/// 读取进程级剪贴板能力标志（首次调用时探测）。
pub fn paste_capability() -> bool {
    *PASTE_AVAILABLE.get_or_init(detect_paste_capability)
}

fn detect_paste_capability() -> bool {
    match arboard::Clipboard::new() {
        Ok(_) => {
            log::info!("📋 剪贴板能力可用");
            true
        }
        Err(err) => {
            log::warn!("剪贴板能力不可用，粘贴方式将不会提供：{}", err);
            false
        }
    }
}

/// 粘贴捕获交互。
pub trait PasteCapture {
    /// 捕获一张位图；没有图片或用户取消时返回 `Ok(None)`。
    fn capture(&mut self) -> Result<Option<PastedBitmap>, ResolutionError>;
}

impl<F> PasteCapture for F
where
    F: FnMut() -> Result<Option<PastedBitmap>, ResolutionError>,
{
    fn capture(&mut self) -> Result<Option<PastedBitmap>, ResolutionError> {
        self()
    }
}

/// 基于系统剪贴板（`arboard`）的捕获实现。
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl PasteCapture for SystemClipboard {
    fn capture(&mut self) -> Result<Option<PastedBitmap>, ResolutionError> {
        let mut clipboard = arboard::Clipboard::new().map_err(|err| {
            log::debug!("打开剪贴板失败：{}", err);
            ResolutionError::ClipboardUnavailable
        })?;

        match clipboard.get_image() {
            Ok(data) => {
                log::debug!("📋 捕获剪贴板图片 {}x{}", data.width, data.height);
                Ok(Some(PastedBitmap {
                    width: data.width,
                    height: data.height,
                    rgba: data.bytes.into_owned(),
                }))
            }
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(err) => Err(ResolutionError::PasteDecodeError(format!(
                "读取剪贴板图片失败：{}",
                err
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_act_as_capture_doubles() {
        let mut empty = || -> Result<Option<PastedBitmap>, ResolutionError> { Ok(None) };
        let mut failing =
            || -> Result<Option<PastedBitmap>, ResolutionError> { Err(ResolutionError::ClipboardUnavailable) };

        assert_eq!(empty.capture(), Ok(None));
        assert_eq!(failing.capture(), Err(ResolutionError::ClipboardUnavailable));
    }

    #[test]
    fn capability_is_stable_across_reads() {
        let first = paste_capability();

        assert_eq!(paste_capability(), first);
    }
}
