//! # 解码与编码模块
//!
//! ## 设计思路
//!
//! 集中处理“字节 → 图片”的解码校验与“位图 → PNG 字节”的重新编码。
//! 校验解码只用于判定可用性与提取元信息，解码后的像素不会保留。
//!
//! ## 实现思路
//!
//! 1. 猜测格式后完整解码（`ImageReader::with_guessed_format`）
//! 2. 元信息解码失败时静默返回 `None`
//! 3. 粘贴位图先校验 `width * height * 4` 与字节长度一致，再编码为 PNG

use std::io::Cursor;

use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader, RgbaImage};

use super::source::{ColorMode, ImageMetadata, PastedBitmap};
use super::{ImageSourceResolver, ResolutionError};

impl ImageSourceResolver {
    /// 完整解码以校验字节确实是图片，并返回元信息。
    pub(crate) fn decode_for_validation(bytes: &[u8]) -> Result<ImageMetadata, ResolutionError> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| ResolutionError::DecodeError(format!("无法识别图片格式：{}", e)))?;

        let decoded = reader
            .decode()
            .map_err(|e| ResolutionError::DecodeError(e.to_string()))?;

        Ok(Self::metadata_of(&decoded))
    }

    /// 仅用于展示的元信息提取，失败时不报告错误。
    pub(crate) fn inspect_metadata(bytes: &[u8]) -> Option<ImageMetadata> {
        match Self::decode_for_validation(bytes) {
            Ok(metadata) => Some(metadata),
            Err(err) => {
                log::debug!("元信息解码失败，忽略：{}", err);
                None
            }
        }
    }

    /// 将粘贴得到的 RGBA 位图重新编码为 PNG 字节。
    pub(crate) fn encode_pasted_bitmap(
        bitmap: &PastedBitmap,
    ) -> Result<(Vec<u8>, ImageMetadata), ResolutionError> {
        if bitmap.width == 0 || bitmap.height == 0 {
            return Err(ResolutionError::PasteDecodeError(format!(
                "位图尺寸无效：{}x{}",
                bitmap.width, bitmap.height
            )));
        }

        let expected_len = bitmap
            .width
            .checked_mul(bitmap.height)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| ResolutionError::PasteDecodeError("位图尺寸溢出".to_string()))?;

        if bitmap.rgba.len() != expected_len {
            return Err(ResolutionError::PasteDecodeError(format!(
                "位图字节长度不匹配：期望 {}，实际 {}",
                expected_len,
                bitmap.rgba.len()
            )));
        }

        let width = u32::try_from(bitmap.width)
            .map_err(|_| ResolutionError::PasteDecodeError("位图宽度超出范围".to_string()))?;
        let height = u32::try_from(bitmap.height)
            .map_err(|_| ResolutionError::PasteDecodeError("位图高度超出范围".to_string()))?;

        let image = RgbaImage::from_raw(width, height, bitmap.rgba.clone())
            .ok_or_else(|| ResolutionError::PasteDecodeError("创建图像缓冲区失败".to_string()))?;

        let mut cursor = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(image)
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|e| ResolutionError::PasteDecodeError(format!("PNG 编码失败：{}", e)))?;

        let metadata = ImageMetadata {
            width,
            height,
            color_mode: ColorMode::Rgba,
        };

        Ok((cursor.into_inner(), metadata))
    }

    fn metadata_of(image: &DynamicImage) -> ImageMetadata {
        let (width, height) = image.dimensions();
        ImageMetadata {
            width,
            height,
            color_mode: ColorMode::from(image.color()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn create_rgb_png(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_fn(width, height, |x, y| Rgb([(x % 255) as u8, (y % 255) as u8, 0]));
        let mut cursor = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut cursor, ImageFormat::Png)
            .expect("failed to encode test image");
        cursor.into_inner()
    }

    #[test]
    fn decode_for_validation_reports_size_and_mode() {
        let png = create_rgb_png(12, 7);

        let metadata = ImageSourceResolver::decode_for_validation(&png).expect("decode should succeed");

        assert_eq!((metadata.width, metadata.height), (12, 7));
        assert_eq!(metadata.color_mode, ColorMode::Rgb);
    }

    #[test]
    fn decode_for_validation_rejects_garbage() {
        let result = ImageSourceResolver::decode_for_validation(b"hello world");

        assert!(matches!(result, Err(ResolutionError::DecodeError(_))));
    }

    #[test]
    fn inspect_metadata_swallows_decode_failure() {
        assert_eq!(ImageSourceResolver::inspect_metadata(b"not an image"), None);
    }

    #[test]
    fn encode_pasted_bitmap_produces_decodable_png() {
        let bitmap = PastedBitmap {
            width: 3,
            height: 2,
            rgba: vec![200; 3 * 2 * 4],
        };

        let (png, metadata) = ImageSourceResolver::encode_pasted_bitmap(&bitmap).expect("encode should succeed");

        assert_eq!(image::guess_format(&png).expect("guess format failed"), ImageFormat::Png);
        assert_eq!((metadata.width, metadata.height), (3, 2));
        let decoded = image::load_from_memory(&png).expect("png should decode");
        assert_eq!(decoded.dimensions(), (3, 2));
    }

    #[test]
    fn encode_pasted_bitmap_rejects_length_mismatch() {
        let bitmap = PastedBitmap {
            width: 4,
            height: 4,
            rgba: vec![0; 10],
        };

        let result = ImageSourceResolver::encode_pasted_bitmap(&bitmap);

        assert!(matches!(result, Err(ResolutionError::PasteDecodeError(_))));
    }

    #[test]
    fn encode_pasted_bitmap_rejects_empty_dimensions() {
        let bitmap = PastedBitmap {
            width: 0,
            height: 5,
            rgba: Vec::new(),
        };

        assert!(matches!(
            ImageSourceResolver::encode_pasted_bitmap(&bitmap),
            Err(ResolutionError::PasteDecodeError(_))
        ));
    }
}
