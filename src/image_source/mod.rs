//! # 图片来源解析模块（image_source）
//!
//! ## 设计思路
//!
//! 该模块把“用户选择输入方式 → 给出原始负载 → 得到产物或失败原因”的决策集中在一处，
//! 按职责拆分为多个子模块：
//!
//! - `resolver`：编排三种输入方式的解析流程
//! - `loader`：URL 的单次请求与内容类型校验
//! - `pipeline`：解码校验、元信息提取、粘贴位图重新编码
//! - `paste`：剪贴板能力探测与粘贴捕获抽象
//! - `mode/config/error/source`：输入方式、配置、错误、数据模型
//!
//! ## 调用链
//!
//! ```text
//! 展示层（form / CLI）
//!    ↓ RawInput + 剪贴板能力
//! resolver.rs（按方式分派 + 耗时日志）
//!    ├─ loader.rs（GET + 状态码 + Content-Type）
//!    └─ pipeline.rs（解码校验 / PNG 编码）
//!    ↓
//! Option<ResolutionOutcome>
//! ```

mod config;
mod error;
mod loader;
mod mode;
mod paste;
mod pipeline;
mod resolver;
mod source;

pub use config::{
    DEFAULT_FETCH_TIMEOUT_SECS, MAX_FETCH_TIMEOUT_SECS, PASTED_IMAGE_FILENAME, ResolverConfig,
    URL_IMAGE_FILENAME,
};
pub use error::ResolutionError;
pub use loader::is_image_content_type;
pub use mode::{InputMode, offered_modes};
pub use paste::{PasteCapture, SystemClipboard, paste_capability};
pub use resolver::ImageSourceResolver;
pub use source::{ColorMode, ImageArtifact, ImageMetadata, PastedBitmap, RawInput, ResolutionOutcome};
