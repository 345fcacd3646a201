//! # 图片输入工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │              展示层（CLI / 任意前端）                     │
//! │   选择方式 → 提供输入 → 渲染消息 / JSON 报告             │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↓ RawInput
//! ┌───────┴──────────────────────────────────────────────────┐
//! │  ┌─ form ───────── ImageInputForm 状态机 + 消息渲染        │
//! │  │                                                       │
//! │  ├─ image_source ── ImageSourceResolver                  │
//! │  │   ├─ loader       单次 GET + Content-Type 校验         │
//! │  │   ├─ pipeline     解码校验 / PNG 重新编码              │
//! │  │   └─ paste        剪贴板能力探测 + 粘贴捕获            │
//! │  │                                                       │
//! │  ├─ settings ────── JSON 设置装载                         │
//! │  └─ error ───────── AppError (统一错误类型)               │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 应用级错误 `AppError` |
//! | [`image_source`] | 输入方式、原始输入、解析产物与失败原因 |
//! | [`form`] | 表单状态机、动态菜单、用户消息与报告 |
//! | [`settings`] | 从 JSON 设置文件装载解析器配置 |

pub mod error;
pub mod form;
pub mod image_source;
pub mod settings;
