//! # Translayer Library
//!
//! 将机器翻译以叠加层的形式写入 HTML 文档的工具库：
//! 遍历可见文本、分批调用远程翻译服务、把译文作为标记过的合成节点
//! 挂回原文旁，并支持一键撤销恢复原始页面。
//!
//! ## 模块组织
//!
//! - `core` - 核心功能和文档级处理入口
//! - `html` - DOM 解析、序列化与节点操作
//! - `translation` - 翻译管道、缓存、会话与消息接口

pub mod core;
pub mod html;
pub mod translation;

// Re-export commonly used items for convenience
pub use crate::core::*;
