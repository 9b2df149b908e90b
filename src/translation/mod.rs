//! 翻译模块
//!
//! 页面翻译的完整流程：发现 → 过滤 → 成组 → 批次调度 → DOM 补丁 → 页面缓存。
//!
//! - **pipeline**: 文本处理管道（发现、过滤、成组、调度）
//! - **patcher**: DOM 补丁与清除
//! - **cache**: 页面级翻译缓存
//! - **session**: 页面会话与生命周期
//! - **messages**: 四方法的类型化命令接口
//! - **client**: 远程翻译服务客户端
//! - **config**: 常量、运行配置与语言偏好
//! - **error**: 错误处理
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use translayer::html::{get_body_node, html_to_dom};
//! use translayer::translation::{
//!     client::RemoteTranslator, config::TranslationConfig, session::PageSession,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dom = html_to_dom(b"<html><body><p>Hello</p></body></html>", "UTF-8");
//! let body = get_body_node(&dom.document).unwrap();
//!
//! let config = TranslationConfig::default_with_lang("zh-Hans", None);
//! let translator = RemoteTranslator::new(config.clone());
//! let mut session = PageSession::new(config);
//!
//! session.translate_page(&body, &translator, "zh-Hans", false).await?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod messages;
pub mod patcher;
pub mod pipeline;
pub mod session;

pub use cache::{CacheStats, PageCache};
pub use client::{RemoteTranslator, Translator};
pub use config::{Preferences, TranslationConfig};
pub use error::{TranslationError, TranslationResult};
pub use messages::{MessageRouter, Request, Response};
pub use patcher::AnchorState;
pub use pipeline::{Anchor, BatchDispatcher, BlockGrouper, TextFilter, TranslationUnit};
pub use session::{PageSession, PassSummary};

/// 便利函数：检查文本是否应该翻译
pub fn should_translate(text: &str) -> bool {
    let filter = pipeline::TextFilter::new();
    filter.needs_translation(text, None)
}
