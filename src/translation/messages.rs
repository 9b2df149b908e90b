//! 消息命令模块
//!
//! 页面逻辑与外层调用方（CLI、弹窗等）之间的请求/响应接口：
//! 四个方法的类型化 RPC。字段名与线上格式保持一致
//! （`action` / `targetLanguage` / `translatedTexts` / `hasTranslation`），
//! 分发统一走返回 `Result` 的异步路径。

use markup5ever_rcdom::Handle;
use serde::{Deserialize, Serialize};

use crate::translation::client::Translator;
use crate::translation::config::TranslationConfig;
use crate::translation::error::TranslationResult;
use crate::translation::session::PageSession;

/// 请求：`action` 字段区分的四种命令
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum Request {
    /// 直接翻译一批文本
    #[serde(rename = "translateBatch")]
    TranslateBatch {
        texts: Vec<String>,
        #[serde(rename = "targetLanguage")]
        target_language: String,
    },

    /// 翻译整个页面
    #[serde(rename = "translatePage")]
    TranslatePage {
        language: String,
        #[serde(rename = "refreshTranslation", default)]
        refresh_translation: bool,
    },

    /// 查询页面是否已翻译
    #[serde(rename = "checkTranslation")]
    CheckTranslation,

    /// 移除页面上的全部译文
    #[serde(rename = "removeTranslation")]
    RemoveTranslation,
}

/// 响应：与请求一一对应的载荷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    /// `translateBatch` 的译文列表
    TranslatedTexts {
        #[serde(rename = "translatedTexts")]
        translated_texts: Vec<String>,
    },

    /// `checkTranslation` 的查询结果
    HasTranslation {
        #[serde(rename = "hasTranslation")]
        has_translation: bool,
    },

    /// `translatePage` / `removeTranslation` 的完成确认
    Success { success: bool },

    /// 错误载荷（供需要把失败序列化回线上格式的调用方使用）
    Error { error: String },
}

impl Response {
    /// 将分发结果折叠为可序列化的响应，错误转为 `{"error": …}` 载荷
    pub fn from_result(result: TranslationResult<Response>) -> Response {
        match result {
            Ok(response) => response,
            Err(e) => Response::Error {
                error: e.to_string(),
            },
        }
    }
}

/// 消息路由器
///
/// 持有页面会话并把命令派发到对应的生命周期入口。
pub struct MessageRouter<'a> {
    session: PageSession,
    translator: &'a dyn Translator,
}

impl<'a> MessageRouter<'a> {
    /// 创建路由器
    pub fn new(translator: &'a dyn Translator, config: TranslationConfig) -> Self {
        Self {
            session: PageSession::new(config),
            translator,
        }
    }

    /// 页面导航透传
    pub fn handle_navigation(&mut self, root: &Handle, new_url: &str) {
        self.session.handle_navigation(root, new_url);
    }

    /// 分发一条命令
    ///
    /// 所有失败以 `Err` 返回；调用方负责复位自身的忙碌指示，
    /// 需要线上格式时可用 [`Response::from_result`] 折叠。
    pub async fn dispatch(
        &mut self,
        root: &Handle,
        request: Request,
    ) -> TranslationResult<Response> {
        match request {
            Request::TranslateBatch {
                texts,
                target_language,
            } => {
                let translated_texts = self
                    .translator
                    .translate_batch(&texts, &target_language)
                    .await?;
                Ok(Response::TranslatedTexts { translated_texts })
            }

            Request::TranslatePage {
                language,
                refresh_translation,
            } => {
                let summary = self
                    .session
                    .translate_page(root, self.translator, &language, refresh_translation)
                    .await?;
                tracing::debug!(
                    "translatePage 完成: {} 批次, {} 补丁, {} 缓存命中",
                    summary.batches_total,
                    summary.units_patched,
                    summary.units_from_cache
                );
                Ok(Response::Success { success: true })
            }

            Request::CheckTranslation => Ok(Response::HasTranslation {
                has_translation: self.session.has_translations(),
            }),

            Request::RemoveTranslation => {
                self.session.remove_translations(root);
                Ok(Response::Success { success: true })
            }
        }
    }

    /// 会话的只读访问
    pub fn session(&self) -> &PageSession {
        &self.session
    }
}
