//! 远程翻译服务客户端
//!
//! 封装对翻译 API 的批量调用：请求体为 `[{"text": …}, …]`，目标语言通过
//! 查询参数传递，响应为 `[{"translations": [{"text": …}]}, …]`。
//! 非 2xx 响应或结构不符的响应体整体视为该次调用失败。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::translation::config::TranslationConfig;
use crate::translation::error::{TranslationError, TranslationResult};

/// 翻译后端接口
///
/// 批次调度器只依赖该接口；测试中以脚本化实现替换网络调用。
#[async_trait]
pub trait Translator {
    /// 翻译一批文本，返回与输入等长、顺序对应的译文列表
    async fn translate_batch(
        &self,
        texts: &[String],
        target_language: &str,
    ) -> TranslationResult<Vec<String>>;
}

/// 请求体中的单条文本
#[derive(Debug, Serialize)]
struct RequestItem {
    text: String,
}

/// 响应中的单条译文
#[derive(Debug, Deserialize)]
struct TranslationItem {
    text: String,
}

/// 响应中的单个条目，嵌套一组译文
#[derive(Debug, Deserialize)]
struct ResponseItem {
    translations: Vec<TranslationItem>,
}

/// 基于 reqwest 的远程翻译客户端
pub struct RemoteTranslator {
    client: reqwest::Client,
    config: TranslationConfig,
}

impl RemoteTranslator {
    /// 创建远程客户端
    pub fn new(config: TranslationConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// 构造翻译请求地址
    fn endpoint_url(&self, target_language: &str) -> String {
        format!(
            "{}/translate?api-version=3.0&to={}",
            self.config.api_url.trim_end_matches('/'),
            target_language
        )
    }
}

#[async_trait]
impl Translator for RemoteTranslator {
    async fn translate_batch(
        &self,
        texts: &[String],
        target_language: &str,
    ) -> TranslationResult<Vec<String>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let body: Vec<RequestItem> = texts
            .iter()
            .map(|text| RequestItem { text: text.clone() })
            .collect();

        let mut request = self.client.post(self.endpoint_url(target_language)).json(&body);

        if let Some(key) = &self.config.api_key {
            request = request.header("Ocp-Apim-Subscription-Key", key);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(TranslationError::ApiError(format!(
                "HTTP {}: {}",
                status, error_body
            )));
        }

        let items: Vec<ResponseItem> = response
            .json()
            .await
            .map_err(|e| TranslationError::MalformedResponse(e.to_string()))?;

        items
            .into_iter()
            .map(|item| {
                item.translations
                    .into_iter()
                    .next()
                    .map(|t| t.text)
                    .ok_or_else(|| {
                        TranslationError::MalformedResponse("译文条目为空".to_string())
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_shape() {
        let translator = RemoteTranslator::new(TranslationConfig::default_with_lang(
            "ja",
            Some("http://localhost:1188"),
        ));

        assert_eq!(
            translator.endpoint_url("ja"),
            "http://localhost:1188/translate?api-version=3.0&to=ja"
        );
    }

    #[test]
    fn test_request_body_serialization() {
        let body = vec![
            RequestItem { text: "Hello".to_string() },
            RequestItem { text: "World".to_string() },
        ];
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"[{"text":"Hello"},{"text":"World"}]"#);
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"[
            {"translations": [{"text": "你好", "to": "zh-Hans"}]},
            {"translations": [{"text": "世界", "to": "zh-Hans"}]}
        ]"#;

        let items: Vec<ResponseItem> = serde_json::from_str(raw).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].translations[0].text, "你好");
        assert_eq!(items[1].translations[0].text, "世界");
    }

    #[test]
    fn test_response_parsing_rejects_non_array() {
        let raw = r#"{"error": {"code": 401000, "message": "denied"}}"#;
        let parsed: Result<Vec<ResponseItem>, _> = serde_json::from_str(raw);
        assert!(parsed.is_err(), "Non-array response body must not parse");
    }
}
