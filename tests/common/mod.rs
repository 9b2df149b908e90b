//! 集成测试公共设施
//!
//! HTML 测试辅助与脚本化的翻译后端。

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use markup5ever_rcdom::{Handle, RcDom};

use translayer::html::{get_body_node, html_to_dom, node_text};
use translayer::translation::error::{TranslationError, TranslationResult};
use translayer::translation::Translator;

/// HTML 测试辅助
pub struct HtmlTestHelper;

impl HtmlTestHelper {
    /// 解析测试文档
    pub fn create_test_dom(html: &str) -> RcDom {
        html_to_dom(html.as_bytes(), "UTF-8")
    }

    /// 解析并返回 body 节点
    pub fn create_test_body(html: &str) -> (RcDom, Handle) {
        let dom = Self::create_test_dom(html);
        let body = get_body_node(&dom.document).expect("Test document should have a body");
        (dom, body)
    }

    /// 简单英文页面
    pub fn simple_english_page() -> &'static str {
        "<html><head><title>Test Page</title></head><body>\
         <h1>Welcome to Test</h1>\
         <p>This is a test paragraph with enough text.</p>\
         <p>Another paragraph with <b>bold</b> fragments inside.</p>\
         <pre>fn main() { println!(\"skipped\"); }</pre>\
         <p>12345</p>\
         </body></html>"
    }

    /// 收集 body 的可见文本（去除多余空白）
    pub fn visible_text(body: &Handle) -> String {
        node_text(body)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// 脚本化翻译后端
///
/// 优先使用词表中的固定译文，其余回显加标记；可按调用序号注入失败。
pub struct MockTranslator {
    dictionary: HashMap<String, String>,
    fail_calls: Vec<usize>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl MockTranslator {
    /// 创建回显后端
    pub fn new() -> Self {
        Self {
            dictionary: HashMap::new(),
            fail_calls: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// 附带固定词表
    pub fn with_dictionary(pairs: &[(&str, &str)]) -> Self {
        let mut translator = Self::new();
        for (original, translated) in pairs {
            translator
                .dictionary
                .insert(original.to_string(), translated.to_string());
        }
        translator
    }

    /// 指定第 N 次调用（从 1 计数）返回网络错误
    pub fn fail_on_calls(mut self, calls: Vec<usize>) -> Self {
        self.fail_calls = calls;
        self
    }

    /// 已发出的调用次数
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// 每次调用的输入大小
    pub fn call_sizes(&self) -> Vec<usize> {
        self.calls.lock().unwrap().iter().map(|c| c.len()).collect()
    }

    /// 所有调用送出的文本（按调用顺序拼接）
    pub fn sent_texts(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().flatten().cloned().collect()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate_batch(
        &self,
        texts: &[String],
        _target_language: &str,
    ) -> TranslationResult<Vec<String>> {
        let call_index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(texts.to_vec());
            calls.len()
        };

        if self.fail_calls.contains(&call_index) {
            return Err(TranslationError::NetworkError(format!(
                "scripted failure on call {}",
                call_index
            )));
        }

        Ok(texts
            .iter()
            .map(|text| {
                self.dictionary
                    .get(text)
                    .cloned()
                    .unwrap_or_else(|| format!("译[{}]", text))
            })
            .collect())
    }
}
