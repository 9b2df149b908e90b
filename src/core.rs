use chrono::{SecondsFormat, Utc};
use html5ever::tendril::format_tendril;
use markup5ever_rcdom::{Node, NodeData};
use std::error::Error;
use std::fmt;

use crate::html::{get_body_node, html_to_dom, serialize_document};
use crate::translation::config::{self, TranslationConfig};
use crate::translation::messages::{MessageRouter, Request, Response};
use crate::translation::patcher;
use crate::translation::Translator;

/// Represents errors that can occur during translayer processing
///
/// This error type encapsulates all possible errors that can occur
/// when processing a document with the translayer library.
#[derive(Debug)]
pub struct TranslayerError {
    details: String,
}

impl TranslayerError {
    /// Creates a new TranslayerError with the given message
    pub fn new(msg: &str) -> TranslayerError {
        TranslayerError {
            details: msg.to_string(),
        }
    }
}

impl fmt::Display for TranslayerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.details)
    }
}

impl Error for TranslayerError {}

/// Configuration options for document-level processing
///
/// This struct contains the options that control how an HTML document
/// is translated and what ends up in the output.
#[derive(Default, Clone)]
pub struct TranslayerOptions {
    /// Target language code; falls back to the built-in default when absent
    pub target_language: Option<String>,
    /// Translation endpoint base URL
    pub api_url: Option<String>,
    /// Subscription key sent with every remote call
    pub api_key: Option<String>,
    /// Document charset used for parsing and serialization
    pub encoding: Option<String>,
    /// Force a fresh remote pass even when cached results exist
    pub refresh: bool,
    /// Skip the metadata comment in translated output
    pub no_metadata: bool,
    /// Address of the page the document was loaded from
    pub page_url: Option<String>,
}

impl TranslayerOptions {
    /// Resolves the effective target language for this run
    pub fn effective_language(&self) -> String {
        self.target_language
            .clone()
            .unwrap_or_else(|| config::default_language().to_string())
    }

    /// Builds the translation configuration backing a run
    pub fn translation_config(&self) -> TranslationConfig {
        let mut translation_config =
            TranslationConfig::default_with_lang(&self.effective_language(), self.api_url.as_deref());
        translation_config.api_key = self.api_key.clone();
        translation_config
    }
}

/// Formats the metadata comment embedded into translated documents
pub fn create_metadata_comment(url: Option<&str>, target_language: &str) -> String {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    match url {
        Some(url) => format!(
            " Translated into {} by translayer v{} from {} at {} ",
            target_language,
            env!("CARGO_PKG_VERSION"),
            url,
            timestamp
        ),
        None => format!(
            " Translated into {} by translayer v{} at {} ",
            target_language,
            env!("CARGO_PKG_VERSION"),
            timestamp
        ),
    }
}

/// Translates the visible text of an HTML document
///
/// Parses the document, runs the page-translation pipeline against the
/// given backend, and serializes the patched tree. The returned bytes keep
/// every original node; translations are layered in as marked siblings.
pub async fn translate_html_document(
    data: &[u8],
    translator: &dyn Translator,
    options: &TranslayerOptions,
) -> Result<Vec<u8>, TranslayerError> {
    let encoding = options.encoding.as_deref().unwrap_or("UTF-8");
    let target_language = options.effective_language();

    let dom = html_to_dom(data, encoding);
    let body = get_body_node(&dom.document)
        .ok_or_else(|| TranslayerError::new("document has no body element"))?;

    let mut router = MessageRouter::new(translator, options.translation_config());

    if let Some(page_url) = &options.page_url {
        router.handle_navigation(&body, page_url);
    }

    let response = router
        .dispatch(
            &body,
            Request::TranslatePage {
                language: target_language.clone(),
                refresh_translation: options.refresh,
            },
        )
        .await
        .map_err(|e| TranslayerError::new(&e.to_string()))?;

    if !matches!(response, Response::Success { success: true }) {
        return Err(TranslayerError::new("translation pass did not complete"));
    }

    if !options.no_metadata {
        let comment = create_metadata_comment(options.page_url.as_deref(), &target_language);
        let comment_node = Node::new(NodeData::Comment {
            contents: format_tendril!("{}", comment),
        });
        dom.document.children.borrow_mut().insert(0, comment_node);
    }

    Ok(serialize_document(&dom, encoding))
}

/// Removes every translation artifact from an HTML document
///
/// Returns the cleaned document bytes together with the number of
/// synthetic nodes that were removed. Safe to run on documents that were
/// never translated.
pub fn strip_html_document(
    data: &[u8],
    options: &TranslayerOptions,
) -> Result<(Vec<u8>, usize), TranslayerError> {
    let encoding = options.encoding.as_deref().unwrap_or("UTF-8");

    let dom = html_to_dom(data, encoding);
    let removed = patcher::clear_translations(&dom.document);

    Ok((serialize_document(&dom, encoding), removed))
}

/// Reports whether an HTML document carries translation artifacts
pub fn inspect_html_document(
    data: &[u8],
    options: &TranslayerOptions,
) -> Result<bool, TranslayerError> {
    let encoding = options.encoding.as_deref().unwrap_or("UTF-8");

    let dom = html_to_dom(data, encoding);
    Ok(patcher::document_has_translations(&dom.document))
}
