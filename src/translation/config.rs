//! 翻译配置管理模块
//!
//! 提供翻译管道的常量、运行配置、语言表以及语言偏好的持久化。

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::translation::error::{TranslationError, TranslationResult};

/// 配置常量
pub mod constants {
    /// 单个批次最多包含的文本条数
    pub const MAX_BATCH_TEXTS: usize = 100;

    /// 低于等于该字符数的文本不参与翻译
    pub const MIN_TEXT_LENGTH: usize = 2;

    /// 行内元素：成组时继续向上查找块级容器
    pub const INLINE_ELEMENTS: &[&str] = &["strong", "b", "em", "i", "code", "small"];

    /// 跳过的元素：其子树中的文本一律不收集
    pub const SKIP_ELEMENTS: &[&str] = &["script", "style", "pre", "code", "noscript"];

    /// 纯符号文本的匹配模式
    pub const SYMBOL_ONLY_PATTERN: &str = r#"^[!@#$%^&*()_+\-=\[\]{};':"\\|,.<>/?]+$"#;

    /// 纯数字文本的匹配模式
    pub const DIGITS_ONLY_PATTERN: &str = r"^\d+$";

    /// 容器上的「已翻译」标记属性
    pub const ATTR_TRANSLATED: &str = "data-translated";

    /// 合成节点上的「本次添加」标记属性
    pub const ATTR_TRANSLATION_ADDED: &str = "data-translation-added";

    /// 默认翻译服务地址
    pub const DEFAULT_API_URL: &str = "https://api.cognitive.microsofttranslator.com";

    /// 默认目标语言
    pub const DEFAULT_TARGET_LANGUAGE: &str = "zh-Hans";

    /// 偏好文件名
    pub const PREFERENCES_FILE: &str = "preferences.toml";
}

/// 支持的目标语言表（代码，名称）
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("zh-Hans", "中文（简体）"),
    ("es", "Español"),
    ("ja", "日本語"),
    ("ru", "Русский"),
    ("de", "Deutsch"),
    ("fr", "Français"),
    ("en", "English"),
    ("ko", "한국어"),
    ("it", "Italiano"),
    ("pt", "Português"),
];

/// 查询语言名称
pub fn language_name(code: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// 检查语言代码是否受支持
pub fn is_supported_language(code: &str) -> bool {
    language_name(code).is_some()
}

/// 根据系统区域设置推断默认目标语言
///
/// 取 `LC_ALL` / `LANG` 的主语言子标签，在语言表中前缀匹配；无匹配时回退英语。
pub fn default_language() -> &'static str {
    let locale = std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LANG"))
        .unwrap_or_default();

    language_for_locale(&locale)
}

/// 区域设置字符串到语言代码的映射
pub fn language_for_locale(locale: &str) -> &'static str {
    let primary = locale
        .split(['.', '@'])
        .next()
        .unwrap_or("")
        .split(['-', '_'])
        .next()
        .unwrap_or("");

    if primary.is_empty() {
        return "en";
    }

    SUPPORTED_LANGUAGES
        .iter()
        .find(|(code, _)| code.starts_with(primary))
        .map(|(code, _)| *code)
        .unwrap_or("en")
}

/// 翻译运行配置
#[derive(Debug, Clone)]
pub struct TranslationConfig {
    /// 翻译服务地址
    pub api_url: String,
    /// 订阅密钥（缺省时请求不带密钥头，便于对接本地服务）
    pub api_key: Option<String>,
    /// 目标语言代码
    pub target_language: String,
    /// 单批最大文本条数
    pub batch_size: usize,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_url: constants::DEFAULT_API_URL.to_string(),
            api_key: None,
            target_language: constants::DEFAULT_TARGET_LANGUAGE.to_string(),
            batch_size: constants::MAX_BATCH_TEXTS,
        }
    }
}

impl TranslationConfig {
    /// 使用指定目标语言创建配置
    pub fn default_with_lang(target_lang: &str, api_url: Option<&str>) -> Self {
        Self {
            api_url: api_url
                .unwrap_or(constants::DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            target_language: target_lang.to_string(),
            ..Default::default()
        }
    }
}

/// 持久化的用户偏好
///
/// 仅一项：上次选择的目标语言。后写覆盖先写，不做版本管理。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(rename = "lastSelectedLanguage", skip_serializing_if = "Option::is_none")]
    pub last_selected_language: Option<String>,
}

/// 默认偏好文件路径
pub fn preferences_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "translayer")
        .map(|dirs| dirs.config_dir().join(constants::PREFERENCES_FILE))
}

/// 从指定路径读取偏好；文件缺失时返回默认值
pub fn load_preferences(path: &Path) -> TranslationResult<Preferences> {
    if !path.exists() {
        return Ok(Preferences::default());
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| TranslationError::ConfigError(format!("读取偏好文件失败: {}", e)))?;

    Ok(toml::from_str(&contents)?)
}

/// 将偏好写入指定路径，父目录按需创建
pub fn save_preferences(path: &Path, prefs: &Preferences) -> TranslationResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| TranslationError::ConfigError(format!("创建配置目录失败: {}", e)))?;
    }

    let contents = toml::to_string_pretty(prefs)
        .map_err(|e| TranslationError::SerializationError(format!("序列化偏好失败: {}", e)))?;

    fs::write(path, contents)
        .map_err(|e| TranslationError::ConfigError(format!("写入偏好文件失败: {}", e)))?;

    Ok(())
}

/// 读取上次选择的语言（无记录时返回 None）
pub fn load_last_language() -> Option<String> {
    let path = preferences_path()?;
    match load_preferences(&path) {
        Ok(prefs) => prefs.last_selected_language,
        Err(e) => {
            tracing::warn!("读取语言偏好失败: {}", e);
            None
        }
    }
}

/// 记录本次选择的语言
pub fn store_last_language(code: &str) {
    let Some(path) = preferences_path() else {
        tracing::warn!("无法确定配置目录，语言偏好未保存");
        return;
    };

    let mut prefs = load_preferences(&path).unwrap_or_default();
    prefs.last_selected_language = Some(code.to_string());

    if let Err(e) = save_preferences(&path, &prefs) {
        tracing::warn!("保存语言偏好失败: {}", e);
    }
}
