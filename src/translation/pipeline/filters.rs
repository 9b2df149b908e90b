//! 文本过滤器模块
//!
//! 判断文本是否值得送往翻译服务。这是一组启发式规则而非语言学分类器，
//! 误判（表情符号、非拉丁单字符、形似日期的数字串等）属于接受范围。

use std::sync::OnceLock;

use markup5ever_rcdom::Handle;
use regex::Regex;

use crate::translation::config::constants;
use crate::translation::patcher;

/// 文本过滤器
///
/// 规则按序执行，命中即返回：
/// 1. 所属元素（或其容器）已带翻译标记，或包含带标记的后代 → 拒绝；
/// 2. 去除首尾空白后长度不超过 2 个字符 → 拒绝；
/// 3. 纯数字 → 拒绝；
/// 4. 纯符号 → 拒绝；
/// 5. 单字符且不是 ASCII 字母 → 拒绝；
/// 6. 其余接受。
pub struct TextFilter {
    regex_cache: RegexCache,
}

/// 缓存的正则表达式
#[derive(Default)]
struct RegexCache {
    digits_regex: OnceLock<Regex>,
    symbols_regex: OnceLock<Regex>,
}

impl TextFilter {
    /// 创建新的文本过滤器
    pub fn new() -> Self {
        Self {
            regex_cache: RegexCache::default(),
        }
    }

    /// 判断文本是否需要翻译
    pub fn needs_translation(&self, text: &str, owner: Option<&Handle>) -> bool {
        // 已翻译区域不再送翻，避免重复打补丁
        if let Some(element) = owner {
            if patcher::subtree_contains_translation(element) {
                return false;
            }
        }

        let trimmed = text.trim();

        if trimmed.chars().count() <= constants::MIN_TEXT_LENGTH {
            return false;
        }

        if self.is_all_digits(trimmed) {
            return false;
        }

        if self.is_all_symbols(trimmed) {
            return false;
        }

        if !self.single_char_is_translatable(trimmed) {
            return false;
        }

        true
    }

    /// 检查是否为纯数字
    fn is_all_digits(&self, text: &str) -> bool {
        let regex = self.regex_cache.digits_regex.get_or_init(|| {
            Regex::new(constants::DIGITS_ONLY_PATTERN).expect("数字模式应当可编译")
        });
        regex.is_match(text)
    }

    /// 检查是否为纯符号
    fn is_all_symbols(&self, text: &str) -> bool {
        let regex = self.regex_cache.symbols_regex.get_or_init(|| {
            Regex::new(constants::SYMBOL_ONLY_PATTERN).expect("符号模式应当可编译")
        });
        regex.is_match(text)
    }

    /// 单字符文本仅当是 ASCII 字母时放行
    pub fn single_char_is_translatable(&self, text: &str) -> bool {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c.is_ascii_alphabetic(),
            _ => true,
        }
    }
}

impl Default for TextFilter {
    fn default() -> Self {
        Self::new()
    }
}
