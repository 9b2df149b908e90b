//! 页面会话模块
//!
//! 每个加载的页面实例对应一个 `PageSession`，显式持有本页的可变状态：
//! 当前地址、翻译缓存、已翻译标志。生命周期入口只有三个：
//! 导航（`handle_navigation`）、翻译请求（`translate_page`）、
//! 清除请求（`remove_translations`）。

use markup5ever_rcdom::Handle;

use crate::translation::cache::PageCache;
use crate::translation::client::Translator;
use crate::translation::config::TranslationConfig;
use crate::translation::error::TranslationResult;
use crate::translation::patcher;
use crate::translation::pipeline::{collect_units, BatchDispatcher};

/// 一次翻译请求的结果汇总
#[derive(Debug, Clone, Copy, Default)]
pub struct PassSummary {
    /// 本次产出的翻译单元数
    pub units_total: usize,
    /// 发出的批次数
    pub batches_total: usize,
    /// 失败的批次数
    pub batches_failed: usize,
    /// 经远程调用打上补丁的单元数
    pub units_patched: usize,
    /// 直接从缓存打上补丁的单元数
    pub units_from_cache: usize,
}

impl PassSummary {
    /// 本次请求是否产生了任何可见补丁
    pub fn patched_anything(&self) -> bool {
        self.units_patched + self.units_from_cache > 0
    }
}

/// 页面会话
pub struct PageSession {
    config: TranslationConfig,
    current_url: Option<String>,
    cache: PageCache,
    translated: bool,
}

impl PageSession {
    /// 创建新的页面会话
    pub fn new(config: TranslationConfig) -> Self {
        Self {
            config,
            current_url: None,
            cache: PageCache::new(),
            translated: false,
        }
    }

    /// 导航钩子：地址字符串变化即整体失效
    ///
    /// 纯字符串比较，不解析事件语义；纯锚点跳转同样触发失效。
    /// 失效动作：清除文档中的翻译痕迹、清空缓存、复位已翻译标志。
    pub fn handle_navigation(&mut self, root: &Handle, new_url: &str) {
        match &self.current_url {
            Some(current) if current == new_url => {}
            Some(current) => {
                tracing::info!("页面地址变化 {} -> {}，清除翻译状态", current, new_url);
                patcher::clear_translations(root);
                self.cache.clear();
                self.translated = false;
                self.current_url = Some(new_url.to_string());
            }
            None => {
                self.current_url = Some(new_url.to_string());
            }
        }
    }

    /// 翻译请求入口
    ///
    /// 缓存非空且未要求刷新时走缓存路径：重新遍历当前文档，凡单元文本
    /// 命中缓存即直接打补丁，不发任何远程请求。否则执行完整管道。
    /// `refresh` 会先撤销现有补丁并清空缓存，再强制重新翻译。
    pub async fn translate_page(
        &mut self,
        root: &Handle,
        translator: &dyn Translator,
        target_language: &str,
        refresh: bool,
    ) -> TranslationResult<PassSummary> {
        if refresh {
            tracing::info!("要求刷新翻译，重置页面状态");
            patcher::clear_translations(root);
            self.cache.clear();
            self.translated = false;
        }

        if !self.cache.is_empty() {
            let summary = self.patch_from_cache(root);
            if summary.patched_anything() {
                self.translated = true;
            }
            return Ok(summary);
        }

        let units = collect_units(root);
        if units.is_empty() {
            tracing::info!("没有找到需要翻译的文本");
            return Ok(PassSummary::default());
        }

        let dispatcher = BatchDispatcher::new(translator, self.config.batch_size);
        let outcome = dispatcher
            .dispatch(&units, target_language, &mut self.cache)
            .await;

        if outcome.units_patched > 0 {
            self.translated = true;
        }

        Ok(PassSummary {
            units_total: units.len(),
            batches_total: outcome.batches_total,
            batches_failed: outcome.batches_failed,
            units_patched: outcome.units_patched,
            units_from_cache: 0,
        })
    }

    /// 缓存路径：命中即补，不触网
    fn patch_from_cache(&mut self, root: &Handle) -> PassSummary {
        let units = collect_units(root);
        let mut summary = PassSummary {
            units_total: units.len(),
            ..Default::default()
        };

        for unit in &units {
            if let Some(translated) = self.cache.get(&unit.text) {
                if patcher::apply_translation(unit, translated) {
                    summary.units_from_cache += 1;
                }
            }
        }

        tracing::info!(
            "缓存补丁完成: {} / {} 个单元命中",
            summary.units_from_cache,
            summary.units_total
        );

        summary
    }

    /// 清除请求入口：撤销所有翻译痕迹并复位已翻译标志
    ///
    /// 缓存保留——只有导航才清空缓存，因此清除后再次翻译无需触网。
    pub fn remove_translations(&mut self, root: &Handle) -> usize {
        let removed = patcher::clear_translations(root);
        self.translated = false;
        removed
    }

    /// 查询已翻译状态
    pub fn has_translations(&self) -> bool {
        self.translated
    }

    /// 当前记录的页面地址
    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    /// 页面缓存的只读访问
    pub fn cache(&self) -> &PageCache {
        &self.cache
    }
}
