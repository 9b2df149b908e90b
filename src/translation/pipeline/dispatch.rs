//! 批次调度模块
//!
//! 将翻译单元切分为固定容量的连续批次，严格串行地逐批请求远程服务。
//! 串行是限流考虑而非正确性要求：批次之间没有数据依赖。
//! 单个批次失败（网络、服务端错误、响应结构不符、长度不对齐）只记录
//! 日志并跳过，后续批次照常进行；失败批次的单元保持未翻译，不重试。

use crate::translation::cache::PageCache;
use crate::translation::client::Translator;
use crate::translation::patcher;
use crate::translation::pipeline::grouping::TranslationUnit;

/// 一次调度的结果汇总
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchOutcome {
    /// 发出的批次总数
    pub batches_total: usize,
    /// 失败的批次数
    pub batches_failed: usize,
    /// 成功打补丁的单元数
    pub units_patched: usize,
    /// 因锚点已标记而跳过的单元数
    pub units_skipped: usize,
}

/// 批次调度器
pub struct BatchDispatcher<'a> {
    translator: &'a dyn Translator,
    batch_size: usize,
}

impl<'a> BatchDispatcher<'a> {
    /// 创建调度器；`batch_size` 为 0 时按 1 处理
    pub fn new(translator: &'a dyn Translator, batch_size: usize) -> Self {
        Self {
            translator,
            batch_size: batch_size.max(1),
        }
    }

    /// 串行调度所有批次，译文写入 DOM 并记入页面缓存
    pub async fn dispatch(
        &self,
        units: &[TranslationUnit],
        target_language: &str,
        cache: &mut PageCache,
    ) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();

        if units.is_empty() {
            return outcome;
        }

        tracing::info!(
            "开始翻译 {} 个单元，批次容量 {}",
            units.len(),
            self.batch_size
        );

        for (batch_index, batch) in units.chunks(self.batch_size).enumerate() {
            outcome.batches_total += 1;

            let texts: Vec<String> = batch.iter().map(|unit| unit.text.clone()).collect();

            let translated = match self.translator.translate_batch(&texts, target_language).await {
                Ok(translated) => translated,
                Err(e) => {
                    outcome.batches_failed += 1;
                    tracing::error!("批次 {} 翻译失败: {}", batch_index + 1, e);
                    continue;
                }
            };

            // 返回数组必须与输入逐项对齐，否则整批作废
            if translated.len() != texts.len() {
                outcome.batches_failed += 1;
                tracing::error!(
                    "批次 {} 结果数量不匹配: 期望 {}，得到 {}",
                    batch_index + 1,
                    texts.len(),
                    translated.len()
                );
                continue;
            }

            for (unit, translated_text) in batch.iter().zip(translated.iter()) {
                cache.insert(unit.text.clone(), translated_text.clone());

                if patcher::apply_translation(unit, translated_text) {
                    outcome.units_patched += 1;
                } else {
                    outcome.units_skipped += 1;
                }
            }

            tracing::debug!(
                "批次 {}/{} 完成: {} 项",
                batch_index + 1,
                units.len().div_ceil(self.batch_size),
                batch.len()
            );
        }

        tracing::info!(
            "翻译完成: {} 批次（失败 {}），补丁 {} 项，跳过 {} 项",
            outcome.batches_total,
            outcome.batches_failed,
            outcome.units_patched,
            outcome.units_skipped
        );

        outcome
    }
}
