//! 文本处理管道模块
//!
//! 发现 → 过滤 → 成组 → 批次调度，对应页面翻译的前半程：
//! - `discovery`: 按文档顺序收集候选文本节点
//! - `filters`: 逐节点判断文本是否值得送翻
//! - `grouping`: 映射到最近的块级容器并去重
//! - `dispatch`: 固定容量批次的串行远程调用

pub mod discovery;
pub mod dispatch;
pub mod filters;
pub mod grouping;

pub use discovery::collect_text_nodes;
pub use dispatch::{BatchDispatcher, DispatchOutcome};
pub use filters::TextFilter;
pub use grouping::{Anchor, BlockGrouper, TranslationUnit};

use markup5ever_rcdom::{Handle, NodeData};

use crate::html::{get_node_name, get_parent_node};

/// 运行管道前半程：发现、过滤并成组，产出本次过程的翻译单元列表
pub fn collect_units(root: &Handle) -> Vec<TranslationUnit> {
    let filter = TextFilter::new();
    let mut grouper = BlockGrouper::new();
    let mut units = Vec::new();

    for node in collect_text_nodes(root) {
        let text = match &node.data {
            NodeData::Text { contents } => contents.borrow().trim().to_string(),
            _ => continue,
        };

        let owner = get_parent_node(&node).filter(|parent| get_node_name(parent).is_some());

        if !filter.needs_translation(&text, owner.as_ref()) {
            continue;
        }

        if let Some(unit) = grouper.unit_for_node(&node) {
            units.push(unit);
        }
    }

    tracing::debug!("管道产出 {} 个翻译单元", units.len());

    units
}
