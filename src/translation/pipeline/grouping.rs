//! 块级成组模块
//!
//! 将每个候选文本节点映射到最近的非行内祖先容器，整块作为一个翻译单元。
//! 整块翻译避免了句子被 `<b>`/`<i>` 边界切碎，代价是偶尔把相邻的
//! 无关行内片段并入同一单元。

use std::collections::HashSet;

use markup5ever_rcdom::{Handle, NodeData};

use crate::html::{get_node_name, get_parent_node, node_text};
use crate::translation::config::constants;
use crate::translation::patcher;

/// 翻译单元的锚点：接收译文渲染的位置
#[derive(Debug, Clone)]
pub enum Anchor {
    /// 块级容器元素，译文作为其末尾子节点追加
    Element(Handle),
    /// 游离文本节点（无元素祖先时的回退），译文作为后续兄弟节点插入
    TextNode(Handle),
}

impl Anchor {
    /// 锚点对应的 DOM 节点
    pub fn handle(&self) -> &Handle {
        match self {
            Anchor::Element(handle) | Anchor::TextNode(handle) => handle,
        }
    }
}

/// 提交翻译的最小单位
#[derive(Debug, Clone)]
pub struct TranslationUnit {
    /// 送翻源文本
    pub text: String,
    /// 译文的目标容器
    pub anchor: Anchor,
}

/// 块级成组器
///
/// 维护一次翻译过程内的去重集合：同一容器全文只产生一个单元。
pub struct BlockGrouper {
    seen: HashSet<String>,
}

impl BlockGrouper {
    /// 创建新的成组器（每次翻译过程一个实例）
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }

    /// 为单个文本节点产出翻译单元
    ///
    /// 返回 `None` 的情形：容器全文为空、容器已带翻译标记、或该文本
    /// 在本次过程中已经入队。
    pub fn unit_for_node(&mut self, node: &Handle) -> Option<TranslationUnit> {
        match self.find_block_ancestor(node) {
            Some(ancestor) => {
                if patcher::subtree_contains_translation(&ancestor) {
                    return None;
                }

                let text = collapse_whitespace(&node_text(&ancestor));
                if text.is_empty() {
                    return None;
                }

                if !self.seen.insert(text.clone()) {
                    tracing::trace!("跳过重复单元: {}", text);
                    return None;
                }

                Some(TranslationUnit {
                    text,
                    anchor: Anchor::Element(ancestor),
                })
            }
            None => {
                let text = match &node.data {
                    NodeData::Text { contents } => collapse_whitespace(&contents.borrow()),
                    _ => return None,
                };
                if text.is_empty() || !self.seen.insert(text.clone()) {
                    return None;
                }

                Some(TranslationUnit {
                    text,
                    anchor: Anchor::TextNode(node.clone()),
                })
            }
        }
    }

    /// 自文本节点的直接父元素向上，越过行内元素，停在首个非行内祖先
    fn find_block_ancestor(&self, node: &Handle) -> Option<Handle> {
        let mut current = get_parent_node(node)?;

        loop {
            match get_node_name(&current) {
                Some(tag) if is_inline_element(tag) => {
                    current = get_parent_node(&current)?;
                }
                Some(_) => return Some(current),
                // 到达非元素节点（文档根），视为没有合适的祖先
                None => return None,
            }
        }
    }
}

impl Default for BlockGrouper {
    fn default() -> Self {
        Self::new()
    }
}

/// 判断标签是否属于行内元素集合
pub fn is_inline_element(tag_name: &str) -> bool {
    constants::INLINE_ELEMENTS.contains(&tag_name)
}

/// 去除首尾空白并把内部连续空白折叠为单个空格
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::{get_body_node, html_to_dom};
    use crate::translation::pipeline::discovery::collect_text_nodes;

    fn units_of(html: &str) -> Vec<TranslationUnit> {
        let dom = html_to_dom(html.as_bytes(), "UTF-8");
        let body = get_body_node(&dom.document).unwrap();
        let mut grouper = BlockGrouper::new();
        collect_text_nodes(&body)
            .iter()
            .filter_map(|node| grouper.unit_for_node(node))
            .collect()
    }

    #[test]
    fn test_plain_paragraph_anchors_at_paragraph() {
        let units = units_of("<body><p>Hello world</p></body>");
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].text, "Hello world");
        match &units[0].anchor {
            Anchor::Element(el) => assert_eq!(get_node_name(el), Some("p")),
            Anchor::TextNode(_) => panic!("Paragraph text should anchor at the element"),
        }
    }

    #[test]
    fn test_inline_runs_merge_into_block_unit() {
        // 三个文本节点（"Hello "、"big"、" world"）同属一个 <p>
        let units = units_of("<body><p>Hello <b>big</b> world</p></body>");
        assert_eq!(units.len(), 1, "Inline fragments must merge into one unit");
        assert_eq!(units[0].text, "Hello big world");
    }

    #[test]
    fn test_nested_inline_elements_walk_up() {
        let units = units_of("<body><div>Take <em><strong>care</strong></em> now</div></body>");
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].text, "Take care now");
        match &units[0].anchor {
            Anchor::Element(el) => assert_eq!(get_node_name(el), Some("div")),
            Anchor::TextNode(_) => panic!("Should anchor at the div"),
        }
    }

    #[test]
    fn test_duplicate_blocks_deduplicated() {
        let units = units_of("<body><p>Same text</p><p>Same text</p></body>");
        assert_eq!(units.len(), 1, "Identical container text yields one unit");
    }

    #[test]
    fn test_distinct_blocks_kept_separate() {
        let units = units_of("<body><p>First block</p><p>Second block</p></body>");
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].text, "First block");
        assert_eq!(units[1].text, "Second block");
    }

    #[test]
    fn test_whitespace_collapsed_in_unit_text() {
        let units = units_of("<body><p>Spaced\n   out\t text</p></body>");
        assert_eq!(units[0].text, "Spaced out text");
    }

    #[test]
    fn test_marked_container_produces_no_unit() {
        let dom = html_to_dom(
            b"<html><body><p data-translated=\"true\">Done already</p></body></html>",
            "UTF-8",
        );
        let body = get_body_node(&dom.document).unwrap();
        let mut grouper = BlockGrouper::new();
        let units: Vec<_> = collect_text_nodes(&body)
            .iter()
            .filter_map(|node| grouper.unit_for_node(node))
            .collect();
        assert!(units.is_empty(), "Marked containers are skipped");
    }
}
