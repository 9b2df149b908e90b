//! DOM 补丁模块
//!
//! 把译文以合成 `<span>` 的形式挂回文档：元素锚点追加末尾子节点，
//! 文本节点锚点插入后续兄弟节点（`<br>` + `<span>`）。容器状态通过
//! 一对标记属性落在文档上，它们就是页面内的事实状态格式：
//! `data-translated` 标记容器已翻译，`data-translation-added` 标记
//! 本次过程合成的节点。清除操作整体撤销这两类痕迹。

use markup5ever_rcdom::{Handle, NodeData};

use crate::html::{
    append_child, create_element, create_text_node, detach_node, get_node_attr, get_node_name,
    get_parent_node, insert_after, set_node_attr,
};
use crate::translation::config::constants;
use crate::translation::pipeline::grouping::{Anchor, TranslationUnit};

/// 容器的翻译状态
///
/// 每个容器是一台两态状态机：未触碰 → 已翻译，唯一的复位转换是清除操作。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorState {
    /// 尚未翻译
    Untouched,
    /// 已挂载译文
    Translated,
}

/// 读取容器的翻译状态
pub fn anchor_state(node: &Handle) -> AnchorState {
    match get_node_attr(node, constants::ATTR_TRANSLATED).as_deref() {
        Some("true") => AnchorState::Translated,
        _ => AnchorState::Untouched,
    }
}

/// 将容器标记为已翻译
fn mark_translated(node: &Handle) {
    set_node_attr(node, constants::ATTR_TRANSLATED, Some("true".to_string()));
}

/// 检查节点自身或任一后代是否带翻译标记
pub fn subtree_contains_translation(node: &Handle) -> bool {
    if anchor_state(node) == AnchorState::Translated {
        return true;
    }

    node.children
        .borrow()
        .iter()
        .any(subtree_contains_translation)
}

/// 将译文挂到翻译单元的锚点上
///
/// 同一过程内按锚点幂等：已标记的容器直接跳过并返回 `false`。
/// 跨过程重复调用前必须先执行清除。
pub fn apply_translation(unit: &TranslationUnit, translated: &str) -> bool {
    match &unit.anchor {
        Anchor::Element(element) => {
            if anchor_state(element) == AnchorState::Translated {
                return false;
            }

            let span = build_translated_span(Some(element), translated);
            append_child(element, &span);
            mark_translated(element);
            true
        }
        Anchor::TextNode(node) => {
            let Some(parent) = get_parent_node(node) else {
                return false;
            };

            let style_source = if get_node_name(&parent).is_some() {
                Some(&parent)
            } else {
                None
            };

            let line_break = create_element("br");
            set_node_attr(&line_break, constants::ATTR_TRANSLATED, Some("true".to_string()));
            set_node_attr(
                &line_break,
                constants::ATTR_TRANSLATION_ADDED,
                Some("true".to_string()),
            );

            let span = build_translated_span(style_source, translated);
            insert_after(&parent, node, &line_break);
            insert_after(&parent, &line_break, &span);
            true
        }
    }
}

/// 构造携带译文的合成 span
///
/// 从锚点继承 color / font-size / font-family（取最近的显式声明），
/// 固定块级展示，并同时打上两个标记属性。
fn build_translated_span(style_source: Option<&Handle>, translated: &str) -> Handle {
    let span = create_element("span");
    append_child(&span, &create_text_node(translated));

    let mut style = String::new();
    for property in ["color", "font-size", "font-family"] {
        if let Some(value) = style_source.and_then(|el| inherited_style_property(el, property)) {
            style.push_str(&format!("{}: {}; ", property, value));
        }
    }
    style.push_str("display: block");

    set_node_attr(&span, "style", Some(style));
    set_node_attr(&span, constants::ATTR_TRANSLATED, Some("true".to_string()));
    set_node_attr(
        &span,
        constants::ATTR_TRANSLATION_ADDED,
        Some("true".to_string()),
    );

    span
}

/// 沿祖先链查找样式属性的最近显式声明
///
/// 静态文档没有渲染后的计算样式，取 `style` 属性中的继承值作为等价物。
fn inherited_style_property(element: &Handle, property: &str) -> Option<String> {
    let mut current = Some(element.clone());

    while let Some(node) = current {
        if get_node_name(&node).is_none() {
            return None;
        }

        if let Some(style) = get_node_attr(&node, "style") {
            if let Some(value) = style_declaration_value(&style, property) {
                return Some(value);
            }
        }

        current = get_parent_node(&node);
    }

    None
}

/// 从内联样式声明串中提取指定属性的值
fn style_declaration_value(style: &str, property: &str) -> Option<String> {
    for declaration in style.split(';') {
        let mut parts = declaration.splitn(2, ':');
        let name = parts.next()?.trim();
        if name.eq_ignore_ascii_case(property) {
            let value = parts.next()?.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// 清除所有翻译痕迹，使文档回到翻译前的状态
///
/// 先摘除所有「本次添加」的合成节点，再剥离残留的「已翻译」标记。
/// 未翻译的文档上调用是安全的空操作。返回摘除的合成节点数。
pub fn clear_translations(root: &Handle) -> usize {
    let mut synthetic = Vec::new();
    collect_marked(root, constants::ATTR_TRANSLATION_ADDED, &mut synthetic);

    let removed = synthetic.len();
    for node in synthetic {
        detach_node(&node);
    }

    strip_attribute(root, constants::ATTR_TRANSLATED);

    if removed > 0 {
        tracing::debug!("已移除 {} 个合成翻译节点", removed);
    }

    removed
}

/// 检查文档是否带有翻译痕迹
pub fn document_has_translations(root: &Handle) -> bool {
    subtree_contains_translation(root)
}

fn collect_marked(node: &Handle, attr_name: &str, found: &mut Vec<Handle>) {
    if get_node_attr(node, attr_name).as_deref() == Some("true") {
        found.push(node.clone());
        // 合成节点的子树随其整体摘除
        return;
    }

    for child in node.children.borrow().iter() {
        collect_marked(child, attr_name, found);
    }
}

fn strip_attribute(node: &Handle, attr_name: &str) {
    if let NodeData::Element { .. } = node.data {
        if get_node_attr(node, attr_name).is_some() {
            set_node_attr(node, attr_name, None);
        }
    }

    for child in node.children.borrow().iter() {
        strip_attribute(child, attr_name);
    }
}
