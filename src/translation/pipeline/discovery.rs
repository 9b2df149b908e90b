//! 文本发现模块
//!
//! 按文档顺序（深度优先、先序）收集 body 下所有可见文本节点。
//! script / style / pre / code / noscript 子树整体排除，空白文本节点排除。
//! 纯读取，不产生副作用。

use markup5ever_rcdom::{Handle, NodeData};

use crate::translation::config::constants;

/// 收集根节点下的候选文本节点
pub fn collect_text_nodes(root: &Handle) -> Vec<Handle> {
    let mut nodes = Vec::new();
    walk(root, &mut nodes);
    nodes
}

fn walk(node: &Handle, nodes: &mut Vec<Handle>) {
    match &node.data {
        NodeData::Text { contents } => {
            if !contents.borrow().trim().is_empty() {
                nodes.push(node.clone());
            }
        }
        NodeData::Element { name, .. } => {
            // 排除子树即覆盖「祖先链包含排除元素」的情形
            if is_excluded_element(name.local.as_ref()) {
                return;
            }
            for child in node.children.borrow().iter() {
                walk(child, nodes);
            }
        }
        _ => {
            for child in node.children.borrow().iter() {
                walk(child, nodes);
            }
        }
    }
}

/// 判断元素是否属于排除集合
pub fn is_excluded_element(tag_name: &str) -> bool {
    constants::SKIP_ELEMENTS.contains(&tag_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::{get_body_node, html_to_dom};

    fn body_of(html: &str) -> Handle {
        let dom = html_to_dom(html.as_bytes(), "UTF-8");
        let body = get_body_node(&dom.document).expect("Test document should have a body");
        // rcdom's `Drop for Node` tears down the whole subtree's children when the
        // owning `RcDom` is dropped, so the dom must outlive any handle into it.
        // Keep it alive for the remainder of the test process.
        std::mem::forget(dom);
        body
    }

    fn texts_of(html: &str) -> Vec<String> {
        collect_text_nodes(&body_of(html))
            .iter()
            .map(|node| match &node.data {
                NodeData::Text { contents } => contents.borrow().trim().to_string(),
                _ => unreachable!("Discovery only returns text nodes"),
            })
            .collect()
    }

    #[test]
    fn test_collects_in_document_order() {
        let texts = texts_of("<body><p>First</p><div><span>Second</span></div><p>Third</p></body>");
        assert_eq!(texts, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_excludes_script_style_pre_code() {
        let texts = texts_of(
            "<body><script>var x = 1;</script><style>.a{}</style>\
             <pre>preformatted</pre><code>inline code</code><p>Visible</p></body>",
        );
        assert_eq!(texts, vec!["Visible"]);
    }

    #[test]
    fn test_excludes_nested_descendants_of_pre() {
        let texts = texts_of("<body><pre><span><b>deep</b></span></pre><p>Kept</p></body>");
        assert_eq!(texts, vec!["Kept"]);
    }

    #[test]
    fn test_skips_blank_text_nodes() {
        let texts = texts_of("<body><p>   </p><p>\n\t</p><p>Real</p></body>");
        assert_eq!(texts, vec!["Real"]);
    }
}
