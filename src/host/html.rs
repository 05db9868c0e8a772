//! HTML serialization of a [`MemoryHost`] tree.

use super::memory::{MemoryHost, NodeId, Payload};

impl MemoryHost {
    /// Serialize `id` and its subtree to HTML.
    pub fn to_html(&self, id: NodeId) -> String {
        let mut output = String::new();
        self.render_node(id, &mut output);
        output
    }

    /// Serialize only the children of `id`.
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut output = String::new();
        for &child in self.children(id) {
            self.render_node(child, &mut output);
        }
        output
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut output = String::new();
        self.collect_text(id, &mut output);
        output
    }

    fn collect_text(&self, id: NodeId, output: &mut String) {
        match self.slot(id).map(|s| &s.payload) {
            Some(Payload::Text(text)) => output.push_str(text),
            Some(Payload::Element(_)) => {
                for &child in self.children(id) {
                    self.collect_text(child, output);
                }
            }
            Some(Payload::Comment(_)) | None => {}
        }
    }

    fn render_node(&self, id: NodeId, output: &mut String) {
        let Some(slot) = self.slot(id) else { return };

        match &slot.payload {
            Payload::Text(text) => output.push_str(&escape_html(text)),
            Payload::Comment(text) => {
                output.push_str("<!--");
                output.push_str(&escape_comment(text));
                output.push_str("-->");
            }
            Payload::Element(data) => {
                output.push('<');
                output.push_str(&data.tag);

                for (name, value) in &data.attrs {
                    output.push(' ');
                    output.push_str(name);
                    if !value.is_empty() {
                        output.push_str("=\"");
                        output.push_str(&escape_attr(value));
                        output.push('"');
                    }
                }

                if is_void_element(&data.tag) {
                    output.push_str(" />");
                    return;
                }

                output.push('>');
                for &child in &slot.children {
                    self.render_node(child, output);
                }
                output.push_str("</");
                output.push_str(&data.tag);
                output.push('>');
            }
        }
    }
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape attribute value special characters.
fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '<' => result.push_str("&lt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Keep comment text from closing the comment early.
fn escape_comment(s: &str) -> String {
    s.replace("--", "-&#45;")
}

fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Host;
    use crate::props::PropValue;

    #[test]
    fn test_render_tree() {
        let mut host = MemoryHost::new();
        let root = host.create_root("div");
        let input = host.create_element("input");
        let note = host.create_comment("note");
        let text = host.create_text("a < b");

        host.patch_prop(&root, "title", None, Some(&PropValue::from("\"q\"")));
        host.patch_prop(&input, "checked", None, Some(&PropValue::Bool(true)));
        host.insert(&input, &root, None);
        host.insert(&note, &root, None);
        host.insert(&text, &root, None);

        assert_eq!(
            host.to_html(root),
            "<div title=\"&quot;q&quot;\"><input checked /><!--note-->a &lt; b</div>"
        );
        assert_eq!(host.inner_html(root), "<input checked /><!--note-->a &lt; b");
        assert_eq!(host.text_content(root), "a < b");
    }

    #[test]
    fn test_comment_cannot_close_early() {
        let mut host = MemoryHost::new();
        let root = host.create_root("div");
        let note = host.create_comment("a --> <b>");
        host.insert(&note, &root, None);

        assert_eq!(host.inner_html(root), "<!--a -&#45;> <b>-->");
        assert_eq!(host.inner_html(root).matches("-->").count(), 1);
        assert!(is_void_element("wbr"));
        assert!(!is_void_element("div"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
    }
}
