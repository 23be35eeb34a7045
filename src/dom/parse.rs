//! HTML fragment parsing into the arena.

use scraper::{Html, Node as HtmlNode};

use super::{Document, NodeId};

impl Document {
    /// Parse `markup` as an HTML fragment into a new detached `<body>`
    /// element and return it. Comments, doctypes and processing
    /// instructions are dropped.
    pub fn parse_fragment(&mut self, markup: &str) -> NodeId {
        let container = self.create_element("body");
        self.insert_html(container, markup);
        container
    }

    /// Parse `markup` and append the resulting nodes to `parent`.
    pub fn insert_html(&mut self, parent: NodeId, markup: &str) {
        let html = Html::parse_fragment(markup);
        let root = html.root_element();

        let mut stack: Vec<_> = root.children().map(|child| (child, parent)).collect();
        stack.reverse();

        while let Some((source, target)) = stack.pop() {
            let created = match source.value() {
                HtmlNode::Element(el) => {
                    let node = self.create_element(el.name());
                    for (name, value) in el.attrs() {
                        self.set_attr(node, name, value);
                    }
                    node
                }
                HtmlNode::Text(text) => {
                    let text: &str = text;
                    self.create_text(text)
                }
                _ => continue,
            };
            self.append(target, created);

            let children: Vec<_> = source.children().map(|child| (child, created)).collect();
            stack.extend(children.into_iter().rev());
        }
    }
}
