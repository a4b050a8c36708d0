//! Tree navigation helpers for replay documents.
//!
//! Every multi-level descent in the crate goes through [`descend`]: take an
//! ordered list of nodes, collect their direct element children with one tag
//! name, and flatten the result. Deeper paths are repeated application, see
//! [`descend_path`].
//!
//! # Example
//!
//! ```
//! use bbrz_dice::tree::{descend, descend_path};
//!
//! let doc = roxmltree::Document::parse(
//!     "<Replay><ReplayStep><A/><A/></ReplayStep><ReplayStep/><ReplayStep><A/></ReplayStep></Replay>",
//! ).unwrap();
//! let steps = descend([doc.root_element()], "ReplayStep");
//! assert_eq!(steps.len(), 3);
//! assert_eq!(descend(steps, "A").len(), 3);
//! assert_eq!(descend_path([doc.root_element()], &["ReplayStep", "A"]).len(), 3);
//! ```

use roxmltree::Node;

/// Returns the direct children named `tag` of every node in `nodes`.
///
/// Order is input-node order, then document order within each node. Nodes
/// without a matching child contribute nothing.
pub fn descend<'a, 'input, I>(nodes: I, tag: &str) -> Vec<Node<'a, 'input>>
where
    I: IntoIterator<Item = Node<'a, 'input>>,
{
    let mut found = Vec::new();
    for node in nodes {
        found.extend(node.children().filter(|child| child.has_tag_name(tag)));
    }
    found
}

/// Applies [`descend`] once per tag in `path`.
pub fn descend_path<'a, 'input, I>(nodes: I, path: &[&str]) -> Vec<Node<'a, 'input>>
where
    I: IntoIterator<Item = Node<'a, 'input>>,
{
    let mut current: Vec<Node<'a, 'input>> = nodes.into_iter().collect();
    for tag in path {
        current = descend(current, tag);
    }
    current
}

/// Returns the first direct child named `tag`, if any.
#[must_use]
pub fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.has_tag_name(tag))
}

/// Returns the text of the first direct child named `tag`.
///
/// `None` when the child is missing or empty. The text is returned as-is.
#[must_use]
pub fn child_text<'a>(node: Node<'a, '_>, tag: &str) -> Option<&'a str> {
    child(node, tag).and_then(|c| c.text())
}
