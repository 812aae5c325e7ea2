//! Tree output formatting for hierarchical display.
//!
//! Renders shortest-path trees and spanning trees in the style of the `tree`
//! command, with Unicode box-drawing characters.

use super::OutputConfig;
use colored::Colorize;

/// Tree output formatter
pub struct TreeOutput;

/// Tree branch characters
struct TreeChars {
    /// Vertical line for continuing branches (|)
    pipe: &'static str,
    /// Branch for non-last items (|-)
    branch: &'static str,
    /// Branch for last item in a level (L-)
    last: &'static str,
    /// Spacing for items under last branch
    space: &'static str,
}

impl TreeChars {
    const UNICODE: TreeChars = TreeChars {
        pipe: "\u{2502}   ",                 // |
        branch: "\u{251c}\u{2500}\u{2500} ", // |--
        last: "\u{2514}\u{2500}\u{2500} ",   // L--
        space: "    ",
    };
}

impl TreeOutput {
    /// Render a root label followed by its children.
    pub fn from_nodes(root: &str, children: &[TreeNode], config: &OutputConfig) -> String {
        let root_str = if config.use_colors() {
            root.bold().to_string()
        } else {
            root.to_string()
        };

        let mut lines = vec![root_str];
        Self::format_nodes(children, config, "", &mut lines);
        lines.join("\n")
    }

    fn format_nodes(
        nodes: &[TreeNode],
        config: &OutputConfig,
        prefix: &str,
        lines: &mut Vec<String>,
    ) {
        let chars = &TreeChars::UNICODE;
        let use_colors = config.use_colors();
        let len = nodes.len();

        for (i, node) in nodes.iter().enumerate() {
            let is_last = i == len - 1;
            let connector = if is_last { chars.last } else { chars.branch };
            let child_prefix = format!(
                "{}{}",
                prefix,
                if is_last { chars.space } else { chars.pipe }
            );

            let name_str = if use_colors {
                node.name.cyan().to_string()
            } else {
                node.name.clone()
            };

            let suffix = node
                .suffix
                .as_ref()
                .map(|s| {
                    if use_colors {
                        format!(" {}", s.dimmed())
                    } else {
                        format!(" {}", s)
                    }
                })
                .unwrap_or_default();

            lines.push(format!("{}{}{}{}", prefix, connector, name_str, suffix));

            if !node.children.is_empty() {
                Self::format_nodes(&node.children, config, &child_prefix, lines);
            }
        }
    }
}

/// A node in the tree structure
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub name: String,
    /// Optional suffix, e.g. a cost
    pub suffix: Option<String>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            suffix: None,
            children: Vec::new(),
        }
    }

    /// Builder: add a suffix
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Builder: add children
    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    /// Build the subtrees hanging below `parent` from `(parent, child, suffix)` links.
    ///
    /// Links must form a tree rooted at `parent`; children keep link order.
    pub fn from_links(parent: &str, links: &[(String, String, String)]) -> Vec<TreeNode> {
        links
            .iter()
            .filter(|(p, _, _)| p == parent)
            .map(|(_, child, suffix)| {
                TreeNode::new(child.clone())
                    .with_suffix(suffix.clone())
                    .with_children(Self::from_links(child, links))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    fn plain() -> OutputConfig {
        OutputConfig::new(OutputFormat::Tree).without_colors()
    }

    #[test]
    fn test_from_nodes() {
        let children = vec![
            TreeNode::new("Zapopan").with_children(vec![TreeNode::new("Etzatlan")]),
            TreeNode::new("Tonala").with_suffix("(16)"),
        ];

        let output = TreeOutput::from_nodes("Centro", &children, &plain());
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines[0], "Centro");
        assert_eq!(lines[1], "\u{251c}\u{2500}\u{2500} Zapopan");
        assert_eq!(lines[2], "\u{2502}   \u{2514}\u{2500}\u{2500} Etzatlan");
        assert_eq!(lines[3], "\u{2514}\u{2500}\u{2500} Tonala (16)");
    }

    #[test]
    fn test_from_links() {
        let link = |p: &str, c: &str| (p.to_string(), c.to_string(), String::new());
        let links = vec![link("A", "B"), link("B", "C"), link("A", "D")];
        let nodes = TreeNode::from_links("A", &links);

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].name, "B");
        assert_eq!(nodes[0].children[0].name, "C");
        assert_eq!(nodes[1].name, "D");
    }

    #[test]
    fn test_tree_node_builder() {
        let node = TreeNode::new("Design")
            .with_suffix("(2h)")
            .with_children(vec![TreeNode::new("Buy Materials")]);

        assert_eq!(node.name, "Design");
        assert_eq!(node.suffix, Some("(2h)".to_string()));
        assert_eq!(node.children.len(), 1);
    }
}
