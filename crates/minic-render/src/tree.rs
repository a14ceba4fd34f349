//! Depth-first text rendering of a syntax tree.

use minic_parser::AstNode;

/// Render a tree as one line per node, pre-order, with branch prefixes
/// encoding depth and sibling order. Each line shows the node's value when
/// present, its label otherwise.
pub fn render(root: &AstNode) -> String {
    let mut out = String::new();
    out.push_str(root.caption());
    out.push('\n');
    render_children(&mut out, root, "");
    out
}

fn render_children(out: &mut String, node: &AstNode, prefix: &str) {
    let count = node.children.len();
    for (index, child) in node.children.iter().enumerate() {
        let last = index + 1 == count;
        out.push_str(prefix);
        out.push_str(if last { "└── " } else { "├── " });
        out.push_str(child.caption());
        out.push('\n');

        let continuation = if last { "    " } else { "│   " };
        let child_prefix = format!("{prefix}{continuation}");
        render_children(out, child, &child_prefix);
    }
}
