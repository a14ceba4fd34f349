//! Graphviz DOT export of a syntax tree.
//!
//! Serializes the same pre-order traversal as the text renderer into a
//! `digraph` for external visualization tools. Pass-through consumer format;
//! nothing here feeds back into analysis.

use minic_parser::AstNode;

/// Serialize a tree as a Graphviz digraph.
///
/// Node identifiers follow pre-order (`n0`, `n1`, …); labels are the same
/// captions the text renderer shows.
pub fn to_dot(root: &AstNode) -> String {
    let mut out = String::from("digraph ast {\n");
    let mut next_id = 0usize;
    emit(&mut out, root, &mut next_id);
    out.push_str("}\n");
    out
}

fn emit(out: &mut String, node: &AstNode, next_id: &mut usize) -> usize {
    let id = *next_id;
    *next_id += 1;
    out.push_str(&format!("    n{id} [label=\"{}\"];\n", escape(node.caption())));
    for child in &node.children {
        let child_id = emit(out, child, next_id);
        out.push_str(&format!("    n{id} -> n{child_id};\n"));
    }
    id
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
