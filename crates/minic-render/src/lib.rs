//! MiniC Tree Renderer
//!
//! Turns a syntax tree into text artifacts: an indented branch-drawing
//! listing for terminals and a Graphviz DOT digraph for external
//! visualization. Both are pure functions over the tree — same input, same
//! bytes out.
//!
//! ```text
//! AstNode → render() → branch-prefixed listing
//! AstNode → to_dot() → digraph for `dot -Tpng`
//! ```

pub mod dot;
pub mod tree;

pub use dot::to_dot;
pub use tree::render;
