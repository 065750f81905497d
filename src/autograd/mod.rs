//! Automatic differentiation over a dynamically built scalar graph.
//!
//! Arithmetic on [`Value`] handles records one node per operator application;
//! [`Value::backward`] then walks the graph in reverse topological order and
//! accumulates `d(root)/d(node)` into every node it can reach. Graphs are
//! throwaway: each forward pass builds a fresh one, and only parameter leaves
//! are meant to survive across passes.

mod value;


pub use value::Value;
