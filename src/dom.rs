//! Host document boundary.
//!
//! The engine never touches a real DOM; it reads structure and writes
//! presentation through this trait. The in-memory implementation lives in
//! [`crate::page`]; a browser shell would wrap its own node handles.

use std::fmt::Debug;
use std::hash::Hash;

pub trait Document {
    /// Opaque element handle. Cheap to clone; hashable so the engine can
    /// key per-element state by it.
    type Node: Clone + Eq + Hash + Debug;

    fn nodes_with_class(&self, class: &str) -> Vec<Self::Node>;

    /// Image descendant of `node` carrying `class`.
    fn image_within(&self, node: &Self::Node, class: &str) -> Option<Self::Node>;

    /// First image descendant of `node`, regardless of class.
    fn first_image_within(&self, node: &Self::Node) -> Option<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Text of the nearest heading under `node`.
    fn heading_text(&self, node: &Self::Node) -> Option<String>;

    fn set_image_source(&mut self, node: &Self::Node, source: &str);

    fn set_style(&mut self, node: &Self::Node, property: &str, value: &str);

    fn add_class(&mut self, node: &Self::Node, class: &str);
}

/// One presentation write, in application order.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mutation {
    SetSource {
        node: String,
        value: String,
    },
    SetStyle {
        node: String,
        property: String,
        value: String,
    },
    AddClass {
        node: String,
        class: String,
    },
}
