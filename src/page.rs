//! Serde-described page model and an in-memory `Document` over it.
//!
//! `MemoryDom` backs the tests and the `shorefx` binary: it answers the
//! engine's structural queries and records every presentation write in
//! order, so a simulation's full effect on the page is inspectable.

use std::collections::{BTreeMap, HashMap};

use crate::{
    dom::{Document, Mutation},
    error::{ShorefxError, ShorefxResult},
};

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct PageModel {
    pub nodes: Vec<NodeSpec>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct NodeSpec {
    pub id: String,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    /// Image child, for elements that wrap their image (service cards).
    /// Icons are image elements themselves and carry no child.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageSpec>,
}

impl NodeSpec {
    pub fn new(id: &str, classes: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            attrs: BTreeMap::new(),
            heading: None,
            image: None,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ImageSpec {
    pub id: String,
    #[serde(default)]
    pub classes: Vec<String>,
}

impl ImageSpec {
    pub fn new(id: &str, classes: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
        }
    }
}

#[derive(Clone, Debug, serde::Serialize)]
struct NodeState {
    id: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    heading: Option<String>,
    /// Id of the node's image child, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    child_image: Option<String>,
}

/// In-memory document. Node handles are element id strings.
#[derive(Clone, Debug, serde::Serialize)]
pub struct MemoryDom {
    nodes: Vec<NodeState>,
    #[serde(skip)]
    by_id: HashMap<String, usize>,
    mutations: Vec<Mutation>,
}

impl MemoryDom {
    pub fn from_model(model: &PageModel) -> ShorefxResult<Self> {
        let mut dom = Self {
            nodes: Vec::new(),
            by_id: HashMap::new(),
            mutations: Vec::new(),
        };
        for spec in &model.nodes {
            dom.insert(NodeState {
                id: spec.id.clone(),
                classes: spec.classes.clone(),
                attrs: spec.attrs.clone(),
                styles: BTreeMap::new(),
                heading: spec.heading.clone(),
                child_image: spec.image.as_ref().map(|img| img.id.clone()),
            })?;
            if let Some(img) = &spec.image {
                dom.insert(NodeState {
                    id: img.id.clone(),
                    classes: img.classes.clone(),
                    attrs: BTreeMap::new(),
                    styles: BTreeMap::new(),
                    heading: None,
                    child_image: None,
                })?;
            }
        }
        Ok(dom)
    }

    fn insert(&mut self, node: NodeState) -> ShorefxResult<()> {
        if self.by_id.contains_key(&node.id) {
            return Err(ShorefxError::validation(format!(
                "duplicate node id '{}'",
                node.id
            )));
        }
        self.by_id.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    fn get(&self, id: &str) -> Option<&NodeState> {
        self.by_id.get(id).map(|&i| &self.nodes[i])
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut NodeState> {
        self.by_id.get(id).map(|&i| &mut self.nodes[i])
    }

    pub fn source(&self, node: &String) -> Option<String> {
        self.get(node)?.attrs.get("src").cloned()
    }

    pub fn style(&self, node: &String, property: &str) -> Option<String> {
        self.get(node)?.styles.get(property).cloned()
    }

    pub fn has_class(&self, node: &String, class: &str) -> bool {
        self.get(node)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    /// Every presentation write so far, in application order.
    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }
}

impl Document for MemoryDom {
    type Node = String;

    fn nodes_with_class(&self, class: &str) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|n| n.classes.iter().any(|c| c == class))
            .map(|n| n.id.clone())
            .collect()
    }

    fn image_within(&self, node: &String, class: &str) -> Option<String> {
        let child = self.get(node)?.child_image.clone()?;
        let img = self.get(&child)?;
        img.classes.iter().any(|c| c == class).then_some(child)
    }

    fn first_image_within(&self, node: &String) -> Option<String> {
        self.get(node)?.child_image.clone()
    }

    fn attribute(&self, node: &String, name: &str) -> Option<String> {
        self.get(node)?.attrs.get(name).cloned()
    }

    fn heading_text(&self, node: &String) -> Option<String> {
        self.get(node)?.heading.clone()
    }

    fn set_image_source(&mut self, node: &String, source: &str) {
        if let Some(state) = self.get_mut(node) {
            state.attrs.insert("src".to_string(), source.to_string());
            self.mutations.push(Mutation::SetSource {
                node: node.clone(),
                value: source.to_string(),
            });
        }
    }

    fn set_style(&mut self, node: &String, property: &str, value: &str) {
        if let Some(state) = self.get_mut(node) {
            state.styles.insert(property.to_string(), value.to_string());
            self.mutations.push(Mutation::SetStyle {
                node: node.clone(),
                property: property.to_string(),
                value: value.to_string(),
            });
        }
    }

    fn add_class(&mut self, node: &String, class: &str) {
        if let Some(state) = self.get_mut(node) {
            if !state.classes.iter().any(|c| c == class) {
                state.classes.push(class.to_string());
            }
            self.mutations.push(Mutation::AddClass {
                node: node.clone(),
                class: class.to_string(),
            });
        }
    }
}
