//! Page model the resolver works against.
//!
//! [`Dom`] is the seam a host implements over its real page; [`Document`]
//! is an in-memory arena used for snapshots and tests. Writes go through
//! [`Dom::set_native_value`] and are followed by synthetic events, so a
//! document records every [`Mutation`] in order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DomError, Result};

/// Input types that never take a typed value
const NON_EDITABLE_TYPES: [&str; 6] = ["hidden", "submit", "button", "reset", "image", "file"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

/// Attributes the resolver reads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub class: Option<String>,
  #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
  pub input_type: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub placeholder: Option<String>,
  /// Target id of a `<label for=...>`
  #[serde(default, rename = "for", skip_serializing_if = "Option::is_none")]
  pub label_for: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
  /// Lowercase tag name
  pub tag: String,
  pub attributes: Attributes,
  pub value: String,
  /// Direct text only, not from children
  pub text: String,
  parent: Option<NodeId>,
  children: Vec<NodeId>,
}

impl Element {
  pub fn new(tag: &str) -> Self {
    Self {
      tag: tag.to_ascii_lowercase(),
      attributes: Attributes::default(),
      value: String::new(),
      text: String::new(),
      parent: None,
      children: Vec::new(),
    }
  }

  pub fn with_id(mut self, id: &str) -> Self {
    self.attributes.id = Some(id.to_string());
    self
  }

  pub fn with_name(mut self, name: &str) -> Self {
    self.attributes.name = Some(name.to_string());
    self
  }

  pub fn with_class(mut self, class: &str) -> Self {
    self.attributes.class = Some(class.to_string());
    self
  }

  pub fn with_type(mut self, input_type: &str) -> Self {
    self.attributes.input_type = Some(input_type.to_string());
    self
  }

  pub fn with_placeholder(mut self, placeholder: &str) -> Self {
    self.attributes.placeholder = Some(placeholder.to_string());
    self
  }

  pub fn with_label_for(mut self, target: &str) -> Self {
    self.attributes.label_for = Some(target.to_string());
    self
  }

  pub fn with_text(mut self, text: &str) -> Self {
    self.text = text.to_string();
    self
  }

  pub fn with_value(mut self, value: &str) -> Self {
    self.value = value.to_string();
    self
  }

  pub fn parent(&self) -> Option<NodeId> {
    self.parent
  }

  /// `input`, `textarea` or `select`
  pub fn is_control(&self) -> bool {
    matches!(self.tag.as_str(), "input" | "textarea" | "select")
  }

  /// A control that accepts a typed value
  pub fn is_editable(&self) -> bool {
    if !self.is_control() {
      return false;
    }
    match &self.attributes.input_type {
      Some(kind) if self.tag == "input" => {
        !NON_EDITABLE_TYPES.iter().any(|blocked| kind.eq_ignore_ascii_case(blocked))
      }
      _ => true,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.value.is_empty()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomEvent {
  Input,
  Change,
}

impl DomEvent {
  pub fn name(&self) -> &'static str {
    match self {
      DomEvent::Input => "input",
      DomEvent::Change => "change",
    }
  }
}

/// One observable change made to a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Mutation {
  NativeValue(String),
  Event(DomEvent),
}

pub trait Dom {
  fn root(&self) -> NodeId;

  fn element(&self, node: NodeId) -> Option<&Element>;

  /// Child nodes in document order; empty for unknown nodes
  fn children(&self, node: NodeId) -> &[NodeId];

  /// Write through the platform value setter, bypassing any property
  /// override a page framework installed
  fn set_native_value(&mut self, node: NodeId, value: &str) -> Result<()>;

  /// Fire a bubbling event at `node`
  fn dispatch(&mut self, node: NodeId, event: DomEvent) -> Result<()>;

  /// Every node below `scope` in document order, `scope` excluded
  fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
    let mut found = Vec::new();
    let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
    while let Some(node) = stack.pop() {
      found.push(node);
      stack.extend(self.children(node).iter().rev().copied());
    }
    found
  }

  /// First element below `scope` whose `id` attribute equals `id`
  fn element_by_id(&self, scope: NodeId, id: &str) -> Option<NodeId> {
    self.descendants(scope).into_iter().find(|node| {
      self
        .element(*node)
        .and_then(|element| element.attributes.id.as_deref())
        .is_some_and(|candidate| candidate == id)
    })
  }

  /// Text of `node` and all its descendants
  fn text_content(&self, node: NodeId) -> String {
    std::iter::once(node)
      .chain(self.descendants(node))
      .filter_map(|n| self.element(n))
      .map(|element| element.text.as_str())
      .collect::<Vec<_>>()
      .join(" ")
  }
}

/// Nested, serializable form of a page; the format of snapshot files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotNode {
  pub tag: String,
  #[serde(flatten)]
  pub attributes: Attributes,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub value: String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub text: String,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub children: Vec<SnapshotNode>,
}

/// Arena-backed in-memory page
#[derive(Debug, Clone)]
pub struct Document {
  nodes: Vec<Element>,
  log: Vec<(NodeId, Mutation)>,
}

impl Default for Document {
  fn default() -> Self {
    Self::new()
  }
}

impl Document {
  /// An empty page with a `<body>` root
  pub fn new() -> Self {
    Self { nodes: vec![Element::new("body")], log: Vec::new() }
  }

  /// Add `element` as the last child of `parent`
  pub fn append(&mut self, parent: NodeId, mut element: Element) -> Result<NodeId> {
    if parent.0 >= self.nodes.len() {
      return Err(DomError::UnknownNode(parent));
    }
    let node = NodeId(self.nodes.len());
    element.parent = Some(parent);
    element.children.clear();
    self.nodes.push(element);
    self.nodes[parent.0].children.push(node);
    Ok(node)
  }

  pub fn from_snapshot(snapshot: &SnapshotNode) -> Self {
    let mut document = Self { nodes: Vec::new(), log: Vec::new() };
    document.push_snapshot(snapshot, None);
    document
  }

  fn push_snapshot(&mut self, snapshot: &SnapshotNode, parent: Option<NodeId>) -> NodeId {
    let node = NodeId(self.nodes.len());
    let mut element = Element::new(&snapshot.tag);
    element.attributes = snapshot.attributes.clone();
    element.value = snapshot.value.clone();
    element.text = snapshot.text.clone();
    element.parent = parent;
    self.nodes.push(element);
    if let Some(parent) = parent {
      self.nodes[parent.0].children.push(node);
    }
    for child in &snapshot.children {
      self.push_snapshot(child, Some(node));
    }
    node
  }

  /// Parse a JSON snapshot
  pub fn from_json(text: &str) -> serde_json::Result<Self> {
    let snapshot: SnapshotNode = serde_json::from_str(text)?;
    Ok(Self::from_snapshot(&snapshot))
  }

  pub fn to_snapshot(&self) -> SnapshotNode {
    self.snapshot_of(self.root())
  }

  fn snapshot_of(&self, node: NodeId) -> SnapshotNode {
    let element = &self.nodes[node.0];
    SnapshotNode {
      tag: element.tag.clone(),
      attributes: element.attributes.clone(),
      value: element.value.clone(),
      text: element.text.clone(),
      children: element.children.iter().map(|child| self.snapshot_of(*child)).collect(),
    }
  }

  /// Every mutation in the order it happened
  pub fn log(&self) -> &[(NodeId, Mutation)] {
    &self.log
  }

  pub fn mutations_for(&self, node: NodeId) -> Vec<&Mutation> {
    self.log.iter().filter(|(target, _)| *target == node).map(|(_, mutation)| mutation).collect()
  }

  /// Current value of a control
  pub fn value(&self, node: NodeId) -> Option<&str> {
    self.nodes.get(node.0).map(|element| element.value.as_str())
  }
}

impl Dom for Document {
  fn root(&self) -> NodeId {
    NodeId(0)
  }

  fn element(&self, node: NodeId) -> Option<&Element> {
    self.nodes.get(node.0)
  }

  fn children(&self, node: NodeId) -> &[NodeId] {
    self.nodes.get(node.0).map(|element| element.children.as_slice()).unwrap_or(&[])
  }

  fn set_native_value(&mut self, node: NodeId, value: &str) -> Result<()> {
    let element = self.nodes.get_mut(node.0).ok_or(DomError::UnknownNode(node))?;
    if !element.is_editable() {
      return Err(DomError::NotEditable(node));
    }
    element.value = value.to_string();
    self.log.push((node, Mutation::NativeValue(value.to_string())));
    Ok(())
  }

  fn dispatch(&mut self, node: NodeId, event: DomEvent) -> Result<()> {
    if node.0 >= self.nodes.len() {
      return Err(DomError::UnknownNode(node));
    }
    self.log.push((node, Mutation::Event(event)));
    Ok(())
  }
}
