//! Field resolution cascade and the value write contract.
//!
//! Strategies run in a fixed order and each one is tried against every
//! candidate before the next strategy starts, so an exact `id` match on
//! the last candidate still beats a placeholder substring match on the
//! first. Only editable, empty controls are ever returned.

use tracing::{debug, trace};

use crate::dom::{Dom, DomEvent, Element, NodeId};
use crate::error::Result;
use crate::patterns::FieldDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
  /// `name` attribute equals a candidate
  ExactName,
  /// `id` attribute equals a candidate
  ExactId,
  /// placeholder, `name` or `id` contains the field name or a candidate
  Substring,
  /// a label mentioning the field name points at or wraps the control
  Label,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
  pub node: NodeId,
  pub strategy: Strategy,
}

/// Editable control that holds no value yet
pub fn is_eligible<D: Dom + ?Sized>(dom: &D, node: NodeId) -> bool {
  dom.element(node).is_some_and(|element| element.is_editable() && element.is_empty())
}

fn eligible_controls<D: Dom + ?Sized>(dom: &D, scope: NodeId) -> Vec<(NodeId, &Element)> {
  dom
    .descendants(scope)
    .into_iter()
    .filter(|node| is_eligible(dom, *node))
    .filter_map(|node| dom.element(node).map(|element| (node, element)))
    .collect()
}

fn lower(value: &Option<String>) -> String {
  value.as_deref().unwrap_or_default().to_lowercase()
}

fn by_exact_name(controls: &[(NodeId, &Element)], descriptor: &FieldDescriptor) -> Option<NodeId> {
  descriptor.candidates.iter().find_map(|candidate| {
    controls
      .iter()
      .find(|(_, element)| element.attributes.name.as_deref() == Some(candidate.as_str()))
      .map(|(node, _)| *node)
  })
}

fn by_exact_id(controls: &[(NodeId, &Element)], descriptor: &FieldDescriptor) -> Option<NodeId> {
  descriptor.candidates.iter().find_map(|candidate| {
    controls
      .iter()
      .find(|(_, element)| element.attributes.id.as_deref() == Some(candidate.as_str()))
      .map(|(node, _)| *node)
  })
}

fn by_substring(controls: &[(NodeId, &Element)], descriptor: &FieldDescriptor) -> Option<NodeId> {
  let field = descriptor.name.to_lowercase();
  let mentions = |element: &Element, candidate: Option<&str>| {
    let attributes = &element.attributes;
    [lower(&attributes.placeholder), lower(&attributes.name), lower(&attributes.id)]
      .iter()
      .any(|text| text.contains(&field) || candidate.is_some_and(|c| text.contains(c)))
  };

  if descriptor.candidates.is_empty() {
    return controls.iter().find(|(_, element)| mentions(element, None)).map(|(node, _)| *node);
  }
  descriptor.candidates.iter().find_map(|candidate| {
    let candidate = candidate.to_lowercase();
    controls.iter().find(|(_, element)| mentions(element, Some(candidate.as_str()))).map(|(node, _)| *node)
  })
}

fn by_label<D: Dom + ?Sized>(dom: &D, scope: NodeId, descriptor: &FieldDescriptor) -> Option<NodeId> {
  let field = descriptor.name.to_lowercase();
  let labels = dom
    .descendants(scope)
    .into_iter()
    .filter(|node| dom.element(*node).is_some_and(|element| element.tag == "label"));

  for label in labels {
    if !dom.text_content(label).to_lowercase().contains(&field) {
      continue;
    }
    let target = dom
      .element(label)
      .and_then(|element| element.attributes.label_for.as_deref())
      .and_then(|target| dom.element_by_id(scope, target))
      .filter(|target| is_eligible(dom, *target));
    if target.is_some() {
      return target;
    }
    if let Some(nested) = dom.descendants(label).into_iter().find(|node| is_eligible(dom, *node)) {
      return Some(nested);
    }
  }
  None
}

/// Find the control for `descriptor` below `scope`, or `None` when no
/// eligible control matches any strategy
pub fn resolve<D: Dom + ?Sized>(dom: &D, scope: NodeId, descriptor: &FieldDescriptor) -> Option<Match> {
  let controls = eligible_controls(dom, scope);

  let found = by_exact_name(&controls, descriptor)
    .map(|node| Match { node, strategy: Strategy::ExactName })
    .or_else(|| by_exact_id(&controls, descriptor).map(|node| Match { node, strategy: Strategy::ExactId }))
    .or_else(|| by_substring(&controls, descriptor).map(|node| Match { node, strategy: Strategy::Substring }))
    .or_else(|| by_label(dom, scope, descriptor).map(|node| Match { node, strategy: Strategy::Label }));

  match &found {
    Some(m) => trace!(field = %descriptor.name, node = %m.node, strategy = ?m.strategy, "resolved field"),
    None => trace!(field = %descriptor.name, "no eligible target"),
  }
  found
}

/// Set the value through the native setter, then fire `input` and `change`
pub fn write_value<D: Dom + ?Sized>(dom: &mut D, node: NodeId, value: &str) -> Result<()> {
  dom.set_native_value(node, value)?;
  dom.dispatch(node, DomEvent::Input)?;
  dom.dispatch(node, DomEvent::Change)?;
  debug!(node = %node, "wrote field value");
  Ok(())
}
