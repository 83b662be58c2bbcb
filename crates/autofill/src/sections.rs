//! Partitioning a page into repeated entry containers.
//!
//! A container qualifies when its class or id mentions a section keyword,
//! or when it is a `<fieldset>` holding a grouping field, and in both
//! cases it must hold at least one required field. A container holding
//! every required field swallows the partial ones nested in it, so
//! per-field wrappers that repeat the keyword stay inside their entry.
//! Of what remains, only the innermost containers are kept, in document
//! order; a page with none is treated as one section spanning the whole
//! document.

use crate::dom::{Dom, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionRule {
  /// Matched against lowercased class and id
  pub keywords: &'static [&'static str],
  /// A fieldset holding a control whose `name` contains one of these qualifies
  pub fieldset_fields: &'static [&'static str],
  /// Some control `name` inside must contain one of these
  pub required_fields: &'static [&'static str],
}

pub const EXPERIENCE_SECTIONS: SectionRule = SectionRule {
  keywords: &["experience", "employment", "work-history"],
  fieldset_fields: &["job", "company"],
  required_fields: &["title", "company"],
};

pub const EDUCATION_SECTIONS: SectionRule = SectionRule {
  keywords: &["education", "school"],
  fieldset_fields: &["school", "degree"],
  required_fields: &["school", "degree"],
};

fn has_named_control<D: Dom + ?Sized>(dom: &D, scope: NodeId, needles: &[&str]) -> bool {
  dom.descendants(scope).into_iter().filter_map(|node| dom.element(node)).any(|element| {
    let name = element.attributes.name.as_deref().unwrap_or_default().to_lowercase();
    element.is_control() && needles.iter().any(|needle| name.contains(*needle))
  })
}

fn qualifies<D: Dom + ?Sized>(dom: &D, node: NodeId, rule: &SectionRule) -> bool {
  let Some(element) = dom.element(node) else {
    return false;
  };
  if element.is_control() {
    return false;
  }
  let attributes = &element.attributes;
  let labelled = [&attributes.class, &attributes.id]
    .into_iter()
    .flatten()
    .map(|text| text.to_lowercase())
    .any(|text| rule.keywords.iter().any(|keyword| text.contains(*keyword)));
  let grouped = element.tag == "fieldset" && has_named_control(dom, node, rule.fieldset_fields);

  (labelled || grouped) && has_named_control(dom, node, rule.required_fields)
}

/// Holds a control for every required field, not just one of them
fn is_complete<D: Dom + ?Sized>(dom: &D, node: NodeId, rule: &SectionRule) -> bool {
  rule.required_fields.iter().all(|field| has_named_control(dom, node, &[*field]))
}

/// Section containers for `rule`, falling back to the document root
pub fn find_sections<D: Dom + ?Sized>(dom: &D, rule: &SectionRule) -> Vec<NodeId> {
  let candidates: Vec<NodeId> =
    dom.descendants(dom.root()).into_iter().filter(|node| qualifies(dom, *node, rule)).collect();

  let complete: Vec<NodeId> =
    candidates.iter().copied().filter(|node| is_complete(dom, *node, rule)).collect();
  let kept: Vec<NodeId> = candidates
    .iter()
    .copied()
    .filter(|node| {
      complete.contains(node) || !complete.iter().any(|outer| dom.descendants(*outer).contains(node))
    })
    .collect();

  let innermost: Vec<NodeId> = kept
    .iter()
    .copied()
    .filter(|node| {
      let below = dom.descendants(*node);
      !kept.iter().any(|other| below.contains(other))
    })
    .collect();

  if innermost.is_empty() {
    vec![dom.root()]
  } else {
    innermost
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::dom::{Document, Element};

  fn entry(doc: &mut Document, parent: NodeId, class: &str) -> NodeId {
    let entry = doc.append(parent, Element::new("div").with_class(class)).unwrap();
    doc.append(entry, Element::new("input").with_name("job_title")).unwrap();
    doc.append(entry, Element::new("input").with_name("company_name")).unwrap();
    entry
  }

  #[test]
  fn test_nested_keyword_containers_keep_innermost() {
    let mut doc = Document::new();
    let root = doc.root();
    let list = doc.append(root, Element::new("section").with_id("experience-list")).unwrap();
    let first = entry(&mut doc, list, "experience-entry");
    let second = entry(&mut doc, list, "experience-entry");

    assert_eq!(find_sections(&doc, &EXPERIENCE_SECTIONS), vec![first, second]);
  }

  #[test]
  fn test_keyword_field_wrappers_stay_inside_their_entry() {
    let mut doc = Document::new();
    let root = doc.root();
    let mut entries = Vec::new();
    for _ in 0..2 {
      let entry = doc.append(root, Element::new("div").with_class("experience-entry")).unwrap();
      for name in ["job_title", "company"] {
        let wrapper = doc.append(entry, Element::new("div").with_class("experience-field")).unwrap();
        doc.append(wrapper, Element::new("input").with_name(name)).unwrap();
      }
      entries.push(entry);
    }

    assert_eq!(find_sections(&doc, &EXPERIENCE_SECTIONS), entries);
  }

  #[test]
  fn test_partial_entries_without_complete_parent_are_kept() {
    let mut doc = Document::new();
    let root = doc.root();
    let title = doc.append(root, Element::new("div").with_class("experience-title")).unwrap();
    doc.append(title, Element::new("input").with_name("job_title")).unwrap();
    let company = doc.append(root, Element::new("div").with_class("experience-company")).unwrap();
    doc.append(company, Element::new("input").with_name("company")).unwrap();

    assert_eq!(find_sections(&doc, &EXPERIENCE_SECTIONS), vec![title, company]);
  }

  #[test]
  fn test_fieldset_with_grouping_field() {
    let mut doc = Document::new();
    let root = doc.root();
    let fieldset = doc.append(root, Element::new("fieldset")).unwrap();
    doc.append(fieldset, Element::new("input").with_name("company")).unwrap();

    assert_eq!(find_sections(&doc, &EXPERIENCE_SECTIONS), vec![fieldset]);
  }

  #[test]
  fn test_keyword_without_required_field_is_ignored() {
    let mut doc = Document::new();
    let root = doc.root();
    let banner = doc.append(root, Element::new("div").with_class("education-banner")).unwrap();
    doc.append(banner, Element::new("input").with_name("newsletter")).unwrap();

    assert_eq!(find_sections(&doc, &EDUCATION_SECTIONS), vec![root]);
  }

  #[test]
  fn test_education_by_class_keyword() {
    let mut doc = Document::new();
    let root = doc.root();
    let school = doc.append(root, Element::new("div").with_class("School-Block")).unwrap();
    doc.append(school, Element::new("input").with_name("degree")).unwrap();

    assert_eq!(find_sections(&doc, &EDUCATION_SECTIONS), vec![school]);
  }
}
