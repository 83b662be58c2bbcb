/// Fill an outreach template. Supports `{name}`, `{company}` and
/// `{key_focus}`; a missing name or company becomes a bracketed
/// placeholder the user can spot and edit.
pub fn render_note(template: &str, name: &str, company: &str, key_focus: &str) -> String {
  let name = if name.is_empty() { "[Name]" } else { name };
  let company = if company.is_empty() { "[Company]" } else { company };
  template.replace("{name}", name).replace("{company}", company).replace("{key_focus}", key_focus)
}
