use chrono::{DateTime, Datelike, NaiveDate};

const FULL_DATE_FORMATS: [&str; 6] =
  ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];

/// Formats for month precision dates, parsed with a `1 ` day prefix
const MONTH_FORMATS: [&str; 3] = ["%d %B %Y", "%d %b %Y", "%d %m/%Y"];

fn is_year_month(text: &str) -> bool {
  let bytes = text.as_bytes();
  bytes.len() == 7
    && bytes[4] == b'-'
    && bytes[..4].iter().all(u8::is_ascii_digit)
    && bytes[5..].iter().all(u8::is_ascii_digit)
}

fn parse(text: &str) -> Option<NaiveDate> {
  if let Ok(stamp) = DateTime::parse_from_rfc3339(text) {
    return Some(stamp.date_naive());
  }
  FULL_DATE_FORMATS
    .iter()
    .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
    .or_else(|| {
      let with_day = format!("1 {text}");
      MONTH_FORMATS.iter().find_map(|format| NaiveDate::parse_from_str(&with_day, format).ok())
    })
}

/// Normalise a date to the `YYYY-MM` form month inputs expect. Text that
/// does not parse as a date is returned unchanged.
pub fn format_date_for_input(text: &str) -> String {
  let text = text.trim();
  if text.is_empty() || is_year_month(text) {
    return text.to_string();
  }
  match parse(text) {
    Some(date) => format!("{:04}-{:02}", date.year(), date.month()),
    None => text.to_string(),
  }
}
