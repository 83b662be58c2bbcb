use chrono::{Duration, Local, TimeZone, Utc};
use ledger::config::OutreachConfig;
use ledger::{Collection, JobDescription, MemoryStorage, Record};
use scout::{newest_first, Extractor};
use std::sync::Arc;

const PASTE: &str = "\
Data Engineer
Company: Northwind Traders
Location: Portland, OR
Recruiter: Alex Kim
---
Platform Engineer at Contoso Tech
Remote within Seattle, WA US
Reach out to Jamie Fox @ Contoso
===
Analyst
Organization: Fabrikam
";

fn outreach() -> OutreachConfig {
  OutreachConfig {
    key_focus: "Rust, Kafka".to_string(),
    template: "Hi {name}, saw the {company} role. I work with {key_focus}.".to_string(),
  }
}

#[test]
fn test_extract_every_posting_in_paste() {
  let extractor = Extractor::new().unwrap();
  let jds = extractor.extract_all(PASTE, &outreach()).unwrap();
  assert_eq!(jds.len(), 3);

  assert_eq!(jds[0].company_name, "Northwind Traders");
  assert_eq!(jds[0].location, "Portland, OR");
  assert_eq!(jds[0].linkedin_note, "Hi Alex Kim, saw the Northwind Traders role. I work with Rust, Kafka.");

  assert_eq!(jds[1].company_name, "Contoso Tech");
  assert_eq!(jds[1].location, "Seattle, WA US");
  assert_eq!(jds[1].recruiter_name, "Jamie Fox");

  assert_eq!(jds[2].company_name, "Fabrikam");
  assert_eq!(jds[2].recruiter_name, "");
  assert!(jds[2].linkedin_note.starts_with("Hi [Name], saw the Fabrikam role."));
  assert!(jds.iter().all(|jd| jd.key_focus == "Rust, Kafka"));
}

#[test]
fn test_stamp_uses_local_display_format() {
  let extractor = Extractor::new().unwrap();
  let now = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
  let jd = extractor.extract_at("Company: Acme", &outreach(), now);
  assert_eq!(jd.date_time, "03/05/2024, 02:07:09 PM");
}

#[tokio::test]
async fn test_saved_postings_list_newest_first() {
  let jds = Collection::<JobDescription>::new(Arc::new(MemoryStorage::new()), "jds");
  let base = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();

  let mut store = jds.load().await.unwrap();
  for (days, company) in [(0, "Oldest"), (10, "Newest"), (5, "Middle")] {
    let mut record = Record::new(JobDescription { company_name: company.to_string(), ..Default::default() });
    record.created_at = base + Duration::days(days);
    store.append(record);
  }
  jds.save(&store).await.unwrap();

  let listed = newest_first(jds.list().await.unwrap());
  let companies: Vec<&str> = listed.iter().map(|r| r.payload.company_name.as_str()).collect();
  assert_eq!(companies, vec!["Newest", "Middle", "Oldest"]);
}
