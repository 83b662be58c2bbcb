use herald::*;
use serial_test::serial;

#[test]
fn test_status_functions() {
  success("Note saved");
  info("No notes yet");
  warn("Resume is close to the size limit");
  error("Invalid JSON file!");
}

#[test]
fn test_multiline_status() {
  let message = "Filled 3 field(s)\nSkipped: phone\nSkipped: gpa";
  info(message);
  assert_eq!(render(Status::Info, message).len(), 3);
}

#[test]
#[serial]
fn test_init_tracing_is_idempotent() {
  std::env::set_var(LOG_ENV, "debug");
  init_tracing(0);
  init_tracing(3);
  tracing::debug!("tracing initialised twice without panicking");
  std::env::remove_var(LOG_ENV);
}
