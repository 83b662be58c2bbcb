use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
  #[error("Paste at least one job description")]
  EmptyInput,

  #[error("Invalid extraction pattern: {0}")]
  Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, ScoutError>;
