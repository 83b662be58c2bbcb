use anyhow::Result;
use colored::*;

use crate::app::App;

pub fn show(app: &App) -> Result<()> {
  let root = app.config.storage_root()?;
  println!("{} {}", "Storage:".bold(), root.display());
  println!("{}", serde_json::to_string_pretty(&app.config)?);
  Ok(())
}
