use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod app;
mod commands;

use app::App;
use commands::jd::PostingArgs;
use commands::profile::{EducationArgs, ExperienceArgs, PersonalArgs};

#[derive(Parser)]
#[command(name = "pinboard")]
#[command(about = "Pinned notes, job posting extraction and application autofill")]
#[command(version)]
struct Cli {
  /// Configuration file (defaults to .pinboard.json or pinboard.json in the current directory)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Increase log verbosity (-v, -vv, -vvv)
  #[arg(short, long, action = clap::ArgAction::Count, global = true)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Manage pinned notes
  Notes {
    #[command(subcommand)]
    command: NotesCommand,
  },
  /// Extract and browse job descriptions
  Jd {
    #[command(subcommand)]
    command: JdCommand,
  },
  /// Manage the application profile used for autofill
  Profile {
    #[command(subcommand)]
    command: ProfileCommand,
  },
  /// Fill a JSON page snapshot from the saved profile
  Fill {
    /// Page snapshot to fill
    snapshot: PathBuf,
    /// Write the filled snapshot here
    #[arg(short, long)]
    output: Option<PathBuf>,
  },
  /// Inspect configuration
  Config {
    #[command(subcommand)]
    command: ConfigCommand,
  },
}

#[derive(Subcommand)]
enum NotesCommand {
  /// Save a new note
  Add {
    title: String,
    content: String,
    /// Comma-separated tags
    #[arg(short, long)]
    tags: Option<String>,
  },
  /// List notes, pinned first
  List,
  /// Search titles, content and tags
  Search {
    /// Case-insensitive text; empty lists everything
    #[arg(default_value = "")]
    query: String,
  },
  /// Change a note's title, content or tags
  Edit {
    /// Note id or unique id prefix
    id: String,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    content: Option<String>,
    /// Comma-separated tags, replacing the current ones
    #[arg(short, long)]
    tags: Option<String>,
  },
  /// Delete a note
  Delete {
    /// Note id or unique id prefix
    id: String,
  },
  /// Pin or unpin a note
  Pin {
    /// Note id or unique id prefix
    id: String,
  },
  /// Drag a note onto another one
  Move {
    /// Note being moved
    id: String,
    /// Note it is dropped on
    target: String,
    /// Land after the target instead of before it
    #[arg(long)]
    after: bool,
  },
}

#[derive(Subcommand)]
enum JdCommand {
  /// Extract postings from a file, or stdin when no file is given
  Extract {
    input: Option<PathBuf>,
    /// Print the results without saving them
    #[arg(long)]
    no_save: bool,
  },
  /// List saved postings, newest first
  List,
  /// Correct fields of a saved posting
  Edit {
    /// Posting id or unique id prefix
    id: String,
    #[command(flatten)]
    fields: PostingArgs,
  },
  /// Delete a saved posting
  Delete {
    /// Posting id or unique id prefix
    id: String,
  },
}

#[derive(Subcommand)]
enum ProfileCommand {
  /// Print the stored profile as JSON
  Export {
    /// Write to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
  },
  /// Replace the stored profile with an exported document
  Import { file: PathBuf },
  /// Summarise the stored profile
  Show,
  /// Attach a resume file to the profile
  AttachResume { file: PathBuf },
  /// Update contact details; omitted fields keep their saved values
  SetPersonal(PersonalArgs),
  /// Manage work history entries
  Experience {
    #[command(subcommand)]
    command: ExperienceCommand,
  },
  /// Manage education entries
  Education {
    #[command(subcommand)]
    command: EducationCommand,
  },
  /// Replace the skill lists
  Skills {
    /// Comma-separated technical skills
    #[arg(long, default_value = "")]
    technical: String,
    /// One certification; repeat for more
    #[arg(long = "certification")]
    certifications: Vec<String>,
    /// Comma-separated spoken languages
    #[arg(long, default_value = "")]
    languages: String,
  },
  /// Save the cover letter
  CoverLetter {
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    text: Option<String>,
    /// Read the letter from a file
    #[arg(short, long)]
    file: Option<PathBuf>,
  },
}

#[derive(Subcommand)]
enum ExperienceCommand {
  /// Append an entry and print its id
  Add(ExperienceArgs),
  /// Change an entry; omitted fields keep their values
  Edit {
    /// Entry id or unique id prefix
    id: String,
    #[command(flatten)]
    fields: ExperienceArgs,
  },
  /// Remove an entry
  Delete {
    /// Entry id or unique id prefix
    id: String,
  },
}

#[derive(Subcommand)]
enum EducationCommand {
  /// Append an entry and print its id
  Add(EducationArgs),
  /// Change an entry; omitted fields keep their values
  Edit {
    /// Entry id or unique id prefix
    id: String,
    #[command(flatten)]
    fields: EducationArgs,
  },
  /// Remove an entry
  Delete {
    /// Entry id or unique id prefix
    id: String,
  },
}

#[derive(Subcommand)]
enum ConfigCommand {
  /// Print the effective configuration
  Show,
}

async fn run(cli: Cli) -> Result<()> {
  let app = App::load(cli.config.as_deref())?;

  match cli.command {
    Commands::Notes { command } => match command {
      NotesCommand::Add { title, content, tags } => {
        commands::notes::add(&app, title, content, tags).await
      }
      NotesCommand::List => commands::notes::list(&app).await,
      NotesCommand::Search { query } => commands::notes::search(&app, &query).await,
      NotesCommand::Edit { id, title, content, tags } => {
        commands::notes::edit(&app, &id, title, content, tags).await
      }
      NotesCommand::Delete { id } => commands::notes::delete(&app, &id).await,
      NotesCommand::Pin { id } => commands::notes::pin(&app, &id).await,
      NotesCommand::Move { id, target, after } => {
        commands::notes::move_note(&app, &id, &target, after).await
      }
    },
    Commands::Jd { command } => match command {
      JdCommand::Extract { input, no_save } => {
        commands::jd::extract(&app, input.as_deref(), no_save).await
      }
      JdCommand::List => commands::jd::list(&app).await,
      JdCommand::Edit { id, fields } => commands::jd::edit(&app, &id, fields).await,
      JdCommand::Delete { id } => commands::jd::delete(&app, &id).await,
    },
    Commands::Profile { command } => match command {
      ProfileCommand::Export { output } => commands::profile::export(&app, output.as_deref()).await,
      ProfileCommand::Import { file } => commands::profile::import(&app, &file).await,
      ProfileCommand::Show => commands::profile::show(&app).await,
      ProfileCommand::AttachResume { file } => commands::profile::attach_resume(&app, &file).await,
      ProfileCommand::SetPersonal(args) => commands::profile::set_personal(&app, args).await,
      ProfileCommand::Experience { command } => match command {
        ExperienceCommand::Add(args) => commands::profile::add_experience(&app, args).await,
        ExperienceCommand::Edit { id, fields } => {
          commands::profile::edit_experience(&app, &id, fields).await
        }
        ExperienceCommand::Delete { id } => commands::profile::delete_experience(&app, &id).await,
      },
      ProfileCommand::Education { command } => match command {
        EducationCommand::Add(args) => commands::profile::add_education(&app, args).await,
        EducationCommand::Edit { id, fields } => {
          commands::profile::edit_education(&app, &id, fields).await
        }
        EducationCommand::Delete { id } => commands::profile::delete_education(&app, &id).await,
      },
      ProfileCommand::Skills { technical, certifications, languages } => {
        commands::profile::set_skills(&app, &technical, &certifications, &languages).await
      }
      ProfileCommand::CoverLetter { text, file } => {
        commands::profile::set_cover_letter(&app, text, file.as_deref()).await
      }
    },
    Commands::Fill { snapshot, output } => {
      commands::fill::handle(&app, &snapshot, output.as_deref()).await
    }
    Commands::Config { command } => match command {
      ConfigCommand::Show => commands::config::show(&app),
    },
  }
}

#[tokio::main]
async fn main() {
  let cli = Cli::parse();
  herald::init_tracing(cli.verbose);

  if let Err(e) = run(cli).await {
    herald::error(&format!("{e:#}"));
    std::process::exit(1);
  }
}
