use chrono::Utc;
use clap::Subcommand;

use super::session::{load_session, session_path};

#[derive(Subcommand)]
pub enum NoteAction {
    /// Set the note for one set
    Set {
        /// Workout detail id
        #[arg(long)]
        detail: String,
        /// Set number, 1-based
        #[arg(long)]
        set: u32,
        /// Note text; empty clears the note
        text: String,
    },
    /// Print the note for one set
    Get {
        #[arg(long)]
        detail: String,
        #[arg(long)]
        set: u32,
    },
}

pub fn run(action: NoteAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        NoteAction::Set { detail, set, text } => {
            let mut session = load_session()?;
            session.upsert_note(&detail, set, &text, Utc::now());
            session.save_to(&session_path()?)?;
            println!("ok");
        }
        NoteAction::Get { detail, set } => {
            let session = load_session()?;
            println!("{}", session.note(&detail, set));
        }
    }
    Ok(())
}
