use std::path::PathBuf;

use chrono::Utc;
use circuitlog_core::config::{data_dir, Config};
use circuitlog_core::{
    Field, RecordClient, SaveOutcome, SilentSink, WorkoutDetail, WorkoutSession,
};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum SessionAction {
    /// Start a session from a workout details JSON file
    Start {
        /// Server-side workout id
        #[arg(long)]
        workout_id: String,
        /// JSON file with the workout's exercise details
        details: PathBuf,
    },
    /// Print session state as JSON
    Status,
    /// Edit one set's draft
    Edit {
        /// Workout detail id
        #[arg(long)]
        detail: String,
        /// Set number, 1-based
        #[arg(long)]
        set: u32,
        /// New reps value
        #[arg(long)]
        reps: Option<String>,
        /// New weight value
        #[arg(long)]
        weight: Option<String>,
        /// Flip the weight unit between kg and lb
        #[arg(long)]
        toggle_unit: bool,
    },
    /// Save a set; --confirm acknowledges logging an empty set
    Save {
        #[arg(long)]
        detail: String,
        #[arg(long)]
        set: u32,
        #[arg(long)]
        confirm: bool,
    },
    /// Push due debounced record updates
    Flush,
    /// Move forward one circuit tab
    NextTab,
    /// Move back one circuit tab
    PrevTab,
    /// Confirmed end of workout
    Finish,
}

pub fn session_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    Ok(data_dir()?.join("session.json"))
}

pub fn load_session() -> Result<WorkoutSession, Box<dyn std::error::Error>> {
    let path = session_path()?;
    if !path.exists() {
        return Err("no active session; run 'session start' first".into());
    }
    Ok(WorkoutSession::load_from(&path)?)
}

fn record_client() -> Result<RecordClient, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    Ok(RecordClient::new(&config.api.base_url, config.api.timeout_secs)?)
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SessionAction::Start {
            workout_id,
            details,
        } => {
            let content = std::fs::read_to_string(&details)?;
            let details: Vec<WorkoutDetail> = serde_json::from_str(&content)?;
            let session = WorkoutSession::new(&workout_id, &details);
            session.save_to(&session_path()?)?;
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
        SessionAction::Status => {
            let session = load_session()?;
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
        SessionAction::Edit {
            detail,
            set,
            reps,
            weight,
            toggle_unit,
        } => {
            let mut session = load_session()?;
            let now = Utc::now();
            if let Some(reps) = reps {
                session.edit_field(&detail, set, Field::Reps, &reps, now)?;
            }
            if let Some(weight) = weight {
                session.edit_field(&detail, set, Field::Weight, &weight, now)?;
            }
            if toggle_unit {
                session.toggle_weight_unit(&detail, set, now)?;
            }
            session.save_to(&session_path()?)?;
            let row = session.row(&detail, set).ok_or("unknown row")?;
            println!("{}", serde_json::to_string_pretty(row.draft())?);
        }
        SessionAction::Save {
            detail,
            set,
            confirm,
        } => {
            let client = record_client()?;
            let mut session = load_session()?;
            let runtime = tokio::runtime::Runtime::new()?;
            let outcome = runtime.block_on(session.save(&client, &detail, set, confirm))?;
            session.save_to(&session_path()?)?;
            match outcome {
                SaveOutcome::ConfirmationRequired => {
                    println!("{{\"type\": \"confirmation_required\"}}");
                }
                SaveOutcome::Completed(events) => {
                    println!("{}", serde_json::to_string_pretty(&events)?);
                }
            }
        }
        SessionAction::Flush => {
            let client = record_client()?;
            let mut session = load_session()?;
            let runtime = tokio::runtime::Runtime::new()?;
            let events = runtime.block_on(session.flush_updates(&client, Utc::now()));
            session.save_to(&session_path()?)?;
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
        SessionAction::NextTab => {
            let mut session = load_session()?;
            let index = session.advance_tab();
            session.save_to(&session_path()?)?;
            println!("{}", serde_json::json!({ "index": index }));
        }
        SessionAction::PrevTab => {
            let mut session = load_session()?;
            let index = session.retreat_tab();
            session.save_to(&session_path()?)?;
            println!("{}", serde_json::json!({ "index": index }));
        }
        SessionAction::Finish => {
            let client = record_client()?;
            let mut session = load_session()?;
            let runtime = tokio::runtime::Runtime::new()?;
            let mut sink = SilentSink::default();
            let events = runtime.block_on(session.finish_workout(&client, &mut sink))?;
            std::fs::remove_file(session_path()?)?;
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
    }
    Ok(())
}
