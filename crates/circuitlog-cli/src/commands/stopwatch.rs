use std::path::PathBuf;

use circuitlog_core::config::data_dir;
use circuitlog_core::Stopwatch;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum StopwatchAction {
    /// Start or resume the rest stopwatch
    Start,
    /// Pause, banking elapsed time
    Pause,
    /// Zero the clock and keep counting
    Reset,
    /// Print elapsed time as JSON
    Status,
}

fn state_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    Ok(data_dir()?.join("stopwatch.json"))
}

fn load_stopwatch(path: &PathBuf) -> Stopwatch {
    if let Ok(json) = std::fs::read_to_string(path) {
        if let Ok(sw) = serde_json::from_str::<Stopwatch>(&json) {
            return sw;
        }
    }
    Stopwatch::new()
}

fn save_stopwatch(path: &PathBuf, sw: &Stopwatch) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string(sw)?)?;
    Ok(())
}

pub fn run(action: StopwatchAction) -> Result<(), Box<dyn std::error::Error>> {
    let path = state_path()?;
    let mut sw = load_stopwatch(&path);

    match action {
        StopwatchAction::Start => sw.start(),
        StopwatchAction::Pause => sw.pause(),
        StopwatchAction::Reset => sw.reset(),
        StopwatchAction::Status => {}
    }

    save_stopwatch(&path, &sw)?;
    let status = serde_json::json!({
        "running": sw.is_running(),
        "elapsed_ms": sw.elapsed_ms(),
        "display": sw.formatted(),
    });
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
