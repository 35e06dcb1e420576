//! Sync progress reporting.
//!
//! Reports what `ww` is doing with the remote sheet: fetching, applying
//! records, and pushing individual words. Progress is emitted on **stderr**
//! so stdout (rendered HTML, word tables) remains parseable for scripts.

use std::io::Write;

use clap::ValueEnum;

/// A single progress event.
#[derive(Clone, Debug)]
pub enum SyncEvent {
    /// Requesting every record from the sheet.
    Fetching { sheet: String },
    /// Fetched records were applied to the dictionary.
    Applied { n: u64 },
    /// About to write one word.
    Pushing { word: String },
    /// A word was written and now carries record `id`.
    Pushed { word: String, id: u64 },
    /// Writing a word failed; local state is unchanged.
    Failed { word: String, error: String },
}

/// Reports sync progress. Implementations write to stderr (human or JSON).
pub trait SyncReporter: Send + Sync {
    fn report(&self, event: SyncEvent);
}

/// Human-friendly progress on stderr: "sync  pushed  fish -> record 12".
pub struct StderrProgress;

impl SyncReporter for StderrProgress {
    fn report(&self, event: SyncEvent) {
        let line = match &event {
            SyncEvent::Fetching { sheet } => format!("sync  fetching  {}\n", sheet),
            SyncEvent::Applied { n } => {
                format!("sync  applied  {} records\n", format_number(*n))
            }
            SyncEvent::Pushing { word } => format!("sync  pushing  {}\n", word),
            SyncEvent::Pushed { word, id } => {
                format!("sync  pushed  {} -> record {}\n", word, id)
            }
            SyncEvent::Failed { word, error } => {
                format!("sync  FAILED  {}: {}\n", word, error)
            }
        };
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
        let _ = std::io::stderr().lock().flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl SyncReporter for JsonProgress {
    fn report(&self, event: SyncEvent) {
        let obj = event_json(&event);
        if let Ok(line) = serde_json::to_string(&obj) {
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
            let _ = std::io::stderr().lock().flush();
        }
    }
}

fn event_json(event: &SyncEvent) -> serde_json::Value {
    match event {
        SyncEvent::Fetching { sheet } => serde_json::json!({
            "event": "progress",
            "phase": "fetching",
            "sheet": sheet
        }),
        SyncEvent::Applied { n } => serde_json::json!({
            "event": "progress",
            "phase": "applied",
            "n": n
        }),
        SyncEvent::Pushing { word } => serde_json::json!({
            "event": "progress",
            "phase": "pushing",
            "word": word
        }),
        SyncEvent::Pushed { word, id } => serde_json::json!({
            "event": "progress",
            "phase": "pushed",
            "word": word,
            "id": id
        }),
        SyncEvent::Failed { word, error } => serde_json::json!({
            "event": "error",
            "phase": "pushing",
            "word": word,
            "error": error
        }),
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl SyncReporter for NoProgress {
    fn report(&self, _event: SyncEvent) {}
}

fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + (s.len() - 1) / 3);
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Default: human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    pub fn reporter(&self) -> Box<dyn SyncReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}
