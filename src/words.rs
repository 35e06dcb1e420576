//! `ww words` and `ww mark`: read and write statuses in the sheet.

use anyhow::{bail, Context, Result};

use webwords_core::sync::{pull, push};
use webwords_core::{LearningStatus, WordRegistry};

use crate::config::Config;
use crate::fieldbook::FieldbookClient;
use crate::progress::{SyncEvent, SyncReporter};

async fn pull_registry(
    config: &Config,
    client: &FieldbookClient,
    reporter: &dyn SyncReporter,
) -> Result<WordRegistry> {
    let mut registry = WordRegistry::new(config.normalizer());
    reporter.report(SyncEvent::Fetching {
        sheet: client.sheet_url().to_string(),
    });
    let n = pull(client, &mut registry)
        .await
        .context("Failed to fetch word statuses from Fieldbook")?;
    reporter.report(SyncEvent::Applied { n: n as u64 });
    Ok(registry)
}

/// Print every word in the sheet, optionally filtered by status.
pub async fn run_words(
    config: &Config,
    status: Option<LearningStatus>,
    reporter: &dyn SyncReporter,
) -> Result<()> {
    let client = FieldbookClient::new(&config.fieldbook)?;
    let registry = pull_registry(config, &client, reporter).await?;

    println!("{:<24} {:<12} RECORD", "WORD", "STATUS");
    for word in registry.words() {
        if status.is_some_and(|s| s != word.learning_status()) {
            continue;
        }
        let id = word
            .remote_record_id()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<24} {:<12} {}", word.text(), word.learning_status(), id);
    }

    Ok(())
}

/// Set one word's status and write it to the sheet.
pub async fn run_mark(
    config: &Config,
    text: &str,
    status: LearningStatus,
    reporter: &dyn SyncReporter,
) -> Result<()> {
    let client = FieldbookClient::new(&config.fieldbook)?;
    let mut registry = pull_registry(config, &client, reporter).await?;

    if registry.normalizer().normalize_text(text).is_empty() {
        bail!("'{}' contains no word characters", text);
    }

    let word = registry.resolve_text(text, Some(status));
    reporter.report(SyncEvent::Pushing {
        word: word.text().to_string(),
    });
    let id = match push(&client, &word).await {
        Ok(id) => id,
        Err(e) => {
            reporter.report(SyncEvent::Failed {
                word: word.text().to_string(),
                error: e.to_string(),
            });
            return Err(e).with_context(|| format!("Failed to save '{}'", word.text()));
        }
    };
    reporter.report(SyncEvent::Pushed {
        word: word.text().to_string(),
        id: id.0,
    });

    println!("{}  {}  record {}", word.text(), word.learning_status(), id);
    Ok(())
}
