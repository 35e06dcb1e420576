//! `ww scan`: highlight a page.
//!
//! Pulls statuses from Fieldbook (unless offline), scans the page into the
//! dictionary, optionally pushes the page's words back, and writes
//! highlighted HTML. The status summary, over the page's words only, goes to
//! stderr.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use webwords_core::sync::{pull, push_all};
use webwords_core::WordRegistry;

use crate::config::Config;
use crate::fieldbook::FieldbookClient;
use crate::page::{render_html, scan_page};
use crate::progress::{SyncEvent, SyncReporter};

/// Options for a single scan.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Write HTML here instead of stdout.
    pub out: Option<PathBuf>,
    /// Skip all network calls.
    pub offline: bool,
    /// After scanning, write the status of every word on the page to the
    /// sheet.
    pub push: bool,
}

pub async fn run_scan(
    config: &Config,
    file: &Path,
    opts: &ScanOptions,
    reporter: &dyn SyncReporter,
) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read page: {}", file.display()))?;

    let mut registry = WordRegistry::new(config.normalizer());

    let client = if opts.offline {
        None
    } else {
        Some(FieldbookClient::new(&config.fieldbook)?)
    };

    if let Some(client) = &client {
        reporter.report(SyncEvent::Fetching {
            sheet: client.sheet_url().to_string(),
        });
        let n = pull(client, &mut registry)
            .await
            .context("Failed to fetch word statuses from Fieldbook")?;
        reporter.report(SyncEvent::Applied { n: n as u64 });
    }

    let page = scan_page(&text, &mut registry);

    let mut failures = 0usize;
    if let (Some(client), true) = (&client, opts.push) {
        let report = push_all(client, &page.words).await;
        for (word, id) in &report.pushed {
            reporter.report(SyncEvent::Pushed {
                word: word.clone(),
                id: id.0,
            });
        }
        for (word, e) in &report.failed {
            reporter.report(SyncEvent::Failed {
                word: word.clone(),
                error: e.to_string(),
            });
        }
        failures = report.failed.len();
    }

    let title = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "page".to_string());
    let html = render_html(&page, &title);

    match &opts.out {
        Some(path) => std::fs::write(path, &html)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{}", html),
    }

    let counts = page.counts();
    eprintln!(
        "scan {}  occurrences: {}  words: {}  known: {}  unknown: {}  unverified: {}",
        title,
        page.occurrence_count(),
        counts.total(),
        counts.known,
        counts.unknown,
        counts.unverified
    );

    if failures > 0 {
        anyhow::bail!("{} word(s) failed to sync; local statuses were kept", failures);
    }

    Ok(())
}
