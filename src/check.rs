use anyhow::Result;

use crate::config::{Config, KEY_ENV, SECRET_ENV};

/// Print the effective Fieldbook settings and whether credentials resolve.
pub fn run_check(config: &Config) -> Result<()> {
    let fb = &config.fieldbook;
    let source = |in_file: bool, env: &str| {
        if in_file {
            "config".to_string()
        } else if std::env::var(env).map(|v| !v.is_empty()).unwrap_or(false) {
            format!("${}", env)
        } else {
            "MISSING".to_string()
        }
    };

    println!("{:<12} {}", "book", fb.book);
    println!("{:<12} {}", "base_url", fb.base_url);
    println!("{:<12} {}", "sheet", fb.sheet);
    println!(
        "{:<12} {}",
        "key",
        source(fb.key.as_deref().is_some_and(|k| !k.is_empty()), KEY_ENV)
    );
    println!(
        "{:<12} {}",
        "secret",
        source(
            fb.secret.as_deref().is_some_and(|s| !s.is_empty()),
            SECRET_ENV
        )
    );

    let ready = fb.credentials().is_ok();
    println!("{:<12} {}", "ready", ready);

    Ok(())
}
