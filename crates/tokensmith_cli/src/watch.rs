//! Rebuild on source changes

use anyhow::{Context, Result};
use notify::{Event, RecursiveMode, Watcher};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;
use tracing::{error, info};

use crate::build::rebuild;
use crate::config::TokensmithConfig;

/// Quiet period before a burst of file events triggers one rebuild
const DEBOUNCE: Duration = Duration::from_millis(200);

/// Build once, then rebuild whenever a file under a source directory changes.
///
/// Runs until the process is interrupted.
pub fn watch(root: &Path, config: &TokensmithConfig) -> Result<()> {
    run_build(root, config);

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to start file watcher")?;

    let dirs = watch_dirs(root, &config.source);
    for dir in &dirs {
        watcher
            .watch(dir, RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch {}", dir.display()))?;
        info!(dir = %dir.display(), "watching");
    }

    let outputs: Vec<PathBuf> = config
        .platforms
        .values()
        .map(|p| root.join(&p.build_path))
        .collect();

    while let Ok(event) = rx.recv() {
        let mut relevant = is_source_change(&event, &outputs);
        // Drain the rest of the burst.
        while let Ok(next) = rx.recv_timeout(DEBOUNCE) {
            relevant |= is_source_change(&next, &outputs);
        }
        if relevant {
            info!("sources changed, rebuilding");
            run_build(root, config);
        }
    }
    Ok(())
}

fn run_build(root: &Path, config: &TokensmithConfig) {
    match rebuild(root, config) {
        Ok(written) => info!(files = written.len(), "build finished"),
        Err(err) => error!("build failed: {err:#}"),
    }
}

fn is_source_change(event: &notify::Result<Event>, outputs: &[PathBuf]) -> bool {
    match event {
        Ok(event) => event
            .paths
            .iter()
            .any(|path| !outputs.iter().any(|out| path.starts_with(out))),
        Err(err) => {
            error!("watch error: {err}");
            false
        }
    }
}

/// The literal directory prefix of each source pattern
fn watch_dirs(root: &Path, patterns: &[String]) -> BTreeSet<PathBuf> {
    patterns
        .iter()
        .map(|pattern| {
            let literal: Vec<&str> = pattern
                .split('/')
                .take_while(|segment| !segment.contains(['*', '?', '[', '{']))
                .collect();
            // The final literal segment of a pattern without wildcards is a file name.
            let depth = if literal.len() == pattern.split('/').count() {
                literal.len().saturating_sub(1)
            } else {
                literal.len()
            };
            literal[..depth]
                .iter()
                .fold(root.to_path_buf(), |dir, segment| dir.join(segment))
        })
        .collect()
}
