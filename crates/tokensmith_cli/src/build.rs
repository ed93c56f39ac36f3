//! Clean and build passes over every configured platform

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use tokensmith_scss::{render, strip_theme, RenderMode, RenderOptions};
use tokensmith_tokens::{Dictionary, TokenFilter, TokenSource};

use crate::config::{FileConfig, TokensmithConfig, WarningLevel};

/// Load every configured source into one dictionary
pub fn load_dictionary(root: &Path, config: &TokensmithConfig) -> Result<Dictionary> {
    let dictionary = TokenSource::new(root)
        .patterns(config.source.iter().cloned())
        .broken_references(config.log.broken_references)
        .load()
        .context("Failed to load token sources")?;
    info!(tokens = dictionary.len(), "loaded design tokens");
    Ok(dictionary)
}

/// Remove every configured output, then the build directory if it ends up empty.
///
/// Returns the number of files removed.
pub fn clean(root: &Path, config: &TokensmithConfig) -> Result<usize> {
    let mut removed = 0;
    for (name, platform) in &config.platforms {
        let build_dir = root.join(&platform.build_path);
        for file in &platform.files {
            let path = build_dir.join(&file.destination);
            if path.is_file() {
                fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove {}", path.display()))?;
                debug!(platform = %name, file = %path.display(), "removed");
                removed += 1;
            }
        }

        let is_empty = fs::read_dir(&build_dir)
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(false);
        if is_empty {
            fs::remove_dir(&build_dir)
                .with_context(|| format!("Failed to remove {}", build_dir.display()))?;
        }
    }
    Ok(removed)
}

/// Render and write every configured file. Returns the written paths.
pub fn build(root: &Path, config: &TokensmithConfig) -> Result<Vec<PathBuf>> {
    let dictionary = load_dictionary(root, config)?;
    let header = config.header.file_header()?;
    let mut warnings = Warnings::new(config.log.warnings);
    let mut written = Vec::new();

    for (name, platform) in &config.platforms {
        let build_dir = root.join(&platform.build_path);
        fs::create_dir_all(&build_dir)
            .with_context(|| format!("Failed to create {}", build_dir.display()))?;

        for file in &platform.files {
            let mode = file.render_mode();
            check_selection(&dictionary, file, &mode, &mut warnings);

            let mut options = RenderOptions::new(mode);
            options.header = header.clone();
            let contents = render(&dictionary, &options);

            let path = build_dir.join(&file.destination);
            fs::write(&path, contents)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(platform = %name, file = %path.display(), "built");
            written.push(path);
        }
    }

    warnings.finish()?;
    Ok(written)
}

/// Clean, then build
pub fn rebuild(root: &Path, config: &TokensmithConfig) -> Result<Vec<PathBuf>> {
    clean(root, config)?;
    build(root, config)
}

fn check_selection(
    dictionary: &Dictionary,
    file: &FileConfig,
    mode: &RenderMode,
    warnings: &mut Warnings,
) {
    let selections: Vec<(&TokenFilter, Option<&str>)> = match mode {
        RenderMode::Flat { filter } => vec![(filter, None)],
        RenderMode::Theme(theme) => vec![(&theme.filter, Some(theme.name.as_str()))],
        RenderMode::Composite { themes, core } => themes
            .iter()
            .map(|t| (&t.filter, None))
            .chain(std::iter::once((core, None)))
            .collect(),
    };

    for (filter, theme) in selections {
        let mut seen = HashSet::new();
        let mut count = 0;
        for token in dictionary.filter(filter) {
            count += 1;
            let name = match theme {
                Some(theme) => strip_theme(&token.name, theme),
                None => token.name.as_str(),
            };
            if !seen.insert(name) {
                warnings.push(format!(
                    "{}: duplicate token name `{name}` ({filter:?})",
                    file.destination
                ));
            }
        }
        if count == 0 {
            warnings.push(format!(
                "{}: filter {filter:?} selects no tokens",
                file.destination
            ));
        }
    }
}

/// Collects build warnings according to the configured level
struct Warnings {
    level: WarningLevel,
    collected: Vec<String>,
}

impl Warnings {
    fn new(level: WarningLevel) -> Self {
        Self {
            level,
            collected: Vec::new(),
        }
    }

    fn push(&mut self, message: String) {
        match self.level {
            WarningLevel::Disabled => {}
            WarningLevel::Warn => warn!("{message}"),
            WarningLevel::Error => self.collected.push(message),
        }
    }

    fn finish(self) -> Result<()> {
        if self.collected.is_empty() {
            return Ok(());
        }
        anyhow::bail!(
            "build failed with {} warning(s):\n  {}",
            self.collected.len(),
            self.collected.join("\n  ")
        )
    }
}
