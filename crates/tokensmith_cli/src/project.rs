//! Project scaffolding

use anyhow::{Context, Result};
use serde_json::json;
use std::fs;
use std::path::Path;

use crate::config::{TokensmithConfig, CONFIG_FILE};

/// Create `tokensmith.toml` and a `sources/` directory with sample core, light and dark tokens
pub fn create_project(path: &Path) -> Result<()> {
    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{} already exists", config_path.display());
    }

    let sources = path.join("sources");
    fs::create_dir_all(&sources)
        .with_context(|| format!("Failed to create {}", sources.display()))?;

    fs::write(&config_path, TokensmithConfig::starter().to_toml()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    let samples = [
        ("core.json", core_sample()),
        ("light.json", theme_sample("light", "#fafafa", "#2196f3")),
        ("dark.json", theme_sample("dark", "#121212", "#90caf9")),
    ];
    for (file, body) in samples {
        let target = sources.join(file);
        if target.exists() {
            continue;
        }
        fs::write(&target, serde_json::to_string_pretty(&body)?)
            .with_context(|| format!("Failed to write {}", target.display()))?;
    }

    Ok(())
}

fn core_sample() -> serde_json::Value {
    json!({
        "space": {
            "$type": "dimension",
            "2": { "$value": "8px" },
            "4": { "$value": "16px" }
        },
        "radius": {
            "md": { "$value": "4px", "$type": "dimension" }
        },
        "card-padding": { "$value": "{space.4} {space.2}", "$type": "spacing" }
    })
}

fn theme_sample(theme: &str, background: &str, accent: &str) -> serde_json::Value {
    json!({
        theme: {
            "color": {
                "$type": "color",
                "bg-primary": { "$value": background },
                "accent": { "$value": accent }
            },
            "border-focus": {
                "$type": "border",
                "$value": {
                    "width": "2px",
                    "style": "solid",
                    "color": format!("{{{theme}.color.accent}}")
                }
            }
        }
    })
}
