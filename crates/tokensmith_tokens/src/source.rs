//! Token source loading
//!
//! Reads DTCG-style JSON token files into a [`Dictionary`]:
//!
//! ```json
//! {
//!   "color": {
//!     "$type": "color",
//!     "blue": { "200": { "$value": "#90caf9" } }
//!   },
//!   "light": {
//!     "bg": { "$value": "{color.blue.200}", "$type": "color" }
//!   }
//! }
//! ```
//!
//! - Objects carrying `$value` are tokens; every other object is a group
//! - A group's `$type` applies to all tokens below it unless overridden
//! - `{group.token}` aliases are resolved against token paths across all files
//!
//! Composite values are flattened into a plain shorthand: object members are
//! joined with spaces in authoring order and array items with `, `. No unit or
//! colour conversion happens here.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use globset::{GlobBuilder, GlobSetBuilder};
use regex::Regex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::dictionary::Dictionary;
use crate::error::TokenError;
use crate::token::{Token, TokenType};

/// What to do with an alias that points at no token
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BrokenReferencePolicy {
    /// Abort the load
    #[default]
    Throw,
    /// Log a warning and keep the alias text
    Console,
}

/// `{group.token}`; the capture is the dotted path
fn alias_pattern() -> &'static Regex {
    static ALIAS: OnceLock<Regex> = OnceLock::new();
    ALIAS.get_or_init(|| Regex::new(r"\{([^{}\s]+)\}").expect("alias pattern is valid"))
}

/// Token files to load, relative to a root directory
#[derive(Clone, Debug)]
pub struct TokenSource {
    root: PathBuf,
    patterns: Vec<String>,
    broken_references: BrokenReferencePolicy,
}

impl TokenSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            patterns: Vec::new(),
            broken_references: BrokenReferencePolicy::default(),
        }
    }

    /// Add a glob pattern (`sources/*.json`), matched against paths relative to the root
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    pub fn patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn broken_references(mut self, policy: BrokenReferencePolicy) -> Self {
        self.broken_references = policy;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Matching files as root-relative paths, sorted
    pub fn discover(&self) -> Result<Vec<PathBuf>, TokenError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.patterns {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|source| TokenError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|source| TokenError::Pattern {
            pattern: self.patterns.join(", "),
            source,
        })?;

        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(&self.root)
                    .ok()
                    .map(Path::to_path_buf)
            })
            .filter(|rel| set.is_match(rel))
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(TokenError::NoSources {
                root: self.root.clone(),
                patterns: self.patterns.clone(),
            });
        }
        Ok(files)
    }

    /// Read, parse and resolve every matching file into one dictionary
    pub fn load(&self) -> Result<Dictionary, TokenError> {
        let mut documents = Vec::new();
        for rel in self.discover()? {
            let path = self.root.join(&rel);
            let content = fs::read_to_string(&path).map_err(|source| TokenError::Io {
                path: path.clone(),
                source,
            })?;
            let doc: Value = serde_json::from_str(&content)
                .map_err(|source| TokenError::Json { path, source })?;
            debug!(source = %rel.display(), "loaded token source");
            documents.push((source_key(&rel), doc));
        }
        self.resolve(documents)
    }

    /// Resolve already-parsed documents, given as `(source file, json)` pairs in load order
    pub fn resolve(&self, documents: Vec<(String, Value)>) -> Result<Dictionary, TokenError> {
        let mut raw = Vec::new();
        for (source_file, doc) in &documents {
            collect_tokens(doc, source_file, &mut Vec::new(), None, &mut raw);
        }
        debug!(tokens = raw.len(), files = documents.len(), "flattened token sources");

        let mut aliases = AliasResolver::new(&raw, self.broken_references);
        let mut tokens = Vec::with_capacity(raw.len());
        for idx in 0..raw.len() {
            let value = aliases.resolve(idx, &mut Vec::new())?;
            let entry = &raw[idx];
            tokens.push(Token {
                name: entry.name.clone(),
                path: entry.path.clone(),
                source_file: entry.source_file.clone(),
                original_value: value.clone(),
                value,
                token_type: TokenType::parse(entry.token_type.as_deref().unwrap_or_default()),
                literal: !alias_pattern().is_match(&entry.text),
            });
        }
        Ok(Dictionary::new(tokens))
    }
}

fn source_key(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

struct RawToken {
    name: String,
    path: String,
    source_file: String,
    text: String,
    token_type: Option<String>,
}

fn kebab_segment(segment: &str) -> String {
    segment
        .trim()
        .to_lowercase()
        .replace([' ', '_'], "-")
}

fn collect_tokens(
    node: &Value,
    source_file: &str,
    path: &mut Vec<String>,
    inherited_type: Option<&str>,
    out: &mut Vec<RawToken>,
) {
    let Value::Object(map) = node else {
        return;
    };
    let own_type = map.get("$type").and_then(Value::as_str).or(inherited_type);

    if let Some(value) = map.get("$value") {
        out.push(RawToken {
            name: path.iter().map(|s| kebab_segment(s)).collect::<Vec<_>>().join("-"),
            path: path.join("."),
            source_file: source_file.to_string(),
            text: value_text(value),
            token_type: own_type.map(str::to_string),
        });
        return;
    }

    for (key, child) in map {
        if key.starts_with('$') {
            continue;
        }
        path.push(key.clone());
        collect_tokens(child, source_file, path, own_type, out);
        path.pop();
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(", "),
        Value::Object(map) => map
            .iter()
            .filter(|(k, _)| !k.starts_with('$'))
            .map(|(_, v)| value_text(v))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
    }
}

struct AliasResolver<'a> {
    raw: &'a [RawToken],
    by_path: FxHashMap<&'a str, usize>,
    resolved: Vec<Option<String>>,
    policy: BrokenReferencePolicy,
}

impl<'a> AliasResolver<'a> {
    fn new(raw: &'a [RawToken], policy: BrokenReferencePolicy) -> Self {
        let mut by_path = FxHashMap::default();
        for (idx, token) in raw.iter().enumerate() {
            by_path.entry(token.path.as_str()).or_insert(idx);
        }
        Self {
            raw,
            by_path,
            resolved: vec![None; raw.len()],
            policy,
        }
    }

    fn resolve(&mut self, idx: usize, stack: &mut Vec<usize>) -> Result<String, TokenError> {
        if let Some(done) = &self.resolved[idx] {
            return Ok(done.clone());
        }
        if let Some(pos) = stack.iter().position(|&i| i == idx) {
            let mut chain: Vec<String> =
                stack[pos..].iter().map(|&i| self.raw[i].path.clone()).collect();
            chain.push(self.raw[idx].path.clone());
            return Err(TokenError::CircularReference { chain });
        }

        let raw = self.raw;
        let text = raw[idx].text.as_str();
        stack.push(idx);

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for caps in alias_pattern().captures_iter(text) {
            let (Some(whole), Some(target)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            out.push_str(&text[last..whole.start()]);
            last = whole.end();

            match self.by_path.get(target.as_str()).copied() {
                Some(target_idx) => out.push_str(&self.resolve(target_idx, stack)?),
                None => match self.policy {
                    BrokenReferencePolicy::Throw => {
                        return Err(TokenError::BrokenReference {
                            token: raw[idx].path.clone(),
                            reference: target.as_str().to_string(),
                        });
                    }
                    BrokenReferencePolicy::Console => {
                        warn!(
                            token = %raw[idx].path,
                            reference = target.as_str(),
                            "broken token reference"
                        );
                        out.push_str(whole.as_str());
                    }
                },
            }
        }
        out.push_str(&text[last..]);

        stack.pop();
        self.resolved[idx] = Some(out.clone());
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn resolve(docs: Vec<(&str, Value)>) -> Result<Dictionary, TokenError> {
        TokenSource::new(".").resolve(
            docs.into_iter()
                .map(|(f, v)| (f.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn alias_pattern_captures_dotted_paths() {
        let caps: Vec<&str> = alias_pattern()
            .captures_iter("{space.4} {color.blue.200} { not } {}")
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect();
        assert_eq!(caps, vec!["space.4", "color.blue.200"]);
    }

    #[test]
    fn groups_flatten_into_kebab_names_and_inherit_type() {
        let dict = resolve(vec![(
            "sources/core.json",
            json!({
                "color": {
                    "$type": "color",
                    "Blue Sky": { "200": { "$value": "#90caf9" } }
                },
                "space_scale": { "4": { "$value": 16, "$type": "dimension" } }
            }),
        )])
        .unwrap();

        let blue = dict.get("color-blue-sky-200").unwrap();
        assert_eq!(blue.path, "color.Blue Sky.200");
        assert_eq!(blue.token_type, TokenType::Color);
        assert_eq!(blue.source_file, "sources/core.json");

        let space = dict.get("space-scale-4").unwrap();
        assert_eq!(space.value, "16");
        assert_eq!(space.token_type, TokenType::Dimension);
    }

    #[test]
    fn aliases_resolve_across_files() {
        let dict = resolve(vec![
            (
                "sources/core.json",
                json!({ "color": { "blue": { "$value": "#90caf9", "$type": "color" } } }),
            ),
            (
                "sources/light.json",
                json!({
                    "light": {
                        "border": {
                            "$type": "border",
                            "$value": { "width": "1px", "style": "solid", "color": "{color.blue}" }
                        }
                    }
                }),
            ),
        ])
        .unwrap();

        let border = dict.get("light-border").unwrap();
        assert_eq!(border.value, "1px solid #90caf9");
        assert_eq!(border.original_value, "1px solid #90caf9");
    }

    #[test]
    fn only_authored_aliases_are_reference_bearing() {
        let dict = resolve(vec![
            (
                "sources/core.json",
                json!({ "color": { "white": { "$value": "#ffffff", "$type": "color" } } }),
            ),
            (
                "sources/light.json",
                json!({ "light": { "bg": { "$value": "{color.white}", "$type": "color" } } }),
            ),
        ])
        .unwrap();

        let white = dict.get("color-white").unwrap();
        assert!(white.literal);
        let bg = dict.get("light-bg").unwrap();
        assert!(!bg.literal);
        assert_eq!(bg.original_value, white.value);
    }

    #[test]
    fn chained_aliases_resolve() {
        let dict = resolve(vec![(
            "core.json",
            json!({
                "a": { "$value": "{b}" },
                "b": { "$value": "{c}" },
                "c": { "$value": "8px" }
            }),
        )])
        .unwrap();
        assert_eq!(dict.get("a").unwrap().value, "8px");
    }

    #[test]
    fn broken_reference_throws_by_default() {
        let err = resolve(vec![("core.json", json!({ "a": { "$value": "{missing.token}" } }))])
            .unwrap_err();
        assert!(matches!(
            err,
            TokenError::BrokenReference { ref reference, .. } if reference == "missing.token"
        ));
    }

    #[test]
    fn broken_reference_console_keeps_alias_text() {
        let dict = TokenSource::new(".")
            .broken_references(BrokenReferencePolicy::Console)
            .resolve(vec![(
                "core.json".to_string(),
                json!({ "a": { "$value": "{missing}" } }),
            )])
            .unwrap();
        assert_eq!(dict.get("a").unwrap().value, "{missing}");
    }

    #[test]
    fn cycles_are_reported() {
        let err = resolve(vec![(
            "core.json",
            json!({ "a": { "$value": "{b}" }, "b": { "$value": "{a}" } }),
        )])
        .unwrap_err();
        match err {
            TokenError::CircularReference { chain } => assert_eq!(chain, vec!["a", "b", "a"]),
            other => panic!("expected circular reference, got {other:?}"),
        }
    }

    #[test]
    fn arrays_join_with_commas() {
        let dict = resolve(vec![(
            "core.json",
            json!({
                "shadow": {
                    "$type": "shadow",
                    "$value": [
                        { "x": "0", "y": "1px", "color": "#000" },
                        { "x": "0", "y": "2px", "color": "#111" }
                    ]
                }
            }),
        )])
        .unwrap();
        assert_eq!(dict.get("shadow").unwrap().value, "0 1px #000, 0 2px #111");
    }
}
