//! The token dictionary of one build

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::token::Token;

/// Selects which tokens of a dictionary belong to one output
#[derive(Clone, Default)]
pub enum TokenFilter {
    /// Every token
    #[default]
    All,
    /// Tokens whose source file contains the given text (`light.json`, `dark`)
    SourceContains(String),
    /// Tokens whose name starts with the given text
    NamePrefix(String),
    /// Arbitrary predicate supplied by the driver
    Predicate(Arc<dyn Fn(&Token) -> bool + Send + Sync>),
}

impl TokenFilter {
    pub fn source(key: impl Into<String>) -> Self {
        Self::SourceContains(key.into())
    }

    pub fn predicate(f: impl Fn(&Token) -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(Arc::new(f))
    }

    pub fn matches(&self, token: &Token) -> bool {
        match self {
            Self::All => true,
            Self::SourceContains(key) => token.source_file.contains(key.as_str()),
            Self::NamePrefix(prefix) => token.name.starts_with(prefix.as_str()),
            Self::Predicate(f) => f(token),
        }
    }
}

impl fmt::Debug for TokenFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::SourceContains(key) => f.debug_tuple("SourceContains").field(key).finish(),
            Self::NamePrefix(prefix) => f.debug_tuple("NamePrefix").field(prefix).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Ordered, immutable set of tokens with name lookup.
///
/// Order is load order (source file, then authoring order inside the file)
/// and is the tie-breaker for every ambiguous reference match.
#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    tokens: Vec<Token>,
    by_name: FxHashMap<String, usize>,
}

impl Dictionary {
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut by_name = FxHashMap::default();
        for (idx, token) in tokens.iter().enumerate() {
            // First definition wins, matching reference tie-breaking.
            by_name.entry(token.name.clone()).or_insert(idx);
        }
        Self { tokens, by_name }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Token> {
        self.by_name.get(name).map(|&idx| &self.tokens[idx])
    }

    /// Tokens selected by `filter`, in dictionary order
    pub fn filter<'a>(&'a self, filter: &'a TokenFilter) -> impl Iterator<Item = &'a Token> + 'a {
        self.tokens.iter().filter(move |t| filter.matches(t))
    }
}

impl FromIterator<Token> for Dictionary {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dictionary {
        [
            Token::new("light-bg", "#ffffff").with_source("sources/light.json"),
            Token::new("dark-bg", "#000000").with_source("sources/dark.json"),
            Token::new("space-4", "16px").with_source("sources/core.json"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn filter_by_source_partitions_tokens() {
        let dict = sample();
        let light = TokenFilter::source("light.json");
        let names: Vec<&str> = dict.filter(&light).map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["light-bg"]);
    }

    #[test]
    fn predicate_filter() {
        let dict = sample();
        let px = TokenFilter::predicate(|t| t.value.ends_with("px"));
        assert_eq!(dict.filter(&px).count(), 1);
        assert_eq!(format!("{px:?}"), "Predicate(..)");
    }

    #[test]
    fn name_prefix_filter() {
        let dict = sample();
        let dark = TokenFilter::NamePrefix("dark-".to_string());
        let names: Vec<&str> = dict.filter(&dark).map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["dark-bg"]);
    }

    #[test]
    fn first_definition_wins_on_duplicate_names() {
        let dict = Dictionary::new(vec![
            Token::new("accent", "#111111"),
            Token::new("accent", "#222222"),
        ]);
        assert_eq!(dict.get("accent").map(|t| t.value.as_str()), Some("#111111"));
        assert_eq!(dict.len(), 2);
    }
}
