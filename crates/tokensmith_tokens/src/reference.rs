//! Reference detection and enumeration
//!
//! Resolution is a two-step protocol over resolved values used as substring
//! keys: first detect whether a raw value contains any other token's value
//! ([`uses_reference`]), then enumerate the matching tokens in dictionary order
//! ([`references_of`]).
//!
//! Matching is textual. A raw value that happens to contain the value of an
//! unrelated token is reported as referencing it, and when several tokens share
//! one value the first in dictionary order is the one a substitution binds to.

use rustc_hash::FxHashSet;

use crate::dictionary::Dictionary;
use crate::token::Token;

/// A resolved pointer from a raw sub-value to the token whose value it equals
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reference<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

impl<'a> From<&'a Token> for Reference<'a> {
    fn from(token: &'a Token) -> Self {
        Self {
            name: &token.name,
            value: &token.value,
        }
    }
}

/// A raw value to resolve, optionally bound to the token that owns it
#[derive(Clone, Copy, Debug)]
pub struct ReferenceQuery<'a> {
    raw: &'a str,
    owner: Option<&'a str>,
}

impl<'a> ReferenceQuery<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self { raw, owner: None }
    }

    /// Query a token's authored value. The token never references itself,
    /// and a literal token references nothing.
    pub fn for_token(token: &'a Token) -> Self {
        let raw = if token.literal {
            ""
        } else {
            token.original_value.as_str()
        };
        Self {
            raw,
            owner: Some(&token.name),
        }
    }

    fn is_target(&self, candidate: &Token) -> bool {
        !candidate.value.is_empty()
            && self.owner != Some(candidate.name.as_str())
            && self.raw.contains(candidate.value.as_str())
    }

    pub fn uses_reference(&self, dictionary: &Dictionary) -> bool {
        dictionary.tokens().iter().any(|t| self.is_target(t))
    }

    /// Every token whose value occurs in the raw value, in dictionary order
    pub fn references<'d>(&self, dictionary: &'d Dictionary) -> Vec<Reference<'d>> {
        let mut seen = FxHashSet::default();
        let refs: Vec<Reference<'d>> = dictionary
            .tokens()
            .iter()
            .filter(|t| self.is_target(t))
            .filter(|&t| seen.insert(t.name.as_str()))
            .map(Reference::from)
            .collect();

        if !refs.is_empty() {
            tracing::trace!(
                owner = self.owner.unwrap_or("<none>"),
                raw = self.raw,
                count = refs.len(),
                "resolved references"
            );
        }
        refs
    }
}

/// Whether `raw` contains the resolved value of any token in `dictionary`
pub fn uses_reference(raw: &str, dictionary: &Dictionary) -> bool {
    ReferenceQuery::new(raw).uses_reference(dictionary)
}

/// Tokens whose resolved value occurs in `raw`, in dictionary order
pub fn references_of<'d>(raw: &str, dictionary: &'d Dictionary) -> Vec<Reference<'d>> {
    ReferenceQuery::new(raw).references(dictionary)
}

/// Replace every occurrence of each reference's value in `value` with the
/// symbol chosen for it.
///
/// The scan runs once, left to right. Inserted symbols are not rescanned, and
/// at any position the first matching reference in `refs` wins.
pub fn substitute<F>(value: &str, refs: &[Reference<'_>], symbol_for: F) -> String
where
    F: Fn(&Reference<'_>) -> String,
{
    let targets: Vec<(&str, String)> = refs
        .iter()
        .filter(|r| !r.value.is_empty())
        .map(|r| (r.value, symbol_for(r)))
        .collect();

    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    'scan: while !rest.is_empty() {
        for (needle, symbol) in &targets {
            if let Some(tail) = rest.strip_prefix(*needle) {
                out.push_str(symbol);
                rest = tail;
                continue 'scan;
            }
        }
        let Some(ch) = rest.chars().next() else {
            break;
        };
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    out
}
