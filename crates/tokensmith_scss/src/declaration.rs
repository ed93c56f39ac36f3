//! Per-token declaration rule

use std::borrow::Cow;

use tokensmith_tokens::{substitute, Dictionary, ReferenceQuery, Token};

use crate::naming::{custom_property_ref, scss_variable_ref, VARIABLE_PREFIX};

/// The output value of `token`, with referenced sub-values rewritten as symbols.
///
/// Tokens without references come back verbatim.
pub fn resolve_value<'a>(token: &'a Token, dictionary: &Dictionary) -> Cow<'a, str> {
    let query = ReferenceQuery::for_token(token);
    if !query.uses_reference(dictionary) {
        return Cow::Borrowed(&token.value);
    }

    let refs = query.references(dictionary);
    let color_bearing = token.token_type.is_color_bearing();
    Cow::Owned(substitute(&token.value, &refs, |r| {
        if color_bearing {
            custom_property_ref(r.name)
        } else {
            scss_variable_ref(r.name)
        }
    }))
}

/// `$<name>: <value>;`
pub fn declaration(name: &str, value: &str) -> String {
    format!("{VARIABLE_PREFIX}{name}: {value};")
}
