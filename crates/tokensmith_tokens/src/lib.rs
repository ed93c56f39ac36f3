//! Tokensmith token dictionary
//!
//! The read-only data layer that the stylesheet renderers work against.
//!
//! # Overview
//!
//! - **Tokens**: named design values with an authored raw value and a resolved
//!   output value ([`Token`], [`TokenType`])
//! - **Dictionary**: the ordered token set of one build plus its lookup indexes
//!   ([`Dictionary`], [`TokenFilter`])
//! - **References**: value-substring reference detection and enumeration
//!   ([`uses_reference`], [`references_of`], [`ReferenceQuery`])
//! - **Sources**: loading DTCG-style JSON token files into a dictionary
//!   ([`TokenSource`])
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tokensmith_tokens::{references_of, Dictionary, TokenSource};
//!
//! let dictionary = TokenSource::new("design")
//!     .pattern("sources/*.json")
//!     .load()?;
//!
//! for token in dictionary.tokens() {
//!     for reference in references_of(&token.original_value, &dictionary) {
//!         println!("{} -> {}", token.name, reference.name);
//!     }
//! }
//! ```
//!
//! # References
//!
//! A token references another token when its raw value textually contains the
//! other token's resolved value. Detection is by value, not by symbol, so two
//! tokens sharing an identical value are indistinguishable: a dependent token
//! binds to whichever comes first in dictionary order.

mod dictionary;
mod error;
mod reference;
mod source;
mod token;

pub use dictionary::{Dictionary, TokenFilter};
pub use error::TokenError;
pub use reference::{references_of, substitute, uses_reference, Reference, ReferenceQuery};
pub use source::{BrokenReferencePolicy, TokenSource};
pub use token::{Token, TokenType};
