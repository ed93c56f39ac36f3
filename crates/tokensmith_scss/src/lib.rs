//! Tokensmith SCSS renderer
//!
//! Turns a [`Dictionary`](tokensmith_tokens::Dictionary) into SCSS variable
//! declarations, keeping cross-token references as symbols instead of
//! inlining their values.
//!
//! # Modes
//!
//! - **Flat**: one `$name: value;` line per selected token
//! - **Theme**: theme-suffixed variables plus an
//!   `html[data-theme=<theme>] { ... }` block of custom-property aliases
//! - **Composite**: one wrapped block per theme followed by the core
//!   declarations
//!
//! # References
//!
//! When a token's raw value contains another token's value, that value is
//! rewritten in the output:
//!
//! - color-bearing tokens (color, shadow, border, gradient) point at a custom
//!   property named after the referenced token without its theme segment:
//!   `var(--color-blue-200)` for `light-color-blue-200`
//! - every other token points at the referenced SCSS variable: `$space-4`
//!
//! ```rust,ignore
//! use tokensmith_scss::{render, FileHeader, RenderMode, RenderOptions};
//!
//! let options = RenderOptions::new(RenderMode::theme("dark"))
//!     .with_header(FileHeader::kst());
//! std::fs::write("tokens/tokens.dark.scss", render(&dictionary, &options))?;
//! ```

mod declaration;
mod format;
mod header;
mod naming;

pub use declaration::{declaration, resolve_value};
pub use format::{
    render, render_composite, render_flat, render_theme, RenderMode, RenderOptions,
    ThemePartition,
};
pub use header::FileHeader;
pub use naming::{bare_name, custom_property_ref, scss_variable_ref, strip_theme, theme_selector};
