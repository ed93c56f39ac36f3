//! Output modes and the render entry point

use tokensmith_tokens::{Dictionary, TokenFilter};
use tracing::debug;

use crate::declaration::{declaration, resolve_value};
use crate::header::FileHeader;
use crate::naming::{indent, scss_variable_ref, strip_theme, theme_selector, BLOCK_INDENT};

/// A theme and the tokens that belong to it
#[derive(Clone, Debug)]
pub struct ThemePartition {
    pub name: String,
    pub filter: TokenFilter,
}

impl ThemePartition {
    /// Theme whose tokens come from sources containing the theme name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            filter: TokenFilter::source(name.clone()),
            name,
        }
    }

    pub fn with_filter(mut self, filter: TokenFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// How a selection of tokens is laid out
#[derive(Clone, Debug)]
pub enum RenderMode {
    /// `$name: value;` per token
    Flat { filter: TokenFilter },
    /// Theme-suffixed variables followed by an `html[data-theme=..]` alias block
    Theme(ThemePartition),
    /// Each theme wrapped in its selector, then the core declarations
    Composite {
        themes: Vec<ThemePartition>,
        core: TokenFilter,
    },
}

impl RenderMode {
    pub fn flat(source_key: impl Into<String>) -> Self {
        Self::Flat {
            filter: TokenFilter::source(source_key),
        }
    }

    pub fn theme(name: impl Into<String>) -> Self {
        Self::Theme(ThemePartition::new(name))
    }

    /// Light and dark themes followed by `core`
    pub fn light_dark(core_key: impl Into<String>) -> Self {
        Self::Composite {
            themes: vec![ThemePartition::new("light"), ThemePartition::new("dark")],
            core: TokenFilter::source(core_key),
        }
    }
}

/// Everything one render pass needs; replaces any process-wide format registry
#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub mode: RenderMode,
    pub header: Option<FileHeader>,
}

impl RenderOptions {
    pub fn new(mode: RenderMode) -> Self {
        Self { mode, header: None }
    }

    pub fn with_header(mut self, header: FileHeader) -> Self {
        self.header = Some(header);
        self
    }
}

/// Render one complete artifact: optional header, body and a trailing newline.
///
/// Pure over `dictionary`; identical inputs produce identical output (aside
/// from a header without a pinned timestamp).
pub fn render(dictionary: &Dictionary, options: &RenderOptions) -> String {
    let body = match &options.mode {
        RenderMode::Flat { filter } => render_flat(dictionary, filter),
        RenderMode::Theme(theme) => render_theme(dictionary, &theme.name, &theme.filter),
        RenderMode::Composite { themes, core } => render_composite(dictionary, themes, core),
    };
    debug!(mode = ?options.mode, bytes = body.len(), "rendered scss block");

    let mut out = options
        .header
        .as_ref()
        .map(FileHeader::render)
        .unwrap_or_default();
    out.push_str(&body);
    out.push('\n');
    out
}

fn flat_lines(dictionary: &Dictionary, filter: &TokenFilter) -> Vec<String> {
    dictionary
        .filter(filter)
        .map(|token| declaration(&token.name, &resolve_value(token, dictionary)))
        .collect()
}

fn wrap(theme: &str, lines: &[String]) -> String {
    if lines.is_empty() {
        return format!("{} {{\n}}", theme_selector(theme));
    }
    let pad = indent(BLOCK_INDENT);
    let body: Vec<String> = lines.iter().map(|line| format!("{pad}{line}")).collect();
    format!("{} {{\n{}\n}}", theme_selector(theme), body.join("\n"))
}

/// Declarations for every token selected by `filter`, one per line
pub fn render_flat(dictionary: &Dictionary, filter: &TokenFilter) -> String {
    flat_lines(dictionary, filter).join("\n")
}

/// Theme-suffixed SCSS variables, a blank line, then the custom-property aliases
/// wrapped in `html[data-theme=<theme>]`.
///
/// `dark-bg-primary: #000000` becomes `$bg-primary-dark: #000000;` and
/// `  --bg-primary: $bg-primary-dark;` inside the selector.
pub fn render_theme(dictionary: &Dictionary, theme: &str, filter: &TokenFilter) -> String {
    let mut variables = Vec::new();
    let mut aliases = Vec::new();

    for token in dictionary.filter(filter) {
        let bare = strip_theme(&token.name, theme);
        let variable = format!("{bare}-{theme}");
        variables.push(declaration(&variable, &resolve_value(token, dictionary)));
        aliases.push(format!("--{bare}: {};", scss_variable_ref(&variable)));
    }

    if variables.is_empty() {
        return wrap(theme, &aliases);
    }
    format!("{}\n\n{}", variables.join("\n"), wrap(theme, &aliases))
}

/// Every theme's declarations wrapped in its selector, in the given order,
/// then the core declarations. Blocks are separated by one blank line; an
/// empty core selection adds no block.
///
/// The selector is unquoted (`html[data-theme=light]`), the same form theme
/// mode writes, rather than the quoted `html[data-theme="light"]` some
/// hand-written stylesheets use. Both match the same elements.
pub fn render_composite(
    dictionary: &Dictionary,
    themes: &[ThemePartition],
    core: &TokenFilter,
) -> String {
    let mut blocks: Vec<String> = themes
        .iter()
        .map(|theme| wrap(&theme.name, &flat_lines(dictionary, &theme.filter)))
        .collect();

    let core = render_flat(dictionary, core);
    if !core.is_empty() {
        blocks.push(core);
    }
    blocks.join("\n\n")
}
