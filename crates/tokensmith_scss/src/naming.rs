//! Symbol and selector naming

/// Declaration prefix for SCSS variables
pub(crate) const VARIABLE_PREFIX: char = '$';

/// Indent applied to every line inside a theme selector
pub(crate) const BLOCK_INDENT: usize = 2;

/// Drop the first dash-delimited segment: `light-color-blue-200` -> `color-blue-200`.
///
/// Names without a dash are returned whole.
pub fn bare_name(name: &str) -> &str {
    match name.split_once('-') {
        Some((_, rest)) if !rest.is_empty() => rest,
        _ => name,
    }
}

/// Drop a leading `<theme>-` prefix, if present
pub fn strip_theme<'a>(name: &'a str, theme: &str) -> &'a str {
    name.strip_prefix(theme)
        .and_then(|rest| rest.strip_prefix('-'))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(name)
}

/// `var(--<bare name>)`
pub fn custom_property_ref(name: &str) -> String {
    format!("var(--{})", bare_name(name))
}

/// `$<name>`
pub fn scss_variable_ref(name: &str) -> String {
    format!("{VARIABLE_PREFIX}{name}")
}

/// `html[data-theme=<theme>]`
pub fn theme_selector(theme: &str) -> String {
    format!("html[data-theme={theme}]")
}

pub(crate) fn indent(count: usize) -> String {
    " ".repeat(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name_strips_first_segment_only() {
        assert_eq!(bare_name("light-color-blue-200"), "color-blue-200");
        assert_eq!(bare_name("dark-bg"), "bg");
        assert_eq!(bare_name("primary"), "primary");
        assert_eq!(bare_name("trailing-"), "trailing-");
    }

    #[test]
    fn strip_theme_requires_the_prefix() {
        assert_eq!(strip_theme("dark-bg-primary", "dark"), "bg-primary");
        assert_eq!(strip_theme("bg-primary", "dark"), "bg-primary");
        assert_eq!(strip_theme("darker-bg", "dark"), "darker-bg");
        assert_eq!(strip_theme("bg-dark-primary", "dark"), "bg-dark-primary");
    }

    #[test]
    fn symbols() {
        assert_eq!(custom_property_ref("light-color-blue-200"), "var(--color-blue-200)");
        assert_eq!(scss_variable_ref("light-color-blue-200"), "$light-color-blue-200");
        assert_eq!(theme_selector("light"), "html[data-theme=light]");
        assert_eq!(indent(BLOCK_INDENT), "  ");
    }
}
