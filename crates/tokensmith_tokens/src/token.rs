//! Token model

use std::fmt::{Display, Formatter};

/// Semantic category of a token, taken from its authored `$type`
#[derive(Clone, Debug, Hash, Eq, PartialEq, Default)]
pub enum TokenType {
    Color,
    Shadow,
    Border,
    Gradient,
    Dimension,
    Typography,
    /// Any other `$type`, kept verbatim
    Other(String),
    /// No `$type` was authored
    #[default]
    Untyped,
}

impl TokenType {
    /// Parse an authored `$type` string. Unknown types are kept as [`TokenType::Other`].
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "" => Self::Untyped,
            "color" => Self::Color,
            "shadow" | "boxShadow" => Self::Shadow,
            "border" => Self::Border,
            "gradient" => Self::Gradient,
            "dimension" => Self::Dimension,
            "typography" => Self::Typography,
            other => Self::Other(other.to_string()),
        }
    }

    /// Types whose references render as custom properties, since the values
    /// they point at change with the active theme.
    pub fn is_color_bearing(&self) -> bool {
        matches!(
            self,
            Self::Shadow | Self::Border | Self::Gradient | Self::Color
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Color => "color",
            Self::Shadow => "shadow",
            Self::Border => "border",
            Self::Gradient => "gradient",
            Self::Dimension => "dimension",
            Self::Typography => "typography",
            Self::Other(s) => s,
            Self::Untyped => "",
        }
    }
}

impl Display for TokenType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A leaf entry of the dictionary
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Final kebab-cased identifier, unique within one rendered output
    pub name: String,
    /// Dotted group path as authored (`color.blue.200`)
    pub path: String,
    /// Source the token was loaded from; used as a partition key
    pub source_file: String,
    /// Raw value as authored, before transforms
    pub original_value: String,
    /// Fully resolved value used for output
    pub value: String,
    pub token_type: TokenType,
    /// Authored as a plain value with no `{alias}`. Literal tokens never
    /// reference other tokens and always render their own value.
    pub literal: bool,
}

impl Token {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        Self {
            path: name.replace('-', "."),
            name,
            source_file: String::new(),
            original_value: value.clone(),
            value,
            token_type: TokenType::Untyped,
            literal: false,
        }
    }

    pub fn with_original(mut self, original: impl Into<String>) -> Self {
        self.original_value = original.into();
        self
    }

    pub fn with_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }

    pub fn with_source(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = source_file.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn literal(mut self) -> Self {
        self.literal = true;
        self
    }
}
