use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

static IDENTIFIER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// A bare identifier used as a declaration name and as an import specifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SymbolName(String);

impl SymbolName {
    /// Returns `None` for empty strings and anything that is not an identifier.
    pub fn new(name: &str) -> Option<Self> {
        if IDENTIFIER_PATTERN.is_match(name) {
            Some(Self(name.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SymbolName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One single-line named import found in a buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    /// Zero-based line the statement sits on
    pub line_index: usize,
    pub raw_text: String,
    pub module_path: String,
    /// Names in source order, whitespace trimmed
    pub imported_names: Vec<String>,
}

impl ImportStatement {
    pub fn imports(&self, name: &str) -> bool {
        self.imported_names.iter().any(|n| n == name)
    }
}

/// Relative module paths between the two files of a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModulePathPair {
    pub source_to_target: String,
    pub target_to_source: String,
}

/// Updated contents of both buffers after a move
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveResult {
    pub updated_source_code: String,
    pub updated_target_code: String,
}

/// Kind of top-level declaration recognised by the heuristics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Interface,
    #[serde(rename = "type")]
    TypeAlias,
    Class,
    Function,
    Enum,
    Variable,
}

impl DeclarationKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "interface" => Some(DeclarationKind::Interface),
            "type" => Some(DeclarationKind::TypeAlias),
            "class" => Some(DeclarationKind::Class),
            "function" | "function*" => Some(DeclarationKind::Function),
            "enum" => Some(DeclarationKind::Enum),
            "const" | "let" | "var" => Some(DeclarationKind::Variable),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Interface => "interface",
            DeclarationKind::TypeAlias => "type",
            DeclarationKind::Class => "class",
            DeclarationKind::Function => "function",
            DeclarationKind::Enum => "enum",
            DeclarationKind::Variable => "variable",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declaration located in a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    pub exported: bool,
    /// Zero-based line of the declaring keyword
    pub line_index: usize,
}
