//! Loading and rendering of `{name}` query templates.

use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::error::VarsError;
use crate::variables::Variables;

/// Matches, in priority order: escaped braces, a `{field}` and any stray brace.
fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{|\}\}|\{([^{}]*)\}|[{}]").expect("placeholder pattern is valid")
    })
}

/// A SQL query containing `{name}` placeholders.
///
/// `{{` and `}}` stand for literal braces. Conversions (`{name!r}`), format
/// specs (`{name:>10}`), attribute or index access (`{name.x}`, `{name[0]}`)
/// and positional fields (`{}`, `{0}`) are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTemplate {
    source: String,
}

enum Token<'t> {
    Literal(&'t str),
    Field(&'t str),
}

impl QueryTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Reads the query file at `path` verbatim as UTF-8.
    pub fn from_file(path: &Path) -> Result<Self, VarsError> {
        let source = fs::read_to_string(path).map_err(|source| VarsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { source })
    }

    /// Distinct placeholder names in order of first appearance.
    pub fn placeholders(&self) -> Result<Vec<&str>, VarsError> {
        let mut names: Vec<&str> = Vec::new();
        for token in self.tokens()? {
            if let Token::Field(name) = token {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        Ok(names)
    }

    /// Substitutes every placeholder with its value from `variables`.
    ///
    /// Fails on the first name `variables` does not define; nothing is
    /// returned in that case.
    pub fn render(&self, variables: &Variables) -> Result<String, VarsError> {
        let mut rendered = String::with_capacity(self.source.len());
        for token in self.tokens()? {
            match token {
                Token::Literal(text) => rendered.push_str(text),
                Token::Field(name) => {
                    let value = variables
                        .get(name)
                        .ok_or_else(|| VarsError::MissingVariable(name.to_string()))?;
                    rendered.push_str(value);
                }
            }
        }
        log::debug!("Formatted query:\n{rendered}");
        Ok(rendered)
    }

    fn tokens(&self) -> Result<Vec<Token<'_>>, VarsError> {
        let source = self.source.as_str();
        let mut tokens = Vec::new();
        let mut last = 0;

        for caps in placeholder_pattern().captures_iter(source) {
            let whole = caps.get(0).expect("group 0 is always present");
            if whole.start() > last {
                tokens.push(Token::Literal(&source[last..whole.start()]));
            }
            last = whole.end();

            match whole.as_str() {
                "{{" => tokens.push(Token::Literal("{")),
                "}}" => tokens.push(Token::Literal("}")),
                "{" => return Err(malformed(whole.start(), "unmatched '{'")),
                "}" => return Err(malformed(whole.start(), "single '}' encountered")),
                _ => tokens.push(Token::Field(field_name(&caps, whole.start())?)),
            }
        }

        if last < source.len() {
            tokens.push(Token::Literal(&source[last..]));
        }
        Ok(tokens)
    }
}

impl FromStr for QueryTemplate {
    type Err = VarsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let template = QueryTemplate::new(s);
        template.tokens()?;
        Ok(template)
    }
}

fn field_name<'t>(caps: &Captures<'t>, offset: usize) -> Result<&'t str, VarsError> {
    let name = caps.get(1).map_or("", |m| m.as_str());

    if name.is_empty() || name.chars().all(|c| c.is_ascii_digit()) {
        return Err(malformed(
            offset,
            "positional placeholders are not supported, use {name}",
        ));
    }
    if name.contains(['.', '[']) {
        return Err(malformed(offset, "attribute and index access are not supported"));
    }
    if name.contains(['!', ':']) {
        return Err(malformed(
            offset,
            "conversions and format specifications are not supported",
        ));
    }
    Ok(name)
}

fn malformed(offset: usize, reason: &str) -> VarsError {
    VarsError::MalformedTemplate {
        offset,
        reason: reason.to_string(),
    }
}
