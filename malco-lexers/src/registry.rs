//! Registration metadata and lookup by alias, file name or mimetype.

use crate::{malco, rasm, Category, Lexer};
use modal_lexer::Grammar;
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// How a host application finds a lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerInfo {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// Globs matched against the file name component.
    pub filenames: &'static [&'static str],
    pub mimetypes: &'static [&'static str],
}

impl LexerInfo {
    pub fn has_alias(&self, alias: &str) -> bool {
        self.aliases.iter().any(|a| a.eq_ignore_ascii_case(alias))
    }

    pub fn matches_filename(&self, path: &str) -> bool {
        let file_name = Path::new(path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(path);
        self.filenames.iter().any(|glob| glob_match(glob, file_name))
    }

    pub fn has_mimetype(&self, mimetype: &str) -> bool {
        self.mimetypes.iter().any(|m| *m == mimetype)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Malco,
    Rasm,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Malco, Language::Rasm];

    pub fn info(self) -> &'static LexerInfo {
        match self {
            Language::Malco => &malco::INFO,
            Language::Rasm => &rasm::INFO,
        }
    }

    pub fn grammar(self) -> &'static Grammar<Category> {
        match self {
            Language::Malco => malco::grammar(),
            Language::Rasm => rasm::grammar(),
        }
    }

    pub fn tokenize<S: Into<String>>(self, source: S) -> Lexer {
        self.grammar().lexer(source)
    }

    /// The first alias, used on the command line.
    pub fn alias(self) -> &'static str {
        self.info().aliases[0]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no lexer for alias `{0}`")]
    UnknownAlias(String),

    #[error("no lexer for mimetype `{0}`")]
    UnknownMimetype(String),

    #[error("no lexer for file name `{0}`")]
    NoLexerForFile(String),
}

pub fn all() -> &'static [Language] {
    &Language::ALL
}

pub fn find_by_alias(alias: &str) -> Result<Language, LookupError> {
    let found = all().iter().copied().find(|lang| lang.info().has_alias(alias));
    debug!(alias, ?found, "lexer lookup by alias");
    found.ok_or_else(|| LookupError::UnknownAlias(alias.to_string()))
}

pub fn find_for_filename(path: &str) -> Result<Language, LookupError> {
    let found = all()
        .iter()
        .copied()
        .find(|lang| lang.info().matches_filename(path));
    debug!(path, ?found, "lexer lookup by file name");
    found.ok_or_else(|| LookupError::NoLexerForFile(path.to_string()))
}

pub fn find_by_mimetype(mimetype: &str) -> Result<Language, LookupError> {
    let found = all()
        .iter()
        .copied()
        .find(|lang| lang.info().has_mimetype(mimetype));
    debug!(mimetype, ?found, "lexer lookup by mimetype");
    found.ok_or_else(|| LookupError::UnknownMimetype(mimetype.to_string()))
}

/// Shell-style matching with `*` (any run) and `?` (one character).
fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    let (mut p, mut t) = (0, 0);
    // Last `*` seen and the text index it was tried at.
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                star = Some((p, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match star {
                Some((star_p, star_t)) => {
                    p = star_p + 1;
                    t = star_t + 1;
                    star = Some((star_p, star_t + 1));
                }
                None => return false,
            },
        }
    }
    pattern[p..].iter().all(|&c| c == '*')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_match() {
        assert!(glob_match("*.mlc", "main.mlc"));
        assert!(glob_match("*.mlc", ".mlc"));
        assert!(glob_match("a?c", "abc"));
        assert!(glob_match("*", ""));
        assert!(glob_match("*a*b", "xxaxxb"));
        assert!(!glob_match("*.mlc", "main.mlcx"));
        assert!(!glob_match("*.mlc", "main.rasm"));
        assert!(!glob_match("a?c", "ac"));
    }

    #[test]
    fn test_alias_is_first_entry() {
        assert_eq!(Language::Malco.alias(), "malco");
        assert_eq!(Language::Rasm.alias(), "rasm");
    }
}
