//! Match patterns for table-driven rules.
//!
//! A [`Pattern`] is anchored at the cursor and reports how many bytes it
//! matched. Combinators are possessive: repetitions take as much as they can
//! and never give it back, and alternatives commit to the first one listed
//! that matches. Tables list longer alternatives before their prefixes.

use smallvec::{smallvec, SmallVec};
use std::fmt;

/// A named character predicate.
#[derive(Clone, Copy)]
pub struct CharClass {
    name: &'static str,
    test: fn(char) -> bool,
}

impl CharClass {
    pub const WORD: CharClass = CharClass::new("word", is_word);
    pub const SPACE: CharClass = CharClass::new("space", char::is_whitespace);
    pub const NON_SPACE: CharClass = CharClass::new("non-space", is_non_space);
    pub const DIGIT: CharClass = CharClass::new("digit", is_digit);
    pub const HEX_DIGIT: CharClass = CharClass::new("hex digit", is_hex_digit);

    pub const fn new(name: &'static str, test: fn(char) -> bool) -> Self {
        Self { name, test }
    }

    #[inline]
    pub fn matches(&self, ch: char) -> bool {
        (self.test)(ch)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.name)
    }
}

/// Word characters: letters, digits and underscore, Unicode aware.
pub fn is_word(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn is_non_space(ch: char) -> bool {
    !ch.is_whitespace()
}

fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

fn is_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

fn is_boundary(before: Option<char>, after: Option<char>) -> bool {
    before.is_some_and(is_word) != after.is_some_and(is_word)
}

/// Byte lengths of the groups a pattern matched, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    groups: SmallVec<[usize; 4]>,
}

impl Match {
    /// A match with a single group.
    pub fn whole(len: usize) -> Self {
        Self {
            groups: smallvec![len],
        }
    }

    /// Total matched length in bytes.
    pub fn len(&self) -> usize {
        self.groups.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn groups(&self) -> &[usize] {
        &self.groups
    }
}

#[derive(Debug, Clone)]
pub enum Pattern {
    /// Exact text.
    Literal(&'static str),
    /// The first listed alternative that is a prefix of the input.
    AnyOf(&'static [&'static str]),
    /// Like `AnyOf`, but an alternative only counts when a word boundary
    /// follows it.
    Words(&'static [&'static str]),
    /// Exactly one character of the class.
    Char(CharClass),
    /// A run of at least `min` characters of the class.
    Repeat { class: CharClass, min: usize },
    Seq(Vec<Pattern>),
    Optional(Box<Pattern>),
    /// The inner pattern, followed by a word boundary.
    WordBounded(Box<Pattern>),
    /// A sequence whose parts are reported as separate groups.
    Groups(Vec<Pattern>),
    /// Text between two `delimiter`s. A delimiter preceded by an odd number of
    /// backslashes is escaped; an even number (including zero) ends the
    /// literal. Unterminated literals do not match.
    Quoted { delimiter: char, multiline: bool },
    /// Zero-width: matches when any character follows.
    Lookahead,
    /// Escape hatch for shapes the combinators cannot express.
    Custom(&'static str, fn(&str) -> Option<usize>),
}

impl Pattern {
    pub fn literal(text: &'static str) -> Self {
        Pattern::Literal(text)
    }

    pub fn any_of(alternatives: &'static [&'static str]) -> Self {
        Pattern::AnyOf(alternatives)
    }

    pub fn words(words: &'static [&'static str]) -> Self {
        Pattern::Words(words)
    }

    pub fn char(class: CharClass) -> Self {
        Pattern::Char(class)
    }

    pub fn one_or_more(class: CharClass) -> Self {
        Pattern::Repeat { class, min: 1 }
    }

    pub fn zero_or_more(class: CharClass) -> Self {
        Pattern::Repeat { class, min: 0 }
    }

    pub fn seq(parts: Vec<Pattern>) -> Self {
        Pattern::Seq(parts)
    }

    pub fn optional(inner: Pattern) -> Self {
        Pattern::Optional(Box::new(inner))
    }

    pub fn bounded(inner: Pattern) -> Self {
        Pattern::WordBounded(Box::new(inner))
    }

    pub fn groups(parts: Vec<Pattern>) -> Self {
        Pattern::Groups(parts)
    }

    pub fn quoted(delimiter: char, multiline: bool) -> Self {
        Pattern::Quoted {
            delimiter,
            multiline,
        }
    }

    pub fn custom(name: &'static str, matcher: fn(&str) -> Option<usize>) -> Self {
        Pattern::Custom(name, matcher)
    }

    /// Number of groups reported by [`find`](Self::find).
    pub fn group_count(&self) -> usize {
        match self {
            Pattern::Groups(parts) => parts.len(),
            _ => 1,
        }
    }

    /// Matches at the start of `input`.
    pub fn find(&self, input: &str) -> Option<Match> {
        match self {
            Pattern::Groups(parts) => {
                let mut groups = SmallVec::new();
                let mut rest = input;
                for part in parts {
                    let len = part.match_len(rest)?;
                    groups.push(len);
                    rest = &rest[len..];
                }
                Some(Match { groups })
            }
            _ => self.match_len(input).map(Match::whole),
        }
    }

    /// Length in bytes of the match at the start of `input`.
    pub fn match_len(&self, input: &str) -> Option<usize> {
        match self {
            Pattern::Literal(text) => input.starts_with(*text).then_some(text.len()),
            Pattern::AnyOf(alternatives) => alternatives
                .iter()
                .find(|alt| input.starts_with(**alt))
                .map(|alt| alt.len()),
            Pattern::Words(words) => words
                .iter()
                .find(|word| {
                    input.starts_with(**word)
                        && is_boundary(word.chars().next_back(), input[word.len()..].chars().next())
                })
                .map(|word| word.len()),
            Pattern::Char(class) => input
                .chars()
                .next()
                .filter(|ch| class.matches(*ch))
                .map(char::len_utf8),
            Pattern::Repeat { class, min } => {
                let mut count = 0;
                let mut len = 0;
                for ch in input.chars().take_while(|ch| class.matches(*ch)) {
                    count += 1;
                    len += ch.len_utf8();
                }
                (count >= *min).then_some(len)
            }
            Pattern::Seq(parts) | Pattern::Groups(parts) => {
                let mut len = 0;
                for part in parts {
                    len += part.match_len(&input[len..])?;
                }
                Some(len)
            }
            Pattern::Optional(inner) => Some(inner.match_len(input).unwrap_or(0)),
            Pattern::WordBounded(inner) => {
                let len = inner.match_len(input)?;
                is_boundary(input[..len].chars().next_back(), input[len..].chars().next())
                    .then_some(len)
            }
            Pattern::Quoted {
                delimiter,
                multiline,
            } => scan_quoted(input, *delimiter, *multiline),
            Pattern::Lookahead => (!input.is_empty()).then_some(0),
            Pattern::Custom(_, matcher) => matcher(input),
        }
    }

    /// Cheap pre-check on the first character, see
    /// [`LexingRule::quick_check`](crate::LexingRule::quick_check).
    pub fn first_char_hint(&self, first: Option<char>) -> Option<bool> {
        match self {
            Pattern::Literal(text) => {
                let expected = text.chars().next()?;
                Some(first == Some(expected))
            }
            Pattern::AnyOf(alternatives) | Pattern::Words(alternatives) => {
                if alternatives.iter().any(|alt| alt.is_empty()) {
                    return None;
                }
                Some(first.is_some_and(|ch| alternatives.iter().any(|alt| alt.starts_with(ch))))
            }
            Pattern::Char(class) | Pattern::Repeat { class, min: 1.. } => {
                Some(first.is_some_and(|ch| class.matches(ch)))
            }
            Pattern::Repeat { .. } | Pattern::Optional(_) | Pattern::Custom(..) => None,
            Pattern::Seq(parts) | Pattern::Groups(parts) => parts.first()?.first_char_hint(first),
            Pattern::WordBounded(inner) => inner.first_char_hint(first),
            Pattern::Quoted { delimiter, .. } => Some(first == Some(*delimiter)),
            Pattern::Lookahead => Some(first.is_some()),
        }
    }
}

fn scan_quoted(input: &str, delimiter: char, multiline: bool) -> Option<usize> {
    let mut chars = input.char_indices();
    let (_, open) = chars.next()?;
    if open != delimiter {
        return None;
    }
    while let Some((index, ch)) = chars.next() {
        if ch == '\n' && !multiline {
            return None;
        }
        if ch == '\\' {
            let (_, escaped) = chars.next()?;
            if escaped == '\n' && !multiline {
                return None;
            }
            continue;
        }
        if ch == delimiter {
            return Some(index + ch.len_utf8());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal() {
        assert_eq!(Pattern::literal("::").match_len("::x"), Some(2));
        assert_eq!(Pattern::literal("::").match_len(":x"), None);
    }

    #[test]
    fn test_any_of_takes_first_listed() {
        let ops = Pattern::any_of(&["===", "==", "="]);
        assert_eq!(ops.match_len("=== 1"), Some(3));
        assert_eq!(ops.match_len("== 1"), Some(2));
        let wrong_order = Pattern::any_of(&["=", "==="]);
        assert_eq!(wrong_order.match_len("==="), Some(1));
    }

    #[test]
    fn test_words_need_boundary() {
        let keywords = Pattern::words(&["for", "foreach"]);
        assert_eq!(keywords.match_len("for ("), Some(3));
        assert_eq!(keywords.match_len("foreach"), Some(7));
        assert_eq!(keywords.match_len("format"), None);
        assert_eq!(keywords.match_len("for"), Some(3));
    }

    #[test]
    fn test_repeat_minimum() {
        assert_eq!(Pattern::one_or_more(CharClass::DIGIT).match_len("123a"), Some(3));
        assert_eq!(Pattern::one_or_more(CharClass::DIGIT).match_len("a"), None);
        assert_eq!(Pattern::zero_or_more(CharClass::SPACE).match_len("a"), Some(0));
    }

    #[test]
    fn test_bounded_sequence() {
        let int = Pattern::bounded(Pattern::seq(vec![
            Pattern::optional(Pattern::literal("-")),
            Pattern::one_or_more(CharClass::DIGIT),
        ]));
        assert_eq!(int.match_len("-42;"), Some(3));
        assert_eq!(int.match_len("42"), Some(2));
        assert_eq!(int.match_len("0x1A"), None);
    }

    #[test]
    fn test_groups_report_each_part() {
        let call = Pattern::groups(vec![
            Pattern::one_or_more(CharClass::WORD),
            Pattern::zero_or_more(CharClass::SPACE),
            Pattern::literal("("),
        ]);
        let found = call.find("print (1)").unwrap();
        assert_eq!(found.groups(), &[5, 1, 1]);
        assert_eq!(found.len(), 7);
        assert_eq!(call.group_count(), 3);
    }

    #[test]
    fn test_quoted_escape_parity() {
        let string = Pattern::quoted('"', true);
        assert_eq!(string.match_len(r#""a\\" tail"#), Some(5));
        assert_eq!(string.match_len(r#""a\""#), None);
        assert_eq!(string.match_len(r#""a\"b" x"#), Some(6));
        assert_eq!(string.match_len("\"multi\nline\""), Some(12));
    }

    #[test]
    fn test_quoted_single_line() {
        let string = Pattern::quoted('"', false);
        assert_eq!(string.match_len("\"one\ntwo\""), None);
        assert_eq!(string.match_len("\"é\""), Some(4));
    }

    #[test]
    fn test_lookahead_is_zero_width() {
        assert_eq!(Pattern::Lookahead.match_len("x"), Some(0));
        assert_eq!(Pattern::Lookahead.match_len(""), None);
    }

    #[test]
    fn test_first_char_hint() {
        assert_eq!(Pattern::literal("/*").first_char_hint(Some('/')), Some(true));
        assert_eq!(Pattern::literal("/*").first_char_hint(Some('*')), Some(false));
        assert_eq!(Pattern::quoted('\'', true).first_char_hint(Some('"')), Some(false));
        assert_eq!(
            Pattern::optional(Pattern::literal("-")).first_char_hint(Some('1')),
            None
        );
        assert_eq!(Pattern::zero_or_more(CharClass::WORD).first_char_hint(None), None);
    }
}
