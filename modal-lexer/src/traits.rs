use crate::token::Token;
use std::collections::VecDeque;
use std::fmt::Debug;

/// A token category. Languages define a closed enum and implement this.
pub trait TokenKind: Copy + Eq + Debug + Send + Sync + 'static {
    /// Stable, human readable name (for example `Keyword.Declaration`).
    fn name(&self) -> &'static str;
}

/// A rule that may match at the cursor of a [`LexContext`](crate::LexContext).
///
/// On success the rule consumes its text, pushes the tokens it produced to
/// `out` (possibly none) and applies its mode transition. On failure it
/// returns `false`. The lexer then rewinds the cursor, drops whatever the rule
/// pushed to `out` and restores the mode stack, so a rule may do partial work
/// before giving up.
pub trait LexingRule<Ctx, K>: Send + Sync {
    fn try_match(&self, ctx: &mut Ctx, out: &mut VecDeque<Token<K>>) -> bool;

    /// Quick check on the first character.
    ///
    /// - `Some(true)`  - the rule might match
    /// - `Some(false)` - the rule definitely won't match
    /// - `None`        - unknown, try the full match
    #[inline]
    fn quick_check(&self, first_char: Option<char>) -> Option<bool> {
        let _ = first_char;
        None
    }
}
