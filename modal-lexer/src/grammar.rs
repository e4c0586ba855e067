use crate::context::ScanContext;
use crate::lexer::Lexer;
use crate::mode::{ModeId, Transition};
use crate::pattern::Pattern;
use crate::rule::{Action, Rule};
use crate::token::Token;
use crate::traits::{LexingRule, TokenKind};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// A rule as stored in a resolved mode.
pub type SharedRule<K> = Arc<dyn LexingRule<ScanContext, K>>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("mode `{0}` is defined more than once")]
    DuplicateMode(String),

    #[error("root mode `{0}` is not defined")]
    MissingRoot(String),

    #[error("mode `{mode}` refers to unknown mode `{target}`")]
    UnknownMode { mode: String, target: String },

    #[error("include cycle through mode `{0}`")]
    IncludeCycle(String),

    #[error("rule {index} of mode `{mode}` names {kinds} group categories for a pattern with {groups} groups")]
    GroupMismatch {
        mode: String,
        index: usize,
        kinds: usize,
        groups: usize,
    },
}

enum Entry<K> {
    Rule {
        pattern: Pattern,
        action: Action<K>,
        next: Transition<&'static str>,
    },
    Include(&'static str),
    Custom(SharedRule<K>),
}

/// Collects the entries of one mode, in order.
pub struct ModeBuilder<K> {
    entries: Vec<Entry<K>>,
}

impl<K: TokenKind> ModeBuilder<K> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Splices the rules of another mode in at this point.
    pub fn include(mut self, mode: &'static str) -> Self {
        self.entries.push(Entry::Include(mode));
        self
    }

    pub fn rule(self, pattern: Pattern, kind: K) -> Self {
        self.rule_then(pattern, kind, Transition::Stay)
    }

    pub fn rule_then(mut self, pattern: Pattern, kind: K, next: Transition<&'static str>) -> Self {
        self.entries.push(Entry::Rule {
            pattern,
            action: Action::Token(kind),
            next,
        });
        self
    }

    /// One category per group of a [`Pattern::Groups`] pattern.
    pub fn by_groups<I>(mut self, pattern: Pattern, kinds: I, next: Transition<&'static str>) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        self.entries.push(Entry::Rule {
            pattern,
            action: Action::ByGroups(kinds.into_iter().collect()),
            next,
        });
        self
    }

    /// A hand-written rule. It manages the mode stack itself.
    pub fn custom(mut self, rule: SharedRule<K>) -> Self {
        self.entries.push(Entry::Custom(rule));
        self
    }
}

/// Declares the modes of a language and resolves them into a [`Grammar`].
pub struct GrammarBuilder<K> {
    root: &'static str,
    fallback: K,
    modes: Vec<(&'static str, Vec<Entry<K>>)>,
}

impl<K: TokenKind> GrammarBuilder<K> {
    /// `root` is the mode scanning starts in; `fallback` classifies single
    /// characters no rule matched.
    pub fn new(root: &'static str, fallback: K) -> Self {
        Self {
            root,
            fallback,
            modes: Vec::new(),
        }
    }

    pub fn mode<F>(mut self, name: &'static str, build: F) -> Self
    where
        F: FnOnce(ModeBuilder<K>) -> ModeBuilder<K>,
    {
        let mode = build(ModeBuilder::new());
        self.modes.push((name, mode.entries));
        self
    }

    /// Resolves includes and mode names.
    pub fn build(self) -> Result<Grammar<K>, GrammarError> {
        let mut ids = HashMap::new();
        for (index, (name, _)) in self.modes.iter().enumerate() {
            if ids.insert(*name, ModeId(index)).is_some() {
                return Err(GrammarError::DuplicateMode(name.to_string()));
            }
        }
        let root = *ids
            .get(self.root)
            .ok_or_else(|| GrammarError::MissingRoot(self.root.to_string()))?;

        let mut resolver = Resolver {
            ids: &ids,
            declared: &self.modes,
            resolved: vec![None; self.modes.len()],
            visiting: Vec::new(),
        };
        for index in 0..self.modes.len() {
            resolver.flatten(index)?;
        }

        let modes = self
            .modes
            .iter()
            .zip(resolver.resolved)
            .map(|((name, _), rules)| Mode {
                name: *name,
                rules: rules.unwrap_or_default(),
            })
            .collect();

        Ok(Grammar {
            modes,
            root,
            fallback: self.fallback,
        })
    }
}

struct Resolver<'b, K> {
    ids: &'b HashMap<&'static str, ModeId>,
    declared: &'b [(&'static str, Vec<Entry<K>>)],
    resolved: Vec<Option<Vec<SharedRule<K>>>>,
    visiting: Vec<usize>,
}

impl<K: TokenKind> Resolver<'_, K> {
    fn lookup(&self, mode: &str, target: &str) -> Result<ModeId, GrammarError> {
        self.ids
            .get(target)
            .copied()
            .ok_or_else(|| GrammarError::UnknownMode {
                mode: mode.to_string(),
                target: target.to_string(),
            })
    }

    fn flatten(&mut self, index: usize) -> Result<Vec<SharedRule<K>>, GrammarError> {
        if let Some(rules) = &self.resolved[index] {
            return Ok(rules.clone());
        }
        let declared = self.declared;
        let (name, entries) = &declared[index];
        if self.visiting.contains(&index) {
            return Err(GrammarError::IncludeCycle(name.to_string()));
        }
        self.visiting.push(index);

        let mut rules: Vec<SharedRule<K>> = Vec::new();
        for entry in entries {
            match entry {
                Entry::Rule {
                    pattern,
                    action,
                    next,
                } => {
                    if let Action::ByGroups(kinds) = action {
                        if kinds.len() != pattern.group_count() {
                            return Err(GrammarError::GroupMismatch {
                                mode: name.to_string(),
                                index: rules.len(),
                                kinds: kinds.len(),
                                groups: pattern.group_count(),
                            });
                        }
                    }
                    let transition = next.try_map(|target| self.lookup(name, target))?;
                    rules.push(Arc::new(Rule::new(
                        pattern.clone(),
                        action.clone(),
                        transition,
                    )));
                }
                Entry::Include(target) => {
                    let target = self.lookup(name, target)?;
                    rules.extend(self.flatten(target.index())?);
                }
                Entry::Custom(rule) => rules.push(Arc::clone(rule)),
            }
        }

        self.visiting.pop();
        self.resolved[index] = Some(rules.clone());
        Ok(rules)
    }
}

/// A named, resolved list of rules.
pub struct Mode<K> {
    name: &'static str,
    rules: Vec<SharedRule<K>>,
}

impl<K> Mode<K> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rules(&self) -> &[SharedRule<K>] {
        &self.rules
    }
}

impl<K> fmt::Debug for Mode<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mode")
            .field("name", &self.name)
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// An immutable set of modes. Build once, scan many inputs with it.
#[derive(Debug)]
pub struct Grammar<K> {
    modes: Vec<Mode<K>>,
    root: ModeId,
    fallback: K,
}

impl<K: TokenKind> Grammar<K> {
    pub fn root(&self) -> ModeId {
        self.root
    }

    /// Category of the single character emitted when nothing matches.
    pub fn fallback(&self) -> K {
        self.fallback
    }

    pub fn modes(&self) -> &[Mode<K>] {
        &self.modes
    }

    pub fn mode(&self, id: ModeId) -> &Mode<K> {
        &self.modes[id.index()]
    }

    pub fn mode_id(&self, name: &str) -> Option<ModeId> {
        self.modes
            .iter()
            .position(|mode| mode.name == name)
            .map(ModeId)
    }

    pub fn mode_name(&self, id: ModeId) -> &'static str {
        self.mode(id).name
    }

    /// A lazy token stream over `input`.
    pub fn lexer<S: Into<String>>(&self, input: S) -> Lexer<'_, K> {
        Lexer::new(self, input)
    }

    /// Scans `input` completely.
    pub fn tokenize<S: Into<String>>(&self, input: S) -> Vec<Token<K>> {
        self.lexer(input).collect()
    }
}
