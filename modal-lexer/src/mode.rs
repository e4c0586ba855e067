use std::fmt;

/// Index of a mode inside its [`Grammar`](crate::Grammar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModeId(pub(crate) usize);

impl ModeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What happens to the mode stack after a rule matched.
///
/// Tables name modes by string (`Transition<&str>`); the grammar builder
/// resolves them to [`ModeId`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transition<M = ModeId> {
    #[default]
    Stay,
    Push(M),
    Pop,
    /// Replaces the top of the stack.
    Switch(M),
}

impl<M> Transition<M> {
    /// Maps the mode reference, failing if the mapping fails.
    pub fn try_map<N, E, F>(self, f: F) -> Result<Transition<N>, E>
    where
        F: FnOnce(M) -> Result<N, E>,
    {
        Ok(match self {
            Transition::Stay => Transition::Stay,
            Transition::Pop => Transition::Pop,
            Transition::Push(m) => Transition::Push(f(m)?),
            Transition::Switch(m) => Transition::Switch(f(m)?),
        })
    }
}

/// The scanner's mode stack. Never empty: popping the root is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeStack {
    stack: Vec<ModeId>,
}

impl ModeStack {
    /// A stack holding only `root`.
    pub fn new(root: ModeId) -> Self {
        Self { stack: vec![root] }
    }

    /// The active mode.
    pub fn current(&self) -> ModeId {
        self.stack[self.stack.len() - 1]
    }

    /// Number of active modes, at least 1.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Modes from bottom (root) to top.
    pub fn as_slice(&self) -> &[ModeId] {
        &self.stack
    }

    /// Enters `mode`; a later pop returns to the current one.
    pub fn push(&mut self, mode: ModeId) {
        self.stack.push(mode);
    }

    /// Pops the active mode unless it is the root.
    pub fn pop(&mut self) -> Option<ModeId> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    /// Replaces the active mode without changing the depth. At the bottom
    /// this replaces the root.
    pub fn switch(&mut self, mode: ModeId) {
        let top = self.stack.len() - 1;
        self.stack[top] = mode;
    }

    /// Applies a transition and reports whether the stack changed.
    pub fn apply(&mut self, transition: Transition) -> bool {
        match transition {
            Transition::Stay => false,
            Transition::Push(mode) => {
                self.push(mode);
                true
            }
            Transition::Pop => self.pop().is_some(),
            Transition::Switch(mode) => {
                let changed = self.current() != mode;
                self.switch(mode);
                changed
            }
        }
    }

    /// Drops everything above the root.
    pub fn reset(&mut self) {
        self.stack.truncate(1);
    }
}
