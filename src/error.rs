#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    PreconditionError(#[from] PreconditionError),

    #[error(transparent)]
    UnrelatedConstraintError(#[from] UnrelatedConstraintError),

    #[error(transparent)]
    InvariantError(#[from] InvariantError),
}

/// A caller contract was broken: an unassigned value was read, a constraint
/// that can never hold was applied, a domain precondition failed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[derive(thiserror::Error)]
#[error("precondition violated: {msg}")]
pub struct PreconditionError {
    msg: &'static str,
}

impl PreconditionError {
    /// Creates a new `PreconditionError` with a static message.
    pub const fn new(msg: &'static str) -> Self {
        Self { msg }
    }
}

/// A constraint passed to `constrain` never mentions the interval being
/// narrowed, usually because it was built from a derived expression rather
/// than the interval itself.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[derive(thiserror::Error)]
#[error("constraint does not reference the constrained interval: {msg}")]
pub struct UnrelatedConstraintError {
    msg: &'static str,
}

impl UnrelatedConstraintError {
    /// Creates a new `UnrelatedConstraintError` with a static message.
    pub const fn new(msg: &'static str) -> Self {
        Self { msg }
    }
}

/// A type invariant has been violated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[derive(thiserror::Error)]
#[error("invariant violated: {msg}")]
pub struct InvariantError {
    msg: &'static str,
}

impl InvariantError {
    /// Creates a new `InvariantError` with a static message.
    pub const fn new(msg: &'static str) -> Self {
        Self { msg }
    }
}
