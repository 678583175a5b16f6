use std::sync::atomic::{AtomicU64, Ordering};

/// Stale-pass guard. A new scope or filter request begins a new pass and
/// invalidates every earlier token, so a slow in-flight pass cannot
/// overwrite fresher results when it eventually resolves.
#[derive(Debug, Default)]
pub struct Generation {
    counter: AtomicU64,
}

/// Token for one pass. Check it against the [`Generation`] before
/// publishing the pass's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassToken(u64);

impl Generation {
    pub fn new() -> Self {
        Generation::default()
    }

    /// Start a new pass, invalidating all previously issued tokens.
    pub fn begin(&self) -> PassToken {
        PassToken(self.counter.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `token` still belongs to the newest pass.
    pub fn is_current(&self, token: PassToken) -> bool {
        self.counter.load(Ordering::SeqCst) == token.0
    }
}
