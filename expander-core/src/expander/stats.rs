use serde::{Deserialize, Serialize};

/// Counters gathered over a single `expand_with_stats` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionStats {
    /// Provider invocations.
    pub provider_calls: usize,
    /// Consumer invocations.
    pub leaves: usize,
    /// Subtrees discarded because a provider returned no variants.
    pub pruned: usize,
    /// Deepest level reached; the root is level 0.
    pub max_depth: usize,
}

impl ExpansionStats {
    pub(crate) fn enter(&mut self, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
    }
}
