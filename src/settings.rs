/// Default cap on reflections in a single particle history. Generous enough
/// that real histories terminate on their own; the cap only guards against
/// runaway iteration.
pub const DEFAULT_MAX_BOUNCES: usize = 100_000;

/// Tunable knobs for batch transport.
#[derive(Debug, Clone)]
pub struct TransportSettings {
    /// Upper bound on reflections per particle before the history is
    /// truncated.
    pub max_bounces: usize,
    /// Run batches on the rayon pool; switch off for a plain serial loop.
    pub parallel: bool,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            max_bounces: DEFAULT_MAX_BOUNCES,
            parallel: true,
        }
    }
}
