/// The number of conflict-resolution rounds after which [`crate::DependencyGraph::analyze`]
/// gives up and reports an incomplete result.
pub const DEFAULT_MAX_ROUNDS: usize = 1000;

/// Options for analyzing a dependency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzeOptions {
    pub max_rounds: usize,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

/// Builder for [`AnalyzeOptions`].
#[derive(Debug, Clone)]
pub struct AnalyzeOptionsBuilder {
    max_rounds: usize,
}

impl Default for AnalyzeOptionsBuilder {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl AnalyzeOptionsBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of conflict-resolution rounds.
    ///
    /// Nodes still undecided once the cap is reached keep their disposition.
    #[must_use]
    pub fn max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Builds the options.
    pub fn build(self) -> AnalyzeOptions {
        AnalyzeOptions {
            max_rounds: self.max_rounds,
        }
    }
}
