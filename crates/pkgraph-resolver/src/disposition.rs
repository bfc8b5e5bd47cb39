use std::fmt::{Display, Formatter};

/// The resolution state of a node.
///
/// `Acceptable`, `PotentiallyDowngraded` and `Cycle` are assigned by whoever builds the graph;
/// `Accepted` and `Rejected` are only ever assigned by [`crate::DependencyGraph::analyze`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// Not decided yet.
    #[default]
    Acceptable,
    /// A nearer request for the same library may have a higher minimum version.
    PotentiallyDowngraded,
    /// The node repeats one of its ancestors.
    Cycle,
    /// The node is part of the resolved graph.
    Accepted,
    /// The node, and everything beneath it, is not part of the resolved graph.
    Rejected,
}

impl Disposition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Acceptable => "Acceptable",
            Self::PotentiallyDowngraded => "PotentiallyDowngraded",
            Self::Cycle => "Cycle",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
        }
    }
}

impl Display for Disposition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
