use crate::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("Node `{0}` does not exist in this graph")]
    UnknownNode(NodeId),

    #[error("Node `{0}` is not an uplifted node and cannot have foster parents")]
    NotUplifted(NodeId),

    #[error("Dependency graphs are limited to {} nodes", u32::MAX)]
    TooManyNodes,
}
