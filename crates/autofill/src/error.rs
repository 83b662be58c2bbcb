use thiserror::Error;

use crate::dom::NodeId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
  #[error("No node {0} in this document")]
  UnknownNode(NodeId),

  #[error("Node {0} is not an editable form control")]
  NotEditable(NodeId),
}

pub type Result<T> = std::result::Result<T, DomError>;
