//! Error conditions raised while translating triples into axioms.

use crate::options::Profile;
use crate::shape::AxiomKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MappingError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// The graph does not have the structure a passed membership test promised.
    #[error("illegal state: {0}")]
    IllegalState(String),

    #[error("{kind} is not supported under {profile}: no {capability}")]
    Unsupported {
        kind: AxiomKind,
        profile: Profile,
        capability: &'static str,
    },

    /// Two views handed to merge do not denote the same statement.
    #[error("illegal state: cannot merge {left} with {right}")]
    MergeMismatch { left: String, right: String },

    #[error("unresolved reference to {node} ({context})")]
    UnresolvedReference { node: String, context: String },
}

impl MappingError {
    pub(crate) fn illegal(msg: impl Into<String>) -> Self {
        MappingError::IllegalState(msg.into())
    }

    pub(crate) fn unresolved(node: impl ToString, context: impl Into<String>) -> Self {
        MappingError::UnresolvedReference {
            node: node.to_string(),
            context: context.into(),
        }
    }

    /// True for contract violations (as opposed to user-facing conditions).
    pub fn is_illegal_state(&self) -> bool {
        matches!(
            self,
            MappingError::IllegalState(_) | MappingError::MergeMismatch { .. }
        )
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, MappingError::Unsupported { .. })
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, MappingError::UnresolvedReference { .. })
    }
}
