//! Shared option types that replace boolean flag parameters in the Rust API.

use crate::shape::AxiomKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The OWL 2 profile a graph is read under. Restricted profiles reject statement kinds
/// they do not allow.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// OWL 2 Full / DL mapping without restrictions.
    #[default]
    Full,
    Dl,
    El,
    Ql,
    Rl,
}

impl Profile {
    pub fn supports(self, kind: AxiomKind) -> bool {
        self.missing_capability(kind).is_none()
    }

    /// Returns the name of the construct the profile lacks for this kind, if any.
    pub fn missing_capability(self, kind: AxiomKind) -> Option<&'static str> {
        use AxiomKind::*;
        match self {
            Profile::Full | Profile::Dl => None,
            Profile::El => match kind {
                DisjointUnion => Some("disjoint union"),
                InverseObjectProperties => Some("inverse object properties"),
                DisjointObjectProperties => Some("disjoint object properties"),
                FunctionalObjectProperty => Some("functional object properties"),
                SymmetricObjectProperty => Some("symmetric object properties"),
                _ => None,
            },
            Profile::Ql => match kind {
                DisjointUnion => Some("disjoint union"),
                SameIndividual => Some("individual equality"),
                FunctionalObjectProperty => Some("functional object properties"),
                FunctionalDataProperty => Some("functional data properties"),
                TransitiveObjectProperty => Some("transitive object properties"),
                SubPropertyChainOf => Some("property chains"),
                _ => None,
            },
            Profile::Rl => match kind {
                DisjointUnion => Some("disjoint union"),
                _ => None,
            },
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Profile::Full => "OWL 2 Full",
            Profile::Dl => "OWL 2 DL",
            Profile::El => "OWL 2 EL",
            Profile::Ql => "OWL 2 QL",
            Profile::Rl => "OWL 2 RL",
        };
        write!(f, "{}", name)
    }
}

/// Controls what a bulk read does with a statement whose content cannot be resolved.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Abort the read and return the error.
    #[default]
    Fail,
    /// Log the error and leave the statement out.
    Skip,
}

impl ErrorPolicy {
    pub fn is_skip(self) -> bool {
        matches!(self, ErrorPolicy::Skip)
    }
}

impl From<bool> for ErrorPolicy {
    fn from(skip: bool) -> Self {
        if skip {
            ErrorPolicy::Skip
        } else {
            ErrorPolicy::Fail
        }
    }
}

impl From<ErrorPolicy> for bool {
    fn from(value: ErrorPolicy) -> Self {
        value.is_skip()
    }
}
