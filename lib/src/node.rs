//! Graph-independent node identities: named IRIs, graph-scoped anonymous ids and literals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use oxigraph::model::{
    BlankNodeRef, Literal, LiteralRef, NamedNode, NamedOrBlankNodeRef, TermRef,
};

static NEXT_SCOPE: AtomicU64 = AtomicU64::new(1);

/// Identifies one graph instance. Anonymous node ids are only meaningful within the
/// scope they were read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GraphScope(u64);

impl GraphScope {
    pub(crate) fn fresh() -> Self {
        GraphScope(NEXT_SCOPE.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for GraphScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AnonId {
    scope: GraphScope,
    label: String,
}

impl AnonId {
    pub fn new(scope: GraphScope, label: impl Into<String>) -> Self {
        AnonId {
            scope,
            label: label.into(),
        }
    }

    pub(crate) fn from_blank(scope: GraphScope, blank: BlankNodeRef<'_>) -> Self {
        AnonId::new(scope, blank.as_str())
    }

    pub fn scope(&self) -> GraphScope {
        self.scope
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for AnonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}@{}", self.label, self.scope)
    }
}

/// A named or anonymous resource.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Node {
    #[serde(rename = "iri")]
    Named(String),
    #[serde(rename = "anon")]
    Anonymous(AnonId),
}

impl Node {
    pub fn named(iri: impl Into<String>) -> Self {
        Node::Named(iri.into())
    }

    pub fn from_resource(scope: GraphScope, resource: NamedOrBlankNodeRef<'_>) -> Self {
        match resource {
            NamedOrBlankNodeRef::NamedNode(n) => Node::Named(n.as_str().to_owned()),
            NamedOrBlankNodeRef::BlankNode(b) => Node::Anonymous(AnonId::from_blank(scope, b)),
        }
    }

    /// Returns `None` for literals
    pub fn from_term(scope: GraphScope, term: TermRef<'_>) -> Option<Self> {
        match term {
            TermRef::NamedNode(n) => Some(Node::Named(n.as_str().to_owned())),
            TermRef::BlankNode(b) => Some(Node::Anonymous(AnonId::from_blank(scope, b))),
            _ => None,
        }
    }

    pub fn iri(&self) -> Option<&str> {
        match self {
            Node::Named(iri) => Some(iri),
            Node::Anonymous(_) => None,
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self, Node::Named(_))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Named(iri) => write!(f, "<{}>", iri),
            Node::Anonymous(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LiteralValue {
    lexical: String,
    datatype: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language: Option<String>,
}

impl LiteralValue {
    pub fn simple(lexical: impl Into<String>) -> Self {
        LiteralValue {
            lexical: lexical.into(),
            datatype: "http://www.w3.org/2001/XMLSchema#string".to_owned(),
            language: None,
        }
    }

    pub fn typed(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        LiteralValue {
            lexical: lexical.into(),
            datatype: datatype.into(),
            language: None,
        }
    }

    pub fn lang(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        LiteralValue {
            lexical: lexical.into(),
            datatype: crate::consts::LANG_STRING.as_str().to_owned(),
            language: Some(language.into().to_ascii_lowercase()),
        }
    }

    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    pub fn datatype(&self) -> &str {
        &self.datatype
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn to_literal(&self) -> Literal {
        match &self.language {
            Some(lang) => Literal::new_language_tagged_literal_unchecked(&self.lexical, lang),
            None => Literal::new_typed_literal(
                &self.lexical,
                NamedNode::new_unchecked(self.datatype.as_str()),
            ),
        }
    }
}

impl From<LiteralRef<'_>> for LiteralValue {
    fn from(literal: LiteralRef<'_>) -> Self {
        LiteralValue {
            lexical: literal.value().to_owned(),
            datatype: literal.datatype().as_str().to_owned(),
            language: literal.language().map(|l| l.to_ascii_lowercase()),
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.language {
            Some(lang) => write!(f, "{:?}@{}", self.lexical, lang),
            None => write!(f, "{:?}^^<{}>", self.lexical, self.datatype),
        }
    }
}
