//! The materialized content of a statement view and the fingerprint used as its hash.
//!
//! Content is a fixed layout over the decomposition: resolved anonymous principal
//! operands first, then list members, then annotations. Named principal operands are
//! never stored; they are read back from the principal triple.

use crate::decompose::Decomposition;
use crate::errors::{MappingError, Result};
use crate::graph::OntGraph;
use crate::model::{Annotation, Axiom, Component};
use crate::node::Node;
use crate::resolve::{node_component, term_component, Resolver};
use crate::shape::Shape;
use oxigraph::model::{TermRef, TripleRef};
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentEntry {
    /// A named list member, converted to its component on access.
    Raw(Node),
    Resolved(Component),
    Annotation(Annotation),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Content(Box<[ContentEntry]>);

impl Content {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentEntry> {
        self.0.iter()
    }

    pub fn entries(&self) -> &[ContentEntry] {
        &self.0
    }

    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.0.iter().filter_map(|e| match e {
            ContentEntry::Annotation(a) => Some(a),
            _ => None,
        })
    }
}

impl From<Vec<ContentEntry>> for Content {
    fn from(entries: Vec<ContentEntry>) -> Self {
        Content(entries.into_boxed_slice())
    }
}

/// A `Hasher` backed by blake3; stable across processes and platforms of equal width.
#[derive(Default)]
pub struct Fingerprint(blake3::Hasher);

impl Hasher for Fingerprint {
    fn write(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    fn finish(&self) -> u64 {
        let digest = self.0.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest.as_bytes()[..8]);
        u64::from_le_bytes(head)
    }
}

pub fn fingerprint<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = Fingerprint::default();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Resolves everything the decomposition does not carry as named nodes.
pub(crate) fn lay_out<'g>(graph: &'g OntGraph, d: &Decomposition<'g>) -> Result<Content> {
    let mut resolver = Resolver::new(graph);
    let mut entries = Vec::with_capacity(d.members.len() + d.annotations.len() + 1);
    for (role, term) in &d.operands {
        if term.is_blank_node() {
            entries.push(ContentEntry::Resolved(resolver.component(*role, *term, d.triple)?));
        }
    }
    if let Some(role) = d.member_role {
        for member in &d.members {
            let entry = match member {
                TermRef::BlankNode(_) => {
                    ContentEntry::Resolved(resolver.component(role, *member, d.triple)?)
                }
                named => ContentEntry::Raw(resolver.node(*named)?),
            };
            entries.push(entry);
        }
    }
    for a in &d.annotations {
        entries.push(ContentEntry::Annotation(resolver.annotation(*a)?));
    }
    Ok(entries.into())
}

/// Builds the axiom from its principal triple and the content laid out against it.
pub(crate) fn assemble(shape: &Shape, triple: TripleRef<'_>, content: &Content) -> Result<Axiom> {
    let mut entries = content.iter();
    let mut operands = Vec::new();
    for (role, term) in shape.principal(triple).into_iter().flatten() {
        if !term.is_blank_node() {
            operands.push(term_component(role, term, triple)?);
            continue;
        }
        match entries.next() {
            Some(ContentEntry::Resolved(c)) => operands.push(c.clone()),
            _ => {
                return Err(MappingError::illegal(format!(
                    "content does not match the layout of {}",
                    triple
                )))
            }
        }
    }
    let mut annotations = Vec::new();
    for entry in entries {
        match (entry, shape.member_role()) {
            (ContentEntry::Raw(node), Some(role)) => operands.push(node_component(role, node)?),
            (ContentEntry::Resolved(c), Some(_)) => operands.push(c.clone()),
            (ContentEntry::Annotation(a), _) => annotations.push(a.clone()),
            _ => {
                return Err(MappingError::illegal(format!(
                    "member content for {} which has no members",
                    triple
                )))
            }
        }
    }
    Ok(Axiom::from_parts(shape.kind, operands, annotations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClassExpr;

    #[test]
    fn test_fingerprint_is_deterministic() {
        let a = Axiom::sub_class_of(ClassExpr::class("urn:a"), ClassExpr::class("urn:b"));
        let b = Axiom::sub_class_of(ClassExpr::class("urn:a"), ClassExpr::class("urn:b"));
        assert_eq!(fingerprint(&a), fingerprint(&b));
        let c = Axiom::sub_class_of(ClassExpr::class("urn:b"), ClassExpr::class("urn:a"));
        assert_ne!(fingerprint(&a), fingerprint(&c));
    }
}
