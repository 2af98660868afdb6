//! Statement views over a graph.
//!
//! A view is either *direct*, when every operand sits on the principal triple as a named
//! node or literal and nothing is annotated, or *cached*, holding a lazily computed
//! `Content`. Cached content lives in a `OnceLock`: concurrent first readers may each
//! compute it, the first `set` wins and the losers drop their copy, which is equal.

use crate::content::{assemble, fingerprint, lay_out, Content};
use crate::decompose::{classify, decompose_with, statement_triples, Classification, Decomposition};
use crate::errors::{MappingError, Result};
use crate::graph::OntGraph;
use crate::model::Axiom;
use crate::shape::{AxiomKind, Shape};
use log::trace;
use oxigraph::model::TripleRef;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

#[derive(Debug)]
pub(crate) struct Materialized {
    content: Content,
    hash: u64,
}

pub(crate) enum Repr {
    Direct { hash: u64 },
    Cached { cell: OnceLock<Arc<Materialized>> },
}

impl Repr {
    fn empty() -> Self {
        Repr::Cached {
            cell: OnceLock::new(),
        }
    }
}

pub struct AxiomView<'g> {
    graph: &'g OntGraph,
    shape: &'static Shape,
    // the triple the content is laid out against
    triple: TripleRef<'g>,
    sources: Vec<TripleRef<'g>>,
    repr: Repr,
}

/// Builds a view for a triple that realizes `shape`. Simple triples get a direct view
/// whose hash is computed here; all others get an empty cache.
pub fn materialize<'g>(
    graph: &'g OntGraph,
    shape: &'static Shape,
    triple: TripleRef<'g>,
) -> Result<AxiomView<'g>> {
    let repr = match classify(graph, shape, triple) {
        Classification::Simple => {
            let value = assemble(shape, triple, &Content::default())?;
            Repr::Direct {
                hash: fingerprint(&value),
            }
        }
        Classification::Complex => Repr::empty(),
    };
    Ok(AxiomView {
        graph,
        shape,
        triple,
        sources: vec![triple],
        repr,
    })
}

impl<'g> AxiomView<'g> {
    pub(crate) fn from_parts(
        graph: &'g OntGraph,
        shape: &'static Shape,
        triple: TripleRef<'g>,
        sources: Vec<TripleRef<'g>>,
        repr: Repr,
    ) -> Self {
        AxiomView {
            graph,
            shape,
            triple,
            sources,
            repr,
        }
    }

    pub fn kind(&self) -> AxiomKind {
        self.shape.kind
    }

    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    pub fn graph(&self) -> &'g OntGraph {
        self.graph
    }

    /// The principal triple the view reads its operands from.
    pub fn triple(&self) -> TripleRef<'g> {
        self.triple
    }

    /// Every principal triple that realizes this statement.
    pub fn sources(&self) -> &[TripleRef<'g>] {
        &self.sources
    }

    pub fn is_direct(&self) -> bool {
        matches!(self.repr, Repr::Direct { .. })
    }

    /// True once content has been stored for a cached view.
    pub fn is_computed(&self) -> bool {
        match &self.repr {
            Repr::Direct { .. } => false,
            Repr::Cached { cell } => cell.get().is_some(),
        }
    }

    /// Decomposes the view's triple under the classification fixed at materialization.
    pub fn decompose(&self) -> Result<Decomposition<'g>> {
        decompose_with(self.graph, self.shape, self.triple, self.classification())
    }

    pub fn classification(&self) -> Classification {
        match self.repr {
            Repr::Direct { .. } => Classification::Simple,
            Repr::Cached { .. } => Classification::Complex,
        }
    }

    /// Computes content from the graph without storing it. Direct views have none.
    pub fn compute(&self) -> Result<Content> {
        match self.repr {
            Repr::Direct { .. } => Ok(Content::default()),
            Repr::Cached { .. } => lay_out(self.graph, &self.decompose()?),
        }
    }

    fn fill(&self) -> Result<Materialized> {
        let content = self.compute()?;
        let hash = fingerprint(&assemble(self.shape, self.triple, &content)?);
        trace!("materialized {} with {} entries", self.triple, content.len());
        Ok(Materialized { content, hash })
    }

    fn materialized(&self) -> Result<Option<&Materialized>> {
        let Repr::Cached { cell } = &self.repr else {
            return Ok(None);
        };
        if let Some(m) = cell.get() {
            return Ok(Some(m));
        }
        let fresh = Arc::new(self.fill()?);
        // losing the race is fine: the winner's content is equal
        let _ = cell.set(fresh);
        Ok(cell.get().map(Arc::as_ref))
    }

    /// The stored content, computing it on first access. `None` for direct views.
    pub fn content(&self) -> Result<Option<&Content>> {
        Ok(self.materialized()?.map(|m| &m.content))
    }

    pub fn hash_code(&self) -> Result<u64> {
        match &self.repr {
            Repr::Direct { hash } => Ok(*hash),
            Repr::Cached { .. } => self
                .materialized()?
                .map(|m| m.hash)
                .ok_or_else(|| MappingError::illegal("cached view without content")),
        }
    }

    /// The logical statement this view denotes.
    pub fn value(&self) -> Result<Axiom> {
        match self.materialized()? {
            Some(m) => assemble(self.shape, self.triple, &m.content),
            None => assemble(self.shape, self.triple, &Content::default()),
        }
    }

    /// Every triple realizing the statement, across all sources.
    pub fn triples(&self) -> Result<HashSet<TripleRef<'g>>> {
        let mut out = HashSet::new();
        for source in &self.sources {
            statement_triples(self.graph, self.shape, *source, &mut out)?;
        }
        Ok(out)
    }

    /// Logical equality. Views sharing a principal triple of the same graph are equal
    /// without resolution; otherwise hashes are compared before values.
    pub fn try_eq(&self, other: &AxiomView<'_>) -> Result<bool> {
        if self.kind() != other.kind() {
            return Ok(false);
        }
        if std::ptr::eq(self.graph, other.graph)
            && self.sources.iter().any(|t| other.sources.contains(t))
        {
            return Ok(true);
        }
        if self.hash_code()? != other.hash_code()? {
            return Ok(false);
        }
        Ok(self.value()? == other.value()?)
    }

    /// Compares against a detached statement, surfacing resolution errors.
    pub fn try_eq_axiom(&self, other: &Axiom) -> Result<bool> {
        if self.kind() != other.kind() || self.hash_code()? != fingerprint(other) {
            return Ok(false);
        }
        Ok(self.value()? == *other)
    }

    /// What a merge adopts from this view: the layout triple with its representation,
    /// if anything has been computed.
    pub(crate) fn adoptable(&self) -> Option<(TripleRef<'g>, Repr)> {
        match &self.repr {
            Repr::Direct { hash } => Some((self.triple, Repr::Direct { hash: *hash })),
            Repr::Cached { cell } => cell.get().map(|m| {
                (
                    self.triple,
                    Repr::Cached {
                        cell: OnceLock::from(Arc::clone(m)),
                    },
                )
            }),
        }
    }

    pub(crate) fn unadopted(&self) -> (TripleRef<'g>, Repr) {
        (self.triple, Repr::empty())
    }
}

impl PartialEq for AxiomView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.try_eq(other).unwrap_or(false)
    }
}

impl Eq for AxiomView<'_> {}

/// Views whose content cannot be resolved all hash to 0.
impl Hash for AxiomView<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code().unwrap_or_default());
    }
}

impl PartialEq<Axiom> for AxiomView<'_> {
    fn eq(&self, other: &Axiom) -> bool {
        self.try_eq_axiom(other).unwrap_or(false)
    }
}

impl fmt::Debug for AxiomView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxiomView")
            .field("kind", &self.kind())
            .field("triple", &self.triple)
            .field("sources", &self.sources.len())
            .field("direct", &self.is_direct())
            .field("computed", &self.is_computed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MappingConfig;
    use crate::util::parse_turtle;

    #[test]
    fn test_direct_and_cached_hash_agree() {
        let g = parse_turtle(
            r#"@prefix : <http://example.org/> .
               @prefix owl: <http://www.w3.org/2002/07/owl#> .
               @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
               :A rdfs:subClassOf :B .
               [] a owl:AllDisjointClasses ; owl:members ( :A :B ) .
               :A owl:disjointWith :B ."#,
        )
        .unwrap();
        let cfg = MappingConfig::default();
        let shape = AxiomKind::DisjointClasses.shape();
        let views: Vec<_> = shape
            .scan(&g, &cfg)
            .map(|t| materialize(&g, shape, t).unwrap())
            .collect();
        assert_eq!(views.len(), 2);
        let (direct, cached): (Vec<_>, Vec<_>) = views.iter().partition(|v| v.is_direct());
        assert_eq!(direct.len(), 1);
        assert!(!cached[0].is_computed());
        assert_eq!(direct[0].hash_code().unwrap(), cached[0].hash_code().unwrap());
        assert!(cached[0].is_computed());
        assert_eq!(direct[0], cached[0]);
    }

    #[test]
    fn test_compute_keeps_materialized_classification() {
        let g = parse_turtle(
            r#"@prefix : <http://example.org/> .
               @prefix owl: <http://www.w3.org/2002/07/owl#> .
               [] a owl:AllDisjointClasses ; owl:members ( :A :B ) .
               :A owl:disjointWith :B ."#,
        )
        .unwrap();
        let cfg = MappingConfig::default();
        let shape = AxiomKind::DisjointClasses.shape();
        for t in shape.scan(&g, &cfg) {
            let view = materialize(&g, shape, t).unwrap();
            let expected = if view.is_direct() {
                Classification::Simple
            } else {
                Classification::Complex
            };
            assert_eq!(view.classification(), expected);
            assert_eq!(view.decompose().unwrap().classification, expected);
            view.compute().unwrap();
            assert!(!view.is_computed());
        }
    }
}
