//! Defines the `AxiomMapper` facade, which reads statements of a given kind out of one
//! graph under one configuration: scanning, point lookup, materialization, merging and
//! detaching.

use crate::config::MappingConfig;
use crate::decompose::{decompose, Decomposition};
use crate::detach::detach;
use crate::errors::{MappingError, Result};
use crate::graph::OntGraph;
use crate::merge::merge;
use crate::model::Axiom;
use crate::shape::{AxiomKind, SearchPattern, Shape};
use crate::view::{materialize, AxiomView};
use log::{debug, warn};
use oxigraph::model::TripleRef;
use std::collections::HashMap;

/// Initializes logging for the ontoaxioms library.
///
/// If `ONTOAXIOMS_LOG` is set, `RUST_LOG` is set to its value before `env_logger` is
/// installed, so `ONTOAXIOMS_LOG` takes precedence over `RUST_LOG`. Calling this more
/// than once is harmless.
pub fn init_logging() {
    if let Ok(log_level) = std::env::var("ONTOAXIOMS_LOG") {
        std::env::set_var("RUST_LOG", log_level);
    }
    let _ = env_logger::try_init();
}

pub struct AxiomMapper<'g> {
    graph: &'g OntGraph,
    config: MappingConfig,
}

impl<'g> AxiomMapper<'g> {
    pub fn new(graph: &'g OntGraph) -> Self {
        Self::with_config(graph, MappingConfig::default())
    }

    pub fn with_config(graph: &'g OntGraph, config: MappingConfig) -> Self {
        AxiomMapper { graph, config }
    }

    pub fn graph(&self) -> &'g OntGraph {
        self.graph
    }

    pub fn config(&self) -> &MappingConfig {
        &self.config
    }

    /// Returns the shape for `kind`, or `Unsupported` if the active profile rejects it.
    pub fn shape(&self, kind: AxiomKind) -> Result<&'static Shape> {
        match self.config.profile.missing_capability(kind) {
            Some(capability) => Err(MappingError::Unsupported {
                kind,
                profile: self.config.profile,
                capability,
            }),
            None => Ok(kind.shape()),
        }
    }

    /// Lazily lists the triples that realize statements of `kind`.
    pub fn scan(&self, kind: AxiomKind) -> Result<Box<dyn Iterator<Item = TripleRef<'g>> + 'g>> {
        Ok(self.shape(kind)?.scan(self.graph, &self.config))
    }

    pub fn matches(&self, kind: AxiomKind, triple: TripleRef<'_>) -> bool {
        self.config.profile.supports(kind) && kind.shape().matches(self.graph, triple, &self.config)
    }

    pub fn search_triple(&self, axiom: &Axiom) -> Result<SearchPattern> {
        Ok(self.shape(axiom.kind())?.search_triple(axiom))
    }

    fn check(&self, shape: &Shape, triple: TripleRef<'g>) -> Result<()> {
        if !self.graph.contains(triple) || !shape.matches(self.graph, triple, &self.config) {
            return Err(MappingError::illegal(format!(
                "{} does not realize a {} statement",
                triple, shape.kind
            )));
        }
        Ok(())
    }

    pub fn decompose(&self, kind: AxiomKind, triple: TripleRef<'g>) -> Result<Decomposition<'g>> {
        let shape = self.shape(kind)?;
        self.check(shape, triple)?;
        decompose(self.graph, shape, triple)
    }

    /// Builds a view for a triple; the triple must pass the membership test.
    pub fn materialize(&self, kind: AxiomKind, triple: TripleRef<'g>) -> Result<AxiomView<'g>> {
        let shape = self.shape(kind)?;
        self.check(shape, triple)?;
        materialize(self.graph, shape, triple)
    }

    /// One view per matching triple, lazily. Duplicates are not collapsed.
    pub fn axioms(
        &self,
        kind: AxiomKind,
    ) -> Result<Box<dyn Iterator<Item = Result<AxiomView<'g>>> + 'g>> {
        let shape = self.shape(kind)?;
        let graph = self.graph;
        Ok(Box::new(
            shape
                .scan(graph, &self.config)
                .map(move |t| materialize(graph, shape, t)),
        ))
    }

    /// One view per logical statement of `kind`; views realizing the same statement
    /// through different triples are merged. Statements that fail to resolve abort the
    /// read or are skipped, depending on the error policy.
    pub fn distinct_axioms(&self, kind: AxiomKind) -> Result<Vec<AxiomView<'g>>> {
        let mut out: Vec<AxiomView<'g>> = Vec::new();
        let mut by_hash: HashMap<u64, Vec<usize>> = HashMap::new();
        for view in self.axioms(kind)? {
            let resolved = view.and_then(|v| v.hash_code().map(|h| (v, h)));
            let (view, hash) = match resolved {
                Ok(resolved) => resolved,
                Err(e) if self.config.error_policy.is_skip() => {
                    warn!("Skipping {} statement: {}", kind, e);
                    continue;
                }
                Err(e) => return Err(e),
            };
            let slots = by_hash.entry(hash).or_default();
            let mut merged = false;
            for &i in slots.iter() {
                if out[i].try_eq(&view)? {
                    out[i] = merge(&out[i], &view)?;
                    merged = true;
                    break;
                }
            }
            if !merged {
                slots.push(out.len());
                out.push(view);
            }
        }
        debug!("Read {} distinct {} statements", out.len(), kind);
        Ok(out)
    }

    /// Distinct statements of every kind the configuration reads.
    pub fn all_axioms(&self) -> Result<Vec<AxiomView<'g>>> {
        let mut out = Vec::new();
        for kind in AxiomKind::ALL {
            if self.config.reads(kind) {
                out.extend(self.distinct_axioms(kind)?);
            }
        }
        Ok(out)
    }

    /// Finds the view realizing `axiom`, annotations included. Uses the search pattern
    /// where one exists and falls back to a scan otherwise. A candidate that fails to
    /// resolve is an error, not a miss.
    pub fn find(&self, axiom: &Axiom) -> Result<Option<AxiomView<'g>>> {
        let shape = self.shape(axiom.kind())?;
        let pattern = shape.search_triple(axiom);
        for triple in pattern.triples() {
            let Some(triple) = self.graph.lookup(triple) else {
                continue;
            };
            if !shape.matches(self.graph, triple, &self.config) {
                continue;
            }
            let view = materialize(self.graph, shape, triple)?;
            if view.try_eq_axiom(axiom)? {
                return Ok(Some(view));
            }
        }
        if pattern.is_exact() {
            return Ok(None);
        }
        debug!("No search pattern for {}, scanning", axiom);
        for triple in shape.scan(self.graph, &self.config) {
            let view = materialize(self.graph, shape, triple)?;
            if view.try_eq_axiom(axiom)? {
                return Ok(Some(view));
            }
        }
        Ok(None)
    }

    pub fn contains(&self, axiom: &Axiom) -> Result<bool> {
        Ok(self.find(axiom)?.is_some())
    }

    pub fn merge(&self, a: &AxiomView<'g>, b: &AxiomView<'g>) -> Result<AxiomView<'g>> {
        merge(a, b)
    }

    pub fn detach(&self, view: &AxiomView<'g>) -> Result<Axiom> {
        detach(view)
    }
}
