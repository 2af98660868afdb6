//! The triple substrate: an oxigraph `Graph` tagged with a `GraphScope`, with the
//! wildcard pattern lookups and RDF list helpers the statement shapes need.

use crate::consts::*;
use crate::errors::{MappingError, Result};
use crate::node::{GraphScope, Node};
use oxigraph::model::{
    Graph, NamedNodeRef, NamedOrBlankNodeRef, TermRef, Triple, TripleRef,
};
use std::collections::HashSet;
use std::fmt;

pub struct OntGraph {
    scope: GraphScope,
    graph: Graph,
}

impl Default for OntGraph {
    fn default() -> Self {
        Self::new()
    }
}

// a clone is a distinct graph instance, so it gets its own scope
impl Clone for OntGraph {
    fn clone(&self) -> Self {
        Self::from_graph(self.graph.clone())
    }
}

impl fmt::Debug for OntGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OntGraph")
            .field("scope", &self.scope)
            .field("triples", &self.graph.len())
            .finish()
    }
}

impl From<Graph> for OntGraph {
    fn from(graph: Graph) -> Self {
        Self::from_graph(graph)
    }
}

/// Returns the term as a subject-capable resource, or `None` for literals.
pub fn as_resource(term: TermRef<'_>) -> Option<NamedOrBlankNodeRef<'_>> {
    match term {
        TermRef::NamedNode(n) => Some(n.into()),
        TermRef::BlankNode(b) => Some(b.into()),
        _ => None,
    }
}

pub fn resource_term(resource: NamedOrBlankNodeRef<'_>) -> TermRef<'_> {
    match resource {
        NamedOrBlankNodeRef::NamedNode(n) => TermRef::NamedNode(n),
        NamedOrBlankNodeRef::BlankNode(b) => TermRef::BlankNode(b),
    }
}

pub fn is_blank(term: TermRef<'_>) -> bool {
    matches!(term, TermRef::BlankNode(_))
}

impl OntGraph {
    pub fn new() -> Self {
        Self::from_graph(Graph::new())
    }

    pub fn from_graph(graph: Graph) -> Self {
        Self {
            scope: GraphScope::fresh(),
            graph,
        }
    }

    pub fn scope(&self) -> GraphScope {
        self.scope
    }

    pub fn inner(&self) -> &Graph {
        &self.graph
    }

    pub fn into_inner(self) -> Graph {
        self.graph
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn insert<'a>(&mut self, triple: impl Into<TripleRef<'a>>) -> bool {
        self.graph.insert(triple)
    }

    pub fn remove<'a>(&mut self, triple: impl Into<TripleRef<'a>>) -> bool {
        self.graph.remove(triple)
    }

    pub fn contains<'a>(&self, triple: impl Into<TripleRef<'a>>) -> bool {
        self.graph.contains(triple)
    }

    pub fn iter(&self) -> impl Iterator<Item = TripleRef<'_>> {
        self.graph.iter()
    }

    /// Pattern lookup; `None` is a wildcard. The returned triples borrow from the graph,
    /// the iterator itself may also borrow the pattern terms.
    pub fn find<'a, 'b>(
        &'a self,
        subject: Option<NamedOrBlankNodeRef<'b>>,
        predicate: Option<NamedNodeRef<'b>>,
        object: Option<TermRef<'b>>,
    ) -> Box<dyn Iterator<Item = TripleRef<'a>> + 'b>
    where
        'a: 'b,
    {
        match (subject, predicate, object) {
            (Some(s), p, o) => Box::new(
                self.graph
                    .triples_for_subject(s)
                    .filter(move |t| p.map_or(true, |p| t.predicate == p))
                    .filter(move |t| o.map_or(true, |o| t.object == o)),
            ),
            (None, p, Some(o)) => Box::new(
                self.graph
                    .triples_for_object(o)
                    .filter(move |t| p.map_or(true, |p| t.predicate == p)),
            ),
            (None, Some(p), None) => Box::new(self.graph.triples_for_predicate(p)),
            (None, None, None) => Box::new(self.graph.iter()),
        }
    }

    /// Returns the graph's own copy of an owned triple, if present.
    pub fn lookup<'a>(&'a self, triple: &Triple) -> Option<TripleRef<'a>> {
        let triple = triple.as_ref();
        self.find(
            Some(triple.subject),
            Some(triple.predicate),
            Some(triple.object),
        )
        .next()
    }

    pub fn object<'a, 'b>(
        &'a self,
        subject: NamedOrBlankNodeRef<'b>,
        predicate: NamedNodeRef<'b>,
    ) -> Option<TermRef<'a>>
    where
        'a: 'b,
    {
        self.find(Some(subject), Some(predicate), None)
            .next()
            .map(|t| t.object)
    }

    pub fn has_type(&self, subject: NamedOrBlankNodeRef<'_>, ty: NamedNodeRef<'_>) -> bool {
        self.find(Some(subject), Some(TYPE), Some(ty.into()))
            .next()
            .is_some()
    }

    pub fn has_any_type(&self, subject: NamedOrBlankNodeRef<'_>, types: &[NamedNodeRef<'_>]) -> bool {
        self.find(Some(subject), Some(TYPE), None)
            .any(|t| types.iter().any(|ty| t.object == TermRef::from(*ty)))
    }

    pub fn has_subject(&self, subject: NamedOrBlankNodeRef<'_>) -> bool {
        self.find(Some(subject), None, None).next().is_some()
    }

    /// Resources typed with `ty`.
    pub fn instances<'a, 'b>(
        &'a self,
        ty: NamedNodeRef<'b>,
    ) -> impl Iterator<Item = NamedOrBlankNodeRef<'a>> + 'b
    where
        'a: 'b,
    {
        self.find(None, Some(TYPE), Some(ty.into()))
            .map(|t| t.subject)
    }

    pub fn node(&self, term: TermRef<'_>) -> Option<Node> {
        Node::from_term(self.scope, term)
    }

    /// Walks an RDF list from `head` to `rdf:nil`.
    pub fn list<'a>(&'a self, head: TermRef<'a>) -> Result<Vec<TermRef<'a>>> {
        let mut members = Vec::new();
        self.walk_list(head, |cell| {
            members.push(cell.object);
        })?;
        Ok(members)
    }

    /// Collects the `rdf:first`/`rdf:rest` triples that make up the list at `head`.
    pub fn list_triples<'a>(
        &'a self,
        head: TermRef<'a>,
        out: &mut HashSet<TripleRef<'a>>,
    ) -> Result<()> {
        let mut cells = Vec::new();
        self.walk_list(head, |first| cells.push(first))?;
        for first in cells {
            out.insert(first);
            if let Some(rest) = self.find(Some(first.subject), Some(REST), None).next() {
                out.insert(rest);
            }
        }
        Ok(())
    }

    fn walk_list<'a>(
        &'a self,
        head: TermRef<'a>,
        mut visit: impl FnMut(TripleRef<'a>),
    ) -> Result<()> {
        let mut seen: HashSet<NamedOrBlankNodeRef<'a>> = HashSet::new();
        let mut current = head;
        loop {
            if current == TermRef::from(NIL) {
                return Ok(());
            }
            let cell = as_resource(current).ok_or_else(|| {
                MappingError::illegal(format!("literal {} used as a list cell", current))
            })?;
            if !seen.insert(cell) {
                return Err(MappingError::illegal(format!("cyclic list at {}", cell)));
            }
            let first = self
                .find(Some(cell), Some(FIRST), None)
                .next()
                .ok_or_else(|| MappingError::unresolved(cell, "list cell without rdf:first"))?;
            visit(first);
            current = self
                .object(cell, REST)
                .ok_or_else(|| MappingError::unresolved(cell, "list cell without rdf:rest"))?;
        }
    }

    /// Adds every triple reachable from `term` through blank-node subjects.
    pub fn blank_closure<'a>(&'a self, term: TermRef<'a>, out: &mut HashSet<TripleRef<'a>>) {
        let mut stack = vec![term];
        while let Some(term) = stack.pop() {
            let blank = match term {
                TermRef::BlankNode(b) => b,
                _ => continue,
            };
            for t in self.find(Some(blank.into()), None, None) {
                if out.insert(t) && is_blank(t.object) {
                    stack.push(t.object);
                }
            }
        }
    }

    /// Writes an RDF list and returns its head.
    pub fn insert_list(&mut self, members: Vec<oxigraph::model::Term>) -> oxigraph::model::Term {
        use oxigraph::model::{BlankNode, Term};
        let mut head: Term = NIL.into_owned().into();
        for member in members.into_iter().rev() {
            let cell = BlankNode::default();
            self.graph.insert(&Triple::new(cell.clone(), FIRST.into_owned(), member));
            self.graph.insert(&Triple::new(cell.clone(), REST.into_owned(), head));
            head = cell.into();
        }
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::parse_turtle;

    const DATA: &str = r#"
        @prefix : <http://example.org/> .
        @prefix owl: <http://www.w3.org/2002/07/owl#> .
        :A a owl:Class .
        :B a owl:Class .
        :A owl:disjointUnionOf ( :B :C ) .
    "#;

    #[test]
    fn test_find_wildcards() {
        let g = parse_turtle(DATA).unwrap();
        assert_eq!(g.find(None, Some(TYPE), None).count(), 2);
        assert_eq!(g.find(None, None, None).count(), g.len());
        let a = NamedNodeRef::new("http://example.org/A").unwrap();
        assert_eq!(g.find(Some(a.into()), None, None).count(), 2);
        assert_eq!(
            g.find(Some(a.into()), Some(TYPE), Some(OWL_CLASS.into()))
                .count(),
            1
        );
        assert_eq!(g.instances(OWL_CLASS).count(), 2);
    }

    #[test]
    fn test_list_walk() {
        let g = parse_turtle(DATA).unwrap();
        let a = NamedNodeRef::new("http://example.org/A").unwrap();
        let head = g.object(a.into(), DISJOINT_UNION_OF).unwrap();
        let members = g.list(head).unwrap();
        assert_eq!(members.len(), 2);
        let mut triples = HashSet::new();
        g.list_triples(head, &mut triples).unwrap();
        assert_eq!(triples.len(), 4);
    }

    #[test]
    fn test_broken_list_is_unresolved() {
        let g = parse_turtle(
            r#"@prefix : <http://example.org/> .
               @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
               _:l rdf:first :A ; rdf:rest _:m ."#,
        )
        .unwrap();
        let head = g
            .find(None, Some(FIRST), None)
            .next()
            .map(|t| resource_term(t.subject))
            .unwrap();
        let err = g.list(head).unwrap_err();
        assert!(err.is_unresolved());
    }

    #[test]
    fn test_clone_gets_new_scope() {
        let g = OntGraph::new();
        assert_ne!(g.scope(), g.clone().scope());
    }
}
