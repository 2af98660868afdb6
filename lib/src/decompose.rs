//! Splits a principal triple into the pieces a view is built from: principal operands,
//! list members and the annotation triples attached through reification.

use crate::consts::*;
use crate::errors::{MappingError, Result};
use crate::graph::{resource_term, OntGraph};
use crate::shape::{AxiomKind, Layout, Role, Shape};
use oxigraph::model::{NamedNodeRef, NamedOrBlankNodeRef, TermRef, TripleRef};
use std::collections::HashSet;

// predicates on reification nodes and list roots that are not annotations
const STRUCTURE_PREDICATES: [NamedNodeRef<'_>; 6] = [
    TYPE,
    ANNOTATED_SOURCE,
    ANNOTATED_PROPERTY,
    ANNOTATED_TARGET,
    MEMBERS,
    DISTINCT_MEMBERS,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// No annotations, no list, and every operand is a named node or literal on the triple.
    Simple,
    Complex,
}

#[derive(Debug, Clone)]
pub struct Decomposition<'g> {
    pub kind: AxiomKind,
    pub triple: TripleRef<'g>,
    /// Principal operands in operand order.
    pub operands: Vec<(Role, TermRef<'g>)>,
    pub members: Vec<TermRef<'g>>,
    pub member_role: Option<Role>,
    pub annotations: Vec<TripleRef<'g>>,
    pub classification: Classification,
}

impl<'g> Decomposition<'g> {
    pub fn subject(&self) -> NamedOrBlankNodeRef<'g> {
        self.triple.subject
    }

    pub fn predicate(&self) -> NamedNodeRef<'g> {
        self.triple.predicate
    }

    pub fn object(&self) -> TermRef<'g> {
        self.triple.object
    }

    pub fn is_simple(&self) -> bool {
        self.classification == Classification::Simple
    }
}

/// Nodes of type `ty` reifying `triple` through annotatedSource/Property/Target.
pub(crate) fn reifications<'g>(
    graph: &'g OntGraph,
    triple: TripleRef<'g>,
    ty: NamedNodeRef<'static>,
) -> impl Iterator<Item = NamedOrBlankNodeRef<'g>> + 'g {
    graph
        .find(None, Some(ANNOTATED_SOURCE), Some(resource_term(triple.subject)))
        .map(|t| t.subject)
        .filter(move |x| {
            graph.has_type(*x, ty)
                && graph.contains(TripleRef::new(*x, ANNOTATED_PROPERTY, triple.predicate))
                && graph.contains(TripleRef::new(*x, ANNOTATED_TARGET, triple.object))
        })
}

/// Annotation triples carried by a reification node or list root.
pub(crate) fn annotations_on<'g>(
    graph: &'g OntGraph,
    node: NamedOrBlankNodeRef<'g>,
) -> impl Iterator<Item = TripleRef<'g>> + 'g {
    graph
        .find(Some(node), None, None)
        .filter(|t| !STRUCTURE_PREDICATES.contains(&t.predicate))
}

fn is_rooted(shape: &Shape, triple: TripleRef<'_>) -> bool {
    matches!(shape.layout, Layout::Nary { .. }) && shape.is_list_form(triple)
}

fn has_annotations(graph: &OntGraph, shape: &Shape, triple: TripleRef<'_>) -> bool {
    if is_rooted(shape, triple) {
        return annotations_on(graph, triple.subject).next().is_some();
    }
    reifications(graph, triple, AXIOM).any(|x| annotations_on(graph, x).next().is_some())
}

/// Classifies a triple without building its decomposition.
pub fn classify(graph: &OntGraph, shape: &Shape, triple: TripleRef<'_>) -> Classification {
    if shape.is_list_form(triple) {
        return Classification::Complex;
    }
    let anonymous = shape
        .principal(triple)
        .into_iter()
        .flatten()
        .any(|(_, term)| term.is_blank_node());
    if anonymous || has_annotations(graph, shape, triple) {
        Classification::Complex
    } else {
        Classification::Simple
    }
}

/// Decomposes a triple that passed the shape's membership test.
pub fn decompose<'g>(
    graph: &'g OntGraph,
    shape: &Shape,
    triple: TripleRef<'g>,
) -> Result<Decomposition<'g>> {
    decompose_with(graph, shape, triple, classify(graph, shape, triple))
}

/// Decomposes a triple whose classification is already known.
pub(crate) fn decompose_with<'g>(
    graph: &'g OntGraph,
    shape: &Shape,
    triple: TripleRef<'g>,
    classification: Classification,
) -> Result<Decomposition<'g>> {
    let operands: Vec<_> = shape.principal(triple).into_iter().flatten().collect();

    let members = match shape.member_head(graph, triple) {
        Some(head) => graph.list(head).map_err(|e| {
            MappingError::illegal(format!(
                "{} triple {} has an unreadable member list: {}",
                shape.kind, triple, e
            ))
        })?,
        None if shape.is_list_form(triple) => {
            return Err(MappingError::illegal(format!(
                "{} triple {} has no member list",
                shape.kind, triple
            )))
        }
        None => Vec::new(),
    };

    let annotations: Vec<TripleRef<'g>> = if is_rooted(shape, triple) {
        annotations_on(graph, triple.subject).collect()
    } else {
        reifications(graph, triple, AXIOM)
            .flat_map(|x| annotations_on(graph, x))
            .collect()
    };

    Ok(Decomposition {
        kind: shape.kind,
        triple,
        operands,
        members,
        member_role: shape.member_role(),
        annotations,
        classification,
    })
}

fn is_structural(role: Role) -> bool {
    !matches!(
        role,
        Role::Individual | Role::AnnotationSubject | Role::AnnotationValue
    )
}

/// Collects every triple that realizes the statement whose principal triple is `triple`:
/// the triple itself, anonymous operand structure, member lists and reification.
pub fn statement_triples<'g>(
    graph: &'g OntGraph,
    shape: &Shape,
    triple: TripleRef<'g>,
    out: &mut HashSet<TripleRef<'g>>,
) -> Result<()> {
    out.insert(triple);
    for (role, term) in shape.principal(triple).into_iter().flatten() {
        if is_structural(role) {
            graph.blank_closure(term, out);
        }
    }

    if let Some(head) = shape.member_head(graph, triple) {
        if is_rooted(shape, triple) {
            out.extend(graph.find(Some(triple.subject), None, None));
        }
        graph.list_triples(head, out)?;
        if shape.member_role().map_or(false, is_structural) {
            for member in graph.list(head)? {
                graph.blank_closure(member, out);
            }
        }
    }

    let mut seen = HashSet::new();
    if is_rooted(shape, triple) {
        for a in annotations_on(graph, triple.subject) {
            collect_nested(graph, a, out, &mut seen);
        }
    } else {
        for x in reifications(graph, triple, AXIOM) {
            if seen.insert(x) {
                collect_node(graph, x, out, &mut seen);
            }
        }
    }
    Ok(())
}

fn collect_node<'g>(
    graph: &'g OntGraph,
    node: NamedOrBlankNodeRef<'g>,
    out: &mut HashSet<TripleRef<'g>>,
    seen: &mut HashSet<NamedOrBlankNodeRef<'g>>,
) {
    out.extend(graph.find(Some(node), None, None));
    for a in annotations_on(graph, node) {
        collect_nested(graph, a, out, seen);
    }
}

fn collect_nested<'g>(
    graph: &'g OntGraph,
    annotation: TripleRef<'g>,
    out: &mut HashSet<TripleRef<'g>>,
    seen: &mut HashSet<NamedOrBlankNodeRef<'g>>,
) {
    for y in reifications(graph, annotation, ANNOTATION) {
        if seen.insert(y) {
            collect_node(graph, y, out, seen);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MappingConfig;
    use crate::util::parse_turtle;

    const DATA: &str = r#"
        @prefix : <http://example.org/> .
        @prefix owl: <http://www.w3.org/2002/07/owl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        :A a owl:Class . :B a owl:Class . :C a owl:Class .
        :A rdfs:subClassOf :B .
        :B rdfs:subClassOf :C .
        [] a owl:Axiom ;
           owl:annotatedSource :B ;
           owl:annotatedProperty rdfs:subClassOf ;
           owl:annotatedTarget :C ;
           rdfs:comment "reified" .
        [] a owl:AllDisjointClasses ;
           owl:members ( :A :B :C ) ;
           rdfs:label "all different" .
    "#;

    #[test]
    fn test_classification() {
        let g = parse_turtle(DATA).unwrap();
        let cfg = MappingConfig::default();
        let shape = AxiomKind::SubClassOf.shape();
        let mut classes: Vec<_> = shape
            .scan(&g, &cfg)
            .map(|t| classify(&g, shape, t))
            .collect();
        classes.sort_by_key(|c| *c == Classification::Simple);
        assert_eq!(classes, vec![Classification::Complex, Classification::Simple]);

        let shape = AxiomKind::DisjointClasses.shape();
        let triple = shape.scan(&g, &cfg).next().unwrap();
        assert_eq!(classify(&g, shape, triple), Classification::Complex);
    }

    #[test]
    fn test_decompose_list_root() {
        let g = parse_turtle(DATA).unwrap();
        let cfg = MappingConfig::default();
        let shape = AxiomKind::DisjointClasses.shape();
        let triple = shape.scan(&g, &cfg).next().unwrap();
        let d = decompose(&g, shape, triple).unwrap();
        assert!(d.operands.is_empty());
        assert_eq!(d.members.len(), 3);
        assert_eq!(d.annotations.len(), 1);

        let mut triples = HashSet::new();
        statement_triples(&g, shape, triple, &mut triples).unwrap();
        // type, members, label, and three list cells of two triples each
        assert_eq!(triples.len(), 9);
    }

    #[test]
    fn test_reified_annotation_is_found() {
        let g = parse_turtle(DATA).unwrap();
        let cfg = MappingConfig::default();
        let shape = AxiomKind::SubClassOf.shape();
        let annotated: Vec<_> = shape
            .scan(&g, &cfg)
            .map(|t| decompose(&g, shape, t).unwrap())
            .filter(|d| !d.annotations.is_empty())
            .collect();
        assert_eq!(annotated.len(), 1);
        let mut triples = HashSet::new();
        statement_triples(&g, shape, annotated[0].triple, &mut triples).unwrap();
        assert_eq!(triples.len(), 6);
    }
}
