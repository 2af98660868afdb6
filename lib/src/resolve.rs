//! Turns operand nodes into typed components. Named nodes convert directly; anonymous
//! nodes are followed into the graph and become nested class expressions, inverse
//! property expressions or anonymous individuals.

use crate::consts::*;
use crate::decompose::{annotations_on, reifications};
use crate::errors::{MappingError, Result};
use crate::graph::OntGraph;
use crate::model::{
    Annotation, AnnotationValue, ClassExpr, Component, Entity, EntityType, ObjectPropertyExpr,
};
use crate::node::Node;
use crate::shape::{is_data_property, Role};
use log::trace;
use oxigraph::model::{BlankNodeRef, NamedNodeRef, NamedOrBlankNodeRef, TermRef, TripleRef};

type CardinalityCtor = fn(u32, ObjectPropertyExpr, Option<Box<ClassExpr>>) -> ClassExpr;

const CARDINALITIES: [(NamedNodeRef<'_>, bool, CardinalityCtor); 6] = [
    (MIN_CARDINALITY, false, ClassExpr::MinCardinality),
    (MAX_CARDINALITY, false, ClassExpr::MaxCardinality),
    (CARDINALITY, false, ClassExpr::ExactCardinality),
    (MIN_QUALIFIED_CARDINALITY, true, ClassExpr::MinCardinality),
    (MAX_QUALIFIED_CARDINALITY, true, ClassExpr::MaxCardinality),
    (QUALIFIED_CARDINALITY, true, ClassExpr::ExactCardinality),
];

/// Converts a named operand to its component. `Role::Entity` needs the declared type.
pub(crate) fn iri_component(role: Role, iri: &str, entity: Option<EntityType>) -> Result<Component> {
    let iri = iri.to_owned();
    Ok(match role {
        Role::Class | Role::NamedClass => Component::Class(ClassExpr::Class(iri)),
        Role::ObjectProperty | Role::ObjectPropertyExpr => {
            Component::ObjectProperty(ObjectPropertyExpr::Named(iri))
        }
        Role::DataProperty => Component::DataProperty(iri),
        Role::AnnotationProperty => Component::AnnotationProperty(iri),
        Role::Datatype => Component::Datatype(iri),
        Role::Individual => Component::Individual(Node::Named(iri)),
        Role::AnnotationSubject | Role::AnnotationValue => Component::Resource(Node::Named(iri)),
        Role::Entity => match entity {
            Some(kind) => Component::Entity(Entity::new(kind, iri)),
            None => {
                return Err(MappingError::illegal(format!(
                    "declaration of <{}> without an entity type",
                    iri
                )))
            }
        },
        Role::Literal => {
            return Err(MappingError::illegal(format!(
                "<{}> used where a literal is required",
                iri
            )))
        }
    })
}

/// Converts a named or literal term on `triple` without touching the graph.
pub(crate) fn term_component(role: Role, term: TermRef<'_>, triple: TripleRef<'_>) -> Result<Component> {
    match term {
        TermRef::NamedNode(n) => {
            let entity = match triple.object {
                TermRef::NamedNode(ty) => EntityType::from_type_iri(ty),
                _ => None,
            };
            iri_component(role, n.as_str(), entity)
        }
        TermRef::Literal(l) if matches!(role, Role::Literal | Role::AnnotationValue) => {
            Ok(Component::Literal(l.into()))
        }
        other => Err(MappingError::illegal(format!(
            "{} cannot be used as {:?} without resolution",
            other, role
        ))),
    }
}

/// Converts a stored member node back into its component.
pub(crate) fn node_component(role: Role, node: &Node) -> Result<Component> {
    match node {
        Node::Named(iri) => iri_component(role, iri, None),
        Node::Anonymous(_) if role == Role::Individual => Ok(Component::Individual(node.clone())),
        Node::Anonymous(id) => Err(MappingError::illegal(format!(
            "anonymous member {} stored unresolved",
            id
        ))),
    }
}

pub(crate) struct Resolver<'g> {
    graph: &'g OntGraph,
    // blank nodes whose resolution is in progress
    active: Vec<BlankNodeRef<'g>>,
    reified: Vec<NamedOrBlankNodeRef<'g>>,
}

impl<'g> Resolver<'g> {
    pub(crate) fn new(graph: &'g OntGraph) -> Self {
        Resolver {
            graph,
            active: Vec::new(),
            reified: Vec::new(),
        }
    }

    pub(crate) fn component(
        &mut self,
        role: Role,
        term: TermRef<'g>,
        triple: TripleRef<'g>,
    ) -> Result<Component> {
        if !term.is_blank_node() {
            return term_component(role, term, triple);
        }
        trace!("resolving {} as {:?}", term, role);
        match role {
            Role::Class | Role::NamedClass => Ok(Component::Class(self.class_expr(term)?)),
            Role::ObjectProperty | Role::ObjectPropertyExpr => {
                Ok(Component::ObjectProperty(self.property_expr(term)?))
            }
            Role::Individual => Ok(Component::Individual(self.node(term)?)),
            Role::AnnotationSubject | Role::AnnotationValue => {
                Ok(Component::Resource(self.node(term)?))
            }
            _ => Err(MappingError::illegal(format!(
                "anonymous node {} cannot be used as {:?}",
                term, role
            ))),
        }
    }

    pub(crate) fn node(&self, term: TermRef<'g>) -> Result<Node> {
        self.graph.node(term).ok_or_else(|| {
            MappingError::illegal(format!("literal {} used where a resource is required", term))
        })
    }

    pub(crate) fn class_expr(&mut self, term: TermRef<'g>) -> Result<ClassExpr> {
        let blank = match term {
            TermRef::NamedNode(n) => return Ok(ClassExpr::Class(n.as_str().to_owned())),
            TermRef::BlankNode(b) => b,
            other => {
                return Err(MappingError::illegal(format!(
                    "literal {} used as a class expression",
                    other
                )))
            }
        };
        if !self.graph.has_subject(blank.into()) {
            return Err(MappingError::unresolved(
                blank,
                "class expression without defining triples",
            ));
        }
        if self.active.contains(&blank) {
            return Err(MappingError::illegal(format!(
                "class expression {} refers to itself",
                blank
            )));
        }
        self.active.push(blank);
        let expr = self.class_structure(blank);
        self.active.pop();
        expr
    }

    fn class_structure(&mut self, blank: BlankNodeRef<'g>) -> Result<ClassExpr> {
        let graph = self.graph;
        let node: NamedOrBlankNodeRef<'g> = blank.into();
        if let Some(head) = graph.object(node, INTERSECTION_OF) {
            return Ok(ClassExpr::intersection(self.class_list(head)?));
        }
        if let Some(head) = graph.object(node, UNION_OF) {
            return Ok(ClassExpr::union(self.class_list(head)?));
        }
        if let Some(operand) = graph.object(node, COMPLEMENT_OF) {
            return Ok(ClassExpr::complement(self.class_expr(operand)?));
        }
        if let Some(head) = graph.object(node, ONE_OF) {
            let individuals = graph
                .list(head)?
                .into_iter()
                .map(|m| self.node(m))
                .collect::<Result<Vec<_>>>()?;
            return Ok(ClassExpr::one_of(individuals));
        }
        if let Some(property) = graph.object(node, ON_PROPERTY) {
            return self.restriction(node, property);
        }
        Err(MappingError::illegal(format!(
            "{} is not a class expression",
            blank
        )))
    }

    fn class_list(&mut self, head: TermRef<'g>) -> Result<Vec<ClassExpr>> {
        self.graph
            .list(head)?
            .into_iter()
            .map(|m| self.class_expr(m))
            .collect()
    }

    fn restriction(
        &mut self,
        node: NamedOrBlankNodeRef<'g>,
        property: TermRef<'g>,
    ) -> Result<ClassExpr> {
        let graph = self.graph;
        if let TermRef::NamedNode(p) = property {
            if is_data_property(graph, p) {
                return self.data_restriction(node, p);
            }
        }
        let pe = self.property_expr(property)?;
        if let Some(filler) = graph.object(node, SOME_VALUES_FROM) {
            return Ok(ClassExpr::SomeValuesFrom(pe, Box::new(self.class_expr(filler)?)));
        }
        if let Some(filler) = graph.object(node, ALL_VALUES_FROM) {
            return Ok(ClassExpr::AllValuesFrom(pe, Box::new(self.class_expr(filler)?)));
        }
        if let Some(value) = graph.object(node, HAS_VALUE) {
            return Ok(ClassExpr::HasValue(pe, self.node(value)?));
        }
        if graph.object(node, HAS_SELF).is_some() {
            return Ok(ClassExpr::HasSelf(pe));
        }
        for (predicate, qualified, build) in CARDINALITIES {
            let Some(n) = graph.object(node, predicate) else {
                continue;
            };
            let n = cardinality(n)?;
            let filler = if qualified {
                let class = graph.object(node, ON_CLASS).ok_or_else(|| {
                    MappingError::illegal(format!("qualified cardinality on {} without owl:onClass", node))
                })?;
                Some(Box::new(self.class_expr(class)?))
            } else {
                None
            };
            return Ok(build(n, pe, filler));
        }
        Err(MappingError::illegal(format!(
            "restriction {} has no filler",
            node
        )))
    }

    fn data_restriction(
        &mut self,
        node: NamedOrBlankNodeRef<'g>,
        property: NamedNodeRef<'g>,
    ) -> Result<ClassExpr> {
        let graph = self.graph;
        let p = property.as_str().to_owned();
        if let Some(range) = graph.object(node, SOME_VALUES_FROM) {
            return Ok(ClassExpr::DataSomeValuesFrom(p, datatype(range)?));
        }
        if let Some(range) = graph.object(node, ALL_VALUES_FROM) {
            return Ok(ClassExpr::DataAllValuesFrom(p, datatype(range)?));
        }
        match graph.object(node, HAS_VALUE) {
            Some(TermRef::Literal(l)) => Ok(ClassExpr::DataHasValue(p, l.into())),
            Some(other) => Err(MappingError::illegal(format!(
                "data restriction {} has non-literal value {}",
                node, other
            ))),
            None => Err(MappingError::illegal(format!(
                "unsupported data restriction {}",
                node
            ))),
        }
    }

    pub(crate) fn property_expr(&mut self, term: TermRef<'g>) -> Result<ObjectPropertyExpr> {
        match term {
            TermRef::NamedNode(n) => Ok(ObjectPropertyExpr::Named(n.as_str().to_owned())),
            TermRef::BlankNode(b) => match self.graph.object(b.into(), INVERSE_OF) {
                Some(TermRef::NamedNode(n)) => Ok(ObjectPropertyExpr::Inverse(n.as_str().to_owned())),
                Some(other) => Err(MappingError::illegal(format!(
                    "inverse of non-named property {}",
                    other
                ))),
                None if !self.graph.has_subject(b.into()) => Err(MappingError::unresolved(
                    b,
                    "property expression without defining triples",
                )),
                None => Err(MappingError::illegal(format!(
                    "{} is not a property expression",
                    b
                ))),
            },
            other => Err(MappingError::illegal(format!(
                "literal {} used as a property",
                other
            ))),
        }
    }

    /// Resolves one annotation triple, including annotations reified on it.
    pub(crate) fn annotation(&mut self, triple: TripleRef<'g>) -> Result<Annotation> {
        let value = match triple.object {
            TermRef::Literal(l) => AnnotationValue::Literal(l.into()),
            other => AnnotationValue::Node(self.node(other)?),
        };
        let mut nested = Vec::new();
        for y in reifications(self.graph, triple, ANNOTATION) {
            if self.reified.contains(&y) {
                return Err(MappingError::illegal(format!(
                    "annotation reification {} is cyclic",
                    y
                )));
            }
            self.reified.push(y);
            let result = annotations_on(self.graph, y)
                .map(|a| self.annotation(a))
                .collect::<Result<Vec<_>>>();
            self.reified.pop();
            nested.extend(result?);
        }
        Ok(Annotation::new(triple.predicate.as_str(), value).annotated(nested))
    }
}

fn cardinality(term: TermRef<'_>) -> Result<u32> {
    match term {
        TermRef::Literal(l) => l.value().trim().parse::<u32>().map_err(|_| {
            MappingError::illegal(format!("invalid cardinality {}", l))
        }),
        other => Err(MappingError::illegal(format!(
            "invalid cardinality {}",
            other
        ))),
    }
}

fn datatype(term: TermRef<'_>) -> Result<String> {
    match term {
        TermRef::NamedNode(n) => Ok(n.as_str().to_owned()),
        other => Err(MappingError::illegal(format!(
            "unsupported data range {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::parse_turtle;

    fn object_of<'g>(g: &'g OntGraph, s: &str, p: NamedNodeRef<'_>) -> TermRef<'g> {
        let s = NamedNodeRef::new(s).unwrap();
        g.object(s.into(), p).unwrap()
    }

    #[test]
    fn test_nested_restriction() {
        let g = parse_turtle(
            r#"@prefix : <http://example.org/> .
               @prefix owl: <http://www.w3.org/2002/07/owl#> .
               @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
               :hasTopping a owl:ObjectProperty .
               :Pizza rdfs:subClassOf [
                   a owl:Restriction ;
                   owl:onProperty :hasTopping ;
                   owl:someValuesFrom [ a owl:Class ; owl:unionOf ( :Cheese :Tomato ) ]
               ] ."#,
        )
        .unwrap();
        let filler = object_of(&g, "http://example.org/Pizza", SUB_CLASS_OF);
        let expr = Resolver::new(&g).class_expr(filler).unwrap();
        assert_eq!(
            expr,
            ClassExpr::some(
                "http://example.org/hasTopping",
                ClassExpr::union([
                    ClassExpr::class("http://example.org/Tomato"),
                    ClassExpr::class("http://example.org/Cheese"),
                ])
            )
        );
    }

    #[test]
    fn test_qualified_cardinality() {
        let g = parse_turtle(
            r#"@prefix : <http://example.org/> .
               @prefix owl: <http://www.w3.org/2002/07/owl#> .
               @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
               @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
               :hasPart a owl:ObjectProperty .
               :Car rdfs:subClassOf [
                   a owl:Restriction ;
                   owl:onProperty :hasPart ;
                   owl:minQualifiedCardinality "4"^^xsd:nonNegativeInteger ;
                   owl:onClass :Wheel
               ] ."#,
        )
        .unwrap();
        let filler = object_of(&g, "http://example.org/Car", SUB_CLASS_OF);
        let expr = Resolver::new(&g).class_expr(filler).unwrap();
        assert_eq!(
            expr,
            ClassExpr::MinCardinality(
                4,
                ObjectPropertyExpr::named("http://example.org/hasPart"),
                Some(Box::new(ClassExpr::class("http://example.org/Wheel")))
            )
        );
    }

    #[test]
    fn test_self_referencing_expression() {
        let g = parse_turtle(
            r#"@prefix : <http://example.org/> .
               @prefix owl: <http://www.w3.org/2002/07/owl#> .
               @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
               :A rdfs:subClassOf _:x .
               _:x owl:complementOf _:x ."#,
        )
        .unwrap();
        let filler = object_of(&g, "http://example.org/A", SUB_CLASS_OF);
        let err = Resolver::new(&g).class_expr(filler).unwrap_err();
        assert!(err.is_illegal_state());
    }
}
