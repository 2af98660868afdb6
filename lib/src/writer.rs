//! Writes detached statements into a graph using the OWL 2 RDF mapping: the principal
//! triple, class-expression and list structure, and reification of annotations.

use crate::config::MappingConfig;
use crate::consts::*;
use crate::errors::{MappingError, Result};
use crate::graph::OntGraph;
use crate::model::{Annotation, AnnotationValue, Axiom, ClassExpr, Component, ObjectPropertyExpr};
use crate::node::{AnonId, Node};
use crate::shape::{Layout, Shape};
use log::debug;
use oxigraph::model::{
    BlankNode, Literal, NamedNode, NamedNodeRef, NamedOrBlankNode, Term, Triple,
};
use std::collections::HashMap;

/// Writes `axiom` into `graph` and returns its principal triple.
///
/// Anonymous individuals that belong to `graph` keep their identity; those read from
/// another graph are mapped to fresh blank nodes, consistently within one call.
/// Declarations are not added; see `Axiom::declarations`.
pub fn write_axiom(graph: &mut OntGraph, axiom: &Axiom, config: &MappingConfig) -> Result<Triple> {
    let kind = axiom.kind();
    if let Some(capability) = config.profile.missing_capability(kind) {
        return Err(MappingError::Unsupported {
            kind,
            profile: config.profile,
            capability,
        });
    }
    let before = graph.len();
    let mut writer = Writer {
        graph,
        blanks: HashMap::new(),
    };
    let principal = writer.statement(kind.shape(), axiom)?;
    debug!(
        "wrote {} as {} triples",
        axiom,
        writer.graph.len().saturating_sub(before)
    );
    Ok(principal)
}

struct Writer<'a> {
    graph: &'a mut OntGraph,
    blanks: HashMap<AnonId, BlankNode>,
}

fn named(iri: &str) -> NamedNode {
    NamedNode::new_unchecked(iri)
}

fn subject_of(term: Term) -> Result<NamedOrBlankNode> {
    match term {
        Term::NamedNode(n) => Ok(n.into()),
        Term::BlankNode(b) => Ok(b.into()),
        other => Err(MappingError::illegal(format!(
            "{} cannot be the subject of a triple",
            other
        ))),
    }
}

impl Writer<'_> {
    fn add(&mut self, s: impl Into<NamedOrBlankNode>, p: NamedNodeRef<'_>, o: impl Into<Term>) -> Triple {
        let triple = Triple::new(s, p.into_owned(), o);
        self.graph.insert(&triple);
        triple
    }

    fn statement(&mut self, shape: &Shape, axiom: &Axiom) -> Result<Triple> {
        let ops = axiom.operands();
        let arity = |n: usize| {
            MappingError::illegal(format!(
                "{} expects {} operands, got {}",
                shape.kind,
                n,
                ops.len()
            ))
        };
        let principal = match shape.layout {
            Layout::Typed { types, .. } => {
                let [operand] = ops else { return Err(arity(1)) };
                let ty = match operand {
                    Component::Entity(e) => e.kind.type_iri(),
                    _ => *types.first().ok_or_else(|| arity(1))?,
                };
                let s = self.component(operand)?;
                self.add(subject_of(s)?, TYPE, ty.into_owned())
            }
            Layout::Binary { predicate, .. } => {
                let [a, b] = ops else { return Err(arity(2)) };
                let (s, o) = (self.component(a)?, self.component(b)?);
                self.add(subject_of(s)?, predicate, o)
            }
            Layout::Assertion { .. } => {
                let [p, s, o] = ops else { return Err(arity(3)) };
                let p = match self.component(p)? {
                    Term::NamedNode(p) => p,
                    other => {
                        return Err(MappingError::illegal(format!(
                            "assertion property {} is not named",
                            other
                        )))
                    }
                };
                let (s, o) = (self.component(s)?, self.component(o)?);
                self.add(subject_of(s)?, p.as_ref(), o)
            }
            Layout::Nary {
                pairwise: Some(predicate),
                ..
            } if ops.len() == 2 => {
                let (s, o) = (self.component(&ops[0])?, self.component(&ops[1])?);
                self.add(subject_of(s)?, predicate, o)
            }
            Layout::Nary {
                list_type, members, ..
            } => {
                let member_predicate = *members.first().ok_or_else(|| arity(2))?;
                let terms = ops
                    .iter()
                    .map(|c| self.component(c))
                    .collect::<Result<Vec<_>>>()?;
                let root = BlankNode::default();
                let head = self.graph.insert_list(terms);
                self.add(root.clone(), member_predicate, head);
                let principal = self.add(root.clone(), TYPE, list_type.into_owned());
                // annotations of rooted statements sit on the root
                for annotation in axiom.annotations() {
                    self.annotation(root.clone().into(), annotation)?;
                }
                return Ok(principal);
            }
            Layout::Listed { predicate, .. } => {
                let Some((subject, members)) = ops.split_first() else {
                    return Err(arity(2));
                };
                let s = self.component(subject)?;
                let terms = members
                    .iter()
                    .map(|c| self.component(c))
                    .collect::<Result<Vec<_>>>()?;
                let head = self.graph.insert_list(terms);
                self.add(subject_of(s)?, predicate, head)
            }
        };
        self.reify(&principal, AXIOM, axiom.annotations())?;
        Ok(principal)
    }

    /// Adds an `owl:Axiom` or `owl:Annotation` node for `triple` carrying `annotations`.
    fn reify(&mut self, triple: &Triple, ty: NamedNodeRef<'_>, annotations: &[Annotation]) -> Result<()> {
        if annotations.is_empty() {
            return Ok(());
        }
        let x = BlankNode::default();
        self.add(x.clone(), TYPE, ty.into_owned());
        self.add(x.clone(), ANNOTATED_SOURCE, Term::from(triple.subject.clone()));
        self.add(x.clone(), ANNOTATED_PROPERTY, triple.predicate.clone());
        self.add(x.clone(), ANNOTATED_TARGET, triple.object.clone());
        for annotation in annotations {
            self.annotation(x.clone().into(), annotation)?;
        }
        Ok(())
    }

    fn annotation(&mut self, subject: NamedOrBlankNode, annotation: &Annotation) -> Result<()> {
        let value: Term = match &annotation.value {
            AnnotationValue::Literal(l) => l.to_literal().into(),
            AnnotationValue::Node(n) => self.node(n),
        };
        let triple = self.add(subject, named(&annotation.property).as_ref(), value);
        self.reify(&triple, ANNOTATION, &annotation.annotations)
    }

    fn node(&mut self, node: &Node) -> Term {
        match node {
            Node::Named(iri) => named(iri).into(),
            Node::Anonymous(id) if id.scope() == self.graph.scope() => {
                BlankNode::new_unchecked(id.label()).into()
            }
            Node::Anonymous(id) => self.blanks.entry(id.clone()).or_default().clone().into(),
        }
    }

    fn component(&mut self, component: &Component) -> Result<Term> {
        Ok(match component {
            Component::Entity(e) => named(&e.iri).into(),
            Component::Class(c) => self.class_expr(c)?,
            Component::ObjectProperty(p) => self.property_expr(p),
            Component::DataProperty(iri)
            | Component::AnnotationProperty(iri)
            | Component::Datatype(iri) => named(iri).into(),
            Component::Individual(n) | Component::Resource(n) => self.node(n),
            Component::Literal(l) => l.to_literal().into(),
        })
    }

    fn property_expr(&mut self, p: &ObjectPropertyExpr) -> Term {
        match p {
            ObjectPropertyExpr::Named(iri) => named(iri).into(),
            ObjectPropertyExpr::Inverse(iri) => {
                let b = BlankNode::default();
                self.add(b.clone(), INVERSE_OF, named(iri));
                b.into()
            }
        }
    }

    fn restriction(&mut self, property: Term) -> BlankNode {
        let b = BlankNode::default();
        self.add(b.clone(), TYPE, RESTRICTION.into_owned());
        self.add(b.clone(), ON_PROPERTY, property);
        b
    }

    fn class_expr(&mut self, expr: &ClassExpr) -> Result<Term> {
        let b = match expr {
            ClassExpr::Class(iri) => return Ok(named(iri).into()),
            ClassExpr::SomeValuesFrom(p, c) | ClassExpr::AllValuesFrom(p, c) => {
                let predicate = if matches!(expr, ClassExpr::SomeValuesFrom(..)) {
                    SOME_VALUES_FROM
                } else {
                    ALL_VALUES_FROM
                };
                let property = self.property_expr(p);
                let filler = self.class_expr(c)?;
                let b = self.restriction(property);
                self.add(b.clone(), predicate, filler);
                b
            }
            ClassExpr::HasValue(p, i) => {
                let property = self.property_expr(p);
                let value = self.node(i);
                let b = self.restriction(property);
                self.add(b.clone(), HAS_VALUE, value);
                b
            }
            ClassExpr::HasSelf(p) => {
                let property = self.property_expr(p);
                let b = self.restriction(property);
                self.add(b.clone(), HAS_SELF, Literal::new_typed_literal("true", XSD_BOOLEAN));
                b
            }
            ClassExpr::MinCardinality(n, p, filler)
            | ClassExpr::MaxCardinality(n, p, filler)
            | ClassExpr::ExactCardinality(n, p, filler) => {
                let (plain, qualified) = match expr {
                    ClassExpr::MinCardinality(..) => (MIN_CARDINALITY, MIN_QUALIFIED_CARDINALITY),
                    ClassExpr::MaxCardinality(..) => (MAX_CARDINALITY, MAX_QUALIFIED_CARDINALITY),
                    _ => (CARDINALITY, QUALIFIED_CARDINALITY),
                };
                let property = self.property_expr(p);
                let filler = filler.as_deref().map(|c| self.class_expr(c)).transpose()?;
                let b = self.restriction(property);
                let count = Literal::new_typed_literal(n.to_string(), NON_NEGATIVE_INTEGER);
                match filler {
                    Some(filler) => {
                        self.add(b.clone(), qualified, count);
                        self.add(b.clone(), ON_CLASS, filler);
                    }
                    None => {
                        self.add(b.clone(), plain, count);
                    }
                }
                b
            }
            ClassExpr::DataSomeValuesFrom(p, d) | ClassExpr::DataAllValuesFrom(p, d) => {
                let predicate = if matches!(expr, ClassExpr::DataSomeValuesFrom(..)) {
                    SOME_VALUES_FROM
                } else {
                    ALL_VALUES_FROM
                };
                let b = self.restriction(named(p).into());
                self.add(b.clone(), predicate, named(d));
                b
            }
            ClassExpr::DataHasValue(p, value) => {
                let b = self.restriction(named(p).into());
                self.add(b.clone(), HAS_VALUE, value.to_literal());
                b
            }
            ClassExpr::IntersectionOf(ops) | ClassExpr::UnionOf(ops) => {
                let predicate = if matches!(expr, ClassExpr::IntersectionOf(_)) {
                    INTERSECTION_OF
                } else {
                    UNION_OF
                };
                let terms = ops
                    .iter()
                    .map(|c| self.class_expr(c))
                    .collect::<Result<Vec<_>>>()?;
                let head = self.graph.insert_list(terms);
                let b = BlankNode::default();
                self.add(b.clone(), TYPE, OWL_CLASS.into_owned());
                self.add(b.clone(), predicate, head);
                b
            }
            ClassExpr::ComplementOf(c) => {
                let operand = self.class_expr(c)?;
                let b = BlankNode::default();
                self.add(b.clone(), TYPE, OWL_CLASS.into_owned());
                self.add(b.clone(), COMPLEMENT_OF, operand);
                b
            }
            ClassExpr::OneOf(individuals) => {
                let terms = individuals.iter().map(|i| self.node(i)).collect();
                let head = self.graph.insert_list(terms);
                let b = BlankNode::default();
                self.add(b.clone(), TYPE, OWL_CLASS.into_owned());
                self.add(b.clone(), ONE_OF, head);
                b
            }
        };
        Ok(b.into())
    }
}
