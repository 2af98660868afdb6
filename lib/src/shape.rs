//! Statement shapes. Every `AxiomKind` has one static `Shape` that says which triples
//! realize it, where to look for them and how to build a search pattern from a detached
//! axiom.

use crate::config::MappingConfig;
use crate::consts::*;
use crate::graph::OntGraph;
use crate::model::{canonical_set, Axiom, ClassExpr, Component, ObjectPropertyExpr};
use crate::node::Node;
use oxigraph::model::{
    BlankNodeRef, NamedNode, NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef, Term, TermRef, Triple, TripleRef,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

const RESERVED_NAMESPACES: [&str; 4] = [
    "http://www.w3.org/1999/02/22-rdf-syntax-ns#",
    "http://www.w3.org/2000/01/rdf-schema#",
    "http://www.w3.org/2002/07/owl#",
    XSD_NS,
];

// types that make an IRI an object property on their own
const OBJECT_PROPERTY_TYPES: [NamedNodeRef<'_>; 3] =
    [OBJECT_PROPERTY, TRANSITIVE_PROPERTY, SYMMETRIC_PROPERTY];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AxiomKind {
    Declaration,
    SubClassOf,
    EquivalentClasses,
    DisjointClasses,
    DisjointUnion,
    SubObjectPropertyOf,
    SubDataPropertyOf,
    SubPropertyChainOf,
    EquivalentObjectProperties,
    InverseObjectProperties,
    DisjointObjectProperties,
    ObjectPropertyDomain,
    ObjectPropertyRange,
    DataPropertyDomain,
    DataPropertyRange,
    FunctionalObjectProperty,
    TransitiveObjectProperty,
    SymmetricObjectProperty,
    FunctionalDataProperty,
    ClassAssertion,
    ObjectPropertyAssertion,
    DataPropertyAssertion,
    AnnotationAssertion,
    SameIndividual,
    DifferentIndividuals,
}

impl AxiomKind {
    pub const ALL: [AxiomKind; 25] = [
        AxiomKind::Declaration,
        AxiomKind::SubClassOf,
        AxiomKind::EquivalentClasses,
        AxiomKind::DisjointClasses,
        AxiomKind::DisjointUnion,
        AxiomKind::SubObjectPropertyOf,
        AxiomKind::SubDataPropertyOf,
        AxiomKind::SubPropertyChainOf,
        AxiomKind::EquivalentObjectProperties,
        AxiomKind::InverseObjectProperties,
        AxiomKind::DisjointObjectProperties,
        AxiomKind::ObjectPropertyDomain,
        AxiomKind::ObjectPropertyRange,
        AxiomKind::DataPropertyDomain,
        AxiomKind::DataPropertyRange,
        AxiomKind::FunctionalObjectProperty,
        AxiomKind::TransitiveObjectProperty,
        AxiomKind::SymmetricObjectProperty,
        AxiomKind::FunctionalDataProperty,
        AxiomKind::ClassAssertion,
        AxiomKind::ObjectPropertyAssertion,
        AxiomKind::DataPropertyAssertion,
        AxiomKind::AnnotationAssertion,
        AxiomKind::SameIndividual,
        AxiomKind::DifferentIndividuals,
    ];

    pub fn shape(self) -> &'static Shape {
        &SHAPES[self as usize]
    }
}

impl fmt::Display for AxiomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The part an operand node plays in a statement. Each role has a membership test over
/// the graph that uses declarations and OWL built-ins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Named class or anonymous class expression.
    Class,
    NamedClass,
    ObjectProperty,
    /// Named object property or `owl:inverseOf` expression.
    ObjectPropertyExpr,
    DataProperty,
    AnnotationProperty,
    Datatype,
    Individual,
    Literal,
    AnnotationSubject,
    AnnotationValue,
    /// The declared entity of a declaration; its type comes from the triple object.
    Entity,
}

fn is_reserved(iri: NamedNodeRef<'_>) -> bool {
    RESERVED_NAMESPACES
        .iter()
        .any(|ns| iri.as_str().starts_with(ns))
}

fn is_class_iri(graph: &OntGraph, iri: NamedNodeRef<'_>) -> bool {
    if iri == THING || iri == NOTHING {
        return true;
    }
    !is_reserved(iri) && !graph.has_type(iri.into(), RDFS_DATATYPE)
}

fn is_datatype(graph: &OntGraph, iri: NamedNodeRef<'_>) -> bool {
    iri == RDFS_LITERAL
        || iri == PLAIN_LITERAL
        || iri == LANG_STRING
        || iri.as_str().starts_with(XSD_NS)
        || graph.has_type(iri.into(), RDFS_DATATYPE)
}

fn is_object_property(graph: &OntGraph, iri: NamedNodeRef<'_>) -> bool {
    iri == TOP_OBJECT_PROPERTY || graph.has_any_type(iri.into(), &OBJECT_PROPERTY_TYPES)
}

pub(crate) fn is_data_property(graph: &OntGraph, iri: NamedNodeRef<'_>) -> bool {
    iri == TOP_DATA_PROPERTY || graph.has_type(iri.into(), DATATYPE_PROPERTY)
}

pub(crate) fn is_annotation_property(graph: &OntGraph, iri: NamedNodeRef<'_>) -> bool {
    BUILTIN_ANNOTATION_PROPERTIES.contains(&iri) || graph.has_type(iri.into(), ANNOTATION_PROPERTY)
}

/// A blank node carrying class-expression structure.
pub(crate) fn is_class_expression(graph: &OntGraph, blank: BlankNodeRef<'_>) -> bool {
    graph.has_any_type(blank.into(), &[RESTRICTION, OWL_CLASS])
        || CLASS_EXPRESSION_PREDICATES
            .iter()
            .any(|p| graph.object(blank.into(), *p).is_some())
}

// an anonymous individual: no structural typing, no expression or list structure
fn is_plain_blank(graph: &OntGraph, blank: BlankNodeRef<'_>) -> bool {
    !graph.has_any_type(blank.into(), &STRUCTURAL_TYPES)
        && !is_class_expression(graph, blank)
        && graph.object(blank.into(), INVERSE_OF).is_none()
        && graph.object(blank.into(), FIRST).is_none()
}

impl Role {
    pub fn accepts(self, graph: &OntGraph, term: TermRef<'_>) -> bool {
        match (self, term) {
            (Role::Class, TermRef::NamedNode(n)) | (Role::NamedClass, TermRef::NamedNode(n)) => {
                is_class_iri(graph, n)
            }
            // a dangling blank is accepted so its absence surfaces on resolution
            (Role::Class, TermRef::BlankNode(b)) => {
                is_class_expression(graph, b) || !graph.has_subject(b.into())
            }
            (Role::ObjectProperty, TermRef::NamedNode(n))
            | (Role::ObjectPropertyExpr, TermRef::NamedNode(n)) => is_object_property(graph, n),
            (Role::ObjectPropertyExpr, TermRef::BlankNode(b)) => {
                match graph.object(b.into(), INVERSE_OF) {
                    Some(TermRef::NamedNode(n)) => is_object_property(graph, n),
                    _ => false,
                }
            }
            (Role::DataProperty, TermRef::NamedNode(n)) => is_data_property(graph, n),
            (Role::AnnotationProperty, TermRef::NamedNode(n)) => is_annotation_property(graph, n),
            (Role::Datatype, TermRef::NamedNode(n)) => is_datatype(graph, n),
            (Role::Individual, TermRef::NamedNode(_))
            | (Role::AnnotationSubject, TermRef::NamedNode(_))
            | (Role::AnnotationValue, TermRef::NamedNode(_))
            | (Role::Entity, TermRef::NamedNode(_)) => true,
            (Role::Individual, TermRef::BlankNode(b))
            | (Role::AnnotationSubject, TermRef::BlankNode(b))
            | (Role::AnnotationValue, TermRef::BlankNode(b)) => is_plain_blank(graph, b),
            (Role::Literal, TermRef::Literal(_)) | (Role::AnnotationValue, TermRef::Literal(_)) => {
                true
            }
            _ => false,
        }
    }
}

/// Optional statement categories switched by configuration flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Always,
    Declarations,
    AnnotationAxioms,
}

type Iris = &'static [NamedNodeRef<'static>];

#[derive(Debug, Clone, Copy)]
pub enum Layout {
    /// `s rdf:type T` for T in `types`.
    Typed { types: Iris, role: Role },
    /// `s p o` with a fixed predicate.
    Binary {
        predicate: NamedNodeRef<'static>,
        subject: Role,
        object: Role,
        symmetric: bool,
    },
    /// `s P o` where the predicate itself is an operand. `declared` are the types whose
    /// instances may appear as predicate.
    Assertion {
        property: Role,
        subject: Role,
        object: Role,
        declared: Iris,
        builtins: Iris,
    },
    /// A set of members, either as a pairwise triple or as a typed root node with an
    /// RDF list under one of `members`.
    Nary {
        pairwise: Option<NamedNodeRef<'static>>,
        list_type: NamedNodeRef<'static>,
        members: Iris,
        role: Role,
    },
    /// `s p (m1 .. mn)`.
    Listed {
        predicate: NamedNodeRef<'static>,
        subject: Role,
        member: Role,
        ordered: bool,
    },
}

#[derive(Debug)]
pub struct Shape {
    pub kind: AxiomKind,
    pub layout: Layout,
    pub gate: Gate,
    /// Whether `search_triple` includes the syntactic inverse of the pairwise triple.
    pub inverse_search: bool,
}

/// Where a detached statement could be realized in a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPattern {
    /// The statement is present iff one of these triples is.
    Exact(Vec<Triple>),
    /// A hit is conclusive, a miss is not.
    Candidates(Vec<Triple>),
    /// No deterministic pattern; the kind has to be scanned.
    Unknown,
}

impl SearchPattern {
    pub fn triples(&self) -> &[Triple] {
        match self {
            SearchPattern::Exact(t) | SearchPattern::Candidates(t) => t,
            SearchPattern::Unknown => &[],
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, SearchPattern::Exact(_))
    }
}

/// Converts a component that is a single named node or literal into a term.
pub(crate) fn simple_term(component: &Component) -> Option<Term> {
    let iri = match component {
        Component::Entity(e) => &e.iri,
        Component::Class(ClassExpr::Class(iri))
        | Component::ObjectProperty(ObjectPropertyExpr::Named(iri))
        | Component::DataProperty(iri)
        | Component::AnnotationProperty(iri)
        | Component::Datatype(iri)
        | Component::Individual(Node::Named(iri))
        | Component::Resource(Node::Named(iri)) => iri,
        Component::Literal(l) => return Some(l.to_literal().into()),
        _ => return None,
    };
    Some(NamedNode::new_unchecked(iri.as_str()).into())
}

fn simple_triple(s: &Component, p: NamedNodeRef<'_>, o: &Component) -> Option<Triple> {
    let subject: NamedOrBlankNode = match simple_term(s)? {
        Term::NamedNode(n) => n.into(),
        _ => return None,
    };
    Some(Triple::new(subject, p.into_owned(), simple_term(o)?))
}

impl Shape {
    pub fn is_symmetric(&self) -> bool {
        matches!(
            self.layout,
            Layout::Binary {
                symmetric: true,
                ..
            } | Layout::Nary { .. }
        )
    }

    pub fn is_list_form(&self, triple: TripleRef<'_>) -> bool {
        match self.layout {
            Layout::Listed { .. } => true,
            Layout::Nary { pairwise, .. } => pairwise != Some(triple.predicate),
            _ => false,
        }
    }

    /// Membership test. Gates are checked before any graph access.
    pub fn matches(&self, graph: &OntGraph, triple: TripleRef<'_>, config: &MappingConfig) -> bool {
        config.is_open(self.gate) && self.accepts(graph, triple)
    }

    pub(crate) fn accepts(&self, graph: &OntGraph, triple: TripleRef<'_>) -> bool {
        let subject = crate::graph::resource_term(triple.subject);
        match self.layout {
            Layout::Typed { types, role } => {
                triple.predicate == TYPE
                    && types.iter().any(|t| triple.object == TermRef::from(*t))
                    && role.accepts(graph, subject)
            }
            Layout::Binary {
                predicate,
                subject: s,
                object: o,
                ..
            } => {
                triple.predicate == predicate
                    && s.accepts(graph, subject)
                    && o.accepts(graph, triple.object)
            }
            Layout::Assertion {
                property,
                subject: s,
                object: o,
                ..
            } => {
                property.accepts(graph, triple.predicate.into())
                    && s.accepts(graph, subject)
                    && o.accepts(graph, triple.object)
            }
            Layout::Nary {
                pairwise,
                list_type,
                role,
                ..
            } => {
                if pairwise == Some(triple.predicate) {
                    return role.accepts(graph, subject) && role.accepts(graph, triple.object);
                }
                triple.predicate == TYPE
                    && triple.object == TermRef::from(list_type)
                    && subject.is_blank_node()
                    && self.members_accepted(graph, triple, role)
            }
            Layout::Listed {
                predicate,
                subject: s,
                member,
                ..
            } => {
                triple.predicate == predicate
                    && s.accepts(graph, subject)
                    && self.members_accepted(graph, triple, member)
            }
        }
    }

    fn members_accepted(&self, graph: &OntGraph, triple: TripleRef<'_>, role: Role) -> bool {
        let Some(head) = self.member_head(graph, triple) else {
            return false;
        };
        match graph.list(head) {
            Ok(members) => members.into_iter().all(|m| role.accepts(graph, m)),
            Err(_) => false,
        }
    }

    /// The head of the member list, for list-encoded statements.
    pub(crate) fn member_head<'g>(
        &self,
        graph: &'g OntGraph,
        triple: TripleRef<'g>,
    ) -> Option<TermRef<'g>> {
        match self.layout {
            Layout::Listed { .. } => Some(triple.object),
            Layout::Nary { members, .. } if self.is_list_form(triple) => members
                .iter()
                .find_map(|p| graph.object(triple.subject, *p)),
            _ => None,
        }
    }

    pub(crate) fn member_role(&self) -> Option<Role> {
        match self.layout {
            Layout::Listed { member, .. } => Some(member),
            Layout::Nary { role, .. } => Some(role),
            _ => None,
        }
    }

    /// The principal operands carried directly by the triple, in operand order.
    pub(crate) fn principal<'g>(&self, triple: TripleRef<'g>) -> [Option<(Role, TermRef<'g>)>; 3] {
        let subject = crate::graph::resource_term(triple.subject);
        match self.layout {
            Layout::Typed { role, .. } => [Some((role, subject)), None, None],
            Layout::Binary {
                subject: s,
                object: o,
                ..
            } => [Some((s, subject)), Some((o, triple.object)), None],
            Layout::Assertion {
                property,
                subject: s,
                object: o,
                ..
            } => [
                Some((property, triple.predicate.into())),
                Some((s, subject)),
                Some((o, triple.object)),
            ],
            Layout::Nary { role, .. } if !self.is_list_form(triple) => {
                [Some((role, subject)), Some((role, triple.object)), None]
            }
            Layout::Nary { .. } => [None, None, None],
            Layout::Listed { subject: s, .. } => [Some((s, subject)), None, None],
        }
    }

    /// Candidate triples for this kind, filtered by the membership test. Restartable and
    /// lazy; gated categories yield nothing.
    pub fn scan<'g>(
        &'static self,
        graph: &'g OntGraph,
        config: &MappingConfig,
    ) -> Box<dyn Iterator<Item = TripleRef<'g>> + 'g> {
        if !config.is_open(self.gate) {
            return Box::new(std::iter::empty());
        }
        let candidates: Box<dyn Iterator<Item = TripleRef<'g>> + 'g> = match self.layout {
            Layout::Typed { types, .. } => Box::new(
                types
                    .iter()
                    .flat_map(move |t| graph.find(None, Some(TYPE), Some((*t).into()))),
            ),
            Layout::Binary { predicate, .. } | Layout::Listed { predicate, .. } => {
                graph.find(None, Some(predicate), None)
            }
            Layout::Assertion {
                declared, builtins, ..
            } => {
                let mut seen = HashSet::new();
                let mut properties: Vec<NamedNodeRef<'g>> = Vec::new();
                let declared = declared
                    .iter()
                    .flat_map(|t| graph.instances(*t))
                    .filter_map(|r| match r {
                        NamedOrBlankNodeRef::NamedNode(n) => Some(n),
                        _ => None,
                    });
                for p in declared.chain(builtins.iter().copied()) {
                    if seen.insert(p) {
                        properties.push(p);
                    }
                }
                Box::new(
                    properties
                        .into_iter()
                        .flat_map(move |p| graph.find(None, Some(p), None)),
                )
            }
            Layout::Nary {
                pairwise,
                list_type,
                ..
            } => {
                let pairs = pairwise
                    .into_iter()
                    .flat_map(move |p| graph.find(None, Some(p), None));
                Box::new(pairs.chain(graph.find(None, Some(TYPE), Some(list_type.into()))))
            }
        };
        Box::new(candidates.filter(move |t| self.accepts(graph, *t)))
    }

    /// Builds the search pattern for a detached statement of this kind.
    pub fn search_triple(&self, axiom: &Axiom) -> SearchPattern {
        let ops = axiom.operands();
        match self.layout {
            Layout::Typed { types, .. } => {
                let ty = match (ops.first(), types.first()) {
                    (Some(Component::Entity(e)), _) => e.kind.type_iri(),
                    (_, Some(ty)) => *ty,
                    _ => return SearchPattern::Unknown,
                };
                let triple = ops.first().and_then(|s| {
                    simple_triple(s, TYPE, &Component::class(ty.as_str()))
                });
                triple.map_or(SearchPattern::Unknown, |t| SearchPattern::Exact(vec![t]))
            }
            Layout::Binary {
                predicate,
                symmetric,
                ..
            } => match ops {
                [a, b] => {
                    let Some(forward) = simple_triple(a, predicate, b) else {
                        return SearchPattern::Unknown;
                    };
                    let mut triples = vec![forward];
                    if symmetric && self.inverse_search && a != b {
                        triples.extend(simple_triple(b, predicate, a));
                    }
                    SearchPattern::Exact(triples)
                }
                _ => SearchPattern::Unknown,
            },
            Layout::Assertion { .. } => match ops {
                [p, s, o] => {
                    let triple = simple_term(p).and_then(|p| match p {
                        Term::NamedNode(p) => simple_triple(s, p.as_ref(), o),
                        _ => None,
                    });
                    triple.map_or(SearchPattern::Unknown, |t| SearchPattern::Exact(vec![t]))
                }
                _ => SearchPattern::Unknown,
            },
            Layout::Nary {
                pairwise: Some(predicate),
                ..
            } => match ops {
                [a, b] => {
                    let Some(forward) = simple_triple(a, predicate, b) else {
                        return SearchPattern::Unknown;
                    };
                    let mut triples = vec![forward];
                    if self.inverse_search {
                        triples.extend(simple_triple(b, predicate, a));
                    }
                    SearchPattern::Candidates(triples)
                }
                _ => SearchPattern::Unknown,
            },
            Layout::Nary { pairwise: None, .. } | Layout::Listed { .. } => SearchPattern::Unknown,
        }
    }

    pub(crate) fn canonical_operands(&self, mut operands: Vec<Component>) -> Vec<Component> {
        match self.layout {
            Layout::Binary {
                symmetric: true, ..
            } => operands.sort(),
            Layout::Nary { .. } => return canonical_set(operands),
            Layout::Listed { ordered: false, .. } if !operands.is_empty() => {
                let members = operands.split_off(1);
                operands.extend(canonical_set(members));
            }
            _ => {}
        }
        operands
    }
}

/// Resolves a triple's subject as a blank node, if it is one.
pub(crate) fn blank_subject<'g>(triple: TripleRef<'g>) -> Option<BlankNodeRef<'g>> {
    match triple.subject {
        NamedOrBlankNodeRef::BlankNode(b) => Some(b),
        NamedOrBlankNodeRef::NamedNode(_) => None,
    }
}

const fn binary(
    kind: AxiomKind,
    predicate: NamedNodeRef<'static>,
    subject: Role,
    object: Role,
    symmetric: bool,
) -> Shape {
    Shape {
        kind,
        layout: Layout::Binary {
            predicate,
            subject,
            object,
            symmetric,
        },
        gate: Gate::Always,
        inverse_search: symmetric,
    }
}

const fn typed(kind: AxiomKind, types: Iris, role: Role, gate: Gate) -> Shape {
    Shape {
        kind,
        layout: Layout::Typed { types, role },
        gate,
        inverse_search: false,
    }
}

const fn assertion(kind: AxiomKind, property: Role, subject: Role, object: Role, declared: Iris, builtins: Iris, gate: Gate) -> Shape {
    Shape {
        kind,
        layout: Layout::Assertion {
            property,
            subject,
            object,
            declared,
            builtins,
        },
        gate,
        inverse_search: false,
    }
}

const fn nary(
    kind: AxiomKind,
    pairwise: NamedNodeRef<'static>,
    list_type: NamedNodeRef<'static>,
    members: Iris,
    role: Role,
) -> Shape {
    Shape {
        kind,
        layout: Layout::Nary {
            pairwise: Some(pairwise),
            list_type,
            members,
            role,
        },
        gate: Gate::Always,
        inverse_search: true,
    }
}

const fn listed(
    kind: AxiomKind,
    predicate: NamedNodeRef<'static>,
    subject: Role,
    member: Role,
    ordered: bool,
) -> Shape {
    Shape {
        kind,
        layout: Layout::Listed {
            predicate,
            subject,
            member,
            ordered,
        },
        gate: Gate::Always,
        inverse_search: false,
    }
}

// indexed by `AxiomKind as usize`
static SHAPES: [Shape; 25] = [
    typed(AxiomKind::Declaration, &DECLARATION_TYPES, Role::Entity, Gate::Declarations),
    binary(AxiomKind::SubClassOf, SUB_CLASS_OF, Role::Class, Role::Class, false),
    binary(AxiomKind::EquivalentClasses, EQUIVALENT_CLASS, Role::Class, Role::Class, true),
    nary(AxiomKind::DisjointClasses, DISJOINT_WITH, ALL_DISJOINT_CLASSES, &[MEMBERS], Role::Class),
    listed(AxiomKind::DisjointUnion, DISJOINT_UNION_OF, Role::NamedClass, Role::Class, false),
    binary(AxiomKind::SubObjectPropertyOf, SUB_PROPERTY_OF, Role::ObjectPropertyExpr, Role::ObjectPropertyExpr, false),
    binary(AxiomKind::SubDataPropertyOf, SUB_PROPERTY_OF, Role::DataProperty, Role::DataProperty, false),
    listed(AxiomKind::SubPropertyChainOf, PROPERTY_CHAIN_AXIOM, Role::ObjectProperty, Role::ObjectPropertyExpr, true),
    binary(AxiomKind::EquivalentObjectProperties, EQUIVALENT_PROPERTY, Role::ObjectPropertyExpr, Role::ObjectPropertyExpr, true),
    binary(AxiomKind::InverseObjectProperties, INVERSE_OF, Role::ObjectProperty, Role::ObjectProperty, true),
    nary(AxiomKind::DisjointObjectProperties, PROPERTY_DISJOINT_WITH, ALL_DISJOINT_PROPERTIES, &[MEMBERS], Role::ObjectPropertyExpr),
    binary(AxiomKind::ObjectPropertyDomain, DOMAIN, Role::ObjectPropertyExpr, Role::Class, false),
    binary(AxiomKind::ObjectPropertyRange, RANGE, Role::ObjectPropertyExpr, Role::Class, false),
    binary(AxiomKind::DataPropertyDomain, DOMAIN, Role::DataProperty, Role::Class, false),
    binary(AxiomKind::DataPropertyRange, RANGE, Role::DataProperty, Role::Datatype, false),
    typed(AxiomKind::FunctionalObjectProperty, &[FUNCTIONAL_PROPERTY], Role::ObjectPropertyExpr, Gate::Always),
    typed(AxiomKind::TransitiveObjectProperty, &[TRANSITIVE_PROPERTY], Role::ObjectPropertyExpr, Gate::Always),
    typed(AxiomKind::SymmetricObjectProperty, &[SYMMETRIC_PROPERTY], Role::ObjectPropertyExpr, Gate::Always),
    typed(AxiomKind::FunctionalDataProperty, &[FUNCTIONAL_PROPERTY], Role::DataProperty, Gate::Always),
    binary(AxiomKind::ClassAssertion, TYPE, Role::Individual, Role::Class, false),
    assertion(AxiomKind::ObjectPropertyAssertion, Role::ObjectProperty, Role::Individual, Role::Individual, &OBJECT_PROPERTY_TYPES, &[TOP_OBJECT_PROPERTY], Gate::Always),
    assertion(AxiomKind::DataPropertyAssertion, Role::DataProperty, Role::Individual, Role::Literal, &[DATATYPE_PROPERTY], &[TOP_DATA_PROPERTY], Gate::Always),
    assertion(AxiomKind::AnnotationAssertion, Role::AnnotationProperty, Role::AnnotationSubject, Role::AnnotationValue, &[ANNOTATION_PROPERTY], &BUILTIN_ANNOTATION_PROPERTIES, Gate::AnnotationAxioms),
    binary(AxiomKind::SameIndividual, SAME_AS, Role::Individual, Role::Individual, true),
    nary(AxiomKind::DifferentIndividuals, DIFFERENT_FROM, ALL_DIFFERENT, &[MEMBERS, DISTINCT_MEMBERS], Role::Individual),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::parse_turtle;

    #[test]
    fn test_shape_table_is_indexed_by_kind() {
        for kind in AxiomKind::ALL {
            assert_eq!(kind.shape().kind, kind);
        }
    }

    #[test]
    fn test_class_assertion_skips_vocabulary() {
        let g = parse_turtle(
            r#"@prefix : <http://example.org/> .
               @prefix owl: <http://www.w3.org/2002/07/owl#> .
               :Person a owl:Class .
               :alice a :Person ."#,
        )
        .unwrap();
        let cfg = MappingConfig::default();
        assert_eq!(AxiomKind::ClassAssertion.shape().scan(&g, &cfg).count(), 1);
        assert_eq!(AxiomKind::Declaration.shape().scan(&g, &cfg).count(), 1);
    }

    #[test]
    fn test_property_kinds_follow_declarations() {
        let g = parse_turtle(
            r#"@prefix : <http://example.org/> .
               @prefix owl: <http://www.w3.org/2002/07/owl#> .
               @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
               :p a owl:ObjectProperty . :q a owl:ObjectProperty .
               :d a owl:DatatypeProperty . :e a owl:DatatypeProperty .
               :p rdfs:subPropertyOf :q .
               :d rdfs:subPropertyOf :e ."#,
        )
        .unwrap();
        let cfg = MappingConfig::default();
        assert_eq!(AxiomKind::SubObjectPropertyOf.shape().scan(&g, &cfg).count(), 1);
        assert_eq!(AxiomKind::SubDataPropertyOf.shape().scan(&g, &cfg).count(), 1);
    }

    #[test]
    fn test_search_pattern_for_anonymous_operands() {
        let axiom = Axiom::sub_class_of(
            ClassExpr::class("urn:a"),
            ClassExpr::some("urn:p", ClassExpr::class("urn:b")),
        );
        assert_eq!(
            AxiomKind::SubClassOf.shape().search_triple(&axiom),
            SearchPattern::Unknown
        );
    }
}
