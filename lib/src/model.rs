//! The graph-independent logical model: axioms, their typed operands, class expressions
//! and annotations. Values of these types carry no reference to any graph and compare
//! structurally.

use crate::consts::*;
use crate::node::{LiteralValue, Node};
use crate::shape::AxiomKind;
use oxigraph::model::NamedNodeRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Class,
    Datatype,
    ObjectProperty,
    DataProperty,
    AnnotationProperty,
    NamedIndividual,
}

impl EntityType {
    pub fn type_iri(self) -> NamedNodeRef<'static> {
        match self {
            EntityType::Class => OWL_CLASS,
            EntityType::Datatype => RDFS_DATATYPE,
            EntityType::ObjectProperty => OBJECT_PROPERTY,
            EntityType::DataProperty => DATATYPE_PROPERTY,
            EntityType::AnnotationProperty => ANNOTATION_PROPERTY,
            EntityType::NamedIndividual => NAMED_INDIVIDUAL,
        }
    }

    pub fn from_type_iri(iri: NamedNodeRef<'_>) -> Option<Self> {
        [
            EntityType::Class,
            EntityType::Datatype,
            EntityType::ObjectProperty,
            EntityType::DataProperty,
            EntityType::AnnotationProperty,
            EntityType::NamedIndividual,
        ]
        .into_iter()
        .find(|ty| ty.type_iri() == iri)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityType,
    pub iri: String,
}

impl Entity {
    pub fn new(kind: EntityType, iri: impl Into<String>) -> Self {
        Entity {
            kind,
            iri: iri.into(),
        }
    }

    pub fn class(iri: impl Into<String>) -> Self {
        Entity::new(EntityType::Class, iri)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}(<{}>)", self.kind, self.iri)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObjectPropertyExpr {
    Named(String),
    Inverse(String),
}

impl ObjectPropertyExpr {
    pub fn named(iri: impl Into<String>) -> Self {
        ObjectPropertyExpr::Named(iri.into())
    }

    pub fn iri(&self) -> &str {
        match self {
            ObjectPropertyExpr::Named(iri) | ObjectPropertyExpr::Inverse(iri) => iri,
        }
    }
}

/// OWL 2 class expressions. Operands of intersections, unions and enumerations are kept
/// sorted and deduplicated so structurally equal expressions compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClassExpr {
    Class(String),
    SomeValuesFrom(ObjectPropertyExpr, Box<ClassExpr>),
    AllValuesFrom(ObjectPropertyExpr, Box<ClassExpr>),
    HasValue(ObjectPropertyExpr, Node),
    HasSelf(ObjectPropertyExpr),
    MinCardinality(u32, ObjectPropertyExpr, Option<Box<ClassExpr>>),
    MaxCardinality(u32, ObjectPropertyExpr, Option<Box<ClassExpr>>),
    ExactCardinality(u32, ObjectPropertyExpr, Option<Box<ClassExpr>>),
    DataSomeValuesFrom(String, String),
    DataAllValuesFrom(String, String),
    DataHasValue(String, LiteralValue),
    IntersectionOf(Vec<ClassExpr>),
    UnionOf(Vec<ClassExpr>),
    ComplementOf(Box<ClassExpr>),
    OneOf(Vec<Node>),
}

impl ClassExpr {
    pub fn class(iri: impl Into<String>) -> Self {
        ClassExpr::Class(iri.into())
    }

    pub fn some(property: impl Into<String>, filler: ClassExpr) -> Self {
        ClassExpr::SomeValuesFrom(ObjectPropertyExpr::named(property), Box::new(filler))
    }

    pub fn all(property: impl Into<String>, filler: ClassExpr) -> Self {
        ClassExpr::AllValuesFrom(ObjectPropertyExpr::named(property), Box::new(filler))
    }

    pub fn intersection(operands: impl IntoIterator<Item = ClassExpr>) -> Self {
        ClassExpr::IntersectionOf(canonical_set(operands))
    }

    pub fn union(operands: impl IntoIterator<Item = ClassExpr>) -> Self {
        ClassExpr::UnionOf(canonical_set(operands))
    }

    pub fn complement(operand: ClassExpr) -> Self {
        ClassExpr::ComplementOf(Box::new(operand))
    }

    pub fn one_of(individuals: impl IntoIterator<Item = Node>) -> Self {
        ClassExpr::OneOf(canonical_set(individuals))
    }

    pub fn is_named(&self) -> bool {
        matches!(self, ClassExpr::Class(_))
    }

    pub fn iri(&self) -> Option<&str> {
        match self {
            ClassExpr::Class(iri) => Some(iri),
            _ => None,
        }
    }

    fn collect_signature(&self, out: &mut BTreeSet<Entity>) {
        match self {
            ClassExpr::Class(iri) => {
                if iri != THING.as_str() && iri != NOTHING.as_str() {
                    out.insert(Entity::class(iri.as_str()));
                }
            }
            ClassExpr::SomeValuesFrom(p, c) | ClassExpr::AllValuesFrom(p, c) => {
                out.insert(Entity::new(EntityType::ObjectProperty, p.iri()));
                c.collect_signature(out);
            }
            ClassExpr::HasValue(p, i) => {
                out.insert(Entity::new(EntityType::ObjectProperty, p.iri()));
                if let Node::Named(iri) = i {
                    out.insert(Entity::new(EntityType::NamedIndividual, iri.as_str()));
                }
            }
            ClassExpr::HasSelf(p) => {
                out.insert(Entity::new(EntityType::ObjectProperty, p.iri()));
            }
            ClassExpr::MinCardinality(_, p, c)
            | ClassExpr::MaxCardinality(_, p, c)
            | ClassExpr::ExactCardinality(_, p, c) => {
                out.insert(Entity::new(EntityType::ObjectProperty, p.iri()));
                if let Some(c) = c {
                    c.collect_signature(out);
                }
            }
            ClassExpr::DataSomeValuesFrom(p, d) | ClassExpr::DataAllValuesFrom(p, d) => {
                out.insert(Entity::new(EntityType::DataProperty, p.as_str()));
                if !d.starts_with(XSD_NS) {
                    out.insert(Entity::new(EntityType::Datatype, d.as_str()));
                }
            }
            ClassExpr::DataHasValue(p, _) => {
                out.insert(Entity::new(EntityType::DataProperty, p.as_str()));
            }
            ClassExpr::IntersectionOf(ops) | ClassExpr::UnionOf(ops) => {
                ops.iter().for_each(|c| c.collect_signature(out));
            }
            ClassExpr::ComplementOf(c) => c.collect_signature(out),
            ClassExpr::OneOf(individuals) => {
                for i in individuals {
                    if let Node::Named(iri) = i {
                        out.insert(Entity::new(EntityType::NamedIndividual, iri.as_str()));
                    }
                }
            }
        }
    }
}

pub(crate) fn canonical_set<T: Ord>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut items: Vec<T> = items.into_iter().collect();
    items.sort();
    items.dedup();
    items
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnnotationValue {
    Node(Node),
    Literal(LiteralValue),
}

impl From<LiteralValue> for AnnotationValue {
    fn from(value: LiteralValue) -> Self {
        AnnotationValue::Literal(value)
    }
}

impl From<Node> for AnnotationValue {
    fn from(value: Node) -> Self {
        AnnotationValue::Node(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Annotation {
    pub property: String,
    pub value: AnnotationValue,
    /// Annotations on this annotation, sorted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl Annotation {
    pub fn new(property: impl Into<String>, value: impl Into<AnnotationValue>) -> Self {
        Annotation {
            property: property.into(),
            value: value.into(),
            annotations: Vec::new(),
        }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Annotation::new(LABEL.as_str(), LiteralValue::simple(text))
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Annotation::new(COMMENT.as_str(), LiteralValue::simple(text))
    }

    pub fn annotated(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.annotations = canonical_set(self.annotations.into_iter().chain(annotations));
        self
    }
}

/// A typed operand of an axiom.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Component {
    Entity(Entity),
    Class(ClassExpr),
    ObjectProperty(ObjectPropertyExpr),
    DataProperty(String),
    AnnotationProperty(String),
    Datatype(String),
    Individual(Node),
    Literal(LiteralValue),
    /// Subject or value of an annotation assertion
    Resource(Node),
}

impl Component {
    pub fn class(iri: impl Into<String>) -> Self {
        Component::Class(ClassExpr::class(iri))
    }

    pub fn object_property(iri: impl Into<String>) -> Self {
        Component::ObjectProperty(ObjectPropertyExpr::named(iri))
    }

    pub fn individual(iri: impl Into<String>) -> Self {
        Component::Individual(Node::named(iri))
    }

    /// True if the component is a single named node or a literal.
    pub fn is_simple(&self) -> bool {
        match self {
            Component::Class(c) => c.is_named(),
            Component::ObjectProperty(p) => matches!(p, ObjectPropertyExpr::Named(_)),
            Component::Individual(n) | Component::Resource(n) => n.is_named(),
            _ => true,
        }
    }

    fn collect_signature(&self, out: &mut BTreeSet<Entity>) {
        match self {
            Component::Entity(e) => {
                out.insert(e.clone());
            }
            Component::Class(c) => c.collect_signature(out),
            Component::ObjectProperty(p) => {
                out.insert(Entity::new(EntityType::ObjectProperty, p.iri()));
            }
            Component::DataProperty(iri) => {
                out.insert(Entity::new(EntityType::DataProperty, iri.as_str()));
            }
            Component::AnnotationProperty(iri) => {
                if !BUILTIN_ANNOTATION_PROPERTIES.iter().any(|p| p.as_str() == iri) {
                    out.insert(Entity::new(EntityType::AnnotationProperty, iri.as_str()));
                }
            }
            Component::Datatype(iri) => {
                if !iri.starts_with(XSD_NS) {
                    out.insert(Entity::new(EntityType::Datatype, iri.as_str()));
                }
            }
            Component::Individual(Node::Named(iri)) => {
                out.insert(Entity::new(EntityType::NamedIndividual, iri.as_str()));
            }
            Component::Individual(_) | Component::Literal(_) | Component::Resource(_) => {}
        }
    }
}

impl From<ClassExpr> for Component {
    fn from(value: ClassExpr) -> Self {
        Component::Class(value)
    }
}

impl From<Entity> for Component {
    fn from(value: Entity) -> Self {
        Component::Entity(value)
    }
}

/// A logical statement, detached from any graph.
///
/// Operands follow the kind's operand order; kinds whose operands form a set keep them
/// sorted. Annotations are always kept sorted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Axiom {
    kind: AxiomKind,
    operands: Vec<Component>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    annotations: Vec<Annotation>,
}

impl Axiom {
    pub fn new(kind: AxiomKind, operands: impl IntoIterator<Item = Component>) -> Self {
        let operands = kind.shape().canonical_operands(operands.into_iter().collect());
        Axiom {
            kind,
            operands,
            annotations: Vec::new(),
        }
    }

    pub(crate) fn from_parts(
        kind: AxiomKind,
        operands: Vec<Component>,
        annotations: Vec<Annotation>,
    ) -> Self {
        let mut axiom = Axiom::new(kind, operands);
        axiom.annotations = canonical_set(annotations);
        axiom
    }

    pub fn declaration(kind: EntityType, iri: impl Into<String>) -> Self {
        Axiom::new(
            AxiomKind::Declaration,
            [Component::Entity(Entity::new(kind, iri))],
        )
    }

    pub fn sub_class_of(sub: ClassExpr, sup: ClassExpr) -> Self {
        Axiom::new(AxiomKind::SubClassOf, [sub.into(), sup.into()])
    }

    /// Returns a copy of this axiom carrying the given annotations in addition to its own.
    pub fn annotated(&self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        let mut axiom = self.clone();
        axiom.annotations = canonical_set(axiom.annotations.into_iter().chain(annotations));
        axiom
    }

    /// Returns a copy of this axiom with no annotations.
    pub fn unannotated(&self) -> Self {
        Axiom {
            kind: self.kind,
            operands: self.operands.clone(),
            annotations: Vec::new(),
        }
    }

    pub fn kind(&self) -> AxiomKind {
        self.kind
    }

    pub fn operands(&self) -> &[Component] {
        &self.operands
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn is_annotated(&self) -> bool {
        !self.annotations.is_empty()
    }

    /// True if every operand is a named node or literal and there are no annotations.
    pub fn is_simple(&self) -> bool {
        self.annotations.is_empty() && self.operands.iter().all(Component::is_simple)
    }

    /// The entities this axiom mentions.
    pub fn signature(&self) -> BTreeSet<Entity> {
        let mut out = BTreeSet::new();
        for operand in &self.operands {
            operand.collect_signature(&mut out);
        }
        out
    }

    /// Declaration axioms for every entity of the signature.
    pub fn declarations(&self) -> Vec<Axiom> {
        self.signature()
            .into_iter()
            .filter(|e| !(self.kind == AxiomKind::Declaration && self.operands == [Component::Entity(e.clone())]))
            .map(|e| Axiom::new(AxiomKind::Declaration, [Component::Entity(e)]))
            .collect()
    }
}

impl fmt::Display for Axiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.kind)?;
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:?}", operand)?;
        }
        if !self.annotations.is_empty() {
            write!(f, " +{} annotations", self.annotations.len())?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_operands_are_canonical() {
        let a = ClassExpr::intersection([ClassExpr::class("urn:b"), ClassExpr::class("urn:a")]);
        let b = ClassExpr::intersection([
            ClassExpr::class("urn:a"),
            ClassExpr::class("urn:b"),
            ClassExpr::class("urn:a"),
        ]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_symmetric_axioms_ignore_operand_order() {
        let ab = Axiom::new(
            AxiomKind::EquivalentClasses,
            [Component::class("urn:a"), Component::class("urn:b")],
        );
        let ba = Axiom::new(
            AxiomKind::EquivalentClasses,
            [Component::class("urn:b"), Component::class("urn:a")],
        );
        assert_eq!(ab, ba);
        let sub_ab = Axiom::sub_class_of(ClassExpr::class("urn:a"), ClassExpr::class("urn:b"));
        let sub_ba = Axiom::sub_class_of(ClassExpr::class("urn:b"), ClassExpr::class("urn:a"));
        assert_ne!(sub_ab, sub_ba);
    }

    #[test]
    fn test_signature_and_declarations() {
        let axiom = Axiom::sub_class_of(
            ClassExpr::class("urn:a"),
            ClassExpr::some("urn:p", ClassExpr::class(THING.as_str())),
        );
        let sig = axiom.signature();
        assert_eq!(sig.len(), 2);
        assert!(sig.contains(&Entity::class("urn:a")));
        assert_eq!(axiom.declarations().len(), 2);
        assert!(!axiom.is_simple());
    }

    #[test]
    fn test_annotations_sorted() {
        let axiom = Axiom::sub_class_of(ClassExpr::class("urn:a"), ClassExpr::class("urn:b"))
            .annotated([Annotation::label("z"), Annotation::comment("a")]);
        let other = Axiom::sub_class_of(ClassExpr::class("urn:a"), ClassExpr::class("urn:b"))
            .annotated([Annotation::comment("a")])
            .annotated([Annotation::label("z")]);
        assert_eq!(axiom, other);
        assert_eq!(axiom.unannotated().annotations().len(), 0);
    }
}
