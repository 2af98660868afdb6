use ontoaxioms::util::{parse_turtle, read_file};
use ontoaxioms::{
    Axiom, AxiomKind, AxiomMapper, ClassExpr, Component, MappingConfig, OntGraph, SearchPattern,
};
use std::path::Path;

const PIZZA: &str = "http://example.org/pizza#";

fn iri(local: &str) -> String {
    format!("{PIZZA}{local}")
}

fn pizza() -> OntGraph {
    read_file(Path::new("fixtures/pizza.ttl")).unwrap()
}

#[test]
fn test_scan_counts_per_kind() {
    use AxiomKind::*;
    let graph = pizza();
    let mapper = AxiomMapper::new(&graph);
    let expected = [
        (Declaration, 18),
        (SubClassOf, 8),
        (EquivalentClasses, 1),
        (DisjointClasses, 3),
        (DisjointUnion, 1),
        (SubObjectPropertyOf, 2),
        (SubDataPropertyOf, 0),
        (SubPropertyChainOf, 0),
        (EquivalentObjectProperties, 0),
        (InverseObjectProperties, 1),
        (DisjointObjectProperties, 0),
        (ObjectPropertyDomain, 2),
        (ObjectPropertyRange, 2),
        (DataPropertyDomain, 1),
        (DataPropertyRange, 1),
        (FunctionalObjectProperty, 1),
        (TransitiveObjectProperty, 1),
        (SymmetricObjectProperty, 0),
        (FunctionalDataProperty, 1),
        (ClassAssertion, 2),
        (ObjectPropertyAssertion, 1),
        (DataPropertyAssertion, 1),
        (AnnotationAssertion, 1),
        (SameIndividual, 0),
        (DifferentIndividuals, 0),
    ];
    assert_eq!(expected.len(), AxiomKind::ALL.len());
    for (kind, count) in expected {
        assert_eq!(mapper.scan(kind).unwrap().count(), count, "scan of {}", kind);
    }
}

#[test]
fn test_scan_agrees_with_membership_test() {
    let graph = pizza();
    let mapper = AxiomMapper::new(&graph);
    for kind in AxiomKind::ALL {
        let scanned: Vec<_> = mapper.scan(kind).unwrap().collect();
        for triple in &scanned {
            assert!(mapper.matches(kind, *triple), "{} should match {}", triple, kind);
        }
        let matching = graph.iter().filter(|t| mapper.matches(kind, *t)).count();
        assert_eq!(matching, scanned.len(), "membership count for {}", kind);
    }
}

#[test]
fn test_gates_hide_optional_categories() {
    let graph = pizza();
    let config = MappingConfig::builder()
        .allow_read_declarations(false)
        .load_annotation_axioms(false)
        .build()
        .unwrap();
    let mapper = AxiomMapper::with_config(&graph, config);
    assert_eq!(mapper.scan(AxiomKind::Declaration).unwrap().count(), 0);
    assert_eq!(mapper.scan(AxiomKind::AnnotationAssertion).unwrap().count(), 0);
    assert_eq!(mapper.scan(AxiomKind::SubClassOf).unwrap().count(), 8);

    let label = graph
        .iter()
        .find(|t| t.predicate.as_str().ends_with("#label"))
        .unwrap();
    assert!(!mapper.matches(AxiomKind::AnnotationAssertion, label));
    assert!(AxiomMapper::new(&graph).matches(AxiomKind::AnnotationAssertion, label));
}

#[test]
fn test_search_pattern_for_symmetric_kinds() {
    let axiom = Axiom::new(
        AxiomKind::EquivalentClasses,
        [Component::class(iri("A")), Component::class(iri("B"))],
    );
    let pattern = AxiomKind::EquivalentClasses.shape().search_triple(&axiom);
    assert!(pattern.is_exact());
    assert_eq!(pattern.triples().len(), 2);

    let sub = Axiom::sub_class_of(ClassExpr::class(iri("A")), ClassExpr::class(iri("B")));
    let pattern = AxiomKind::SubClassOf.shape().search_triple(&sub);
    assert_eq!(pattern.triples().len(), 1);

    let disjoint = Axiom::new(
        AxiomKind::DisjointClasses,
        [Component::class(iri("A")), Component::class(iri("B"))],
    );
    let pattern = AxiomKind::DisjointClasses.shape().search_triple(&disjoint);
    assert!(matches!(pattern, SearchPattern::Candidates(ref t) if t.len() == 2));
}

#[test]
fn test_symmetric_statement_found_in_either_orientation() {
    let graph = parse_turtle(
        r#"@prefix : <http://example.org/pizza#> .
           @prefix owl: <http://www.w3.org/2002/07/owl#> .
           :x owl:sameAs :y ."#,
    )
    .unwrap();
    let mapper = AxiomMapper::new(&graph);
    let forward = Axiom::new(
        AxiomKind::SameIndividual,
        [Component::individual(iri("x")), Component::individual(iri("y"))],
    );
    let backward = Axiom::new(
        AxiomKind::SameIndividual,
        [Component::individual(iri("y")), Component::individual(iri("x"))],
    );
    assert_eq!(forward, backward);
    let view = mapper.find(&backward).unwrap().unwrap();
    assert!(view.is_direct());
    assert_eq!(view.value().unwrap(), forward);
}

#[test]
fn test_find_pairwise_disjointness() {
    let graph = pizza();
    let mapper = AxiomMapper::new(&graph);
    let axiom = Axiom::new(
        AxiomKind::DisjointClasses,
        [Component::class(iri("ThinBase")), Component::class(iri("DeepBase"))],
    );
    let view = mapper.find(&axiom).unwrap().unwrap();
    assert!(view.is_direct());
    assert_eq!(view.value().unwrap(), axiom);

    let toppings = Axiom::new(
        AxiomKind::DisjointClasses,
        ["VegetableTopping", "CheeseTopping", "MeatTopping"]
            .map(|c| Component::class(iri(c))),
    );
    let view = mapper.find(&toppings).unwrap().unwrap();
    assert!(!view.is_direct());
    assert_eq!(view.value().unwrap(), toppings);

    let missing = Axiom::new(
        AxiomKind::DisjointClasses,
        [Component::class(iri("ThinBase")), Component::class(iri("Pizza"))],
    );
    assert!(!mapper.contains(&missing).unwrap());
}
