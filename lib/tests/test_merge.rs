use ontoaxioms::content::fingerprint;
use ontoaxioms::merge::merge;
use ontoaxioms::util::{parse_turtle, read_file};
use ontoaxioms::{Axiom, AxiomKind, AxiomMapper, AxiomView, Component, OntGraph, Result};
use proptest::prelude::*;
use std::path::Path;

const PIZZA: &str = "http://example.org/pizza#";

fn iri(local: &str) -> String {
    format!("{PIZZA}{local}")
}

fn pizza() -> OntGraph {
    read_file(Path::new("fixtures/pizza.ttl")).unwrap()
}

fn disjoint_forms(a: &str, b: &str) -> OntGraph {
    parse_turtle(&format!(
        r#"@prefix owl: <http://www.w3.org/2002/07/owl#> .
           <urn:{a}> owl:disjointWith <urn:{b}> .
           <urn:{b}> owl:disjointWith <urn:{a}> .
           [] a owl:AllDisjointClasses ; owl:members ( <urn:{a}> <urn:{b}> ) ."#
    ))
    .unwrap()
}

fn views<'g>(mapper: &AxiomMapper<'g>, kind: AxiomKind) -> Vec<AxiomView<'g>> {
    mapper
        .axioms(kind)
        .unwrap()
        .collect::<Result<Vec<_>>>()
        .unwrap()
}

#[test]
fn test_distinct_collapses_both_orientations() {
    let graph = pizza();
    let mapper = AxiomMapper::new(&graph);
    let distinct = mapper.distinct_axioms(AxiomKind::DisjointClasses).unwrap();
    assert_eq!(distinct.len(), 2);

    let pair = distinct.iter().find(|v| v.sources().len() == 2).unwrap();
    assert_eq!(
        pair.value().unwrap(),
        Axiom::new(
            AxiomKind::DisjointClasses,
            [Component::class(iri("ThinBase")), Component::class(iri("DeepBase"))],
        )
    );
    assert!(pair.is_direct());
    assert_eq!(pair.triples().unwrap().len(), 2);
}

#[test]
fn test_symmetric_merge_is_equal_to_both_inputs() {
    let graph = pizza();
    let mapper = AxiomMapper::new(&graph);
    let all = views(&mapper, AxiomKind::DisjointClasses);
    let pairwise: Vec<_> = all.iter().filter(|v| v.is_direct()).collect();
    assert_eq!(pairwise.len(), 2);

    let merged = mapper.merge(pairwise[0], pairwise[1]).unwrap();
    assert_eq!(&merged, pairwise[0]);
    assert_eq!(&merged, pairwise[1]);
    assert_eq!(merged.sources().len(), 2);
}

#[test]
fn test_list_and_pairwise_forms_merge() {
    let graph = disjoint_forms("a", "b");
    let mapper = AxiomMapper::new(&graph);
    let all = views(&mapper, AxiomKind::DisjointClasses);
    assert_eq!(all.len(), 3);

    let distinct = mapper.distinct_axioms(AxiomKind::DisjointClasses).unwrap();
    assert_eq!(distinct.len(), 1);
    let view = &distinct[0];
    assert_eq!(view.sources().len(), 3);
    // two pairwise triples, the root's type and members, and two list cells
    assert_eq!(view.triples().unwrap().len(), 8);
    assert_eq!(
        view.value().unwrap(),
        Axiom::new(
            AxiomKind::DisjointClasses,
            [Component::class("urn:b"), Component::class("urn:a")],
        )
    );
}

#[test]
fn test_merge_adopts_computed_content() {
    let graph = disjoint_forms("a", "b");
    let mapper = AxiomMapper::new(&graph);
    let all = views(&mapper, AxiomKind::DisjointClasses);
    let list = all.iter().find(|v| !v.is_direct()).unwrap();
    let direct = all.iter().find(|v| v.is_direct()).unwrap();

    assert!(list.content().unwrap().is_some());
    let merged = merge(list, direct).unwrap();
    assert!(!merged.is_direct());
    assert!(merged.is_computed());
    assert_eq!(merged.triple(), list.triple());
}

#[test]
fn test_merge_rejects_different_statements() {
    let graph = pizza();
    let mapper = AxiomMapper::new(&graph);
    let subs = views(&mapper, AxiomKind::SubClassOf);
    let err = merge(&subs[0], &subs[1]).unwrap_err();
    assert!(err.is_illegal_state());

    let domains = views(&mapper, AxiomKind::ObjectPropertyDomain);
    assert!(merge(&subs[0], &domains[0]).unwrap_err().is_illegal_state());
}

proptest! {
    #[test]
    fn prop_fingerprint_ignores_member_order(names in proptest::collection::vec("[a-z]{1,6}", 1..6)) {
        let forward = Axiom::new(
            AxiomKind::DisjointClasses,
            names.iter().map(|n| Component::class(format!("urn:{n}"))),
        );
        let backward = Axiom::new(
            AxiomKind::DisjointClasses,
            names.iter().rev().map(|n| Component::class(format!("urn:{n}"))),
        );
        prop_assert_eq!(fingerprint(&forward), fingerprint(&backward));
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn prop_merge_commutes(a in "[a-z]{1,6}", b in "[a-z]{1,6}") {
        prop_assume!(a != b);
        let graph = disjoint_forms(&a, &b);
        let mapper = AxiomMapper::new(&graph);
        let all = views(&mapper, AxiomKind::DisjointClasses);
        prop_assert_eq!(all.len(), 3);
        for x in &all {
            for y in &all {
                let xy = merge(x, y).unwrap();
                let yx = merge(y, x).unwrap();
                prop_assert_eq!(xy.value().unwrap(), yx.value().unwrap());
                prop_assert_eq!(xy.hash_code().unwrap(), yx.hash_code().unwrap());
                prop_assert_eq!(xy.triples().unwrap(), yx.triples().unwrap());
                prop_assert_eq!(xy.hash_code().unwrap(), x.hash_code().unwrap());
            }
        }
    }
}
