use ontoaxioms::content::Content;
use ontoaxioms::util::read_file;
use ontoaxioms::{AxiomKind, AxiomMapper, OntGraph};
use std::path::Path;
use std::thread;

fn pizza() -> OntGraph {
    read_file(Path::new("fixtures/pizza.ttl")).unwrap()
}

#[test]
fn test_concurrent_first_access_converges() {
    let graph = pizza();
    let mapper = AxiomMapper::new(&graph);
    let view = mapper
        .axioms(AxiomKind::EquivalentClasses)
        .unwrap()
        .next()
        .unwrap()
        .unwrap();
    assert!(!view.is_computed());

    let results: Vec<(Content, Content, u64)> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                s.spawn(|| {
                    let local = view.compute().unwrap();
                    let stored = view.content().unwrap().cloned().unwrap();
                    (local, stored, view.hash_code().unwrap())
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(view.is_computed());
    let retained = view.content().unwrap().unwrap();
    for (local, stored, hash) in &results {
        assert_eq!(local, retained);
        assert_eq!(stored, retained);
        assert_eq!(*hash, results[0].2);
    }
    assert_eq!(view.hash_code().unwrap(), results[0].2);
}

#[test]
fn test_parallel_reads_match_sequential_reads() {
    let graph = pizza();
    let mapper = AxiomMapper::new(&graph);

    let sequential: Vec<_> = AxiomKind::ALL
        .iter()
        .map(|kind| {
            let mut values = mapper
                .distinct_axioms(*kind)
                .unwrap()
                .iter()
                .map(|v| v.value().unwrap())
                .collect::<Vec<_>>();
            values.sort_by_key(|a| a.to_string());
            values
        })
        .collect();

    let parallel: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = AxiomKind::ALL
            .iter()
            .map(|kind| {
                let mapper = &mapper;
                s.spawn(move || {
                    let mut values = mapper
                        .distinct_axioms(*kind)
                        .unwrap()
                        .iter()
                        .map(|v| v.value().unwrap())
                        .collect::<Vec<_>>();
                    values.sort_by_key(|a| a.to_string());
                    values
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, parallel);
}

#[test]
fn test_shared_views_across_threads() {
    let graph = pizza();
    let mapper = AxiomMapper::new(&graph);
    let views = mapper
        .axioms(AxiomKind::SubClassOf)
        .unwrap()
        .collect::<ontoaxioms::Result<Vec<_>>>()
        .unwrap();

    let values: Vec<Vec<_>> = thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let views = &views;
                s.spawn(move || views.iter().map(|v| v.value().unwrap()).collect())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for other in &values[1..] {
        assert_eq!(other, &values[0]);
    }
    assert!(views.iter().filter(|v| !v.is_direct()).all(|v| v.is_computed()));
}
