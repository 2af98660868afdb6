//! Copies statements out of a graph.

use crate::errors::Result;
use crate::model::Axiom;
use crate::view::AxiomView;
use anyhow::Context;
use log::trace;

/// Returns the view's logical statement as a value with no reference to the graph.
pub fn detach(view: &AxiomView<'_>) -> Result<Axiom> {
    let axiom = view.value()?;
    trace!("detached {} from {}", axiom, view.triple());
    Ok(axiom)
}

/// Detaches every view, stopping at the first failure.
pub fn detach_all<'a, 'g: 'a>(views: impl IntoIterator<Item = &'a AxiomView<'g>>) -> Result<Vec<Axiom>> {
    views.into_iter().map(detach).collect()
}

pub fn to_json(axioms: &[Axiom]) -> anyhow::Result<String> {
    serde_json::to_string_pretty(axioms).context("serializing axioms")
}

pub fn from_json(data: &str) -> anyhow::Result<Vec<Axiom>> {
    serde_json::from_str(data).context("parsing axioms")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MappingConfig;
    use crate::model::{Annotation, ClassExpr};
    use crate::shape::AxiomKind;
    use crate::util::parse_turtle;
    use crate::view::materialize;

    #[test]
    fn test_detached_axiom_outlives_graph() {
        let detached = {
            let g = parse_turtle(
                r#"@prefix : <http://example.org/> .
                   @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
                   :A rdfs:subClassOf :B ."#,
            )
            .unwrap();
            let shape = AxiomKind::SubClassOf.shape();
            let triple = shape.scan(&g, &MappingConfig::default()).next().unwrap();
            detach(&materialize(&g, shape, triple).unwrap()).unwrap()
        };
        let expected = Axiom::sub_class_of(
            ClassExpr::class("http://example.org/A"),
            ClassExpr::class("http://example.org/B"),
        );
        assert_eq!(detached, expected);

        let annotated = detached.annotated([Annotation::label("A is a B")]);
        let back = from_json(&to_json(&[annotated.clone()]).unwrap()).unwrap();
        assert_eq!(back, vec![annotated]);
    }
}
