//! Combines views that realize the same logical statement through different triples,
//! such as the two orientations of a symmetric statement or the pairwise and list forms
//! of an n-ary one.

use crate::errors::{MappingError, Result};
use crate::view::AxiomView;
use log::debug;

fn describe(view: &AxiomView<'_>) -> String {
    format!("{} {}", view.kind(), view.triple())
}

/// Merges two equal views of the same graph. The result's sources are the union of
/// both; it reuses whatever content was already computed, preferring `a`.
pub fn merge<'g>(a: &AxiomView<'g>, b: &AxiomView<'g>) -> Result<AxiomView<'g>> {
    if !std::ptr::eq(a.graph(), b.graph()) {
        return Err(MappingError::illegal(format!(
            "cannot merge {} and {}: views belong to different graphs",
            describe(a),
            describe(b)
        )));
    }
    if !a.try_eq(b)? {
        return Err(MappingError::MergeMismatch {
            left: describe(a),
            right: describe(b),
        });
    }

    let mut sources = a.sources().to_vec();
    for t in b.sources() {
        if !sources.contains(t) {
            sources.push(*t);
        }
    }
    let (triple, repr) = a
        .adoptable()
        .or_else(|| b.adoptable())
        .unwrap_or_else(|| a.unadopted());
    debug!(
        "merged {} with {} into {} sources",
        describe(a),
        describe(b),
        sources.len()
    );
    Ok(AxiomView::from_parts(a.graph(), a.shape(), triple, sources, repr))
}
