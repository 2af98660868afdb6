//! Reads OWL 2 axioms out of an RDF triple graph as cached, mergeable statement views.
//!
//! Each statement kind has a static [`shape::Shape`] that recognizes the triples realizing
//! it. A recognized triple is decomposed into its operands and wrapped in an
//! [`AxiomView`]: a direct view when the triple alone carries everything, otherwise a view
//! whose resolved content is computed once on first access. Views realizing the same
//! statement through different triples can be merged, and any view can be detached into
//! a graph-independent [`Axiom`] and written into another graph.
//!
//! ```no_run
//! use ontoaxioms::{AxiomKind, AxiomMapper};
//!
//! let graph = ontoaxioms::util::read_file(std::path::Path::new("pizza.ttl")).unwrap();
//! let mapper = AxiomMapper::new(&graph);
//! for view in mapper.distinct_axioms(AxiomKind::SubClassOf).unwrap() {
//!     println!("{}", view.value().unwrap());
//! }
//! ```

extern crate derive_builder;

pub mod api;
pub mod config;
pub mod consts;
pub mod content;
pub mod decompose;
pub mod detach;
pub mod errors;
pub mod graph;
pub mod merge;
pub mod model;
pub mod node;
pub mod options;
mod resolve;
pub mod shape;
pub mod util;
pub mod view;
pub mod writer;

pub use api::{init_logging, AxiomMapper};
pub use config::MappingConfig;
pub use errors::{MappingError, Result};
pub use graph::OntGraph;
pub use model::{Annotation, Axiom, ClassExpr, Component, Entity, EntityType, ObjectPropertyExpr};
pub use node::{LiteralValue, Node};
pub use options::{ErrorPolicy, Profile};
pub use shape::{AxiomKind, SearchPattern};
pub use view::AxiomView;
