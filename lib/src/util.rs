use anyhow::Result;

use std::io::{BufReader, Read};
use std::path::Path;

use oxigraph::io::{RdfFormat, RdfParser, RdfSerializer};
use oxigraph::model::graph::Graph as OxigraphGraph;
use oxigraph::model::Triple;

use log::{debug, info};

use crate::graph::OntGraph;

fn format_for_path(file: &Path) -> RdfFormat {
    let content_type = file.extension().and_then(|ext| ext.to_str());
    content_type
        .and_then(|ext| match ext {
            "ttl" => Some(RdfFormat::Turtle),
            "xml" | "owl" | "rdf" => Some(RdfFormat::RdfXml),
            "n3" => Some(RdfFormat::Turtle),
            "nt" => Some(RdfFormat::NTriples),
            _ => None,
        })
        .unwrap_or(RdfFormat::Turtle)
}

fn read_graph(content: impl Read, format: RdfFormat) -> Result<OxigraphGraph> {
    let parser = RdfParser::from_format(format);
    let mut graph = OxigraphGraph::new();
    let parser = parser.for_reader(content);
    for quad in parser {
        let quad = quad?;
        let triple = Triple::new(quad.subject, quad.predicate, quad.object);
        graph.insert(&triple);
    }
    Ok(graph)
}

/// Reads an RDF file into a fresh graph; the format is picked from the file extension,
/// defaulting to Turtle.
pub fn read_file(file: &Path) -> Result<OntGraph> {
    debug!("Reading file: {}", file.display());
    let format = format_for_path(file);
    let content = BufReader::new(std::fs::File::open(file)?);
    let graph = read_graph(content, format)?;
    info!("Read {} triples from {}", graph.len(), file.display());
    Ok(OntGraph::from_graph(graph))
}

pub fn parse_turtle(data: &str) -> Result<OntGraph> {
    parse_str(data, RdfFormat::Turtle)
}

pub fn parse_str(data: &str, format: RdfFormat) -> Result<OntGraph> {
    let graph = read_graph(data.as_bytes(), format)?;
    Ok(OntGraph::from_graph(graph))
}

pub fn write_graph_to_file(graph: &OntGraph, file: &Path) -> Result<()> {
    info!(
        "Writing graph to file: {} with length {}",
        file.display(),
        graph.len()
    );
    let format = format_for_path(file);
    let mut file = std::fs::File::create(file)?;
    let mut serializer = RdfSerializer::from_format(format).for_writer(&mut file);
    for triple in graph.iter() {
        serializer.serialize_triple(triple)?;
    }
    serializer.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_read_file() {
        let graph = parse_turtle(
            "<http://example.org/A> a <http://www.w3.org/2002/07/owl#Class> .",
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.nt");
        write_graph_to_file(&graph, &path).unwrap();
        let back = read_file(&path).unwrap();
        assert_eq!(back.len(), 1);
        assert_ne!(back.scope(), graph.scope());

        // reading non-existent file should return an error
        assert!(read_file(&dir.path().join("missing.ttl")).is_err());
    }
}
