//! Defines the configuration consulted while scanning a graph for axioms.
//! Flags gate optional statement categories; the profile rejects kinds it does not allow.

use crate::options::{ErrorPolicy, Profile};
use crate::shape::{AxiomKind, Gate};
use anyhow::Result;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Write};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Builder)]
#[builder(default)]
#[serde(default)]
pub struct MappingConfig {
    pub profile: Profile,
    // read `E rdf:type owl:Class` etc. as declaration axioms
    pub allow_read_declarations: bool,
    // read annotation assertions
    pub load_annotation_axioms: bool,
    // what bulk reads do with statements that fail to resolve
    pub error_policy: ErrorPolicy,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            profile: Profile::Full,
            allow_read_declarations: true,
            load_annotation_axioms: true,
            error_policy: ErrorPolicy::Fail,
        }
    }
}

impl MappingConfig {
    pub fn builder() -> MappingConfigBuilder {
        MappingConfigBuilder::default()
    }

    /// Returns true if the optional category `gate` is switched on.
    pub fn is_open(&self, gate: Gate) -> bool {
        match gate {
            Gate::Always => true,
            Gate::Declarations => self.allow_read_declarations,
            Gate::AnnotationAxioms => self.load_annotation_axioms,
        }
    }

    /// Returns true if statements of this kind are read at all under this configuration
    pub fn reads(&self, kind: AxiomKind) -> bool {
        self.profile.supports(kind) && self.is_open(kind.shape().gate)
    }

    pub fn save_to_file(&self, file: &Path) -> Result<()> {
        let config_str = serde_json::to_string_pretty(&self)?;
        let mut file = std::fs::File::create(file)?;
        file.write_all(config_str.as_bytes())?;
        Ok(())
    }

    pub fn from_file(file: &Path) -> Result<Self> {
        let file = std::fs::File::open(file)?;
        let reader = BufReader::new(file);
        let config: MappingConfig = serde_json::from_reader(reader)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let cfg = MappingConfig::builder().build().unwrap();
        assert_eq!(cfg, MappingConfig::default());
        assert!(cfg.reads(AxiomKind::Declaration));
    }

    #[test]
    fn test_gates() {
        let cfg = MappingConfig::builder()
            .allow_read_declarations(false)
            .profile(Profile::El)
            .build()
            .unwrap();
        assert!(!cfg.reads(AxiomKind::Declaration));
        assert!(!cfg.reads(AxiomKind::DisjointUnion));
        assert!(cfg.reads(AxiomKind::AnnotationAssertion));
        assert!(cfg.reads(AxiomKind::SubClassOf));
    }

    #[test]
    fn test_partial_json() {
        let cfg: MappingConfig = serde_json::from_str(r#"{"profile": "ql"}"#).unwrap();
        assert_eq!(cfg.profile, Profile::Ql);
        assert!(cfg.allow_read_declarations);
    }
}
