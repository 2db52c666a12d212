//! Schema validation boundary.
//!
//! Validation proper is a collaborator concern: the core only needs a
//! yes/no verdict on the input bytes. The binary wires in a
//! well-formedness oracle; tests may substitute their own.

use crate::options::Options;
use anyhow::{bail, Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs;
use std::path::Path;

/// Yes/no verdict on one input document.
pub trait SchemaOracle {
    fn validate(&self, xml: &str) -> bool;
}

/// Default oracle: a full tokenizer read-through. Catches structural
/// damage (mismatched or unclosed tags) without a full schema check.
pub struct WellFormed;

impl SchemaOracle for WellFormed {
    fn validate(&self, xml: &str) -> bool {
        let mut reader = Reader::from_str(xml);
        loop {
            match reader.read_event() {
                Ok(Event::Eof) => return true,
                Ok(_) => {}
                Err(_) => return false,
            }
        }
    }
}

/// Check one input file against the schema oracle.
///
/// The schema `compound.xsd` must sit next to the input files; a missing
/// schema is fatal even though the oracle itself decides the verdict.
pub fn check_file(
    path: &Path,
    base_path: &Path,
    oracle: &dyn SchemaOracle,
    opts: &Options,
) -> Result<()> {
    if !opts.enable_validate {
        return Ok(());
    }
    let xsd = base_path.join("compound.xsd");
    if !xsd.exists() {
        bail!("XSD {} does not exist", xsd.display());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    if !oracle.validate(&content) {
        bail!("XML input {} is invalid", path.display());
    }
    Ok(())
}
