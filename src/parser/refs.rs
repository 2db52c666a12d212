//! Cross-file reference resolution — the second parse phase.
//!
//! The primary pass records which struct ids the header depends on; this
//! phase drains that list, parsing each referenced file into the same
//! shared model so structs from several files accumulate into one header.

use crate::model::Header;
use crate::options::Options;
use crate::parser;
use crate::parser::validate::{self, SchemaOracle};
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

/// Derive the file behind a reference identifier: `<id>.xml` next to the
/// primary input. A missing referenced file aborts the run.
pub fn ref_to_file(ref_id: &str, base_path: &Path) -> Result<PathBuf> {
    let filename = base_path.join(format!("{}.xml", ref_id));
    if !filename.exists() {
        bail!("referenced file {} does not exist", filename.display());
    }
    Ok(filename)
}

/// Resolve the header's unresolved reference ids in insertion order.
///
/// Ids that already map to a struct are skipped, so resolving twice cannot
/// duplicate entries. The drain is index-based: ids appended while a
/// referenced file is being parsed are still picked up.
pub fn resolve(
    header: &mut Header,
    base_path: &Path,
    opts: &Options,
    oracle: &dyn SchemaOracle,
) -> Result<()> {
    if !opts.enable_follow_refs {
        return Ok(());
    }
    let mut i = 0;
    while i < header.ref_ids.len() {
        let ref_id = header.ref_ids[i].clone();
        i += 1;
        if header.ref_id_struct_map.contains_key(&ref_id) {
            continue;
        }
        let file = ref_to_file(&ref_id, base_path)?;
        validate::check_file(&file, base_path, oracle, opts)?;
        parser::parse_file(&file, header)?;
    }
    Ok(())
}
