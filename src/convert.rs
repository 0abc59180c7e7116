//! One-shot conversion pipeline: .vox in, structure JSON rewritten in place

use std::path::Path;

use log::info;

use crate::core::Result;
use crate::structure::document::{ConvertStats, load_document, merge_model, save_document};
use crate::vox::parser::read_vox_file;

/// Run the full conversion.
///
/// Parses the model at `input`, merges it into the structure document at
/// `output` and rewrites that document. Stages run strictly in order and
/// each file handle is closed before the next one is opened; the document
/// is only written once parsing and the merge have fully succeeded, so a
/// failed run leaves it untouched.
pub fn convert(input: &Path, output: &Path) -> Result<ConvertStats> {
    let model = read_vox_file(input)?;
    info!(
        "parsed {}: {}x{}x{}, {} voxel records",
        input.display(),
        model.size_x,
        model.size_y,
        model.size_z,
        model.voxels.len()
    );

    let mut doc = load_document(output)?;
    let stats = merge_model(&mut doc, &model)?;
    save_document(output, &doc)?;

    Ok(stats)
}
