//! Structure document load, voxel merge and save
//!
//! The document is an arbitrary JSON object owned by the game; the
//! converter only replaces its `voxels` field and reads its `useVoid`
//! flag. Everything else passes through untouched.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::{Error, Result};
use crate::structure::material::{VOID_INDEX, material_for_index};
use crate::vox::model::VoxModel;

/// Document field replaced wholesale on every conversion
pub const VOXELS_FIELD: &str = "voxels";

/// Document field that enables void filling when truthy
pub const USE_VOID_FIELD: &str = "useVoid";

/// One entry in the output voxel map (serialized as JSON for easy inspection)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoxelEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<&'static str>,
    pub solid: bool,
}

impl VoxelEntry {
    fn solid(material: &'static str) -> Self {
        Self {
            material: Some(material),
            solid: true,
        }
    }

    fn empty() -> Self {
        Self {
            material: None,
            solid: false,
        }
    }
}

/// Entry counts from a merge, reported by the CLI after a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertStats {
    /// Material-bearing entries emitted
    pub solid: usize,
    /// Records with the void marker index (emit nothing)
    pub void_markers: usize,
    /// `{"solid": false}` entries emitted by the void-fill pass
    pub filled: usize,
}

/// Load the structure document from disk.
///
/// The file must exist and hold a JSON object at the top level. The read
/// handle is released before this returns.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Map<String, Value>> {
    let text = std::fs::read_to_string(path)?;
    match serde_json::from_str(&text)? {
        Value::Object(doc) => Ok(doc),
        _ => Err(Error::Document(
            "structure document root is not a JSON object".to_string(),
        )),
    }
}

/// Write the structure document back to disk, fully overwriting it.
pub fn save_document<P: AsRef<Path>>(path: P, doc: &Map<String, Value>) -> Result<()> {
    let json = serde_json::to_string_pretty(doc)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Replace the document's voxel field with the converted model.
///
/// Reads the document's `useVoid` flag, rebuilds the `voxels` map from
/// scratch and swaps it in. All other fields are left alone.
pub fn merge_model(doc: &mut Map<String, Value>, model: &VoxModel) -> Result<ConvertStats> {
    let use_void = doc.get(USE_VOID_FIELD).is_some_and(is_truthy);
    let (voxels, stats) = build_voxel_map(model, use_void)?;
    doc.insert(VOXELS_FIELD.to_string(), Value::Object(voxels));
    Ok(stats)
}

/// Build the voxel map for a model.
///
/// Solid voxels become `{"material": ..., "solid": true}` under their
/// flipped-y key. Records with the void marker index emit nothing but
/// reserve their key. With `use_void` set, every untouched cell of the
/// bounding box becomes `{"solid": false}`; void-marked cells stay absent.
pub fn build_voxel_map(
    model: &VoxModel,
    use_void: bool,
) -> Result<(Map<String, Value>, ConvertStats)> {
    let mut voxels = Map::new();
    let mut void_keys: HashSet<String> = HashSet::new();
    let mut stats = ConvertStats::default();

    for record in &model.voxels {
        let key = voxel_key(
            record.x as u32,
            record.y as u32,
            record.z as u32,
            model.size_y,
        );
        if record.color_index == VOID_INDEX {
            void_keys.insert(key);
            stats.void_markers += 1;
        } else {
            let entry = VoxelEntry::solid(material_for_index(record.color_index));
            voxels.insert(key, serde_json::to_value(entry)?);
            stats.solid += 1;
        }
    }

    if use_void {
        for x in 0..model.size_x {
            for y in 0..model.size_y {
                for z in 0..model.size_z {
                    let key = voxel_key(x, y, z, model.size_y);
                    if !voxels.contains_key(&key) && !void_keys.contains(&key) {
                        voxels.insert(key, serde_json::to_value(VoxelEntry::empty())?);
                        stats.filled += 1;
                    }
                }
            }
        }
    }

    Ok((voxels, stats))
}

/// Build the `"x,y,z"` map key for a model coordinate.
///
/// The y axis is flipped against the model height to reconcile the .vox
/// axis convention with the structure format. Every key, solid or filled,
/// goes through here so the two passes can never disagree.
fn voxel_key(x: u32, y: u32, z: u32, size_y: u32) -> String {
    format!("{},{},{}", x, size_y as i64 - 1 - y as i64, z)
}

/// Loose truthiness applied to document flags: null, false, 0, "", [] and
/// {} all count as unset.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
