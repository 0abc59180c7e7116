//! Structure document handling: material table, voxel map, load/save

pub mod document;
pub mod material;

pub use document::{ConvertStats, build_voxel_map, load_document, merge_model, save_document};
pub use material::{VOID_INDEX, material_for_index};
