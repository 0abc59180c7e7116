//! In-memory representation of a parsed .vox model

/// Single voxel record from the XYZI chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoxVoxel {
    pub x: u8,
    pub y: u8,
    pub z: u8,
    /// Palette index; 255 marks explicit void
    pub color_index: u8,
}

/// Parsed model: bounding box dimensions plus the raw voxel list
///
/// A file without a SIZE chunk leaves the dimensions at 0, and one without
/// an XYZI chunk leaves the voxel list empty; neither is a parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoxModel {
    pub size_x: u32,
    pub size_y: u32,
    pub size_z: u32,
    pub voxels: Vec<VoxVoxel>,
}

impl VoxModel {
    /// Total number of cells in the bounding box
    pub fn cell_count(&self) -> u64 {
        self.size_x as u64 * self.size_y as u64 * self.size_z as u64
    }
}
