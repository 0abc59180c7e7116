//! Palette color index to material name mapping

/// Palette index that marks explicit void instead of a material.
///
/// Voxels painted with this index suppress their cell entirely: they are
/// filtered out before the table is consulted and excluded from void
/// filling.
pub const VOID_INDEX: u8 = 255;

/// Ordered material table, indexed by palette color index.
///
/// Indices 0 and 1 both map to "structure"; index 0 is reserved as
/// background in the palette convention of the source format.
const MATERIALS: [&str; 22] = [
    "structure",
    "structure",
    "grass",
    "leaves",
    "vines",
    "fruit",
    "flower",
    "bark",
    "wood",
    "dirt",
    "sand",
    "stone",
    "stoneAccent",
    "stoneAccent2",
    "stoneRoof",
    "metal",
    "metalAccent",
    "sign",
    "signText",
    "bone",
    "rune",
    "crystal",
];

/// Map a palette color index to its material name.
///
/// Indices past the end of the table fall back to "structure".
pub fn material_for_index(index: u8) -> &'static str {
    MATERIALS
        .get(index as usize)
        .copied()
        .unwrap_or(MATERIALS[0])
}
