//! Chunk-level parser for the MagicaVoxel .vox format
//!
//! Only the subset the structure pipeline needs is interpreted:
//!
//! ```text
//! "VOX " magic, i32 version (150)
//! MAIN container chunk
//!   SIZE  - u32 x, u32 y, u32 z
//!   XYZI  - u32 count, then count x (u8 x, u8 y, u8 z, u8 color_index)
//!   ...   - any other chunk is skipped by its declared length
//! ```
//!
//! All integers are little-endian. Chunk headers carry their content and
//! children byte lengths, so unknown chunk kinds are skipped with a single
//! seek and never interpreted.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::core::{Error, Result};
use crate::vox::model::{VoxModel, VoxVoxel};

/// File magic, first four bytes of every .vox file
pub const VOX_MAGIC: [u8; 4] = *b"VOX ";

/// The only supported format version
pub const VOX_VERSION: i32 = 150;

const MAIN_ID: [u8; 4] = *b"MAIN";
const SIZE_ID: [u8; 4] = *b"SIZE";
const XYZI_ID: [u8; 4] = *b"XYZI";

/// Read and parse a .vox file from disk.
///
/// The file handle is dropped before this returns.
pub fn read_vox_file<P: AsRef<Path>>(path: P) -> Result<VoxModel> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    parse(&mut reader)
}

/// Parse a .vox byte stream.
///
/// Any malformed or truncated header is fatal; there is no partial
/// recovery.
pub fn parse<R: Read + Seek>(reader: &mut R) -> Result<VoxModel> {
    let magic = read_id(reader, "file magic")?;
    if magic != VOX_MAGIC {
        return Err(Error::Format(format!(
            "expected 'VOX ' magic, got '{}'",
            String::from_utf8_lossy(&magic)
        )));
    }

    let version = read_i32(reader, "format version")?;
    if version != VOX_VERSION {
        return Err(Error::Format(format!(
            "unsupported vox version {version} (expected {VOX_VERSION})"
        )));
    }

    let main_id = read_id(reader, "MAIN chunk id")?;
    if main_id != MAIN_ID {
        return Err(Error::Format(format!(
            "expected MAIN chunk, got '{}'",
            String::from_utf8_lossy(&main_id)
        )));
    }
    let _main_content_len = read_u32(reader, "MAIN content length")?;
    let main_children_len = read_u32(reader, "MAIN children length")?;
    let main_end = reader.stream_position()? + main_children_len as u64;

    let mut model = VoxModel::default();

    while reader.stream_position()? < main_end {
        let chunk_id = read_id(reader, "chunk id")?;
        let content_len = read_u32(reader, "chunk content length")?;
        let children_len = read_u32(reader, "chunk children length")?;

        match chunk_id {
            SIZE_ID => {
                model.size_x = read_u32(reader, "SIZE x")?;
                model.size_y = read_u32(reader, "SIZE y")?;
                model.size_z = read_u32(reader, "SIZE z")?;
            }
            XYZI_ID => {
                let count = read_u32(reader, "XYZI voxel count")?;
                model.voxels.reserve(count as usize);
                for _ in 0..count {
                    let mut record = [0u8; 4];
                    read_bytes(reader, &mut record, "XYZI voxel record")?;
                    model.voxels.push(VoxVoxel {
                        x: record[0],
                        y: record[1],
                        z: record[2],
                        color_index: record[3],
                    });
                }
            }
            _ => {
                // Unknown chunk: skip content and children by declared length
                let skip = content_len as i64 + children_len as i64;
                reader.seek(SeekFrom::Current(skip))?;
            }
        }
    }

    Ok(model)
}

/// Read exactly `buf.len()` bytes, mapping a short read to `Truncated`.
fn read_bytes<R: Read>(reader: &mut R, buf: &mut [u8], what: &str) -> Result<()> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Error::Truncated(format!("stream ended while reading {what}"))
        } else {
            Error::Io(e)
        }
    })
}

fn read_id<R: Read>(reader: &mut R, what: &str) -> Result<[u8; 4]> {
    let mut buf = [0u8; 4];
    read_bytes(reader, &mut buf, what)?;
    Ok(buf)
}

fn read_u32<R: Read>(reader: &mut R, what: &str) -> Result<u32> {
    let mut buf = [0u8; 4];
    read_bytes(reader, &mut buf, what)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_i32<R: Read>(reader: &mut R, what: &str) -> Result<i32> {
    let mut buf = [0u8; 4];
    read_bytes(reader, &mut buf, what)?;
    Ok(i32::from_le_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn chunk(id: &[u8; 4], content: &[u8], children: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(id);
        out.extend_from_slice(&(content.len() as u32).to_le_bytes());
        out.extend_from_slice(&(children.len() as u32).to_le_bytes());
        out.extend_from_slice(content);
        out.extend_from_slice(children);
        out
    }

    fn size_chunk(x: u32, y: u32, z: u32) -> Vec<u8> {
        let mut content = Vec::new();
        content.extend_from_slice(&x.to_le_bytes());
        content.extend_from_slice(&y.to_le_bytes());
        content.extend_from_slice(&z.to_le_bytes());
        chunk(b"SIZE", &content, &[])
    }

    fn xyzi_chunk(voxels: &[(u8, u8, u8, u8)]) -> Vec<u8> {
        let mut content = Vec::new();
        content.extend_from_slice(&(voxels.len() as u32).to_le_bytes());
        for &(x, y, z, i) in voxels {
            content.extend_from_slice(&[x, y, z, i]);
        }
        chunk(b"XYZI", &content, &[])
    }

    fn vox_bytes(children: &[Vec<u8>]) -> Vec<u8> {
        let mut body = Vec::new();
        for child in children {
            body.extend_from_slice(child);
        }
        let mut out = Vec::new();
        out.extend_from_slice(b"VOX ");
        out.extend_from_slice(&150i32.to_le_bytes());
        out.extend_from_slice(b"MAIN");
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&(body.len() as u32).to_le_bytes());
        out.extend_from_slice(&body);
        out
    }

    #[test]
    fn test_parse_minimal_model() {
        let bytes = vox_bytes(&[
            size_chunk(2, 3, 4),
            xyzi_chunk(&[(0, 0, 0, 2), (1, 2, 3, 7)]),
        ]);
        let model = parse(&mut Cursor::new(bytes)).expect("parse failed");

        assert_eq!((model.size_x, model.size_y, model.size_z), (2, 3, 4));
        assert_eq!(model.voxels.len(), 2);
        assert_eq!(
            model.voxels[0],
            VoxVoxel { x: 0, y: 0, z: 0, color_index: 2 }
        );
        assert_eq!(
            model.voxels[1],
            VoxVoxel { x: 1, y: 2, z: 3, color_index: 7 }
        );
    }

    #[test]
    fn test_unknown_chunks_are_skipped() {
        // RGBA-style payload chunk between SIZE and XYZI must not disturb parsing
        let bytes = vox_bytes(&[
            size_chunk(1, 1, 1),
            chunk(b"RGBA", &[0xAB; 1024], &[]),
            xyzi_chunk(&[(0, 0, 0, 5)]),
        ]);
        let model = parse(&mut Cursor::new(bytes)).expect("parse failed");

        assert_eq!((model.size_x, model.size_y, model.size_z), (1, 1, 1));
        assert_eq!(model.voxels.len(), 1);
        assert_eq!(model.voxels[0].color_index, 5);
    }

    #[test]
    fn test_chunk_with_children_skipped_whole() {
        // Children bytes count toward the skip as well
        let bytes = vox_bytes(&[
            chunk(b"nTRN", &[1, 2, 3], &[9, 9, 9, 9]),
            size_chunk(1, 2, 1),
        ]);
        let model = parse(&mut Cursor::new(bytes)).expect("parse failed");
        assert_eq!((model.size_x, model.size_y, model.size_z), (1, 2, 1));
    }

    #[test]
    fn test_missing_chunks_default_to_empty() {
        let bytes = vox_bytes(&[]);
        let model = parse(&mut Cursor::new(bytes)).expect("parse failed");
        assert_eq!(model, VoxModel::default());
    }

    #[test]
    fn test_rejects_bad_magic() {
        let mut bytes = vox_bytes(&[size_chunk(1, 1, 1)]);
        bytes[0..4].copy_from_slice(b"BADF");
        let err = parse(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, Error::Format(_)), "got {err:?}");
    }

    #[test]
    fn test_rejects_unsupported_version() {
        let mut bytes = vox_bytes(&[size_chunk(1, 1, 1)]);
        bytes[4..8].copy_from_slice(&200i32.to_le_bytes());
        let err = parse(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, Error::Format(_)), "got {err:?}");
    }

    #[test]
    fn test_rejects_missing_main_container() {
        let mut bytes = vox_bytes(&[size_chunk(1, 1, 1)]);
        bytes[8..12].copy_from_slice(b"PACK");
        let err = parse(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, Error::Format(_)), "got {err:?}");
    }

    #[test]
    fn test_truncated_header_is_fatal() {
        let err = parse(&mut Cursor::new(b"VOX".to_vec())).unwrap_err();
        assert!(matches!(err, Error::Truncated(_)), "got {err:?}");
    }

    #[test]
    fn test_truncated_voxel_payload_is_fatal() {
        let mut bytes = vox_bytes(&[
            size_chunk(1, 1, 1),
            xyzi_chunk(&[(0, 0, 0, 1), (0, 0, 1, 2)]),
        ]);
        // Drop the tail of the last voxel record
        bytes.truncate(bytes.len() - 3);
        let err = parse(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, Error::Truncated(_)), "got {err:?}");
    }
}
