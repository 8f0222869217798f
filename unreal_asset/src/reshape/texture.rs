//! `Texture2D`/`TextureCube` reshaper: parses the platform-data placeholder
//! prefix, pixel format, and mip table, and implements the mip-strip
//! transform used to shrink cooked textures to a single inline mip.

use byteorder::{ReadBytesExt, WriteBytesExt, LE};
use unreal_asset_base::error::{Error, ReshapeError};

use crate::reshape::{FrontMatter, ReshapeContext, ReshapeOutput};

/// Candidate sizes (in bytes) of the leading placeholder before `SizeX`;
/// see Design Note "Open question — placeholder bytes".
const PLACEHOLDER_PREFIX_SIZES: [usize; 3] = [16, 20, 24];

const MIN_TEXTURE_DIMENSION: u32 = 1;
const MAX_TEXTURE_DIMENSION: u32 = 8192;
const MAX_PACKED_DATA: u32 = 0x8000_0000;

/// `flags` bit meaning this mip's bulk data is stored immediately after its
/// header rather than in a separate file or at the end of the archive.
const BULKDATA_FORCE_INLINE_PAYLOAD: u32 = 1 << 8;
/// `flags` bit meaning this mip's bulk data lives in a separate `.ubulk` file.
const BULKDATA_PAYLOAD_IN_SEPARATE_FILE: u32 = 1 << 9;

/// One mip's bulk data header, in either of its two on-disk forms.
#[derive(Debug, Clone)]
enum MipBulkData {
    /// Modern form: an index into the package-wide bulk-data resource map.
    ResourceIndex(u32),
    /// Legacy inline form, with its own flag bits.
    Legacy {
        flags: u32,
        element_count: i32,
        size_on_disk: i64,
        offset_in_file: i64,
        inline_data: Option<Vec<u8>>,
    },
}

#[derive(Debug, Clone)]
struct MipRecord {
    bulk_data: MipBulkData,
    size_x: u32,
    size_y: u32,
    size_z: u32,
}

/// Parses the placeholder + dimensions + pixel format + mip table, strips
/// every mip above index 0, and rewrites the export to carry exactly one
/// inline mip with `firstMipToSerialize = 0` (spec scenario S2).
pub fn reshape(
    tail: &[u8],
    front_matter: &FrontMatter,
    ctx: &ReshapeContext,
) -> Result<ReshapeOutput, Error> {
    let normalized = crate::reshape::normalize_class_name(&front_matter.class_name);
    if normalized != "texture2d" && normalized != "texturecube" {
        return Err(ReshapeError::wrong_class("texture", &front_matter.class_name).into());
    }

    let (placeholder_len, size_x, size_y, packed_data) = probe_placeholder(tail)?;

    let mut cursor = std::io::Cursor::new(&tail[placeholder_len..]);
    let pixel_format = read_ascii_string(&mut cursor)?;
    let _first_mip_to_serialize = cursor
        .read_i32::<LE>()
        .map_err(|e| ReshapeError::malformed_tail(e.to_string()))?;
    let mip_count = cursor
        .read_i32::<LE>()
        .map_err(|e| ReshapeError::malformed_tail(e.to_string()))?;
    if mip_count < 1 {
        return Err(ReshapeError::malformed_tail(format!("texture has {mip_count} mips")).into());
    }

    let mut mips = Vec::with_capacity(mip_count as usize);
    for _ in 0..mip_count {
        mips.push(read_mip_record(&mut cursor, ctx)?);
    }

    let consumed = placeholder_len + cursor.position() as usize;
    let remainder = &tail[consumed..];

    let mut mip0 = mips.remove(0);
    inline_mip(&mut mip0, ctx)?;

    let mut out = Vec::with_capacity(tail.len());
    out.extend_from_slice(&tail[..placeholder_len - 12]); // leading padding, preserved verbatim
    out.extend_from_slice(&encode_placeholder_head(size_x, size_y, packed_data));

    write_ascii_string(&mut out, &pixel_format);
    out.write_i32::<LE>(0).expect("writing to Vec never fails"); // firstMipToSerialize
    out.write_i32::<LE>(1).expect("writing to Vec never fails"); // mip_count

    write_inline_mip(&mut out, &mip0);
    out.extend_from_slice(remainder);

    Ok(ReshapeOutput {
        serial_size_delta: out.len() as i64 - tail.len() as i64,
        tail: out,
    })
}

/// Probes the three candidate placeholder sizes, returning the first whose
/// trailing 12 bytes decode to a sane `(SizeX, SizeY, PackedData)` triple.
fn probe_placeholder(tail: &[u8]) -> Result<(usize, u32, u32, u32), Error> {
    for &size in &PLACEHOLDER_PREFIX_SIZES {
        if tail.len() < size {
            continue;
        }
        let triple_start = size - 12;
        let size_x = u32::from_le_bytes(tail[triple_start..triple_start + 4].try_into().unwrap());
        let size_y = u32::from_le_bytes(tail[triple_start + 4..triple_start + 8].try_into().unwrap());
        let packed_data =
            u32::from_le_bytes(tail[triple_start + 8..triple_start + 12].try_into().unwrap());

        if is_sane_dimension(size_x) && is_sane_dimension(size_y) && packed_data <= MAX_PACKED_DATA {
            return Ok((size, size_x, size_y, packed_data));
        }
    }

    Err(ReshapeError::NoValidPlaceholder.into())
}

fn is_sane_dimension(value: u32) -> bool {
    (MIN_TEXTURE_DIMENSION..=MAX_TEXTURE_DIMENSION).contains(&value) && value.is_power_of_two()
}

fn encode_placeholder_head(size_x: u32, size_y: u32, packed_data: u32) -> [u8; 12] {
    let mut buf = [0u8; 12];
    buf[0..4].copy_from_slice(&size_x.to_le_bytes());
    buf[4..8].copy_from_slice(&size_y.to_le_bytes());
    buf[8..12].copy_from_slice(&packed_data.to_le_bytes());
    buf
}

fn read_mip_record(
    cursor: &mut std::io::Cursor<&[u8]>,
    ctx: &ReshapeContext,
) -> Result<MipRecord, Error> {
    let bulk_data = if ctx.uses_bulk_data_resources {
        let index = cursor
            .read_u32::<LE>()
            .map_err(|e| ReshapeError::malformed_tail(e.to_string()))?;
        MipBulkData::ResourceIndex(index)
    } else {
        read_legacy_bulk_data(cursor)?
    };

    let size_x = cursor
        .read_u32::<LE>()
        .map_err(|e| ReshapeError::malformed_tail(e.to_string()))?;
    let size_y = cursor
        .read_u32::<LE>()
        .map_err(|e| ReshapeError::malformed_tail(e.to_string()))?;
    let size_z = cursor
        .read_u32::<LE>()
        .map_err(|e| ReshapeError::malformed_tail(e.to_string()))?;

    Ok(MipRecord {
        bulk_data,
        size_x,
        size_y,
        size_z,
    })
}

fn read_legacy_bulk_data(cursor: &mut std::io::Cursor<&[u8]>) -> Result<MipBulkData, Error> {
    let flags = cursor
        .read_u32::<LE>()
        .map_err(|e| ReshapeError::malformed_tail(e.to_string()))?;
    let element_count = cursor
        .read_i32::<LE>()
        .map_err(|e| ReshapeError::malformed_tail(e.to_string()))?;
    let size_on_disk = cursor
        .read_i64::<LE>()
        .map_err(|e| ReshapeError::malformed_tail(e.to_string()))?;
    let offset_in_file = cursor
        .read_i64::<LE>()
        .map_err(|e| ReshapeError::malformed_tail(e.to_string()))?;

    let inline_data = if flags & BULKDATA_FORCE_INLINE_PAYLOAD != 0 {
        let mut data = vec![0u8; size_on_disk.max(0) as usize];
        std::io::Read::read_exact(cursor, &mut data)
            .map_err(|e| ReshapeError::malformed_tail(e.to_string()))?;
        Some(data)
    } else {
        None
    };

    Ok(MipBulkData::Legacy {
        flags,
        element_count,
        size_on_disk,
        offset_in_file,
        inline_data,
    })
}

/// Converts a mip's bulk data to inline storage: resolves separate-file
/// payloads against [`ReshapeContext::external_bulk`] when present.
fn inline_mip(mip: &mut MipRecord, ctx: &ReshapeContext) -> Result<(), Error> {
    match &mip.bulk_data {
        MipBulkData::ResourceIndex(_) => Err(ReshapeError::malformed_tail(
            "mip stripping a data-resource-indexed mip requires the resource map, not yet supported"
                .to_string(),
        )
        .into()),
        MipBulkData::Legacy {
            flags,
            element_count,
            size_on_disk,
            inline_data: Some(data),
            ..
        } => {
            mip.bulk_data = MipBulkData::Legacy {
                flags: (*flags & !BULKDATA_PAYLOAD_IN_SEPARATE_FILE) | BULKDATA_FORCE_INLINE_PAYLOAD,
                element_count: *element_count,
                size_on_disk: *size_on_disk,
                offset_in_file: 0,
                inline_data: Some(data.clone()),
            };
            Ok(())
        }
        MipBulkData::Legacy {
            flags,
            element_count,
            size_on_disk,
            offset_in_file,
            inline_data: None,
        } => {
            let external = ctx
                .external_bulk
                .ok_or_else(|| ReshapeError::malformed_tail(
                    "mip references an external bulk file but none was supplied".to_string(),
                ))?;
            let start = (*offset_in_file).max(0) as usize;
            let end = start + (*size_on_disk).max(0) as usize;
            if end > external.len() {
                return Err(ReshapeError::malformed_tail(
                    "mip's external bulk-data range is out of bounds".to_string(),
                )
                .into());
            }

            mip.bulk_data = MipBulkData::Legacy {
                flags: (*flags & !BULKDATA_PAYLOAD_IN_SEPARATE_FILE) | BULKDATA_FORCE_INLINE_PAYLOAD,
                element_count: *element_count,
                size_on_disk: *size_on_disk,
                offset_in_file: 0,
                inline_data: Some(external[start..end].to_vec()),
            };
            Ok(())
        }
    }
}

/// Writes one mip following the non-obvious order the consumer expects: the
/// mip header first, then its pixel data, then dimensions.
fn write_inline_mip(out: &mut Vec<u8>, mip: &MipRecord) {
    match &mip.bulk_data {
        MipBulkData::ResourceIndex(index) => {
            out.write_u32::<LE>(*index).expect("writing to Vec never fails");
        }
        MipBulkData::Legacy {
            flags,
            element_count,
            size_on_disk,
            offset_in_file,
            inline_data,
        } => {
            out.write_u32::<LE>(*flags).expect("writing to Vec never fails");
            out.write_i32::<LE>(*element_count).expect("writing to Vec never fails");
            out.write_i64::<LE>(*size_on_disk).expect("writing to Vec never fails");
            out.write_i64::<LE>(*offset_in_file).expect("writing to Vec never fails");
            if let Some(data) = inline_data {
                out.extend_from_slice(data);
            }
        }
    }

    out.write_u32::<LE>(mip.size_x).expect("writing to Vec never fails");
    out.write_u32::<LE>(mip.size_y).expect("writing to Vec never fails");
    out.write_u32::<LE>(mip.size_z).expect("writing to Vec never fails");
}

fn read_ascii_string(cursor: &mut std::io::Cursor<&[u8]>) -> Result<String, Error> {
    use std::io::Read;

    let len = cursor
        .read_i32::<LE>()
        .map_err(|e| ReshapeError::malformed_tail(e.to_string()))?;
    if len <= 0 {
        return Err(ReshapeError::malformed_tail(format!(
            "expected an ASCII pixel format name, got length {len}"
        ))
        .into());
    }
    let mut buf = vec![0u8; len as usize - 1];
    cursor
        .read_exact(&mut buf)
        .map_err(|e| ReshapeError::malformed_tail(e.to_string()))?;
    cursor
        .read_u8()
        .map_err(|e| ReshapeError::malformed_tail(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| ReshapeError::malformed_tail(e.to_string()).into())
}

fn write_ascii_string(out: &mut Vec<u8>, value: &str) {
    out.write_i32::<LE>(value.len() as i32 + 1)
        .expect("writing to Vec never fails");
    out.extend_from_slice(value.as_bytes());
    out.push(0);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front_matter() -> FrontMatter {
        FrontMatter {
            class_name: "Texture2D".to_string(),
            object_name: "T_Mat_BaseColor".to_string(),
            package_path: "/game/textures/t_mat_basecolor".to_string(),
        }
    }

    fn encode_pixel_format(name: &str) -> Vec<u8> {
        let mut out = Vec::new();
        write_ascii_string(&mut out, name);
        out
    }

    fn build_mip(flags: u32, pixels: &[u8], size_x: u32, size_y: u32) -> Vec<u8> {
        let mut out = Vec::new();
        out.write_u32::<LE>(flags).unwrap();
        out.write_i32::<LE>(pixels.len() as i32).unwrap();
        out.write_i64::<LE>(pixels.len() as i64).unwrap();
        out.write_i64::<LE>(0).unwrap();
        if flags & BULKDATA_FORCE_INLINE_PAYLOAD != 0 {
            out.extend_from_slice(pixels);
        }
        out.write_u32::<LE>(size_x).unwrap();
        out.write_u32::<LE>(size_y).unwrap();
        out.write_u32::<LE>(1).unwrap();
        out
    }

    fn build_texture_tail(mip_count: i32, mips: &[Vec<u8>]) -> Vec<u8> {
        let mut tail = vec![0u8; 4]; // 16-byte placeholder: 4 bytes of leading padding
        tail.extend_from_slice(&64u32.to_le_bytes());
        tail.extend_from_slice(&64u32.to_le_bytes());
        tail.extend_from_slice(&0u32.to_le_bytes());

        tail.extend(encode_pixel_format("PF_DXT5"));
        tail.extend_from_slice(&0i32.to_le_bytes()); // firstMipToSerialize
        tail.extend_from_slice(&mip_count.to_le_bytes());
        for mip in mips {
            tail.extend_from_slice(mip);
        }
        tail.extend_from_slice(&0x9E2A83C1u32.to_be_bytes());
        tail
    }

    #[test]
    fn probes_16_byte_placeholder() {
        let tail = build_texture_tail(1, &[build_mip(BULKDATA_FORCE_INLINE_PAYLOAD, &[1, 2, 3, 4], 64, 64)]);
        let (len, size_x, size_y, packed) = probe_placeholder(&tail).unwrap();
        assert_eq!(len, 16);
        assert_eq!(size_x, 64);
        assert_eq!(size_y, 64);
        assert_eq!(packed, 0);
    }

    #[test]
    fn strip_keeps_exactly_one_mip() {
        let mips = vec![
            build_mip(BULKDATA_FORCE_INLINE_PAYLOAD, &vec![0xAB; 16], 64, 64),
            build_mip(BULKDATA_FORCE_INLINE_PAYLOAD, &vec![0xCD; 4], 32, 32),
        ];
        let tail = build_texture_tail(2, &mips);
        let ctx = ReshapeContext::default();

        let output = reshape(&tail, &front_matter(), &ctx).unwrap();

        let mut cursor = std::io::Cursor::new(&output.tail[16..]);
        let _pixel_format = read_ascii_string(&mut cursor).unwrap();
        let first_mip = cursor.read_i32::<LE>().unwrap();
        let mip_count = cursor.read_i32::<LE>().unwrap();
        assert_eq!(first_mip, 0);
        assert_eq!(mip_count, 1);
        assert!(output.tail.ends_with(&0x9E2A83C1u32.to_be_bytes()));
    }

    #[test]
    fn rejects_unsane_dimensions() {
        let mut tail = vec![0u8; 16];
        tail[4..8].copy_from_slice(&3u32.to_le_bytes()); // not a power of two
        assert!(probe_placeholder(&tail).is_err());
    }
}
