//! `SkeletalMesh` reshaper: injects an empty gameplay-tag container after
//! each material slot, growing every `FSkeletalMaterial` record from 40 to
//! 44 bytes, and fills it in from a sibling `MaterialTagAssetUserData`
//! export when one is present.

use byteorder::{ReadBytesExt, WriteBytesExt, LE};
use unreal_asset_base::error::{Error, ReshapeError};

use crate::reshape::material_tag::{self, MaterialTags};
use crate::reshape::{FrontMatter, ReshapeContext, ReshapeOutput};

/// Serialized size of one legacy `FSkeletalMaterial` record, before injection.
const SKELETAL_MATERIAL_SLOT_SIZE: usize = 40;

/// Size in bytes of the gameplay-tag container injected after a slot with no
/// matching tags (just the `count = 0` field).
const EMPTY_TAG_CONTAINER_SIZE: usize = 4;

/// Parses strip-flags, bounds, and the `FSkeletalMaterial[]` array, then
/// rewrites it with a gameplay-tag container appended to every slot.
pub fn reshape(
    tail: &[u8],
    front_matter: &FrontMatter,
    ctx: &ReshapeContext,
) -> Result<ReshapeOutput, Error> {
    let normalized = crate::reshape::normalize_class_name(&front_matter.class_name);
    if normalized != "skeletalmesh" {
        return Err(ReshapeError::wrong_class("skeletal_mesh", &front_matter.class_name).into());
    }

    let mut cursor = std::io::Cursor::new(tail);

    // strip-flags + bounds precede the material array and are copied verbatim
    let strip_flags = cursor
        .read_u32::<LE>()
        .map_err(|e| ReshapeError::malformed_tail(e.to_string()))?;
    let mut bounds = [0u8; 16];
    std::io::Read::read_exact(&mut cursor, &mut bounds)
        .map_err(|e| ReshapeError::malformed_tail(e.to_string()))?;

    let slot_count = cursor
        .read_i32::<LE>()
        .map_err(|e| ReshapeError::malformed_tail(e.to_string()))?;
    if slot_count < 0 {
        return Err(ReshapeError::malformed_tail(format!(
            "negative FSkeletalMaterial count {slot_count}"
        ))
        .into());
    }

    let header_len = cursor.position() as usize;
    let array_len = slot_count as usize * SKELETAL_MATERIAL_SLOT_SIZE;
    if header_len + array_len > tail.len() {
        return Err(ReshapeError::malformed_tail(format!(
            "FSkeletalMaterial array of {slot_count} slots needs {array_len} bytes, only {} remain",
            tail.len() - header_len
        ))
        .into());
    }

    let tags = find_material_tags(ctx).unwrap_or_default();

    let mut out = Vec::with_capacity(tail.len() + slot_count as usize * EMPTY_TAG_CONTAINER_SIZE);
    out.write_u32::<LE>(strip_flags).expect("writing to Vec never fails");
    out.extend_from_slice(&bounds);
    out.write_i32::<LE>(slot_count).expect("writing to Vec never fails");

    for slot_index in 0..slot_count as usize {
        let start = header_len + slot_index * SKELETAL_MATERIAL_SLOT_SIZE;
        let slot = &tail[start..start + SKELETAL_MATERIAL_SLOT_SIZE];
        out.extend_from_slice(slot);

        let slot_tags = tags.slot(slot_index).map(Vec::as_slice).unwrap_or(&[]);
        out.write_u32::<LE>(slot_tags.len() as u32)
            .expect("writing to Vec never fails");
        for tag in slot_tags {
            material_tag::write_ascii_string(&mut out, tag);
        }
    }

    let remainder_start = header_len + array_len;
    out.extend_from_slice(&tail[remainder_start..]);

    Ok(ReshapeOutput::new(tail.len(), out))
}

/// Finds a sibling `MaterialTagAssetUserData` export and parses its slot tags.
fn find_material_tags(ctx: &ReshapeContext) -> Option<MaterialTags> {
    ctx.sibling_exports.iter().find_map(|(object_name, data)| {
        if !object_name.to_lowercase().contains("materialtag") {
            return None;
        }
        material_tag::parse(data).ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front_matter() -> FrontMatter {
        FrontMatter {
            class_name: "SkeletalMesh".to_string(),
            object_name: "SK_Hero".to_string(),
            package_path: "/game/characters/sk_hero".to_string(),
        }
    }

    fn build_tail(slot_count: i32) -> Vec<u8> {
        let mut tail = Vec::new();
        tail.extend_from_slice(&0u32.to_le_bytes());
        tail.extend(std::iter::repeat(0u8).take(16));
        tail.extend_from_slice(&slot_count.to_le_bytes());
        tail.extend(std::iter::repeat(0xABu8).take(slot_count as usize * SKELETAL_MATERIAL_SLOT_SIZE));
        tail.extend_from_slice(b"trailer");
        tail
    }

    #[test]
    fn grows_each_slot_by_four_bytes() {
        let tail = build_tail(5);
        let ctx = ReshapeContext::default();
        let output = reshape(&tail, &front_matter(), &ctx).unwrap();

        assert_eq!(output.serial_size_delta, 5 * EMPTY_TAG_CONTAINER_SIZE as i64);
        assert_eq!(output.tail.len(), tail.len() + 5 * EMPTY_TAG_CONTAINER_SIZE);
        assert!(output.tail.ends_with(b"trailer"));
    }

    #[test]
    fn empty_tag_container_is_zero_count() {
        let tail = build_tail(1);
        let ctx = ReshapeContext::default();
        let output = reshape(&tail, &front_matter(), &ctx).unwrap();

        let tag_count_offset = 4 + 16 + 4 + SKELETAL_MATERIAL_SLOT_SIZE;
        let tag_count = u32::from_le_bytes(
            output.tail[tag_count_offset..tag_count_offset + 4]
                .try_into()
                .unwrap(),
        );
        assert_eq!(tag_count, 0);
    }

    fn encode_ascii(s: &str) -> Vec<u8> {
        let mut out = (s.len() as i32 + 1).to_le_bytes().to_vec();
        out.extend_from_slice(s.as_bytes());
        out.push(0);
        out
    }

    /// Builds a `MaterialTagAssetUserData` flat-array shaped tail with one
    /// tag, `Armor.Heavy`, on slot 0.
    fn material_tag_sibling() -> Vec<u8> {
        let mut tail = vec![0]; // SHAPE_FLAT_ARRAY
        tail.extend_from_slice(&1i32.to_le_bytes()); // 1 slot
        tail.extend_from_slice(&1i32.to_le_bytes()); // 1 tag
        tail.extend(encode_ascii("Armor.Heavy"));
        tail
    }

    #[test]
    fn filled_tag_container_writes_the_tag_payload_after_the_count() {
        let tail = build_tail(1);
        let sibling = material_tag_sibling();
        let ctx = ReshapeContext {
            sibling_exports: &[("MaterialTagData_Hero", &sibling)],
            ..ReshapeContext::default()
        };
        let output = reshape(&tail, &front_matter(), &ctx).unwrap();

        let tag_count_offset = 4 + 16 + 4 + SKELETAL_MATERIAL_SLOT_SIZE;
        let mut cursor = std::io::Cursor::new(&output.tail[tag_count_offset..]);
        let tag_count = cursor.read_u32::<LE>().unwrap();
        assert_eq!(tag_count, 1);

        let name_len = cursor.read_i32::<LE>().unwrap();
        assert_eq!(name_len, "Armor.Heavy".len() as i32 + 1);
        let mut name_buf = vec![0u8; name_len as usize - 1];
        std::io::Read::read_exact(&mut cursor, &mut name_buf).unwrap();
        assert_eq!(String::from_utf8(name_buf).unwrap(), "Armor.Heavy");

        assert!(output.tail.ends_with(b"trailer"));
    }
}
