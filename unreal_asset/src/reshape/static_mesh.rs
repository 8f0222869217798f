//! `StaticMesh` reshaper: parses the `FStaticMaterial[]` array far enough to
//! validate it, but performs no injection — static mesh material slots are
//! already 36 bytes wide and need no gameplay-tag container.

use byteorder::{ReadBytesExt, LE};
use unreal_asset_base::error::{Error, ReshapeError};

use crate::reshape::{FrontMatter, ReshapeContext, ReshapeOutput};

/// Serialized size in bytes of one `FStaticMaterial` record.
const STATIC_MATERIAL_SLOT_SIZE: usize = 36;

/// Validates the `FStaticMaterial[]` array at the start of `tail` and
/// returns the export unchanged (static mesh slots need no reshaping).
pub fn reshape(
    tail: &[u8],
    front_matter: &FrontMatter,
    _ctx: &ReshapeContext,
) -> Result<ReshapeOutput, Error> {
    let normalized = crate::reshape::normalize_class_name(&front_matter.class_name);
    if normalized != "staticmesh" {
        return Err(ReshapeError::wrong_class("static_mesh", &front_matter.class_name).into());
    }

    let mut cursor = std::io::Cursor::new(tail);
    let slot_count = cursor
        .read_i32::<LE>()
        .map_err(|e| ReshapeError::malformed_tail(e.to_string()))?;

    if slot_count < 0 {
        return Err(ReshapeError::malformed_tail(format!(
            "negative FStaticMaterial count {slot_count}"
        ))
        .into());
    }

    let array_bytes = slot_count as usize * STATIC_MATERIAL_SLOT_SIZE;
    let consumed = 4 + array_bytes;
    if consumed > tail.len() {
        return Err(ReshapeError::malformed_tail(format!(
            "FStaticMaterial array of {slot_count} slots needs {array_bytes} bytes, only {} remain",
            tail.len() - 4
        ))
        .into());
    }

    Ok(ReshapeOutput {
        tail: tail.to_vec(),
        serial_size_delta: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front_matter() -> FrontMatter {
        FrontMatter {
            class_name: "StaticMesh".to_string(),
            object_name: "SM_Cube".to_string(),
            package_path: "/game/meshes/sm_cube".to_string(),
        }
    }

    #[test]
    fn leaves_well_formed_array_untouched() {
        let mut tail = Vec::new();
        tail.extend_from_slice(&2i32.to_le_bytes());
        tail.extend(std::iter::repeat(0u8).take(2 * STATIC_MATERIAL_SLOT_SIZE));
        tail.extend_from_slice(b"trailing");

        let ctx = ReshapeContext::default();
        let output = reshape(&tail, &front_matter(), &ctx).unwrap();
        assert_eq!(output.tail, tail);
        assert_eq!(output.serial_size_delta, 0);
    }

    #[test]
    fn rejects_truncated_array() {
        let mut tail = Vec::new();
        tail.extend_from_slice(&2i32.to_le_bytes());
        tail.extend(std::iter::repeat(0u8).take(STATIC_MATERIAL_SLOT_SIZE));

        let ctx = ReshapeContext::default();
        assert!(reshape(&tail, &front_matter(), &ctx).is_err());
    }

    #[test]
    fn rejects_wrong_class() {
        let front_matter = FrontMatter {
            class_name: "SkeletalMesh".to_string(),
            ..front_matter()
        };
        let ctx = ReshapeContext::default();
        assert!(reshape(&[0, 0, 0, 0], &front_matter, &ctx).is_err());
    }
}
