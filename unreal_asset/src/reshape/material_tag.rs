//! `MaterialTagAssetUserData` reshaper: normalizes the three serialized
//! shapes this plugin's user-data export has shipped with into a single
//! `{slotIndex → tagNames[]}` view other reshapers (namely
//! [`super::skeletal_mesh`]) can query.
//!
//! The export's own tail is left untouched by this reshaper; what changes
//! on emit is the *import table* entry this export's class resolves
//! through (`/Script/MaterialTagPlugin.*` → `/Script/Engine.*`), which is
//! package-level state handled by the Zen package builder, not here.

use byteorder::{ReadBytesExt, LE};
use unreal_asset_base::error::{Error, ReshapeError};

use crate::reshape::{FrontMatter, ReshapeContext, ReshapeOutput};

/// Script-package reference this user-data class is retired under.
pub const RETIRED_SCRIPT_PACKAGE: &str = "/Script/MaterialTagPlugin";
/// Its runtime replacement.
pub const REPLACEMENT_SCRIPT_PACKAGE: &str = "/Script/Engine";

/// Slot-indexed gameplay tags, normalized from any of the three shapes
/// [`parse`] recognizes.
#[derive(Debug, Clone, Default)]
pub struct MaterialTags(Vec<Vec<String>>);

impl MaterialTags {
    /// Tags for material slot `index`, if the export has any.
    pub fn slot(&self, index: usize) -> Option<&Vec<String>> {
        self.0.get(index)
    }
}

/// Shape tags observed across the game's content history. A one-byte
/// discriminant precedes the payload.
const SHAPE_FLAT_ARRAY: u8 = 0;
const SHAPE_INDEXED_MAP: u8 = 1;
const SHAPE_INDEXED_MAP_WITH_GAMEPLAY_TAG_WRAPPER: u8 = 2;

/// Parses a `MaterialTagAssetUserData` export's tail into `{slot → tags[]}`.
pub fn parse(tail: &[u8]) -> Result<MaterialTags, Error> {
    let mut cursor = std::io::Cursor::new(tail);
    let shape = cursor
        .read_u8()
        .map_err(|e| ReshapeError::malformed_tail(e.to_string()))?;

    match shape {
        SHAPE_FLAT_ARRAY => parse_flat_array(&mut cursor),
        SHAPE_INDEXED_MAP => parse_indexed_map(&mut cursor, false),
        SHAPE_INDEXED_MAP_WITH_GAMEPLAY_TAG_WRAPPER => parse_indexed_map(&mut cursor, true),
        other => Err(ReshapeError::malformed_tail(format!(
            "unknown MaterialTagAssetUserData shape tag {other}"
        ))
        .into()),
    }
}

/// Shape 0: `MaterialSlotTags[slotIndex] = tagNames[]`, positional.
fn parse_flat_array(cursor: &mut std::io::Cursor<&[u8]>) -> Result<MaterialTags, Error> {
    let slot_count = read_count(cursor)?;
    let mut slots = Vec::with_capacity(slot_count);
    for _ in 0..slot_count {
        slots.push(read_tag_list(cursor)?);
    }
    Ok(MaterialTags(slots))
}

/// Shapes 1/2: `{slotIndex: i32 → tagNames[]}`, possibly with each tag list
/// wrapped in an extra `FGameplayTagContainer`-style outer count.
fn parse_indexed_map(
    cursor: &mut std::io::Cursor<&[u8]>,
    wrapped: bool,
) -> Result<MaterialTags, Error> {
    let entry_count = read_count(cursor)?;
    let mut by_index = Vec::new();
    for _ in 0..entry_count {
        let slot_index = cursor
            .read_i32::<LE>()
            .map_err(|e| ReshapeError::malformed_tail(e.to_string()))? as usize;

        let tags = if wrapped {
            let _container_count = read_count(cursor)?;
            read_tag_list(cursor)?
        } else {
            read_tag_list(cursor)?
        };

        if by_index.len() <= slot_index {
            by_index.resize(slot_index + 1, Vec::new());
        }
        by_index[slot_index] = tags;
    }
    Ok(MaterialTags(by_index))
}

fn read_count(cursor: &mut std::io::Cursor<&[u8]>) -> Result<usize, Error> {
    let count = cursor
        .read_i32::<LE>()
        .map_err(|e| ReshapeError::malformed_tail(e.to_string()))?;
    if count < 0 {
        return Err(ReshapeError::malformed_tail(format!("negative count {count}")).into());
    }
    Ok(count as usize)
}

fn read_tag_list(cursor: &mut std::io::Cursor<&[u8]>) -> Result<Vec<String>, Error> {
    let tag_count = read_count(cursor)?;
    let mut tags = Vec::with_capacity(tag_count);
    for _ in 0..tag_count {
        tags.push(read_ascii_string(cursor)?);
    }
    Ok(tags)
}

/// Length-prefixed ASCII string per §4.A's primitive: a positive count is
/// `chars + 1`, followed by the ASCII bytes and a trailing NUL.
fn read_ascii_string(cursor: &mut std::io::Cursor<&[u8]>) -> Result<String, Error> {
    use std::io::Read;

    let len = cursor
        .read_i32::<LE>()
        .map_err(|e| ReshapeError::malformed_tail(e.to_string()))?;
    if len <= 0 {
        return Err(ReshapeError::malformed_tail(format!(
            "expected an ASCII tag name, got length {len}"
        ))
        .into());
    }

    let mut buf = vec![0u8; len as usize - 1];
    cursor
        .read_exact(&mut buf)
        .map_err(|e| ReshapeError::malformed_tail(e.to_string()))?;
    cursor
        .read_u8()
        .map_err(|e| ReshapeError::malformed_tail(e.to_string()))?; // trailing NUL

    String::from_utf8(buf).map_err(|e| ReshapeError::malformed_tail(e.to_string()).into())
}

/// Writes `s` in the length-prefixed ASCII form [`read_ascii_string`] reads
/// back: a positive `chars + 1` count, the ASCII bytes, then a trailing NUL.
pub(crate) fn write_ascii_string(out: &mut Vec<u8>, s: &str) {
    use byteorder::WriteBytesExt;

    out.write_i32::<LE>(s.len() as i32 + 1)
        .expect("writing to Vec never fails");
    out.extend_from_slice(s.as_bytes());
    out.push(0);
}

/// Validates that the export parses as one of the three known shapes and
/// passes its tail through unchanged; the emit-time script-package rewrite
/// (`/Script/MaterialTagPlugin.*` → `/Script/Engine.*`) happens against the
/// import table, not this export's own bytes.
pub fn reshape(
    tail: &[u8],
    front_matter: &FrontMatter,
    _ctx: &ReshapeContext,
) -> Result<ReshapeOutput, Error> {
    let normalized = crate::reshape::normalize_class_name(&front_matter.class_name);
    if normalized != "materialtagassetuserdata" {
        return Err(ReshapeError::wrong_class("material_tag", &front_matter.class_name).into());
    }

    parse(tail)?;

    Ok(ReshapeOutput {
        tail: tail.to_vec(),
        serial_size_delta: 0,
    })
}

/// Rewrites a script-package reference retired under [`RETIRED_SCRIPT_PACKAGE`]
/// to its [`REPLACEMENT_SCRIPT_PACKAGE`] equivalent, including the
/// `_C`/default-object variants. Used by the Zen package builder's import
/// map construction (§4.F step 3); a no-op for any other reference.
pub fn remap_script_package(qualified_name: &str) -> String {
    if let Some(rest) = qualified_name.strip_prefix(RETIRED_SCRIPT_PACKAGE) {
        format!("{REPLACEMENT_SCRIPT_PACKAGE}{rest}")
    } else {
        qualified_name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_ascii(s: &str) -> Vec<u8> {
        let mut out = (s.len() as i32 + 1).to_le_bytes().to_vec();
        out.extend_from_slice(s.as_bytes());
        out.push(0);
        out
    }

    #[test]
    fn parses_flat_array_shape() {
        let mut tail = vec![SHAPE_FLAT_ARRAY];
        tail.extend_from_slice(&1i32.to_le_bytes()); // 1 slot
        tail.extend_from_slice(&1i32.to_le_bytes()); // 1 tag
        tail.extend(encode_ascii("Armor.Heavy"));

        let tags = parse(&tail).unwrap();
        assert_eq!(tags.slot(0), Some(&vec!["Armor.Heavy".to_string()]));
    }

    #[test]
    fn parses_indexed_map_shape() {
        let mut tail = vec![SHAPE_INDEXED_MAP];
        tail.extend_from_slice(&1i32.to_le_bytes()); // 1 entry
        tail.extend_from_slice(&2i32.to_le_bytes()); // slot index 2
        tail.extend_from_slice(&1i32.to_le_bytes()); // 1 tag
        tail.extend(encode_ascii("Weapon.Ranged"));

        let tags = parse(&tail).unwrap();
        assert_eq!(tags.slot(2), Some(&vec!["Weapon.Ranged".to_string()]));
        assert_eq!(tags.slot(0), Some(&Vec::new()));
    }

    #[test]
    fn remaps_retired_script_package() {
        assert_eq!(
            remap_script_package("/Script/MaterialTagPlugin.MaterialTagAssetUserData"),
            "/Script/Engine.MaterialTagAssetUserData"
        );
        assert_eq!(
            remap_script_package("/Script/Engine.StaticMesh"),
            "/Script/Engine.StaticMesh"
        );
    }

    #[test]
    fn rejects_unknown_shape_tag() {
        assert!(parse(&[0xFF]).is_err());
    }
}
