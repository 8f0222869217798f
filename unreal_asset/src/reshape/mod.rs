//! Binary patches applied to a fixed set of export classes while converting
//! between the legacy and Zen package formats.
//!
//! Every reshaper is a pure function over an export's tail bytes (the part
//! of its serialized payload following the tagged-property "front matter");
//! dispatch happens by table lookup on the export's normalized class name,
//! not by inheritance, so adding a class never touches the callers in
//! [`crate::iostore::zen_writer`] or the legacy reader.

pub mod material_tag;
pub mod particle_lut;
pub mod skeletal_mesh;
pub mod static_mesh;
pub mod texture;

use unreal_asset_base::error::Error;

/// The subset of an export's parsed front matter a reshaper needs: enough to
/// recognize the export and look up cross-referenced exports, without giving
/// the reshaper access to package-level state it shouldn't mutate directly.
#[derive(Debug, Clone)]
pub struct FrontMatter {
    /// The export's resolved class name, e.g. `Texture2D`.
    pub class_name: String,
    /// The export's object name, e.g. `T_Mat_BaseColor`.
    pub object_name: String,
    /// Lowercased package path the export belongs to, e.g. `/game/foo/bar`.
    pub package_path: String,
}

/// Read-only context a reshaper may consult beyond its own export's tail.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReshapeContext<'a> {
    /// Tails of every other export in the same package, by object name.
    /// Used by [`skeletal_mesh`] to find a companion `MaterialTagAssetUserData`.
    pub sibling_exports: &'a [(&'a str, &'a [u8])],
    /// Raw contents of the optional external bulk file, if one was supplied.
    pub external_bulk: Option<&'a [u8]>,
    /// Whether mip bulk data headers in this package use the modern 4-byte
    /// data-resource index form rather than the legacy inline/flags form.
    pub uses_bulk_data_resources: bool,
    /// Channel-mask/index-range/name-filter edits [`particle_lut`] applies to
    /// every `ShaderLUT` export it reshapes, in order.
    pub lut_edits: &'a [particle_lut::LutEditSpec],
}

/// Result of reshaping one export's tail bytes.
#[derive(Debug, Clone)]
pub struct ReshapeOutput {
    /// The export's new tail bytes.
    pub tail: Vec<u8>,
    /// `new_tail.len() as i64 - old_tail.len() as i64`, so the caller can
    /// adjust `cookedSerialSize` (and, for the last export, the export map
    /// entry) without the reshaper touching package state itself.
    pub serial_size_delta: i64,
}

impl ReshapeOutput {
    fn new(original_len: usize, tail: Vec<u8>) -> Self {
        let serial_size_delta = tail.len() as i64 - original_len as i64;
        ReshapeOutput {
            tail,
            serial_size_delta,
        }
    }

    /// An output that leaves the tail untouched, used for classes with no
    /// registered reshaper (§4.D's "Blob passthrough").
    fn passthrough(tail: &[u8]) -> Self {
        ReshapeOutput {
            tail: tail.to_vec(),
            serial_size_delta: 0,
        }
    }
}

/// Signature every reshaper in the dispatch table implements.
pub type ReshapeFn = fn(&[u8], &FrontMatter, &ReshapeContext) -> Result<ReshapeOutput, Error>;

/// Class name → reshaper, keyed by normalized (lowercased, script-prefix
/// stripped) class name. Extendable by callers linking against this crate
/// directly; not a runtime plugin system.
pub const RESHAPE_TABLE: &[(&str, ReshapeFn)] = &[
    ("texture2d", texture::reshape),
    ("texturecube", texture::reshape),
    ("skeletalmesh", skeletal_mesh::reshape),
    ("staticmesh", static_mesh::reshape),
    ("materialtagassetuserdata", material_tag::reshape),
    ("particlemodulecoloroverlife", particle_lut::reshape),
    ("particlemodulevelocityoverlife", particle_lut::reshape),
    ("particlemodulesizescaleoverlife", particle_lut::reshape),
    ("particlemodulesubuvoverlife", particle_lut::reshape),
];

/// Strips an optional `/Script/Package.` prefix and lowercases, matching how
/// class names are looked up against [`RESHAPE_TABLE`].
pub fn normalize_class_name(class_name: &str) -> String {
    let short_name = class_name.rsplit('.').next().unwrap_or(class_name);
    short_name.to_lowercase()
}

/// Reshapes one export's tail bytes. Classes with no registered reshaper
/// pass through unchanged, preserving round-trip identity (spec property 2).
pub fn reshape_export(
    tail: &[u8],
    front_matter: &FrontMatter,
    ctx: &ReshapeContext,
) -> Result<ReshapeOutput, Error> {
    let normalized = normalize_class_name(&front_matter.class_name);

    match RESHAPE_TABLE.iter().find(|(name, _)| *name == normalized) {
        Some((_, reshape_fn)) => reshape_fn(tail, front_matter, ctx),
        None => Ok(ReshapeOutput::passthrough(tail)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_class_passes_through() {
        let front_matter = FrontMatter {
            class_name: "SoundWave".to_string(),
            object_name: "Explosion01".to_string(),
            package_path: "/game/sfx/explosion01".to_string(),
        };
        let tail = vec![1, 2, 3, 4, 5];
        let ctx = ReshapeContext::default();

        let output = reshape_export(&tail, &front_matter, &ctx).unwrap();
        assert_eq!(output.tail, tail);
        assert_eq!(output.serial_size_delta, 0);
    }

    #[test]
    fn normalize_strips_script_prefix() {
        assert_eq!(normalize_class_name("/Script/Engine.StaticMesh"), "staticmesh");
        assert_eq!(normalize_class_name("Texture2D"), "texture2d");
    }
}
