//! Particle-system lookup table reshaper: reinterprets the `ShaderLUT`
//! tagged property as a flat `f32` array rather than a structured color
//! array, and applies per-channel/per-index/per-name edit operations.

use byteorder::{ReadBytesExt, WriteBytesExt, LE};
use unreal_asset_base::error::{Error, ReshapeError};

use crate::reshape::{FrontMatter, ReshapeContext, ReshapeOutput};

/// Color arity of a lookup table, selected by the owning export's class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LutArity {
    /// RGBA, 4 floats per entry.
    Rgba,
    /// XYZ, 3 floats per entry.
    Xyz,
    /// XY, 2 floats per entry.
    Xy,
    /// A single float per entry.
    Scalar,
}

impl LutArity {
    /// Number of `f32` channels per table entry.
    pub fn channel_count(self) -> usize {
        match self {
            LutArity::Rgba => 4,
            LutArity::Xyz => 3,
            LutArity::Xy => 2,
            LutArity::Scalar => 1,
        }
    }
}

/// One edit applied to a parsed lookup table.
#[derive(Debug, Clone)]
pub struct LutEdit {
    /// Channel mask; bit `c` set means channel `c` of every touched entry is edited.
    pub channel_mask: u8,
    /// Inclusive entry index range to apply the edit to.
    pub index_range: std::ops::RangeInclusive<usize>,
    /// Value every masked channel in the range is set to.
    pub value: f32,
}

/// A `ShaderLUT` parsed as a flat array of `arity.channel_count()`-wide entries.
#[derive(Debug, Clone)]
pub struct LookupTable {
    /// Channel arity this table was parsed with.
    pub arity: LutArity,
    /// Flat channel values, `entries.len() / arity.channel_count()` entries.
    pub channels: Vec<f32>,
}

impl LookupTable {
    /// Parses `data` (the raw `ShaderLUT` property payload: an `i32` element
    /// count followed by that many `f32`s) as a table of the given arity.
    pub fn parse(data: &[u8], arity: LutArity) -> Result<Self, Error> {
        let mut cursor = std::io::Cursor::new(data);
        let element_count = cursor
            .read_i32::<LE>()
            .map_err(|e| ReshapeError::malformed_tail(e.to_string()))?;
        if element_count < 0 {
            return Err(ReshapeError::malformed_tail(format!(
                "negative ShaderLUT element count {element_count}"
            ))
            .into());
        }

        let mut channels = Vec::with_capacity(element_count as usize);
        for _ in 0..element_count {
            channels.push(
                cursor
                    .read_f32::<LE>()
                    .map_err(|e| ReshapeError::malformed_tail(e.to_string()))?,
            );
        }

        if channels.len() % arity.channel_count() != 0 {
            return Err(ReshapeError::malformed_tail(format!(
                "ShaderLUT has {} floats, not a multiple of {:?}'s {} channels",
                channels.len(),
                arity,
                arity.channel_count()
            ))
            .into());
        }

        Ok(LookupTable { arity, channels })
    }

    /// Number of entries (`channels.len() / arity.channel_count()`).
    pub fn entry_count(&self) -> usize {
        self.channels.len() / self.arity.channel_count()
    }

    /// Applies `edit` in place, clamping the index range to the table's bounds.
    pub fn apply(&mut self, edit: &LutEdit) {
        let channel_count = self.arity.channel_count();
        let last_entry = self.entry_count().saturating_sub(1);
        let end = (*edit.index_range.end()).min(last_entry);

        for entry_index in *edit.index_range.start()..=end {
            for channel in 0..channel_count {
                if edit.channel_mask & (1 << channel) != 0 {
                    self.channels[entry_index * channel_count + channel] = edit.value;
                }
            }
        }
    }

    /// Serializes back to the `ShaderLUT` property's raw on-disk shape.
    pub fn write(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + self.channels.len() * 4);
        out.write_i32::<LE>(self.channels.len() as i32)
            .expect("writing to Vec never fails");
        for value in &self.channels {
            out.write_f32::<LE>(*value).expect("writing to Vec never fails");
        }
        out
    }
}

/// One edit operation plus the export names it's restricted to; `None`
/// applies it to every export of a matching class.
#[derive(Debug, Clone)]
pub struct LutEditSpec {
    /// Object names this edit applies to, matched case-insensitively.
    /// `None` means "every export of the reshaped class".
    pub name_filter: Option<&'static [&'static str]>,
    /// The edit to apply.
    pub edit: LutEdit,
}

impl LutEditSpec {
    fn applies_to(&self, object_name: &str) -> bool {
        match self.name_filter {
            Some(names) => names.iter().any(|name| name.eq_ignore_ascii_case(object_name)),
            None => true,
        }
    }
}

/// Selects a table's channel arity from its owning export's normalized class
/// name. Particle modules that bake a `ShaderLUT` use a fixed arity per
/// class: color-over-life tables are RGBA, velocity-over-life are XYZ,
/// size-over-life are XY, and sub-UV-over-life tables are a single scalar.
fn arity_for_class(normalized_class_name: &str) -> Option<LutArity> {
    match normalized_class_name {
        "particlemodulecoloroverlife" => Some(LutArity::Rgba),
        "particlemodulevelocityoverlife" => Some(LutArity::Xyz),
        "particlemodulesizescaleoverlife" => Some(LutArity::Xy),
        "particlemodulesubuvoverlife" => Some(LutArity::Scalar),
        _ => None,
    }
}

/// Reinterprets a `ShaderLUT` tagged property as a flat float array (arity
/// chosen from the export's class) and applies every matching edit from
/// `ctx.lut_edits` in order.
pub fn reshape(
    tail: &[u8],
    front_matter: &FrontMatter,
    ctx: &ReshapeContext,
) -> Result<ReshapeOutput, Error> {
    let normalized = crate::reshape::normalize_class_name(&front_matter.class_name);
    let arity = arity_for_class(&normalized)
        .ok_or_else(|| ReshapeError::wrong_class("particle_lut", &front_matter.class_name))?;

    let mut table = LookupTable::parse(tail, arity)?;

    for spec in ctx.lut_edits {
        if spec.applies_to(&front_matter.object_name) {
            table.apply(&spec.edit);
        }
    }

    Ok(ReshapeOutput::new(tail.len(), table.write()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(values: &[f32]) -> Vec<u8> {
        let mut out = (values.len() as i32).to_le_bytes().to_vec();
        for v in values {
            out.extend_from_slice(&v.to_le_bytes());
        }
        out
    }

    #[test]
    fn parses_rgba_table() {
        let data = encode(&[1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
        let table = LookupTable::parse(&data, LutArity::Rgba).unwrap();
        assert_eq!(table.entry_count(), 2);
    }

    #[test]
    fn rejects_arity_mismatch() {
        let data = encode(&[1.0, 0.0, 0.0]);
        assert!(LookupTable::parse(&data, LutArity::Rgba).is_err());
    }

    #[test]
    fn channel_mask_edit_applies_only_to_masked_channels() {
        let data = encode(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
        let mut table = LookupTable::parse(&data, LutArity::Rgba).unwrap();
        table.apply(&LutEdit {
            channel_mask: 0b1000, // alpha only
            index_range: 0..=1,
            value: 0.5,
        });
        assert_eq!(table.channels, vec![1.0, 1.0, 1.0, 0.5, 1.0, 1.0, 1.0, 0.5]);
    }

    #[test]
    fn round_trips_through_write() {
        let data = encode(&[0.1, 0.2, 0.3, 0.4]);
        let table = LookupTable::parse(&data, LutArity::Rgba).unwrap();
        assert_eq!(table.write(), data);
    }

    fn front_matter(class_name: &str, object_name: &str) -> FrontMatter {
        FrontMatter {
            class_name: class_name.to_string(),
            object_name: object_name.to_string(),
            package_path: "/game/fx/p_explosion".to_string(),
        }
    }

    #[test]
    fn reshape_dispatches_arity_by_class() {
        let data = encode(&[1.0, 0.0, 0.0, 1.0]);
        let ctx = ReshapeContext::default();
        let output = reshape(&data, &front_matter("ParticleModuleColorOverLife", "Color0"), &ctx).unwrap();
        assert_eq!(output.tail, data);
        assert_eq!(output.serial_size_delta, 0);
    }

    #[test]
    fn reshape_rejects_an_unrecognized_class() {
        let data = encode(&[1.0]);
        let ctx = ReshapeContext::default();
        assert!(reshape(&data, &front_matter("ParticleModuleRequired", "Req0"), &ctx).is_err());
    }

    #[test]
    fn reshape_applies_only_name_filtered_edits_to_matching_exports() {
        let data = encode(&[1.0, 1.0]);
        let edits = [
            LutEditSpec {
                name_filter: Some(&["Size0"]),
                edit: LutEdit {
                    channel_mask: 0b11,
                    index_range: 0..=0,
                    value: 0.25,
                },
            },
            LutEditSpec {
                name_filter: Some(&["Size1"]),
                edit: LutEdit {
                    channel_mask: 0b11,
                    index_range: 0..=0,
                    value: 0.75,
                },
            },
        ];
        let ctx = ReshapeContext {
            lut_edits: &edits,
            ..ReshapeContext::default()
        };

        let matched = reshape(&data, &front_matter("ParticleModuleSizeScaleOverLife", "Size0"), &ctx).unwrap();
        let table = LookupTable::parse(&matched.tail, LutArity::Xy).unwrap();
        assert_eq!(table.channels, vec![0.25, 0.25]);

        let unmatched = reshape(&data, &front_matter("ParticleModuleSizeScaleOverLife", "Size2"), &ctx).unwrap();
        let table = LookupTable::parse(&unmatched.tail, LutArity::Xy).unwrap();
        assert_eq!(table.channels, vec![1.0, 1.0]);
    }
}
