//! Hashing helpers used for FName and package path comparisons.
//!
//! The engine stores most names case-insensitively: two `FName`s that only
//! differ in case refer to the same entry. To support this, name batches that
//! use the `CityHash64` hash version hash a lowercased, UTF-16LE encoding of
//! the string rather than the raw UTF-8 bytes.

use naive_cityhash::cityhash64;

/// Lowercase a string the way the engine does for name hashing purposes.
///
/// Unreal only lowercases the ASCII range when computing these hashes, so we
/// mirror that instead of using a locale-aware lowercase.
pub fn to_lower_string(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Encode a string as UTF-16LE bytes, the wire representation the engine
/// hashes wide strings as.
fn to_utf16le_bytes(value: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(value.len() * 2);
    for unit in value.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}

/// Hash a string the way `PackageId::from_name` and CityHash64 name batches
/// do: lowercase, UTF-16LE encode, then CityHash64.
pub fn cityhash64_to_lower(value: &str) -> u64 {
    let lower = to_lower_string(value);
    cityhash64(&to_utf16le_bytes(&lower))
}

/// Hash a string preserving case, UTF-16LE encoded. Used for the
/// case-preserving hash column of a CityHash64 name batch.
pub fn case_preserving_hash(value: &str) -> u64 {
    cityhash64(&to_utf16le_bytes(value))
}

/// Hash a string after lowercasing it, UTF-16LE encoded. Used for the
/// non-case-preserving hash column of a CityHash64 name batch.
pub fn non_case_preserving_hash(value: &str) -> u64 {
    cityhash64_to_lower(value)
}

/// CRC32 table used by `generate_hash`, matching `FCrc::MemCrc32`'s polynomial.
const CRC_TABLE: [u32; 256] = generate_crc_table();

const fn generate_crc_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut j = 0;
        while j < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ 0xEDB88320
            } else {
                crc >> 1
            };
            j += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Compute the legacy `FCrc::StrCrc32` hash of an FName, as used by the
/// non-versioned legacy name table hash column.
///
/// Hashes a lowercased, UTF-16LE encoding of the string, one `u16` code unit
/// at a time (matching the engine, which treats `TCHAR` as 2 bytes).
pub fn generate_hash(value: &str) -> u32 {
    let lower = to_lower_string(value);
    let mut crc = 0xFFFFFFFFu32;

    for unit in lower.encode_utf16() {
        let bytes = unit.to_le_bytes();
        for byte in bytes {
            let index = ((crc ^ byte as u32) & 0xFF) as usize;
            crc = (crc >> 8) ^ CRC_TABLE[index];
        }
    }

    !crc
}

/// Compute the hash used to key an asset registry's import object path map.
///
/// This is the case-insensitive `CityHash64` of the full object path.
pub fn generate_import_hash_from_object_path(object_path: &str) -> u64 {
    cityhash64_to_lower(object_path)
}

/// Replace every non-ASCII byte of `value` with `?` (0x3F), the substitution
/// a Zen name batch uses when it can only carry ASCII bytes.
pub fn to_ascii_lossy(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii() { c } else { '?' })
        .collect()
}

/// Hash a name the way a Zen (IoStore) name batch does: lowercase, ASCII-only
/// (non-ASCII replaced with `?`), then `CityHash64` over the raw bytes — no
/// UTF-16 widening, unlike [`cityhash64_to_lower`].
pub fn cityhash64_ascii_lower(value: &str) -> u64 {
    let ascii = to_ascii_lossy(value);
    let lower = to_lower_string(&ascii);
    cityhash64(lower.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_lower_only_affects_ascii() {
        assert_eq!(to_lower_string("FooBAR"), "foobar");
    }

    #[test]
    fn cityhash64_to_lower_is_case_insensitive() {
        assert_eq!(cityhash64_to_lower("Texture2D"), cityhash64_to_lower("texture2d"));
        assert_ne!(cityhash64_to_lower("Texture2D"), cityhash64_to_lower("StaticMesh"));
    }

    #[test]
    fn case_preserving_hash_differs_by_case() {
        assert_ne!(case_preserving_hash("Foo"), case_preserving_hash("foo"));
    }

    #[test]
    fn ascii_lossy_replaces_non_ascii() {
        assert_eq!(to_ascii_lossy("Café"), "Caf?");
    }

    #[test]
    fn cityhash64_ascii_lower_is_case_insensitive_and_ascii_only() {
        assert_eq!(
            cityhash64_ascii_lower("/Game/Foo/Bar"),
            cityhash64_ascii_lower("/game/foo/bar")
        );
        // Differs from the UTF-16LE variant: same text, different byte widths hashed.
        assert_ne!(
            cityhash64_ascii_lower("/Game/Foo/Bar"),
            cityhash64_to_lower("/Game/Foo/Bar")
        );
    }
}
