//! Path hashing for the companion archive's index tables.

/// FNV-1a-64 over `data`, seeded the same way `IoChunkId::hash` seeds it:
/// a nonzero seed replaces the usual FNV offset basis outright.
fn fnv64(seed: u64, data: &[u8]) -> u64 {
    let mut hash = match seed {
        0 => 0xcbf29ce484222325,
        _ => seed,
    };
    for byte in data {
        hash = hash.overflowing_mul(0x00000100000001B3).0 ^ *byte as u64;
    }
    hash
}

/// Hashes `path` the way the companion archive's path-hash and
/// full-directory index tables do: lowercase, UTF-16LE, FNV-1a-64 with `seed`.
pub fn hash_path(path: &str, seed: u64) -> u64 {
    let lower = path.to_lowercase();
    let mut bytes = Vec::with_capacity(lower.len() * 2);
    for unit in lower.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    fnv64(seed, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_zero_uses_fnv_offset_basis() {
        // an empty path with seed 0 degenerates to the bare FNV offset basis
        assert_eq!(hash_path("", 0), 0xcbf29ce484222325);
    }

    #[test]
    fn is_case_insensitive() {
        assert_eq!(hash_path("Game/Foo.uasset", 0), hash_path("game/foo.uasset", 0));
    }

    #[test]
    fn nonzero_seed_changes_result() {
        assert_ne!(hash_path("game/foo.uasset", 0), hash_path("game/foo.uasset", 1));
    }
}
