//! Companion index archive (spec §4.J).
//!
//! This is a format distinct from the legacy versioned `.pak` reader/writer
//! in [`crate::pakfile`] (which stops, correctly, at
//! [`crate::pakversion::PakVersion::PakFileVersionPathHashIndex`] with
//! [`PakError::pak_version_unsupported`]). A companion archive always
//! serializes exactly one store entry, `chunknames`, whose body is the
//! newline-separated list of asset-relative paths an IoStore container
//! holds; its footer and index tables use a dedicated magic, a fixed
//! version, and FNV-1a-64 path hashing rather than the legacy format's
//! per-entry SHA1 headers.

mod entry;
mod footer;
pub mod hash;
mod index;

use std::io::{Cursor, Read, Seek, SeekFrom, Write};

use aes::{
    cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit},
    Aes256,
};

use crate::compression::CompressionMethods;
use crate::error::PakError;

use entry::EncodedEntry;
use footer::{CompanionFooter, COMPANION_FOOTER_SIZE};
use index::IndexTables;

/// Name of the single entry every companion archive carries.
pub const CHUNKNAMES_ENTRY: &str = "chunknames";

/// AES-256 key used for the legacy-archive encryption flavor (§4.A), already
/// reversed per 4-byte sub-chunk the way [`parse_key_hex`] produces it.
pub type EncryptionKey = [u8; 32];

/// Parses a 64-character hex AES key into its legacy-archive form: every
/// 4-byte sub-chunk of the raw key bytes is reversed during parse (§4.A).
pub fn parse_key_hex(hex: &str) -> Result<EncryptionKey, PakError> {
    if hex.len() != 64 {
        return Err(PakError::configuration_invalid());
    }

    let mut key = [0u8; 32];
    for (index, byte) in key.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[index * 2..index * 2 + 2], 16)
            .map_err(|_| PakError::configuration_invalid())?;
    }
    reverse_4byte_chunks(&mut key);
    Ok(key)
}

fn reverse_4byte_chunks(data: &mut [u8]) {
    for chunk in data.chunks_mut(4) {
        chunk.reverse();
    }
}

/// Decrypts a legacy-archive-flavor AES-256-ECB ciphertext in place.
/// `data.len()` must be a multiple of 16; the trailing sub-chunk reversal
/// undoes the one [`encrypt`] applies to the plaintext before encrypting.
fn decrypt(aes: &Aes256, data: &mut [u8]) {
    for block in data.chunks_mut(16) {
        let array = GenericArray::from_mut_slice(block);
        aes.decrypt_block(array);
        reverse_4byte_chunks(block);
    }
}

/// Encrypts a legacy-archive-flavor AES-256-ECB plaintext in place.
/// `data.len()` must be a multiple of 16.
fn encrypt(aes: &Aes256, data: &mut [u8]) {
    for block in data.chunks_mut(16) {
        reverse_4byte_chunks(block);
        let array = GenericArray::from_mut_slice(block);
        aes.encrypt_block(array);
    }
}

/// Number of cleartext bytes at the start of a file's data region that get
/// encrypted, per the formula in §4.A. Only that prefix is ever encrypted;
/// the remainder of the file is stored as-is.
fn prefix_encryption_len(path: &str) -> usize {
    let lower = path.to_lowercase();
    let mut salted = Vec::with_capacity(4 + lower.len());
    salted.extend_from_slice(&[0x11, 0x22, 0x33, 0x44]);
    salted.extend_from_slice(lower.as_bytes());

    let digest = blake3::hash(&salted);
    let first8 = u64::from_le_bytes(digest.as_bytes()[0..8].try_into().expect("8 bytes"));

    let scaled = (first8 % 0x3D) * 63 + 319;
    let rounded_down = scaled & !0x3F;
    let len = rounded_down.max(0x1000);

    // already a multiple of 64 (hence of 16), round up for any future caller
    // of this formula with a coarser mask than 0x3F
    (((len + 15) / 16) * 16) as usize
}

/// A companion index archive: a single `chunknames` entry plus its footer
/// and index tables, optionally AES-256-ECB encrypted with the legacy
/// per-4-byte-reversed flavor of §4.A.
#[derive(Debug, Clone)]
pub struct CompanionArchive {
    /// Newline-separated asset-relative paths the indexed IoStore container holds.
    pub chunk_names: Vec<String>,
    /// AES key guid recorded in the footer. All zero when unencrypted, or
    /// deliberately zeroed for obfuscation while still being encrypted (§6 S6).
    pub encryption_key_guid: [u8; 0x10],
}

impl CompanionArchive {
    /// Creates a new archive listing `chunk_names`, unencrypted.
    pub fn new(chunk_names: Vec<String>) -> Self {
        CompanionArchive {
            chunk_names,
            encryption_key_guid: [0u8; 0x10],
        }
    }

    /// Serializes this archive. When `key` is `Some`, the index tables and
    /// the `chunknames` entry's encrypted prefix are AES-256-ECB encrypted
    /// with the legacy-archive flavor; the footer's `encryptedIndexFlag` is
    /// set and `encryption_key_guid` is written verbatim (possibly zeroed
    /// for obfuscation even though the data is still encrypted).
    pub fn write<W: Write + Seek>(&self, writer: &mut W, key: Option<&EncryptionKey>) -> Result<(), PakError> {
        let body = self.chunk_names.join("\n").into_bytes();
        let prefix_len = prefix_encryption_len(CHUNKNAMES_ENTRY).min(body.len());

        let mut entry_data = body.clone();
        if let Some(key) = key {
            let aligned_len = align_up_16(prefix_len);
            entry_data.resize(entry_data.len().max(aligned_len), 0);
            let aes = Aes256::new(&GenericArray::from(*key));
            encrypt(&aes, &mut entry_data[..aligned_len]);
        }

        let data_offset = writer.stream_position()?;
        writer.write_all(&entry_data)?;

        let encoded_entry = EncodedEntry {
            offset: data_offset,
            compressed_size: 0,
            uncompressed_size: body.len() as u64,
            compression_method_slot: 0,
            encrypted: key.is_some(),
            compression_block_size: 0,
            compression_block_sizes: Vec::new(),
        };

        let tables = IndexTables {
            mount_point: "../../../".to_owned(),
            path_hash_seed: 0,
            entries: vec![(CHUNKNAMES_ENTRY.to_owned(), encoded_entry)],
        };

        let mut index_bytes = tables.write()?;
        let index_hash_sha1 = crate::hash(&index_bytes);

        let index_offset = writer.stream_position()?;
        if let Some(key) = key {
            let aligned_len = align_up_16(index_bytes.len());
            index_bytes.resize(aligned_len, 0);
            let aes = Aes256::new(&GenericArray::from(*key));
            encrypt(&aes, &mut index_bytes);
        }
        writer.write_all(&index_bytes)?;

        let footer = CompanionFooter {
            encryption_key_guid: self.encryption_key_guid,
            encrypted_index: key.is_some(),
            index_offset,
            index_size: index_bytes.len() as u64,
            index_hash_sha1,
            compression_methods: CompressionMethods::default(),
        };
        footer.write(writer)?;

        Ok(())
    }

    /// Parses a companion archive. `key` must be provided whenever the
    /// archive's footer reports `encryptedIndexFlag` set.
    pub fn read<R: Read + Seek>(reader: &mut R, key: Option<&EncryptionKey>) -> Result<Self, PakError> {
        reader.seek(SeekFrom::End(-(COMPANION_FOOTER_SIZE as i64)))?;
        let footer = CompanionFooter::read(reader)?;

        reader.seek(SeekFrom::Start(footer.index_offset))?;
        let mut index_bytes = vec![0u8; footer.index_size as usize];
        reader.read_exact(&mut index_bytes)?;

        if footer.encrypted_index {
            let key = key.ok_or_else(PakError::encryption_key_missing)?;
            let aes = Aes256::new(&GenericArray::from(*key));
            decrypt(&aes, &mut index_bytes);
        }

        if crate::hash(&index_bytes) != footer.index_hash_sha1 {
            return Err(PakError::index_hash_mismatch());
        }

        let tables = IndexTables::read(&index_bytes)?;
        let (name, encoded_entry) = tables
            .entries
            .into_iter()
            .find(|(name, _)| name == CHUNKNAMES_ENTRY)
            .ok_or_else(|| PakError::entry_not_found(CHUNKNAMES_ENTRY.to_owned()))?;
        debug_assert_eq!(name, CHUNKNAMES_ENTRY);

        reader.seek(SeekFrom::Start(encoded_entry.offset))?;
        let mut entry_data = vec![0u8; encoded_entry.uncompressed_size as usize];
        let prefix_len = prefix_encryption_len(CHUNKNAMES_ENTRY).min(entry_data.len());

        if encoded_entry.encrypted {
            let key = key.ok_or_else(PakError::encryption_key_missing)?;
            let aligned_len = align_up_16(prefix_len);
            let mut encrypted_prefix = vec![0u8; aligned_len];
            reader.read_exact(&mut encrypted_prefix)?;
            let aes = Aes256::new(&GenericArray::from(*key));
            decrypt(&aes, &mut encrypted_prefix);
            entry_data.copy_from_slice(&encrypted_prefix[..entry_data.len().min(aligned_len)]);
            if entry_data.len() > aligned_len {
                reader.read_exact(&mut entry_data[aligned_len..])?;
            }
        } else {
            reader.read_exact(&mut entry_data)?;
        }

        let body = String::from_utf8(entry_data).map_err(|_| PakError::entry_invalid())?;
        let chunk_names = if body.is_empty() {
            Vec::new()
        } else {
            body.split('\n').map(str::to_owned).collect()
        };

        Ok(CompanionArchive {
            chunk_names,
            encryption_key_guid: footer.encryption_key_guid,
        })
    }
}

fn align_up_16(len: usize) -> usize {
    (len + 15) & !15
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_unencrypted() {
        let archive = CompanionArchive::new(vec![
            "Game/Foo/Bar.uasset".to_owned(),
            "Game/Foo/Baz.uasset".to_owned(),
        ]);

        let mut buf = Cursor::new(Vec::new());
        archive.write(&mut buf, None).unwrap();

        buf.set_position(0);
        let read_back = CompanionArchive::read(&mut buf, None).unwrap();
        assert_eq!(read_back.chunk_names, archive.chunk_names);
    }

    #[test]
    fn round_trips_encrypted() {
        let key = parse_key_hex(&"A1".repeat(32)).unwrap();
        let archive = CompanionArchive::new(vec!["Game/Foo/Bar.uasset".to_owned()]);

        let mut buf = Cursor::new(Vec::new());
        archive.write(&mut buf, Some(&key)).unwrap();

        buf.set_position(0);
        let read_back = CompanionArchive::read(&mut buf, Some(&key)).unwrap();
        assert_eq!(read_back.chunk_names, archive.chunk_names);
    }

    #[test]
    fn encrypted_read_without_key_fails() {
        let key = parse_key_hex(&"A1".repeat(32)).unwrap();
        let archive = CompanionArchive::new(vec!["Game/Foo/Bar.uasset".to_owned()]);

        let mut buf = Cursor::new(Vec::new());
        archive.write(&mut buf, Some(&key)).unwrap();

        buf.set_position(0);
        assert!(CompanionArchive::read(&mut buf, None).is_err());
    }

    #[test]
    fn parse_key_hex_rejects_wrong_length() {
        assert!(parse_key_hex("ABCD").is_err());
    }

    #[test]
    fn prefix_length_is_16_aligned_and_at_least_4096() {
        let len = prefix_encryption_len("some/path.uasset");
        assert_eq!(len % 16, 0);
        assert!(len >= 0x1000);
    }
}
