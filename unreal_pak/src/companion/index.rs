//! Index tables of a companion archive: the primary entry list, the
//! path-hash index, and the full-directory index (spec §4.J). The
//! companion archive only ever stores a single entry (`chunknames`), so
//! these tables are minimal, but the on-disk shape mirrors the same three
//! tables the legacy `.pak` format's newer index versions carry.

use std::io::{Cursor, Read, Seek, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::buf_ext::{BufReaderExt, BufWriterExt};
use crate::companion::entry::EncodedEntry;
use crate::companion::hash::hash_path;
use crate::error::PakError;

/// Cleartext index tables: primary entry list, path-hash index, full-directory index.
pub(crate) struct IndexTables {
    pub mount_point: String,
    pub path_hash_seed: u64,
    pub entries: Vec<(String, EncodedEntry)>,
}

impl IndexTables {
    pub(crate) fn write(&self) -> Result<Vec<u8>, PakError> {
        let mut out = Cursor::new(Vec::new());

        out.write_fstring(Some(&self.mount_point))?;
        out.write_u64::<LittleEndian>(self.path_hash_seed)?;

        // primary index: flat (name, entry) list
        out.write_u32::<LittleEndian>(self.entries.len() as u32)?;
        for (name, entry) in &self.entries {
            out.write_fstring(Some(name))?;
            entry.write(&mut out)?;
        }

        // path-hash index: FNV-1a-64(lower(path)) -> index into the primary list
        out.write_u32::<LittleEndian>(self.entries.len() as u32)?;
        for (index, (name, _)) in self.entries.iter().enumerate() {
            out.write_u64::<LittleEndian>(hash_path(name, self.path_hash_seed))?;
            out.write_u32::<LittleEndian>(index as u32)?;
        }

        // full-directory index: directory -> (filename -> index into the primary list)
        let mut by_directory: Vec<(String, Vec<(String, u32)>)> = Vec::new();
        for (index, (name, _)) in self.entries.iter().enumerate() {
            let (directory, file_name) = split_directory(name);
            match by_directory.iter_mut().find(|(dir, _)| dir == directory) {
                Some((_, files)) => files.push((file_name.to_owned(), index as u32)),
                None => by_directory.push((directory.to_owned(), vec![(file_name.to_owned(), index as u32)])),
            }
        }

        out.write_u32::<LittleEndian>(by_directory.len() as u32)?;
        for (directory, files) in &by_directory {
            out.write_fstring(Some(directory))?;
            out.write_u32::<LittleEndian>(files.len() as u32)?;
            for (file_name, index) in files {
                out.write_fstring(Some(file_name))?;
                out.write_u32::<LittleEndian>(*index)?;
            }
        }

        Ok(out.into_inner())
    }

    pub(crate) fn read(data: &[u8]) -> Result<Self, PakError> {
        let mut reader = Cursor::new(data);

        let mount_point = reader.read_fstring()?.unwrap_or_default();
        let path_hash_seed = reader.read_u64::<LittleEndian>()?;

        let entry_count = reader.read_u32::<LittleEndian>()?;
        let mut entries = Vec::with_capacity(entry_count as usize);
        for _ in 0..entry_count {
            let name = reader.read_fstring()?.ok_or_else(PakError::pak_invalid)?;
            let entry = EncodedEntry::read(&mut reader)?;
            entries.push((name, entry));
        }

        // path-hash index: validated against the primary list, not otherwise consumed
        let hash_count = reader.read_u32::<LittleEndian>()?;
        for _ in 0..hash_count {
            let stored_hash = reader.read_u64::<LittleEndian>()?;
            let index = reader.read_u32::<LittleEndian>()? as usize;
            let name = entries
                .get(index)
                .map(|(name, _)| name.as_str())
                .ok_or_else(PakError::pak_invalid)?;
            if hash_path(name, path_hash_seed) != stored_hash {
                return Err(PakError::pak_invalid());
            }
        }

        // full-directory index: read through, entries already known from the primary list
        let dir_count = reader.read_u32::<LittleEndian>()?;
        for _ in 0..dir_count {
            let _directory = reader.read_fstring()?;
            let file_count = reader.read_u32::<LittleEndian>()?;
            for _ in 0..file_count {
                let _file_name = reader.read_fstring()?;
                let _index = reader.read_u32::<LittleEndian>()?;
            }
        }

        Ok(IndexTables {
            mount_point,
            path_hash_seed,
            entries,
        })
    }
}

/// Splits `path` into `(directory, file_name)`, where `directory` is empty for a
/// top-level path. Mirrors the grouping the legacy full-directory index uses.
fn split_directory(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(index) => (&path[..index], &path[index + 1..]),
        None => ("", path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_single_entry() {
        let tables = IndexTables {
            mount_point: "../../../".to_owned(),
            path_hash_seed: 0xABCD,
            entries: vec![(
                "chunknames".to_owned(),
                EncodedEntry {
                    offset: 0,
                    compressed_size: 0,
                    uncompressed_size: 42,
                    compression_method_slot: 0,
                    encrypted: false,
                    compression_block_size: 0,
                    compression_block_sizes: Vec::new(),
                },
            )],
        };

        let bytes = tables.write().unwrap();
        let read_back = IndexTables::read(&bytes).unwrap();

        assert_eq!(read_back.mount_point, tables.mount_point);
        assert_eq!(read_back.entries.len(), 1);
        assert_eq!(read_back.entries[0].0, "chunknames");
    }

    #[test]
    fn splits_nested_directory() {
        assert_eq!(split_directory("Game/Foo/Bar.uasset"), ("Game/Foo", "Bar.uasset"));
        assert_eq!(split_directory("chunknames"), ("", "chunknames"));
    }
}
