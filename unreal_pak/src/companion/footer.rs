//! Fixed 221-byte footer of a companion index archive.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::compression::CompressionMethods;
use crate::error::PakError;

/// Magic value of a companion index archive footer.
pub const COMPANION_MAGIC: u32 = 0x5A6F_12E1;

/// Only version this crate writes or accepts on read.
pub const COMPANION_VERSION: u32 = 11;

/// Serialized size of [`CompanionFooter`] in bytes.
pub const COMPANION_FOOTER_SIZE: u64 = 221;

/// Footer of a companion index archive, always the last 221 bytes of the file.
#[derive(Debug, Clone)]
pub(crate) struct CompanionFooter {
    /// AES key guid the index was encrypted with, all zero when unencrypted
    /// (or deliberately zeroed for obfuscation, see spec §6 S6).
    pub encryption_key_guid: [u8; 0x10],
    /// Whether the index tables following `index_offset` are AES encrypted.
    pub encrypted_index: bool,
    /// Absolute offset of the index tables.
    pub index_offset: u64,
    /// Size in bytes of the index tables.
    pub index_size: u64,
    /// SHA1 of the cleartext index, computed before encryption.
    pub index_hash_sha1: [u8; 20],
    /// Compression methods referenced by entries in this archive.
    pub compression_methods: CompressionMethods,
}

impl CompanionFooter {
    pub(crate) fn read<R: Read>(reader: &mut R) -> Result<Self, PakError> {
        let mut encryption_key_guid = [0u8; 0x10];
        reader.read_exact(&mut encryption_key_guid)?;

        let encrypted_index = reader.read_u8()? != 0;

        let magic = reader.read_u32::<LittleEndian>()?;
        if magic != COMPANION_MAGIC {
            return Err(PakError::pak_invalid());
        }

        let version = reader.read_u32::<LittleEndian>()?;
        if version != COMPANION_VERSION {
            return Err(PakError::pak_invalid());
        }

        let index_offset = reader.read_u64::<LittleEndian>()?;
        let index_size = reader.read_u64::<LittleEndian>()?;

        let mut index_hash_sha1 = [0u8; 20];
        reader.read_exact(&mut index_hash_sha1)?;

        let compression_methods = CompressionMethods::from_reader_fixed(reader)?;

        Ok(CompanionFooter {
            encryption_key_guid,
            encrypted_index,
            index_offset,
            index_size,
            index_hash_sha1,
            compression_methods,
        })
    }

    pub(crate) fn write<W: Write>(&self, writer: &mut W) -> Result<(), PakError> {
        writer.write_all(&self.encryption_key_guid)?;
        writer.write_u8(u8::from(self.encrypted_index))?;
        writer.write_u32::<LittleEndian>(COMPANION_MAGIC)?;
        writer.write_u32::<LittleEndian>(COMPANION_VERSION)?;
        writer.write_u64::<LittleEndian>(self.index_offset)?;
        writer.write_u64::<LittleEndian>(self.index_size)?;
        writer.write_all(&self.index_hash_sha1)?;
        writer.write_all(&self.compression_methods.as_bytes())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn round_trips() {
        let footer = CompanionFooter {
            encryption_key_guid: [0u8; 0x10],
            encrypted_index: true,
            index_offset: 0x1234,
            index_size: 0x10,
            index_hash_sha1: [7u8; 20],
            compression_methods: CompressionMethods::zlib(),
        };

        let mut buf = Cursor::new(Vec::new());
        footer.write(&mut buf).unwrap();
        assert_eq!(buf.get_ref().len() as u64, COMPANION_FOOTER_SIZE);

        buf.set_position(0);
        let read_back = CompanionFooter::read(&mut buf).unwrap();
        assert_eq!(read_back.index_offset, footer.index_offset);
        assert_eq!(read_back.index_size, footer.index_size);
        assert!(read_back.encrypted_index);
    }

    #[test]
    fn rejects_wrong_magic() {
        let mut buf = Cursor::new(vec![0u8; COMPANION_FOOTER_SIZE as usize]);
        assert!(CompanionFooter::read(&mut buf).is_err());
    }
}
