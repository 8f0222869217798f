//! The "encoded entry" file-entry layout used by the companion archive's
//! index tables (spec §4.A): a bit-packed 32-bit flag word followed by a
//! handful of fields whose width is selected by three "safe" bits.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::PakError;

/// One decoded companion-archive index entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EncodedEntry {
    /// Absolute offset of the entry's data within the store this archive indexes.
    pub offset: u64,
    /// Total compressed size of the entry's data, 0 when `compression_method_slot == 0`.
    pub compressed_size: u64,
    /// Uncompressed size of the entry's data.
    pub uncompressed_size: u64,
    /// 1-based index into the footer's `compressionMethods` table, 0 = uncompressed.
    pub compression_method_slot: u8,
    /// Whether the entry's data is AES encrypted.
    pub encrypted: bool,
    /// Size in bytes of every compression block but possibly the last.
    pub compression_block_size: u32,
    /// Per-block compressed sizes. Only populated when there's more than one
    /// block; a single block's size is the entry's own `compressed_size`.
    pub compression_block_sizes: Vec<u32>,
}

const BLOCK_SIZE_UNIT: u32 = 1 << 11;

impl EncodedEntry {
    pub(crate) fn read<R: Read>(reader: &mut R) -> Result<Self, PakError> {
        let value = reader.read_u32::<LittleEndian>()?;

        let block_size_raw = value & 0x3F;
        let block_count = (value >> 6) & 0xFFFF;
        let encrypted = (value >> 22) & 1 != 0;
        let compression_method_slot = ((value >> 23) & 0x3F) as u8;
        let size_safe = (value >> 29) & 1 != 0;
        let usize_safe = (value >> 30) & 1 != 0;
        let offset_safe = (value >> 31) & 1 != 0;

        let compressed_size = read_sized(reader, size_safe)?;
        let uncompressed_size = read_sized(reader, usize_safe)?;
        let offset = read_sized(reader, offset_safe)?;

        let compression_block_size = block_size_raw << 11;

        let mut compression_block_sizes = Vec::new();
        if compression_method_slot != 0 && block_count > 1 {
            for _ in 0..block_count {
                compression_block_sizes.push(reader.read_u32::<LittleEndian>()?);
            }
        }

        Ok(EncodedEntry {
            offset,
            compressed_size,
            uncompressed_size,
            compression_method_slot,
            encrypted,
            compression_block_size,
            compression_block_sizes,
        })
    }

    pub(crate) fn write<W: Write>(&self, writer: &mut W) -> Result<(), PakError> {
        if self.compression_block_size % BLOCK_SIZE_UNIT != 0 || self.compression_block_size >> 11 > 0x3F {
            return Err(PakError::configuration_invalid());
        }

        let size_safe = fits_in_u32(self.compressed_size);
        let usize_safe = fits_in_u32(self.uncompressed_size);
        let offset_safe = fits_in_u32(self.offset);
        let block_count = self.compression_block_sizes.len() as u32;
        if block_count > 0xFFFF {
            return Err(PakError::configuration_invalid());
        }

        let mut value = (self.compression_block_size >> 11) & 0x3F;
        value |= block_count << 6;
        value |= (self.encrypted as u32) << 22;
        value |= (self.compression_method_slot as u32 & 0x3F) << 23;
        value |= (size_safe as u32) << 29;
        value |= (usize_safe as u32) << 30;
        value |= (offset_safe as u32) << 31;

        writer.write_u32::<LittleEndian>(value)?;
        write_sized(writer, self.compressed_size, size_safe)?;
        write_sized(writer, self.uncompressed_size, usize_safe)?;
        write_sized(writer, self.offset, offset_safe)?;

        if self.compression_method_slot != 0 && block_count > 1 {
            for block_size in &self.compression_block_sizes {
                writer.write_u32::<LittleEndian>(*block_size)?;
            }
        }

        Ok(())
    }
}

fn fits_in_u32(value: u64) -> bool {
    value <= u32::MAX as u64
}

fn read_sized<R: Read>(reader: &mut R, safe: bool) -> Result<u64, PakError> {
    Ok(if safe {
        reader.read_u32::<LittleEndian>()? as u64
    } else {
        reader.read_u64::<LittleEndian>()?
    })
}

fn write_sized<W: Write>(writer: &mut W, value: u64, safe: bool) -> Result<(), PakError> {
    if safe {
        writer.write_u32::<LittleEndian>(value as u32)?;
    } else {
        writer.write_u64::<LittleEndian>(value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn round_trips_uncompressed() {
        let entry = EncodedEntry {
            offset: 0x1000,
            compressed_size: 0,
            uncompressed_size: 0x400,
            compression_method_slot: 0,
            encrypted: false,
            compression_block_size: 0,
            compression_block_sizes: Vec::new(),
        };

        let mut buf = Cursor::new(Vec::new());
        entry.write(&mut buf).unwrap();
        buf.set_position(0);
        assert_eq!(EncodedEntry::read(&mut buf).unwrap(), entry);
    }

    #[test]
    fn round_trips_multi_block_compressed() {
        let entry = EncodedEntry {
            offset: 0x1_0000_0000,
            compressed_size: 0x3000,
            uncompressed_size: 0x10000,
            compression_method_slot: 1,
            encrypted: true,
            compression_block_size: 0x10000,
            compression_block_sizes: vec![0x1000, 0x1000, 0x1000],
        };

        let mut buf = Cursor::new(Vec::new());
        entry.write(&mut buf).unwrap();
        buf.set_position(0);
        assert_eq!(EncodedEntry::read(&mut buf).unwrap(), entry);
    }
}
