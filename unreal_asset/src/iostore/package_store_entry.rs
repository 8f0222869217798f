//! IoStore package store entry

use std::io::SeekFrom;

use byteorder::{ReadBytesExt, WriteBytesExt, LE};
use unreal_asset_base::{
    enums::EIoContainerHeaderVersion,
    reader::{ArchiveReader, ArchiveTrait, ArchiveWriter},
    types::{sha::FShaHash, PackageIndexTrait},
    Error,
};

use super::package_id::PackageId;

/// IoStore package store entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilePackageStoreEntry {
    /// Export count
    pub export_count: Option<i32>,
    /// Export bundle count
    pub export_bundle_count: Option<i32>,
    /// Imported packages
    pub imported_packages: Vec<PackageId>,
    /// Shader map hashes
    pub shader_map_hashes: Vec<FShaHash>,
}

impl FilePackageStoreEntry {
    /// Read `FilePackageStoreEntry` from an archive
    pub fn read<R: ArchiveReader<impl PackageIndexTrait>>(
        archive: &mut R,
        version: EIoContainerHeaderVersion,
    ) -> Result<Self, Error> {
        let (export_count, export_bundle_count) =
            match version < EIoContainerHeaderVersion::NoExportInfo {
                true => {
                    let export_count = archive.read_i32::<LE>()?;
                    let export_bundle_count = archive.read_i32::<LE>()?;
                    (Some(export_count), Some(export_bundle_count))
                }
                false => (None, None),
            };

        let imported_packages = Self::read_carrayview(archive, PackageId::read)?;
        let shader_map_hashes = Self::read_carrayview(archive, FShaHash::read)?;

        Ok(FilePackageStoreEntry {
            export_count,
            export_bundle_count,
            imported_packages,
            shader_map_hashes,
        })
    }

    /// Read a `TFilePackageStoreEntryCArrayView` from an archive
    pub fn read_carrayview<R: ArchiveReader<impl PackageIndexTrait>, T>(
        archive: &mut R,
        f: impl Fn(&mut R) -> Result<T, Error>,
    ) -> Result<Vec<T>, Error> {
        let start_pos = archive.position();

        let length = archive.read_i32::<LE>()?;
        let offset_to_data = archive.read_i32::<LE>()?;

        let next_pos = archive.position();

        archive.seek(SeekFrom::Start(start_pos + offset_to_data as u64))?;

        let arr = archive.read_array_with_length(length, f)?;

        archive.seek(SeekFrom::Start(next_pos))?;

        Ok(arr)
    }

    /// Size in bytes of the fixed-size part of an entry (not counting the
    /// trailing variable-length arrays).
    pub fn fixed_size(version: EIoContainerHeaderVersion) -> u64 {
        let mut size = 16; // two CArrayViews (i32 length, i32 relative offset)
        if version < EIoContainerHeaderVersion::NoExportInfo {
            size += 8; // export_count + export_bundle_count
        }
        size
    }

    /// Size in bytes of this entry's trailing variable-length arrays.
    pub fn variable_size(&self) -> u64 {
        self.imported_packages.len() as u64 * 8 + self.shader_map_hashes.len() as u64 * 20
    }

    /// Write the fixed-size part of this entry. `variable_data_offset` is the absolute
    /// archive position at which this entry's variable-length arrays will be written
    /// during the trailing pass (see [`crate::iostore::container_header::IoSegmentInfo::write`]).
    pub fn write_fixed<W: ArchiveWriter<impl PackageIndexTrait>>(
        &self,
        archive: &mut W,
        version: EIoContainerHeaderVersion,
        variable_data_offset: u64,
    ) -> Result<(), Error> {
        if version < EIoContainerHeaderVersion::NoExportInfo {
            archive.write_i32::<LE>(self.export_count.unwrap_or_default())?;
            archive.write_i32::<LE>(self.export_bundle_count.unwrap_or_default())?;
        }

        let imported_packages_field_pos = archive.position();
        archive.write_i32::<LE>(self.imported_packages.len() as i32)?;
        archive.write_i32::<LE>(
            (variable_data_offset as i64 - imported_packages_field_pos as i64) as i32,
        )?;

        let shader_map_hashes_field_pos = archive.position();
        let shader_map_hashes_offset =
            variable_data_offset + self.imported_packages.len() as u64 * 8;
        archive.write_i32::<LE>(self.shader_map_hashes.len() as i32)?;
        archive.write_i32::<LE>(
            (shader_map_hashes_offset as i64 - shader_map_hashes_field_pos as i64) as i32,
        )?;

        Ok(())
    }

    /// Write this entry's trailing variable-length arrays (imported packages, then
    /// shader-map hashes).
    pub fn write_variable<W: ArchiveWriter<impl PackageIndexTrait>>(
        &self,
        archive: &mut W,
    ) -> Result<(), Error> {
        for id in &self.imported_packages {
            id.write(archive)?;
        }
        for hash in &self.shader_map_hashes {
            hash.write(archive)?;
        }

        Ok(())
    }
}
