//! IoStore `.utoc`/`.ucas` writer

use std::{
    fs::File,
    io::{BufWriter, Cursor, Write},
    mem::size_of,
    path::{Path, PathBuf},
};

use unreal_asset_base::{
    containers::name_map::NameMap,
    engine_version::{get_object_versions, EngineVersion},
    enums::EIoContainerHeaderVersion,
    error::{Error, IoStoreError},
    reader::raw_writer::RawWriter,
    unreal_helpers::Guid,
    compression::{self, CompressionMethod},
};

use crate::iostore::{
    align,
    container_header::{
        IoContainerHeader, IoContainerHeaderLocalizedPackage, IoContainerHeaderPackageRedirect,
        IoSegmentInfo,
    },
    encryption::{EncryptionKey, ENCRYPTION_ALIGN},
    flags::{EIoContainerFlags, IoStoreTocEntryMetaFlags},
    name::{EMappedNameType, FMappedName, FNameEntrySerialized},
    package_id::PackageId,
    package_store_entry::FilePackageStoreEntry,
    toc::{
        chunk::{EIoChunkType, EIoChunkType5, IoChunkHash, IoChunkId},
        header::IoStoreTocHeader,
        index::IoStoreDirectoryIndex,
        EIoStoreTocVersion, IoContainerId, IoOffsetAndLength, IoStoreTocCompressedBlockEntry,
        IoStoreTocEntryMeta, IoStoreTocResource,
    },
    PackageObjectIndex,
};

/// Blocks smaller than this are never attempted to be compressed, matching the
/// overhead/ratio tradeoff the container format assumes per block.
const MIN_COMPRESS_SIZE: usize = 1024;

/// Incrementally builds a `.utoc`/`.ucas` container pair.
///
/// Chunks are appended with [`Self::write_chunk`] or [`Self::write_package_chunk`].
/// [`Self::finalize`] serializes the accumulated container header (if any) as the
/// final chunk, then emits the TOC.
pub struct IoStoreWriter {
    cas: BufWriter<File>,
    toc_path: PathBuf,

    version: EIoStoreTocVersion,
    engine_version: EngineVersion,
    container_id: IoContainerId,
    compression_block_size: u32,
    compression_methods: Vec<CompressionMethod>,
    encryption_key: Option<EncryptionKey>,
    encryption_key_guid: Guid,

    chunk_ids: Vec<IoChunkId>,
    chunk_offsets_lengths: Vec<IoOffsetAndLength>,
    compression_blocks: Vec<IoStoreTocCompressedBlockEntry>,
    chunk_metas: Vec<IoStoreTocEntryMeta>,
    directory_index: IoStoreDirectoryIndex,

    cas_position: u64,

    container_header: Option<IoContainerHeader>,
}

impl IoStoreWriter {
    /// Create a new writer. `toc_path` should end in `.utoc`; the companion
    /// `.ucas` is created alongside it. `container_header_version` enables
    /// emitting a container header chunk (skip for a chunk-only container).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        toc_path: impl AsRef<Path>,
        version: EIoStoreTocVersion,
        engine_version: EngineVersion,
        mount_point: &str,
        container_header_version: Option<EIoContainerHeaderVersion>,
        compression_methods: Vec<CompressionMethod>,
        encryption_key: Option<EncryptionKey>,
    ) -> Result<Self, Error> {
        let toc_path = toc_path.as_ref().to_path_buf();
        let cas_path = toc_path.with_extension("ucas");

        let cas = BufWriter::new(File::create(&cas_path)?);

        let container_name = toc_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let container_id = IoContainerId::from_name(&container_name);

        let container_header = container_header_version.map(|header_version| {
            IoContainerHeader {
                version: header_version,
                container_id,
                package_count: Some(0),
                main_segment: IoSegmentInfo {
                    package_ids: Vec::new(),
                    entries: Vec::new(),
                },
                optional_segment: (header_version
                    >= EIoContainerHeaderVersion::OptionalSegmentPackages)
                    .then(|| IoSegmentInfo {
                        package_ids: Vec::new(),
                        entries: Vec::new(),
                    }),
                container_name_map: Vec::new(),
                localized_packages: (header_version >= EIoContainerHeaderVersion::LocalizedPackages)
                    .then(Vec::new),
                package_redirects: Vec::new(),
            }
        });

        Ok(IoStoreWriter {
            cas,
            toc_path,
            version,
            engine_version,
            container_id,
            compression_block_size: 0x10000,
            compression_methods,
            encryption_key,
            encryption_key_guid: Guid::default(),
            chunk_ids: Vec::new(),
            chunk_offsets_lengths: Vec::new(),
            compression_blocks: Vec::new(),
            chunk_metas: Vec::new(),
            directory_index: IoStoreDirectoryIndex::new(Some(mount_point.to_string())),
            cas_position: 0,
            container_header,
        })
    }

    /// Append a raw chunk. `relative_path`, if given, is inserted into the
    /// directory index (relative to this writer's mount point) pointing at
    /// the new chunk's TOC entry.
    pub fn write_chunk(
        &mut self,
        chunk_id: IoChunkId,
        relative_path: Option<&str>,
        data: &[u8],
    ) -> Result<(), Error> {
        if let Some(path) = relative_path {
            let chunk_index = self.chunk_ids.len() as u32;
            self.directory_index.insert(path, chunk_index);
        }

        let start_block = self.compression_blocks.len() as u64;

        let force_uncompressed = chunk_id.chunk_type == EIoChunkType::ContainerHeader as u8
            || chunk_id.chunk_type == EIoChunkType5::ContainerHeader as u8;

        let mut hasher = blake3::Hasher::new();

        for block in data.chunks(self.compression_block_size as usize) {
            hasher.update(block);

            let mut bytes_to_write = block.to_vec();
            let mut method_index = 0u8;

            if !force_uncompressed && block.len() >= MIN_COMPRESS_SIZE {
                for (index, method) in self.compression_methods.iter().enumerate() {
                    let mut compressed = Vec::new();
                    if compression::compress(method, block, &mut compressed)?
                        && compressed.len() < block.len()
                    {
                        bytes_to_write = compressed;
                        method_index = index as u8 + 1;
                        break;
                    }
                }
            }

            let uncompressed_size = bytes_to_write.len() as u32;

            if let Some(ref key) = self.encryption_key {
                use aes::{
                    cipher::{generic_array::GenericArray, KeyInit},
                    Aes256,
                };

                let aes = Aes256::new(&GenericArray::from(*key));

                let aligned_size =
                    align::align(bytes_to_write.len() as u64, ENCRYPTION_ALIGN) as usize;
                bytes_to_write.resize(aligned_size, 0);

                crate::iostore::encryption::encrypt(&aes, &mut bytes_to_write);
            }

            let offset = self.cas_position;
            self.cas.write_all(&bytes_to_write)?;
            self.cas_position += bytes_to_write.len() as u64;

            self.compression_blocks.push(IoStoreTocCompressedBlockEntry {
                offset,
                compressed_size: uncompressed_size,
                decompressed_size: block.len() as u32,
                compression_method_index: method_index,
            });
        }

        let hash = hasher.finalize();
        self.chunk_metas.push(IoStoreTocEntryMeta {
            chunk_hash: IoChunkHash::from_blake3(&hash),
            flags: IoStoreTocEntryMetaFlags::NONE,
        });

        self.chunk_offsets_lengths.push(IoOffsetAndLength {
            offset: start_block * self.compression_block_size as u64,
            length: data.len() as u64,
        });

        self.chunk_ids.push(chunk_id);

        Ok(())
    }

    /// Append a package export-bundle chunk, recording its package id and
    /// store entry in the container header's main segment.
    pub fn write_package_chunk(
        &mut self,
        chunk_id: IoChunkId,
        relative_path: Option<&str>,
        data: &[u8],
        package_id: PackageId,
        store_entry: FilePackageStoreEntry,
    ) -> Result<(), Error> {
        {
            let container_header = self.container_header.as_mut().ok_or_else(|| {
                IoStoreError::no_chunk("container header required to write package chunks")
            })?;

            container_header.main_segment.package_ids.push(package_id);
            container_header.main_segment.entries.push(store_entry);
            container_header.package_count =
                Some(container_header.main_segment.package_ids.len() as u32);
        }

        self.write_chunk(chunk_id, relative_path, data)
    }

    /// Intern `name` into the container header's name map, returning the
    /// `FMappedName` that refers to it.
    pub fn intern_container_name(&mut self, name: &str) -> Result<FMappedName, Error> {
        let container_header = self
            .container_header
            .as_mut()
            .ok_or_else(|| IoStoreError::no_chunk("container header required to intern names"))?;

        let index = match container_header
            .container_name_map
            .iter()
            .position(|entry| entry.name.as_deref() == Some(name))
        {
            Some(index) => index,
            None => {
                container_header
                    .container_name_map
                    .push(FNameEntrySerialized::new(Some(name.to_string())));
                container_header.container_name_map.len() - 1
            }
        };

        Ok(FMappedName::new(index as u32, 0, EMappedNameType::Container))
    }

    /// Register a localized package, redirecting the given culture's load of
    /// `source_package_name` to `localized_package_id`.
    pub fn add_localized_package(
        &mut self,
        source_package_id: PackageId,
        source_package_name: FMappedName,
    ) -> Result<(), Error> {
        let container_header = self.container_header.as_mut().ok_or_else(|| {
            IoStoreError::no_chunk("container header required to add localized packages")
        })?;

        let localized_packages = container_header.localized_packages.get_or_insert_with(Vec::new);
        localized_packages.push(IoContainerHeaderLocalizedPackage {
            source_package_id,
            source_package_name,
        });

        Ok(())
    }

    /// Register a package redirect from `source_package_id` to `target_package_id`.
    pub fn add_package_redirect(
        &mut self,
        source_package_id: PackageId,
        target_package_id: PackageId,
        source_package_name: FMappedName,
    ) -> Result<(), Error> {
        let container_header = self.container_header.as_mut().ok_or_else(|| {
            IoStoreError::no_chunk("container header required to add package redirects")
        })?;

        container_header
            .package_redirects
            .push(IoContainerHeaderPackageRedirect {
                source_package_id,
                target_package_id,
                source_package_name,
            });

        Ok(())
    }

    /// Serialize the container header (if any) as the final chunk, then write
    /// out the `.utoc`.
    pub fn finalize(mut self) -> Result<(), Error> {
        if let Some(container_header) = self.container_header.clone() {
            let (object_version, object_version_ue5) = get_object_versions(self.engine_version);

            let mut buffer = Cursor::new(Vec::new());
            {
                let mut archive = RawWriter::<PackageObjectIndex, _>::new(
                    &mut buffer,
                    object_version,
                    object_version_ue5,
                    false,
                    NameMap::new(),
                );
                container_header.write(&mut archive)?;
            }

            let mut data = buffer.into_inner();
            let aligned_len = align::align(data.len() as u64, ENCRYPTION_ALIGN) as usize;
            data.resize(aligned_len, 0);

            let chunk_type = match self.engine_version >= EngineVersion::VER_UE5_0 {
                true => EIoChunkType5::ContainerHeader as u8,
                false => EIoChunkType::ContainerHeader as u8,
            };

            let chunk_id = IoChunkId::new(self.container_id.value, 0, chunk_type);
            self.write_chunk(chunk_id, None, &data)?;
        }

        let header_size = (size_of::<IoStoreTocHeader>() + 16) as u32;

        let mut container_flags = EIoContainerFlags::INDEXED;
        if !self.compression_methods.is_empty() {
            container_flags.insert(EIoContainerFlags::COMPRESSED);
        }

        let header = IoStoreTocHeader {
            version: self.version,
            reserved: [0; 3],
            header_size,
            entry_count: self.chunk_ids.len() as u32,
            compressed_block_entry_count: self.compression_blocks.len() as u32,
            compressed_block_entry_size: 12,
            compression_method_name_count: self.compression_methods.len() as u32,
            compression_method_name_length: 32,
            compression_block_size: self.compression_block_size,
            directory_index_size: 0,
            partition_count: 1,
            container_id: self.container_id,
            encryption_key_guid: self.encryption_key_guid,
            container_flags,
            reserved_0: [0; 3],
            chunk_perfect_hash_seeds_count: 0,
            partition_size: u64::MAX,
            chunks_without_perfect_hash_count: 0,
            reserved_1: [0; 44],
        };

        let resource = IoStoreTocResource {
            header,
            chunk_ids: self.chunk_ids,
            chunk_offsets_lengths: self.chunk_offsets_lengths,
            chunk_perfect_hash_seeds: Vec::new(),
            chunks_without_perfect_hash: Vec::new(),
            compression_blocks: self.compression_blocks,
            compression_methods: self.compression_methods,
            directory_index: Some(self.directory_index),
            chunk_metas: self.chunk_metas,
        };

        self.cas.flush()?;

        let mut toc_file = File::create(&self.toc_path)?;
        resource.write(&mut toc_file, self.encryption_key)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_chunk_round_trips_through_compression_blocks() {
        let dir = std::env::temp_dir().join(format!(
            "iostore_writer_test_{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let toc_path = dir.join("test.utoc");

        let mut writer = IoStoreWriter::new(
            &toc_path,
            EIoStoreTocVersion::DirectoryIndex,
            EngineVersion::VER_UE5_1,
            "../../../",
            None,
            Vec::new(),
            None,
        )
        .unwrap();

        let data = vec![1u8, 2, 3, 4, 5];
        let chunk_id = IoChunkId::new(1, 0, EIoChunkType5::BulkData as u8);
        writer
            .write_chunk(chunk_id, Some("Foo/Bar.bin"), &data)
            .unwrap();

        writer.finalize().unwrap();

        let mut toc_file = File::open(&toc_path).unwrap();
        let resource = IoStoreTocResource::read(&mut toc_file, None).unwrap();

        assert_eq!(resource.chunk_ids.len(), 1);
        assert_eq!(resource.chunk_ids[0], chunk_id);
        assert_eq!(resource.chunk_offsets_lengths[0].length, data.len() as u64);

        std::fs::remove_dir_all(&dir).ok();
    }
}
