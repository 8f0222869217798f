//! IoStore global data serialization

use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};

use unreal_asset_base::containers::chain::Chain;
use unreal_asset_base::crc;
use unreal_asset_base::engine_version::{get_object_versions, EngineVersion};
use unreal_asset_base::error::IoStoreError;
use unreal_asset_base::reader::archive_reader::ArchiveReader;
use unreal_asset_base::reader::raw_reader::RawReader;

use crate::containers::{name_map::NameMap, shared_resource::SharedResource};
use crate::error::Error;

use super::cas::reader::IoStoreReader;
use super::providers::IoStoreProvider;
use super::toc::chunk::EIoChunkType5;
use super::{FNameEntrySerialized, PackageObjectIndex, ScriptObjectEntry};

/// IoStore global data
#[derive(Debug, Clone, PartialEq)]
pub struct IoGlobalData {
    /// Engine version
    pub engine_version: EngineVersion,
    /// Global name map
    pub global_name_map: SharedResource<NameMap>,
    /// Script object entries
    pub script_object_entries: Vec<ScriptObjectEntry>,
    /// Reverse lookup from a lowercased qualified object path (e.g.
    /// `/script/engine.staticmesh`) to its 62-bit global import id, built
    /// once after parsing for use by the import-map builder.
    reverse_lookup: HashMap<String, PackageObjectIndex>,
}

impl IoGlobalData {
    /// Read `IoGlobalData` from an [`IoStoreReader`]
    pub fn read<R: Read + Seek, P: IoStoreProvider<R>>(
        reader: &mut IoStoreReader<R, P>,
        engine_version: EngineVersion,
    ) -> Result<Self, Error> {
        let (object_version, object_version_ue5) = get_object_versions(engine_version);

        let (name_map, mut meta_reader) = match engine_version >= EngineVersion::VER_UE5_0 {
            true => {
                let chunk_info = reader
                    .toc_resource
                    .get_chunk_offset_by_type(EIoChunkType5::ScriptObjects as u8)?
                    .ok_or_else(|| IoStoreError::no_chunk("ScriptObjects"))?;
                let mut data = vec![0u8; chunk_info.length as usize];
                reader.read_all(chunk_info.offset, &mut data)?;

                let mut meta_reader = RawReader::<PackageObjectIndex, _>::new(
                    Chain::new(Cursor::new(data), None),
                    object_version,
                    object_version_ue5,
                    false,
                    NameMap::new(),
                );

                let name_batch = FNameEntrySerialized::read_name_batch(&mut meta_reader)?
                    .into_iter()
                    .filter_map(|e| e.name)
                    .collect::<Vec<_>>();
                (NameMap::from_name_batch(&name_batch), meta_reader)
            }
            false => unimplemented!(),
        };

        let script_object_entries =
            meta_reader.read_array(|reader| ScriptObjectEntry::read(reader))?;

        let mut global_data = IoGlobalData {
            engine_version,
            global_name_map: name_map,
            script_object_entries,
            reverse_lookup: HashMap::new(),
        };
        global_data.build_reverse_lookup();

        Ok(global_data)
    }

    /// Look up the qualified, lowercased name of a script import by its
    /// object name entry, walking the outer chain to reconstruct e.g.
    /// `/script/engine.staticmesh`.
    fn qualified_name_for(&self, entry: &ScriptObjectEntry) -> Option<String> {
        let name = self
            .global_name_map
            .get_ref()
            .get_name_reference(entry.object_name.index as i32)
            .to_string();
        let name = match entry.object_name.number {
            0 => name,
            n => format!("{name}_{}", n - 1),
        };

        if entry.outer_index.is_null() {
            return Some(name);
        }

        let outer_entry = self
            .script_object_entries
            .iter()
            .find(|e| e.global_index == entry.outer_index)?;
        let outer = self.qualified_name_for(outer_entry)?;

        // Package-level outers (`/Script/Engine`) join with `.`; anything
        // nested further (a class containing a default object) joins with `:`,
        // matching the object-path convention the runtime expects.
        let joined = if outer.starts_with('/') && !outer.contains('.') {
            format!("{outer}.{name}")
        } else {
            format!("{outer}:{name}")
        };

        Some(joined)
    }

    /// (Re)build the qualified-name → global-index reverse lookup used by the
    /// Zen import-map builder to resolve script classes.
    fn build_reverse_lookup(&mut self) {
        let mut reverse_lookup = HashMap::with_capacity(self.script_object_entries.len());
        for entry in &self.script_object_entries {
            if let Some(name) = self.qualified_name_for(entry) {
                reverse_lookup.insert(crc::to_lower_string(&name), entry.global_index);
            }
        }
        self.reverse_lookup = reverse_lookup;
    }

    /// Resolve a qualified object path (any case) to its global import id.
    pub fn get_global_import_index(&self, qualified_name: &str) -> Option<PackageObjectIndex> {
        self.reverse_lookup
            .get(&crc::to_lower_string(qualified_name))
            .copied()
    }

    /// Get the qualified, lowercased name for a global import id, the inverse
    /// of [`Self::get_global_import_index`].
    pub fn get_qualified_name(&self, index: PackageObjectIndex) -> Option<String> {
        let entry = self
            .script_object_entries
            .iter()
            .find(|e| e.global_index == index)?;
        self.qualified_name_for(entry).map(|n| crc::to_lower_string(&n))
    }
}
