//! Zen package builder: the inverse of [`super::IoAsset`]. Takes a parsed
//! legacy package (§4.E's reader output) plus its reshaped export bytes and
//! emits a single Zen package header + export blob, the on-disk layout
//! [`super::IoAsset::parse_data`] reads back.

use std::io::{Cursor, Seek, SeekFrom, Write};

use byteorder::{WriteBytesExt, LE};
use unreal_asset_base::{
    containers::{name_map::NameMap, shared_resource::SharedResource},
    crc,
    engine_version::{get_object_versions, EngineVersion},
    error::Error,
    flags::EObjectFlags,
    reader::{raw_writer::RawWriter, ArchiveTrait, ArchiveWriter},
    types::{FName, PackageIndex, PackageIndexTrait},
    Import,
};
use unreal_asset_exports::{Export, ExportBaseTrait};

use crate::asset_data::AssetData;
use crate::reshape::material_tag;

use super::{
    exports::{EExportCommandType, ExportBundleEntry, ExportBundleHeader, IoStoreExportMapEntry},
    flags::EExportFilterFlags,
    global::IoGlobalData,
    graph_data::IoStoreGraphData,
    name::{EMappedNameType, FMappedName, FNameEntrySerialized},
    package_id::PackageId,
    zen::ZenPackageSummary,
    EPackageObjectIndexType, PackageObjectIndex,
};

/// One export's reshaped tail, parallel to [`AssetData::exports`].
#[derive(Debug, Clone)]
pub struct ReshapedExport {
    /// Reshaped export tail bytes (header-then-properties, as written by
    /// the legacy [`unreal_asset_exports::ExportTrait::write`], post-reshape).
    pub tail: Vec<u8>,
}

/// Inputs needed to build a Zen package from an already-parsed legacy asset.
pub struct ZenPackageInput<'a> {
    /// Legacy asset data: exports, object/engine versions.
    pub asset_data: &'a AssetData<PackageIndex>,
    /// Legacy import table.
    pub imports: &'a [Import],
    /// Legacy local name map (index-for-index; reused as the Zen name batch
    /// so that name references embedded in export tails stay valid).
    pub name_map: SharedResource<NameMap>,
    /// This package's own path, e.g. `/Game/Foo/Bar`.
    pub package_path: &'a str,
    /// Reshaped export tails, one per `asset_data.exports` entry.
    pub reshaped_exports: &'a [ReshapedExport],
    /// Script-object catalog used to resolve native class/script imports.
    pub global_data: SharedResource<IoGlobalData>,
    /// Target engine version for the emitted package.
    pub engine_version: EngineVersion,
    /// Original legacy `.uasset` header length. `cookedHeaderSize` is padded
    /// up to this if it's larger than the freshly computed Zen header size.
    pub legacy_header_size: Option<u32>,
}

/// A built Zen package, plus the bookkeeping the container header step
/// (building a [`super::package_store_entry::FilePackageStoreEntry`]) needs.
pub struct ZenPackage {
    /// The full Zen package file: header followed by concatenated exports.
    pub bytes: Vec<u8>,
    /// This package's id.
    pub package_id: PackageId,
    /// External content packages referenced through the import table, in
    /// `importedPackageIndex` order.
    pub imported_packages: Vec<PackageId>,
    /// Number of export bundles this package was written with (always 1;
    /// see the dependency-bundle note on [`build`]).
    pub export_bundle_count: u32,
}

/// Packs/unpacks the 62-bit id of a `PackageImport` [`PackageObjectIndex`],
/// modeled on the engine's `FPackageImportReference`: a 32-bit index into
/// the package's `imported_packages` list and a 30-bit index into its
/// `imported_public_export_hashes` table.
struct PackageImportReference {
    imported_package_index: u32,
    imported_public_export_hash_index: u32,
}

impl PackageImportReference {
    const PACKAGE_INDEX_BITS: u64 = 32;

    fn pack(&self) -> u64 {
        (self.imported_public_export_hash_index as u64) << Self::PACKAGE_INDEX_BITS
            | self.imported_package_index as u64
    }

    fn to_package_object_index(&self) -> PackageObjectIndex {
        PackageObjectIndex::new(self.pack(), EPackageObjectIndexType::PackageImport)
    }
}

/// Resolved POI for one legacy import slot, plus bookkeeping needed to fill
/// in the imported-public-export-hashes table.
enum ResolvedImport {
    Script(PackageObjectIndex),
    Package {
        index: PackageObjectIndex,
        qualified_name: String,
    },
}

/// Renders an `FName`'s string content, appending its numeric instance
/// suffix (`_{number - 1}`) when non-zero — the same rendering the engine
/// uses for qualified object paths, e.g. `number = 304` renders `_303`.
fn render_fname(name: &FName) -> String {
    let content = name.get_owned_content();
    match name.get_number() {
        0 => content,
        number => format!("{content}_{}", number - 1),
    }
}

/// Walks an import's outer chain to the root package import and returns its
/// path (e.g. `/Script/Engine` or `/Game/Foo/Bar`).
fn import_root_path(imports: &[Import], mut slot: usize) -> Result<String, Error> {
    loop {
        let import = imports
            .get(slot)
            .ok_or_else(|| Error::invalid_package_index(format!("import slot {slot} out of range")))?;

        if !import.outer_index.is_import() {
            return Ok(render_fname(&import.object_name));
        }

        slot = (-import.outer_index.index - 1) as usize;
    }
}

/// Builds the fully-qualified, engine-style object path for an import slot
/// by walking its outer chain, joining the top-level package name with `.`
/// and every nested outer with `:`, mirroring [`IoGlobalData::qualified_name_for`].
fn qualified_import_name(imports: &[Import], slot: usize) -> Result<String, Error> {
    let import = imports
        .get(slot)
        .ok_or_else(|| Error::invalid_package_index(format!("import slot {slot} out of range")))?;

    let name = render_fname(&import.object_name);

    if !import.outer_index.is_import() {
        return Ok(name);
    }

    let outer_slot = (-import.outer_index.index - 1) as usize;
    let outer = qualified_import_name(imports, outer_slot)?;

    Ok(match outer.starts_with('/') && !outer.contains('.') {
        true => format!("{outer}.{name}"),
        false => format!("{outer}:{name}"),
    })
}

/// Builds the fully-qualified object path for an export index, walking its
/// outer chain through other exports up to the package root.
fn qualified_export_name(
    exports: &[Export<PackageIndex>],
    idx: usize,
    package_path: &str,
) -> String {
    let export = &exports[idx];
    let base = export.get_base_export();
    let name = render_fname(&base.object_name);

    if !base.outer_index.is_export() {
        return format!("{package_path}.{name}");
    }

    let outer_idx = (base.outer_index.index - 1) as usize;
    let outer = qualified_export_name(exports, outer_idx, package_path);
    format!("{outer}:{name}")
}

/// Resolves every legacy import slot to a Zen `PackageObjectIndex`, remapping
/// `/Script/MaterialTagPlugin` references to `/Script/Engine` along the way.
fn resolve_imports(
    imports: &[Import],
    global_data: &IoGlobalData,
) -> Result<Vec<ResolvedImport>, Error> {
    let mut resolved = Vec::with_capacity(imports.len());

    for slot in 0..imports.len() {
        let root_path = import_root_path(imports, slot)?;

        if root_path.starts_with("/Script/") {
            let qualified = qualified_import_name(imports, slot)?;
            let remapped = material_tag::remap_script_package(&qualified);

            let poi = global_data.get_global_import_index(&remapped).ok_or_else(|| {
                Error::no_data(format!(
                    "script import `{remapped}` was not found in the script object catalog"
                ))
            })?;

            resolved.push(ResolvedImport::Script(poi));
        } else {
            let qualified = qualified_import_name(imports, slot)?;
            resolved.push(ResolvedImport::Package {
                // filled in once every content import's ordinal is known
                index: PackageObjectIndex::default(),
                qualified_name: qualified,
            });
        }
    }

    // Second pass: assign importedPackageIndex/importedPublicExportHashIndex
    // now that every content import's position in declaration order is fixed.
    let mut package_ids: Vec<PackageId> = Vec::new();
    let mut next_hash_index = 0u32;

    for (slot, entry) in resolved.iter_mut().enumerate() {
        if let ResolvedImport::Package { index, .. } = entry {
            let root_path = import_root_path(imports, slot)?;
            let package_id = PackageId::from_name(&root_path);
            let package_index = match package_ids.iter().position(|id| *id == package_id) {
                Some(pos) => pos,
                None => {
                    package_ids.push(package_id);
                    package_ids.len() - 1
                }
            } as u32;

            *index = (PackageImportReference {
                imported_package_index: package_index,
                imported_public_export_hash_index: next_hash_index,
            })
            .to_package_object_index();

            next_hash_index += 1;
        }
    }

    Ok(resolved)
}

/// Topologically orders exports by outer-index: an export's outer is always
/// emitted before it. Exports with no inter-dependency keep their original
/// relative order.
fn topological_export_order(exports: &[Export<PackageIndex>]) -> Vec<usize> {
    let mut order = Vec::with_capacity(exports.len());
    let mut visited = vec![false; exports.len()];

    fn visit(
        idx: usize,
        exports: &[Export<PackageIndex>],
        visited: &mut [bool],
        order: &mut Vec<usize>,
    ) {
        if visited[idx] {
            return;
        }
        visited[idx] = true;

        let outer_index = exports[idx].get_base_export().outer_index;
        if outer_index.is_export() {
            visit((outer_index.index - 1) as usize, exports, visited, order);
        }

        order.push(idx);
    }

    for idx in 0..exports.len() {
        visit(idx, exports, &mut visited, &mut order);
    }

    order
}

/// Builds a Zen package from an already-parsed legacy asset and its
/// reshaped export bytes.
///
/// Dependency bundles are only supported for engine versions below 5.3
/// (the `graph_data_offset` summary layout); versions using the newer
/// `dependency_bundle_headers`/`dependency_bundle_entries` layout are
/// rejected, matching [`super::IoAsset::parse_data`]'s own gap there.
pub fn build(input: ZenPackageInput) -> Result<ZenPackage, Error> {
    if input.engine_version >= EngineVersion::VER_UE5_3 {
        return Err(Error::unimplemented(
            "Zen package builder does not support the >= 5.3 dependency bundle layout".to_string(),
        ));
    }

    if input.asset_data.exports.len() != input.reshaped_exports.len() {
        return Err(Error::no_data(
            "reshaped_exports must have one entry per asset_data.exports entry".to_string(),
        ));
    }

    let (object_version, object_version_ue5) = get_object_versions(input.engine_version);
    let global_data = input.global_data.get_ref();

    let resolved_imports = resolve_imports(input.imports, &global_data)?;

    let mut imported_packages: Vec<PackageId> = Vec::new();
    for slot in 0..input.imports.len() {
        if let ResolvedImport::Package { .. } = &resolved_imports[slot] {
            let root_path = import_root_path(input.imports, slot)?;
            let id = PackageId::from_name(&root_path);
            if !imported_packages.contains(&id) {
                imported_packages.push(id);
            }
        }
    }

    let imported_public_export_hashes: Vec<u64> = resolved_imports
        .iter()
        .filter_map(|e| match e {
            ResolvedImport::Package {
                qualified_name, ..
            } => Some(crc::cityhash64_to_lower(qualified_name)),
            ResolvedImport::Script(_) => None,
        })
        .collect();

    let import_map: Vec<PackageObjectIndex> = resolved_imports
        .iter()
        .map(|e| match e {
            ResolvedImport::Script(poi) => *poi,
            ResolvedImport::Package { index, .. } => *index,
        })
        .collect();

    let order = topological_export_order(&input.asset_data.exports);

    let mut export_map = Vec::with_capacity(input.asset_data.exports.len());
    export_map.resize(
        input.asset_data.exports.len(),
        IoStoreExportMapEntry {
            cooked_serial_offset: 0,
            cooked_serial_size: 0,
            object_name: FMappedName::new(0, 0, EMappedNameType::Package),
            outer_index: PackageObjectIndex::default(),
            class_index: PackageObjectIndex::default(),
            super_index: PackageObjectIndex::default(),
            template_index: PackageObjectIndex::default(),
            global_import_index: None,
            public_export_hash: None,
            object_flags: EObjectFlags::RF_NO_FLAGS,
            filter_flags: EExportFilterFlags::NONE,
            padding: [0; 3],
        },
    );

    let resolve_index = |index: PackageIndex| -> Result<PackageObjectIndex, Error> {
        if index.index == 0 {
            return Ok(PackageObjectIndex::default());
        }
        if index.is_export() {
            return Ok(PackageObjectIndex::new(
                (index.index - 1) as u64,
                EPackageObjectIndexType::Export,
            ));
        }
        let slot = (-index.index - 1) as usize;
        import_map
            .get(slot)
            .copied()
            .ok_or_else(|| Error::invalid_package_index(format!("import slot {slot} out of range")))
    };

    let mut running_offset: u64 = 0;
    for &idx in &order {
        let export = &input.asset_data.exports[idx];
        let base = export.get_base_export();
        let tail_len = input.reshaped_exports[idx].tail.len() as u64;

        let object_name_index = input
            .name_map
            .get_ref()
            .search_name_reference(&base.object_name.get_owned_content())
            .ok_or_else(|| {
                Error::no_data(format!(
                    "export object name `{}` missing from the legacy name map",
                    base.object_name.get_owned_content()
                ))
            })?;

        let public_export_hash = match input.engine_version >= EngineVersion::VER_UE5_0 {
            true => Some(crc::cityhash64_to_lower(&qualified_export_name(
                &input.asset_data.exports,
                idx,
                input.package_path,
            ))),
            false => None,
        };

        export_map[idx] = IoStoreExportMapEntry {
            cooked_serial_offset: running_offset,
            cooked_serial_size: tail_len,
            object_name: FMappedName::new(object_name_index as u32, base.object_name.get_number() as u32, EMappedNameType::Package),
            outer_index: resolve_index(base.outer_index)?,
            class_index: resolve_index(base.class_index)?,
            super_index: resolve_index(base.super_index)?,
            template_index: resolve_index(base.template_index)?,
            global_import_index: None,
            public_export_hash,
            object_flags: base.object_flags,
            filter_flags: {
                let mut flags = EExportFilterFlags::NONE;
                if base.not_for_client {
                    flags |= EExportFilterFlags::NOT_FOR_CLIENT;
                }
                if base.not_for_server {
                    flags |= EExportFilterFlags::NOT_FOR_SERVER;
                }
                flags
            },
            padding: [0; 3],
        };

        running_offset += tail_len;
    }

    let export_count = input.asset_data.exports.len();
    let mut export_bundle_entries = Vec::with_capacity(export_count * 2);
    for &idx in &order {
        export_bundle_entries.push(ExportBundleEntry {
            local_export_index: idx as u32,
            command_type: EExportCommandType::Create,
        });
    }
    for &idx in &order {
        export_bundle_entries.push(ExportBundleEntry {
            local_export_index: idx as u32,
            command_type: EExportCommandType::Serialize,
        });
    }

    let graph_data = IoStoreGraphData {
        export_bundle_headers: vec![ExportBundleHeader {
            serial_offset: 0,
            first_entry_index: 0,
            entry_count: export_bundle_entries.len() as u32,
        }],
        internal_arcs: Vec::new(),
        arcs_from_imported_packages: Default::default(),
    };

    let package_name_index = {
        let package_short_name = input
            .package_path
            .rsplit('/')
            .next()
            .unwrap_or(input.package_path);
        input
            .name_map
            .get_ref()
            .search_name_reference(package_short_name)
            .unwrap_or(0)
    };

    let mut header_bytes = Vec::new();
    {
        let mut cursor = Cursor::new(&mut header_bytes);
        let mut writer = RawWriter::<PackageObjectIndex, _>::new(
            &mut cursor,
            object_version,
            object_version_ue5,
            input.asset_data.use_event_driven_loader,
            input.name_map.clone(),
        );

        // Reserve space for the fixed-size summary; it's rewritten once
        // every offset below it is known.
        let summary_placeholder = ZenPackageSummary {
            has_versioning_info: false,
            header_size: 0,
            name: FMappedName::new(package_name_index as u32, 0, EMappedNameType::Package),
            package_flags: input.asset_data.summary.package_flags,
            cooked_header_size: 0,
            imported_public_export_hashes_offset: 0,
            import_map_offset: 0,
            export_map_offset: 0,
            export_bundle_entries_offset: 0,
            graph_data_offset: Some(0),
            dependency_bundle_headers_offset: None,
            dependency_bundle_entries_offset: None,
        };
        summary_placeholder.write(&mut writer)?;

        let local_names: Vec<String> = input
            .name_map
            .get_ref()
            .get_name_map_index_list()
            .iter()
            .map(|name| name.to_string())
            .collect();
        let name_batch: Vec<FNameEntrySerialized> = local_names
            .into_iter()
            .map(|name| FNameEntrySerialized::new(Some(name)))
            .collect();
        FNameEntrySerialized::write_name_batch(&name_batch, &mut writer)?;

        let imported_public_export_hashes_offset = writer.position();
        for hash in &imported_public_export_hashes {
            writer.write_u64::<LE>(*hash)?;
        }

        let import_map_offset = writer.position();
        for poi in &import_map {
            poi.write(&mut writer)?;
        }

        let export_map_offset = writer.position();
        for entry in &export_map {
            entry.write(&mut writer)?;
        }

        let export_bundle_entries_offset = writer.position();
        for entry in &export_bundle_entries {
            entry.write(&mut writer)?;
        }

        let graph_data_offset = writer.position();
        graph_data.write(&mut writer, &imported_packages)?;

        let header_size = writer.position() as u32;
        let cooked_header_size = input
            .legacy_header_size
            .map(|size| size.max(header_size))
            .unwrap_or(header_size);

        if cooked_header_size > header_size {
            writer.write_all(&vec![0u8; (cooked_header_size - header_size) as usize])?;
        }

        let final_header_size = writer.position() as u32;

        let summary = ZenPackageSummary {
            has_versioning_info: false,
            header_size: final_header_size,
            name: summary_placeholder.name,
            package_flags: input.asset_data.summary.package_flags,
            cooked_header_size,
            imported_public_export_hashes_offset: imported_public_export_hashes_offset as i32,
            import_map_offset: import_map_offset as i32,
            export_map_offset: export_map_offset as i32,
            export_bundle_entries_offset: export_bundle_entries_offset as i32,
            graph_data_offset: Some(graph_data_offset as i32),
            dependency_bundle_headers_offset: None,
            dependency_bundle_entries_offset: None,
        };

        // `ZenPackageSummary` is fixed-size for a given engine-version branch,
        // so overwriting it in place here doesn't disturb anything after it.
        writer.seek(SeekFrom::Start(0))?;
        summary.write(&mut writer)?;
    }

    let mut bytes = header_bytes;
    for &idx in &order {
        bytes.extend_from_slice(&input.reshaped_exports[idx].tail);
    }
    bytes.extend_from_slice(&[0xc1, 0x83, 0x2a, 0x9e]);

    Ok(ZenPackage {
        bytes,
        package_id: PackageId::from_name(input.package_path),
        imported_packages,
        export_bundle_count: 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import(class_name: &str, outer_index: PackageIndex, object_name: &str) -> Import {
        Import::new(
            FName::from_slice("/Script/CoreUObject"),
            FName::from_slice(class_name),
            outer_index,
            FName::from_slice(object_name),
            false,
        )
    }

    fn script_package_imports() -> Vec<Import> {
        vec![
            import("Package", PackageIndex::new(0), "/Script/Engine"),
            import("Class", PackageIndex::from_import(0).unwrap(), "StaticMesh"),
        ]
    }

    #[test]
    fn import_root_path_walks_to_the_top_level_package() {
        let imports = script_package_imports();
        assert_eq!(import_root_path(&imports, 1).unwrap(), "/Script/Engine");
    }

    #[test]
    fn qualified_import_name_joins_top_level_with_a_dot() {
        let imports = script_package_imports();
        assert_eq!(
            qualified_import_name(&imports, 1).unwrap(),
            "/Script/Engine.StaticMesh"
        );
    }

    #[test]
    fn qualified_import_name_joins_nested_outers_with_a_colon() {
        let mut imports = script_package_imports();
        imports.push(import("Function", PackageIndex::from_import(1).unwrap(), "OnHit"));
        assert_eq!(
            qualified_import_name(&imports, 2).unwrap(),
            "/Script/Engine.StaticMesh:OnHit"
        );
    }

    #[test]
    fn render_fname_appends_suffix_only_when_nonzero() {
        assert_eq!(
            render_fname(&FName::new_dummy("LODSettings".to_string(), 0)),
            "LODSettings"
        );
        assert_eq!(
            render_fname(&FName::new_dummy("LODSettings".to_string(), 304)),
            "LODSettings_303"
        );
    }

    #[test]
    fn qualified_import_name_includes_a_suffixed_leaf_name() {
        let mut imports = script_package_imports();
        imports.push(Import::new(
            FName::from_slice("/Script/CoreUObject"),
            FName::from_slice("Function"),
            PackageIndex::from_import(1).unwrap(),
            FName::new_dummy("OnHit".to_string(), 2),
            false,
        ));
        assert_eq!(
            qualified_import_name(&imports, 2).unwrap(),
            "/Script/Engine.StaticMesh:OnHit_1"
        );
    }

    #[test]
    fn package_import_reference_round_trips_through_its_bit_packing() {
        let reference = PackageImportReference {
            imported_package_index: 7,
            imported_public_export_hash_index: 3,
        };
        let poi = reference.to_package_object_index();
        assert_eq!(poi.ty, EPackageObjectIndexType::PackageImport);
        assert_eq!(poi.id, reference.pack());
    }
}
