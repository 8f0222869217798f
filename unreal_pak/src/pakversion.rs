//! Used to represent the version of a pak file

/// Enum representing all versions of the pak file format
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum PakVersion {
    /// Initial version
    PakFileVersionInitial,
    /// Version in which timestamps were removed
    PakFileVersionNoTimestamps,
    /// First version to support compression and encryption
    PakFileVersionCompressionEncryption,
    /// First version to support index encryption
    PakFileVersionIndexEncryption,
    /// Version in which compression chunk offsets were made relative to the header of the file
    PakFileVersionRelativeChunkOffsets,
    /// First version to support delete records
    PakFileVersionDeleteRecords,
    /// First version to include GUID of the used encryption key
    PakFileVersionEncryptionKeyGuid,
    /// Weird version used by just UE 4.22. Also sometimes called pak v8a.
    PakFileVersionFnameBasedCompressionMethodInitial,
    /// First version to list the names of used compression alghorithms. Also sometimes called pak v8b.
    PakFileVersionFnameBasedCompressionMethod,
    /// Only version which had the frozen index byte
    PakFileVersionFrozenIndex,
    /// Version which reworked how the index is structured
    PakFileVersionPathHashIndex,
    /// Bug Fix version
    PakFileVersionFnv64BugFix,

    /// Invalid version
    PakFileVersionInvalid,
}

impl PakVersion {
    /// Create version from a u32.
    pub fn from_num(version: u32) -> Self {
        match version {
            1 => Self::PakFileVersionInitial,
            2 => Self::PakFileVersionNoTimestamps,
            3 => Self::PakFileVersionCompressionEncryption,
            4 => Self::PakFileVersionIndexEncryption,
            5 => Self::PakFileVersionRelativeChunkOffsets,
            6 => Self::PakFileVersionDeleteRecords,
            7 => Self::PakFileVersionEncryptionKeyGuid,
            8 => Self::PakFileVersionFnameBasedCompressionMethod,
            9 => Self::PakFileVersionFrozenIndex,
            10 => Self::PakFileVersionPathHashIndex,
            11 => Self::PakFileVersionFnv64BugFix,
            _ => Self::PakFileVersionInvalid,
        }
    }

    /// Convert version to a u32.
    pub fn to_num(&self) -> u32 {
        match self {
            Self::PakFileVersionInitial => 1,
            Self::PakFileVersionNoTimestamps => 2,
            Self::PakFileVersionCompressionEncryption => 3,
            Self::PakFileVersionIndexEncryption => 4,
            Self::PakFileVersionRelativeChunkOffsets => 5,
            Self::PakFileVersionDeleteRecords => 6,
            Self::PakFileVersionEncryptionKeyGuid => 7,
            Self::PakFileVersionFnameBasedCompressionMethodInitial => 8,
            Self::PakFileVersionFnameBasedCompressionMethod => 8,
            Self::PakFileVersionFrozenIndex => 9,
            Self::PakFileVersionPathHashIndex => 10,
            Self::PakFileVersionFnv64BugFix => 11,
            Self::PakFileVersionInvalid => panic!("Attempted to write invalid pak version as byte!"),
        }
    }

    // how to deal with the stupid 4.22 version
    pub(crate) fn set_subversion(&mut self) {
        if matches!(self, Self::PakFileVersionFnameBasedCompressionMethod) {
            *self = Self::PakFileVersionFnameBasedCompressionMethodInitial;
        }
    }
}
