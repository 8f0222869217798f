//! Archive readers/writers

pub mod archive_reader;
pub use archive_reader::ArchiveReader;

pub mod archive_trait;
pub use archive_trait::ArchiveTrait;
pub use archive_trait::ArchiveType;

pub mod archive_writer;
pub use archive_writer::ArchiveWriter;

pub mod raw_reader;
pub use raw_reader::RawReader;

pub mod raw_writer;
pub use raw_writer::RawWriter;
