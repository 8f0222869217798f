//! Content-addressed store (`.ucas`) reader and writer

pub mod reader;
pub mod writer;
