#![deny(missing_docs)]
#![allow(non_upper_case_globals)]

//! This crate is used for parsing Unreal Engine uasset files
//!
//! # Examples
//!
//! ## Reading an asset that doesn't use bulk data
//!
//! ```no_run
//! use std::fs::File;
//!
//! use unreal_asset::{
//!     Asset,
//!     engine_version::EngineVersion,
//! };
//!
//! let mut file = File::open("asset.uasset").unwrap();
//! let mut asset = Asset::new(file, None, EngineVersion::VER_UE4_23, None).unwrap();
//!
//! println!("{:#?}", asset);
//! ```
//!
//! ## Reading an asset that uses bulk data
//!
//! ```no_run
//! use std::fs::File;
//!
//! use unreal_asset::{
//!     Asset,
//!     engine_version::EngineVersion,
//! };
//!
//! let mut file = File::open("asset.uasset").unwrap();
//! let mut bulk_file = File::open("asset.uexp").unwrap();
//! let mut asset = Asset::new(file, Some(bulk_file), EngineVersion::VER_UE4_23, None).unwrap();
//!
//! println!("{:#?}", asset);
//! ```

pub use unreal_asset_base::*;
pub use unreal_asset_exports::*;
pub use unreal_asset_properties::*;
pub use unreal_asset_registry::*;

pub mod ac7;
pub mod asset;
pub mod asset_archive_writer;
pub mod asset_data;
pub mod fengineversion;
pub mod iostore;
pub mod package_file_summary;
pub mod reshape;

pub use asset::Asset;

/// Magic number for a legacy (non-Zen) Unreal Engine asset.
pub const UE4_ASSET_MAGIC: u32 = u32::from_be_bytes([0xc1, 0x83, 0x2a, 0x9e]);
