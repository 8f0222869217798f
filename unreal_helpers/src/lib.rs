#![deny(missing_docs)]

//! Various small functions to make working with Unreal data formats easier.

pub mod bitvec_ext;
pub use bitvec_ext::BitVecExt;
pub mod read_ext;
pub use read_ext::UnrealReadExt;
pub mod write_ext;
pub use write_ext::UnrealWriteExt;

pub mod path;
pub use path::game_to_absolute;
