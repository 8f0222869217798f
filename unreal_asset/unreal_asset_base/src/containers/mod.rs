//! Various containers

pub mod chain;
pub use chain::Chain;

pub mod indexed_map;
pub use indexed_map::IndexedMap;

pub mod name_map;
pub use name_map::NameMap;

pub mod shared_resource;
pub use shared_resource::SharedResource;
