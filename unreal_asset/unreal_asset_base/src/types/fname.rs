//! FName is used to store most of the strings present in a cooked package.
//!
//! They are represented by an index+instance number into a name map that is
//! serialized alongside the asset (or, for IoStore packages, the global name map).

use std::hash::Hash;

use crate::containers::{indexed_map::IndexedMap, shared_resource::SharedResource};
use crate::containers::name_map::NameMap;

/// FName is used to store most of the strings present in a cooked package.
///
/// They are represented by an index+instance number inside a name map.
#[derive(Debug, Clone)]
pub enum FName {
    /// Backed FName that is part of a name map
    Backed {
        /// FName name map index
        index: i32,
        /// FName instance number
        number: i32,
        /// Name map this FName belongs to
        name_map: SharedResource<NameMap>,
    },
    /// Dummy FName that is not backed by any name map.
    ///
    /// Serializing a dummy FName will result in an `FNameError`.
    Dummy {
        /// FName value
        value: String,
        /// FName instance number
        number: i32,
    },
}

impl FName {
    /// Create a new `FName` instance backed by a name map
    pub fn new(index: i32, number: i32, name_map: SharedResource<NameMap>) -> Self {
        FName::Backed {
            index,
            number,
            name_map,
        }
    }

    /// Create a new dummy `FName` instance from a string and an instance number
    pub fn new_dummy(value: String, number: i32) -> Self {
        FName::Dummy { value, number }
    }

    /// Create a new dummy `FName` instance from a string with an instance number of 0
    pub fn from_slice(value: &str) -> Self {
        FName::new_dummy(value.to_string(), 0)
    }

    /// Get this FName's instance number
    pub fn get_number(&self) -> i32 {
        match self {
            FName::Backed { number, .. } => *number,
            FName::Dummy { number, .. } => *number,
        }
    }

    /// Run a closure over the string content of this `FName`.
    ///
    /// Takes a closure rather than returning a borrow directly because a backed
    /// `FName`'s content lives behind a `SharedResource` borrow.
    pub fn get_content<T>(&self, func: impl FnOnce(&str) -> T) -> T {
        match self {
            FName::Backed {
                index, name_map, ..
            } => func(&name_map.get_ref().get_name_reference(*index)),
            FName::Dummy { value, .. } => func(value),
        }
    }

    /// Get an owned copy of this FName's string content
    pub fn get_owned_content(&self) -> String {
        self.get_content(|name| name.to_string())
    }
}

impl PartialEq for FName {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                FName::Backed {
                    index: a_index,
                    number: a_number,
                    ..
                },
                FName::Backed {
                    index: b_index,
                    number: b_number,
                    ..
                },
            ) => a_index == b_index && a_number == b_number,
            (
                FName::Dummy {
                    value: a_value,
                    number: a_number,
                },
                FName::Dummy {
                    value: b_value,
                    number: b_number,
                },
            ) => a_value == b_value && a_number == b_number,
            _ => self.get_content(|a| a.to_string()) == other.get_content(|b| b.to_string())
                && self.get_number() == other.get_number(),
        }
    }
}

impl Eq for FName {}

impl Hash for FName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.get_content(|name| name.hash(state));
        self.get_number().hash(state);
    }
}

impl Default for FName {
    fn default() -> Self {
        FName::Dummy {
            value: String::default(),
            number: i32::default(),
        }
    }
}

/// A trait that can be implemented for structs that contain an FName.
///
/// Used to traverse a whole asset's FName tree, e.g. when rebuilding a name map.
pub trait FNameContainer {
    /// Traverse this FName container, calling `traverse` for every FName inside of it
    fn traverse_fnames<F: FnMut(&mut FName)>(&mut self, traverse: &mut F);
}

impl FNameContainer for FName {
    fn traverse_fnames<F: FnMut(&mut FName)>(&mut self, traverse: &mut F) {
        traverse(self);
    }
}

impl<T: FNameContainer> FNameContainer for Vec<T> {
    fn traverse_fnames<F: FnMut(&mut FName)>(&mut self, traverse: &mut F) {
        for e in self.iter_mut() {
            e.traverse_fnames(traverse);
        }
    }
}

impl<T: FNameContainer> FNameContainer for Box<T> {
    fn traverse_fnames<F: FnMut(&mut FName)>(&mut self, traverse: &mut F) {
        self.as_mut().traverse_fnames(traverse)
    }
}

impl<K, V> FNameContainer for IndexedMap<K, V>
where
    K: Eq + Hash + FNameContainer + Clone,
    V: FNameContainer + Clone,
{
    fn traverse_fnames<F: FnMut(&mut FName)>(&mut self, traverse: &mut F) {
        *self = self
            .clone()
            .into_iter()
            .map(|(_, mut key, mut value)| {
                key.traverse_fnames(traverse);
                value.traverse_fnames(traverse);
                (key, value)
            })
            .collect::<IndexedMap<K, V>>();
    }
}

impl<T: FNameContainer> FNameContainer for Option<T> {
    fn traverse_fnames<F: FnMut(&mut FName)>(&mut self, traverse: &mut F) {
        if let Some(e) = self {
            e.traverse_fnames(traverse);
        }
    }
}

impl<T: FNameContainer> FNameContainer for SharedResource<T> {
    fn traverse_fnames<F: FnMut(&mut FName)>(&mut self, traverse: &mut F) {
        let mut mut_self = self.get_mut();
        mut_self.traverse_fnames(traverse);
    }
}

impl<T: ordered_float::Float> FNameContainer for ordered_float::OrderedFloat<T> {
    fn traverse_fnames<F: FnMut(&mut FName)>(&mut self, _: &mut F) {}
}

macro_rules! dummy_container_impl {
    ($($ty:ty),*) => {
        $(
            impl FNameContainer for $ty {
                fn traverse_fnames<F: FnMut(&mut FName)>(&mut self, _: &mut F) {}
            }
        )*
    };
}

macro_rules! tuple_container_impl {
    ($($name:ident),*) => {
        impl<$($name:FNameContainer),*> FNameContainer for ($($name,)*)
        {
            fn traverse_fnames<F: FnMut(&mut FName)>(&mut self, traverse: &mut F) {
                #[allow(non_snake_case)]
                let ($($name,)+) = self;
                $($name.traverse_fnames(traverse);)*
            }
        }
    };
}

dummy_container_impl!(
    u8,
    u16,
    u32,
    u64,
    i8,
    i16,
    i32,
    i64,
    f32,
    f64,
    bool,
    String,
    crate::Guid
);
tuple_container_impl!(A);
tuple_container_impl!(A, B);
tuple_container_impl!(A, B, C);
tuple_container_impl!(A, B, C, D);
tuple_container_impl!(A, B, C, D, E);
tuple_container_impl!(A, B, C, D, E, G);
tuple_container_impl!(A, B, C, D, E, G, H);
tuple_container_impl!(A, B, C, D, E, G, H, I);
tuple_container_impl!(A, B, C, D, E, G, H, I, J);
tuple_container_impl!(A, B, C, D, E, G, H, I, J, K);
tuple_container_impl!(A, B, C, D, E, G, H, I, J, K, L);
tuple_container_impl!(A, B, C, D, E, G, H, I, J, K, L, M);
