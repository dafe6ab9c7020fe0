//! Literate background reading with no runtime behavior, gathered here so
//! it doesn't clutter the doc comments of the types that use it.

pub mod length_extension;
