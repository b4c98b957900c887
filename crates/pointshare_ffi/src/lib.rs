//! FFI surface of the share-points core.

pub mod api;
