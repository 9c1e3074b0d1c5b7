//! Matrix-Market coordinate loader producing a [`graphdelta_core::DiGraph`].

mod errors;
mod loader;

pub use errors::MtxError;
pub use loader::{MtxGraph, try_from_path, try_from_reader};
