#![forbid(clippy::mod_module_files)]

pub mod error;
pub mod index_mapping;
mod io;
pub mod mmax;
pub mod token_aligner;

pub use generic_a_star::cost::U64Cost;
