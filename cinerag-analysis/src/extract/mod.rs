//! Entity and relation extraction.

pub mod entities;
pub mod relations;
