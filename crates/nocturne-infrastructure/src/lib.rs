//! Storage backends for Nocturne.
//!
//! This crate implements the persistence interfaces declared in
//! `nocturne-core` on top of the local filesystem: a TOML ledger with
//! atomic writes and advisory locking, plus platform path resolution.

pub mod night_repository;
pub mod paths;
pub mod storage;

pub use night_repository::TomlNightRepository;
pub use paths::NocturnePaths;
