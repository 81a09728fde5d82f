//! Purpose: Library crate behind the `monsterbuf` CLI and its tests.
//! Exports: `api` (schema bindings, sample checks, codec, storage, errors).
//! Role: Keeps FlatBuffers details out of the binary; the CLI only speaks `api`.
//! Invariants: Everything public goes through `api`; `core` stays private.
mod core;

pub mod api;
