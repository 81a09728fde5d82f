//! Purpose: Define the public Rust API boundary for monsterbuf.
//! Exports: Schema views and builders, owned records, sample checks, codec, storage, errors.
//! Role: Additive-only surface used by the CLI and integration tests.
//! Invariants: This module is the only public path to `core`.

pub use crate::core::codec::{BufferInfo, Framing, VerifyLimits, decode, encode, sha256_hex};
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::record::{ColorName, MonsterRecord, Vec3Record, WeaponRecord};
pub use crate::core::sample::{
    SampleIssue, SampleReport, SampleStatus, build_sample, check_sample, summary_lines,
};
pub use crate::core::schema;
pub use crate::core::storage::{MappedBuffer, write_buffer};
