//! Purpose: Turn records into finished Monster buffers and verify untrusted bytes back into views.
//! Exports: `encode`, `decode`, `Framing`, `VerifyLimits`, `BufferInfo`, `sha256_hex`.
//! Role: The only path from raw bytes to a `Monster`; storage and the CLI go through it.
//! Invariants: `decode` never hands out a view of bytes that failed verification.
//! Invariants: Verification failures are `ErrorKind::Corrupt`, with the verifier error as source.
use flatbuffers::{FlatBufferBuilder, VerifierOptions};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::core::error::{Error, ErrorKind};
use crate::core::record::MonsterRecord;
use crate::core::schema::{
    Monster, finish_monster_buffer, finish_size_prefixed_monster_buffer,
    root_as_monster_with_opts, size_prefixed_root_as_monster_with_opts,
};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Framing {
    #[default]
    Plain,
    /// A little-endian `u32` byte count precedes the buffer.
    SizePrefixed,
}

impl Framing {
    pub fn from_flag(size_prefixed: bool) -> Self {
        if size_prefixed {
            Framing::SizePrefixed
        } else {
            Framing::Plain
        }
    }
}

/// Upper bounds applied while verifying untrusted bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VerifyLimits {
    pub max_depth: usize,
    pub max_tables: usize,
    pub max_apparent_size: usize,
}

impl Default for VerifyLimits {
    fn default() -> Self {
        let opts = VerifierOptions::default();
        Self {
            max_depth: opts.max_depth,
            max_tables: opts.max_tables,
            max_apparent_size: opts.max_apparent_size,
        }
    }
}

impl VerifyLimits {
    pub fn verifier_options(&self) -> VerifierOptions {
        VerifierOptions {
            max_depth: self.max_depth,
            max_tables: self.max_tables,
            max_apparent_size: self.max_apparent_size,
            ..VerifierOptions::default()
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BufferInfo {
    pub len: usize,
    pub framing: Framing,
    pub sha256: String,
}

impl BufferInfo {
    pub fn describe(bytes: &[u8], framing: Framing) -> Self {
        Self {
            len: bytes.len(),
            framing,
            sha256: sha256_hex(bytes),
        }
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

pub fn encode(record: &MonsterRecord, framing: Framing) -> Vec<u8> {
    let mut fbb = FlatBufferBuilder::with_capacity(1024);
    let root = record.pack(&mut fbb);
    match framing {
        Framing::Plain => finish_monster_buffer(&mut fbb, root),
        Framing::SizePrefixed => finish_size_prefixed_monster_buffer(&mut fbb, root),
    }
    let bytes = fbb.finished_data().to_vec();
    tracing::debug!(len = bytes.len(), ?framing, "encoded monster buffer");
    bytes
}

/// Verifies `bytes` and returns the root `Monster` borrowing from them.
pub fn decode(
    bytes: &[u8],
    framing: Framing,
    limits: VerifyLimits,
) -> Result<Monster<'_>, Error> {
    let opts = limits.verifier_options();
    let result = match framing {
        Framing::Plain => root_as_monster_with_opts(&opts, bytes),
        Framing::SizePrefixed => size_prefixed_root_as_monster_with_opts(&opts, bytes),
    };
    result.map_err(|err| {
        let hint = match framing {
            Framing::Plain => {
                "If the buffer was written with --size-prefixed, read it the same way."
            }
            Framing::SizePrefixed => "If the buffer has no length prefix, drop --size-prefixed.",
        };
        Error::new(ErrorKind::Corrupt)
            .with_message("buffer failed verification")
            .with_hint(hint)
            .with_source(err)
    })
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::{BufferInfo, Framing, VerifyLimits, decode, encode, sha256_hex};
    use crate::core::error::ErrorKind;
    use crate::core::record::MonsterRecord;

    #[test]
    fn sha256_matches_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn size_prefix_carries_the_body_length() {
        let bytes = encode(&MonsterRecord::sample(), Framing::SizePrefixed);
        let prefix = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
        assert_eq!(prefix, bytes.len() - 4);

        let monster =
            decode(&bytes, Framing::SizePrefixed, VerifyLimits::default()).expect("decode");
        assert_eq!(monster.hp(), 80);
    }

    #[test]
    fn unverifiable_bytes_are_corrupt_with_framing_hint() {
        let bytes = [0xFFu8; 16];
        let err = decode(&bytes, Framing::SizePrefixed, VerifyLimits::default())
            .expect_err("should fail");
        assert_eq!(err.kind(), ErrorKind::Corrupt);
        assert!(err.hint().unwrap_or_default().contains("--size-prefixed"));
    }

    #[test]
    fn verifier_detail_lives_only_in_the_source() {
        let err = decode(&[0xFFu8; 16], Framing::Plain, VerifyLimits::default())
            .expect_err("should fail");
        assert_eq!(err.message(), Some("buffer failed verification"));
        let detail = err.source().expect("verifier error").to_string();
        assert!(!detail.is_empty());
        assert!(!err.message().unwrap_or_default().contains(&detail));
    }

    #[test]
    fn tight_table_limit_rejects_the_sample() {
        let bytes = encode(&MonsterRecord::sample(), Framing::Plain);
        let limits = VerifyLimits {
            max_tables: 1,
            ..VerifyLimits::default()
        };
        let err = decode(&bytes, Framing::Plain, limits).expect_err("should fail");
        assert_eq!(err.kind(), ErrorKind::Corrupt);
    }

    #[test]
    fn buffer_info_reports_length_and_digest() {
        let bytes = encode(&MonsterRecord::sample(), Framing::Plain);
        let info = BufferInfo::describe(&bytes, Framing::Plain);
        assert_eq!(info.len, bytes.len());
        assert_eq!(info.sha256.len(), 64);
        assert_eq!(info.sha256, sha256_hex(&bytes));
    }
}
