//! Identifier types and the [IdIssuer] helper.
//!
//! `ObjectId`, `SnapshotId`, and `FrameId` are opaque, comparable, unsigned integers;
//! the store owns their allocation through one [IdIssuer] per id space.

use thiserror::Error;

macro_rules! id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(u64);

        impl $name {
            pub fn from_raw(value: u64) -> Self {
                $name(value)
            }

            pub fn raw(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(ObjectId, "Stable identity of a design object across its versions.");
id_type!(SnapshotId, "Identity of one specific version of an object.");
id_type!(FrameId, "Identity of a frame (a stable snapshot of a whole design state).");

/// Raised by [IdIssuer::new] when the highest id already in use leaves no headroom to
/// keep issuing ids without wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("id space exhausted")]
pub struct IdOverflow;

/// Monotonic id allocator for one id space. Every id-bearing structure in a `Design`
/// (objects, snapshots, frames) gets its own issuer.
#[derive(Debug, Clone)]
pub struct IdIssuer {
    next_available: u64,
}

impl IdIssuer {
    /// Fresh issuer starting at zero.
    pub fn new() -> Self {
        IdIssuer { next_available: 0 }
    }

    /// Rebuilds an issuer consistent with a pool of already-used raw ids (e.g. when
    /// reloading a design from a raw interchange representation).
    pub fn resuming_after(used_ids: impl Iterator<Item = u64>) -> Result<Self, IdOverflow> {
        let max_used = used_ids.max();
        let next_available = match max_used {
            None => 0,
            Some(val) => {
                if val > (u64::MAX >> 1) {
                    return Err(IdOverflow);
                }
                val + 1
            }
        };
        Ok(IdIssuer { next_available })
    }

    pub fn next(&mut self) -> u64 {
        let id = self.next_available;
        self.next_available += 1;
        id
    }
}

impl Default for IdIssuer {
    fn default() -> Self {
        Self::new()
    }
}
