//! The [`OwnerId`] handle identifying the user a session is bound to.

use std::fmt;

/// Identifies the user a menu session or surface belongs to.
///
/// Menus keep this only for equality checks when filtering events; the
/// owner's actual connection state lives in the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OwnerId(pub u64);

impl OwnerId {
    /// Construct from a raw host-assigned identifier.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "owner#{}", self.0)
    }
}
