use serde::{Serialize, Serializer};

use crate::timestamp::Timestamp;

/// Rendering of [`PermissionFlags::NotDeterminable`].
pub const NOT_DETERMINABLE: &str = "notdeterm";

/// Access bits of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionFlags {
    /// The nine `rwxr-xr-x` characters following the type character.
    Unix(String),
    /// Windows listings carry no permission bits.
    NotDeterminable,
}

impl PermissionFlags {
    pub fn as_str(&self) -> &str {
        match self {
            PermissionFlags::Unix(flags) => flags,
            PermissionFlags::NotDeterminable => NOT_DETERMINABLE,
        }
    }

    /// Octal mode for Unix flags, e.g. `rwxr-xr-x` is `0o755`.
    pub fn mode(&self) -> Option<u32> {
        let PermissionFlags::Unix(flags) = self else {
            return None;
        };

        let mut mode = 0;
        for (i, c) in flags.bytes().take(9).enumerate() {
            if c != b'-' {
                mode |= 1 << (8 - i);
            }
        }
        Some(mode)
    }
}

impl Serialize for PermissionFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One file or directory parsed from a listing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Base name, no path.
    pub name: String,
    pub is_directory: bool,
    pub permissions: PermissionFlags,
    /// Only Unix listings name an owner.
    pub owner: Option<String>,
    pub modified: Timestamp,
}

impl Entry {
    #[inline]
    pub fn is_file(&self) -> bool {
        !self.is_directory
    }

    /// Navigation entries and empty names never reach a [`crate::Listing`].
    #[inline]
    pub fn is_synthetic(&self) -> bool {
        is_synthetic_name(&self.name)
    }
}

#[inline]
pub(crate) fn is_synthetic_name(name: &str) -> bool {
    matches!(name, "" | "." | "..")
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
