//! Strongly-typed identifiers for domain entities

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }

        impl CanonicalId for $name {
            fn canonical(&self) -> String {
                self.0.canonical()
            }
        }
    };
}

/// An identifier that can be reduced to a comparable string form.
///
/// Identifiers cross serialization boundaries (stored documents carry plain
/// strings, in-memory entities carry typed ids), so two references to the same
/// character may arrive in different representations. Comparisons go through
/// the canonical form: trimmed and ASCII-lowercased.
pub trait CanonicalId {
    fn canonical(&self) -> String;
}

impl CanonicalId for Uuid {
    fn canonical(&self) -> String {
        // Hyphenated lowercase is already canonical
        self.hyphenated().to_string()
    }
}

impl CanonicalId for str {
    fn canonical(&self) -> String {
        self.trim().to_ascii_lowercase()
    }
}

impl CanonicalId for String {
    fn canonical(&self) -> String {
        self.as_str().canonical()
    }
}

impl<T: CanonicalId + ?Sized> CanonicalId for &T {
    fn canonical(&self) -> String {
        (**self).canonical()
    }
}

/// Compare two identifiers by their canonical string forms
pub fn same_identity<A, B>(a: &A, b: &B) -> bool
where
    A: CanonicalId + ?Sized,
    B: CanonicalId + ?Sized,
{
    a.canonical() == b.canonical()
}

define_id!(EncounterId);
define_id!(CharacterId);
