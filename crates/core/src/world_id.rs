//! World identity.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a world instance.
///
/// The backend currently runs a single default world; the id is carried on
/// every persisted row so multi-world storage stays possible without a schema
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorldId(Uuid);

impl WorldId {
    /// The single default world every request targets today.
    pub const DEFAULT: WorldId = WorldId(Uuid::nil());

    /// Mint a fresh random world id.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Underlying UUID.
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for WorldId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
