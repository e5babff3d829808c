use serde::{Deserialize, Serialize};

/// Execution context a hook runs in.
///
/// Only the server realm is authoritative; on the client every hook is a
/// guarded no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Realm {
    #[default]
    Server,
    Client,
}

impl Realm {
    #[must_use]
    pub const fn is_server(&self) -> bool {
        matches!(self, Self::Server)
    }
}
