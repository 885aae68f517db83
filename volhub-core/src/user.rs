//! User documents.

use serde::{Deserialize, Serialize};

/// A platform user: written once at registration, mirroring the auth
/// identity, and read back for profile display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    pub name: String,
    pub email: String,
}
