//! Identifier types for the identity domain.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a roster profile.
///
/// Always equal to the identity provider's principal id for the same person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(Uuid);

impl_uuid_id!(ProfileId, "profile");
