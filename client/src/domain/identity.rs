//! [`Identity`] definitions.

use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

/// Identity of a signed-in visitor.
///
/// Supplied by the content API on a successful token exchange or session
/// check. Beyond its [`Id`] the payload is opaque to this subsystem: whatever
/// else the API returns is carried along untouched in [`Identity::claims`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Identity {
    /// ID of the visitor.
    pub id: Id,

    /// Remaining fields of the payload, carried as-is.
    #[serde(flatten)]
    pub claims: serde_json::Map<String, serde_json::Value>,
}

impl Identity {
    /// Returns the application route of this visitor's profile page.
    #[must_use]
    pub fn profile_route(&self) -> String {
        format!("/users/{}", self.id)
    }

    /// Checks whether this [`Identity`] belongs to the [`User`] with the
    /// provided [`Id`] (e.g. whether the viewer is an article's author).
    ///
    /// [`User`]: Identity
    #[must_use]
    pub fn is(&self, id: Id) -> bool {
        self.id == id
    }
}

/// ID of an [`Identity`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(i64);

#[cfg(test)]
mod spec {
    use serde_json::json;

    use super::Identity;

    #[test]
    fn deserializes_opaque_claims() {
        let identity: Identity =
            serde_json::from_value(json!({"id": 7, "nickname": "x"}))
                .unwrap();

        assert_eq!(identity.id, 7.into());
        assert_eq!(identity.claims["nickname"], json!("x"));
    }

    #[test]
    fn profile_route_uses_id() {
        let identity: Identity =
            serde_json::from_value(json!({"id": 7})).unwrap();

        assert_eq!(identity.profile_route(), "/users/7");
        assert!(identity.is(7.into()));
        assert!(!identity.is(8.into()));
    }
}
