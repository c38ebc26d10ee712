//! Navigation data definitions.
//!
//! These mirror the JSON bodies of the content API's list endpoints the page
//! frame is built from.

use serde::{Deserialize, Serialize};

use super::identity;

/// Tag articles are labeled with.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Tag {
    /// ID of this [`Tag`].
    pub id: i64,

    /// Name of this [`Tag`].
    pub tag: String,
}

/// Public summary of a platform user.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct UserInfo {
    /// ID of the user.
    pub id: identity::Id,

    /// Display name of the user.
    pub nickname: Option<String>,

    /// Avatar URL of the user.
    pub avatar: Option<String>,
}

/// Catalogue grouping articles into an ordered collection.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Catalogue {
    /// ID of this [`Catalogue`].
    pub id: i64,

    /// Title of this [`Catalogue`].
    pub catalogue: String,

    /// Description of this [`Catalogue`].
    pub info: Option<String>,
}
