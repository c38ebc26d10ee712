//! [`SessionRecord`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::DateTimeOf;
use derive_more::{AsRef, Display, From, FromStr};
use serde::{Deserialize, Serialize};
use url::Url;

#[cfg(doc)]
use crate::store::SessionStore;

use super::Identity;

/// Client-held proof of authentication.
///
/// Created by a successful [`Token`] exchange, persisted by the
/// [`SessionStore`], and treated as absent by every reader once
/// [`SessionRecord::expires_at`] has passed.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SessionRecord {
    /// [`Identity`] this [`SessionRecord`] proves.
    pub identity: Identity,

    /// [`DateTime`] when this [`SessionRecord`] was issued.
    #[serde(
        rename = "issuedAt",
        with = "common::datetime::serde::unix_timestamp_millis"
    )]
    pub issued_at: IssueDateTime,

    /// [`DateTime`] when this [`SessionRecord`] expires.
    #[serde(
        rename = "expiresAt",
        with = "common::datetime::serde::unix_timestamp_millis"
    )]
    pub expires_at: ExpirationDateTime,
}

impl SessionRecord {
    /// Checks whether this [`SessionRecord`] has expired at the provided
    /// moment.
    ///
    /// A record expiring exactly `at` the provided moment counts as expired.
    #[must_use]
    pub fn is_expired(&self, at: DateTimeOf) -> bool {
        self.expires_at <= at.coerce()
    }
}

/// One-time credential handed off by the external authentication service.
///
/// Carried only in the URL query string of the first request after the
/// redirect back from the authentication domain, and exchanged once for a
/// [`SessionRecord`]. The raw token itself is never persisted.
#[derive(AsRef, Clone, Debug, Display, Eq, From, FromStr, PartialEq)]
pub struct Token(String);

impl Token {
    /// Name of the URL query parameter carrying a [`Token`].
    pub const QUERY_PARAM: &'static str = "token";

    /// Extracts a [`Token`] from the provided page URL, if one is present.
    #[must_use]
    pub fn from_url(url: &Url) -> Option<Self> {
        url.query_pairs()
            .find(|(name, _)| name == Self::QUERY_PARAM)
            .map(|(_, value)| Self(value.into_owned()))
    }
}

/// [`DateTime`] of a [`SessionRecord`] issue.
pub type IssueDateTime = DateTimeOf<(SessionRecord, Issue)>;

/// [`DateTime`] of a [`SessionRecord`] expiration.
pub type ExpirationDateTime = DateTimeOf<(SessionRecord, Expiration)>;

/// Marker of a [`SessionRecord`] issue moment.
#[derive(Clone, Copy, Debug)]
pub enum Issue {}

/// Marker of a [`SessionRecord`] expiration moment.
#[derive(Clone, Copy, Debug)]
pub enum Expiration {}

#[cfg(test)]
mod spec {
    use url::Url;

    use super::Token;

    #[test]
    fn token_extracted_from_url() {
        let url =
            Url::parse("http://localhost:3000/?token=abc&page=1").unwrap();

        assert_eq!(Token::from_url(&url), Some("abc".parse().unwrap()));
    }

    #[test]
    fn no_token_in_plain_url() {
        let url = Url::parse("http://localhost:3000/").unwrap();
        assert_eq!(Token::from_url(&url), None);

        let url = Url::parse("http://localhost:3000/?page=2").unwrap();
        assert_eq!(Token::from_url(&url), None);
    }
}
