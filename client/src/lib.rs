//! Client contains the session and access-gating logic of the blog frontend.
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod gate;
pub mod infra;
pub mod query;
pub mod store;

use url::Url;

pub use self::{
    command::Command, gate::Gate, query::Query, store::SessionStore,
};

/// [`Client`] configuration.
///
/// All three origins are expected to be valid base URLs (scheme and
/// authority, optionally a path prefix for [`Config::api_origin`]).
#[derive(Clone, Debug)]
pub struct Config {
    /// Origin of the content API all data is read from and written to.
    pub api_origin: Url,

    /// Origin of the external authentication service issuing one-time
    /// tokens.
    pub auth_origin: Url,

    /// Origin of this application, passed to the authentication service as
    /// the post-login redirect target.
    pub app_origin: Url,
}

impl Config {
    /// Returns the URL of the external login page.
    ///
    /// The authentication service is expected to eventually redirect back to
    /// [`Config::app_origin`] with a one-time `token` query parameter.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn login_url(&self) -> Url {
        let mut url = self
            .auth_origin
            .join("/auth/login")
            .expect("`auth_origin` is a valid base URL");
        _ = url
            .query_pairs_mut()
            .append_pair("redirect", self.app_origin.as_str());
        url
    }

    /// Returns the URL of the application's home route.
    #[must_use]
    pub fn home_url(&self) -> Url {
        self.app_origin.clone()
    }
}

/// Browser-side client of the blog platform.
#[derive(Debug)]
pub struct Client<A, S> {
    /// Configuration of this [`Client`].
    config: Config,

    /// Content API this [`Client`] talks to.
    api: A,

    /// [`SessionStore`] of this [`Client`].
    store: SessionStore<S>,
}

impl<A, S> Client<A, S> {
    /// Creates a new [`Client`] with the provided parameters.
    pub fn new(config: Config, api: A, store: SessionStore<S>) -> Self {
        Self { config, api, store }
    }

    /// Returns [`Config`] of this [`Client`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the content API of this [`Client`].
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Returns [`SessionStore`] of this [`Client`].
    #[must_use]
    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }
}
