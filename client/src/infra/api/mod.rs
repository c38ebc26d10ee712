//! [`Api`]-related implementations.

pub mod http;

use common::operations::{By, Delete, Select};
use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;

use crate::domain::{session, Catalogue, Identity, Tag, UserInfo};

pub use self::http::Http;

/// Content API operation.
pub use common::Handler as Api;

/// Ambient browser credentials (cookies) accompanying every request.
///
/// Used as the selector for operations that identify the visitor by the
/// server-side session cookie rather than by an explicit argument.
#[derive(Clone, Copy, Debug)]
pub struct Credentials;

/// Full surface of the content API this subsystem consumes.
pub trait ContentApi:
    Api<
        Select<By<Identity, session::Token>>,
        Ok = Identity,
        Err = Traced<Error>,
    > + Api<Select<By<Identity, Credentials>>, Ok = Identity, Err = Traced<Error>>
    + Api<Delete<Credentials>, Ok = (), Err = Traced<Error>>
    + Api<Select<By<Vec<Tag>, ()>>, Ok = Vec<Tag>, Err = Traced<Error>>
    + Api<Select<By<Vec<UserInfo>, ()>>, Ok = Vec<UserInfo>, Err = Traced<Error>>
    + Api<
        Select<By<Vec<Catalogue>, ()>>,
        Ok = Vec<Catalogue>,
        Err = Traced<Error>,
    >
{
}

impl<T> ContentApi for T where
    T: Api<
            Select<By<Identity, session::Token>>,
            Ok = Identity,
            Err = Traced<Error>,
        > + Api<
            Select<By<Identity, Credentials>>,
            Ok = Identity,
            Err = Traced<Error>,
        > + Api<Delete<Credentials>, Ok = (), Err = Traced<Error>>
        + Api<Select<By<Vec<Tag>, ()>>, Ok = Vec<Tag>, Err = Traced<Error>>
        + Api<
            Select<By<Vec<UserInfo>, ()>>,
            Ok = Vec<UserInfo>,
            Err = Traced<Error>,
        > + Api<
            Select<By<Vec<Catalogue>, ()>>,
            Ok = Vec<Catalogue>,
            Err = Traced<Error>,
        >
{
}

/// [`Api`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// HTTP transport failed.
    #[display("HTTP request failed: {_0}")]
    Http(reqwest::Error),

    /// Content API responded with a non-success status.
    #[display("content API responded with `{_0}` status")]
    #[from(ignore)]
    Status(#[error(not(source))] ::http::StatusCode),
}
