//! HTTP [`Api`] implementation.

use common::operations::{By, Delete, Select};
use tracerr::Traced;
use url::Url;

use crate::domain::{session, Catalogue, Identity, Tag, UserInfo};

use super::{Api, Credentials, Error};

/// Content API client over HTTP.
///
/// Carries a cookie store, so every request goes out with credentials
/// included, the same way the browser's `fetch` does.
#[derive(Clone, Debug)]
pub struct Http {
    /// Base URL of the content API.
    base: Url,

    /// Underlying HTTP client.
    client: reqwest::Client,
}

impl Http {
    /// Creates a new [`Http`] client for the content API at the provided
    /// `base` URL.
    ///
    /// # Errors
    ///
    /// Errors if the underlying HTTP client cannot be initialized.
    pub fn new(base: Url) -> Result<Self, reqwest::Error> {
        Ok(Self {
            base,
            client: reqwest::Client::builder().cookie_store(true).build()?,
        })
    }

    /// Builds an endpoint URL by appending the provided path `segments` to
    /// the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .expect("`base` is a valid base URL")
            .pop_if_empty()
            .extend(segments);
        url
    }

    /// Finishes a request by checking its status and decoding the JSON body.
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, Traced<Error>> {
        use Error as E;

        if !response.status().is_success() {
            return Err(tracerr::new!(E::Status(response.status())));
        }
        response.json().await.map_err(tracerr::from_and_wrap!(=> E))
    }
}

impl Api<Select<By<Identity, session::Token>>> for Http {
    type Ok = Identity;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Identity, session::Token>>,
    ) -> Result<Self::Ok, Self::Err> {
        use Error as E;

        let token = by.into_inner();
        let response = self
            .client
            .get(self.endpoint(&["auth", "token"]))
            .bearer_auth(&token)
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> E))?;

        Self::decode(response).await
    }
}

impl Api<Select<By<Identity, Credentials>>> for Http {
    type Ok = Identity;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        _: Select<By<Identity, Credentials>>,
    ) -> Result<Self::Ok, Self::Err> {
        use Error as E;

        let response = self
            .client
            .get(self.endpoint(&["auth", "session"]))
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> E))?;

        Self::decode(response).await
    }
}

impl Api<Delete<Credentials>> for Http {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        _: Delete<Credentials>,
    ) -> Result<Self::Ok, Self::Err> {
        use Error as E;

        let response = self
            .client
            .delete(self.endpoint(&["users", "logout"]))
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> E))?;

        if !response.status().is_success() {
            return Err(tracerr::new!(E::Status(response.status())));
        }
        Ok(())
    }
}

impl Api<Select<By<Vec<Tag>, ()>>> for Http {
    type Ok = Vec<Tag>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Tag>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        use Error as E;

        let response = self
            .client
            .get(self.endpoint(&["tags", "all"]))
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> E))?;

        Self::decode(response).await
    }
}

impl Api<Select<By<Vec<UserInfo>, ()>>> for Http {
    type Ok = Vec<UserInfo>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<UserInfo>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        use Error as E;

        let response = self
            .client
            .get(self.endpoint(&["users"]))
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> E))?;

        Self::decode(response).await
    }
}

impl Api<Select<By<Vec<Catalogue>, ()>>> for Http {
    type Ok = Vec<Catalogue>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Catalogue>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        use Error as E;

        let response = self
            .client
            .get(self.endpoint(&["catalogues", "all"]))
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> E))?;

        Self::decode(response).await
    }
}
