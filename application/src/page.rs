//! Browser page flows: token handoff, navigation data and access gating.

use std::time::Duration;

use client::{
    command::{Command as _, ExchangeToken, Logout},
    gate::Gate,
    infra::api::ContentApi,
    query::{LoadNavigation, Navigation, Query as _, ResolveAuthStatus},
    store::Backend,
};
use futures::future;
use tracerr::Traced;
use tracing as log;
use url::Url;

use crate::notify::Notification;

/// One browser tab running the application.
#[derive(Debug)]
pub struct Page<A, S> {
    /// [`client::Client`] of this [`Page`].
    client: client::Client<A, S>,

    /// Delay after which transient [`Notification`]s dismiss themselves.
    dismiss_after: Duration,
}

/// Outcome of a landing page load.
#[derive(Debug)]
pub struct Visit {
    /// [`Notification`]s surfaced during the load.
    pub notifications: Vec<Notification>,

    /// Where the browser is sent once the notifications dismiss, if
    /// anywhere.
    ///
    /// A successful token handoff always redirects to the home route, which
    /// also drops the one-time token from the visible URL.
    pub redirect: Option<Url>,

    /// [`Navigation`] data of the page frame, when it loaded.
    pub navigation: Option<Navigation>,
}

impl<A, S> Page<A, S> {
    /// Creates a new [`Page`] with the provided parameters.
    pub fn new(
        client: client::Client<A, S>,
        dismiss_after: Duration,
    ) -> Self {
        Self {
            client,
            dismiss_after,
        }
    }

    /// Returns the [`client::Client`] of this [`Page`].
    #[must_use]
    pub fn client(&self) -> &client::Client<A, S> {
        &self.client
    }
}

impl<A: ContentApi, S: Backend> Page<A, S> {
    /// Runs the landing flow for the provided page `url`.
    ///
    /// The token handoff (when a token is present) and the navigation data
    /// load run concurrently, and a failure of either never cancels the
    /// other. A failed handoff keeps the visitor on the requested page,
    /// anonymous but browsing.
    pub async fn visit(&self, url: &Url) -> Visit {
        let handoff = async {
            let cmd = ExchangeToken::from_url(url)?;
            Some(self.client.execute(cmd).await)
        };
        let navigation = self.client.execute(LoadNavigation);

        let (handoff, navigation) = future::join(handoff, navigation).await;

        let mut notifications = Vec::new();
        let mut redirect = None;
        match handoff {
            None => {}
            Some(Ok(output)) => {
                log::info!(
                    "signed in as `{}`",
                    output.record.identity.id,
                );
                notifications.push(Notification::success(
                    "Signed in successfully.",
                    self.dismiss_after,
                ));
                redirect = Some(self.client.config().home_url());
            }
            Some(Err(e)) => {
                log::warn!("token exchange failed: {e}");
                notifications.push(Notification::failure(
                    "Sign-in failed, please log in again.",
                    self.dismiss_after,
                ));
            }
        }

        let navigation = navigation
            .map_err(|e| log::warn!("navigation data failed to load: {e}"))
            .ok();

        Visit {
            notifications,
            redirect,
            navigation,
        }
    }

    /// Mounts a [`Gate`] over a protected subtree and resolves it once.
    ///
    /// Navigating away mid-resolution is modeled by aborting the returned
    /// future: an aborted resolution produces no gate and no state update.
    pub async fn guard(&self, strategy: ResolveAuthStatus) -> Gate {
        let mut gate = Gate::new(self.client.config());
        _ = gate.resolve(&self.client, strategy).await;
        gate
    }

    /// Logs the visitor out, returning where the browser goes next.
    ///
    /// # Errors
    ///
    /// Errors if the local session cannot be cleared.
    pub async fn logout(
        &self,
    ) -> Result<Url, Traced<client::command::logout::ExecutionError>> {
        self.client.execute(Logout).await.map(|output| output.redirect)
    }
}
