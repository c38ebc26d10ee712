//! [`Gate`] blocking protected UI until the visitor's [`AuthStatus`]
//! resolves.

use std::convert::Infallible;

use derive_more::Display;
use url::Url;

use crate::{
    domain::Identity,
    query::{AuthStatus, Query, ResolveAuthStatus},
    Config,
};

/// State of a [`Gate`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum State {
    /// First resolution has not completed yet.
    ///
    /// Neither the protected children nor the blocking prompt may render in
    /// this state, so no protected UI leaks before resolution.
    Loading,

    /// Visitor is unauthenticated: the blocking [`Prompt`] renders instead
    /// of the children.
    Blocked,

    /// Visitor is authenticated: the protected children render.
    Open,
}

/// Access gate wrapping a protected UI subtree.
///
/// Starts in [`State::Loading`] and moves to [`State::Open`] or
/// [`State::Blocked`] on the first resolved [`AuthStatus`]. Both are
/// terminal for the lifetime of the mounted subtree: a session expiring
/// mid-view does not retroactively hide already-rendered content, and any
/// new protected action fails through its own error path instead.
#[derive(Debug)]
pub struct Gate {
    /// Current [`State`] of this [`Gate`].
    state: State,

    /// [`Identity`] the gate opened for.
    identity: Option<Identity>,

    /// URL of the external login page.
    login: Url,

    /// URL of the application's home route.
    home: Url,
}

impl Gate {
    /// Creates a new [`Gate`] in [`State::Loading`].
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            state: State::Loading,
            identity: None,
            login: config.login_url(),
            home: config.home_url(),
        }
    }

    /// Returns the current [`State`] of this [`Gate`].
    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the [`Identity`] this [`Gate`] opened for, if it did.
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Indicates whether the protected children may render.
    ///
    /// `true` only in [`State::Open`].
    #[must_use]
    pub fn renders_children(&self) -> bool {
        self.state == State::Open
    }

    /// Applies a resolved [`AuthStatus`] to this [`Gate`].
    ///
    /// [`State::Blocked`] and [`State::Open`] are terminal: once reached,
    /// any further status is ignored.
    pub fn apply(&mut self, status: AuthStatus) -> State {
        if self.state != State::Loading {
            return self.state;
        }
        match status {
            AuthStatus::Unresolved => {}
            AuthStatus::Authenticated(identity) => {
                self.identity = Some(identity);
                self.state = State::Open;
            }
            AuthStatus::Unauthenticated => self.state = State::Blocked,
        }
        self.state
    }

    /// Resolves this [`Gate`] exactly once with the provided `resolver`.
    ///
    /// A no-op once the gate left [`State::Loading`], so re-renders cannot
    /// trigger duplicate concurrent checks.
    pub async fn resolve<R>(
        &mut self,
        resolver: &R,
        strategy: ResolveAuthStatus,
    ) -> State
    where
        R: Query<ResolveAuthStatus, Ok = AuthStatus, Err = Infallible>,
    {
        if self.state != State::Loading {
            return self.state;
        }
        let status = resolver
            .execute(strategy)
            .await
            .unwrap_or_else(|e| match e {});
        self.apply(status)
    }

    /// Returns the blocking [`Prompt`], present only in [`State::Blocked`].
    #[must_use]
    pub fn prompt(&self) -> Option<Prompt> {
        (self.state == State::Blocked).then(|| Prompt {
            login: self.login.clone(),
            home: self.home.clone(),
        })
    }
}

/// Blocking modal prompt of a [`Gate`] in [`State::Blocked`].
///
/// Always offers both escape actions: the visitor is never stranded with no
/// way forward.
#[derive(Clone, Debug)]
pub struct Prompt {
    /// URL of the external login page.
    login: Url,

    /// URL of the application's home route.
    home: Url,
}

/// User action on a [`Prompt`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Action {
    /// Navigate to the external login page, returning through the token
    /// handoff.
    GoToLogin,

    /// Dismiss the prompt and continue to public content on the home route.
    ContinueBrowsing,
}

impl Prompt {
    /// Returns the two [`Action`]s this [`Prompt`] offers.
    #[must_use]
    pub fn actions(&self) -> [Action; 2] {
        [Action::GoToLogin, Action::ContinueBrowsing]
    }

    /// Returns the navigation target of the provided [`Action`].
    #[must_use]
    pub fn navigate(&self, action: Action) -> Url {
        match action {
            Action::GoToLogin => self.login.clone(),
            Action::ContinueBrowsing => self.home.clone(),
        }
    }
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use crate::{query::AuthStatus, Config};

    use super::{Action, Gate, State};

    fn config() -> Config {
        Config {
            api_origin: "http://localhost:8002/api".parse().unwrap(),
            auth_origin: "http://localhost:8001".parse().unwrap(),
            app_origin: "http://localhost:3000".parse().unwrap(),
        }
    }

    fn identity() -> crate::domain::Identity {
        serde_json::from_value(json!({"id": 7})).unwrap()
    }

    fn statuses() -> [AuthStatus; 3] {
        [
            AuthStatus::Unresolved,
            AuthStatus::Authenticated(identity()),
            AuthStatus::Unauthenticated,
        ]
    }

    #[test]
    fn starts_loading_showing_nothing() {
        let gate = Gate::new(&config());

        assert_eq!(gate.state(), State::Loading);
        assert!(!gate.renders_children());
        assert!(gate.prompt().is_none());
    }

    #[test]
    fn authenticated_opens_with_identity() {
        let mut gate = Gate::new(&config());

        let state = gate.apply(AuthStatus::Authenticated(identity()));

        assert_eq!(state, State::Open);
        assert!(gate.renders_children());
        assert_eq!(gate.identity(), Some(&identity()));
        assert!(gate.prompt().is_none());
    }

    #[test]
    fn unauthenticated_blocks_with_both_actions() {
        let mut gate = Gate::new(&config());

        let state = gate.apply(AuthStatus::Unauthenticated);

        assert_eq!(state, State::Blocked);
        assert!(!gate.renders_children());

        let prompt = gate.prompt().unwrap();
        assert_eq!(
            prompt.actions(),
            [Action::GoToLogin, Action::ContinueBrowsing],
        );
    }

    #[test]
    fn unresolved_keeps_loading() {
        let mut gate = Gate::new(&config());

        assert_eq!(gate.apply(AuthStatus::Unresolved), State::Loading);
        assert!(!gate.renders_children());
        assert!(gate.prompt().is_none());
    }

    #[test]
    fn blocked_and_open_are_terminal() {
        let mut blocked = Gate::new(&config());
        _ = blocked.apply(AuthStatus::Unauthenticated);
        assert_eq!(
            blocked.apply(AuthStatus::Authenticated(identity())),
            State::Blocked,
        );
        assert!(!blocked.renders_children());

        let mut open = Gate::new(&config());
        _ = open.apply(AuthStatus::Authenticated(identity()));
        assert_eq!(open.apply(AuthStatus::Unauthenticated), State::Open);
        assert!(open.renders_children());
    }

    #[test]
    fn children_never_render_unless_authenticated_first() {
        // Exhaustive over all status sequences of length 3: the children
        // render only when the first non-`Unresolved` status was
        // `Authenticated`.
        for first in statuses() {
            for second in statuses() {
                for third in statuses() {
                    let sequence = [first.clone(), second.clone(), third];
                    let mut gate = Gate::new(&config());

                    let authenticated_first = sequence
                        .iter()
                        .find(|s| **s != AuthStatus::Unresolved)
                        .is_some_and(|s| {
                            matches!(s, AuthStatus::Authenticated(_))
                        });

                    for status in sequence {
                        _ = gate.apply(status);
                    }

                    assert_eq!(
                        gate.renders_children(),
                        authenticated_first,
                    );
                }
            }
        }
    }

    #[test]
    fn login_action_navigates_through_handoff() {
        let mut gate = Gate::new(&config());
        _ = gate.apply(AuthStatus::Unauthenticated);
        let prompt = gate.prompt().unwrap();

        let target = prompt.navigate(Action::GoToLogin);

        assert_eq!(
            target.as_str(),
            "http://localhost:8001/auth/login\
             ?redirect=http%3A%2F%2Flocalhost%3A3000%2F",
        );
    }

    #[test]
    fn continue_browsing_navigates_home() {
        let mut gate = Gate::new(&config());
        _ = gate.apply(AuthStatus::Unauthenticated);
        let prompt = gate.prompt().unwrap();

        let target = prompt.navigate(Action::ContinueBrowsing);

        assert_eq!(target.as_str(), "http://localhost:3000/");
    }
}
