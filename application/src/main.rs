use std::{io, sync::OnceLock};

use application::{Args, Client, Config, Page};
use client::{
    gate::{Action, State},
    infra::{Http, Memory},
    query::ResolveAuthStatus,
    SessionStore,
};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};
use url::Url;

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    _ = start().await;
}

async fn start() -> Result<(), ()> {
    let Args {
        config,
        url,
        remote,
    } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config {
        origins,
        session,
        notifications,
        log,
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let client_config = origins.parse().map_err(|e| {
        log::error!("failed to parse configured origins: {e}");
    })?;

    let url = match url {
        Some(raw) => raw.parse::<Url>().map_err(|e| {
            log::error!("`{raw}` is not a valid page URL: {e}");
        })?,
        None => client_config.home_url(),
    };

    let api = Http::new(client_config.api_origin.clone()).map_err(|e| {
        log::error!("failed to initialize `Http` client: {e}");
    })?;
    let store = SessionStore::new(Memory::default(), session.ttl);
    let page = Page::new(
        Client::new(client_config, api, store),
        notifications.dismiss_after,
    );

    let visit = page.visit(&url).await;
    if let Some(navigation) = &visit.navigation {
        log::info!(
            "navigation loaded: {} tags, {} users, {} catalogues",
            navigation.tags.len(),
            navigation.users.len(),
            navigation.catalogues.len(),
        );
    }
    for notification in visit.notifications {
        log::info!("{}: {}", notification.kind, notification.message);
        notification.dismissed().await;
    }
    if let Some(redirect) = visit.redirect {
        log::info!("redirecting to `{redirect}`");
    }

    let strategy = if remote {
        ResolveAuthStatus::Remote
    } else {
        ResolveAuthStatus::Local
    };
    let gate = page.guard(strategy).await;
    match gate.state() {
        State::Open => {
            if let Some(identity) = gate.identity() {
                log::info!("access granted to `{}`", identity.id);
            }
        }
        State::Blocked => {
            if let Some(prompt) = gate.prompt() {
                log::info!(
                    "access blocked: log in at `{}` \
                     or continue browsing at `{}`",
                    prompt.navigate(Action::GoToLogin),
                    prompt.navigate(Action::ContinueBrowsing),
                );
            }
        }
        State::Loading => {
            log::warn!("authentication status is still resolving");
        }
    }

    Ok(())
}
