//! Read path: turns an async loader into an observable [`FetchState`].

use std::{
    collections::{hash_map::DefaultHasher, BTreeSet},
    future::Future,
    hash::{Hash, Hasher},
    sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError},
};

use futures::{future::BoxFuture, FutureExt};
use shared::domain::{AppSettings, Feature, Plan};
use tokio::{
    sync::{watch, Mutex},
    task::JoinHandle,
};
use tracing::{debug, warn};

use crate::{api::StorefrontApi, error::ClientError};

/// Snapshot of a read-only resource. `error` is only set once loading has
/// stopped; `data` survives a failed reload.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> FetchState<T> {
    pub fn pending() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }

    pub fn ready(data: T) -> Self {
        Self {
            data: Some(data),
            loading: false,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            data: None,
            loading: false,
            error: Some(error.into()),
        }
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::pending()
    }
}

type Loader<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T, ClientError>> + Send + Sync>;

/// Bookkeeping for overlapping invocations. `live` holds tickets whose loader
/// has neither completed nor been dropped.
#[derive(Debug, Default)]
struct Tickets {
    issued: u64,
    applied: u64,
    live: BTreeSet<u64>,
}

pub struct ResourceFetcher<T> {
    name: String,
    loader: Loader<T>,
    state: watch::Sender<FetchState<T>>,
    tickets: StdMutex<Tickets>,
    dependencies: Mutex<Option<u64>>,
}

/// Releases a ticket whose `refetch` future is dropped before the loader
/// finishes (timeouts, `select!`, aborted tasks).
struct InFlight<'a, T> {
    fetcher: &'a ResourceFetcher<T>,
    ticket: Option<u64>,
}

impl<T> InFlight<'_, T> {
    fn settle(mut self) -> u64 {
        self.ticket.take().unwrap_or_default()
    }
}

impl<T> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            self.fetcher.abandon(ticket);
        }
    }
}

impl<T> ResourceFetcher<T> {
    fn tickets(&self) -> MutexGuard<'_, Tickets> {
        self.tickets.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self) -> u64 {
        let mut tickets = self.tickets();
        tickets.issued += 1;
        let ticket = tickets.issued;
        tickets.live.insert(ticket);
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });
        ticket
    }

    /// A dropped invocation stops `loading` unless an invocation that may
    /// still be applied is in flight; that one takes over.
    fn abandon(&self, ticket: u64) {
        let mut tickets = self.tickets();
        if !tickets.live.remove(&ticket) {
            return;
        }
        let applied = tickets.applied;
        if tickets.live.range(applied + 1..).next().is_some() {
            return;
        }
        debug!(resource = %self.name, ticket, "load dropped before completion");
        self.state.send_if_modified(|state| std::mem::replace(&mut state.loading, false));
    }
}

impl<T> ResourceFetcher<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new<F, Fut>(name: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let (state, _) = watch::channel(FetchState::pending());
        Self {
            name: name.into(),
            loader: Arc::new(move || loader().boxed()),
            state,
            tickets: StdMutex::new(Tickets::default()),
            dependencies: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> FetchState<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.state.subscribe()
    }

    /// Runs the loader once and returns the resulting state. A newer call
    /// started before this one finishes supersedes it: this call's outcome is
    /// dropped and the state keeps waiting for the newer one. If every newer
    /// call is dropped unfinished, this call's outcome is applied instead.
    pub async fn refetch(&self) -> FetchState<T> {
        let guard = InFlight {
            fetcher: self,
            ticket: Some(self.begin()),
        };

        let outcome = (self.loader)().await;
        let ticket = guard.settle();

        if !self.complete(ticket, &outcome) {
            debug!(resource = %self.name, ticket, "discarding superseded response");
        } else if let Err(err) = &outcome {
            warn!(resource = %self.name, "resource load failed, keeping previous data: {err}");
        }

        self.state()
    }

    fn complete(&self, ticket: u64, outcome: &Result<T, ClientError>) -> bool {
        let mut tickets = self.tickets();
        tickets.live.remove(&ticket);
        if ticket < tickets.applied || tickets.live.range(ticket + 1..).next().is_some() {
            return false;
        }
        tickets.applied = ticket;

        self.state.send_modify(|state| {
            match outcome {
                Ok(data) => {
                    state.data = Some(data.clone());
                    state.error = None;
                }
                Err(err) => state.error = Some(err.to_string()),
            }
            state.loading = false;
        });
        true
    }

    pub fn spawn_refetch(self: &Arc<Self>) -> JoinHandle<FetchState<T>> {
        let fetcher = Arc::clone(self);
        tokio::spawn(async move { fetcher.refetch().await })
    }

    /// Reloads when `dependencies` differ from the previous call (or on the
    /// first call). Returns whether a load ran. `&()` loads exactly once.
    pub async fn sync_dependencies<D: Hash + ?Sized>(&self, dependencies: &D) -> bool {
        let key = dependency_key(dependencies);
        {
            let mut last = self.dependencies.lock().await;
            if *last == Some(key) {
                return false;
            }
            *last = Some(key);
        }
        self.refetch().await;
        true
    }
}

fn dependency_key<D: Hash + ?Sized>(dependencies: &D) -> u64 {
    let mut hasher = DefaultHasher::new();
    dependencies.hash(&mut hasher);
    hasher.finish()
}

pub fn plans_fetcher(api: &StorefrontApi) -> ResourceFetcher<Vec<Plan>> {
    let api = api.clone();
    ResourceFetcher::new("plans", move || {
        let api = api.clone();
        async move { api.plans().await }
    })
}

pub fn features_fetcher(api: &StorefrontApi) -> ResourceFetcher<Vec<Feature>> {
    let api = api.clone();
    ResourceFetcher::new("features", move || {
        let api = api.clone();
        async move { api.features().await }
    })
}

pub fn settings_fetcher(api: &StorefrontApi) -> ResourceFetcher<AppSettings> {
    let api = api.clone();
    ResourceFetcher::new("settings", move || {
        let api = api.clone();
        async move { api.settings().await }
    })
}

#[cfg(test)]
#[path = "tests/fetch_tests.rs"]
mod tests;
