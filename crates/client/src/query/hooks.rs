use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use dioxus::prelude::*;
use wagerdesk_shared::ApiError;

use super::{QueryCache, QueryKey, QueryOptions};
use crate::timer::sleep_ms;

/// Reactive handle to a cached query.
pub struct QueryHandle<T: 'static> {
    resource: Resource<Result<T, ApiError>>,
    refresh: Signal<u32>,
}

impl<T: 'static> Clone for QueryHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for QueryHandle<T> {}

impl<T: Clone + 'static> QueryHandle<T> {
    pub fn data(&self) -> Option<T> {
        self.resource
            .read()
            .as_ref()
            .and_then(|result| result.as_ref().ok().cloned())
    }

    pub fn error(&self) -> Option<ApiError> {
        self.resource
            .read()
            .as_ref()
            .and_then(|result| result.as_ref().err().cloned())
    }

    pub fn loading(&self) -> bool {
        !self.resource.finished()
    }

    /// Bypass the cache and fetch again.
    pub fn refetch(&self) {
        let mut refresh = self.refresh;
        *refresh.write() += 1;
    }
}

/// Run a cached query and re-run it whenever a signal read in `make` changes.
///
/// `make` returns the cache key and a fetcher; the fetcher is called once per
/// attempt.
///
/// ```rust,ignore
/// let games = use_query(QueryOptions::fresh_for(300_000), move || {
///     let client = ApiClient::authorized(&config, &cookies.cookies.read());
///     (QueryKey::resource("casino/games"), move || {
///         let client = client.clone();
///         async move { client.casino_games().await }
///     })
/// });
/// ```
pub fn use_query<T, G, F>(
    options: QueryOptions,
    mut make: impl FnMut() -> (QueryKey, G) + 'static,
) -> QueryHandle<T>
where
    T: Clone + 'static,
    G: FnMut() -> F + 'static,
    F: Future<Output = Result<T, ApiError>> + 'static,
{
    let cache = use_context::<QueryCache>();
    let refresh = use_signal(|| 0_u32);
    let last_refresh = use_hook(|| Rc::new(Cell::new(0_u32)));

    let resource = use_resource(move || {
        let generation = refresh();
        let (key, fetch) = make();
        let cache = cache.clone();
        let options = options.clone();
        let forced = last_refresh.replace(generation) != generation;
        async move {
            if forced {
                cache.invalidate(&key);
            }
            cache.get(key, &options, fetch).await
        }
    });

    QueryHandle { resource, refresh }
}

/// Refetch `handle` every `interval_ms` while the calling component is mounted.
pub fn use_polling<T: Clone + 'static>(handle: QueryHandle<T>, interval_ms: u32) {
    use_future(move || async move {
        loop {
            sleep_ms(interval_ms).await;
            handle.refetch();
        }
    });
}
