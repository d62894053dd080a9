//! Memoizing dispatch keyed by string.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

type Slot<T, E> = Arc<Mutex<Option<Result<T, E>>>>;

type Handler<A, T, E> = Box<dyn Fn(A) -> Result<T, E> + Send + Sync>;

fn lock<G>(mutex: &Mutex<G>) -> MutexGuard<'_, G> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs a handler at most once per key and replays its outcome.
///
/// Callers that fire a key while its execution is still running on another
/// thread wait for it and share the result. A failed execution is evicted, so
/// the next `fire` for that key runs the handler again; callers already
/// waiting on the failed execution receive the same error.
///
/// The handler must not fire the key it is computing.
pub struct ExecutionCache<A, T, E> {
    cache: Mutex<HashMap<String, Slot<T, E>>>,
    handler: Handler<A, T, E>,
}

impl<A, T, E> ExecutionCache<A, T, E>
where
    T: Clone,
    E: Clone,
{
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(A) -> Result<T, E> + Send + Sync + 'static,
    {
        Self {
            cache: Mutex::new(HashMap::new()),
            handler: Box::new(handler),
        }
    }

    pub fn fire(&self, key: &str, args: A) -> Result<T, E> {
        let slot = {
            let mut cache = lock(&self.cache);
            Arc::clone(cache.entry(key.to_owned()).or_default())
        };

        let mut outcome = lock(&slot);
        if let Some(done) = outcome.as_ref() {
            debug!(key, "execution cache hit");
            return done.clone();
        }

        let result = (self.handler)(args);
        *outcome = Some(result.clone());
        if result.is_err() {
            let mut cache = lock(&self.cache);
            if cache.get(key).is_some_and(|current| Arc::ptr_eq(current, &slot)) {
                cache.remove(key);
                debug!(key, "evicted failed execution");
            }
        }
        result
    }

    /// Whether `key` has a completed or running execution.
    pub fn contains(&self, key: &str) -> bool {
        lock(&self.cache).contains_key(key)
    }

    pub fn len(&self) -> usize {
        lock(&self.cache).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.cache).is_empty()
    }
}
