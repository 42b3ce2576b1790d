use std::sync::{Arc, RwLock};

use futures::future::BoxFuture;

use crate::core::error::FxError;

/// A registered transform. Receives the previous stage's value and produces
/// the next one; an error aborts the rest of the chain.
pub type Handler<T> = Arc<dyn Fn(T) -> BoxFuture<'static, Result<T, FxError>> + Send + Sync>;

struct Registry<T> {
    next_id: u64,
    entries: Vec<(u64, Handler<T>)>,
}

/// Ordered, mutable registry of transforms over `T`.
///
/// Ids are strictly increasing from 1 and never reused. `run` operates on a
/// snapshot of the handler list taken at invocation start, so registrations
/// and ejections made while a run is in flight affect the next run only.
pub struct InterceptorChain<T> {
    registry: RwLock<Registry<T>>,
}

impl<T: Send + 'static> InterceptorChain<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: RwLock::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            }),
        }
    }

    /// Register a synchronous handler; returns its ejection id.
    pub fn use_fn<F>(&self, handler: F) -> u64
    where
        F: Fn(T) -> Result<T, FxError> + Send + Sync + 'static,
    {
        self.use_async(move |value| Box::pin(futures::future::ready(handler(value))))
    }

    /// Register an asynchronous handler; returns its ejection id.
    pub fn use_async<F>(&self, handler: F) -> u64
    where
        F: Fn(T) -> BoxFuture<'static, Result<T, FxError>> + Send + Sync + 'static,
    {
        let mut reg = self.registry.write().expect("interceptor registry poisoned");
        reg.next_id += 1;
        let id = reg.next_id;
        reg.entries.push((id, Arc::new(handler)));
        id
    }

    /// Remove one handler. Unknown ids are a no-op; the order of the rest is
    /// untouched.
    pub fn eject(&self, id: u64) {
        let mut reg = self.registry.write().expect("interceptor registry poisoned");
        reg.entries.retain(|(entry_id, _)| *entry_id != id);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registry
            .read()
            .expect("interceptor registry poisoned")
            .entries
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fold `value` through every handler in registration order, awaiting
    /// each. A chain with no handlers returns the input unchanged.
    pub async fn run(&self, value: T) -> Result<T, FxError> {
        let snapshot: Vec<Handler<T>> = {
            let reg = self.registry.read().expect("interceptor registry poisoned");
            reg.entries.iter().map(|(_, h)| Arc::clone(h)).collect()
        };

        let mut current = value;
        for handler in snapshot {
            current = handler(current).await?;
        }
        Ok(current)
    }
}

impl<T: Send + 'static> Default for InterceptorChain<T> {
    fn default() -> Self {
        Self::new()
    }
}
