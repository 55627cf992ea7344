use crate::operation::Operation;
use crate::store::memory::MemoryStore;
use crate::store::Store;

/// Wraps an [`Operation`] with a memoization [`Store`].
///
/// The wrapper keeps the semantics of the wrapped operation (modulo caching):
/// - if a stored value exists for the derived key, it is returned as-is
/// - the wrapped operation runs at most once per call
/// - store failures are absorbed locally; only results of the wrapped
///   operation itself are exposed to the caller
///
/// Lookup misses and store faults are indistinguishable: both fall back to
/// running the operation and storing its result. A failed key derivation
/// skips the store entirely, and a failed population degrades silently to
/// "not cached this time". Concurrent calls with equal arguments are not
/// coalesced: each may run the operation, and the last write wins.
pub struct Memoized<T, S> {
    pub inner: T,
    pub store: S,
}

impl<T, S> Memoized<T, S> {
    pub fn new(inner: T, store: S) -> Self {
        Self { inner, store }
    }
}

pub trait Memoizable
where
    Self: Operation + Sized,
{
    /// Wraps with a freshly allocated in-memory store.
    ///
    /// The store's cache grows without bound. Supply an externally owned
    /// cache via [`MemoryStore::new`] and [`memoized_with`](Memoizable::memoized_with)
    /// when invalidation is needed.
    fn memoized(self) -> Memoized<Self, MemoryStore<Self::Output>>;

    /// Wraps with the given store.
    fn memoized_with<S>(self, store: S) -> Memoized<Self, S>;
}

impl<T> Memoizable for T
where
    T: Operation,
{
    fn memoized(self) -> Memoized<Self, MemoryStore<Self::Output>> {
        self.memoized_with(MemoryStore::default())
    }

    fn memoized_with<S>(self, store: S) -> Memoized<Self, S> {
        Memoized::new(self, store)
    }
}

impl<T, S> Operation for Memoized<T, S>
where
    T: Operation + Send + Sync,
    T::Args: Sync,
    T::Output: Clone + Send + Sync,
    S: Store<T::Args, T::Output> + Send + Sync,
    S::Key: Send + Sync,
    S::Error: Send,
{
    type Args = T::Args;
    type Output = T::Output;
    type Error = T::Error;

    async fn call(&self, args: &Self::Args) -> Result<Self::Output, Self::Error> {
        let key = match self.store.to_key(args).await {
            Ok(key) => key,
            Err(_) => return self.inner.call(args).await,
        };
        match self.store.get(&key).await {
            Ok(value) => Ok(value),
            Err(_) => {
                let value = self.inner.call(args).await?;
                let _ = self.store.set(key, value.clone()).await;
                Ok(value)
            }
        }
    }
}
