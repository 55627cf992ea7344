use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use thiserror::Error;

use super::Store;

#[derive(Error, Debug)]
pub enum Error {
    #[error("key not found")]
    NotFound,
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

/// An ever growing in-memory store keyed by the JSON serialization of the
/// argument sequence (be aware of unbounded memory growth!).
#[derive(Clone)]
pub struct MemoryStore<V> {
    cache: Arc<Mutex<HashMap<String, V>>>,
}

impl<V> MemoryStore<V> {
    /// Creates a store on top of an externally owned cache.
    ///
    /// The caller keeps its own handle and may clear or replace entries at
    /// any time, which is the intended invalidation mechanism. The store
    /// itself only inserts and looks up.
    pub fn new(cache: Arc<Mutex<HashMap<String, V>>>) -> Self {
        Self { cache }
    }
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self { cache: Arc::new(Mutex::new(HashMap::new())) }
    }
}

impl<A, V> Store<A, V> for MemoryStore<V>
where
    A: ?Sized + Serialize + Sync,
    V: Clone + Send + Sync + 'static,
{
    type Key = String;
    type Error = Error;

    async fn to_key(&self, args: &A) -> Result<String, Error> {
        Ok(serde_json::to_string(args)?)
    }
    async fn get(&self, key: &String) -> Result<V, Error> {
        self.cache.lock().unwrap().get(key).cloned().ok_or(Error::NotFound)
    }
    async fn set(&self, key: String, value: V) -> Result<(), Error> {
        self.cache.lock().unwrap().insert(key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memoized::Memoizable;
    use crate::operation::{from_fn, Operation};
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};
    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::wasm_bindgen_test;

    async fn exercise<S>(store: &S) -> (Result<u64, S::Error>, Result<u64, S::Error>)
    where
        S: Store<(u32,), u64>,
        S::Key: Clone,
    {
        let key = store.to_key(&(7,)).await.expect("failed to derive key");
        let miss = store.get(&key).await;
        store.set(key.clone(), 42).await.expect("failed to set");
        (miss, store.get(&key).await)
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    #[cfg_attr(not(target_arch = "wasm32"), tokio::test)]
    async fn serializes_empty_argument_list() {
        let store = MemoryStore::<i32>::default();
        let args: [&str; 0] = [];
        let key = store.to_key(&args).await.expect("failed to derive key");
        assert_eq!(key, serde_json::to_string(&args).expect("failed to serialize"));
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    #[cfg_attr(not(target_arch = "wasm32"), tokio::test)]
    async fn serializes_non_empty_argument_list() {
        let store = MemoryStore::<i32>::default();
        let args = ("Hi", true);
        let key = store.to_key(&args).await.expect("failed to derive key");
        assert_eq!(key, serde_json::to_string(&args).expect("failed to serialize"));
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    #[cfg_attr(not(target_arch = "wasm32"), tokio::test)]
    async fn serializes_structured_arguments_recursively() {
        #[derive(Serialize)]
        struct Params {
            q: String,
            limit: u32,
        }
        let store = MemoryStore::<i32>::default();
        let args = (Params { q: String::from("news"), limit: 10 },);
        let key = store.to_key(&args).await.expect("failed to derive key");
        assert_eq!(key, r#"[{"q":"news","limit":10}]"#);
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    #[cfg_attr(not(target_arch = "wasm32"), tokio::test)]
    async fn misses_until_set() {
        let (miss, hit) = exercise(&MemoryStore::default()).await;
        assert!(matches!(miss, Err(Error::NotFound)));
        assert_eq!(hit.expect("failed to get"), 42);
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    #[cfg_attr(not(target_arch = "wasm32"), tokio::test)]
    async fn invalidates_through_shared_cache() {
        let cache = Arc::new(Mutex::new(HashMap::new()));
        let calls = Arc::new(AtomicUsize::new(0));
        let operation = {
            let calls = calls.clone();
            from_fn(move |_: &()| {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move { Ok::<_, Infallible>(n) }
            })
        };
        let memoized = operation.memoized_with(MemoryStore::new(cache.clone()));
        assert_eq!(memoized.call(&()).await, Ok(1));
        assert_eq!(memoized.call(&()).await, Ok(1));
        cache.lock().unwrap().clear();
        assert_eq!(memoized.call(&()).await, Ok(2));
    }
}
