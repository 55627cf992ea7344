pub mod memory;

use std::error::Error;
use std::future::Future;

/// A pluggable key-value capability backing a [`Memoized`](crate::Memoized)
/// wrapper: key derivation from an argument sequence, lookup, and population.
///
/// All three operations are asynchronous and may fail. A failed [`get`](Store::get)
/// is a miss; the wrapper does not distinguish a missing key from a store
/// fault, and no store failure ever reaches the wrapper's caller. [`Error`](Store::Error)
/// exists for the implementation's own diagnostics only — nothing downstream
/// may depend on it.
#[cfg_attr(not(target_arch = "wasm32"), trait_variant::make(Send))]
pub trait Store<A, V>
where
    A: ?Sized,
{
    type Key;
    type Error: Error;

    fn to_key(&self, args: &A) -> impl Future<Output = Result<Self::Key, Self::Error>>;
    fn get(&self, key: &Self::Key) -> impl Future<Output = Result<V, Self::Error>>;
    fn set(&self, key: Self::Key, value: V) -> impl Future<Output = Result<(), Self::Error>>;
}
