use std::future::Future;
use std::marker::PhantomData;

/// An asynchronous operation that can be memoized.
///
/// Arbitrary arity is modeled through [`Args`](Operation::Args): operations
/// taking several arguments use a tuple, unary ones any single type
/// (including unsized ones such as `str`).
#[cfg_attr(not(target_arch = "wasm32"), trait_variant::make(Send))]
pub trait Operation {
    type Args: ?Sized;
    type Output;
    type Error;

    fn call(&self, args: &Self::Args) -> impl Future<Output = Result<Self::Output, Self::Error>>;
}

/// Lifts a plain async closure into an [`Operation`].
///
/// The returned future must not borrow from the argument; copy or clone what
/// the closure needs before entering the `async` block.
pub fn from_fn<F, A, Fut, T, E>(f: F) -> FromFn<F, A>
where
    A: ?Sized,
    F: Fn(&A) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    FromFn { f, _args: PhantomData }
}

pub struct FromFn<F, A: ?Sized> {
    f: F,
    _args: PhantomData<fn(&A)>,
}

impl<F, A, Fut, T, E> Operation for FromFn<F, A>
where
    A: ?Sized + Sync,
    F: Fn(&A) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, E>> + Send,
{
    type Args = A;
    type Output = T;
    type Error = E;

    async fn call(&self, args: &Self::Args) -> Result<T, E> {
        (self.f)(args).await
    }
}
