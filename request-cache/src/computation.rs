use futures::future::{BoxFuture, FutureExt, Shared};
use std::future::Future;

/// A handle to an in-flight or completed asynchronous operation.
///
/// Every clone resolves to the same output and the wrapped future is only
/// polled once, no matter how many callers await it.
pub type Computation<T> = Shared<BoxFuture<'static, T>>;

/// Wrap a future into a shareable [`Computation`]
pub fn computation<F>(future: F) -> Computation<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Clone,
{
    future.boxed().shared()
}

/// Whether both handles drive the same underlying future.
///
/// Only meaningful for handles that have not been awaited to completion yet.
pub fn same_computation<T: Clone>(a: &Computation<T>, b: &Computation<T>) -> bool {
    a.ptr_eq(b)
}
