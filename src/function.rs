use crate::{InvokeError, MethodHandle};
use std::{any::type_name, fmt, marker::PhantomData};
use tracing::debug;

/// Single-argument function contract.
///
/// `apply` cannot report an error; implementations that can fail panic.
pub trait Function<A, B> {
    fn apply<'a>(&self, arg: &'a A) -> &'a B;
}

/// Immutable carrier of a single [`MethodHandle`].
#[derive(Clone, Copy, Debug)]
pub struct HandleRecord {
    handle: MethodHandle,
}

impl HandleRecord {
    #[inline]
    pub const fn new(handle: MethodHandle) -> Self {
        Self { handle }
    }

    #[inline]
    pub fn handle(&self) -> MethodHandle {
        self.handle
    }
}

/// Carrier of a [`MethodHandle`] usable as a [`Function`].
///
/// Invocation errors of the wrapped handle become panics.
pub struct HandleFunction<R, T> {
    handle: MethodHandle,
    _marker: PhantomData<fn(&R) -> &T>,
}

impl<R, T> HandleFunction<R, T> {
    #[inline]
    pub const fn new(handle: MethodHandle) -> Self {
        Self {
            handle,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn handle(&self) -> MethodHandle {
        self.handle
    }
}

impl<R, T> Clone for HandleFunction<R, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, T> Copy for HandleFunction<R, T> {}

impl<R, T> fmt::Debug for HandleFunction<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HandleFunction").field(&self.handle).finish()
    }
}

impl<R: 'static, T: 'static> Function<R, T> for HandleFunction<R, T> {
    #[inline]
    fn apply<'a>(&self, arg: &'a R) -> &'a T {
        match self.handle.invoke_exact(arg) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

type BoxedFn<R, T> = Box<dyn for<'a> Fn(&'a R) -> &'a T + Send + Sync>;

/// Function adapter produced by [`metafactory`].
pub struct Lambda<R, T>(BoxedFn<R, T>);

impl<R, T> Function<R, T> for Lambda<R, T> {
    #[inline]
    fn apply<'a>(&self, arg: &'a R) -> &'a T {
        (self.0)(arg)
    }
}

impl<R, T> fmt::Debug for Lambda<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Lambda")
    }
}

// Pins the higher-ranked signature on the closure.
fn adapt<R, T, F>(f: F) -> F
where
    F: for<'a> Fn(&'a R) -> &'a T,
{
    f
}

/// Builds a [`Function`] adapter around `handle`.
///
/// The handle type is checked here, once; the adapter calls the accessor
/// without any further resolution.
pub fn metafactory<R: 'static, T: 'static>(
    handle: &MethodHandle,
) -> Result<Lambda<R, T>, InvokeError> {
    let getter = handle.getter::<R, T>()?;

    debug!(
        method = handle.name(),
        receiver = type_name::<R>(),
        "synthesized function adapter"
    );

    Ok(Lambda(Box::new(adapt(move |recv: &R| getter(recv)))))
}
