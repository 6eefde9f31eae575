use crate::{InvokeError, Reflect, reflect};
use std::{
    any::{Any, type_name},
    fmt,
};
use tracing::debug;

/// Typed accessor of `R` returning a borrowed `T`.
pub type Getter<R, T> = for<'a> fn(&'a R) -> &'a T;

/// A resolved, unbound reference to an accessor.
///
/// The handle is erased: its type is checked once when it is resolved with
/// [`find_virtual`] and again by every [`MethodHandle::invoke_exact`] call
/// against the call-site type.
#[derive(Clone, Copy)]
pub struct MethodHandle {
    name: &'static str,
    target: &'static (dyn Any + Send + Sync),
}

impl MethodHandle {
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if the handle has type `(R) -> T`.
    #[inline]
    pub fn is<R: 'static, T: 'static>(&self) -> bool {
        self.target.is::<Getter<R, T>>()
    }

    /// Resolves the typed accessor behind the handle.
    #[inline]
    pub fn getter<R: 'static, T: 'static>(&self) -> Result<Getter<R, T>, InvokeError> {
        self.target
            .downcast_ref::<Getter<R, T>>()
            .copied()
            .ok_or_else(|| self.wrong_type::<R, T>())
    }

    /// Calls the accessor on `recv`, checking the call-site type `(R) -> T`.
    #[inline]
    pub fn invoke_exact<'a, R: 'static, T: 'static>(
        &self,
        recv: &'a R,
    ) -> Result<&'a T, InvokeError> {
        Ok((self.getter::<R, T>()?)(recv))
    }

    #[cold]
    fn wrong_type<R, T>(&self) -> InvokeError {
        InvokeError::WrongMethodType {
            method: self.name,
            expected: type_name::<Getter<R, T>>(),
        }
    }
}

impl fmt::Debug for MethodHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodHandle")
            .field("name", &self.name)
            .finish()
    }
}

/// Resolves a handle to accessor `name` of `R` returning `&T`.
///
/// Fails fast when the accessor is unknown or has another return type.
pub fn find_virtual<R: Reflect, T: 'static>(name: &str) -> Result<MethodHandle, InvokeError> {
    let handle = lookup_virtual::<R, T>(name)?;

    debug!(
        class = type_name::<R>(),
        method = name,
        "resolved method handle"
    );

    Ok(handle)
}

/// [`find_virtual`] without logging, for use before `main`.
pub(crate) fn lookup_virtual<R: Reflect, T: 'static>(
    name: &str,
) -> Result<MethodHandle, InvokeError> {
    let def = reflect::find::<R>(name)?;
    let handle = MethodHandle {
        name: def.name(),
        target: def.target(),
    };

    if !handle.is::<R, T>() {
        return Err(handle.wrong_type::<R, T>());
    }

    Ok(handle)
}
