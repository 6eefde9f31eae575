use crate::InvokeError;
use std::{
    any::{Any, type_name},
    fmt,
};
use tracing::debug;

/// Erased reflective entry point of an accessor.
pub type ReflectFn = for<'a> fn(&'a dyn Any) -> Result<&'a dyn Any, InvokeError>;

/// A type whose accessors can be looked up by name.
///
/// Implemented through the [`reflect!`](crate::reflect) macro; there is no
/// reason to implement it by hand.
pub trait Reflect: Any {
    fn methods() -> &'static [MethodDef];
}

/// One row of a [`Reflect`] table.
pub struct MethodDef {
    name: &'static str,
    reflect: ReflectFn,
    target: &'static (dyn Any + Send + Sync),
}

impl MethodDef {
    #[doc(hidden)]
    pub const fn new(
        name: &'static str,
        reflect: ReflectFn,
        target: &'static (dyn Any + Send + Sync),
    ) -> Self {
        Self {
            name,
            reflect,
            target,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The typed accessor, erased. Holds a [`Getter`](crate::Getter).
    #[inline]
    pub(crate) fn target(&self) -> &'static (dyn Any + Send + Sync) {
        self.target
    }
}

pub(crate) fn find<R: Reflect>(name: &str) -> Result<&'static MethodDef, InvokeError> {
    R::methods()
        .iter()
        .find(|m| m.name == name)
        .ok_or_else(|| InvokeError::NoSuchMethod {
            class: type_name::<R>(),
            name: name.to_owned(),
        })
}

/// A reflective method descriptor.
///
/// Both the receiver and the result cross the call boundary as `dyn Any`,
/// so every call pays for a receiver check and the caller pays for a cast.
#[derive(Clone, Copy)]
pub struct Method {
    def: &'static MethodDef,
}

impl Method {
    #[inline]
    pub fn name(&self) -> &'static str {
        self.def.name
    }

    /// Calls the accessor on `recv`.
    ///
    /// Fails with [`InvokeError::IllegalArgument`] when `recv` is not an
    /// instance of the type the method was resolved on.
    #[inline]
    pub fn invoke<'a>(&self, recv: &'a dyn Any) -> Result<&'a dyn Any, InvokeError> {
        (self.def.reflect)(recv)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method").field("name", &self.def.name).finish()
    }
}

/// Resolves the reflective descriptor of accessor `name` on `R`.
pub fn get_method<R: Reflect>(name: &str) -> Result<Method, InvokeError> {
    let def = find::<R>(name)?;
    debug!(class = type_name::<R>(), method = name, "resolved reflective method");
    Ok(Method { def })
}
