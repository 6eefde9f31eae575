use crate::{Invoke, InvokeError, reflect};

/// The benchmark subject: one field and its accessor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Person {
    name: String,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[inline]
    pub fn name(&self) -> &String {
        &self.name
    }
}

reflect!(impl Person { name -> String }, crate_path = crate);

/// Calls [`Person::name`] statically, without any handle.
#[derive(Clone, Copy, Debug, Default)]
pub struct Direct;

impl Invoke<Person, String> for Direct {
    #[inline]
    fn invoke<'a>(&self, recv: &'a Person) -> Result<&'a String, InvokeError> {
        Ok(recv.name())
    }
}
