use thiserror::Error;

/// Failures raised while resolving or invoking an accessor.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvokeError {
    /// No accessor with that name is registered on the receiver type.
    #[error("no such method: {class}::{name}")]
    NoSuchMethod { class: &'static str, name: String },

    /// The accessor exists but its type differs from the call-site type.
    #[error("method `{method}` is not of type {expected}")]
    WrongMethodType {
        method: &'static str,
        expected: &'static str,
    },

    /// The receiver passed to a reflective call has the wrong type.
    #[error("receiver of `{method}` is not an instance of {expected}")]
    IllegalArgument {
        method: &'static str,
        expected: &'static str,
    },

    #[error("no method handle registered under `{0}`")]
    NoSuchHandle(String),
}
