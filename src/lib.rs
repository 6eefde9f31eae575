//! Micro-benchmark harness comparing ways of calling one accessor: a direct
//! call, a reflective descriptor, method handles stored in various places
//! and a function adapter synthesized once at setup.

pub mod config;
mod error;
mod function;
mod handle;
mod invoke;
mod person;
mod reflect;
pub mod statics;
mod suite;

pub use error::InvokeError;
pub use function::{Function, HandleFunction, HandleRecord, Lambda, metafactory};
pub use handle::{Getter, MethodHandle, find_virtual};
pub use invoke::{Invoke, Strategy};
pub use invokebench_macro::reflect;
pub use person::{Direct, Person};
pub use reflect::{Method, MethodDef, Reflect, ReflectFn, get_method};
pub use suite::Suite;
