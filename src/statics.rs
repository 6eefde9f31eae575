//! Process-wide handles to [`Person::name`], resolved once before `main`.
//!
//! The write-once values are plain `ctor` statics. The mutable ones sit
//! behind a lock that every read takes. Resolution here does not log: it
//! runs before any subscriber can be installed.

use crate::{HandleRecord, Invoke, InvokeError, MethodHandle, Person, handle};
use fxhash::FxHashMap;
use parking_lot::RwLock;

/// Accessor every process-wide handle is bound to.
pub const ACCESSOR: &str = "name";

fn resolve() -> MethodHandle {
    match handle::lookup_virtual::<Person, String>(ACCESSOR) {
        Ok(h) => h,
        Err(e) => panic!("cannot initialize process-wide handles: {e}"),
    }
}

fn handle_map() -> FxHashMap<&'static str, MethodHandle> {
    let mut map = FxHashMap::default();
    map.insert(ACCESSOR, resolve());
    map
}

#[ctor::ctor]
static STATIC_HANDLE: RwLock<MethodHandle> = { RwLock::new(resolve()) };

#[ctor::ctor]
static STATIC_FINAL_HANDLE: MethodHandle = { resolve() };

#[ctor::ctor]
static STATIC_MAP: RwLock<FxHashMap<&'static str, MethodHandle>> = {
    RwLock::new(handle_map())
};

#[ctor::ctor]
static STATIC_FINAL_MAP: FxHashMap<&'static str, MethodHandle> = { handle_map() };

#[ctor::ctor]
static STATIC_FINAL_RECORD: HandleRecord = { HandleRecord::new(resolve()) };

/// Current value of the mutable process-wide handle.
#[inline]
pub fn static_handle() -> MethodHandle {
    *STATIC_HANDLE.read()
}

#[inline]
pub fn static_final_handle() -> &'static MethodHandle {
    &STATIC_FINAL_HANDLE
}

/// Looks `key` up in the mutable process-wide handle map.
#[inline]
pub fn static_map_handle(key: &str) -> Result<MethodHandle, InvokeError> {
    STATIC_MAP
        .read()
        .get(key)
        .copied()
        .ok_or_else(|| InvokeError::NoSuchHandle(key.to_owned()))
}

/// Looks `key` up in the write-once process-wide handle map.
#[inline]
pub fn static_final_map_handle(key: &str) -> Result<MethodHandle, InvokeError> {
    STATIC_FINAL_MAP
        .get(key)
        .copied()
        .ok_or_else(|| InvokeError::NoSuchHandle(key.to_owned()))
}

#[inline]
pub fn static_final_record() -> &'static HandleRecord {
    &STATIC_FINAL_RECORD
}

/// Invokes through the mutable process-wide handle, read under its lock.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticHandle;

impl Invoke<Person, String> for StaticHandle {
    #[inline]
    fn invoke<'a>(&self, recv: &'a Person) -> Result<&'a String, InvokeError> {
        static_handle().invoke(recv)
    }
}

/// Invokes through the handle stored under `key` in a process-wide map.
#[derive(Clone, Copy, Debug)]
pub struct MapHandle {
    key: &'static str,
    write_once: bool,
}

impl MapHandle {
    /// Entry of the write-once map.
    pub const fn write_once(key: &'static str) -> Self {
        Self {
            key,
            write_once: true,
        }
    }

    /// Entry of the mutable map.
    pub const fn mutable(key: &'static str) -> Self {
        Self {
            key,
            write_once: false,
        }
    }
}

impl Invoke<Person, String> for MapHandle {
    #[inline]
    fn invoke<'a>(&self, recv: &'a Person) -> Result<&'a String, InvokeError> {
        let handle = if self.write_once {
            static_final_map_handle(self.key)?
        } else {
            static_map_handle(self.key)?
        };

        handle.invoke(recv)
    }
}
