use crate::{
    Direct, Function, HandleFunction, HandleRecord, Invoke, InvokeError, Lambda, Method,
    MethodHandle, Person, Strategy, find_virtual, get_method, metafactory,
    statics::{self, MapHandle, StaticHandle},
};
use tracing::info;

/// Per-thread benchmark state: the subject and its instance-scoped handles.
///
/// Every measured operation only performs the call and returns the
/// accessor's value.
#[derive(Debug)]
pub struct Suite {
    person: Person,
    method: Method,
    handle: MethodHandle,
    record: HandleRecord,
    function: HandleFunction<Person, String>,
    lambda: Lambda<Person, String>,
    static_map: MapHandle,
    static_final_map: MapHandle,
}

impl Suite {
    /// Builds a suite for a subject named `name`, bound to [`statics::ACCESSOR`].
    pub fn setup(name: impl Into<String>) -> Result<Self, InvokeError> {
        Self::with_accessor(name, statics::ACCESSOR)
    }

    /// Builds a suite whose instance-scoped handles target `accessor`.
    ///
    /// Fails fast when `accessor` is not a `String` accessor of [`Person`].
    pub fn with_accessor(name: impl Into<String>, accessor: &str) -> Result<Self, InvokeError> {
        let person = Person::new(name);
        let method = get_method::<Person>(accessor)?;
        let handle = find_virtual::<Person, String>(accessor)?;
        let lambda = metafactory::<Person, String>(&handle)?;

        info!(accessor, "benchmark suite ready");

        Ok(Self {
            person,
            method,
            handle,
            record: HandleRecord::new(handle),
            function: HandleFunction::new(handle),
            lambda,
            static_map: MapHandle::mutable(statics::ACCESSOR),
            static_final_map: MapHandle::write_once(statics::ACCESSOR),
        })
    }

    #[inline]
    pub fn person(&self) -> &Person {
        &self.person
    }

    /// The invoker measured by `strategy`.
    pub fn invoker(&self, strategy: Strategy) -> &dyn Invoke<Person, String> {
        match strategy {
            Strategy::Direct => &Direct,
            Strategy::Reflection => &self.method,
            Strategy::MethodHandle => &self.handle,
            Strategy::StaticMethodHandle => &StaticHandle,
            Strategy::StaticFinalMethodHandle => statics::static_final_handle(),
            Strategy::MethodHandleInStaticFinalMap => &self.static_final_map,
            Strategy::MethodHandleInStaticMap => &self.static_map,
            Strategy::MethodHandleInRecordClass => &self.record,
            Strategy::MethodHandleInStaticFinalRecordClass => statics::static_final_record(),
            Strategy::MethodHandleInRecordClassFunction => &self.function,
            Strategy::LambdaMetafactory => &self.lambda,
        }
    }

    /// Runs one strategy through its invoker.
    pub fn run(&self, strategy: Strategy) -> Result<&str, InvokeError> {
        self.invoker(strategy)
            .invoke(&self.person)
            .map(String::as_str)
    }

    #[inline]
    pub fn direct(&self) -> &str {
        self.person.name()
    }

    #[inline]
    pub fn reflection(&self) -> Result<&str, InvokeError> {
        <Method as Invoke<Person, String>>::invoke(&self.method, &self.person)
            .map(String::as_str)
    }

    #[inline]
    pub fn method_handle(&self) -> Result<&str, InvokeError> {
        self.handle.invoke(&self.person).map(String::as_str)
    }

    #[inline]
    pub fn static_method_handle(&self) -> Result<&str, InvokeError> {
        StaticHandle.invoke(&self.person).map(String::as_str)
    }

    #[inline]
    pub fn static_final_method_handle(&self) -> Result<&str, InvokeError> {
        statics::static_final_handle()
            .invoke(&self.person)
            .map(String::as_str)
    }

    #[inline]
    pub fn method_handle_in_static_final_map(&self) -> Result<&str, InvokeError> {
        self.static_final_map
            .invoke(&self.person)
            .map(String::as_str)
    }

    #[inline]
    pub fn method_handle_in_static_map(&self) -> Result<&str, InvokeError> {
        self.static_map.invoke(&self.person).map(String::as_str)
    }

    #[inline]
    pub fn method_handle_in_record_class(&self) -> Result<&str, InvokeError> {
        self.record.invoke(&self.person).map(String::as_str)
    }

    #[inline]
    pub fn method_handle_in_static_final_record_class(&self) -> Result<&str, InvokeError> {
        statics::static_final_record()
            .invoke(&self.person)
            .map(String::as_str)
    }

    /// Panics if the wrapped handle fails.
    #[inline]
    pub fn method_handle_in_record_class_function(&self) -> &str {
        self.function.apply(&self.person)
    }

    #[inline]
    pub fn lambda_metafactory(&self) -> &str {
        self.lambda.apply(&self.person)
    }
}
