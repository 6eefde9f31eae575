use crate::{
    Function, HandleFunction, HandleRecord, InvokeError, Lambda, Method, MethodHandle,
};
use std::any::type_name;

/// Capability to call a fixed accessor of `R` returning `&T`.
pub trait Invoke<R, T> {
    fn invoke<'a>(&self, recv: &'a R) -> Result<&'a T, InvokeError>;
}

impl<R: 'static, T: 'static> Invoke<R, T> for Method {
    #[inline]
    fn invoke<'a>(&self, recv: &'a R) -> Result<&'a T, InvokeError> {
        Method::invoke(self, recv)?
            .downcast_ref::<T>()
            .ok_or_else(|| InvokeError::WrongMethodType {
                method: self.name(),
                expected: type_name::<T>(),
            })
    }
}

impl<R: 'static, T: 'static> Invoke<R, T> for MethodHandle {
    #[inline]
    fn invoke<'a>(&self, recv: &'a R) -> Result<&'a T, InvokeError> {
        self.invoke_exact(recv)
    }
}

impl<R: 'static, T: 'static> Invoke<R, T> for HandleRecord {
    #[inline]
    fn invoke<'a>(&self, recv: &'a R) -> Result<&'a T, InvokeError> {
        self.handle().invoke_exact(recv)
    }
}

impl<R: 'static, T: 'static> Invoke<R, T> for HandleFunction<R, T> {
    #[inline]
    fn invoke<'a>(&self, recv: &'a R) -> Result<&'a T, InvokeError> {
        Ok(self.apply(recv))
    }
}

impl<R, T> Invoke<R, T> for Lambda<R, T> {
    #[inline]
    fn invoke<'a>(&self, recv: &'a R) -> Result<&'a T, InvokeError> {
        Ok(self.apply(recv))
    }
}

/// The measured invocation strategies, in benchmark order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    Direct,
    Reflection,
    MethodHandle,
    StaticMethodHandle,
    StaticFinalMethodHandle,
    MethodHandleInStaticFinalMap,
    MethodHandleInStaticMap,
    MethodHandleInRecordClass,
    MethodHandleInStaticFinalRecordClass,
    MethodHandleInRecordClassFunction,
    LambdaMetafactory,
}

impl Strategy {
    pub const ALL: [Strategy; 11] = [
        Strategy::Direct,
        Strategy::Reflection,
        Strategy::MethodHandle,
        Strategy::StaticMethodHandle,
        Strategy::StaticFinalMethodHandle,
        Strategy::MethodHandleInStaticFinalMap,
        Strategy::MethodHandleInStaticMap,
        Strategy::MethodHandleInRecordClass,
        Strategy::MethodHandleInStaticFinalRecordClass,
        Strategy::MethodHandleInRecordClassFunction,
        Strategy::LambdaMetafactory,
    ];

    /// Benchmark id; the numeric prefix keeps reports in this order.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Direct => "100_direct",
            Strategy::Reflection => "200_reflection",
            Strategy::MethodHandle => "300_method_handle",
            Strategy::StaticMethodHandle => "301_static_method_handle",
            Strategy::StaticFinalMethodHandle => "302_static_final_method_handle",
            Strategy::MethodHandleInStaticFinalMap => "303_method_handle_in_static_final_map",
            Strategy::MethodHandleInStaticMap => "304_method_handle_in_static_map",
            Strategy::MethodHandleInRecordClass => "305_method_handle_in_record_class",
            Strategy::MethodHandleInStaticFinalRecordClass => {
                "306_method_handle_in_static_final_record_class"
            }
            Strategy::MethodHandleInRecordClassFunction => {
                "307_method_handle_in_record_class_function"
            }
            Strategy::LambdaMetafactory => "400_lambda_metafactory",
        }
    }
}
