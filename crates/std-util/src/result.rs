/// Unwraps the `Err` of a result, panicking with the `Ok` value otherwise.
///
/// Extra arguments are formatted into the panic message.
#[macro_export]
macro_rules! assert_err {
    ($e:expr $(, $($t:tt)* )?) => {
        match $e {
            Ok(value) => $crate::result::fail(
                format_args!("expected `Err`; actual=Ok({:?})", value),
                None $( .or(Some(format!($($t)*))) )?,
            ),
            Err(err) => err,
        }
    };
}

/// Unwraps the `Ok` of a result, panicking with the error's message chain
/// otherwise.
#[macro_export]
macro_rules! assert_ok {
    ($e:expr $(, $($t:tt)* )?) => {
        match $e {
            Ok(value) => value,
            Err(err) => $crate::result::fail(
                format_args!("expected `Ok`; error=\"{}\"", err),
                None $( .or(Some(format!($($t)*))) )?,
            ),
        }
    };
}

#[doc(hidden)]
#[track_caller]
pub fn fail(summary: std::fmt::Arguments<'_>, context: Option<String>) -> ! {
    match context {
        Some(context) => panic!("{summary}, {context}"),
        None => panic!("{summary}"),
    }
}
