//! Format argument coercion
//!
//! `snprintf` only accepts C-varargs-safe values: promoted integers,
//! doubles, and pointers. This module lowers an arbitrary Rust value into
//! one of those forms, picking the strategy at compile time in strict
//! priority order:
//!
//! 1. [`PassthroughArg`]: fundamental numerics (with C default-argument
//!    promotion), raw pointers, and C strings, handed through unchanged.
//!    `&str`/`String` are copied into a transient slot because Rust strings
//!    carry no NUL terminator; `&CStr`/`CString` pass their existing
//!    backing pointer with no copy.
//! 2. [`StringifyArg`]: anything with a [`Stringify`] impl is converted
//!    and the owned result moved into a transient slot.
//! 3. [`OpaqueArg`]: everything else renders as `"[<TypeName>@<address>]"`.
//!    This is designed behavior, not an error path: every value coerces to
//!    *something*.
//!
//! Selection uses method-resolution order over `&&Param` / `&Param` /
//! `Param` receivers, so the priority chain is fixed at compile time per
//! argument type. Misuse of a non-convertible type is impossible: the
//! fallback level accepts anything. The expected call shape is
//! `(&&Param(&value)).coerce()`, which the `str!` macro emits.
//!
//! This module is the only writer of the transient slot ring.

use std::ffi::{CStr, CString};

use libc::{c_char, c_double, c_int, c_uint, c_longlong, c_ulonglong, c_void};

use crate::stringify::Stringify;
use crate::transient;
use crate::typename;

/// Borrow of a single format argument, the receiver the coercion ladder
/// resolves against.
pub struct Param<'a, T: ?Sized>(pub &'a T);

impl<'a, T: ?Sized> Clone for Param<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T: ?Sized> Copy for Param<'a, T> {}

/// Priority 1: values `snprintf` accepts directly.
pub trait PassthroughArg {
    type Raw;
    fn coerce(self) -> Self::Raw;
}

/// Priority 2: values converted through [`Stringify`] into a transient slot.
pub trait StringifyArg {
    type Raw;
    fn coerce(self) -> Self::Raw;
}

/// Priority 3: the universal `"[<TypeName>@<address>]"` fallback.
pub trait OpaqueArg {
    type Raw;
    fn coerce(self) -> Self::Raw;
}

/// Numerics pass through with C default-argument promotion applied, both as
/// values and behind one level of reference.
macro_rules! passthrough_numeric {
    ($($ty:ty => $raw:ty),* $(,)?) => {
        $(
            impl<'a, 'b, 'c> PassthroughArg for &'a &'b Param<'c, $ty> {
                type Raw = $raw;
                #[inline]
                #[allow(trivial_numeric_casts, clippy::unnecessary_cast)]
                fn coerce(self) -> $raw {
                    *self.0 as $raw
                }
            }

            impl<'a, 'b, 'c, 'd> PassthroughArg for &'a &'b Param<'c, &'d $ty> {
                type Raw = $raw;
                #[inline]
                #[allow(trivial_numeric_casts, clippy::unnecessary_cast)]
                fn coerce(self) -> $raw {
                    **self.0 as $raw
                }
            }
        )*
    };
}

passthrough_numeric!(
    i8 => c_int,
    i16 => c_int,
    i32 => c_int,
    i64 => c_longlong,
    isize => c_longlong,
    u8 => c_uint,
    u16 => c_uint,
    u32 => c_uint,
    u64 => c_ulonglong,
    usize => c_ulonglong,
    f32 => c_double,
    f64 => c_double,
    bool => c_int,
    char => c_int,
);

impl<'a, 'b, 'c, P> PassthroughArg for &'a &'b Param<'c, *const P> {
    type Raw = *const c_void;
    #[inline]
    fn coerce(self) -> *const c_void {
        *self.0 as *const c_void
    }
}

impl<'a, 'b, 'c, P> PassthroughArg for &'a &'b Param<'c, *mut P> {
    type Raw = *const c_void;
    #[inline]
    fn coerce(self) -> *const c_void {
        *self.0 as *const c_void
    }
}

// C strings already own NUL-terminated storage with a caller-owned
// lifetime, so they are the one string shape that passes through with no
// copy.

impl<'a, 'b, 'c, 'd> PassthroughArg for &'a &'b Param<'c, &'d CStr> {
    type Raw = *const c_char;
    #[inline]
    fn coerce(self) -> *const c_char {
        self.0.as_ptr()
    }
}

impl<'a, 'b, 'c> PassthroughArg for &'a &'b Param<'c, CString> {
    type Raw = *const c_char;
    #[inline]
    fn coerce(self) -> *const c_char {
        self.0.as_ptr()
    }
}

impl<'a, 'b, 'c, 'd> PassthroughArg for &'a &'b Param<'c, &'d CString> {
    type Raw = *const c_char;
    #[inline]
    fn coerce(self) -> *const c_char {
        self.0.as_ptr()
    }
}

// Rust strings have no NUL terminator to point at, so both borrowed and
// owned strings take a transient copy.

impl<'a, 'b, 'c, 'd> PassthroughArg for &'a &'b Param<'c, &'d str> {
    type Raw = *const c_char;
    fn coerce(self) -> *const c_char {
        transient::stash((*self.0).to_owned())
    }
}

impl<'a, 'b, 'c> PassthroughArg for &'a &'b Param<'c, String> {
    type Raw = *const c_char;
    fn coerce(self) -> *const c_char {
        transient::stash(self.0.clone())
    }
}

impl<'a, 'b, 'c, 'd> PassthroughArg for &'a &'b Param<'c, &'d String> {
    type Raw = *const c_char;
    fn coerce(self) -> *const c_char {
        transient::stash((*self.0).clone())
    }
}

impl<'a, 'b, T> StringifyArg for &'a Param<'b, T>
where
    T: Stringify + ?Sized,
{
    type Raw = *const c_char;
    fn coerce(self) -> *const c_char {
        transient::stash(self.0.as_string())
    }
}

#[cfg(feature = "type-names")]
impl<'a, T: ?Sized> OpaqueArg for Param<'a, T> {
    type Raw = *const c_char;
    fn coerce(self) -> *const c_char {
        let address = (self.0 as *const T).cast::<()>();
        transient::stash(format!(
            "[{}@{:p}]",
            typename::dynamic_type_name(self.0),
            address
        ))
    }
}

#[cfg(not(feature = "type-names"))]
impl<'a, T: ?Sized + 'static> OpaqueArg for Param<'a, T> {
    type Raw = *const c_char;
    fn coerce(self) -> *const c_char {
        let address = (self.0 as *const T).cast::<()>();
        transient::stash(format!(
            "[{}@{:p}]",
            typename::dynamic_type_name(self.0),
            address
        ))
    }
}
