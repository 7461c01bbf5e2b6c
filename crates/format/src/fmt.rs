//! Format engine
//!
//! [`str!`](crate::str) renders a printf-style template through the host
//! primitive `libc::snprintf` in two phases: measure against a null buffer
//! to learn the exact output length, allocate exactly that much, then write.
//! The template is passed through verbatim (NUL bytes scrubbed); this crate
//! never parses or validates directive syntax.
//!
//! Each argument is coerced exactly once. The macro binds the coerced raw
//! value and feeds the same bytes to both phases:
//!
//! - the measured and written lengths cannot diverge
//! - each non-trivial argument consumes one transient slot per call
//!
//! The numeric helpers [`hex`] and [`offset`] and the shared size-suffix
//! configuration used by instruction rendering call sites live here too.

use std::ptr;

use libc::{c_char, c_int};

/// Register size suffixes, indexed by operand byte width.
pub const SUFFIX_BYTE: char = 'b';
pub const SUFFIX_WORD: char = 'w';
pub const SUFFIX_DWORD: char = 'd';
pub const SUFFIX_QWORD: char = 'q';

/// Column layout for instruction rendering call sites.
pub const MNEMONIC_FORMAT: &str = "%-8s";
pub const OPERAND_FORMAT: &str = "%-12s";
pub const MNEMONIC_WIDTH: usize = 8;
pub const OPERAND_WIDTH: usize = 12;

/// Single-character suffix for an operand of `byte_width` bytes, if one is
/// defined for that width.
pub fn size_suffix(byte_width: usize) -> Option<char> {
    match byte_width {
        1 => Some(SUFFIX_BYTE),
        2 => Some(SUFFIX_WORD),
        4 => Some(SUFFIX_DWORD),
        8 => Some(SUFFIX_QWORD),
        _ => None,
    }
}

/// Two-phase render driver behind the `str!` macro.
///
/// `invoke` wraps one `snprintf` call over the already-coerced arguments;
/// it runs twice with identical argument bytes, first to measure, then to
/// write. A negative return from the primitive (host encoding failure)
/// yields an empty string.
#[doc(hidden)]
pub fn __render<F>(template: &str, mut invoke: F) -> String
where
    F: FnMut(*mut c_char, libc::size_t, *const c_char) -> c_int,
{
    let template = crate::transient::to_c_string(template.to_owned());

    let measured = invoke(ptr::null_mut(), 0, template.as_ptr());
    if measured <= 0 {
        return String::new();
    }

    let length = measured as usize;
    let mut buffer = vec![0u8; length + 1];
    let written = invoke(
        buffer.as_mut_ptr().cast::<c_char>(),
        length + 1,
        template.as_ptr(),
    );
    debug_assert!(
        written == measured,
        "measure/write divergence: measured {measured}, wrote {written}"
    );

    buffer.truncate(length.min(written.max(0) as usize));
    match String::from_utf8(buffer) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

/// Render a printf-style template with arguments of arbitrary type.
///
/// Each argument is lowered by the coercion ladder (see [`crate::param`]):
///
/// - primitives and C strings pass through
/// - convertible values go through [`Stringify`](crate::Stringify) into a
///   transient slot
/// - everything else renders as `"[<TypeName>@<address>]"`
///
/// String-producing arguments match `%s`. Promoted integers match
/// `%d`/`%u`/`%x`, 64-bit integers `%lld`/`%llx`, floats `%f`.
///
/// The template is handed to the platform `snprintf` verbatim. Directive/
/// argument correspondence is **not** checked: a directive that does not
/// match its coerced argument type misbehaves exactly as it would in C.
/// Keep templates literal and reviewed, as with any printf surface.
#[macro_export]
macro_rules! str {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::__format_call!(($fmt) [] $($arg),*)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __format_call {
    (($fmt:expr) [$($bound:expr,)*]) => {
        $crate::fmt::__render(
            ::core::convert::AsRef::<str>::as_ref(&$fmt),
            |buffer, capacity, template| unsafe {
                $crate::__libc::snprintf(buffer, capacity, template $(, $bound)*)
            },
        )
    };
    (($fmt:expr) [$($bound:expr,)*] $head:expr $(, $tail:expr)*) => {{
        #[allow(unused_imports)]
        use $crate::param::{OpaqueArg as _, PassthroughArg as _, StringifyArg as _};
        match (&&$crate::param::Param(&$head)).coerce() {
            coerced => $crate::__format_call!(($fmt) [$($bound,)* coerced,] $($tail),*),
        }
    }};
}

/// Integers renderable by [`hex`]; covers the widths `%llx` can carry.
pub trait Hexadecimal {
    fn hex(self) -> String;
}

macro_rules! hex_unsigned {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Hexadecimal for $ty {
                #[inline]
                fn hex(self) -> String {
                    crate::str!("0x%llx", self as u64)
                }
            }
        )*
    };
}

macro_rules! hex_signed {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Hexadecimal for $ty {
                fn hex(self) -> String {
                    if self >= 0 {
                        crate::str!("0x%llx", self as u64)
                    } else {
                        // unsigned_abs keeps the minimum value well-defined
                        crate::str!("-0x%llx", self.unsigned_abs() as u64)
                    }
                }
            }
        )*
    };
}

hex_unsigned!(u8, u16, u32, u64, usize);
hex_signed!(i8, i16, i32, i64, isize);

/// Lowercase hexadecimal form: unsigned values as `0x..`, negative signed
/// values as `-0x..` of the magnitude.
pub fn hex<T: Hexadecimal>(value: T) -> String {
    value.hex()
}

/// Signed displacement form with an explicit sign: `+ 0x..` when
/// non-negative, `- 0x..` of the magnitude otherwise.
pub fn offset(value: i64) -> String {
    if value >= 0 {
        crate::str!("+ 0x%llx", value as u64)
    } else {
        crate::str!("- 0x%llx", value.unsigned_abs())
    }
}
