//! Value stringification
//!
//! [`Stringify`] is the capability that gives a value a single canonical
//! textual form for diagnostics. Convertibility is a compile-time property:
//! a type without an impl cannot be passed to [`as_string`] at all, and
//! callers that need to branch on it do so with a `T: Stringify` bound.
//!
//! The impl set covers, in the order a reader should think about them:
//!
//! 1. Numeric primitives, `bool`, `char`: standard base-10 form.
//! 2. Custom conversions: a type opts in by implementing [`Stringify`].
//!    This is the extension point; keep the output short and unambiguous.
//! 3. String-like types: copied (and transcoded lossily where the source
//!    is not UTF-8) into an owned `String`.
//! 4. `Duration`: coarsest unit reached from {hrs, min, sec, ms, ns},
//!    two decimal places.
//! 5. `Option<T>`: the inner conversion, or `"nullopt"` when absent.
//! 6. Sequence containers: `"{a, b}"`, comma-space separated.
//!
//! Wrappers (`&T`, `Box<T>`, `Arc<T>`) recurse into the wrapped value, so
//! nested shapes like `Vec<Option<Duration>>` convert with no extra code.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::ffi::{CStr, CString, OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Capability: this value has a canonical diagnostic string form.
pub trait Stringify {
    fn as_string(&self) -> String;
}

/// Convert any convertible value to its diagnostic string form.
///
/// Calling this on a type without a [`Stringify`] impl is a compile error,
/// not a runtime one.
pub fn as_string<T: Stringify + ?Sized>(value: &T) -> String {
    value.as_string()
}

macro_rules! stringify_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Stringify for $ty {
                #[inline]
                fn as_string(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

stringify_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

impl Stringify for str {
    #[inline]
    fn as_string(&self) -> String {
        self.to_owned()
    }
}

impl Stringify for String {
    #[inline]
    fn as_string(&self) -> String {
        self.clone()
    }
}

impl Stringify for CStr {
    fn as_string(&self) -> String {
        self.to_string_lossy().into_owned()
    }
}

impl Stringify for CString {
    fn as_string(&self) -> String {
        self.to_string_lossy().into_owned()
    }
}

impl Stringify for OsStr {
    fn as_string(&self) -> String {
        self.to_string_lossy().into_owned()
    }
}

impl Stringify for OsString {
    fn as_string(&self) -> String {
        self.to_string_lossy().into_owned()
    }
}

impl Stringify for Path {
    fn as_string(&self) -> String {
        self.display().to_string()
    }
}

impl Stringify for PathBuf {
    fn as_string(&self) -> String {
        self.display().to_string()
    }
}

impl<'a, T: Stringify + ?Sized> Stringify for &'a T {
    fn as_string(&self) -> String {
        (**self).as_string()
    }
}

impl<T: Stringify + ?Sized> Stringify for Box<T> {
    fn as_string(&self) -> String {
        (**self).as_string()
    }
}

impl<T: Stringify + ?Sized> Stringify for Arc<T> {
    fn as_string(&self) -> String {
        (**self).as_string()
    }
}

/// Unit table for duration rendering, coarsest first. The final entry is the
/// unconditional fallback, so the scan below cannot fall through.
const DURATION_UNITS: [(Duration, &str); 5] = [
    (Duration::from_secs(60 * 60), "hrs"),
    (Duration::from_secs(60), "min"),
    (Duration::from_secs(1), "sec"),
    (Duration::from_millis(1), "ms"),
    (Duration::from_nanos(1), "ns"),
];

impl Stringify for Duration {
    /// Coarsest unit the duration reaches, two decimal places:
    /// one hour is `"1.00hrs"`, 90 minutes is `"1.50hrs"`, 500 nanoseconds
    /// is `"500.00ns"`.
    fn as_string(&self) -> String {
        for (index, (unit, suffix)) in DURATION_UNITS.iter().enumerate() {
            let is_fallback = index == DURATION_UNITS.len() - 1;
            if is_fallback || *self >= *unit {
                return format!("{:.2}{}", self.as_secs_f64() / unit.as_secs_f64(), suffix);
            }
        }
        unreachable!("duration unit table ends with an unconditional fallback");
    }
}

impl<T: Stringify> Stringify for Option<T> {
    fn as_string(&self) -> String {
        match self {
            Some(value) => value.as_string(),
            None => String::from("nullopt"),
        }
    }
}

/// Render an element sequence as `"{a, b}"`; empty input yields `"{}"`.
fn braced_list<'a, T, I>(items: I) -> String
where
    T: Stringify + ?Sized + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut out = String::from("{");
    let mut first = true;
    for item in items {
        if !first {
            out.push_str(", ");
        }
        out.push_str(&item.as_string());
        first = false;
    }
    out.push('}');
    out
}

impl<T: Stringify> Stringify for [T] {
    fn as_string(&self) -> String {
        braced_list(self)
    }
}

impl<T: Stringify, const N: usize> Stringify for [T; N] {
    fn as_string(&self) -> String {
        braced_list(self)
    }
}

impl<T: Stringify> Stringify for Vec<T> {
    fn as_string(&self) -> String {
        braced_list(self)
    }
}

impl<T: Stringify> Stringify for VecDeque<T> {
    fn as_string(&self) -> String {
        braced_list(self)
    }
}

impl<T: Stringify> Stringify for BTreeSet<T> {
    fn as_string(&self) -> String {
        braced_list(self)
    }
}

impl<T: Stringify, S> Stringify for HashSet<T, S> {
    fn as_string(&self) -> String {
        braced_list(self)
    }
}
