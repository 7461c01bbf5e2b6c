//! Type name resolution
//!
//! Every diagnostic in Opal that mentions a type goes through this module so
//! the output stays uniform: no module paths, no generic-argument noise from
//! crate internals, and a name that is available even when compiler-provided
//! type names are compiled out.
//!
//! Two identities are maintained per type:
//!
//! - A human-friendly name (`static_type_name` / `dynamic_type_name`),
//!   derived from `std::any::type_name` with path qualifiers stripped.
//! - A stable numeric token (`type_token`), assigned sequentially at first
//!   registration. With the `type-names` feature disabled, names are derived
//!   from the token instead (`Type1`, `Type2a`, ...), so resolution never
//!   depends on the compiler's name tables.
//!
//! Static names are computed at most once per type and interned for process
//! lifetime.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{LazyLock, Mutex};

/// Interned static names, one entry per distinct type, never evicted
static STATIC_NAMES: LazyLock<Mutex<HashMap<TypeId, &'static str>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Registration-order numeric identities, the name source when
/// compiler-provided names are unavailable
static TYPE_TOKENS: LazyLock<Mutex<HashMap<TypeId, u64>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Next token to hand out (0 is reserved as "never assigned")
static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Stable per-type numeric identity, assigned at first registration.
///
/// Tokens are sequential in first-use order within a process. They are not
/// stable across processes; they exist so type identity survives builds
/// without the `type-names` feature.
pub fn type_token<T: ?Sized + 'static>() -> u64 {
    let mut tokens = TYPE_TOKENS.lock().unwrap();
    *tokens
        .entry(TypeId::of::<T>())
        .or_insert_with(|| NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
}

/// Name for a type, usable without an instance.
///
/// Computed once per type, interned, and returned as `&'static str` on every
/// subsequent call. The first call for a type leaks one small allocation;
/// the registry persists for process lifetime.
pub fn static_type_name<T: ?Sized + 'static>() -> &'static str {
    let mut names = STATIC_NAMES.lock().unwrap();
    if let Some(&name) = names.get(&TypeId::of::<T>()) {
        return name;
    }
    let name: &'static str = Box::leak(resolve_name::<T>().into_boxed_str());
    names.insert(TypeId::of::<T>(), name);
    name
}

#[cfg(feature = "type-names")]
fn resolve_name<T: ?Sized + 'static>() -> String {
    fix_type_name(std::any::type_name::<T>())
}

#[cfg(not(feature = "type-names"))]
fn resolve_name<T: ?Sized + 'static>() -> String {
    format!("Type{:x}", type_token::<T>())
}

/// Most specific name observable from an instance.
///
/// With the `type-names` feature this reads the value's own type name;
/// without it, resolution redirects to [`static_type_name`].
#[cfg(feature = "type-names")]
pub fn dynamic_type_name<T: ?Sized>(value: &T) -> String {
    fix_type_name(std::any::type_name_of_val(value))
}

/// Most specific name observable from an instance.
///
/// With the `type-names` feature this reads the value's own type name;
/// without it, resolution redirects to [`static_type_name`].
#[cfg(not(feature = "type-names"))]
pub fn dynamic_type_name<T: ?Sized + 'static>(value: &T) -> String {
    let _ = value;
    static_type_name::<T>().to_string()
}

/// Strip path qualifiers from a raw type name, at every nesting depth.
///
/// `core::option::Option<alloc::string::String>` becomes `Option<String>`.
/// Each path token keeps only its final segment; delimiters (`<`, `>`, `,`,
/// `&`, brackets, spaces) are preserved as-is, so generic structure survives.
#[cfg_attr(not(feature = "type-names"), allow(dead_code))]
pub(crate) fn fix_type_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut segment = String::new();
    for ch in raw.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            segment.push(ch);
        } else {
            push_last_segment(&mut out, &segment);
            segment.clear();
            out.push(ch);
        }
    }
    push_last_segment(&mut out, &segment);
    out
}

fn push_last_segment(out: &mut String, segment: &str) {
    out.push_str(segment.rsplit("::").next().unwrap_or(segment));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_type_name_strips_paths() {
        assert_eq!(fix_type_name("alloc::string::String"), "String");
        assert_eq!(fix_type_name("u32"), "u32");
    }

    #[test]
    fn test_fix_type_name_nested_generics() {
        assert_eq!(
            fix_type_name("core::option::Option<alloc::string::String>"),
            "Option<String>"
        );
        assert_eq!(
            fix_type_name("alloc::vec::Vec<(u8, core::time::Duration)>"),
            "Vec<(u8, Duration)>"
        );
    }

    #[test]
    fn test_fix_type_name_references_and_slices() {
        assert_eq!(fix_type_name("&[alloc::string::String]"), "&[String]");
        assert_eq!(fix_type_name("&str"), "&str");
    }

    #[cfg(feature = "type-names")]
    #[test]
    fn test_static_name_friendly() {
        assert_eq!(static_type_name::<Vec<String>>(), "Vec<String>");
        assert_eq!(static_type_name::<u64>(), "u64");
    }

    #[test]
    fn test_static_name_interned() {
        // Same pointer on every call: computed once, cached for process life.
        let first = static_type_name::<Vec<u8>>();
        let second = static_type_name::<Vec<u8>>();
        assert_eq!(first.as_ptr(), second.as_ptr());
    }

    #[cfg(feature = "type-names")]
    #[test]
    fn test_dynamic_matches_static_for_concrete_values() {
        let value = 7u64;
        assert_eq!(dynamic_type_name(&value), static_type_name::<u64>());
    }

    #[test]
    fn test_type_token_stable_and_distinct() {
        let a1 = type_token::<u32>();
        let a2 = type_token::<u32>();
        let b = type_token::<i32>();
        assert_eq!(a1, a2);
        assert_ne!(a1, b);
        assert_ne!(a1, 0);
    }
}
