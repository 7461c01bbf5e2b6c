//! Opal diagnostics formatting
//!
//! This crate gives every value in the Opal toolchain a textual form, so
//! diagnostics never need per-type conversion code at the call site:
//!
//! - `as_string`: convert any convertible value to its canonical string
//!   form ([`Stringify`] is the opt-in capability).
//! - `str!`: render a printf-style template with arguments of arbitrary
//!   type, each lowered to a varargs-safe form by the coercion ladder in
//!   `param`. Values with no textual form fall back to
//!   `"[<TypeName>@<address>]"`.
//! - `hex` / `offset`: the numeric forms instruction dumps use.
//! - `static_type_name` / `dynamic_type_name` / `type_token`: friendly,
//!   cached type names with a stable numeric fallback identity.
//!
//! # Example
//!
//! ```
//! use opal_format::{as_string, hex};
//! use std::time::Duration;
//!
//! assert_eq!(as_string(&Duration::from_secs(90)), "1.50min");
//! let line = opal_format::str!("%s at %s", "checkpoint", hex(48879u32));
//! assert_eq!(line, "checkpoint at 0xbeef");
//! ```
//!
//! # Modules
//!
//! - `typename`: type-name resolution and the per-type token registry
//! - `stringify`: the `Stringify` capability and its impl set
//! - `param`: compile-time coercion of format arguments
//! - `fmt`: the two-phase `str!` engine plus numeric helpers
//!
//! Transient storage is thread-confined: a ring of [`SLOT_COUNT`] reusable
//! slots per thread, claimed round-robin by coercion. A coerced string
//! pointer is consumed within its own `str!` call; holding one across more
//! than `SLOT_COUNT - 1` further coercions on the same thread is invalid.

pub mod fmt;
pub mod param;
pub mod stringify;
mod transient;
pub mod typename;

pub use fmt::{
    Hexadecimal, MNEMONIC_FORMAT, MNEMONIC_WIDTH, OPERAND_FORMAT, OPERAND_WIDTH, SUFFIX_BYTE,
    SUFFIX_DWORD, SUFFIX_QWORD, SUFFIX_WORD, hex, offset, size_suffix,
};
pub use param::{OpaqueArg, Param, PassthroughArg, StringifyArg};
pub use stringify::{Stringify, as_string};
pub use transient::SLOT_COUNT;
pub use typename::{dynamic_type_name, static_type_name, type_token};

#[doc(hidden)]
pub use ::libc as __libc;
