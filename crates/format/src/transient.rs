//! Transient string storage
//!
//! A fixed ring of reusable C-string slots, one ring per thread. Argument
//! coercion moves each owned intermediate string in here and hands the
//! rendering primitive a raw pointer into the slot, so the string outlives
//! the `snprintf` call without any heap handoff across the FFI boundary.
//!
//! Slots are claimed round-robin: the next claim overwrites whatever the
//! slot held before, dropping the previous `CString`.
//!
//! # WARNING: Pointer Lifetime
//!
//! A pointer returned by [`stash`] is valid from the moment it is written
//! until the 16th subsequent [`stash`] call on the same thread reclaims its
//! slot. Callers must not retain a slot pointer across more than
//! `SLOT_COUNT - 1` further coercions on that thread. The format engine
//! consumes every pointer within the call that produced it, well inside the
//! window.
//!
//! Rings are confined to their owning thread; no other thread can observe
//! or recycle them, so no locking is involved.

use std::cell::{Cell, RefCell};
use std::ffi::CString;

use libc::c_char;

/// Number of reusable slots per thread.
pub const SLOT_COUNT: usize = 16;

thread_local! {
    /// This thread's slot ring, constructed lazily on first use
    static SLOTS: RefCell<[Option<CString>; SLOT_COUNT]> =
        const { RefCell::new([const { None }; SLOT_COUNT]) };

    /// Index of the next slot to claim
    static NEXT_SLOT: Cell<usize> = const { Cell::new(0) };
}

/// Convert owned text to a `CString`, replacing interior NUL bytes with
/// `'?'` so the full text survives instead of truncating at the first NUL.
pub(crate) fn to_c_string(text: String) -> CString {
    CString::new(text).unwrap_or_else(|err| {
        let mut bytes = err.into_vec();
        for byte in &mut bytes {
            if *byte == 0 {
                *byte = b'?';
            }
        }
        CString::new(bytes).expect("null bytes already replaced")
    })
}

/// Move `text` into the next slot and return a pointer to its C string.
pub(crate) fn stash(text: String) -> *const c_char {
    let cstring = to_c_string(text);

    let index = NEXT_SLOT.with(|next| {
        let index = next.get();
        next.set((index + 1) % SLOT_COUNT);
        index
    });

    SLOTS.with(|slots| {
        let mut slots = slots.borrow_mut();
        // Take the pointer before the move; the CString's buffer address is
        // unaffected by moving the handle into the slot.
        let ptr = cstring.as_ptr();
        slots[index] = Some(cstring);
        ptr
    })
}

#[cfg(test)]
fn next_slot_index() -> usize {
    NEXT_SLOT.with(Cell::get)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    /// Test-only read of a slot pointer; callers keep within the 15-call
    /// validity window.
    fn read_back(ptr: *const c_char) -> String {
        unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
    }

    #[test]
    fn test_stash_roundtrip() {
        let ptr = stash("hello".to_string());
        assert_eq!(read_back(ptr), "hello");
    }

    #[test]
    fn test_nul_bytes_scrubbed() {
        let ptr = stash("a\0b\0".to_string());
        assert_eq!(read_back(ptr), "a?b?");
    }

    #[test]
    fn test_pointer_survives_fifteen_more_stashes() {
        let anchor = stash("anchor".to_string());
        for i in 0..(SLOT_COUNT - 1) {
            stash(format!("filler-{i}"));
        }
        // 15 subsequent claims later the anchor slot is still untouched.
        assert_eq!(read_back(anchor), "anchor");
    }

    #[test]
    fn test_slot_index_recycles_after_full_cycle() {
        let start = next_slot_index();
        for i in 0..SLOT_COUNT {
            stash(format!("cycle-{i}"));
        }
        // The 17th claim would reuse the 1st slot, overwriting its content.
        assert_eq!(next_slot_index(), start);
    }
}
