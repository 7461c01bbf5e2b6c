//! End-to-end tests for the opal-format public surface.
//!
//! Everything here goes through the same entry points the rest of the
//! toolchain uses, so the whole pipeline runs under each assertion.

use std::time::Duration;

use opal_format::{Stringify, as_string, hex, offset, size_suffix};

#[test]
fn test_str_mixed_argument_kinds() {
    let rendered = opal_format::str!(
        "%s took %s (%d retries, budget %s)",
        "lowering",
        Duration::from_secs(90),
        3i32,
        Some(Duration::from_millis(2500)),
    );
    assert_eq!(rendered, "lowering took 1.50min (3 retries, budget 2.50sec)");
}

#[test]
fn test_str_container_argument() {
    let widths = vec![1u8, 2, 4, 8];
    assert_eq!(opal_format::str!("widths: %s", widths), "widths: {1, 2, 4, 8}");
}

#[test]
fn test_str_custom_stringify_argument() {
    struct Register {
        index: u8,
    }
    impl Stringify for Register {
        fn as_string(&self) -> String {
            format!("r{}", self.index)
        }
    }
    let reg = Register { index: 7 };
    assert_eq!(opal_format::str!("spill %s", reg), "spill r7");
    assert_eq!(as_string(&reg), "r7");
}

#[cfg(feature = "type-names")]
#[test]
fn test_str_opaque_fallback() {
    struct Telemetry;
    let value = Telemetry;
    let rendered = opal_format::str!("%s", value);
    assert!(rendered.starts_with("[Telemetry@0x"), "got {rendered}");
    assert!(rendered.ends_with(']'));
}

#[test]
fn test_str_many_calls_reuse_slots() {
    // Far more than one ring of coercions; every call still renders its own
    // arguments correctly because pointers never outlive their call.
    for round in 0..64u32 {
        let rendered = opal_format::str!("%s=%u", format!("round-{round}"), round);
        assert_eq!(rendered, format!("round-{round}={round}"));
    }
}

#[test]
fn test_threads_do_not_interfere() {
    let worker = std::thread::spawn(|| opal_format::str!("%s", vec![1u32, 2, 3]));
    let local = opal_format::str!("%s", "main");
    assert_eq!(worker.join().unwrap(), "{1, 2, 3}");
    assert_eq!(local, "main");
}

#[test]
fn test_numeric_helpers() {
    assert_eq!(hex(255u32), "0xff");
    assert_eq!(hex(-1i32), "-0x1");
    assert_eq!(offset(5), "+ 0x5");
    assert_eq!(offset(-5), "- 0x5");
}

#[test]
fn test_size_suffixes_shared_config() {
    let suffixes: Vec<Option<char>> = [1usize, 2, 4, 8, 16]
        .iter()
        .map(|w| size_suffix(*w))
        .collect();
    assert_eq!(
        suffixes,
        vec![Some('b'), Some('w'), Some('d'), Some('q'), None]
    );
}

#[cfg(feature = "type-names")]
#[test]
fn test_type_names_in_diagnostics() {
    use opal_format::static_type_name;

    assert_eq!(static_type_name::<Vec<String>>(), "Vec<String>");
    let line = opal_format::str!("bad operand of type %s", static_type_name::<u64>());
    assert_eq!(line, "bad operand of type u64");
}

#[test]
fn test_nul_bytes_never_truncate() {
    let hostile = "pre\0post";
    assert_eq!(opal_format::str!("%s", hostile), "pre?post");
}
