//! Build identification and OS-identification field helpers.
//!
//! The timestamp is baked in by `build.rs` in the same `"Mon dd yyyy hh:mm:ss"`
//! layout the application layer already parses. Field extraction operates on
//! the raw bytes of a fixed-size `utsname`-style buffer; the FFI cast from
//! `c_char` happens in the ABI crate.

use std::ffi::CStr;

/// Build timestamp, e.g. `"Aug 29 2026 12:34:56"`.
pub const BUILD_TIMESTAMP: &str = env!("BRIDGEKIT_BUILD_TIMESTAMP");

const BUILD_TIMESTAMP_NUL: &[u8] = concat!(env!("BRIDGEKIT_BUILD_TIMESTAMP"), "\0").as_bytes();

/// NUL-terminated build timestamp for foreign callers.
pub const BUILD_TIMESTAMP_C: &CStr = match CStr::from_bytes_with_nul(BUILD_TIMESTAMP_NUL) {
    Ok(s) => s,
    Err(_) => panic!("build timestamp contains an interior NUL"),
};

/// Extracts the string content of a fixed-size, NUL-padded identification
/// field (like `utsname.machine`). Bytes past the first NUL are ignored;
/// a buffer with no NUL is taken whole. Invalid UTF-8 is replaced.
#[must_use]
pub fn field_to_string(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}
