//! ABI layer for OS identification and build identification.
//!
//! `uname_model` hands back the machine field of a caller-owned `utsname`
//! without copying or validating it. The safe [`machine`] wrapper performs
//! the `uname` call itself for Rust callers.

use std::ffi::{CStr, c_char};
use std::io;
use std::mem;

use bridgekit_core::{dbconfig, sysinfo};

/// Machine-architecture field of a populated identification structure.
///
/// The caller owns `u` and its lifetime; the returned pointer aliases the
/// structure's `machine` field.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uname_model(u: *mut libc::utsname) -> *mut c_char {
    unsafe { (*u).machine.as_mut_ptr() }
}

/// Build timestamp in `__DATE__ " " __TIME__` layout, NUL-terminated,
/// 'static lifetime.
#[unsafe(no_mangle)]
pub extern "C" fn version_timestamp() -> *const c_char {
    sysinfo::BUILD_TIMESTAMP_C.as_ptr()
}

/// Type tag for binding an FTS5 extension API pointer, NUL-terminated,
/// 'static lifetime.
#[unsafe(no_mangle)]
pub extern "C" fn fts5_api_pointer_type() -> *const c_char {
    dbconfig::FTS5_API_POINTER_TYPE.as_ptr()
}

/// Machine-architecture string of the running system.
///
/// # Errors
///
/// The OS `uname` failure, untranslated.
pub fn machine() -> io::Result<String> {
    let mut u: libc::utsname = unsafe { mem::zeroed() };
    if unsafe { libc::uname(&mut u) } != 0 {
        return Err(io::Error::last_os_error());
    }
    let field = unsafe { CStr::from_ptr(u.machine.as_ptr()) };
    Ok(sysinfo::field_to_string(field.to_bytes()))
}
