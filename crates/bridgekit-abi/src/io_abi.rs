//! ABI layer for the OS file-open call.
//!
//! Adapts variadic `open` to a fixed two-argument signature for foreign
//! callers; the descriptor or error sentinel comes back unchanged, with
//! `errno` carrying the failure reason.

use std::ffi::{CStr, c_char, c_int};
use std::io;
use std::os::fd::{FromRawFd, OwnedFd};

/// `open(path, flags)` with a fixed signature. Returns the file descriptor,
/// or -1 with `errno` set.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn open_constcharp_int(path: *const c_char, flags: c_int) -> c_int {
    unsafe { libc::open(path, flags) }
}

/// Safe wrapper over the same call for Rust callers.
///
/// # Errors
///
/// The OS `open` failure, untranslated.
pub fn open_fd(path: &CStr, flags: c_int) -> io::Result<OwnedFd> {
    let fd = unsafe { open_constcharp_int(path.as_ptr(), flags) };
    if fd < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(unsafe { OwnedFd::from_raw_fd(fd) })
}
