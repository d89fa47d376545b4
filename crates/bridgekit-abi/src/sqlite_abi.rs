//! Fixed-arity adapters over the database engine's two variadic
//! configuration entry points.
//!
//! `sqlite3_config` and `sqlite3_db_config` take a trailing argument list
//! whose types depend on the option code, which a foreign-function caller
//! cannot express. Each adapter below covers one argument shape actually
//! driven by the application and forwards verbatim; the engine's status code
//! comes back unaltered.

use std::ffi::{c_char, c_int, c_void};
use std::ptr;

use libsqlite3_sys as ffi;

/// Engine diagnostic log hook: `(context, status code, message)`.
pub type LogCallback = unsafe extern "C" fn(*mut c_void, c_int, *const c_char);

// -------------------------------------------------------------------------
// Process-wide configuration (sqlite3_config)
// -------------------------------------------------------------------------

/// Option codes with no trailing arguments (threading modes).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sqlite_option_no_param(config: c_int) -> c_int {
    unsafe { ffi::sqlite3_config(config) }
}

/// Option codes taking one `int`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sqlite_option_one_int(config: c_int, value: c_int) -> c_int {
    unsafe { ffi::sqlite3_config(config, value) }
}

/// Option codes taking two 64-bit integers.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sqlite_option_two_int64(config: c_int, value1: i64, value2: i64) -> c_int {
    unsafe { ffi::sqlite3_config(config, value1, value2) }
}

/// Option codes taking a context pointer and a callback (the log hook).
/// The engine expects the callback before the context in the variadic list.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sqlite_option_context_context_int_string_fnpointer_int64(
    config: c_int,
    context: *mut c_void,
    fn_pointer: Option<LogCallback>,
) -> c_int {
    let hook: *const c_void = match fn_pointer {
        Some(f) => f as *const c_void,
        None => ptr::null(),
    };
    unsafe { ffi::sqlite3_config(config, hook, context) }
}

// -------------------------------------------------------------------------
// Per-connection configuration (sqlite3_db_config)
// -------------------------------------------------------------------------

/// Option codes taking one `const char*`, scoped to a connection. The engine
/// borrows the string; the caller keeps it alive for the connection's life.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sqlite_db_option_constcharp(
    db: *mut ffi::sqlite3,
    config: c_int,
    value: *const c_char,
) -> c_int {
    unsafe { ffi::sqlite3_db_config(db, config, value) }
}

/// Option codes taking a pointer plus two `int`s, scoped to a connection.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sqlite_db_option_voidp_int_int(
    db: *mut ffi::sqlite3,
    config: c_int,
    value1: *mut c_void,
    value2: c_int,
    value3: c_int,
) -> c_int {
    unsafe { ffi::sqlite3_db_config(db, config, value1, value2, value3) }
}

/// Option codes taking an `int` plus an `int*` out-parameter, scoped to a
/// connection.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sqlite_db_option_int_intp(
    db: *mut ffi::sqlite3,
    config: c_int,
    value1: c_int,
    value2: *mut c_int,
) -> c_int {
    unsafe { ffi::sqlite3_db_config(db, config, value1, value2) }
}
