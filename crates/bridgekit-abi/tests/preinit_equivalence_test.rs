//! Pre-initialization equivalence for the process-wide configuration shims.
//!
//! `sqlite3_config` only accepts options before the engine initializes, so
//! this file holds a single test: nothing else in this process may touch the
//! engine first, and the whole sequence runs in one deterministic order.
//! Each shim call must yield exactly the status code of the direct variadic
//! call with the same arguments.

use std::ffi::{c_char, c_int, c_void};
use std::ptr;

use libsqlite3_sys as ffi;

use bridgekit_abi::config::{configure, configure_log_hook};
use bridgekit_abi::sqlite_abi::{
    sqlite_option_context_context_int_string_fnpointer_int64, sqlite_option_no_param,
    sqlite_option_one_int, sqlite_option_two_int64,
};
use bridgekit_core::dbconfig::{
    ProcessOption, SQLITE_CONFIG_LOG, SQLITE_CONFIG_MEMSTATUS, SQLITE_CONFIG_MMAP_SIZE,
    SQLITE_CONFIG_MULTITHREAD, SQLITE_CONFIG_PMASZ, SQLITE_CONFIG_SERIALIZED,
    SQLITE_CONFIG_STMTJRNL_SPILL, SQLITE_CONFIG_URI, SQLITE_MISUSE, SQLITE_OK,
};

unsafe extern "C" fn noop_log(_ctx: *mut c_void, _code: c_int, _msg: *const c_char) {}

#[test]
fn process_config_shims_match_direct_calls_before_init() {
    unsafe {
        // No trailing arguments.
        let shim = sqlite_option_no_param(SQLITE_CONFIG_MULTITHREAD);
        let direct = ffi::sqlite3_config(SQLITE_CONFIG_MULTITHREAD);
        assert_eq!(shim, direct);
        assert_eq!(shim, SQLITE_OK);

        // One int.
        for (verb, value) in [
            (SQLITE_CONFIG_MEMSTATUS, 1),
            (SQLITE_CONFIG_URI, 1),
            (SQLITE_CONFIG_PMASZ, 16384),
            (SQLITE_CONFIG_STMTJRNL_SPILL, -1),
        ] {
            let shim = sqlite_option_one_int(verb, value);
            let direct = ffi::sqlite3_config(verb, value);
            assert_eq!(shim, direct, "verb {verb}");
            assert_eq!(shim, SQLITE_OK, "verb {verb}");
        }

        // Two 64-bit integers.
        let shim = sqlite_option_two_int64(SQLITE_CONFIG_MMAP_SIZE, 0, 0);
        let direct = ffi::sqlite3_config(SQLITE_CONFIG_MMAP_SIZE, 0_i64, 0_i64);
        assert_eq!(shim, direct);
        assert_eq!(shim, SQLITE_OK);

        // Context + callback (log hook), then clear it.
        let shim = sqlite_option_context_context_int_string_fnpointer_int64(
            SQLITE_CONFIG_LOG,
            ptr::null_mut(),
            Some(noop_log),
        );
        let hook = noop_log as *const c_void;
        let direct = ffi::sqlite3_config(SQLITE_CONFIG_LOG, hook, ptr::null_mut::<c_void>());
        assert_eq!(shim, direct);
        assert_eq!(shim, SQLITE_OK);

        let cleared = sqlite_option_context_context_int_string_fnpointer_int64(
            SQLITE_CONFIG_LOG,
            ptr::null_mut(),
            None,
        );
        assert_eq!(cleared, SQLITE_OK);

        // Safe dispatch layer rides the same shims.
        configure(&ProcessOption::MemStatus(false)).unwrap();
        configure(&ProcessOption::MmapSize { default: 0, max: 0 }).unwrap();
        configure_log_hook(None, ptr::null_mut()).unwrap();
        // Leave the library in its default threading mode.
        configure(&ProcessOption::Serialized).unwrap();

        // Initialization flips the regime: both paths must now report
        // misuse, still identically.
        assert_eq!(ffi::sqlite3_initialize(), SQLITE_OK);
        let shim = sqlite_option_no_param(SQLITE_CONFIG_SERIALIZED);
        let direct = ffi::sqlite3_config(SQLITE_CONFIG_SERIALIZED);
        assert_eq!(shim, direct);
        assert_eq!(shim, SQLITE_MISUSE);
        let err = configure(&ProcessOption::Serialized).unwrap_err();
        assert_eq!(err.code, SQLITE_MISUSE);
    }
}
