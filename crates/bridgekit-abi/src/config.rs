//! Safe Rust-facing configuration API.
//!
//! Dispatches the tagged option types from `bridgekit-core` onto the
//! fixed-arity shims in [`crate::sqlite_abi`]. This layer owns the only
//! interpretation of status codes in the crate: a non-zero code becomes a
//! [`SqliteError`] carrying the raw code and the engine's own description.
//! The shims underneath stay pass-through.

use std::ffi::{CStr, CString, c_int, c_void};
use std::ptr;

use libsqlite3_sys as ffi;
use parking_lot::Mutex;
use thiserror::Error;

use bridgekit_core::dbconfig::{
    ConnectionOption, ProcessOption, SQLITE_CONFIG_LOG, SQLITE_CONFIG_MEMSTATUS,
    SQLITE_CONFIG_MMAP_SIZE, SQLITE_CONFIG_MULTITHREAD, SQLITE_CONFIG_PMASZ,
    SQLITE_CONFIG_SERIALIZED, SQLITE_CONFIG_SINGLETHREAD, SQLITE_CONFIG_STMTJRNL_SPILL,
    SQLITE_CONFIG_URI, SQLITE_DBCONFIG_LOOKASIDE, SQLITE_DBCONFIG_MAINDBNAME, SQLITE_OK,
    flag_to_int,
};

use crate::sqlite_abi::{
    LogCallback, sqlite_db_option_constcharp, sqlite_db_option_int_intp,
    sqlite_db_option_voidp_int_int, sqlite_option_context_context_int_string_fnpointer_int64,
    sqlite_option_no_param, sqlite_option_one_int, sqlite_option_two_int64,
};

/// A non-zero engine status code, with the engine's own description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sqlite status {code}: {message}")]
pub struct SqliteError {
    pub code: i32,
    pub message: String,
}

fn error_from_code(code: c_int) -> SqliteError {
    let message = unsafe { CStr::from_ptr(ffi::sqlite3_errstr(code)) }
        .to_string_lossy()
        .into_owned();
    SqliteError { code, message }
}

fn check(code: c_int) -> Result<(), SqliteError> {
    if code == SQLITE_OK {
        Ok(())
    } else {
        Err(error_from_code(code))
    }
}

/// Applies a process-wide engine option.
///
/// The engine only accepts these before initialization (or after shutdown);
/// out of that window it reports misuse, which surfaces here unchanged.
///
/// # Errors
///
/// The engine's status code, undisturbed, wrapped in [`SqliteError`].
pub fn configure(option: &ProcessOption) -> Result<(), SqliteError> {
    let rc = unsafe {
        match *option {
            ProcessOption::Singlethread => sqlite_option_no_param(SQLITE_CONFIG_SINGLETHREAD),
            ProcessOption::Multithread => sqlite_option_no_param(SQLITE_CONFIG_MULTITHREAD),
            ProcessOption::Serialized => sqlite_option_no_param(SQLITE_CONFIG_SERIALIZED),
            ProcessOption::MemStatus(on) => {
                sqlite_option_one_int(SQLITE_CONFIG_MEMSTATUS, c_int::from(on))
            }
            ProcessOption::Uri(on) => sqlite_option_one_int(SQLITE_CONFIG_URI, c_int::from(on)),
            ProcessOption::MmapSize { default, max } => {
                sqlite_option_two_int64(SQLITE_CONFIG_MMAP_SIZE, default, max)
            }
            ProcessOption::MinimumPmaSize(sz) => {
                sqlite_option_one_int(SQLITE_CONFIG_PMASZ, sz as c_int)
            }
            ProcessOption::StatementJournalSpill(bytes) => {
                sqlite_option_one_int(SQLITE_CONFIG_STMTJRNL_SPILL, bytes)
            }
        }
    };
    check(rc)
}

/// Installs (or, with `None`, clears) the engine's diagnostic log hook.
///
/// # Safety
///
/// `context` must stay valid for as long as the hook is installed, and the
/// callback must tolerate being invoked from any thread the engine uses.
///
/// # Errors
///
/// The engine's status code, undisturbed.
pub unsafe fn configure_log_hook(
    hook: Option<LogCallback>,
    context: *mut c_void,
) -> Result<(), SqliteError> {
    let rc = unsafe {
        sqlite_option_context_context_int_string_fnpointer_int64(SQLITE_CONFIG_LOG, context, hook)
    };
    check(rc)
}

/// A database connection handle with per-connection configuration.
///
/// Either owns a freshly opened handle or borrows one owned elsewhere
/// (via [`Connection::from_handle`]).
pub struct Connection {
    db: *mut ffi::sqlite3,
    // The engine borrows the renamed main-db string until it is replaced or
    // the connection closes, so the buffer lives here.
    main_db_name: Mutex<Option<CString>>,
    owned: bool,
}

// The handle is only touched through &self calls that the engine serializes
// internally in its default threading mode.
unsafe impl Send for Connection {}
unsafe impl Sync for Connection {}

impl Connection {
    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// The engine's open failure, undisturbed.
    pub fn open_in_memory() -> Result<Self, SqliteError> {
        let mut db: *mut ffi::sqlite3 = ptr::null_mut();
        let rc = unsafe {
            ffi::sqlite3_open_v2(
                c":memory:".as_ptr(),
                &mut db,
                ffi::SQLITE_OPEN_READWRITE | ffi::SQLITE_OPEN_CREATE,
                ptr::null(),
            )
        };
        if rc != SQLITE_OK {
            // Even on failure the engine may hand back a handle to close.
            if !db.is_null() {
                unsafe { ffi::sqlite3_close(db) };
            }
            return Err(error_from_code(rc));
        }
        Ok(Self {
            db,
            main_db_name: Mutex::new(None),
            owned: true,
        })
    }

    /// Wraps a handle owned by the application layer.
    ///
    /// # Safety
    ///
    /// `db` must be a live connection handle that outlives this wrapper.
    #[must_use]
    pub unsafe fn from_handle(db: *mut ffi::sqlite3) -> Self {
        Self {
            db,
            main_db_name: Mutex::new(None),
            owned: false,
        }
    }

    /// Raw handle for interop with the application layer.
    #[must_use]
    pub fn handle(&self) -> *mut ffi::sqlite3 {
        self.db
    }

    /// Applies a per-connection option.
    ///
    /// Boolean verbs report the resulting state (`Some`); the rename and
    /// lookaside verbs have no state to report (`None`).
    ///
    /// # Errors
    ///
    /// The engine's status code, undisturbed.
    pub fn apply(&self, option: &ConnectionOption) -> Result<Option<bool>, SqliteError> {
        match option {
            ConnectionOption::MainDbName(name) => {
                let mut guard = self.main_db_name.lock();
                // Store first: the pointer handed to the engine must be the
                // one that stays alive.
                *guard = name.clone();
                let ptr = guard.as_ref().map_or(ptr::null(), |n| n.as_ptr());
                let rc = unsafe {
                    sqlite_db_option_constcharp(self.db, SQLITE_DBCONFIG_MAINDBNAME, ptr)
                };
                check(rc)?;
                Ok(None)
            }
            ConnectionOption::Lookaside { slot_size, slots } => {
                let rc = unsafe {
                    sqlite_db_option_voidp_int_int(
                        self.db,
                        SQLITE_DBCONFIG_LOOKASIDE,
                        ptr::null_mut(),
                        *slot_size,
                        *slots,
                    )
                };
                check(rc)?;
                Ok(None)
            }
            ConnectionOption::Flag { flag, enable } => {
                let mut state: c_int = 0;
                let rc = unsafe {
                    sqlite_db_option_int_intp(
                        self.db,
                        flag.verb(),
                        flag_to_int(*enable),
                        &mut state,
                    )
                };
                check(rc)?;
                Ok(Some(state != 0))
            }
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        if self.owned && !self.db.is_null() {
            unsafe { ffi::sqlite3_close(self.db) };
        }
    }
}
