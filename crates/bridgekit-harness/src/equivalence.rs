//! Case execution engine.
//!
//! Every case calls a shim and then the direct underlying call with the same
//! arguments, and records both status codes; equivalence means they are
//! identical, whatever they are. The suite deliberately spans both regimes
//! of the process-wide entry point: before engine initialization (accepted)
//! and after (refused as misuse, except the log hook which the engine keeps
//! accepting). A full suite must therefore run in a fresh
//! process; `run_full_suite` performs the initialization step itself between
//! the two phases.

use std::ffi::{CString, c_char, c_int, c_void};
use std::ptr;

use libsqlite3_sys as ffi;
use serde::{Deserialize, Serialize};

use bridgekit_abi::sqlite_abi::{
    sqlite_db_option_constcharp, sqlite_db_option_int_intp, sqlite_db_option_voidp_int_int,
    sqlite_option_context_context_int_string_fnpointer_int64, sqlite_option_no_param,
    sqlite_option_one_int, sqlite_option_two_int64,
};
use bridgekit_core::dbconfig::{
    SQLITE_CONFIG_LOG, SQLITE_CONFIG_MEMSTATUS, SQLITE_CONFIG_MMAP_SIZE, SQLITE_CONFIG_MULTITHREAD,
    SQLITE_CONFIG_PMASZ, SQLITE_CONFIG_SERIALIZED, SQLITE_CONFIG_STMTJRNL_SPILL, SQLITE_CONFIG_URI,
    SQLITE_DBCONFIG_ENABLE_FKEY, SQLITE_DBCONFIG_ENABLE_TRIGGER, SQLITE_DBCONFIG_LOOKASIDE,
    SQLITE_DBCONFIG_MAINDBNAME, SQLITE_OK, shape_for_config, shape_for_db_config,
};

use crate::HarnessError;

/// Which regime a case ran under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    PreInit,
    PostInit,
    Connection,
}

/// One shim-vs-direct comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseOutcome {
    pub name: String,
    pub shape: String,
    pub verb: i32,
    pub phase: Phase,
    pub shim_code: i32,
    pub direct_code: i32,
    pub matched: bool,
}

impl CaseOutcome {
    fn new(name: &str, shape: &str, verb: i32, phase: Phase, shim: i32, direct: i32) -> Self {
        Self {
            name: name.to_owned(),
            shape: shape.to_owned(),
            verb,
            phase,
            shim_code: shim,
            direct_code: direct,
            matched: shim == direct,
        }
    }
}

/// A completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suite {
    pub cases: Vec<CaseOutcome>,
}

impl Suite {
    #[must_use]
    pub fn mismatches(&self) -> usize {
        self.cases.iter().filter(|c| !c.matched).count()
    }
}

unsafe extern "C" fn noop_log(_ctx: *mut c_void, _code: c_int, _msg: *const c_char) {}

fn config_shape_name(verb: i32) -> &'static str {
    shape_for_config(verb).map_or("unknown", |s| s.name())
}

fn db_shape_name(verb: i32) -> &'static str {
    shape_for_db_config(verb).map_or("unknown", |s| s.name())
}

fn process_cases(phase: Phase, out: &mut Vec<CaseOutcome>) {
    unsafe {
        let verb = SQLITE_CONFIG_MULTITHREAD;
        let shim = sqlite_option_no_param(verb);
        let direct = ffi::sqlite3_config(verb);
        out.push(CaseOutcome::new(
            "threading_mode_multithread",
            config_shape_name(verb),
            verb,
            phase,
            shim,
            direct,
        ));

        for (name, verb, value) in [
            ("memstatus_on", SQLITE_CONFIG_MEMSTATUS, 1),
            ("uri_on", SQLITE_CONFIG_URI, 1),
            ("minimum_pma_size", SQLITE_CONFIG_PMASZ, 16384),
            ("stmt_journal_spill_default", SQLITE_CONFIG_STMTJRNL_SPILL, -1),
        ] {
            let shim = sqlite_option_one_int(verb, value);
            let direct = ffi::sqlite3_config(verb, value);
            out.push(CaseOutcome::new(
                name,
                config_shape_name(verb),
                verb,
                phase,
                shim,
                direct,
            ));
        }

        let verb = SQLITE_CONFIG_MMAP_SIZE;
        let shim = sqlite_option_two_int64(verb, 0, 0);
        let direct = ffi::sqlite3_config(verb, 0_i64, 0_i64);
        out.push(CaseOutcome::new(
            "mmap_size_disabled",
            config_shape_name(verb),
            verb,
            phase,
            shim,
            direct,
        ));

        let verb = SQLITE_CONFIG_LOG;
        let shim = sqlite_option_context_context_int_string_fnpointer_int64(
            verb,
            ptr::null_mut(),
            Some(noop_log),
        );
        let direct = ffi::sqlite3_config(verb, noop_log as *const c_void, ptr::null_mut::<c_void>());
        out.push(CaseOutcome::new(
            "log_hook_install",
            config_shape_name(verb),
            verb,
            phase,
            shim,
            direct,
        ));
        // Leave no hook behind.
        sqlite_option_context_context_int_string_fnpointer_int64(verb, ptr::null_mut(), None);

        // Restore the default threading mode last, so the suite leaves the
        // engine where it found it.
        let verb = SQLITE_CONFIG_SERIALIZED;
        let shim = sqlite_option_no_param(verb);
        let direct = ffi::sqlite3_config(verb);
        out.push(CaseOutcome::new(
            "threading_mode_serialized",
            config_shape_name(verb),
            verb,
            phase,
            shim,
            direct,
        ));
    }
}

fn connection_cases(out: &mut Vec<CaseOutcome>) -> Result<(), HarnessError> {
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
        if !db.is_null() {
            unsafe { ffi::sqlite3_close(db) };
        }
        return Err(HarnessError::ScratchDatabase(rc));
    }

    unsafe {
        for (name, verb, value) in [
            ("enable_foreign_keys", SQLITE_DBCONFIG_ENABLE_FKEY, 1),
            ("query_foreign_keys", SQLITE_DBCONFIG_ENABLE_FKEY, -1),
            ("enable_triggers", SQLITE_DBCONFIG_ENABLE_TRIGGER, 1),
        ] {
            let mut shim_state: c_int = 0;
            let shim = sqlite_db_option_int_intp(db, verb, value, &mut shim_state);
            let mut direct_state: c_int = 0;
            let direct = ffi::sqlite3_db_config(db, verb, value, &raw mut direct_state);
            let mut case = CaseOutcome::new(
                name,
                db_shape_name(verb),
                verb,
                Phase::Connection,
                shim,
                direct,
            );
            case.matched &= shim_state == direct_state;
            out.push(case);
        }

        let verb = SQLITE_DBCONFIG_LOOKASIDE;
        let shim = sqlite_db_option_voidp_int_int(db, verb, ptr::null_mut(), 0, 0);
        let direct =
            ffi::sqlite3_db_config(db, verb, ptr::null_mut::<c_void>(), 0, 0);
        out.push(CaseOutcome::new(
            "lookaside_disabled",
            db_shape_name(verb),
            verb,
            Phase::Connection,
            shim,
            direct,
        ));

        // Rename via the shim; the direct call sets it back. Both buffers
        // stay alive past the calls.
        let verb = SQLITE_DBCONFIG_MAINDBNAME;
        let renamed = CString::new("harness_main").expect("static name");
        let restored = CString::new("main").expect("static name");
        let shim = sqlite_db_option_constcharp(db, verb, renamed.as_ptr());
        let direct = ffi::sqlite3_db_config(db, verb, restored.as_ptr());
        out.push(CaseOutcome::new(
            "main_db_rename",
            db_shape_name(verb),
            verb,
            Phase::Connection,
            shim,
            direct,
        ));

        ffi::sqlite3_close(db);
    }
    Ok(())
}

/// Runs the whole suite: pre-initialization process cases, an explicit
/// engine initialization, the same process cases under refusal (the log
/// hook alone stays accepted after initialization), then the
/// per-connection cases against a scratch in-memory database.
///
/// In a process where the engine was already initialized, the pre-init
/// phase degrades to refusal codes on both sides; equivalence still holds
/// and is still what gets checked.
///
/// # Errors
///
/// Only harness faults (scratch database unavailable); case mismatches are
/// reported, not raised.
pub fn run_full_suite() -> Result<Suite, HarnessError> {
    let mut cases = Vec::new();
    process_cases(Phase::PreInit, &mut cases);
    unsafe {
        ffi::sqlite3_initialize();
    }
    process_cases(Phase::PostInit, &mut cases);
    connection_cases(&mut cases)?;
    Ok(Suite { cases })
}
