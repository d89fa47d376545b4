//! Per-connection configuration shims against live in-memory databases.
//!
//! Each test opens its own connection, so tests stay independent under the
//! default parallel runner. Shim calls are checked for exact status-code
//! equality with the direct variadic call, and the out-parameter contract of
//! the int/int-out shape is exercised end to end.

use std::ffi::{CString, c_int};
use std::ptr;

use libsqlite3_sys as ffi;

use bridgekit_abi::config::Connection;
use bridgekit_abi::sqlite_abi::{
    sqlite_db_option_constcharp, sqlite_db_option_int_intp, sqlite_db_option_voidp_int_int,
};
use bridgekit_core::dbconfig::{
    ConnectionFlag, ConnectionOption, SQLITE_DBCONFIG_ENABLE_FKEY, SQLITE_DBCONFIG_ENABLE_TRIGGER,
    SQLITE_DBCONFIG_LOOKASIDE, SQLITE_DBCONFIG_MAINDBNAME, SQLITE_OK,
};

#[test]
fn int_intp_sets_and_reports_state() {
    let conn = Connection::open_in_memory().unwrap();
    let db = conn.handle();

    let mut state: c_int = -2;
    let rc = unsafe { sqlite_db_option_int_intp(db, SQLITE_DBCONFIG_ENABLE_FKEY, 1, &mut state) };
    assert_eq!(rc, SQLITE_OK);
    assert_eq!(state, 1);

    // Query without changing (-1): the engine reports the value just set,
    // through the shim and through the direct call identically.
    let mut via_shim: c_int = -2;
    let rc_shim =
        unsafe { sqlite_db_option_int_intp(db, SQLITE_DBCONFIG_ENABLE_FKEY, -1, &mut via_shim) };
    let mut via_direct: c_int = -2;
    let rc_direct =
        unsafe { ffi::sqlite3_db_config(db, SQLITE_DBCONFIG_ENABLE_FKEY, -1, &raw mut via_direct) };
    assert_eq!(rc_shim, rc_direct);
    assert_eq!(rc_shim, SQLITE_OK);
    assert_eq!(via_shim, via_direct);
    assert_eq!(via_shim, 1);

    // Disable and confirm the report follows.
    let mut state: c_int = -2;
    let rc = unsafe { sqlite_db_option_int_intp(db, SQLITE_DBCONFIG_ENABLE_FKEY, 0, &mut state) };
    assert_eq!(rc, SQLITE_OK);
    assert_eq!(state, 0);
}

#[test]
fn voidp_int_int_matches_direct_call() {
    let conn = Connection::open_in_memory().unwrap();
    let db = conn.handle();

    // Null buffer, zero sizing: disables lookaside, a valid configuration.
    let rc_shim = unsafe {
        sqlite_db_option_voidp_int_int(db, SQLITE_DBCONFIG_LOOKASIDE, ptr::null_mut(), 0, 0)
    };
    let rc_direct = unsafe {
        ffi::sqlite3_db_config(
            db,
            SQLITE_DBCONFIG_LOOKASIDE,
            ptr::null_mut::<std::ffi::c_void>(),
            0,
            0,
        )
    };
    assert_eq!(rc_shim, rc_direct);
    assert_eq!(rc_shim, SQLITE_OK);
}

#[test]
fn constcharp_renames_main_database() {
    let conn = Connection::open_in_memory().unwrap();
    let db = conn.handle();

    // The engine borrows the name, so the buffer outlives the connection use.
    let name = CString::new("primary").unwrap();
    let rc = unsafe { sqlite_db_option_constcharp(db, SQLITE_DBCONFIG_MAINDBNAME, name.as_ptr()) };
    assert_eq!(rc, SQLITE_OK);

    // The connection still answers configuration queries after the rename.
    let mut state: c_int = -2;
    let rc =
        unsafe { sqlite_db_option_int_intp(db, SQLITE_DBCONFIG_ENABLE_TRIGGER, -1, &mut state) };
    assert_eq!(rc, SQLITE_OK);
    drop(name);
}

#[test]
fn unknown_verb_failure_is_passed_through() {
    let conn = Connection::open_in_memory().unwrap();
    let db = conn.handle();

    let mut state: c_int = 0;
    let rc_shim = unsafe { sqlite_db_option_int_intp(db, 9999, -1, &mut state) };
    let rc_direct = unsafe { ffi::sqlite3_db_config(db, 9999, -1, &raw mut state) };
    assert_eq!(rc_shim, rc_direct);
    assert_ne!(rc_shim, SQLITE_OK);
}

#[test]
fn safe_connection_api_dispatches_the_same_shims() {
    let conn = Connection::open_in_memory().unwrap();

    let on = conn
        .apply(&ConnectionOption::Flag {
            flag: ConnectionFlag::ForeignKeys,
            enable: Some(true),
        })
        .unwrap();
    assert_eq!(on, Some(true));

    let queried = conn
        .apply(&ConnectionOption::Flag {
            flag: ConnectionFlag::ForeignKeys,
            enable: None,
        })
        .unwrap();
    assert_eq!(queried, Some(true));

    let off = conn
        .apply(&ConnectionOption::Flag {
            flag: ConnectionFlag::Defensive,
            enable: Some(false),
        })
        .unwrap();
    assert_eq!(off, Some(false));

    assert_eq!(
        conn.apply(&ConnectionOption::Lookaside {
            slot_size: 0,
            slots: 0,
        })
        .unwrap(),
        None
    );

    let name = CString::new("renamed").unwrap();
    assert_eq!(
        conn.apply(&ConnectionOption::MainDbName(Some(name))).unwrap(),
        None
    );
    // The stored buffer keeps the engine's borrow valid; a later option on
    // the renamed connection still works.
    let still_on = conn
        .apply(&ConnectionOption::Flag {
            flag: ConnectionFlag::ForeignKeys,
            enable: None,
        })
        .unwrap();
    assert_eq!(still_on, Some(true));
}

#[test]
fn borrowed_handle_wrapper_does_not_close() {
    let conn = Connection::open_in_memory().unwrap();
    {
        let borrowed = unsafe { Connection::from_handle(conn.handle()) };
        let state = borrowed
            .apply(&ConnectionOption::Flag {
                flag: ConnectionFlag::Triggers,
                enable: Some(true),
            })
            .unwrap();
        assert_eq!(state, Some(true));
    }
    // The owning connection is still live after the borrow drops.
    let state = conn
        .apply(&ConnectionOption::Flag {
            flag: ConnectionFlag::Triggers,
            enable: None,
        })
        .unwrap();
    assert_eq!(state, Some(true));
}
