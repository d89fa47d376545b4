//! Configuration option codes and argument shapes for the embedded database
//! engine.
//!
//! The engine exposes two variadic configuration entry points: a process-wide
//! one and a per-connection one. The number and types of trailing arguments
//! depend on the integer option code, so a foreign-function caller needs one
//! fixed-arity adapter per argument shape actually used. This module owns the
//! codes, the shape classification, and the tagged-union option types the
//! safe API dispatches through; the adapters themselves live in
//! `bridgekit-abi`.
//!
//! Option codes are stable integers from the engine's public header, defined
//! locally so this crate stays free of the FFI dependency.

use std::ffi::CString;

// -------------------------------------------------------------------------
// Engine status codes
// -------------------------------------------------------------------------

pub const SQLITE_OK: i32 = 0;
pub const SQLITE_ERROR: i32 = 1;
pub const SQLITE_BUSY: i32 = 5;
pub const SQLITE_LOCKED: i32 = 6;
pub const SQLITE_MISUSE: i32 = 21;

// -------------------------------------------------------------------------
// Process-wide configuration option codes (sqlite3_config)
// -------------------------------------------------------------------------

pub const SQLITE_CONFIG_SINGLETHREAD: i32 = 1;
pub const SQLITE_CONFIG_MULTITHREAD: i32 = 2;
pub const SQLITE_CONFIG_SERIALIZED: i32 = 3;
pub const SQLITE_CONFIG_MEMSTATUS: i32 = 9;
pub const SQLITE_CONFIG_LOG: i32 = 16;
pub const SQLITE_CONFIG_URI: i32 = 17;
pub const SQLITE_CONFIG_MMAP_SIZE: i32 = 22;
pub const SQLITE_CONFIG_PMASZ: i32 = 25;
pub const SQLITE_CONFIG_STMTJRNL_SPILL: i32 = 26;

// -------------------------------------------------------------------------
// Per-connection configuration option codes (sqlite3_db_config)
// -------------------------------------------------------------------------

pub const SQLITE_DBCONFIG_MAINDBNAME: i32 = 1000;
pub const SQLITE_DBCONFIG_LOOKASIDE: i32 = 1001;
pub const SQLITE_DBCONFIG_ENABLE_FKEY: i32 = 1002;
pub const SQLITE_DBCONFIG_ENABLE_TRIGGER: i32 = 1003;
pub const SQLITE_DBCONFIG_ENABLE_FTS3_TOKENIZER: i32 = 1004;
pub const SQLITE_DBCONFIG_ENABLE_LOAD_EXTENSION: i32 = 1005;
pub const SQLITE_DBCONFIG_NO_CKPT_ON_CLOSE: i32 = 1006;
pub const SQLITE_DBCONFIG_ENABLE_QPSG: i32 = 1007;
pub const SQLITE_DBCONFIG_TRIGGER_EQP: i32 = 1008;
pub const SQLITE_DBCONFIG_RESET_DATABASE: i32 = 1009;
pub const SQLITE_DBCONFIG_DEFENSIVE: i32 = 1010;
pub const SQLITE_DBCONFIG_WRITABLE_SCHEMA: i32 = 1011;
pub const SQLITE_DBCONFIG_LEGACY_ALTER_TABLE: i32 = 1012;
pub const SQLITE_DBCONFIG_DQS_DML: i32 = 1013;
pub const SQLITE_DBCONFIG_DQS_DDL: i32 = 1014;
pub const SQLITE_DBCONFIG_ENABLE_VIEW: i32 = 1015;
pub const SQLITE_DBCONFIG_TRUSTED_SCHEMA: i32 = 1017;

/// Type tag the engine expects when binding an FTS5 extension API pointer.
pub const FTS5_API_POINTER_TYPE: &std::ffi::CStr = c"fts5_api_ptr";

// -------------------------------------------------------------------------
// Argument shapes
// -------------------------------------------------------------------------

/// Trailing-argument shape of a process-wide configuration call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigShape {
    /// No trailing arguments.
    NoParam,
    /// One `int`.
    OneInt,
    /// Two 64-bit integers.
    TwoInt64,
    /// A callback function pointer plus a context pointer (the engine's
    /// diagnostic log hook).
    LogHook,
}

impl ConfigShape {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ConfigShape::NoParam => "no_param",
            ConfigShape::OneInt => "one_int",
            ConfigShape::TwoInt64 => "two_int64",
            ConfigShape::LogHook => "log_hook",
        }
    }
}

/// Trailing-argument shape of a per-connection configuration call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbConfigShape {
    /// One `const char*`.
    ConstCharP,
    /// A pointer plus two `int`s.
    PtrIntInt,
    /// An `int` plus an `int*` out-parameter reporting the resulting state.
    IntIntOut,
}

impl DbConfigShape {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            DbConfigShape::ConstCharP => "constcharp",
            DbConfigShape::PtrIntInt => "voidp_int_int",
            DbConfigShape::IntIntOut => "int_intp",
        }
    }
}

/// Classifies a process-wide option code by the shape the caller drives it
/// with. Returns `None` for codes outside the supported surface.
#[must_use]
pub fn shape_for_config(verb: i32) -> Option<ConfigShape> {
    match verb {
        SQLITE_CONFIG_SINGLETHREAD | SQLITE_CONFIG_MULTITHREAD | SQLITE_CONFIG_SERIALIZED => {
            Some(ConfigShape::NoParam)
        }
        SQLITE_CONFIG_MEMSTATUS
        | SQLITE_CONFIG_URI
        | SQLITE_CONFIG_PMASZ
        | SQLITE_CONFIG_STMTJRNL_SPILL => Some(ConfigShape::OneInt),
        SQLITE_CONFIG_MMAP_SIZE => Some(ConfigShape::TwoInt64),
        SQLITE_CONFIG_LOG => Some(ConfigShape::LogHook),
        _ => None,
    }
}

/// Classifies a per-connection option code by shape.
#[must_use]
pub fn shape_for_db_config(verb: i32) -> Option<DbConfigShape> {
    match verb {
        SQLITE_DBCONFIG_MAINDBNAME => Some(DbConfigShape::ConstCharP),
        SQLITE_DBCONFIG_LOOKASIDE => Some(DbConfigShape::PtrIntInt),
        SQLITE_DBCONFIG_ENABLE_FKEY..=SQLITE_DBCONFIG_ENABLE_VIEW
        | SQLITE_DBCONFIG_TRUSTED_SCHEMA => Some(DbConfigShape::IntIntOut),
        _ => None,
    }
}

// -------------------------------------------------------------------------
// Process-wide options
// -------------------------------------------------------------------------

/// Process-wide engine options, one case per (verb, shape) pair the
/// application drives. The log hook is separate because it carries a
/// function pointer and lives at the FFI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOption {
    Singlethread,
    Multithread,
    Serialized,
    MemStatus(bool),
    Uri(bool),
    MmapSize { default: i64, max: i64 },
    MinimumPmaSize(u32),
    StatementJournalSpill(i32),
}

impl ProcessOption {
    /// Engine option code this case forwards to.
    #[must_use]
    pub fn verb(&self) -> i32 {
        match self {
            ProcessOption::Singlethread => SQLITE_CONFIG_SINGLETHREAD,
            ProcessOption::Multithread => SQLITE_CONFIG_MULTITHREAD,
            ProcessOption::Serialized => SQLITE_CONFIG_SERIALIZED,
            ProcessOption::MemStatus(_) => SQLITE_CONFIG_MEMSTATUS,
            ProcessOption::Uri(_) => SQLITE_CONFIG_URI,
            ProcessOption::MmapSize { .. } => SQLITE_CONFIG_MMAP_SIZE,
            ProcessOption::MinimumPmaSize(_) => SQLITE_CONFIG_PMASZ,
            ProcessOption::StatementJournalSpill(_) => SQLITE_CONFIG_STMTJRNL_SPILL,
        }
    }

    /// Adapter shape this case requires. Matched directly so a new variant
    /// forces a decision here rather than inheriting a fallback.
    #[must_use]
    pub fn shape(&self) -> ConfigShape {
        match self {
            ProcessOption::Singlethread
            | ProcessOption::Multithread
            | ProcessOption::Serialized => ConfigShape::NoParam,
            ProcessOption::MemStatus(_)
            | ProcessOption::Uri(_)
            | ProcessOption::MinimumPmaSize(_)
            | ProcessOption::StatementJournalSpill(_) => ConfigShape::OneInt,
            ProcessOption::MmapSize { .. } => ConfigShape::TwoInt64,
        }
    }
}

// -------------------------------------------------------------------------
// Per-connection options
// -------------------------------------------------------------------------

/// Boolean per-connection verbs driven through the int/int-out shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionFlag {
    ForeignKeys,
    Triggers,
    Fts3Tokenizer,
    LoadExtension,
    NoCheckpointOnClose,
    QueryPlannerStabilityGuarantee,
    TriggerExplainQueryPlan,
    ResetDatabase,
    Defensive,
    WritableSchema,
    LegacyAlterTable,
    DqsDml,
    DqsDdl,
    Views,
    TrustedSchema,
}

impl ConnectionFlag {
    #[must_use]
    pub fn verb(&self) -> i32 {
        match self {
            ConnectionFlag::ForeignKeys => SQLITE_DBCONFIG_ENABLE_FKEY,
            ConnectionFlag::Triggers => SQLITE_DBCONFIG_ENABLE_TRIGGER,
            ConnectionFlag::Fts3Tokenizer => SQLITE_DBCONFIG_ENABLE_FTS3_TOKENIZER,
            ConnectionFlag::LoadExtension => SQLITE_DBCONFIG_ENABLE_LOAD_EXTENSION,
            ConnectionFlag::NoCheckpointOnClose => SQLITE_DBCONFIG_NO_CKPT_ON_CLOSE,
            ConnectionFlag::QueryPlannerStabilityGuarantee => SQLITE_DBCONFIG_ENABLE_QPSG,
            ConnectionFlag::TriggerExplainQueryPlan => SQLITE_DBCONFIG_TRIGGER_EQP,
            ConnectionFlag::ResetDatabase => SQLITE_DBCONFIG_RESET_DATABASE,
            ConnectionFlag::Defensive => SQLITE_DBCONFIG_DEFENSIVE,
            ConnectionFlag::WritableSchema => SQLITE_DBCONFIG_WRITABLE_SCHEMA,
            ConnectionFlag::LegacyAlterTable => SQLITE_DBCONFIG_LEGACY_ALTER_TABLE,
            ConnectionFlag::DqsDml => SQLITE_DBCONFIG_DQS_DML,
            ConnectionFlag::DqsDdl => SQLITE_DBCONFIG_DQS_DDL,
            ConnectionFlag::Views => SQLITE_DBCONFIG_ENABLE_VIEW,
            ConnectionFlag::TrustedSchema => SQLITE_DBCONFIG_TRUSTED_SCHEMA,
        }
    }
}

/// Per-connection engine options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionOption {
    /// Rename the main database. `None` restores the default name. The
    /// engine borrows the name for the life of the connection, so the safe
    /// wrapper must keep the buffer alive.
    MainDbName(Option<CString>),
    /// Lookaside memory configuration. The safe wrapper passes a null
    /// buffer, letting the engine allocate from the heap.
    Lookaside { slot_size: i32, slots: i32 },
    /// A boolean verb: `Some(true)`/`Some(false)` set, `None` queries.
    /// The engine reports the resulting state through the out-parameter.
    Flag {
        flag: ConnectionFlag,
        enable: Option<bool>,
    },
}

impl ConnectionOption {
    #[must_use]
    pub fn verb(&self) -> i32 {
        match self {
            ConnectionOption::MainDbName(_) => SQLITE_DBCONFIG_MAINDBNAME,
            ConnectionOption::Lookaside { .. } => SQLITE_DBCONFIG_LOOKASIDE,
            ConnectionOption::Flag { flag, .. } => flag.verb(),
        }
    }

    #[must_use]
    pub fn shape(&self) -> DbConfigShape {
        match self {
            ConnectionOption::MainDbName(_) => DbConfigShape::ConstCharP,
            ConnectionOption::Lookaside { .. } => DbConfigShape::PtrIntInt,
            ConnectionOption::Flag { .. } => DbConfigShape::IntIntOut,
        }
    }
}

/// Encodes a set/query flag the way the engine expects: 1 enable, 0 disable,
/// -1 query without changing.
#[must_use]
pub fn flag_to_int(enable: Option<bool>) -> i32 {
    match enable {
        Some(true) => 1,
        Some(false) => 0,
        None => -1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_option_verbs() {
        assert_eq!(ProcessOption::Singlethread.verb(), 1);
        assert_eq!(ProcessOption::Multithread.verb(), 2);
        assert_eq!(ProcessOption::Serialized.verb(), 3);
        assert_eq!(ProcessOption::MemStatus(true).verb(), 9);
        assert_eq!(ProcessOption::Uri(false).verb(), 17);
        assert_eq!(ProcessOption::MmapSize { default: 0, max: 0 }.verb(), 22);
        assert_eq!(ProcessOption::MinimumPmaSize(512).verb(), 25);
        assert_eq!(ProcessOption::StatementJournalSpill(-1).verb(), 26);
    }

    #[test]
    fn process_option_shapes() {
        assert_eq!(ProcessOption::Serialized.shape(), ConfigShape::NoParam);
        assert_eq!(ProcessOption::MemStatus(true).shape(), ConfigShape::OneInt);
        assert_eq!(
            ProcessOption::MmapSize { default: 0, max: 0 }.shape(),
            ConfigShape::TwoInt64
        );
        assert_eq!(shape_for_config(SQLITE_CONFIG_LOG), Some(ConfigShape::LogHook));
    }

    #[test]
    fn option_shapes_agree_with_verb_classifier() {
        let process = [
            ProcessOption::Singlethread,
            ProcessOption::Multithread,
            ProcessOption::Serialized,
            ProcessOption::MemStatus(true),
            ProcessOption::Uri(true),
            ProcessOption::MmapSize { default: 0, max: 0 },
            ProcessOption::MinimumPmaSize(512),
            ProcessOption::StatementJournalSpill(-1),
        ];
        for opt in process {
            assert_eq!(shape_for_config(opt.verb()), Some(opt.shape()), "{opt:?}");
        }

        let connection = [
            ConnectionOption::MainDbName(None),
            ConnectionOption::Lookaside {
                slot_size: 0,
                slots: 0,
            },
            ConnectionOption::Flag {
                flag: ConnectionFlag::ForeignKeys,
                enable: None,
            },
        ];
        for opt in connection {
            assert_eq!(
                shape_for_db_config(opt.verb()),
                Some(opt.shape()),
                "{opt:?}"
            );
        }
    }

    #[test]
    fn unsupported_config_verb_has_no_shape() {
        assert_eq!(shape_for_config(0), None);
        assert_eq!(shape_for_config(4), None); // MALLOC: struct-pointer shape
        assert_eq!(shape_for_config(9999), None);
    }

    #[test]
    fn db_config_shapes() {
        assert_eq!(
            shape_for_db_config(SQLITE_DBCONFIG_MAINDBNAME),
            Some(DbConfigShape::ConstCharP)
        );
        assert_eq!(
            shape_for_db_config(SQLITE_DBCONFIG_LOOKASIDE),
            Some(DbConfigShape::PtrIntInt)
        );
        assert_eq!(
            shape_for_db_config(SQLITE_DBCONFIG_ENABLE_FKEY),
            Some(DbConfigShape::IntIntOut)
        );
        assert_eq!(
            shape_for_db_config(SQLITE_DBCONFIG_TRUSTED_SCHEMA),
            Some(DbConfigShape::IntIntOut)
        );
        assert_eq!(shape_for_db_config(999), None);
        assert_eq!(shape_for_db_config(1016), None); // legacy file format: not driven
    }

    #[test]
    fn connection_flag_verbs_are_distinct() {
        let flags = [
            ConnectionFlag::ForeignKeys,
            ConnectionFlag::Triggers,
            ConnectionFlag::Fts3Tokenizer,
            ConnectionFlag::LoadExtension,
            ConnectionFlag::NoCheckpointOnClose,
            ConnectionFlag::QueryPlannerStabilityGuarantee,
            ConnectionFlag::TriggerExplainQueryPlan,
            ConnectionFlag::ResetDatabase,
            ConnectionFlag::Defensive,
            ConnectionFlag::WritableSchema,
            ConnectionFlag::LegacyAlterTable,
            ConnectionFlag::DqsDml,
            ConnectionFlag::DqsDdl,
            ConnectionFlag::Views,
            ConnectionFlag::TrustedSchema,
        ];
        let mut verbs: Vec<i32> = flags.iter().map(ConnectionFlag::verb).collect();
        verbs.sort_unstable();
        verbs.dedup();
        assert_eq!(verbs.len(), flags.len());
        for verb in verbs {
            assert_eq!(shape_for_db_config(verb), Some(DbConfigShape::IntIntOut));
        }
    }

    #[test]
    fn flag_encoding() {
        assert_eq!(flag_to_int(Some(true)), 1);
        assert_eq!(flag_to_int(Some(false)), 0);
        assert_eq!(flag_to_int(None), -1);
    }

    #[test]
    fn fts5_tag_is_nul_terminated_literal() {
        assert_eq!(FTS5_API_POINTER_TYPE.to_bytes(), b"fts5_api_ptr");
    }
}
