// All extern "C" exports accept raw pointers from foreign callers; argument
// validity is the caller's contract, so per-function safety docs would be
// redundant boilerplate.
#![allow(clippy::missing_safety_doc)]
//! # bridgekit-abi
//!
//! `extern "C"` boundary layer for the bridgekit native shims.
//!
//! Each exported function is a fixed-arity adaptation of an underlying OS or
//! database-engine call, for callers that cannot pass variadic arguments
//! across a foreign-function boundary. Shims forward arguments verbatim and
//! pass return codes through unchanged; they never retry, translate, or add
//! failure modes of their own.
//!
//! # Architecture
//!
//! ```text
//! Foreign caller -> ABI entry (this crate) -> OS / engine call -> return
//! ```
//!
//! A thin safe layer ([`config`]) dispatches the tagged option types from
//! `bridgekit-core` onto the same shims for Rust callers.

pub mod config;
pub mod io_abi;
pub mod sqlite_abi;
pub mod sysinfo_abi;
pub mod webframe_abi;

pub use config::{Connection, SqliteError, configure};
