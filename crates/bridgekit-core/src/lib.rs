//! # bridgekit-core
//!
//! Safe, pure-logic models for the bridgekit native shims.
//!
//! This crate holds everything that does not need `unsafe`: the embedded
//! database engine's configuration option codes and their argument-shape
//! classification, the build-identification constants, and the frame-recovery
//! registry that stands in for the framework-extension accessors. The actual
//! foreign calls live in `bridgekit-abi`.

#![deny(unsafe_code)]

pub mod dbconfig;
pub mod sysinfo;
pub mod webframe;
