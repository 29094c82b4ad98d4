//! Application core — pure domain logic, zero I/O.
//!
//! Switch events, the link supervisor and the main-loop orchestrator.
//! All interaction with hardware and the network happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
pub mod supervisor;
