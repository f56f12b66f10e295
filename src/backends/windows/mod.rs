#![cfg(target_os = "windows")]

//! Windows passthrough backend.
//!
//! On Windows the system driver stack already implements the slot
//! contract, so the backend simply delegates each operation to it and
//! converts between this crate's layout types and the system's. Hub-level
//! behavior (packet tracking, keystroke synthesis, the enable latch) still
//! applies uniformly on top.

pub mod passthrough;

pub use passthrough::probe_slots;
