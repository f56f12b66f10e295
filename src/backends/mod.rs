//! Slot backends.
//!
//! A [`SlotBackend`] is the device half of the contract: it answers
//! snapshot reads, actuates motors, and describes itself. The hub layers
//! packet tracking, keystroke synthesis, and the enable latch on top, so
//! backends stay simple.
//!
//! # Feature flags
//! - **`hid`** — enables the cross-platform hidapi backend for wired
//!   Xbox-class controllers (default in this build).
//!
//! The Windows passthrough backend is target-gated rather than
//! feature-gated; on Windows it delegates to the system implementation.
//! The virtual backend is always compiled; profiles and tests depend on it.

use crate::audio::AudioIds;
use crate::identity::PadIdentity;
use crate::layout::{BatteryInfo, Capabilities, Gamepad, Guid, Vibration};

#[cfg(feature = "hid")]
#[cfg_attr(docsrs, doc(cfg(feature = "hid")))]
pub mod hid;

pub mod virtual_pad;

#[cfg(target_os = "windows")]
#[cfg_attr(docsrs, doc(cfg(target_os = "windows")))]
pub mod windows;

/// Device-side implementation behind one slot.
pub trait SlotBackend: Send {
    /// Identity metadata for logging and persistence.
    fn identity(&self) -> PadIdentity;

    /// Capability descriptor. Nested snapshot/vibration fields indicate
    /// which controls and motors exist, not live values.
    fn capabilities(&self) -> Capabilities;

    /// Current input snapshot, or `None` when the device is gone.
    fn read(&mut self) -> Option<Gamepad>;

    /// Drive the haptic motors. Returns `false` when the device is gone.
    fn rumble(&mut self, vibration: Vibration) -> bool;

    /// Battery state for the pad itself or its attached headset,
    /// selected by a `battery::DEVTYPE_*` value.
    fn battery(&self, dev_type: u8) -> BatteryInfo;

    /// Core-audio endpoint identifiers, when the device carries any.
    fn audio_ids(&self) -> Option<AudioIds> {
        None
    }

    /// Legacy audio-subsystem identifiers, when the device carries any.
    fn dsound_guids(&self) -> Option<(Guid, Guid)> {
        None
    }
}

/// Unified discovery across enabled backends.
///
/// On Windows the passthrough slots win (they already carry slot
/// semantics); elsewhere HID hardware is probed when the `hid` feature is
/// enabled. Returned backends are in attach order; the hub binds them to
/// free slots.
pub fn probe_backends() -> Vec<Box<dyn SlotBackend>> {
    let mut out: Vec<Box<dyn SlotBackend>> = Vec::new();

    #[cfg(target_os = "windows")]
    {
        out.extend(windows::probe_slots());
    }

    #[cfg(all(feature = "hid", not(target_os = "windows")))]
    {
        let probe = || -> crate::error::Result<Vec<Box<dyn SlotBackend>>> {
            let api = hidapi::HidApi::new()?;
            hid::probe_slots(&api)
        };
        match probe() {
            Ok(pads) => out.extend(pads),
            Err(e) => log::warn!("hid probe failed: {e}"),
        }
    }

    out
}
