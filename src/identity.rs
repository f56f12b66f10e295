//! Per-slot device identity.
//!
//! [`PadIdentity`] is a lightweight, cloneable description of the device
//! behind a slot, suitable for UI display, logging, and persistence.
//! Backends populate what they know; unknown fields remain `None`.
//!
//! # Conventions
//! - `bus` is a short, human-readable hint like `"usb"`, `"hid"`, or
//!   `"xinput"`.
//! - `product` should be a friendly, user-facing name when available.
//! - `path` is an OS/topology path (opaque string) useful for diagnostics;
//!   it may change across ports and reconnects, so treat it as diagnostic
//!   first, identity second.
//! - `vid`/`pid` and `serial` (when present) are generally stable and
//!   useful for re-identification.

use serde::{Deserialize, Serialize};

/// Snapshot of identity metadata for the device behind one slot.
///
/// All fields are optional; populate what is known on the current platform.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PadIdentity {
    /// High-level bus classification (e.g., `"usb"`, `"hid"`, `"xinput"`).
    pub bus: Option<String>,

    /// USB Vendor ID (VID), if known.
    pub vid: Option<u16>,

    /// USB Product ID (PID), if known.
    pub pid: Option<u16>,

    /// Human-readable product name from the driver/firmware.
    pub product: Option<String>,

    /// Device serial number supplied by firmware/OS, if present.
    pub serial: Option<String>,

    /// OS/topological path to the device; format is platform-specific.
    pub path: Option<String>,
}

impl PadIdentity {
    /// Synthesized identity for a passthrough slot with no richer source.
    ///
    /// Uses the conventional vendor id `0x045e` and a `xinput:{slot}`
    /// pseudo-path, mirroring how slot-based devices without descriptors
    /// are fingerprinted.
    pub fn synthesized(slot: u32) -> Self {
        Self {
            bus: Some("xinput".to_string()),
            vid: Some(0x045E),
            pid: None,
            product: Some(format!("Controller {slot}")),
            serial: None,
            path: Some(format!("xinput:{slot}")),
        }
    }

    /// Compact one-line label for logs: product name, or `vid:pid`,
    /// or the path, in that order of preference.
    pub fn label(&self) -> String {
        if let Some(product) = &self.product {
            return product.clone();
        }
        if let (Some(vid), Some(pid)) = (self.vid, self.pid) {
            return format!("{vid:04x}:{pid:04x}");
        }
        self.path.clone().unwrap_or_else(|| "unknown".to_string())
    }
}

impl std::fmt::Display for PadIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}
