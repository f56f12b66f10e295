//! hidapi backend for wired Xbox-class controllers.
//!
//! Enumeration is filtered to known vendor/product pairs; state comes from
//! the wired controller's 20-byte input report, whose button bits happen to
//! share the contract's mask values (the masks were chosen to match the
//! wire format). Rumble goes out as the fixed 8-byte output report.
//!
//! Wireless adapters and non-Xbox HID gamepads are out of scope here; on
//! Windows the passthrough backend covers everything the system driver
//! does.

use hidapi::{DeviceInfo, HidApi, HidDevice};
use log::{debug, warn};

use crate::backends::SlotBackend;
use crate::consts::{battery, button};
use crate::error::Result;
use crate::identity::PadIdentity;
use crate::layout::{BatteryInfo, Capabilities, Gamepad, Vibration};

/// Known wired Xbox-class (vendor, product) pairs.
const KNOWN_PADS: &[(u16, u16)] = &[
    (0x045E, 0x028E), // Xbox 360 wired
    (0x045E, 0x028F), // Xbox 360 wired (rev)
    (0x045E, 0x02D1), // Xbox One
    (0x045E, 0x02DD), // Xbox One (2015 firmware)
];

/// Parse one wired-controller input report into a snapshot.
///
/// Report shape: `[type, len, buttons_lo, buttons_hi, lt, rt,
/// lx_lo, lx_hi, ly_lo, ly_hi, rx_lo, rx_hi, ry_lo, ry_hi, ...]`
/// with type `0x00` and a declared length of at least 14 bytes.
/// Anything else returns `None`.
pub fn parse_report(raw: &[u8]) -> Option<Gamepad> {
    if raw.len() < 14 || raw[0] != 0x00 || raw[1] < 14 {
        return None;
    }
    Some(Gamepad {
        // The guide bit (0x0400) is reserved in the contract's mask and
        // drops out here along with anything else undefined.
        buttons: u16::from_le_bytes([raw[2], raw[3]]) & button::MASK_ALL,
        left_trigger: raw[4],
        right_trigger: raw[5],
        thumb_lx: i16::from_le_bytes([raw[6], raw[7]]),
        thumb_ly: i16::from_le_bytes([raw[8], raw[9]]),
        thumb_rx: i16::from_le_bytes([raw[10], raw[11]]),
        thumb_ry: i16::from_le_bytes([raw[12], raw[13]]),
    })
}

/// Build the fixed rumble output report from a motor command.
///
/// The wire format carries one byte per motor; the 16-bit command keeps
/// its high byte, matching how the original driver scales.
pub fn rumble_report(vibration: Vibration) -> [u8; 8] {
    [
        0x00,
        0x08,
        0x00,
        (vibration.left_motor >> 8) as u8,
        (vibration.right_motor >> 8) as u8,
        0x00,
        0x00,
        0x00,
    ]
}

pub struct HidPad {
    raw: HidDevice,
    identity: PadIdentity,
    last: Gamepad,
    alive: bool,
}

impl HidPad {
    pub fn new(info: &DeviceInfo, api: &HidApi) -> Option<Self> {
        let raw = match info.open_device(api) {
            Ok(device) => device,
            Err(e) => {
                debug!(
                    "skipping {:04x}:{:04x}: {e}",
                    info.vendor_id(),
                    info.product_id()
                );
                return None;
            }
        };

        let identity = PadIdentity {
            bus: Some("hid".to_string()),
            vid: Some(info.vendor_id()),
            pid: Some(info.product_id()),
            product: Some(info.product_string().unwrap_or("Unknown").to_string()),
            serial: info.serial_number().map(str::to_string),
            path: info.path().to_str().ok().map(str::to_string),
        };

        Some(Self {
            raw,
            identity,
            last: Gamepad::default(),
            alive: true,
        })
    }
}

impl SlotBackend for HidPad {
    fn identity(&self) -> PadIdentity {
        self.identity.clone()
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::standard_gamepad()
    }

    fn read(&mut self) -> Option<Gamepad> {
        if !self.alive {
            return None;
        }

        let mut buf = [0u8; 32];
        loop {
            match self.raw.read_timeout(&mut buf, 0) {
                // Drain everything pending; the last full report wins.
                Ok(n) if n > 0 => {
                    if let Some(pad) = parse_report(&buf[..n]) {
                        self.last = pad;
                    }
                }
                Ok(_) => return Some(self.last),
                Err(e) => {
                    warn!("{} read error: {e}", self.identity.label());
                    self.alive = false;
                    return None;
                }
            }
        }
    }

    fn rumble(&mut self, vibration: Vibration) -> bool {
        if !self.alive {
            return false;
        }
        match self.raw.write(&rumble_report(vibration)) {
            Ok(_) => true,
            Err(e) => {
                warn!("{} rumble error: {e}", self.identity.label());
                self.alive = false;
                false
            }
        }
    }

    fn battery(&self, dev_type: u8) -> BatteryInfo {
        if !self.alive || dev_type == battery::DEVTYPE_HEADSET {
            return BatteryInfo::DISCONNECTED;
        }
        // Wired pads report a mains-powered source; level is nominal.
        BatteryInfo {
            battery_type: battery::TYPE_WIRED,
            battery_level: battery::LEVEL_FULL,
        }
    }
}

/// Enumerate known Xbox-class pads on the HID bus.
pub fn probe_slots(api: &HidApi) -> Result<Vec<Box<dyn SlotBackend>>> {
    let mut found: Vec<Box<dyn SlotBackend>> = Vec::new();
    for info in api.device_list() {
        if !KNOWN_PADS.contains(&(info.vendor_id(), info.product_id())) {
            continue;
        }
        if let Some(pad) = HidPad::new(info, api) {
            debug!("hid pad: {}", pad.identity.label());
            found.push(Box::new(pad));
        }
    }
    Ok(found)
}
