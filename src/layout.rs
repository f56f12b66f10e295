//! Fixed-layout records exchanged across the slot API boundary.
//!
//! Every type here is `#[repr(C)]` with explicit fixed-width fields so the
//! in-memory image matches the layout existing binaries and drivers expect.
//! Field order and widths are load-bearing; do not reorder or widen.
//!
//! All records are plain values: the caller allocates, the API fills or
//! reads in place, and nothing outlives the call that produced it.
//!
//! Besides the raw memory image, each record offers little-endian
//! `encode_le`/`decode_le` helpers for byte-exact interchange (IPC, replay
//! capture, golden tests) without unsafe pointer casts.

use crate::consts::{caps, devtype, subtype};

/// 128-bit globally-unique identifier in the platform's mixed-endian layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Guid {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

impl Guid {
    pub const SIZE: usize = 16;

    /// The all-zero identifier, reported when no legacy audio device exists.
    pub const NULL: Guid = Guid {
        data1: 0,
        data2: 0,
        data3: 0,
        data4: [0; 8],
    };

    pub fn encode_le(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..4].copy_from_slice(&self.data1.to_le_bytes());
        out[4..6].copy_from_slice(&self.data2.to_le_bytes());
        out[6..8].copy_from_slice(&self.data3.to_le_bytes());
        out[8..16].copy_from_slice(&self.data4);
        out
    }

    pub fn decode_le(raw: &[u8; Self::SIZE]) -> Self {
        let mut data4 = [0u8; 8];
        data4.copy_from_slice(&raw[8..16]);
        Self {
            data1: u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]),
            data2: u16::from_le_bytes([raw[4], raw[5]]),
            data3: u16::from_le_bytes([raw[6], raw[7]]),
            data4,
        }
    }
}

/// One controller input snapshot.
///
/// `buttons` is an OR of [`button`](crate::consts::button) masks. Stick
/// axes are signed full-range (`-32768..=32767`, sign = direction);
/// triggers are unsigned `0..=255`. Values are raw — the published
/// deadzones are advice for callers, not applied here.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gamepad {
    pub buttons: u16,
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub thumb_lx: i16,
    pub thumb_ly: i16,
    pub thumb_rx: i16,
    pub thumb_ry: i16,
}

impl Gamepad {
    pub const SIZE: usize = 12;

    /// True when the given button mask is fully held.
    #[inline]
    pub fn pressed(&self, mask: u16) -> bool {
        self.buttons & mask == mask
    }

    pub fn encode_le(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..2].copy_from_slice(&self.buttons.to_le_bytes());
        out[2] = self.left_trigger;
        out[3] = self.right_trigger;
        out[4..6].copy_from_slice(&self.thumb_lx.to_le_bytes());
        out[6..8].copy_from_slice(&self.thumb_ly.to_le_bytes());
        out[8..10].copy_from_slice(&self.thumb_rx.to_le_bytes());
        out[10..12].copy_from_slice(&self.thumb_ry.to_le_bytes());
        out
    }

    pub fn decode_le(raw: &[u8; Self::SIZE]) -> Self {
        Self {
            buttons: u16::from_le_bytes([raw[0], raw[1]]),
            left_trigger: raw[2],
            right_trigger: raw[3],
            thumb_lx: i16::from_le_bytes([raw[4], raw[5]]),
            thumb_ly: i16::from_le_bytes([raw[6], raw[7]]),
            thumb_rx: i16::from_le_bytes([raw[8], raw[9]]),
            thumb_ry: i16::from_le_bytes([raw[10], raw[11]]),
        }
    }
}

/// State envelope returned by the state query.
///
/// `packet` changes iff the embedded snapshot changed since the previous
/// read of the same slot, letting callers skip no-op polls.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct State {
    pub packet: u32,
    pub gamepad: Gamepad,
}

impl State {
    pub const SIZE: usize = 16;

    pub fn encode_le(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..4].copy_from_slice(&self.packet.to_le_bytes());
        out[4..16].copy_from_slice(&self.gamepad.encode_le());
        out
    }

    pub fn decode_le(raw: &[u8; Self::SIZE]) -> Self {
        let mut pad = [0u8; Gamepad::SIZE];
        pad.copy_from_slice(&raw[4..16]);
        Self {
            packet: u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]),
            gamepad: Gamepad::decode_le(&pad),
        }
    }
}

/// Haptic motor command. Caller-supplied, never hardware-read.
///
/// `left_motor` drives the low-frequency motor, `right_motor` the
/// high-frequency one; full range `0..=65535`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Vibration {
    pub left_motor: u16,
    pub right_motor: u16,
}

impl Vibration {
    pub const SIZE: usize = 4;

    /// Both motors off.
    pub const STOP: Vibration = Vibration {
        left_motor: 0,
        right_motor: 0,
    };

    pub fn encode_le(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..2].copy_from_slice(&self.left_motor.to_le_bytes());
        out[2..4].copy_from_slice(&self.right_motor.to_le_bytes());
        out
    }

    pub fn decode_le(raw: &[u8; Self::SIZE]) -> Self {
        Self {
            left_motor: u16::from_le_bytes([raw[0], raw[1]]),
            right_motor: u16::from_le_bytes([raw[2], raw[3]]),
        }
    }
}

/// Capability descriptor for one slot.
///
/// The nested `gamepad` and `vibration` records describe *presence*, not
/// live values: a non-zero field means the corresponding control or motor
/// exists on the device.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub device_type: u8,
    pub subtype: u8,
    pub flags: u16,
    pub gamepad: Gamepad,
    pub vibration: Vibration,
}

impl Capabilities {
    pub const SIZE: usize = 20;

    /// Descriptor for a standard full-featured wired gamepad: every
    /// control present, both motors present.
    pub fn standard_gamepad() -> Self {
        Self {
            device_type: devtype::GAMEPAD,
            subtype: subtype::GAMEPAD,
            flags: caps::FFB_SUPPORTED,
            gamepad: Gamepad {
                buttons: crate::consts::button::MASK_ALL,
                left_trigger: 0xFF,
                right_trigger: 0xFF,
                thumb_lx: -1,
                thumb_ly: -1,
                thumb_rx: -1,
                thumb_ry: -1,
            },
            vibration: Vibration {
                left_motor: 0xFFFF,
                right_motor: 0xFFFF,
            },
        }
    }

    pub fn encode_le(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0] = self.device_type;
        out[1] = self.subtype;
        out[2..4].copy_from_slice(&self.flags.to_le_bytes());
        out[4..16].copy_from_slice(&self.gamepad.encode_le());
        out[16..20].copy_from_slice(&self.vibration.encode_le());
        out
    }

    pub fn decode_le(raw: &[u8; Self::SIZE]) -> Self {
        let mut pad = [0u8; Gamepad::SIZE];
        pad.copy_from_slice(&raw[4..16]);
        Self {
            device_type: raw[0],
            subtype: raw[1],
            flags: u16::from_le_bytes([raw[2], raw[3]]),
            gamepad: Gamepad::decode_le(&pad),
            vibration: Vibration::decode_le(&[raw[16], raw[17], raw[18], raw[19]]),
        }
    }
}

/// Battery type and charge level for a slot's pad or headset.
///
/// `battery_level` is meaningful only when `battery_type` indicates a
/// wireless battery-powered source; ignore it otherwise.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatteryInfo {
    pub battery_type: u8,
    pub battery_level: u8,
}

impl BatteryInfo {
    pub const SIZE: usize = 2;

    /// Reported for an empty or vanished slot.
    pub const DISCONNECTED: BatteryInfo = BatteryInfo {
        battery_type: crate::consts::battery::TYPE_DISCONNECTED,
        battery_level: crate::consts::battery::LEVEL_EMPTY,
    };

    pub fn encode_le(&self) -> [u8; Self::SIZE] {
        [self.battery_type, self.battery_level]
    }

    pub fn decode_le(raw: &[u8; Self::SIZE]) -> Self {
        Self {
            battery_type: raw[0],
            battery_level: raw[1],
        }
    }
}

/// One buffered key-style event drained from a slot's FIFO.
///
/// Exactly one of the KEYDOWN/KEYUP flag bits is set per event under
/// normal operation; REPEAT accompanies KEYDOWN for auto-repeats.
/// `unicode` carries a UTF-16 code unit for text-capable keys and zero for
/// pad buttons.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keystroke {
    pub virtual_key: u16,
    pub unicode: u16,
    pub flags: u16,
    pub user_index: u8,
    pub hid_code: u8,
}

impl Keystroke {
    pub const SIZE: usize = 8;

    pub fn encode_le(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..2].copy_from_slice(&self.virtual_key.to_le_bytes());
        out[2..4].copy_from_slice(&self.unicode.to_le_bytes());
        out[4..6].copy_from_slice(&self.flags.to_le_bytes());
        out[6] = self.user_index;
        out[7] = self.hid_code;
        out
    }

    pub fn decode_le(raw: &[u8; Self::SIZE]) -> Self {
        Self {
            virtual_key: u16::from_le_bytes([raw[0], raw[1]]),
            unicode: u16::from_le_bytes([raw[2], raw[3]]),
            flags: u16::from_le_bytes([raw[4], raw[5]]),
            user_index: raw[6],
            hid_code: raw[7],
        }
    }
}
