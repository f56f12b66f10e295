//! Scripted in-memory pad.
//!
//! [`VirtualPad`] implements [`SlotBackend`] without any hardware: callers
//! set buttons, triggers, and sticks directly, and the pad records the
//! last rumble command it received. Profiles build these, demos drive
//! them, and the hub's tests lean on them heavily.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::audio::AudioIds;
use crate::backends::SlotBackend;
use crate::consts::{battery, button};
use crate::identity::PadIdentity;
use crate::layout::{BatteryInfo, Capabilities, Gamepad, Guid, Vibration};

pub struct VirtualPad {
    identity: PadIdentity,
    caps: Capabilities,
    state: Gamepad,
    battery_pad: BatteryInfo,
    battery_headset: BatteryInfo,
    audio: Option<AudioIds>,
    dsound: Option<(Guid, Guid)>,
    last_rumble: Option<Vibration>,
    connected: bool,
}

impl VirtualPad {
    /// A standard full-featured wired gamepad named after `label`.
    pub fn new(label: &str) -> Self {
        Self {
            identity: PadIdentity {
                bus: Some("virtual".to_string()),
                vid: None,
                pid: None,
                product: Some(label.to_string()),
                serial: None,
                path: Some(format!("virtual:{label}")),
            },
            caps: Capabilities::standard_gamepad(),
            state: Gamepad::default(),
            battery_pad: BatteryInfo {
                battery_type: battery::TYPE_WIRED,
                battery_level: battery::LEVEL_FULL,
            },
            battery_headset: BatteryInfo::DISCONNECTED,
            audio: None,
            dsound: None,
            last_rumble: None,
            connected: true,
        }
    }

    /// Override the capability descriptor (subtype, flags, motor shape).
    pub fn with_capabilities(mut self, caps: Capabilities) -> Self {
        self.caps = caps;
        self
    }

    /// Override the pad battery report.
    pub fn with_battery(mut self, info: BatteryInfo) -> Self {
        self.battery_pad = info;
        self
    }

    /// Attach a headset battery report.
    pub fn with_headset_battery(mut self, info: BatteryInfo) -> Self {
        self.battery_headset = info;
        self
    }

    /// Attach audio endpoint identifiers.
    pub fn with_audio(mut self, ids: AudioIds) -> Self {
        self.audio = Some(ids);
        self
    }

    /// Attach legacy audio identifiers.
    pub fn with_dsound(mut self, render: Guid, capture: Guid) -> Self {
        self.dsound = Some((render, capture));
        self
    }

    /// Press the buttons in `mask` (OR of `button::*` values).
    pub fn press(&mut self, mask: u16) {
        self.state.buttons |= mask & button::MASK_ALL;
    }

    /// Release the buttons in `mask`.
    pub fn release(&mut self, mask: u16) {
        self.state.buttons &= !mask;
    }

    pub fn set_triggers(&mut self, left: u8, right: u8) {
        self.state.left_trigger = left;
        self.state.right_trigger = right;
    }

    pub fn set_left_thumb(&mut self, x: i16, y: i16) {
        self.state.thumb_lx = x;
        self.state.thumb_ly = y;
    }

    pub fn set_right_thumb(&mut self, x: i16, y: i16) {
        self.state.thumb_rx = x;
        self.state.thumb_ry = y;
    }

    /// Replace the whole snapshot at once.
    pub fn set_state(&mut self, state: Gamepad) {
        self.state = state;
    }

    /// Simulate unplugging; reads fail until [`reconnect`](Self::reconnect).
    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    pub fn reconnect(&mut self) {
        self.connected = true;
    }

    /// Last rumble command delivered to this pad, if any.
    pub fn last_rumble(&self) -> Option<Vibration> {
        self.last_rumble
    }
}

impl SlotBackend for VirtualPad {
    fn identity(&self) -> PadIdentity {
        self.identity.clone()
    }

    fn capabilities(&self) -> Capabilities {
        self.caps
    }

    fn read(&mut self) -> Option<Gamepad> {
        self.connected.then_some(self.state)
    }

    fn rumble(&mut self, vibration: Vibration) -> bool {
        if !self.connected {
            return false;
        }
        self.last_rumble = Some(vibration);
        true
    }

    fn battery(&self, dev_type: u8) -> BatteryInfo {
        if !self.connected {
            return BatteryInfo::DISCONNECTED;
        }
        match dev_type {
            battery::DEVTYPE_HEADSET => self.battery_headset,
            _ => self.battery_pad,
        }
    }

    fn audio_ids(&self) -> Option<AudioIds> {
        self.connected.then(|| self.audio.clone()).flatten()
    }

    fn dsound_guids(&self) -> Option<(Guid, Guid)> {
        if self.connected {
            self.dsound
        } else {
            None
        }
    }
}

/// Cloneable handle to a [`VirtualPad`] that is also a [`SlotBackend`].
///
/// Attach one clone to a hub slot and keep another to keep scripting the
/// pad afterwards.
#[derive(Clone)]
pub struct SharedPad(Arc<Mutex<VirtualPad>>);

impl SharedPad {
    pub fn new(pad: VirtualPad) -> Self {
        Self(Arc::new(Mutex::new(pad)))
    }

    /// Lock the underlying pad for scripting.
    pub fn lock(&self) -> MutexGuard<'_, VirtualPad> {
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SlotBackend for SharedPad {
    fn identity(&self) -> PadIdentity {
        self.lock().identity()
    }

    fn capabilities(&self) -> Capabilities {
        self.lock().capabilities()
    }

    fn read(&mut self) -> Option<Gamepad> {
        self.lock().read()
    }

    fn rumble(&mut self, vibration: Vibration) -> bool {
        self.lock().rumble(vibration)
    }

    fn battery(&self, dev_type: u8) -> BatteryInfo {
        self.lock().battery(dev_type)
    }

    fn audio_ids(&self) -> Option<AudioIds> {
        self.lock().audio_ids()
    }

    fn dsound_guids(&self) -> Option<(Guid, Guid)> {
        self.lock().dsound_guids()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_state_round_trips() {
        let mut pad = VirtualPad::new("test");
        pad.press(button::A | button::START);
        pad.set_triggers(0, 200);
        pad.set_left_thumb(-5000, 12_000);

        let snap = pad.read().unwrap();
        assert!(snap.pressed(button::A));
        assert!(snap.pressed(button::START));
        assert_eq!(snap.right_trigger, 200);
        assert_eq!(snap.thumb_ly, 12_000);

        pad.release(button::A);
        assert!(!pad.read().unwrap().pressed(button::A));
    }

    #[test]
    fn reserved_button_bits_are_masked() {
        let mut pad = VirtualPad::new("test");
        pad.press(0xFFFF);
        assert_eq!(pad.read().unwrap().buttons, button::MASK_ALL);
    }

    #[test]
    fn disconnect_fails_reads_and_rumble() {
        let mut pad = VirtualPad::new("test");
        pad.disconnect();
        assert!(pad.read().is_none());
        assert!(!pad.rumble(Vibration {
            left_motor: 1,
            right_motor: 1
        }));
        assert_eq!(
            pad.battery(battery::DEVTYPE_GAMEPAD).battery_type,
            battery::TYPE_DISCONNECTED
        );

        pad.reconnect();
        assert!(pad.read().is_some());
    }

    #[test]
    fn rumble_is_recorded() {
        let mut pad = VirtualPad::new("test");
        let cmd = Vibration {
            left_motor: 0x8000,
            right_motor: 0x0100,
        };
        assert!(pad.rumble(cmd));
        assert_eq!(pad.last_rumble(), Some(cmd));
    }

    #[test]
    fn headset_battery_is_separate() {
        let pad = VirtualPad::new("test").with_headset_battery(BatteryInfo {
            battery_type: battery::TYPE_NIMH,
            battery_level: battery::LEVEL_LOW,
        });
        assert_eq!(
            pad.battery(battery::DEVTYPE_HEADSET).battery_type,
            battery::TYPE_NIMH
        );
        assert_eq!(
            pad.battery(battery::DEVTYPE_GAMEPAD).battery_type,
            battery::TYPE_WIRED
        );
    }
}
