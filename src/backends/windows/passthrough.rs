#![cfg(target_os = "windows")]

//! Per-slot delegation to the system controller API.

use log::debug;

// Windows XInput FFI.
use windows_sys::Win32::UI::Input::XboxController::*;

use crate::audio::AudioIds;
use crate::backends::SlotBackend;
use crate::consts::{flag, user};
use crate::identity::PadIdentity;
use crate::layout::{BatteryInfo, Capabilities, Gamepad, Vibration};

/// One system slot exposed as a [`SlotBackend`].
pub struct PassthroughPad {
    /// System slot index in `0..4`.
    index: u32,
    identity: PadIdentity,
    /// Tracks connection for connect/disconnect logging.
    connected: bool,
}

impl PassthroughPad {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            identity: PadIdentity::synthesized(index),
            connected: false,
        }
    }

    fn convert(gp: &XINPUT_GAMEPAD) -> Gamepad {
        Gamepad {
            buttons: gp.wButtons,
            left_trigger: gp.bLeftTrigger,
            right_trigger: gp.bRightTrigger,
            thumb_lx: gp.sThumbLX,
            thumb_ly: gp.sThumbLY,
            thumb_rx: gp.sThumbRX,
            thumb_ry: gp.sThumbRY,
        }
    }
}

impl SlotBackend for PassthroughPad {
    fn identity(&self) -> PadIdentity {
        self.identity.clone()
    }

    fn capabilities(&self) -> Capabilities {
        // FFI struct: must be manually zeroed
        let mut caps: XINPUT_CAPABILITIES = unsafe { std::mem::zeroed() };
        let res = unsafe { XInputGetCapabilities(self.index, flag::GAMEPAD, &mut caps) };
        if res != 0 {
            return Capabilities::default();
        }
        Capabilities {
            device_type: caps.Type,
            subtype: caps.SubType,
            flags: caps.Flags,
            gamepad: Self::convert(&caps.Gamepad),
            vibration: Vibration {
                left_motor: caps.Vibration.wLeftMotorSpeed,
                right_motor: caps.Vibration.wRightMotorSpeed,
            },
        }
    }

    fn read(&mut self) -> Option<Gamepad> {
        let mut state: XINPUT_STATE = unsafe { std::mem::zeroed() };

        // NOTE: the system call returns 0 on success.
        let res = unsafe { XInputGetState(self.index, &mut state) };
        if res != 0 {
            // Disconnected or empty slot.
            self.connected = false;
            return None;
        }

        if !self.connected {
            debug!("slot {} connected: {}", self.index, self.identity.label());
            self.connected = true;
        }

        Some(Self::convert(&state.Gamepad))
    }

    fn rumble(&mut self, vibration: Vibration) -> bool {
        let mut cmd = XINPUT_VIBRATION {
            wLeftMotorSpeed: vibration.left_motor,
            wRightMotorSpeed: vibration.right_motor,
        };
        unsafe { XInputSetState(self.index, &mut cmd) == 0 }
    }

    fn battery(&self, dev_type: u8) -> BatteryInfo {
        let mut info: XINPUT_BATTERY_INFORMATION = unsafe { std::mem::zeroed() };
        let res = unsafe { XInputGetBatteryInformation(self.index, dev_type, &mut info) };
        if res != 0 {
            return BatteryInfo::DISCONNECTED;
        }
        BatteryInfo {
            battery_type: info.BatteryType,
            battery_level: info.BatteryLevel,
        }
    }

    fn audio_ids(&self) -> Option<AudioIds> {
        let mut render = [0u16; 256];
        let mut capture = [0u16; 256];
        let mut render_count = render.len() as u32;
        let mut capture_count = capture.len() as u32;

        let res = unsafe {
            XInputGetAudioDeviceIds(
                self.index,
                render.as_mut_ptr(),
                &mut render_count,
                capture.as_mut_ptr(),
                &mut capture_count,
            )
        };
        if res != 0 {
            return None;
        }
        Some(AudioIds {
            render: crate::audio::wide_to_string(&render),
            capture: crate::audio::wide_to_string(&capture),
        })
    }
}

/// One passthrough backend per system slot, in slot order.
///
/// Empty slots are included; their reads report not-connected until the
/// system sees a device, so late hotplugs surface without re-probing.
pub fn probe_slots() -> Vec<Box<dyn SlotBackend>> {
    (0..user::MAX_COUNT)
        .map(|index| Box::new(PassthroughPad::new(index)) as Box<dyn SlotBackend>)
        .collect()
}
