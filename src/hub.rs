//! The slot hub: owner of up to four backends and the full operation set.
//!
//! [`InputHub`] implements every query of the contract over whatever
//! backends are bound to its slots: state with change-counting packets,
//! vibration, capabilities, battery, buffered keystrokes, audio endpoint
//! IDs, and legacy audio GUIDs, plus the deprecated process-wide
//! enable/disable toggle.
//!
//! Failure travels as [`PortError`]; see [`crate::error`] for the numeric
//! status mapping callers outside Rust rely on.
//!
//! # Concurrency
//! `InputHub` makes no internal locking claims: all operations take
//! `&mut self` and the type is `Send` but not shared. Callers who need
//! concurrent access wrap it themselves; the raw shim does exactly that
//! with a process-global mutex.

use std::time::Instant;

use log::{info, warn};

use crate::backends::{probe_backends, SlotBackend};
use crate::consts::{battery, flag, user};
use crate::error::{PortError, Result};
use crate::identity::PadIdentity;
use crate::keystroke::KeystrokeQueue;
use crate::layout::{
    BatteryInfo, Capabilities, Gamepad, Guid, Keystroke, State, Vibration,
};

struct Slot {
    backend: Option<Box<dyn SlotBackend>>,
    packet: u32,
    last: Gamepad,
    keys: KeystrokeQueue,
    /// Vibration latched while input is disabled, replayed on re-enable.
    pending_rumble: Option<Vibration>,
}

impl Slot {
    fn new(index: u32) -> Self {
        Self {
            backend: None,
            packet: 0,
            last: Gamepad::default(),
            keys: KeystrokeQueue::new(index as u8),
            pending_rumble: None,
        }
    }

    /// Read the backend and keep the change-counting packet in sync.
    ///
    /// Every polling operation goes through here so a change observed by
    /// one query is never invisible to the next.
    fn poll(&mut self, index: u32) -> Result<Gamepad> {
        let backend = self
            .backend
            .as_mut()
            .ok_or(PortError::NotConnected(index))?;
        match backend.read() {
            Some(pad) => {
                if pad != self.last {
                    self.packet = self.packet.wrapping_add(1);
                    self.last = pad;
                }
                Ok(pad)
            }
            None => {
                // Buffered events from the vanished device are not
                // replayed to its successor.
                self.keys.reset();
                Err(PortError::NotConnected(index))
            }
        }
    }
}

pub struct InputHub {
    slots: Vec<Slot>,
    enabled: bool,
}

impl Default for InputHub {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHub {
    /// A hub with four empty slots and input enabled.
    pub fn new() -> Self {
        Self {
            slots: (0..user::MAX_COUNT).map(Slot::new).collect(),
            enabled: true,
        }
    }

    /// Probe all enabled backends and bind them to slots in order.
    pub fn discover() -> Self {
        let mut hub = Self::new();
        let backends = probe_backends();
        info!("discovered {} backend(s)", backends.len());

        let mut extra = 0usize;
        for (index, backend) in backends.into_iter().enumerate() {
            if index < user::MAX_COUNT as usize {
                hub.slots[index].backend = Some(backend);
            } else {
                extra += 1;
            }
        }
        if extra > 0 {
            warn!("{extra} device(s) beyond the slot limit were ignored");
        }
        hub
    }

    fn slot_mut(&mut self, index: u32) -> Result<&mut Slot> {
        if index >= user::MAX_COUNT {
            return Err(PortError::BadArgument("slot index out of range"));
        }
        Ok(&mut self.slots[index as usize])
    }

    /// Bind a backend to a slot, replacing and dropping any previous one.
    /// Keystroke tracking restarts for the new device; the packet counter
    /// carries on so a stale packet number is never observed twice.
    pub fn attach(&mut self, index: u32, backend: Box<dyn SlotBackend>) -> Result<()> {
        let slot = self.slot_mut(index)?;
        slot.backend = Some(backend);
        slot.last = Gamepad::default();
        slot.keys.reset();
        slot.pending_rumble = None;
        Ok(())
    }

    /// Unbind a slot. The packet counter survives so a later attach
    /// cannot replay an old packet number.
    pub fn detach(&mut self, index: u32) -> Result<()> {
        let slot = self.slot_mut(index)?;
        slot.backend = None;
        slot.keys.reset();
        slot.pending_rumble = None;
        Ok(())
    }

    /// Whether a backend is bound and currently answering reads.
    pub fn connected(&mut self, index: u32) -> bool {
        self.slot_mut(index)
            .ok()
            .and_then(|slot| slot.backend.as_mut().map(|b| b.read().is_some()))
            .unwrap_or(false)
    }

    /// Identity of the device behind a slot.
    pub fn identity(&self, index: u32) -> Result<PadIdentity> {
        if index >= user::MAX_COUNT {
            return Err(PortError::BadArgument("slot index out of range"));
        }
        self.slots[index as usize]
            .backend
            .as_ref()
            .map(|b| b.identity())
            .ok_or(PortError::NotConnected(index))
    }

    /// Current state envelope for a slot. Pure read: no queue or motor
    /// side effects. The packet field changes iff the snapshot did.
    ///
    /// While input is disabled this reports a neutral snapshot with the
    /// current packet number and does not touch the hardware.
    pub fn state(&mut self, index: u32) -> Result<State> {
        let enabled = self.enabled;
        let slot = self.slot_mut(index)?;

        if !enabled {
            if slot.backend.is_none() {
                return Err(PortError::NotConnected(index));
            }
            return Ok(State {
                packet: slot.packet,
                gamepad: Gamepad::default(),
            });
        }

        let pad = slot.poll(index)?;
        Ok(State {
            packet: slot.packet,
            gamepad: pad,
        })
    }

    /// Drive a slot's haptic motors — the one operation with a physical
    /// side effect. While input is disabled the command is latched and
    /// replayed on re-enable.
    pub fn set_vibration(&mut self, index: u32, vibration: Vibration) -> Result<()> {
        let enabled = self.enabled;
        let slot = self.slot_mut(index)?;
        let backend = slot
            .backend
            .as_mut()
            .ok_or(PortError::NotConnected(index))?;

        if !enabled {
            slot.pending_rumble = Some(vibration);
            return Ok(());
        }
        if backend.rumble(vibration) {
            Ok(())
        } else {
            Err(PortError::NotConnected(index))
        }
    }

    /// Capability descriptor for a slot.
    ///
    /// `flags` selects a device category: zero for any, [`flag::GAMEPAD`]
    /// to restrict to gamepad-class devices. Anything else is rejected.
    pub fn capabilities(&mut self, index: u32, flags: u32) -> Result<Capabilities> {
        if flags != 0 && flags != flag::GAMEPAD {
            return Err(PortError::BadArgument("unknown capability filter flag"));
        }
        let slot = self.slot_mut(index)?;
        let backend = slot
            .backend
            .as_mut()
            .ok_or(PortError::NotConnected(index))?;

        let caps = backend.capabilities();
        if flags == flag::GAMEPAD && caps.device_type != crate::consts::devtype::GAMEPAD {
            return Err(PortError::NotConnected(index));
        }
        Ok(caps)
    }

    /// Battery type and level for a slot's pad or headset.
    ///
    /// An in-range slot with nothing bound reports the disconnected
    /// battery type with success; absence is a value here, not an error.
    pub fn battery_info(&mut self, index: u32, dev_type: u8) -> Result<BatteryInfo> {
        if dev_type > battery::DEVTYPE_HEADSET {
            return Err(PortError::BadArgument("unknown battery device selector"));
        }
        let slot = self.slot_mut(index)?;
        Ok(slot
            .backend
            .as_ref()
            .map(|b| b.battery(dev_type))
            .unwrap_or(BatteryInfo::DISCONNECTED))
    }

    /// Drain one buffered keystroke event.
    ///
    /// The only stateful query: each call consumes one event, and
    /// successive calls walk the FIFO. [`user::INDEX_ANY`] scans slots in
    /// index order and returns the first available event. While input is
    /// disabled no new events are synthesized; the queue drains and then
    /// reports empty.
    pub fn keystroke(&mut self, index: u32) -> Result<Keystroke> {
        if index == user::INDEX_ANY {
            let mut any_bound = false;
            for slot_index in 0..user::MAX_COUNT {
                if self.slots[slot_index as usize].backend.is_some() {
                    any_bound = true;
                    match self.keystroke_for(slot_index) {
                        Ok(stroke) => return Ok(stroke),
                        Err(PortError::Empty) | Err(PortError::NotConnected(_)) => continue,
                        Err(e) => return Err(e),
                    }
                }
            }
            return if any_bound {
                Err(PortError::Empty)
            } else {
                Err(PortError::NotConnected(index))
            };
        }

        if index >= user::MAX_COUNT {
            return Err(PortError::BadArgument("slot index out of range"));
        }
        if self.slots[index as usize].backend.is_none() {
            return Err(PortError::NotConnected(index));
        }
        self.keystroke_for(index)
    }

    fn keystroke_for(&mut self, index: u32) -> Result<Keystroke> {
        let enabled = self.enabled;
        let slot = &mut self.slots[index as usize];

        if enabled {
            match slot.poll(index) {
                Ok(pad) => slot.keys.update_at(&pad, Instant::now()),
                // A vanished device still drains nothing: its queue was
                // reset on the failed poll.
                Err(_) => return Err(PortError::NotConnected(index)),
            }
        }
        slot.keys.pop().ok_or(PortError::Empty)
    }

    /// Audio endpoint identifiers for a slot, copied into caller buffers.
    ///
    /// `render_count`/`capture_count` carry capacities in and copied
    /// lengths out; on a too-small buffer the count is set to the
    /// required length and the insufficient-buffer error returned (the
    /// other buffer may already be filled — check the status before
    /// trusting either).
    pub fn audio_device_ids(
        &mut self,
        index: u32,
        render: &mut [u16],
        render_count: &mut u32,
        capture: &mut [u16],
        capture_count: &mut u32,
    ) -> Result<()> {
        let slot = self.slot_mut(index)?;
        slot.poll(index)?;
        let ids = slot
            .backend
            .as_ref()
            .and_then(|b| b.audio_ids())
            .unwrap_or_default();

        crate::audio::fill_wide(&ids.render, render, render_count)?;
        crate::audio::fill_wide(&ids.capture, capture, capture_count)?;
        Ok(())
    }

    /// Legacy audio-subsystem identifiers (render, capture) for a slot.
    /// Devices without them report null GUIDs with success.
    pub fn dsound_audio_device_guids(&mut self, index: u32) -> Result<(Guid, Guid)> {
        let slot = self.slot_mut(index)?;
        slot.poll(index)?;
        Ok(slot
            .backend
            .as_ref()
            .and_then(|b| b.dsound_guids())
            .unwrap_or((Guid::NULL, Guid::NULL)))
    }

    /// Process-wide input toggle, kept for compatibility with existing
    /// callers.
    ///
    /// Disabling silences all motors and makes state reads report neutral
    /// input; vibration commands sent while disabled are latched and
    /// replayed on re-enable.
    #[deprecated(note = "poll normally and ignore input at the application layer instead")]
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;

        if enabled {
            for slot in &mut self.slots {
                if let (Some(backend), Some(vibration)) =
                    (slot.backend.as_mut(), slot.pending_rumble.take())
                {
                    backend.rumble(vibration);
                }
            }
        } else {
            for slot in &mut self.slots {
                if let Some(backend) = slot.backend.as_mut() {
                    backend.rumble(Vibration::STOP);
                }
            }
        }
    }

    /// Whether input processing is currently enabled.
    pub fn enabled(&self) -> bool {
        self.enabled
    }
}
