//! Buffered key-style event synthesis.
//!
//! The keystroke query drains a per-slot FIFO of discrete press/release
//! events derived from successive input snapshots: button bits map 1:1
//! onto pad virtual keys, triggers fire when they cross the published
//! threshold, and each stick contributes one 8-way directional key once it
//! leaves its deadzone. A key held past an initial delay emits repeat
//! events at a fixed interval.
//!
//! Timing is clock-injected: [`KeystrokeQueue::update_at`] takes the
//! current instant, so repeat behavior is deterministic under test.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use log::warn;

use crate::consts::{button, deadzone, keystroke, vk};
use crate::layout::{Gamepad, Keystroke};

/// Delay before a held key starts repeating.
const REPEAT_DELAY: Duration = Duration::from_millis(400);
/// Interval between repeat events once repeating.
const REPEAT_INTERVAL: Duration = Duration::from_millis(100);
/// Buffered events per slot; arrivals beyond this are dropped.
const QUEUE_CAP: usize = 32;

/// Direct button-bit to virtual-key mapping.
const BUTTON_VKS: &[(u16, u16)] = &[
    (button::DPAD_UP, vk::PAD_DPAD_UP),
    (button::DPAD_DOWN, vk::PAD_DPAD_DOWN),
    (button::DPAD_LEFT, vk::PAD_DPAD_LEFT),
    (button::DPAD_RIGHT, vk::PAD_DPAD_RIGHT),
    (button::START, vk::PAD_START),
    (button::BACK, vk::PAD_BACK),
    (button::LEFT_THUMB, vk::PAD_LTHUMB_PRESS),
    (button::RIGHT_THUMB, vk::PAD_RTHUMB_PRESS),
    (button::LEFT_SHOULDER, vk::PAD_LSHOULDER),
    (button::RIGHT_SHOULDER, vk::PAD_RSHOULDER),
    (button::A, vk::PAD_A),
    (button::B, vk::PAD_B),
    (button::X, vk::PAD_X),
    (button::Y, vk::PAD_Y),
];

/// 8-way directional key for one stick, or `None` inside the deadzone.
///
/// `base` is the UP key of the stick's block; the remaining directions sit
/// at fixed offsets from it (DOWN +1, RIGHT +2, LEFT +3, UPLEFT +4,
/// UPRIGHT +5, DOWNRIGHT +6, DOWNLEFT +7).
fn thumb_vk(x: i16, y: i16, dz: i16, base: u16) -> Option<u16> {
    let up = y >= dz;
    let down = y <= -dz;
    let left = x <= -dz;
    let right = x >= dz;

    match (up, down, left, right) {
        (true, false, false, false) => Some(base),
        (false, true, false, false) => Some(base + 1),
        (false, false, false, true) => Some(base + 2),
        (false, false, true, false) => Some(base + 3),
        (true, false, true, false) => Some(base + 4),
        (true, false, false, true) => Some(base + 5),
        (false, true, false, true) => Some(base + 6),
        (false, true, true, false) => Some(base + 7),
        _ => None,
    }
}

/// Virtual keys currently held according to a snapshot.
fn active_keys(pad: &Gamepad) -> Vec<u16> {
    let mut keys = Vec::with_capacity(8);

    for &(mask, code) in BUTTON_VKS {
        if pad.buttons & mask != 0 {
            keys.push(code);
        }
    }
    if pad.left_trigger >= deadzone::TRIGGER_THRESHOLD {
        keys.push(vk::PAD_LTRIGGER);
    }
    if pad.right_trigger >= deadzone::TRIGGER_THRESHOLD {
        keys.push(vk::PAD_RTRIGGER);
    }
    if let Some(code) = thumb_vk(
        pad.thumb_lx,
        pad.thumb_ly,
        deadzone::LEFT_THUMB,
        vk::PAD_LTHUMB_UP,
    ) {
        keys.push(code);
    }
    if let Some(code) = thumb_vk(
        pad.thumb_rx,
        pad.thumb_ry,
        deadzone::RIGHT_THUMB,
        vk::PAD_RTHUMB_UP,
    ) {
        keys.push(code);
    }

    keys
}

struct HeldKey {
    code: u16,
    next_repeat: Instant,
}

/// Per-slot FIFO of synthesized keystroke events.
pub struct KeystrokeQueue {
    slot: u8,
    held: Vec<HeldKey>,
    events: VecDeque<Keystroke>,
}

impl KeystrokeQueue {
    pub fn new(slot: u8) -> Self {
        Self {
            slot,
            held: Vec::new(),
            events: VecDeque::new(),
        }
    }

    fn event(&self, code: u16, flags: u16) -> Keystroke {
        Keystroke {
            virtual_key: code,
            unicode: 0,
            flags,
            user_index: self.slot,
            hid_code: 0,
        }
    }

    fn push(&mut self, stroke: Keystroke) {
        if self.events.len() >= QUEUE_CAP {
            warn!(
                "slot {} keystroke queue full, dropping vk {:#06x}",
                self.slot, stroke.virtual_key
            );
            return;
        }
        self.events.push_back(stroke);
    }

    /// Diff `pad` against the previously seen snapshot and enqueue the
    /// resulting press/release/repeat events, using `now` for repeat
    /// timing.
    pub fn update_at(&mut self, pad: &Gamepad, now: Instant) {
        let current = active_keys(pad);

        // Releases first, so a direction flip reads as up-then-down.
        let mut released = Vec::new();
        self.held.retain(|held| {
            if current.contains(&held.code) {
                true
            } else {
                released.push(held.code);
                false
            }
        });
        for code in released {
            let stroke = self.event(code, keystroke::KEYUP);
            self.push(stroke);
        }

        for &code in &current {
            if !self.held.iter().any(|held| held.code == code) {
                let stroke = self.event(code, keystroke::KEYDOWN);
                self.push(stroke);
                self.held.push(HeldKey {
                    code,
                    next_repeat: now + REPEAT_DELAY,
                });
            }
        }

        let mut repeats = Vec::new();
        for held in &mut self.held {
            if now >= held.next_repeat {
                held.next_repeat = now + REPEAT_INTERVAL;
                repeats.push(held.code);
            }
        }
        for code in repeats {
            let stroke = self.event(code, keystroke::KEYDOWN | keystroke::REPEAT);
            self.push(stroke);
        }
    }

    /// Drain the oldest buffered event.
    pub fn pop(&mut self) -> Option<Keystroke> {
        self.events.pop_front()
    }

    /// Forget all state. Used when the slot's device vanishes; buffered
    /// events from the old device are not replayed to the next one.
    pub fn reset(&mut self) {
        self.held.clear();
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad_with(buttons: u16) -> Gamepad {
        Gamepad {
            buttons,
            ..Default::default()
        }
    }

    #[test]
    fn press_emits_keydown_only() {
        let mut q = KeystrokeQueue::new(1);
        q.update_at(&pad_with(button::A), Instant::now());

        let ev = q.pop().unwrap();
        assert_eq!(ev.virtual_key, vk::PAD_A);
        assert_eq!(ev.flags, keystroke::KEYDOWN);
        assert_eq!(ev.user_index, 1);
        assert_eq!(ev.unicode, 0);
        assert!(q.pop().is_none());
    }

    #[test]
    fn release_emits_keyup() {
        let mut q = KeystrokeQueue::new(0);
        let t0 = Instant::now();
        q.update_at(&pad_with(button::B), t0);
        q.pop().unwrap();

        q.update_at(&pad_with(0), t0 + Duration::from_millis(10));
        let ev = q.pop().unwrap();
        assert_eq!(ev.virtual_key, vk::PAD_B);
        assert_eq!(ev.flags, keystroke::KEYUP);
    }

    #[test]
    fn steady_state_emits_nothing() {
        let mut q = KeystrokeQueue::new(0);
        let t0 = Instant::now();
        q.update_at(&pad_with(button::X), t0);
        q.pop().unwrap();
        q.update_at(&pad_with(button::X), t0 + Duration::from_millis(50));
        assert!(q.pop().is_none());
    }

    #[test]
    fn held_key_repeats_after_delay() {
        let mut q = KeystrokeQueue::new(0);
        let t0 = Instant::now();
        q.update_at(&pad_with(button::A), t0);
        assert_eq!(q.pop().unwrap().flags, keystroke::KEYDOWN);

        // Before the delay: silence.
        q.update_at(&pad_with(button::A), t0 + Duration::from_millis(200));
        assert!(q.pop().is_none());

        // Past the delay: repeat, flagged as such.
        q.update_at(&pad_with(button::A), t0 + Duration::from_millis(450));
        let ev = q.pop().unwrap();
        assert_eq!(ev.flags, keystroke::KEYDOWN | keystroke::REPEAT);
        assert_eq!(ev.virtual_key, vk::PAD_A);

        // And again at the repeat interval.
        q.update_at(&pad_with(button::A), t0 + Duration::from_millis(560));
        assert_eq!(q.pop().unwrap().flags, keystroke::KEYDOWN | keystroke::REPEAT);
    }

    #[test]
    fn trigger_crosses_threshold() {
        let mut q = KeystrokeQueue::new(0);
        let t0 = Instant::now();

        let mut pad = Gamepad::default();
        pad.left_trigger = deadzone::TRIGGER_THRESHOLD - 1;
        q.update_at(&pad, t0);
        assert!(q.pop().is_none());

        pad.left_trigger = deadzone::TRIGGER_THRESHOLD;
        q.update_at(&pad, t0 + Duration::from_millis(5));
        let ev = q.pop().unwrap();
        assert_eq!(ev.virtual_key, vk::PAD_LTRIGGER);
        assert_eq!(ev.flags, keystroke::KEYDOWN);
    }

    #[test]
    fn left_stick_octants() {
        assert_eq!(
            thumb_vk(0, 30_000, deadzone::LEFT_THUMB, vk::PAD_LTHUMB_UP),
            Some(vk::PAD_LTHUMB_UP)
        );
        assert_eq!(
            thumb_vk(9_000, 9_000, deadzone::LEFT_THUMB, vk::PAD_LTHUMB_UP),
            Some(vk::PAD_LTHUMB_UPRIGHT)
        );
        assert_eq!(
            thumb_vk(-9_000, -9_000, deadzone::LEFT_THUMB, vk::PAD_LTHUMB_UP),
            Some(vk::PAD_LTHUMB_DOWNLEFT)
        );
        assert_eq!(
            thumb_vk(-30_000, 0, deadzone::LEFT_THUMB, vk::PAD_LTHUMB_UP),
            Some(vk::PAD_LTHUMB_LEFT)
        );
        // Inside the deadzone: neutral.
        assert_eq!(
            thumb_vk(
                deadzone::LEFT_THUMB - 1,
                0,
                deadzone::LEFT_THUMB,
                vk::PAD_LTHUMB_UP
            ),
            None
        );
    }

    #[test]
    fn right_stick_uses_its_own_block() {
        let mut q = KeystrokeQueue::new(3);
        let pad = Gamepad {
            thumb_rx: 0,
            thumb_ry: -20_000,
            ..Default::default()
        };
        q.update_at(&pad, Instant::now());
        let ev = q.pop().unwrap();
        assert_eq!(ev.virtual_key, vk::PAD_RTHUMB_DOWN);
        assert_eq!(ev.user_index, 3);
    }

    #[test]
    fn direction_flip_reads_up_then_down() {
        let mut q = KeystrokeQueue::new(0);
        let t0 = Instant::now();
        q.update_at(&pad_with(button::DPAD_UP), t0);
        q.pop().unwrap();

        q.update_at(&pad_with(button::DPAD_DOWN), t0 + Duration::from_millis(5));
        let first = q.pop().unwrap();
        let second = q.pop().unwrap();
        assert_eq!(first.virtual_key, vk::PAD_DPAD_UP);
        assert_eq!(first.flags, keystroke::KEYUP);
        assert_eq!(second.virtual_key, vk::PAD_DPAD_DOWN);
        assert_eq!(second.flags, keystroke::KEYDOWN);
    }

    #[test]
    fn queue_drops_beyond_capacity() {
        let mut q = KeystrokeQueue::new(0);
        let t0 = Instant::now();

        // Alternate A and B forever without draining.
        for i in 0..60u64 {
            let mask = if i % 2 == 0 { button::A } else { button::B };
            q.update_at(&pad_with(mask), t0 + Duration::from_millis(i));
        }
        assert_eq!(q.events.len(), QUEUE_CAP);
    }

    #[test]
    fn reset_clears_pending_state() {
        let mut q = KeystrokeQueue::new(0);
        let t0 = Instant::now();
        q.update_at(&pad_with(button::A), t0);
        q.reset();
        assert!(q.pop().is_none());

        // Re-press after reset is a fresh keydown, not a repeat.
        q.update_at(&pad_with(button::A), t0 + Duration::from_secs(1));
        assert_eq!(q.pop().unwrap().flags, keystroke::KEYDOWN);
    }
}
