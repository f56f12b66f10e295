//! Poll every connected slot and print state changes.

use std::time::Duration;

use padport::consts::{button, user, vk};
use padport::InputHub;

fn main() {
    env_logger::init();

    let mut hub = InputHub::discover();

    for slot in 0..user::MAX_COUNT {
        match hub.identity(slot) {
            Ok(identity) => {
                println!(
                    "slot {slot}: {} {}",
                    identity.label(),
                    serde_json::to_string(&identity).unwrap_or_default()
                );
            }
            Err(_) => println!("slot {slot}: empty"),
        }
    }

    let mut last_packets = [0u32; user::MAX_COUNT as usize];

    loop {
        for slot in 0..user::MAX_COUNT {
            let state = match hub.state(slot) {
                Ok(state) => state,
                Err(_) => continue,
            };
            if state.packet == last_packets[slot as usize] {
                continue;
            }
            last_packets[slot as usize] = state.packet;

            let gp = state.gamepad;
            let mut held = Vec::new();
            for (mask, label) in [
                (button::A, "A"),
                (button::B, "B"),
                (button::X, "X"),
                (button::Y, "Y"),
                (button::LEFT_SHOULDER, "LB"),
                (button::RIGHT_SHOULDER, "RB"),
                (button::BACK, "Back"),
                (button::START, "Start"),
            ] {
                if gp.pressed(mask) {
                    held.push(label);
                }
            }

            println!(
                "slot {slot} pkt {}: L=({},{}) R=({},{}) LT={} RT={} [{}]",
                state.packet,
                gp.thumb_lx,
                gp.thumb_ly,
                gp.thumb_rx,
                gp.thumb_ry,
                gp.left_trigger,
                gp.right_trigger,
                held.join(","),
            );
        }

        // Drain buffered keystrokes from any slot while we're here.
        while let Ok(stroke) = hub.keystroke(user::INDEX_ANY) {
            println!(
                "keystroke slot {}: {} flags {:#06x}",
                stroke.user_index,
                vk::name(stroke.virtual_key).unwrap_or("?"),
                stroke.flags,
            );
        }

        std::thread::sleep(Duration::from_millis(8));
    }
}
