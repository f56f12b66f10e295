//! Pulse the motors of the pad in slot 0.

use std::time::Duration;

use padport::{InputHub, Vibration};

fn main() {
    env_logger::init();

    let mut hub = InputHub::discover();

    for step in (0..=4u16).rev() {
        let speed = step.saturating_mul(0x3FFF);
        println!("motors at {speed}");
        if let Err(e) = hub.set_vibration(
            0,
            Vibration {
                left_motor: speed,
                right_motor: speed / 2,
            },
        ) {
            eprintln!("slot 0: {e}");
            return;
        }
        std::thread::sleep(Duration::from_millis(600));
    }

    let _ = hub.set_vibration(0, Vibration::STOP);
}
