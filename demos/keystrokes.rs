//! Drive a virtual pad from a profile and echo the synthesized
//! keystroke events, including auto-repeat.

use std::time::Duration;

use padport::consts::{button, keystroke, user, vk};
use padport::profile::Profile;
use padport::backends::virtual_pad::{SharedPad, VirtualPad};
use padport::InputHub;

fn main() {
    env_logger::init();

    // A two-pad layout: slot 0 from a profile, slot 1 scripted live.
    let profile = Profile::from_toml(
        r#"
        [[pad]]
        slot = 0
        name = "profile pad"
        wireless = true
        battery_type = "nimh"
        battery_level = "medium"
    "#,
    )
    .expect("profile parses");

    let mut hub = InputHub::new();
    profile.install(&mut hub);

    let scripted = SharedPad::new(VirtualPad::new("scripted"));
    hub.attach(1, Box::new(scripted.clone()))
        .expect("slot 1 in range");

    // Hold A on the scripted pad long enough to see repeats.
    scripted.lock().press(button::A);
    for _ in 0..8 {
        drain(&mut hub);
        std::thread::sleep(Duration::from_millis(120));
    }
    scripted.lock().release(button::A);
    scripted.lock().set_left_thumb(0, 30_000);
    drain(&mut hub);
    scripted.lock().set_left_thumb(0, 0);
    drain(&mut hub);
}

fn drain(hub: &mut InputHub) {
    while let Ok(stroke) = hub.keystroke(user::INDEX_ANY) {
        let edge = if stroke.flags & keystroke::REPEAT != 0 {
            "repeat"
        } else if stroke.flags & keystroke::KEYDOWN != 0 {
            "down"
        } else {
            "up"
        };
        println!(
            "slot {} {} {}",
            stroke.user_index,
            vk::name(stroke.virtual_key).unwrap_or("?"),
            edge,
        );
    }
}
