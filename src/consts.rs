//! Published constants of the controller slot contract.
//!
//! Every value here is part of the wire contract shared with existing
//! callers and drivers: button masks OR together into
//! [`Gamepad::buttons`](crate::layout::Gamepad), device types and subtypes
//! identify hardware classes in a [`Capabilities`](crate::layout::Capabilities)
//! descriptor, and the pad virtual-key codes appear verbatim in buffered
//! [`Keystroke`](crate::layout::Keystroke) events. None of the numbers may
//! change; renaming is fine, renumbering is not.
//!
//! The deadzone and trigger-threshold values in [`deadzone`] are published
//! recommendations for caller-side filtering. The API itself reports raw
//! axis values and never applies them.

/// Button bitmask values for [`Gamepad::buttons`](crate::layout::Gamepad).
///
/// Bits are independent and OR-combinable. `0x0400` and `0x0800` are
/// reserved and never set.
pub mod button {
    pub const DPAD_UP: u16 = 0x0001;
    pub const DPAD_DOWN: u16 = 0x0002;
    pub const DPAD_LEFT: u16 = 0x0004;
    pub const DPAD_RIGHT: u16 = 0x0008;
    pub const START: u16 = 0x0010;
    pub const BACK: u16 = 0x0020;
    pub const LEFT_THUMB: u16 = 0x0040;
    pub const RIGHT_THUMB: u16 = 0x0080;
    pub const LEFT_SHOULDER: u16 = 0x0100;
    pub const RIGHT_SHOULDER: u16 = 0x0200;
    pub const A: u16 = 0x1000;
    pub const B: u16 = 0x2000;
    pub const X: u16 = 0x4000;
    pub const Y: u16 = 0x8000;

    /// All defined button bits (the two reserved bits excluded).
    pub const MASK_ALL: u16 = 0xF3FF;
}

/// Device types reported in [`Capabilities::device_type`](crate::layout::Capabilities).
pub mod devtype {
    pub const GAMEPAD: u8 = 0x01;
}

/// Device subtypes reported in [`Capabilities::subtype`](crate::layout::Capabilities).
pub mod subtype {
    pub const UNKNOWN: u8 = 0x00;
    pub const GAMEPAD: u8 = 0x01;
    pub const WHEEL: u8 = 0x02;
    pub const ARCADE_STICK: u8 = 0x03;
    pub const FLIGHT_STICK: u8 = 0x04;
    pub const DANCE_PAD: u8 = 0x05;
    pub const GUITAR: u8 = 0x06;
    pub const GUITAR_ALTERNATE: u8 = 0x07;
    pub const DRUM_KIT: u8 = 0x08;
    pub const GUITAR_BASS: u8 = 0x0B;
    pub const ARCADE_PAD: u8 = 0x13;
}

/// Feature-flag bits for [`Capabilities::flags`](crate::layout::Capabilities).
pub mod caps {
    pub const FFB_SUPPORTED: u16 = 0x0001;
    pub const WIRELESS: u16 = 0x0002;
    pub const VOICE_SUPPORTED: u16 = 0x0004;
    pub const PMD_SUPPORTED: u16 = 0x0008;
    pub const NO_NAVIGATION: u16 = 0x0010;
}

/// Battery sub-device selectors, battery types, and charge levels.
pub mod battery {
    /// Selects the main pad when querying battery state.
    pub const DEVTYPE_GAMEPAD: u8 = 0x00;
    /// Selects the attached headset when querying battery state.
    pub const DEVTYPE_HEADSET: u8 = 0x01;

    pub const TYPE_DISCONNECTED: u8 = 0x00;
    pub const TYPE_WIRED: u8 = 0x01;
    pub const TYPE_ALKALINE: u8 = 0x02;
    pub const TYPE_NIMH: u8 = 0x03;
    pub const TYPE_UNKNOWN: u8 = 0xFF;

    // Levels are meaningful only for wireless types with a known battery.
    pub const LEVEL_EMPTY: u8 = 0x00;
    pub const LEVEL_LOW: u8 = 0x01;
    pub const LEVEL_MEDIUM: u8 = 0x02;
    pub const LEVEL_FULL: u8 = 0x03;
}

/// Slot index range.
pub mod user {
    /// Number of simultaneously supported slots (indices `0..MAX_COUNT`).
    pub const MAX_COUNT: u32 = 4;
    /// Sentinel meaning "any slot"; accepted only by the keystroke query.
    pub const INDEX_ANY: u32 = 0x0000_00FF;
}

/// Filter flags for the capability query.
pub mod flag {
    /// Restrict the query to gamepad-class devices.
    pub const GAMEPAD: u32 = 0x0000_0001;
}

/// Pad virtual-key codes delivered in [`Keystroke::virtual_key`](crate::layout::Keystroke).
pub mod vk {
    pub const PAD_A: u16 = 0x5800;
    pub const PAD_B: u16 = 0x5801;
    pub const PAD_X: u16 = 0x5802;
    pub const PAD_Y: u16 = 0x5803;
    pub const PAD_RSHOULDER: u16 = 0x5804;
    pub const PAD_LSHOULDER: u16 = 0x5805;
    pub const PAD_LTRIGGER: u16 = 0x5806;
    pub const PAD_RTRIGGER: u16 = 0x5807;

    pub const PAD_DPAD_UP: u16 = 0x5810;
    pub const PAD_DPAD_DOWN: u16 = 0x5811;
    pub const PAD_DPAD_LEFT: u16 = 0x5812;
    pub const PAD_DPAD_RIGHT: u16 = 0x5813;
    pub const PAD_START: u16 = 0x5814;
    pub const PAD_BACK: u16 = 0x5815;
    pub const PAD_LTHUMB_PRESS: u16 = 0x5816;
    pub const PAD_RTHUMB_PRESS: u16 = 0x5817;

    pub const PAD_LTHUMB_UP: u16 = 0x5820;
    pub const PAD_LTHUMB_DOWN: u16 = 0x5821;
    pub const PAD_LTHUMB_RIGHT: u16 = 0x5822;
    pub const PAD_LTHUMB_LEFT: u16 = 0x5823;
    pub const PAD_LTHUMB_UPLEFT: u16 = 0x5824;
    pub const PAD_LTHUMB_UPRIGHT: u16 = 0x5825;
    pub const PAD_LTHUMB_DOWNRIGHT: u16 = 0x5826;
    pub const PAD_LTHUMB_DOWNLEFT: u16 = 0x5827;

    pub const PAD_RTHUMB_UP: u16 = 0x5830;
    pub const PAD_RTHUMB_DOWN: u16 = 0x5831;
    pub const PAD_RTHUMB_RIGHT: u16 = 0x5832;
    pub const PAD_RTHUMB_LEFT: u16 = 0x5833;
    pub const PAD_RTHUMB_UPLEFT: u16 = 0x5834;
    pub const PAD_RTHUMB_UPRIGHT: u16 = 0x5835;
    pub const PAD_RTHUMB_DOWNRIGHT: u16 = 0x5836;
    pub const PAD_RTHUMB_DOWNLEFT: u16 = 0x5837;

    /// Conventional label for a pad virtual key (`0x5800` → `"A"`).
    ///
    /// Returns `None` for codes outside the pad range.
    pub fn name(code: u16) -> Option<&'static str> {
        Some(match code {
            PAD_A => "A",
            PAD_B => "B",
            PAD_X => "X",
            PAD_Y => "Y",
            PAD_RSHOULDER => "RB",
            PAD_LSHOULDER => "LB",
            PAD_LTRIGGER => "LT",
            PAD_RTRIGGER => "RT",
            PAD_DPAD_UP => "DPadUp",
            PAD_DPAD_DOWN => "DPadDown",
            PAD_DPAD_LEFT => "DPadLeft",
            PAD_DPAD_RIGHT => "DPadRight",
            PAD_START => "Start",
            PAD_BACK => "Back",
            PAD_LTHUMB_PRESS => "LThumb",
            PAD_RTHUMB_PRESS => "RThumb",
            PAD_LTHUMB_UP => "LThumbUp",
            PAD_LTHUMB_DOWN => "LThumbDown",
            PAD_LTHUMB_RIGHT => "LThumbRight",
            PAD_LTHUMB_LEFT => "LThumbLeft",
            PAD_LTHUMB_UPLEFT => "LThumbUpLeft",
            PAD_LTHUMB_UPRIGHT => "LThumbUpRight",
            PAD_LTHUMB_DOWNRIGHT => "LThumbDownRight",
            PAD_LTHUMB_DOWNLEFT => "LThumbDownLeft",
            PAD_RTHUMB_UP => "RThumbUp",
            PAD_RTHUMB_DOWN => "RThumbDown",
            PAD_RTHUMB_RIGHT => "RThumbRight",
            PAD_RTHUMB_LEFT => "RThumbLeft",
            PAD_RTHUMB_UPLEFT => "RThumbUpLeft",
            PAD_RTHUMB_UPRIGHT => "RThumbUpRight",
            PAD_RTHUMB_DOWNRIGHT => "RThumbDownRight",
            PAD_RTHUMB_DOWNLEFT => "RThumbDownLeft",
            _ => return None,
        })
    }
}

/// Flag bits for [`Keystroke::flags`](crate::layout::Keystroke).
pub mod keystroke {
    pub const KEYDOWN: u16 = 0x0001;
    pub const KEYUP: u16 = 0x0002;
    pub const REPEAT: u16 = 0x0004;
}

/// Recommended caller-side filtering thresholds.
pub mod deadzone {
    pub const LEFT_THUMB: i16 = 7849;
    pub const RIGHT_THUMB: i16 = 8689;
    pub const TRIGGER_THRESHOLD: u8 = 30;
}

/// Numeric status codes returned by every operation.
///
/// Zero means success; callers must check before trusting out-parameters.
pub mod status {
    pub const SUCCESS: u32 = 0;
    /// A supplied buffer is too small; the required size is reported back.
    pub const INSUFFICIENT_BUFFER: u32 = 122;
    /// A slot index or flag value is out of range.
    pub const BAD_ARGUMENTS: u32 = 160;
    /// No device is connected at the queried slot.
    pub const DEVICE_NOT_CONNECTED: u32 = 1167;
    /// The keystroke queue has no buffered events.
    pub const EMPTY: u32 = 4306;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_masks_match_published_values() {
        assert_eq!(button::DPAD_UP, 0x0001);
        assert_eq!(button::DPAD_DOWN, 0x0002);
        assert_eq!(button::DPAD_LEFT, 0x0004);
        assert_eq!(button::DPAD_RIGHT, 0x0008);
        assert_eq!(button::START, 0x0010);
        assert_eq!(button::BACK, 0x0020);
        assert_eq!(button::LEFT_THUMB, 0x0040);
        assert_eq!(button::RIGHT_THUMB, 0x0080);
        assert_eq!(button::LEFT_SHOULDER, 0x0100);
        assert_eq!(button::RIGHT_SHOULDER, 0x0200);
        assert_eq!(button::A, 0x1000);
        assert_eq!(button::B, 0x2000);
        assert_eq!(button::X, 0x4000);
        assert_eq!(button::Y, 0x8000);
    }

    #[test]
    fn mask_all_is_the_or_of_every_button() {
        let all = button::DPAD_UP
            | button::DPAD_DOWN
            | button::DPAD_LEFT
            | button::DPAD_RIGHT
            | button::START
            | button::BACK
            | button::LEFT_THUMB
            | button::RIGHT_THUMB
            | button::LEFT_SHOULDER
            | button::RIGHT_SHOULDER
            | button::A
            | button::B
            | button::X
            | button::Y;
        assert_eq!(button::MASK_ALL, all);
    }

    #[test]
    fn device_class_values_match_published_values() {
        assert_eq!(devtype::GAMEPAD, 0x01);

        assert_eq!(subtype::UNKNOWN, 0x00);
        assert_eq!(subtype::GAMEPAD, 0x01);
        assert_eq!(subtype::WHEEL, 0x02);
        assert_eq!(subtype::ARCADE_STICK, 0x03);
        assert_eq!(subtype::FLIGHT_STICK, 0x04);
        assert_eq!(subtype::DANCE_PAD, 0x05);
        assert_eq!(subtype::GUITAR, 0x06);
        assert_eq!(subtype::GUITAR_ALTERNATE, 0x07);
        assert_eq!(subtype::DRUM_KIT, 0x08);
        assert_eq!(subtype::GUITAR_BASS, 0x0B);
        assert_eq!(subtype::ARCADE_PAD, 0x13);

        assert_eq!(caps::FFB_SUPPORTED, 0x0001);
        assert_eq!(caps::WIRELESS, 0x0002);
        assert_eq!(caps::VOICE_SUPPORTED, 0x0004);
        assert_eq!(caps::PMD_SUPPORTED, 0x0008);
        assert_eq!(caps::NO_NAVIGATION, 0x0010);
    }

    #[test]
    fn battery_values_match_published_values() {
        assert_eq!(battery::DEVTYPE_GAMEPAD, 0x00);
        assert_eq!(battery::DEVTYPE_HEADSET, 0x01);

        assert_eq!(battery::TYPE_DISCONNECTED, 0x00);
        assert_eq!(battery::TYPE_WIRED, 0x01);
        assert_eq!(battery::TYPE_ALKALINE, 0x02);
        assert_eq!(battery::TYPE_NIMH, 0x03);
        assert_eq!(battery::TYPE_UNKNOWN, 0xFF);

        assert_eq!(battery::LEVEL_EMPTY, 0x00);
        assert_eq!(battery::LEVEL_LOW, 0x01);
        assert_eq!(battery::LEVEL_MEDIUM, 0x02);
        assert_eq!(battery::LEVEL_FULL, 0x03);
    }

    #[test]
    fn slot_range_and_filter_flags() {
        assert_eq!(user::MAX_COUNT, 4);
        assert_eq!(user::INDEX_ANY, 0xFF);
        assert_eq!(flag::GAMEPAD, 0x0000_0001);
    }

    #[test]
    fn virtual_key_codes_match_published_values() {
        assert_eq!(vk::PAD_A, 0x5800);
        assert_eq!(vk::PAD_B, 0x5801);
        assert_eq!(vk::PAD_X, 0x5802);
        assert_eq!(vk::PAD_Y, 0x5803);
        assert_eq!(vk::PAD_RSHOULDER, 0x5804);
        assert_eq!(vk::PAD_LSHOULDER, 0x5805);
        assert_eq!(vk::PAD_LTRIGGER, 0x5806);
        assert_eq!(vk::PAD_RTRIGGER, 0x5807);
        assert_eq!(vk::PAD_DPAD_UP, 0x5810);
        assert_eq!(vk::PAD_DPAD_DOWN, 0x5811);
        assert_eq!(vk::PAD_DPAD_LEFT, 0x5812);
        assert_eq!(vk::PAD_DPAD_RIGHT, 0x5813);
        assert_eq!(vk::PAD_START, 0x5814);
        assert_eq!(vk::PAD_BACK, 0x5815);
        assert_eq!(vk::PAD_LTHUMB_PRESS, 0x5816);
        assert_eq!(vk::PAD_RTHUMB_PRESS, 0x5817);
        assert_eq!(vk::PAD_LTHUMB_UP, 0x5820);
        assert_eq!(vk::PAD_LTHUMB_DOWNLEFT, 0x5827);
        assert_eq!(vk::PAD_RTHUMB_UP, 0x5830);
        assert_eq!(vk::PAD_RTHUMB_DOWNLEFT, 0x5837);
    }

    #[test]
    fn keystroke_flags_and_thresholds() {
        assert_eq!(keystroke::KEYDOWN, 0x0001);
        assert_eq!(keystroke::KEYUP, 0x0002);
        assert_eq!(keystroke::REPEAT, 0x0004);

        assert_eq!(deadzone::LEFT_THUMB, 7849);
        assert_eq!(deadzone::RIGHT_THUMB, 8689);
        assert_eq!(deadzone::TRIGGER_THRESHOLD, 30);
    }

    #[test]
    fn status_codes() {
        assert_eq!(status::SUCCESS, 0);
        assert_eq!(status::INSUFFICIENT_BUFFER, 122);
        assert_eq!(status::BAD_ARGUMENTS, 160);
        assert_eq!(status::DEVICE_NOT_CONNECTED, 1167);
        assert_eq!(status::EMPTY, 4306);
    }

    #[test]
    fn pad_virtual_keys_have_names() {
        assert_eq!(vk::name(0x5800), Some("A"));
        assert_eq!(vk::name(vk::PAD_RSHOULDER), Some("RB"));
        assert_eq!(vk::name(vk::PAD_LTHUMB_UPRIGHT), Some("LThumbUpRight"));
        assert_eq!(vk::name(0x0041), None);
    }
}
