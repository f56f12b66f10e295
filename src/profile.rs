//! Serializable virtual-pad profiles.
//!
//! A profile is a TOML document describing a set of virtual pads and the
//! slots they occupy, used to stand up reproducible device layouts for
//! demos, integration tests, and development without hardware:
//!
//! ```toml
//! [[pad]]
//! slot = 0
//! name = "wheel rig"
//! subtype = "wheel"
//!
//! [[pad]]
//! slot = 1
//! wireless = true
//! battery_type = "nimh"
//! battery_level = "medium"
//! render_audio_id = "virtual-render-1"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::audio::AudioIds;
use crate::backends::virtual_pad::VirtualPad;
use crate::consts::{battery, caps, subtype, user};
use crate::hub::InputHub;
use crate::layout::{BatteryInfo, Capabilities};

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("profile parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("slot {0} out of range")]
    SlotRange(u32),

    #[error("slot {0} defined twice")]
    DuplicateSlot(u32),
}

/// Device subtype, by name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubtypeName {
    Unknown,
    #[default]
    Gamepad,
    Wheel,
    ArcadeStick,
    FlightStick,
    DancePad,
    Guitar,
    GuitarAlternate,
    DrumKit,
    GuitarBass,
    ArcadePad,
}

impl SubtypeName {
    pub fn code(self) -> u8 {
        match self {
            SubtypeName::Unknown => subtype::UNKNOWN,
            SubtypeName::Gamepad => subtype::GAMEPAD,
            SubtypeName::Wheel => subtype::WHEEL,
            SubtypeName::ArcadeStick => subtype::ARCADE_STICK,
            SubtypeName::FlightStick => subtype::FLIGHT_STICK,
            SubtypeName::DancePad => subtype::DANCE_PAD,
            SubtypeName::Guitar => subtype::GUITAR,
            SubtypeName::GuitarAlternate => subtype::GUITAR_ALTERNATE,
            SubtypeName::DrumKit => subtype::DRUM_KIT,
            SubtypeName::GuitarBass => subtype::GUITAR_BASS,
            SubtypeName::ArcadePad => subtype::ARCADE_PAD,
        }
    }
}

/// Battery source, by name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryTypeName {
    Disconnected,
    #[default]
    Wired,
    Alkaline,
    Nimh,
    Unknown,
}

impl BatteryTypeName {
    pub fn code(self) -> u8 {
        match self {
            BatteryTypeName::Disconnected => battery::TYPE_DISCONNECTED,
            BatteryTypeName::Wired => battery::TYPE_WIRED,
            BatteryTypeName::Alkaline => battery::TYPE_ALKALINE,
            BatteryTypeName::Nimh => battery::TYPE_NIMH,
            BatteryTypeName::Unknown => battery::TYPE_UNKNOWN,
        }
    }
}

/// Charge level, by name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryLevelName {
    Empty,
    Low,
    Medium,
    #[default]
    Full,
}

impl BatteryLevelName {
    pub fn code(self) -> u8 {
        match self {
            BatteryLevelName::Empty => battery::LEVEL_EMPTY,
            BatteryLevelName::Low => battery::LEVEL_LOW,
            BatteryLevelName::Medium => battery::LEVEL_MEDIUM,
            BatteryLevelName::Full => battery::LEVEL_FULL,
        }
    }
}

/// One virtual pad in a profile.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PadProfile {
    pub slot: u32,

    /// Label shown in identity metadata; defaults to `pad{slot}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub subtype: SubtypeName,

    /// Marks the pad wireless in its capability flags.
    #[serde(default)]
    pub wireless: bool,

    #[serde(default)]
    pub battery_type: BatteryTypeName,

    #[serde(default)]
    pub battery_level: BatteryLevelName,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_audio_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture_audio_id: Option<String>,
}

impl PadProfile {
    fn build(&self) -> VirtualPad {
        let label = self
            .name
            .clone()
            .unwrap_or_else(|| format!("pad{}", self.slot));

        let mut descriptor = Capabilities::standard_gamepad();
        descriptor.subtype = self.subtype.code();
        if self.wireless {
            descriptor.flags |= caps::WIRELESS;
        }

        let mut pad = VirtualPad::new(&label)
            .with_capabilities(descriptor)
            .with_battery(BatteryInfo {
                battery_type: self.battery_type.code(),
                battery_level: self.battery_level.code(),
            });

        if self.render_audio_id.is_some() || self.capture_audio_id.is_some() {
            pad = pad.with_audio(AudioIds {
                render: self.render_audio_id.clone().unwrap_or_default(),
                capture: self.capture_audio_id.clone().unwrap_or_default(),
            });
        }
        pad
    }
}

/// A full virtual device layout.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, rename = "pad")]
    pub pads: Vec<PadProfile>,
}

impl Profile {
    /// Parse and validate a profile document.
    pub fn from_toml(text: &str) -> Result<Self, ProfileError> {
        let profile: Profile = toml::from_str(text)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Read and parse a profile file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    fn validate(&self) -> Result<(), ProfileError> {
        let mut seen = [false; user::MAX_COUNT as usize];
        for pad in &self.pads {
            if pad.slot >= user::MAX_COUNT {
                return Err(ProfileError::SlotRange(pad.slot));
            }
            if seen[pad.slot as usize] {
                return Err(ProfileError::DuplicateSlot(pad.slot));
            }
            seen[pad.slot as usize] = true;
        }
        Ok(())
    }

    /// Build the described pads, paired with their slot indices.
    pub fn build(&self) -> Vec<(u32, VirtualPad)> {
        self.pads.iter().map(|p| (p.slot, p.build())).collect()
    }

    /// Attach every described pad to `hub`.
    pub fn install(&self, hub: &mut InputHub) {
        for (slot, pad) in self.build() {
            // Slots were range-checked at parse time.
            let _ = hub.attach(slot, Box::new(pad));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::SlotBackend;
    use crate::consts::devtype;

    const SAMPLE: &str = r#"
        [[pad]]
        slot = 0
        name = "main"

        [[pad]]
        slot = 2
        subtype = "wheel"
        wireless = true
        battery_type = "alkaline"
        battery_level = "low"
        render_audio_id = "spk-2"
    "#;

    #[test]
    fn parses_and_builds() {
        let profile = Profile::from_toml(SAMPLE).unwrap();
        assert_eq!(profile.pads.len(), 2);

        let pads = profile.build();
        assert_eq!(pads[0].0, 0);
        assert_eq!(pads[1].0, 2);

        let (_, wheel) = &pads[1];
        let caps_desc = wheel.capabilities();
        assert_eq!(caps_desc.device_type, devtype::GAMEPAD);
        assert_eq!(caps_desc.subtype, subtype::WHEEL);
        assert_ne!(caps_desc.flags & caps::WIRELESS, 0);

        let info = wheel.battery(battery::DEVTYPE_GAMEPAD);
        assert_eq!(info.battery_type, battery::TYPE_ALKALINE);
        assert_eq!(info.battery_level, battery::LEVEL_LOW);

        assert_eq!(wheel.audio_ids().unwrap().render, "spk-2");
    }

    #[test]
    fn defaults_are_a_wired_gamepad() {
        let profile = Profile::from_toml("[[pad]]\nslot = 1\n").unwrap();
        let (slot, pad) = profile.build().pop().unwrap();
        assert_eq!(slot, 1);
        assert_eq!(pad.capabilities().subtype, subtype::GAMEPAD);
        assert_eq!(
            pad.battery(battery::DEVTYPE_GAMEPAD).battery_type,
            battery::TYPE_WIRED
        );
        assert!(pad.audio_ids().is_none());
    }

    #[test]
    fn rejects_bad_slots() {
        assert!(matches!(
            Profile::from_toml("[[pad]]\nslot = 4\n"),
            Err(ProfileError::SlotRange(4))
        ));
        assert!(matches!(
            Profile::from_toml("[[pad]]\nslot = 1\n[[pad]]\nslot = 1\n"),
            Err(ProfileError::DuplicateSlot(1))
        ));
        assert!(Profile::from_toml("[[pad]]\nslot = 0\nsubtype = \"keytar\"\n").is_err());
    }

    #[test]
    fn installs_into_a_hub() {
        let profile = Profile::from_toml(SAMPLE).unwrap();
        let mut hub = InputHub::new();
        profile.install(&mut hub);

        assert!(hub.connected(0));
        assert!(!hub.connected(1));
        assert!(hub.connected(2));
        assert_eq!(hub.identity(0).unwrap().label(), "main");
    }

    #[test]
    fn round_trips_through_toml() {
        let profile = Profile::from_toml(SAMPLE).unwrap();
        let text = toml::to_string(&profile).unwrap();
        let back = Profile::from_toml(&text).unwrap();
        assert_eq!(back.pads.len(), profile.pads.len());
        assert_eq!(back.pads[1].subtype, SubtypeName::Wheel);
    }
}
