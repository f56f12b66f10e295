//! Error type and the numeric status-code convention.
//!
//! Every fallible operation on [`InputHub`](crate::hub::InputHub) returns
//! `Result<T, PortError>`. Across the raw ABI boundary the same failures
//! travel as the unsigned codes in [`status`](crate::consts::status):
//! zero is success, anything else means the out-parameters are untrusted.

use crate::consts::status;

#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// No device is bound or responding at the given slot.
    #[error("no device connected at slot {0}")]
    NotConnected(u32),

    /// A slot index, flag, or selector is outside the accepted range.
    #[error("invalid argument: {0}")]
    BadArgument(&'static str),

    /// A caller buffer is too small; the payload needs this many units.
    #[error("buffer too small, {0} units required")]
    InsufficientBuffer(u32),

    /// The keystroke queue has no buffered events.
    #[error("keystroke queue empty")]
    Empty,

    /// HID enumeration or transport failure during discovery.
    #[error("hid error: {0}")]
    Hid(#[from] hidapi::HidError),
}

impl PortError {
    /// The wire status code for this failure.
    ///
    /// HID transport failures have no code of their own in the contract;
    /// they surface as the not-connected condition, which is how the
    /// original API reports any device-side fault.
    pub fn code(&self) -> u32 {
        match self {
            PortError::NotConnected(_) => status::DEVICE_NOT_CONNECTED,
            PortError::BadArgument(_) => status::BAD_ARGUMENTS,
            PortError::InsufficientBuffer(_) => status::INSUFFICIENT_BUFFER,
            PortError::Empty => status::EMPTY,
            PortError::Hid(_) => status::DEVICE_NOT_CONNECTED,
        }
    }
}

pub type Result<T> = std::result::Result<T, PortError>;

/// Collapse a `Result` to the wire status code (zero on success).
pub fn status_of<T>(res: &Result<T>) -> u32 {
    match res {
        Ok(_) => status::SUCCESS,
        Err(e) => e.code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_the_contract() {
        assert_eq!(PortError::NotConnected(2).code(), 1167);
        assert_eq!(PortError::BadArgument("slot").code(), 160);
        assert_eq!(PortError::InsufficientBuffer(64).code(), 122);
        assert_eq!(PortError::Empty.code(), 4306);
    }

    #[test]
    fn status_of_success_is_zero() {
        assert_eq!(status_of(&Ok(())), 0);
        assert_eq!(status_of::<()>(&Err(PortError::Empty)), 4306);
    }

    #[test]
    fn messages_carry_context() {
        let err = PortError::InsufficientBuffer(128);
        assert!(err.to_string().contains("128"));
    }
}
