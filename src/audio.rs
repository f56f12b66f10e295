//! Audio endpoint identifiers and the caller-buffer copy protocol.
//!
//! The audio-ID query is the one operation with variable-length output.
//! The caller supplies a UTF-16 buffer and its capacity in code units; the
//! implementation either copies the NUL-terminated identifier and reports
//! the copied length, or reports the required length and fails with the
//! insufficient-buffer status so the caller can retry with a larger buffer.

use crate::error::{PortError, Result};

/// Core-audio endpoint identifier strings for one slot.
///
/// Empty strings mean the device has no such endpoint (no headset
/// attached); they still copy as a lone NUL terminator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AudioIds {
    /// Render (speaker) endpoint ID.
    pub render: String,
    /// Capture (microphone) endpoint ID.
    pub capture: String,
}

/// Copy `src` into `dst` as a NUL-terminated UTF-16 string.
///
/// `count` carries the buffer capacity in, and the copied length
/// (terminator included) out. On a too-small buffer, `count` is set to the
/// required length and [`PortError::InsufficientBuffer`] is returned with
/// `dst` untouched.
pub fn fill_wide(src: &str, dst: &mut [u16], count: &mut u32) -> Result<()> {
    let capacity = (*count as usize).min(dst.len());
    let required = src.encode_utf16().count() + 1;

    if required > capacity {
        *count = required as u32;
        return Err(PortError::InsufficientBuffer(required as u32));
    }

    let mut written = 0;
    for unit in src.encode_utf16() {
        dst[written] = unit;
        written += 1;
    }
    dst[written] = 0;
    *count = (written + 1) as u32;
    Ok(())
}

/// Decode a NUL-terminated UTF-16 buffer back into a `String`.
///
/// Intended for tests and diagnostics; lossy on invalid surrogates.
pub fn wide_to_string(buf: &[u16]) -> String {
    let end = buf.iter().position(|&u| u == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_with_terminator_and_reports_length() {
        let mut buf = [0xAAAAu16; 32];
        let mut count = buf.len() as u32;
        fill_wide("usb#vid_045e", &mut buf, &mut count).unwrap();
        assert_eq!(count, 13); // 12 chars + NUL
        assert_eq!(buf[12], 0);
        assert_eq!(wide_to_string(&buf), "usb#vid_045e");
    }

    #[test]
    fn short_buffer_reports_required_size() {
        let mut buf = [0u16; 4];
        let mut count = buf.len() as u32;
        let err = fill_wide("endpoint-id", &mut buf, &mut count).unwrap_err();
        assert!(matches!(err, PortError::InsufficientBuffer(12)));
        assert_eq!(count, 12);
        // Buffer untouched on failure.
        assert_eq!(buf, [0u16; 4]);
    }

    #[test]
    fn declared_capacity_never_exceeds_the_slice() {
        let mut buf = [0u16; 2];
        let mut count = 64; // caller lies about capacity
        assert!(fill_wide("abc", &mut buf, &mut count).is_err());
    }

    #[test]
    fn empty_id_copies_a_lone_terminator() {
        let mut buf = [0xFFFFu16; 2];
        let mut count = buf.len() as u32;
        fill_wide("", &mut buf, &mut count).unwrap();
        assert_eq!(count, 1);
        assert_eq!(buf[0], 0);
        assert_eq!(wide_to_string(&buf), "");
    }
}
