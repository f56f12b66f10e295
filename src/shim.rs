//! Raw exported entry points.
//!
//! With the `shim` feature the crate builds as a `cdylib` exporting the
//! original entry-point names and signatures over a process-global hub, so
//! existing binaries can load it in place of the vendor library. Out
//! parameters are written only on success; every function returns a
//! [`status`](crate::consts::status) code, zero meaning success.
//!
//! # Concurrency
//! Unlike [`InputHub`](crate::hub::InputHub) itself, this surface IS
//! thread-safe: a process-global mutex serializes every call. The hub is
//! created on first use via [`InputHub::discover`].
//!
//! # Safety
//! Callers must pass valid, writable pointers (or null, which is rejected
//! with the bad-arguments status). Buffers must be at least as large as
//! the count they declare.

#![allow(non_snake_case)]

use std::sync::{Mutex, MutexGuard, OnceLock};

use crate::consts::status;
use crate::error::status_of;
use crate::hub::InputHub;
use crate::layout::{BatteryInfo, Capabilities, Guid, Keystroke, State, Vibration};

fn hub() -> MutexGuard<'static, InputHub> {
    static HUB: OnceLock<Mutex<InputHub>> = OnceLock::new();
    HUB.get_or_init(|| Mutex::new(InputHub::discover()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

/// # Safety
/// `pState` must be null or valid for writes of [`State`].
#[no_mangle]
pub unsafe extern "system" fn XInputGetState(dwUserIndex: u32, pState: *mut State) -> u32 {
    if pState.is_null() {
        return status::BAD_ARGUMENTS;
    }
    let res = hub().state(dwUserIndex);
    if let Ok(state) = &res {
        unsafe { pState.write(*state) };
    }
    status_of(&res)
}

/// # Safety
/// `pVibration` must be null or valid for reads of [`Vibration`].
#[no_mangle]
pub unsafe extern "system" fn XInputSetState(
    dwUserIndex: u32,
    pVibration: *const Vibration,
) -> u32 {
    if pVibration.is_null() {
        return status::BAD_ARGUMENTS;
    }
    let vibration = unsafe { pVibration.read() };
    status_of(&hub().set_vibration(dwUserIndex, vibration))
}

/// # Safety
/// `pCapabilities` must be null or valid for writes of [`Capabilities`].
#[no_mangle]
pub unsafe extern "system" fn XInputGetCapabilities(
    dwUserIndex: u32,
    dwFlags: u32,
    pCapabilities: *mut Capabilities,
) -> u32 {
    if pCapabilities.is_null() {
        return status::BAD_ARGUMENTS;
    }
    let res = hub().capabilities(dwUserIndex, dwFlags);
    if let Ok(caps) = &res {
        unsafe { pCapabilities.write(*caps) };
    }
    status_of(&res)
}

/// Process-wide input toggle; kept for compatibility with existing
/// callers. Zero disables, anything else enables.
#[no_mangle]
pub extern "system" fn XInputEnable(enable: i32) {
    #[allow(deprecated)]
    hub().set_enabled(enable != 0);
}

/// # Safety
/// Non-null buffer pointers must be valid for writes of the number of
/// `u16` units their count declares; non-null counts must be valid for
/// reads and writes.
#[no_mangle]
pub unsafe extern "system" fn XInputGetAudioDeviceIds(
    dwUserIndex: u32,
    pRenderDeviceId: *mut u16,
    pRenderCount: *mut u32,
    pCaptureDeviceId: *mut u16,
    pCaptureCount: *mut u32,
) -> u32 {
    // A null buffer means that side is not requested; a scratch buffer at
    // the endpoint-ID size limit satisfies the copy protocol for it.
    let mut render_scratch = [0u16; 256];
    let mut capture_scratch = [0u16; 256];
    let mut render_scratch_count = render_scratch.len() as u32;
    let mut capture_scratch_count = capture_scratch.len() as u32;

    let (render, render_count) = if pRenderDeviceId.is_null() || pRenderCount.is_null() {
        (&mut render_scratch[..], &mut render_scratch_count)
    } else {
        let count = unsafe { &mut *pRenderCount };
        let buf = unsafe { std::slice::from_raw_parts_mut(pRenderDeviceId, *count as usize) };
        (buf, count)
    };
    let (capture, capture_count) = if pCaptureDeviceId.is_null() || pCaptureCount.is_null() {
        (&mut capture_scratch[..], &mut capture_scratch_count)
    } else {
        let count = unsafe { &mut *pCaptureCount };
        let buf = unsafe { std::slice::from_raw_parts_mut(pCaptureDeviceId, *count as usize) };
        (buf, count)
    };

    status_of(&hub().audio_device_ids(dwUserIndex, render, render_count, capture, capture_count))
}

/// # Safety
/// `pBatteryInformation` must be null or valid for writes of
/// [`BatteryInfo`].
#[no_mangle]
pub unsafe extern "system" fn XInputGetBatteryInformation(
    dwUserIndex: u32,
    devType: u8,
    pBatteryInformation: *mut BatteryInfo,
) -> u32 {
    if pBatteryInformation.is_null() {
        return status::BAD_ARGUMENTS;
    }
    let res = hub().battery_info(dwUserIndex, devType);
    if let Ok(info) = &res {
        unsafe { pBatteryInformation.write(*info) };
    }
    status_of(&res)
}

/// # Safety
/// `pKeystroke` must be null or valid for writes of [`Keystroke`].
///
/// `dwReserved` is accepted and ignored, as the contract reserves it.
#[no_mangle]
pub unsafe extern "system" fn XInputGetKeystroke(
    dwUserIndex: u32,
    dwReserved: u32,
    pKeystroke: *mut Keystroke,
) -> u32 {
    let _ = dwReserved;
    if pKeystroke.is_null() {
        return status::BAD_ARGUMENTS;
    }
    let res = hub().keystroke(dwUserIndex);
    if let Ok(stroke) = &res {
        unsafe { pKeystroke.write(*stroke) };
    }
    status_of(&res)
}

/// # Safety
/// GUID pointers must be null or valid for writes of [`Guid`].
#[no_mangle]
pub unsafe extern "system" fn XInputGetDSoundAudioDeviceGuids(
    dwUserIndex: u32,
    pDSoundRenderGuid: *mut Guid,
    pDSoundCaptureGuid: *mut Guid,
) -> u32 {
    if pDSoundRenderGuid.is_null() || pDSoundCaptureGuid.is_null() {
        return status::BAD_ARGUMENTS;
    }
    let res = hub().dsound_audio_device_guids(dwUserIndex);
    if let Ok((render, capture)) = &res {
        unsafe {
            pDSoundRenderGuid.write(*render);
            pDSoundCaptureGuid.write(*capture);
        }
    }
    status_of(&res)
}
