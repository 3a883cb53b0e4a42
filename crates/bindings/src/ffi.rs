//! C ABI for hardware verification harnesses.
//!
//! These functions are what a SystemVerilog testbench imports through DPI-C.
//! A session is created once and passed back on every call as an opaque
//! handle (a `chandle` on the SystemVerilog side):
//!
//! ```text
//! import "DPI-C" function chandle simx_create();
//! import "DPI-C" function int     simx_init(chandle h, string kernel, int cores, int warps, int threads);
//! import "DPI-C" function int     simx_step(chandle h, longint unsigned cycles);
//! import "DPI-C" function void    simx_write_mem(chandle h, longint unsigned addr, int unsigned size, input byte data[]);
//! import "DPI-C" function void    simx_read_memory(chandle h, longint unsigned addr, int unsigned size, output byte data[]);
//! import "DPI-C" function void    simx_cleanup(chandle h);
//! import "DPI-C" function void    simx_destroy(chandle h);
//! ```
//!
//! Open-array arguments must be passed as their data pointer (for example
//! `svGetArrayPtr`) by a thin C shim when the simulator does not do so itself.
//!
//! # Status codes
//!
//! | Function                      | Codes                                                         |
//! |-------------------------------|---------------------------------------------------------------|
//! | `simx_init`, `simx_init_json` | `0` ok, `1` configuration error, `2` image error, `-1` bad handle |
//! | `simx_step`                   | `0` finished, `1` running, `-1` bad handle or simulation fault |
//!
//! Memory transfers return nothing; rejected transfers are logged at `warn`
//! and leave both sides unchanged.
//!
//! # Safety
//!
//! The caller must ensure:
//! - every non-null handle came from [`simx_create`] and has not been passed to
//!   [`simx_destroy`]
//! - a handle is used by one thread at a time
//! - string arguments are null or NUL-terminated
//! - buffer arguments are null or valid for `size` bytes

use std::ffi::CStr;
use std::path::PathBuf;

use libc::{c_char, c_int};
use simx_core::config::Config;
use simx_core::sim::loader::ProgramImage;
use tracing::{error, warn};

use crate::error::{STATUS_CONFIG, STATUS_ERROR, STATUS_OK};
use crate::logging;
use crate::session::Session;
use crate::stepping::StepBudget;

/// Opaque session handle passed to every C entry point.
pub type SimxHandle = Session;

/// Borrows the session behind `handle`.
///
/// # Safety
///
/// `handle` must be null or a live pointer returned by [`simx_create`].
unsafe fn session<'a>(handle: *mut SimxHandle) -> Option<&'a mut Session> {
    // SAFETY: guaranteed by the caller.
    unsafe { handle.as_mut() }
}

/// Converts an optional C path into a program image.
///
/// # Safety
///
/// `path` must be null or NUL-terminated.
unsafe fn image_arg(path: *const c_char) -> Option<ProgramImage> {
    if path.is_null() {
        return None;
    }
    // SAFETY: non-null and NUL-terminated per the caller.
    let path = unsafe { CStr::from_ptr(path) };
    let path = path.to_string_lossy();
    if path.is_empty() {
        return None;
    }
    Some(ProgramImage::Path(PathBuf::from(path.as_ref())))
}

fn init_status(session: &mut Session, config: &Config, image: Option<&ProgramImage>) -> c_int {
    match session.initialize(config, image) {
        Ok(()) => STATUS_OK,
        Err(err) => {
            warn!(error = %err, "simx_init failed");
            err.status()
        }
    }
}

/// Allocates an empty session and returns its handle.
///
/// Also installs the stderr log subscriber (see [`logging::init`]).
#[unsafe(no_mangle)]
pub extern "C" fn simx_create() -> *mut SimxHandle {
    logging::init();
    Box::into_raw(Box::new(Session::new()))
}

/// Destroys a session and any instance it holds. Null is ignored.
///
/// # Safety
///
/// `handle` must be null or a live handle; it is invalid afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn simx_destroy(handle: *mut SimxHandle) {
    if handle.is_null() {
        return;
    }
    // SAFETY: the handle came from `Box::into_raw` in `simx_create`.
    drop(unsafe { Box::from_raw(handle) });
}

/// Initializes the session with a machine shape and an optional kernel image.
///
/// Any previous instance is destroyed first. A null or empty `kernel_file`
/// skips image loading. Negative counts are rejected as configuration errors.
///
/// # Safety
///
/// See the [module documentation](self).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn simx_init(
    handle: *mut SimxHandle,
    kernel_file: *const c_char,
    cores: c_int,
    warps: c_int,
    threads: c_int,
) -> c_int {
    // SAFETY: forwarded caller contract.
    let Some(session) = (unsafe { session(handle) }) else {
        warn!("simx_init called with a null handle");
        return STATUS_ERROR;
    };
    let count = |n: c_int| usize::try_from(n).unwrap_or(0);
    let config = Config::with_machine(count(cores), count(warps), count(threads));
    // SAFETY: forwarded caller contract.
    let image = unsafe { image_arg(kernel_file) };
    init_status(session, &config, image.as_ref())
}

/// Initializes the session from a JSON configuration document.
///
/// Fields missing from the document take their defaults; `kernel_file`
/// behaves as in [`simx_init`].
///
/// # Safety
///
/// See the [module documentation](self).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn simx_init_json(
    handle: *mut SimxHandle,
    json_config: *const c_char,
    kernel_file: *const c_char,
) -> c_int {
    // SAFETY: forwarded caller contract.
    let Some(session) = (unsafe { session(handle) }) else {
        warn!("simx_init_json called with a null handle");
        return STATUS_ERROR;
    };
    if json_config.is_null() {
        session.cleanup();
        warn!("simx_init_json called without a configuration");
        return STATUS_CONFIG;
    }
    // SAFETY: non-null and NUL-terminated per the caller.
    let json = unsafe { CStr::from_ptr(json_config) }.to_string_lossy();
    let config = match Config::from_json(&json) {
        Ok(config) => config,
        Err(err) => {
            session.cleanup();
            warn!(error = %err, "simx_init_json rejected its configuration");
            return STATUS_CONFIG;
        }
    };
    // SAFETY: forwarded caller contract.
    let image = unsafe { image_arg(kernel_file) };
    init_status(session, &config, image.as_ref())
}

/// Advances the simulation; `cycles == 0` runs to completion.
///
/// # Safety
///
/// See the [module documentation](self).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn simx_step(handle: *mut SimxHandle, cycles: u64) -> c_int {
    // SAFETY: forwarded caller contract.
    let Some(session) = (unsafe { session(handle) }) else {
        warn!("simx_step called with a null handle");
        return STATUS_ERROR;
    };
    match session.step(StepBudget::from_raw(cycles)) {
        Ok(status) => status.as_raw(),
        Err(err) => {
            error!(error = %err, "simx_step aborted");
            STATUS_ERROR
        }
    }
}

/// Copies `size` bytes from `data` into simulated memory at `addr`.
///
/// # Safety
///
/// See the [module documentation](self).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn simx_write_mem(
    handle: *mut SimxHandle,
    addr: u64,
    size: u32,
    data: *const u8,
) {
    // SAFETY: forwarded caller contract.
    let Some(session) = (unsafe { session(handle) }) else {
        warn!("simx_write_mem called with a null handle");
        return;
    };
    if data.is_null() {
        warn!(addr = format_args!("{addr:#x}"), size, "simx_write_mem ignored a null buffer");
        return;
    }
    let slice: &[u8] = if size == 0 {
        &[]
    } else {
        // SAFETY: non-null and valid for `size` bytes per the caller.
        unsafe { std::slice::from_raw_parts(data, size as usize) }
    };
    if let Err(err) = session.write_memory(addr, slice) {
        warn!(addr = format_args!("{addr:#x}"), size, error = %err, "simx_write_mem rejected");
    }
}

/// Copies `size` bytes of simulated memory at `addr` into `data`.
///
/// # Safety
///
/// See the [module documentation](self).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn simx_read_memory(
    handle: *mut SimxHandle,
    addr: u64,
    size: u32,
    data: *mut u8,
) {
    // SAFETY: forwarded caller contract.
    let Some(session) = (unsafe { session(handle) }) else {
        warn!("simx_read_memory called with a null handle");
        return;
    };
    if data.is_null() {
        warn!(addr = format_args!("{addr:#x}"), size, "simx_read_memory ignored a null buffer");
        return;
    }
    let slice: &mut [u8] = if size == 0 {
        &mut []
    } else {
        // SAFETY: non-null, valid for `size` bytes and unaliased per the caller.
        unsafe { std::slice::from_raw_parts_mut(data, size as usize) }
    };
    if let Err(err) = session.read_memory(addr, slice) {
        warn!(addr = format_args!("{addr:#x}"), size, error = %err, "simx_read_memory rejected");
    }
}

/// Destroys the session's instance, keeping the handle usable.
///
/// # Safety
///
/// See the [module documentation](self).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn simx_cleanup(handle: *mut SimxHandle) {
    // SAFETY: forwarded caller contract.
    if let Some(session) = unsafe { session(handle) } {
        session.cleanup();
    }
}

/// Exit code of the finished program, or `-1` if none is available.
///
/// # Safety
///
/// See the [module documentation](self).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn simx_exit_code(handle: *mut SimxHandle) -> i64 {
    // SAFETY: forwarded caller contract.
    unsafe { session(handle) }
        .and_then(|session| session.exit_code())
        .map_or(-1, |code| code as i64)
}
