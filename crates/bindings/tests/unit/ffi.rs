use std::ffi::CString;
use std::ptr;

use pretty_assertions::assert_eq;
use simx_bridge::ffi::{
    simx_cleanup, simx_create, simx_destroy, simx_exit_code, simx_init, simx_init_json,
    simx_read_memory, simx_step, simx_write_mem,
};

use crate::common::builder::program::{squares_kernel, sum_kernel};
use crate::common::harness::{KERNEL_BASE, OUT_BASE};

/// A created handle, destroyed on drop.
struct Handle(*mut simx_bridge::ffi::SimxHandle);

impl Handle {
    fn new() -> Self {
        Self(simx_create())
    }

    fn session(&self) -> &simx_bridge::Session {
        unsafe { &*self.0 }
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        unsafe { simx_destroy(self.0) };
    }
}

fn kernel_file(bytes: &[u8]) -> (tempfile::NamedTempFile, CString) {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), bytes).unwrap();
    let path = CString::new(file.path().to_str().unwrap()).unwrap();
    (file, path)
}

#[test]
fn test_null_handle() {
    let null = ptr::null_mut();
    let mut buf = [7u8; 4];
    unsafe {
        assert_eq!(simx_init(null, ptr::null(), 1, 1, 1), -1);
        assert_eq!(simx_init_json(null, ptr::null(), ptr::null()), -1);
        assert_eq!(simx_step(null, 0), -1);
        simx_write_mem(null, 0, 4, buf.as_ptr());
        simx_read_memory(null, 0, 4, buf.as_mut_ptr());
        simx_cleanup(null);
        assert_eq!(simx_exit_code(null), -1);
        simx_destroy(null);
    }
    assert_eq!(buf, [7; 4]);
}

#[test]
fn test_init_status_codes() {
    let h = Handle::new();
    let (_file, path) = kernel_file(&sum_kernel(2).to_bytes());
    let missing = CString::new("/nonexistent/simx/kernel.bin").unwrap();
    unsafe {
        assert_eq!(simx_init(h.0, path.as_ptr(), 1, 4, 32), 0);
        assert_eq!(simx_init(h.0, path.as_ptr(), 1, -4, 32), 1);
        assert!(!h.session().is_initialized());
        assert_eq!(simx_init(h.0, path.as_ptr(), 1, 4, 64), 1);
        assert_eq!(simx_init(h.0, missing.as_ptr(), 1, 1, 1), 2);
        assert!(h.session().is_initialized());
        assert_eq!(simx_init(h.0, ptr::null(), 1, 1, 1), 0);
    }
}

#[test]
fn test_empty_kernel_path_skips_loading() {
    let h = Handle::new();
    let empty = CString::new("").unwrap();
    unsafe {
        assert_eq!(simx_init(h.0, empty.as_ptr(), 2, 2, 2), 0);
    }
    assert_eq!(h.session().config().unwrap().machine.num_cores, 2);
}

#[test]
fn test_init_json() {
    let h = Handle::new();
    let json = CString::new(r#"{ "machine": { "num_cores": 2, "num_warps": 2, "num_threads": 8 } }"#)
        .unwrap();
    let bad = CString::new("{ machine").unwrap();
    unsafe {
        assert_eq!(simx_init_json(h.0, json.as_ptr(), ptr::null()), 0);
        assert_eq!(h.session().config().unwrap().machine.num_threads, 8);

        assert_eq!(simx_init_json(h.0, bad.as_ptr(), ptr::null()), 1);
        assert!(!h.session().is_initialized());

        assert_eq!(simx_init_json(h.0, json.as_ptr(), ptr::null()), 0);
        assert_eq!(simx_init_json(h.0, ptr::null(), ptr::null()), 1);
        assert!(!h.session().is_initialized());
    }
}

#[test]
fn test_init_json_rejects_unusable_layout() {
    let h = Handle::new();
    let docs = [
        r#"{ "general": { "stack_log2_size": 64 } }"#,
        r#"{ "general": { "startup_addr": 4294967300 } }"#,
        r#"{ "memory": { "page_size": 1099511627776 } }"#,
    ];
    for doc in docs {
        let json = CString::new(doc).unwrap();
        unsafe {
            assert_eq!(simx_init(h.0, ptr::null(), 1, 1, 1), 0);
            assert_eq!(simx_init_json(h.0, json.as_ptr(), ptr::null()), 1);
            assert!(!h.session().is_initialized());
            assert_eq!(simx_step(h.0, 0), 0);
        }
    }
}

#[test]
fn test_step_and_exit_code() {
    let h = Handle::new();
    let (_file, path) = kernel_file(&sum_kernel(10).to_bytes());
    unsafe {
        assert_eq!(simx_step(h.0, 0), 0);
        assert_eq!(simx_init(h.0, path.as_ptr(), 1, 1, 1), 0);
        assert_eq!(simx_exit_code(h.0), -1);
        assert_eq!(simx_step(h.0, 5), 1);
        assert_eq!(simx_step(h.0, 0), 0);
        assert_eq!(simx_exit_code(h.0), 55);
        assert_eq!(simx_step(h.0, 5), 0);
    }
}

#[test]
fn test_step_fault_status() {
    let h = Handle::new();
    unsafe {
        // Zeroed memory at the startup address is an illegal instruction.
        assert_eq!(simx_init(h.0, ptr::null(), 1, 1, 1), 0);
        assert_eq!(simx_step(h.0, 10), -1);
        assert!(h.session().is_initialized());
    }
}

#[test]
fn test_memory_transfers() {
    let h = Handle::new();
    let data = [1u8, 2, 3, 4, 5];
    let mut back = [0u8; 5];
    unsafe {
        assert_eq!(simx_init(h.0, ptr::null(), 1, 1, 1), 0);
        simx_write_mem(h.0, OUT_BASE, 5, data.as_ptr());
        simx_read_memory(h.0, OUT_BASE, 5, back.as_mut_ptr());
    }
    assert_eq!(back, data);
}

#[test]
fn test_rejected_transfers_leave_both_sides() {
    let h = Handle::new();
    let data = [0xAAu8; 8];
    let mut back = [0x55u8; 8];
    unsafe {
        simx_read_memory(h.0, OUT_BASE, 8, back.as_mut_ptr());
        assert_eq!(back, [0x55; 8]);

        assert_eq!(simx_init(h.0, ptr::null(), 1, 1, 1), 0);
        simx_write_mem(h.0, u64::from(u32::MAX) - 3, 8, data.as_ptr());
        simx_read_memory(h.0, u64::from(u32::MAX) - 3, 8, back.as_mut_ptr());
        assert_eq!(back, [0x55; 8]);

        simx_write_mem(h.0, OUT_BASE, 8, ptr::null());
        simx_read_memory(h.0, OUT_BASE, 8, ptr::null_mut());
        simx_write_mem(h.0, OUT_BASE, 0, data.as_ptr());
        simx_read_memory(h.0, OUT_BASE, 8, back.as_mut_ptr());
    }
    assert_eq!(back, [0; 8]);
}

#[test]
fn test_cleanup_keeps_handle_usable() {
    let h = Handle::new();
    let (_file, path) = kernel_file(&squares_kernel(OUT_BASE as u32).to_bytes());
    unsafe {
        assert_eq!(simx_init(h.0, path.as_ptr(), 1, 4, 32), 0);
        simx_cleanup(h.0);
        simx_cleanup(h.0);
        assert_eq!(simx_step(h.0, 100), 0);
        assert_eq!(simx_init(h.0, path.as_ptr(), 1, 4, 32), 0);
        assert_eq!(simx_step(h.0, 0), 0);
        assert_eq!(simx_exit_code(h.0), 32);
    }
    let mut word = [0u8; 4];
    unsafe { simx_read_memory(h.0, KERNEL_BASE, 4, word.as_mut_ptr()) };
    assert_ne!(word, [0; 4]);
}
