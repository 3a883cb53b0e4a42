use pretty_assertions::assert_eq;
use proptest::prelude::*;
use simx_core::common::AccessType;
use simx_core::common::error::MemoryError;
use simx_core::soc::memory::check_range;
use simx_core::{PhysicalMemory, Ram};

const CAPACITY: u64 = 1 << 20;

#[test]
fn test_untouched_memory_reads_zero() {
    let ram = Ram::new(CAPACITY);
    let mut buf = [0xAA; 64];
    ram.read(0x1234, &mut buf).unwrap();
    assert_eq!(buf, [0; 64]);
    assert_eq!(ram.resident_pages(), 0);
}

#[test]
fn test_pages_allocated_on_write() {
    let mut ram = Ram::new(CAPACITY);
    ram.write_u32(0x10, 0xDEAD_BEEF).unwrap();
    ram.write_u8(0x20, 1).unwrap();
    assert_eq!(ram.resident_pages(), 1);
    ram.write_u8(0x8_0000, 1).unwrap();
    assert_eq!(ram.resident_pages(), 2);
}

#[test]
fn test_write_spanning_pages() {
    let mut ram = Ram::with_page_size(CAPACITY, 16);
    let data: Vec<u8> = (0..40).collect();
    ram.write(10, &data).unwrap();
    assert_eq!(ram.resident_pages(), 4);

    let mut back = vec![0; 40];
    ram.read(10, &mut back).unwrap();
    assert_eq!(back, data);

    // Bytes around the write were never touched.
    assert_eq!(ram.read_u8(9).unwrap(), 0);
    assert_eq!(ram.read_u8(50).unwrap(), 0);
}

#[test]
fn test_little_endian_helpers() {
    let mut ram = Ram::new(CAPACITY);
    ram.write_u32(0x100, 0x1122_3344).unwrap();
    assert_eq!(ram.read_u8(0x100).unwrap(), 0x44);
    assert_eq!(ram.read_u16(0x102).unwrap(), 0x1122);
    ram.write_u16(0x104, 0xBEEF).unwrap();
    assert_eq!(ram.read_u32(0x104).unwrap(), 0x0000_BEEF);
}

#[test]
fn test_access_ending_at_capacity() {
    let mut ram = Ram::new(CAPACITY);
    ram.write_u32(CAPACITY - 4, 7).unwrap();
    assert_eq!(ram.read_u32(CAPACITY - 4).unwrap(), 7);
    ram.write(CAPACITY, &[]).unwrap();
}

#[test]
fn test_out_of_range_write_changes_nothing() {
    let mut ram = Ram::new(CAPACITY);
    let err = ram.write(CAPACITY - 2, &[1, 2, 3, 4]).unwrap_err();
    assert_eq!(
        err,
        MemoryError::OutOfRange {
            access: AccessType::Write,
            addr: CAPACITY - 2,
            len: 4,
            capacity: CAPACITY,
        }
    );
    assert_eq!(ram.resident_pages(), 0);
}

#[test]
fn test_out_of_range_read() {
    let ram = Ram::new(CAPACITY);
    let mut buf = [0; 8];
    let err = ram.read(CAPACITY, &mut buf).unwrap_err();
    assert!(matches!(
        err,
        MemoryError::OutOfRange {
            access: AccessType::Read,
            ..
        }
    ));
}

#[test]
fn test_check_range_overflow() {
    assert!(check_range(AccessType::Read, u64::MAX, 2, u64::MAX).is_err());
    assert!(check_range(AccessType::Read, 0, 0, 0).is_ok());
    assert!(check_range(AccessType::Fetch, 0, 1, 0).is_err());
}

#[test]
fn test_clear_releases_pages() {
    let mut ram = Ram::new(CAPACITY);
    ram.write_u32(0, 5).unwrap();
    ram.clear();
    assert_eq!(ram.resident_pages(), 0);
    assert_eq!(ram.read_u32(0).unwrap(), 0);
}

#[test]
fn test_full_address_space_is_sparse() {
    let mut ram = Ram::new(1 << 32);
    ram.write_u32(0xFFFF_FFFC, 0xCAFE_F00D).unwrap();
    ram.write_u32(0x8000_0000, 0x0000_0013).unwrap();
    assert_eq!(ram.read_u32(0xFFFF_FFFC).unwrap(), 0xCAFE_F00D);
    assert_eq!(ram.resident_pages(), 2);
}

proptest! {
    #[test]
    fn prop_write_then_read_matches(
        addr in 0u64..CAPACITY - 256,
        data in proptest::collection::vec(any::<u8>(), 1..256),
        page_shift in 4u32..13,
    ) {
        let mut ram = Ram::with_page_size(CAPACITY, 1 << page_shift);
        ram.write(addr, &data).unwrap();
        let mut back = vec![0; data.len()];
        ram.read(addr, &mut back).unwrap();
        prop_assert_eq!(back, data);
    }
}
