use pretty_assertions::assert_eq;
use rstest::rstest;
use simx_core::common::error::ConfigError;
use simx_core::config::{Config, MemoryConfig};

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.machine.num_cores, 1);
    assert_eq!(config.machine.num_warps, 4);
    assert_eq!(config.machine.num_threads, 4);
    assert_eq!(config.memory.capacity, 1 << 32);
    assert_eq!(config.memory.page_size, 4096);
    assert_eq!(config.general.startup_addr, 0x8000_0000);
    assert_eq!(config.general.stack_base, 0xFF00_0000);
    assert_eq!(config.general.stack_log2_size, 10);
    assert!(!config.general.trace_instructions);
    assert!(config.validate().is_ok());
}

#[test]
fn test_with_machine_keeps_other_defaults() {
    let config = Config::with_machine(2, 8, 32);
    assert_eq!(config.machine.total_threads(), 512);
    assert_eq!(config.general.startup_addr, 0x8000_0000);
    assert!(config.validate().is_ok());
}

#[test]
fn test_json_partial_document() {
    let config = Config::from_json(
        r#"{
            "machine": { "num_threads": 32 },
            "general": { "startup_addr": 4096, "trace_instructions": true }
        }"#,
    )
    .unwrap();
    assert_eq!(config.machine.num_cores, 1);
    assert_eq!(config.machine.num_warps, 4);
    assert_eq!(config.machine.num_threads, 32);
    assert_eq!(config.general.startup_addr, 4096);
    assert_eq!(config.general.stack_log2_size, 10);
    assert!(config.general.trace_instructions);
}

#[test]
fn test_json_empty_object_is_default() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.machine, Config::default().machine);
}

#[rstest]
#[case("not json")]
#[case(r#"{ "machine": { "num_cores": "two" } }"#)]
#[case(r#"{ "machine": { "num_cores": -1 } }"#)]
fn test_json_rejected(#[case] doc: &str) {
    assert!(matches!(Config::from_json(doc), Err(ConfigError::Parse(_))));
}

#[rstest]
#[case(0, 4, 4, "num_cores")]
#[case(1, 0, 4, "num_warps")]
#[case(1, 4, 0, "num_threads")]
fn test_zero_dimension_rejected(
    #[case] cores: usize,
    #[case] warps: usize,
    #[case] threads: usize,
    #[case] expected: &str,
) {
    match Config::with_machine(cores, warps, threads).validate() {
        Err(ConfigError::ZeroCount { field }) => assert_eq!(field, expected),
        other => panic!("expected ZeroCount, got {other:?}"),
    }
}

#[rstest]
#[case(1, 4, 33, "num_threads")]
#[case(1, 65, 4, "num_warps")]
#[case(1025, 4, 4, "num_cores")]
fn test_oversized_dimension_rejected(
    #[case] cores: usize,
    #[case] warps: usize,
    #[case] threads: usize,
    #[case] expected: &str,
) {
    match Config::with_machine(cores, warps, threads).validate() {
        Err(ConfigError::TooLarge { field, .. }) => assert_eq!(field, expected),
        other => panic!("expected TooLarge, got {other:?}"),
    }
}

#[test]
fn test_largest_shape_accepted() {
    assert!(Config::with_machine(1024, 64, 32).machine.validate().is_ok());
}

#[rstest]
#[case(0, 4096)]
#[case((1 << 32) + 1, 4096)]
#[case(1 << 20, 3)]
#[case(1 << 20, 0)]
fn test_memory_geometry_rejected(#[case] capacity: u64, #[case] page_size: u64) {
    let memory = MemoryConfig {
        capacity,
        page_size,
    };
    assert!(memory.validate().is_err());
}

#[rstest]
#[case(32)]
#[case(63)]
#[case(64)]
#[case(u32::MAX)]
fn test_oversized_stack_rejected(#[case] log2: u32) {
    let mut config = Config::default();
    config.general.stack_log2_size = log2;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidStackSize(v)) if v == log2
    ));
}

#[test]
fn test_largest_stack_accepted() {
    let config = Config::from_json(r#"{ "general": { "stack_log2_size": 31 } }"#).unwrap();
    assert!(config.validate().is_ok());
}

#[rstest]
#[case(1 << 32, 1 << 32)]
#[case(0x1_0000_0004, 1 << 32)]
#[case(0x8000_0000, 1 << 16)]
#[case(0x1_0000, 0x1_0000)]
fn test_startup_outside_memory_rejected(#[case] addr: u64, #[case] capacity: u64) {
    let mut config = Config::default();
    config.memory.capacity = capacity;
    config.general.startup_addr = addr;
    match config.validate() {
        Err(ConfigError::AddressOutOfRange { field, addr: a, capacity: c }) => {
            assert_eq!(field, "startup_addr");
            assert_eq!((a, c), (addr, capacity));
        }
        other => panic!("expected AddressOutOfRange, got {other:?}"),
    }
}

#[test]
fn test_startup_inside_small_memory_accepted() {
    let mut config = Config::default();
    config.memory.capacity = 1 << 16;
    config.general.startup_addr = 0xFFFC;
    assert!(config.validate().is_ok());
}

#[test]
fn test_stack_base_beyond_address_space_rejected() {
    let mut config = Config::default();
    config.general.stack_base = 1 << 32;
    match config.validate() {
        Err(ConfigError::TooLarge { field, .. }) => assert_eq!(field, "stack_base"),
        other => panic!("expected TooLarge, got {other:?}"),
    }
}

#[rstest]
#[case(1 << 16, 1 << 17)]
#[case(1 << 32, 1 << 25)]
#[case(1 << 32, 1 << 40)]
fn test_oversized_page_rejected(#[case] capacity: u64, #[case] page_size: u64) {
    let memory = MemoryConfig {
        capacity,
        page_size,
    };
    match memory.validate() {
        Err(ConfigError::TooLarge { field, .. }) => assert_eq!(field, "page_size"),
        other => panic!("expected TooLarge, got {other:?}"),
    }
}

#[rstest]
#[case(1 << 16, 1 << 16)]
#[case(1 << 32, 1 << 24)]
fn test_largest_page_accepted(#[case] capacity: u64, #[case] page_size: u64) {
    let memory = MemoryConfig {
        capacity,
        page_size,
    };
    assert!(memory.validate().is_ok());
}
