use simx_core::common::error::SimError;
use simx_core::config::Config;
use simx_core::core::warp::Warp;
use simx_core::{PhysicalMemory, Processor, ProcessorModel, Ram};

/// Base address test programs are placed at.
pub const PROGRAM_BASE: u64 = 0x8000_0000;

/// Scratch data area well clear of the program.
pub const DATA_BASE: u64 = 0x8001_0000;

/// Installs a test-writer subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("simx_core=debug")
        .with_test_writer()
        .try_init();
}

/// A processor attached to a sparse RAM, ready to run a program.
pub struct TestContext {
    pub processor: Processor,
    pub memory: Ram,
}

impl TestContext {
    /// Machine of `cores` x `warps` x `threads` over the default 4 GiB memory.
    pub fn new(cores: usize, warps: usize, threads: usize) -> Self {
        Self::with_config(&Config::with_machine(cores, warps, threads))
    }

    pub fn with_config(config: &Config) -> Self {
        init_tracing();
        let memory = Ram::with_page_size(config.memory.capacity, config.memory.page_size);
        let mut processor = Processor::new(config);
        processor.attach(&memory);
        Self { processor, memory }
    }

    /// Writes `program` at [`PROGRAM_BASE`] and resets the processor there.
    pub fn load_program(mut self, program: &[u32]) -> Self {
        for (i, word) in program.iter().enumerate() {
            self.memory
                .write_u32(PROGRAM_BASE + 4 * i as u64, *word)
                .unwrap();
        }
        self.processor.reset(PROGRAM_BASE);
        self
    }

    /// Ticks until the program stops, panicking after `max_cycles`.
    pub fn run(&mut self, max_cycles: u64) -> Result<(), SimError> {
        for _ in 0..max_cycles {
            if !self.processor.tick(&mut self.memory)? {
                return Ok(());
            }
        }
        panic!("program still running after {max_cycles} cycles");
    }

    pub fn warp(&self, core: usize, warp: usize) -> &Warp {
        self.processor.warp(core, warp).unwrap()
    }

    /// Register `reg` of lane `thread` in warp `warp` of core 0.
    pub fn reg(&self, warp: usize, thread: usize, reg: usize) -> u32 {
        self.warp(0, warp).reg(thread, reg)
    }

    pub fn read_word(&self, addr: u64) -> u32 {
        self.memory.read_u32(addr).unwrap()
    }
}
