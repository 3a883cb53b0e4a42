//! Session and instance lifecycle.
//!
//! A [`Session`] owns at most one simulation instance: a machine configuration,
//! a physical memory and a processor attached to it. It provides:
//! 1. **Initialize:** Tear down any previous instance, validate the configuration, build
//!    a fresh memory/processor pair, attach them, and optionally load a program image.
//! 2. **Cleanup:** Destroy the pair; idempotent.
//! 3. **Inspection:** Borrow the configuration, memory and processor of the live instance.
//!
//! Stepping and the memory bridge are implemented on `Session` in their own modules.
//!
//! Instances are built through an [`InstanceFactory`], so the same lifecycle
//! drives the reference simulator ([`SimxFactory`]) or any other pair of
//! collaborators implementing [`ProcessorModel`] and [`PhysicalMemory`].

use simx_core::config::Config;
use simx_core::sim::loader::{self, ProgramImage};
use simx_core::soc::memory::Ram;
use simx_core::{PhysicalMemory, Processor, ProcessorModel};
use tracing::{debug, warn};

use crate::error::Result;

/// Constructs the collaborators of a simulation instance.
pub trait InstanceFactory {
    /// Physical memory type.
    type Memory: PhysicalMemory;
    /// Processor type.
    type Processor: ProcessorModel;

    /// Builds an empty memory for a validated configuration.
    fn create_memory(&mut self, config: &Config) -> Self::Memory;

    /// Builds an idle processor for a validated configuration.
    fn create_processor(&mut self, config: &Config) -> Self::Processor;
}

/// Factory for the reference simulator: a sparse [`Ram`] and a SIMT [`Processor`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SimxFactory;

impl InstanceFactory for SimxFactory {
    type Memory = Ram;
    type Processor = Processor;

    fn create_memory(&mut self, config: &Config) -> Ram {
        Ram::with_page_size(config.memory.capacity, config.memory.page_size)
    }

    fn create_processor(&mut self, config: &Config) -> Processor {
        Processor::new(config)
    }
}

/// A live simulation instance.
#[derive(Debug)]
pub(crate) struct Instance<P, M> {
    pub(crate) config: Config,
    pub(crate) processor: P,
    pub(crate) memory: M,
    pub(crate) exit_code: Option<u64>,
}

/// Owner of at most one simulation instance.
///
/// # Examples
///
/// ```
/// use simx_bridge::{Session, StepBudget, StepStatus};
/// use simx_core::Config;
///
/// let mut session = Session::new();
/// assert_eq!(session.step(StepBudget::RunToCompletion).unwrap(), StepStatus::Finished);
///
/// session.initialize(&Config::with_machine(1, 4, 32), None).unwrap();
/// assert!(session.is_initialized());
///
/// session.cleanup();
/// assert!(!session.is_initialized());
/// ```
pub struct Session<F: InstanceFactory = SimxFactory> {
    factory: F,
    pub(crate) instance: Option<Instance<F::Processor, F::Memory>>,
}

impl Session {
    /// Creates an empty session for the reference simulator.
    pub fn new() -> Self {
        Self::with_factory(SimxFactory)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: InstanceFactory> std::fmt::Debug for Session<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("initialized", &self.is_initialized())
            .field("config", &self.config())
            .finish_non_exhaustive()
    }
}

impl<F: InstanceFactory> Session<F> {
    /// Creates an empty session that builds instances with `factory`.
    pub fn with_factory(factory: F) -> Self {
        Self {
            factory,
            instance: None,
        }
    }

    /// Creates a fresh simulation instance, replacing any existing one.
    ///
    /// The previous instance is destroyed before the new configuration is
    /// even validated, so a failed call leaves the session empty rather than
    /// holding a stale machine.
    ///
    /// # Arguments
    ///
    /// * `config` - Machine shape, memory geometry and startup layout
    /// * `image` - Program to place in memory; raw images go to
    ///   `config.general.startup_addr`, ELF images to their segment addresses
    ///
    /// # Errors
    ///
    /// * [`BridgeError::Config`](crate::BridgeError::Config) if `config` is
    ///   invalid. No instance exists afterwards.
    /// * [`BridgeError::Image`](crate::BridgeError::Image) if the image cannot
    ///   be loaded. The instance exists, reset to the startup address, and
    ///   memory can still be populated through the bridge.
    pub fn initialize(&mut self, config: &Config, image: Option<&ProgramImage>) -> Result<()> {
        self.cleanup();
        config.validate()?;

        let mut memory = self.factory.create_memory(config);
        let mut processor = self.factory.create_processor(config);
        processor.attach(&memory);

        let startup = config.general.startup_addr;
        let loaded = image.map(|image| loader::load_image(image, &mut memory, startup));
        let entry = match &loaded {
            Some(Ok(image)) => image.entry,
            _ => startup,
        };
        processor.reset(entry);

        debug!(
            cores = config.machine.num_cores,
            warps = config.machine.num_warps,
            threads = config.machine.num_threads,
            capacity = config.memory.capacity,
            entry = format_args!("{entry:#x}"),
            "simulation instance created"
        );
        self.instance = Some(Instance {
            config: config.clone(),
            processor,
            memory,
            exit_code: None,
        });

        if let Some(Err(err)) = loaded {
            warn!(error = %err, "program image not loaded; instance kept");
            return Err(err.into());
        }
        Ok(())
    }

    /// Destroys the simulation instance, if any.
    ///
    /// Calling it on an empty session does nothing.
    pub fn cleanup(&mut self) {
        if self.instance.take().is_some() {
            debug!("simulation instance destroyed");
        }
    }

    /// Whether the session holds an instance.
    pub fn is_initialized(&self) -> bool {
        self.instance.is_some()
    }

    /// Configuration of the live instance.
    pub fn config(&self) -> Option<&Config> {
        self.instance.as_ref().map(|inst| &inst.config)
    }

    /// Processor of the live instance.
    pub fn processor(&self) -> Option<&F::Processor> {
        self.instance.as_ref().map(|inst| &inst.processor)
    }

    /// Memory of the live instance.
    pub fn memory(&self) -> Option<&F::Memory> {
        self.instance.as_ref().map(|inst| &inst.memory)
    }

    /// Exit code of the simulated program, once it has finished and reported one.
    ///
    /// A run to completion always records a code (zero if the program reported
    /// none); a bounded step records the code the processor reports.
    pub fn exit_code(&self) -> Option<u64> {
        self.instance.as_ref()?.exit_code
    }

    /// Factory used to build instances.
    pub fn factory(&self) -> &F {
        &self.factory
    }
}
