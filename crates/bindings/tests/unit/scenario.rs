use pretty_assertions::assert_eq;
use rstest::rstest;
use simx_bridge::{StepBudget, StepStatus};
use simx_core::{Config, ProgramImage};

use crate::common::builder::program::{Program, squares_kernel, sum_kernel, A0, T0};
use crate::common::harness::{KERNEL_BASE, OUT_BASE, init_tracing, read_words, session_with};

fn squares() -> Vec<u32> {
    (0..32).map(|i| i * i).collect()
}

#[test]
fn test_harness_loads_kernel_through_memory_bridge() {
    init_tracing();
    let mut session = simx_bridge::Session::new();
    session
        .initialize(&Config::with_machine(1, 4, 32), None)
        .unwrap();
    session
        .write_memory(KERNEL_BASE, &squares_kernel(OUT_BASE as u32).to_bytes())
        .unwrap();

    let mut polls = 0;
    while session.step(StepBudget::from_raw(100)).unwrap().is_running() {
        polls += 1;
        assert!(polls < 1000, "kernel did not finish");
    }

    assert_eq!(read_words(&session, OUT_BASE, 32), squares());
    assert_eq!(session.exit_code(), Some(32));
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(7)]
#[case(100)]
fn test_bounded_steps_converge_with_single_run(#[case] budget: u64) {
    let image = squares_kernel(OUT_BASE as u32).to_image();

    let mut whole = session_with(1, 4, 32, &image);
    assert_eq!(whole.step(StepBudget::RunToCompletion).unwrap(), StepStatus::Finished);

    let mut stepped = session_with(1, 4, 32, &image);
    while stepped.step(StepBudget::from_raw(budget)).unwrap().is_running() {}

    assert_eq!(read_words(&stepped, OUT_BASE, 32), read_words(&whole, OUT_BASE, 32));
    assert_eq!(stepped.exit_code(), whole.exit_code());
    assert_eq!(
        stepped.processor().unwrap().stats().cycles,
        whole.processor().unwrap().stats().cycles
    );
}

#[test]
fn test_harness_patches_data_between_steps() {
    // Spins until the harness writes a non-zero word at OUT_BASE, then exits with it.
    let kernel = Program::new()
        .lui(T0, OUT_BASE as u32)
        .lw(A0, T0, 0)
        .beq(A0, 0, -4)
        .ecall();
    let mut session = session_with(1, 1, 1, &kernel.to_image());

    assert!(session.step(StepBudget::from_raw(50)).unwrap().is_running());
    session.write_memory(OUT_BASE, &9u32.to_le_bytes()).unwrap();
    assert_eq!(session.step(StepBudget::from_raw(50)).unwrap(), StepStatus::Finished);
    assert_eq!(session.exit_code(), Some(9));
}

#[test]
fn test_multi_core_machine() {
    let image = ProgramImage::from_bytes(sum_kernel(20).to_bytes());
    let mut session = session_with(4, 2, 4, &image);

    session.step(StepBudget::RunToCompletion).unwrap();

    assert_eq!(session.exit_code(), Some(210));
    let processor = session.processor().unwrap();
    assert_eq!(processor.cores().len(), 4);
}
