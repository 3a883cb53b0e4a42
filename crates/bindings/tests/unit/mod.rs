/// C ABI entry points.
pub mod ffi;



/// End-to-end harness flows on the reference simulator.
pub mod scenario;
