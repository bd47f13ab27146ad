//! Core module has common/shared math and traits used by every geometric type in the kernel.
pub mod math;
pub mod traits;
