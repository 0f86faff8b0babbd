pub mod interrupt;
pub mod log;
