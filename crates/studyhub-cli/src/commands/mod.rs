pub mod config;
pub mod goal;
pub mod log;
pub mod task;
pub mod theme;
pub mod timer;
