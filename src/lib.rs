// Library surface for the binary and for headless integration tests.
pub mod app;
pub mod app_dirs;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod input;
pub mod interrupt;
pub mod launcher;
pub mod matcher;
pub mod practice;
pub mod results;
pub mod screen;
pub mod session;
pub mod telemetry;
pub mod util;
