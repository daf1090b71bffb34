pub mod debug;
pub mod instance;
pub mod support;

pub use instance::{Instance, InstanceCreateError};
