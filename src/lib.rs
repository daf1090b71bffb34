pub mod app;
pub mod camera;
pub mod config;
pub mod logging;
pub mod vulkan;
