pub(crate) mod camera;
pub mod config;
pub mod state;
