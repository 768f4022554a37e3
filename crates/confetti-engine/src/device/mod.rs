//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain) for a window
//! - creating a surface-less device and offscreen targets
//! - acquiring frames and providing encoders/views for rendering

mod context;
mod error;
mod frame;
mod headless;
mod init;
mod surface;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use headless::{HeadlessGpu, OffscreenTarget};
pub use init::GpuInit;
