//! GPU device + surface for the window.
//!
//! [`Gpu`] owns the wgpu device, queue and surface. Frame acquisition hands
//! out a [`GpuFrame`]; acquisition failures map to a [`SurfaceErrorAction`].

mod context;
mod init;
mod surface;

pub use context::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
