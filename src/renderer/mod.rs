//! The instanced boid draw pass and its supporting types.

/// Simulation-domain bounding region and the radius-only cube policy.
pub mod bounds;
/// Device-resident indirect draw argument record.
pub mod indirect;
/// The per-frame indirect instanced renderer.
pub mod instanced;

pub use bounds::BoundingRegion;
pub use indirect::IndirectDrawArgs;
pub use instanced::{InstancedBoidRenderer, RenderConfig};
