// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! GPU instanced boid-flock rendering built on wgpu.
//!
//! Flockvis is the rendering half of a GPU boids system: the flocking
//! simulation itself (neighbor queries, velocity integration, compute
//! dispatch) lives elsewhere and is consumed through the
//! [`sim::BoidSimulationSource`] trait. Each frame the renderer writes a
//! five-word indirect-argument record and issues exactly one
//! `draw_indexed_indirect` call that instances a mesh across every boid,
//! culled against the simulation's bounding region.
//!
//! # Key entry points
//!
//! - [`renderer::InstancedBoidRenderer`] - the per-frame indirect draw
//! - [`sim::BoidSimulationSource`] - the simulation collaborator contract
//! - [`material::BoidMaterial`] - pipeline + shader-input bindings
//! - [`options::Options`] - runtime configuration (render, camera)
//!
//! # Frame model
//!
//! Everything is single-threaded and frame-driven: the owning render loop
//! calls [`renderer::InstancedBoidRenderer::render_frame`] once per tick.
//! Missing configuration (no material, no source) degrades to a silent
//! no-op rather than interrupting the loop; device-level faults propagate
//! through wgpu to whatever owns the device.

pub mod camera;
pub mod error;
pub mod gpu;
pub mod material;
pub mod mesh;
pub mod options;
pub mod renderer;
pub mod sim;
#[cfg(feature = "viewer")]
pub mod viewer;
