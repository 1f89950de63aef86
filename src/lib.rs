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
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Per-instance animation engine for an assembling / scattering tree scene.
//!
//! Thousands of small decorative instances (ornaments, gift boxes, stars,
//! candy canes, ribbon lights, ambient sparkles) either gather into a
//! spiral cone or drift apart into a spherical cloud. Every frame the
//! engine advances each instance toward its mode-dependent target and
//! writes the result into a GPU-friendly instance buffer, flagging the
//! buffer dirty only when something actually moved.
//!
//! # Key entry points
//!
//! - [`engine::TreeEngine`] - owns options, scene, mode switch and clock
//! - [`scene::Scene`] - arena of instance buffers plus their motion models
//! - [`scene::ModeSwitch`] - the assembled / scattered toggle
//! - [`animation`] - the motion models (targeted swirl integrator, ribbon
//!   reveal, ambient float, tree topper)
//! - [`dataset`] - startup-time target generation and ribbon path sampling
//! - [`options::Options`] - TOML-backed configuration
//!
//! # Architecture
//!
//! The scene owns every [`scene::InstanceBuffer`] in an arena indexed by
//! [`scene::GroupId`]. Motion models own only their per-instance state and
//! are handed `&mut InstanceBuffer` for the duration of a single update
//! call. After the update pass the scene submits each group to a
//! [`scene::RenderSurface`]; [`gpu::GpuInstanceUploader`] is the wgpu
//! implementation that re-uploads dirty groups.

pub mod animation;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod options;
pub mod scene;
pub mod util;
