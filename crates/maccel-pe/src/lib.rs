//! Silicon model for the maccel processing element (PE).
//!
//! This crate has **no dependencies** and **no simulator plumbing** — it is a
//! pure model of the PE cell: the signal-level port contract, the register
//! file, and the synchronous update committed at each rising clock edge.
//!
//! The PE is a single multiply-accumulate cell of the kind tiled into a
//! systolic array: a latched weight register feeds a two-stage compute/output
//! pipeline, both stages gated by an enable line and clearable by a
//! synchronous active-low reset.
//!
//! # Crate organisation
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`ports`] | Port contract — input lines, datapath width, pipeline latency |
//! | [`pe`] | Register file and the rising-edge update semantics |

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod pe;
pub mod ports;
