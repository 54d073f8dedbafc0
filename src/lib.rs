//! # Padel Planner Library
//!
//! This library provides the core logic for planning a small padel club's
//! weekly 2v2 matches. Players mark their availability per week, the planner
//! proposes balanced teams from whoever has played least, results are
//! recorded, and play and win statistics are derived from the full history.
//!
//! Rendering, realtime sync and persistence backends are left to the
//! surrounding application; records move through the [`store::Store`] trait.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::similar_names)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::wildcard_imports)]

pub mod assignment;
pub mod availability;
pub mod config;
pub mod constants;
pub mod guests;
pub mod matches;
pub mod planner;
pub mod player;
pub mod results;
pub mod stats;
pub mod store;
pub mod week;

pub use config::Config;
pub use planner::Planner;
pub use player::Player;
pub use week::Week;
