//! Exact route ordering for Wayfarer.
//!
//! This crate provides [`ExactSolver`], the default implementation of the
//! [`PathSolver`](wayfarer_core::PathSolver) trait, and [`TripPlanner`], which
//! drives a [`TripRequest`](wayfarer_core::TripRequest) through validation,
//! matrix construction, solving and assembly.
//!
//! Two strategies are available. When only a start and an end are fixed, the
//! interior is ordered by a Held–Karp dynamic programme. Any pin or precedence
//! rule, or a missing anchor, switches to an exhaustive permutation search over
//! the free nodes. Both are exact, so request sizes are bounded by
//! [`SolverLimits`].

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod held_karp;
mod planner;
mod search;
mod solver;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use planner::{PlanError, PlanOutcome, TripPlanner};
pub use solver::{ExactSolver, SolverLimits};
