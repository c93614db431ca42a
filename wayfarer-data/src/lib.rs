//! External data adapters for Wayfarer.
//!
//! The [`routing`] module talks to a point-to-point distance service over
//! HTTP and turns its answers into the travel matrices the solver consumes.

#![forbid(unsafe_code)]

pub mod routing;
