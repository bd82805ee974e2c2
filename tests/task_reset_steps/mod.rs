//! Step definitions for task reset scenarios.

pub mod then;
pub mod when;
