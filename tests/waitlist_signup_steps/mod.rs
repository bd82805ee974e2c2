//! Step definitions for waitlist signup scenarios.

pub mod world;
