//! Unit tests for the waitlist module.
