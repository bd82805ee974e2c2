//! Pre-launch waitlist signups.
//!
//! Visitors leave an email address and the role they expect to play in the
//! marketplace. Signups are keyed by email: a repeat signup overwrites the
//! role instead of creating a second entry.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
