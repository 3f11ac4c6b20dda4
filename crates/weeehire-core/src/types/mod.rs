//! Core types for WEEEHire

mod candidate;
mod recruiter;

pub use candidate::*;
pub use recruiter::*;
