//! Energy and battery tender aggregation for UK and Welsh procurement APIs.
//!
//! Sources are polled, matched against [`domain::keywords`], normalized to
//! [`domain::NormalizedTender`] and written out as one JSON report.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod services;
pub mod sources;
