//! Blocking client for the Pennsieve research-data archive.
//!
//! Search published datasets, files and records through the Discover API
//! and bulk-download files through the zipit packaging service. Calls that
//! need an authenticated session go through an [`agent::Agent`] delegate:
//! the separately installed Pennsieve agent owns credentials and profiles,
//! this crate only drives it.

pub mod agent;
pub mod config;
pub mod discover;
pub mod domain;
pub mod error;
pub mod fs_util;
pub mod service;
pub mod zipit;
