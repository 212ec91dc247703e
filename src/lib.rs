//! spotcheck - scan directories for git repositories with uncommitted or
//! unpushed work.
//!
//! The pipeline is: resolve a [`config::ScanConfig`] from CLI args and the
//! config file, walk each target with [`scan::find_repos`], classify each
//! discovered working copy with [`git::classify_all`], and render the ordered
//! report with [`report::render`].

pub mod cli;
pub mod config;
pub mod git;
pub mod report;
pub mod scan;
