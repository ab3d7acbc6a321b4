//! Groove Strata CLI library.
//!
//! This crate provides the file handling and reporting behind the `groove`
//! binary. All track semantics live in `groove-spec`.

pub mod commands;
pub mod input;
