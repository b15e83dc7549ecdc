//! Loanbook - Peer-to-Peer Lending Service
//!
//! This crate implements the loan lifecycle engine: loans move through
//! proposed, approved, invested and disbursed states while investors fund
//! them up to, but never beyond, their principal.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
