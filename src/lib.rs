//! Departmental salary calculation engine
//!
//! This crate computes per-employee salary components for a pay period:
//! grade and age based base pay, period allowances, business-trip pay, and
//! time-based premiums for overtime, rest-day and night work derived from
//! half-hour-bucketed attendance. Results are written back through a
//! [`store::DataStore`] as one row per employee and period.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;
