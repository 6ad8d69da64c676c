//! Screen-time survey aggregates.
//!
//! [`data`] loads a survey file into an immutable [`data::Dataset`];
//! [`analysis`] derives the summary, distributions, grouped means and
//! correlation matrix that the viewer charts.

pub mod analysis;
pub mod config;
pub mod data;
