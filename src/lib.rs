//! Churnsim - synthetic SaaS revenue data and reports
//!
//! Generates a reproducible relational dataset for a subscription business
//! (customers, subscription lifecycles, product usage, sales touches) and
//! runs two reports over it: a high churn-risk list and a straight-line
//! MRR forecast.

pub mod config;
pub mod generator;
pub mod model;
pub mod reports;
pub mod sampling;
pub mod tables;
pub mod utils;
