//! Airbnb Listings Dashboard
//!
//! Loads a CSV of Airbnb listings, cleans and filters it, and derives the
//! data behind the dashboard charts.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod stats;
pub mod view;
