//! Preference analysis and recommendation core for a personal media watchlist.
//!
//! Converts free-text content descriptions into embedding vectors, aggregates
//! a user's rated history into a weighted preference vector, and ranks catalog
//! items and a fixed tag vocabulary against that vector. The web/API layer,
//! auth, and the persistence schema live outside this crate and talk to it
//! through [`db::WatchlistStore`] and the service types in [`services`].

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod vector;

pub use config::Config;
pub use error::{AppError, AppResult};
