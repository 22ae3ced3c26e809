//! Movie catalog client library for moviescout.
//!
//! Provides the TMDB API v3 client used for the trending feed,
//! keyword search and movie details.

/// TMDB API client.
pub mod tmdb;
