//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 endpoints
//! and retrieves movie pages and movie details.

mod api;
mod client;
mod rate_limiter;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    CatalogEndpoint, MAX_PAGE, MovieDetails, MoviePage, MovieQueryParams, MovieSummary,
    NamedEntry, TmdbErrorResponse,
};

/// Base URL of the public TMDB website (used for "open in browser").
pub const TMDB_WEB_BASE_URL: &str = "https://www.themoviedb.org";
