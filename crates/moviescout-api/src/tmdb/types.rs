//! TMDB API response types and query parameters.

use serde::Deserialize;

/// Highest page number TMDB serves for list endpoints.
pub const MAX_PAGE: u32 = 500;

// --- Endpoints ---

/// List endpoint that returns a page of movie summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogEndpoint {
    /// Daily trending feed (`trending/movie/day`). Ignores the query text.
    Trending,
    /// Keyword search (`search/movie`).
    Search,
}

impl CatalogEndpoint {
    /// Returns the path relative to the API base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Trending => "trending/movie/day",
            Self::Search => "search/movie",
        }
    }
}

// --- Movie pages ---

/// Response from `trending/movie/*` and `search/movie`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MoviePage {
    /// Current page number.
    pub page: u32,
    /// Movie summaries on this page.
    pub results: Vec<MovieSummary>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results.
    pub total_results: u32,
}

impl MoviePage {
    /// Returns `true` when the page has no results.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Total page count usable for pagination (capped at [`MAX_PAGE`]).
    ///
    /// A page without results never advertises further pages.
    #[must_use]
    pub fn page_count(&self) -> u32 {
        if self.results.is_empty() && self.page <= 1 {
            return 0;
        }
        self.total_pages.min(MAX_PAGE)
    }
}

/// A single movie summary as listed on a result page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: String,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: String,
    /// Release date (YYYY-MM-DD, empty or null when unknown).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Adult flag.
    #[serde(default)]
    pub adult: bool,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

impl MovieSummary {
    /// Release year extracted from `release_date`, if present.
    #[must_use]
    pub fn release_year(&self) -> Option<&str> {
        release_year(self.release_date.as_deref())
    }
}

// --- Movie details ---

/// Response from `movie/{movie_id}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: String,
    /// Tagline.
    #[serde(default)]
    pub tagline: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<NamedEntry>,
    /// Release date (YYYY-MM-DD).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: String,
    /// Budget in USD (0 when unknown).
    #[serde(default)]
    pub budget: u64,
    /// Revenue in USD (0 when unknown).
    #[serde(default)]
    pub revenue: u64,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Production companies.
    #[serde(default)]
    pub production_companies: Vec<NamedEntry>,
    /// Official homepage.
    #[serde(default)]
    pub homepage: Option<String>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl MovieDetails {
    /// Release year extracted from `release_date`, if present.
    #[must_use]
    pub fn release_year(&self) -> Option<&str> {
        release_year(self.release_date.as_deref())
    }
}

/// Genre or production company entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NamedEntry {
    /// Entry ID.
    pub id: u64,
    /// Display name.
    pub name: String,
}

/// Returns the `YYYY` prefix of a `YYYY-MM-DD` date.
fn release_year(date: Option<&str>) -> Option<&str> {
    let date = date?;
    date.get(..4).filter(|y| y.chars().all(|c| c.is_ascii_digit()))
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[allow(dead_code)]
    #[serde(default)]
    pub success: bool,
}

// --- Query Parameters ---

/// Parameters for the movie list endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieQueryParams {
    /// Search query (ignored by the trending feed).
    pub query: String,
    /// Response language (default: "en-US").
    pub language: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Include adult content.
    pub include_adult: bool,
}

impl MovieQueryParams {
    /// Creates new params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: String::from("en-US"),
            page: 1,
            include_adult: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the page, clamped to `1..=MAX_PAGE`.
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.clamp(1, MAX_PAGE);
        self
    }

    /// Sets the adult content flag.
    #[must_use]
    pub const fn include_adult(mut self, include_adult: bool) -> Self {
        self.include_adult = include_adult;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_page_is_clamped() {
        // Arrange & Act
        let low = MovieQueryParams::new("x").page(0);
        let high = MovieQueryParams::new("x").page(9_999);

        // Assert
        assert_eq!(low.page, 1);
        assert_eq!(high.page, MAX_PAGE);
    }

    #[test]
    fn test_page_count_caps_at_max_page() {
        // Arrange
        let page = MoviePage {
            page: 1,
            results: vec![MovieSummary::default()],
            total_pages: 43_000,
            total_results: 860_000,
        };

        // Act & Assert
        assert_eq!(page.page_count(), MAX_PAGE);
    }

    #[test]
    fn test_empty_page_has_no_pages() {
        // Arrange
        let page = MoviePage {
            page: 1,
            results: Vec::new(),
            total_pages: 1,
            total_results: 0,
        };

        // Act & Assert
        assert!(page.is_empty());
        assert_eq!(page.page_count(), 0);
    }

    #[test]
    fn test_release_year() {
        // Arrange
        let dated = MovieSummary {
            release_date: Some(String::from("2010-07-15")),
            ..MovieSummary::default()
        };
        let blank = MovieSummary {
            release_date: Some(String::new()),
            ..MovieSummary::default()
        };

        // Act & Assert
        assert_eq!(dated.release_year(), Some("2010"));
        assert_eq!(blank.release_year(), None);
        assert_eq!(MovieSummary::default().release_year(), None);
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(CatalogEndpoint::Trending.path(), "trending/movie/day");
        assert_eq!(CatalogEndpoint::Search.path(), "search/movie");
    }
}
