//! Mapping from OMDb's loosely-typed movie details to a [`FilmPatch`].
//!
//! Each field has its own fallback: the release date is essential and fails hard, the runtime
//! falls back to a `0` sentinel, and genre and rating simply go missing.

use jiff::civil::Date;

use crate::{
    error::{AppError, AppResult},
    models::{ExternalMovieRecord, FilmPatch, Genre},
};

/// Duration reported when the runtime text carries no usable number.
pub const UNKNOWN_DURATION: i32 = 0;

const RELEASED_FORMAT: &str = "%d %b %Y";

pub fn normalize(record: &ExternalMovieRecord) -> AppResult<FilmPatch> {
    Ok(FilmPatch {
        title: record.title.clone(),
        release_date: Some(parse_released(record.released.as_deref())?),
        rate: parse_rating(record.rating.as_deref()),
        casts: record.actors.clone(),
        genre: parse_genre(record.genre.as_deref()),
        duration: Some(parse_runtime(record.runtime.as_deref())),
        poster: record.poster.clone(),
        description: record.plot.clone(),
    })
}

/// Minutes from runtime text such as `"148 min"`, taken from the first run of digits.
pub fn parse_runtime(runtime: Option<&str>) -> i32 {
    let Some(runtime) = runtime else {
        return UNKNOWN_DURATION;
    };
    let digits: String = runtime
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(UNKNOWN_DURATION)
}

/// Release date in OMDb's `"31 Mar 1999"` form.
pub fn parse_released(released: Option<&str>) -> AppResult<Date> {
    let released = released.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(|| {
        AppError::Format("Released date cannot be null or blank".to_string())
    })?;
    Date::strptime(RELEASED_FORMAT, released)
        .map_err(|err| AppError::Format(format!("Unparseable released date {released:?}: {err}")))
}

/// First token of a comma-separated genre list that names a known genre, scanning left to
/// right. `"Sci-Fi"` and `"sci fi"` both match `SCI_FI`.
pub fn parse_genre(genres: Option<&str>) -> Option<Genre> {
    genres?.split(',').find_map(|token| {
        let normalized = token.trim().to_uppercase().replace(['-', ' '], "_");
        Genre::from_name(&normalized)
    })
}

pub fn parse_rating(rating: Option<&str>) -> Option<f64> {
    let rating = rating.map(str::trim).filter(|s| !s.is_empty())?;
    if rating.eq_ignore_ascii_case("N/A") {
        return None;
    }
    rating.parse::<f64>().ok().filter(|r| r.is_finite())
}
