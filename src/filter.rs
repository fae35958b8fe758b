use std::{fmt::Display, str::FromStr};

use jiff::civil::Date;
use serde::{Deserialize, Deserializer, de::Error};

use crate::{
    error::{AppError, AppResult},
    models::Genre,
};

/// First year a motion picture was recorded.
pub const EARLIEST_FILM_YEAR: i32 = 1888;

/// Raw filter criteria as they arrive on the query string. A blank parameter counts as absent.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FilmFilter {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub rate: Option<f64>,
}

fn blank_as_none<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let Some(text) = Option::<String>::deserialize(d)? else {
        return Ok(None);
    };
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse().map(Some).map_err(D::Error::custom)
}

/// Inclusive calendar range on the release date.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    pub fn year(year: i16) -> AppResult<Self> {
        Ok(Self { start: Date::new(year, 1, 1)?, end: Date::new(year, 12, 31)? })
    }
}

/// The single storage query a filter resolves to. Rate bounds are strict: `rate > threshold`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FilmQuery {
    All,
    Released(DateRange),
    Genre(Genre),
    RateAbove(f64),
    GenreReleased(Genre, DateRange),
    RateAboveReleased(f64, DateRange),
    GenreRateAbove(Genre, f64),
    GenreRateAboveReleased(Genre, f64, DateRange),
}

impl FilmQuery {
    pub fn compose(released: Option<DateRange>, genre: Option<Genre>, rate: Option<f64>) -> Self {
        match (released, genre, rate) {
            (Some(range), Some(genre), Some(rate)) => {
                Self::GenreRateAboveReleased(genre, rate, range)
            },
            (Some(range), Some(genre), None) => Self::GenreReleased(genre, range),
            (Some(range), None, Some(rate)) => Self::RateAboveReleased(rate, range),
            (None, Some(genre), Some(rate)) => Self::GenreRateAbove(genre, rate),
            (Some(range), None, None) => Self::Released(range),
            (None, Some(genre), None) => Self::Genre(genre),
            (None, None, Some(rate)) => Self::RateAbove(rate),
            (None, None, None) => Self::All,
        }
    }

    pub fn genre(&self) -> Option<Genre> {
        match *self {
            Self::Genre(genre)
            | Self::GenreReleased(genre, _)
            | Self::GenreRateAbove(genre, _)
            | Self::GenreRateAboveReleased(genre, _, _) => Some(genre),
            _ => None,
        }
    }

    pub fn rate_above(&self) -> Option<f64> {
        match *self {
            Self::RateAbove(rate)
            | Self::RateAboveReleased(rate, _)
            | Self::GenreRateAbove(_, rate)
            | Self::GenreRateAboveReleased(_, rate, _) => Some(rate),
            _ => None,
        }
    }

    pub fn released(&self) -> Option<DateRange> {
        match *self {
            Self::Released(range)
            | Self::GenreReleased(_, range)
            | Self::RateAboveReleased(_, range)
            | Self::GenreRateAboveReleased(_, _, range) => Some(range),
            _ => None,
        }
    }
}

impl FilmFilter {
    /// Validates year, then genre, then rate, and picks the storage query. The first invalid
    /// field fails the whole call.
    pub fn resolve(&self, current_year: i16) -> AppResult<FilmQuery> {
        let released = match self.year {
            Some(year) => {
                if year < EARLIEST_FILM_YEAR || year > i32::from(current_year) {
                    return Err(AppError::Validation(format!(
                        "Year must be between {EARLIEST_FILM_YEAR} and the current year: {year}"
                    )));
                }
                let year = i16::try_from(year)
                    .map_err(|_| AppError::Validation(format!("Year out of range: {year}")))?;
                Some(DateRange::year(year)?)
            },
            None => None,
        };

        let genre = match self.genre.as_deref() {
            Some(name) => Some(
                Genre::from_name(name)
                    .ok_or_else(|| AppError::Validation(format!("Invalid genre: {name}")))?,
            ),
            None => None,
        };

        if let Some(rate) = self.rate {
            if !(0.0..=10.0).contains(&rate) {
                return Err(AppError::Validation(format!(
                    "Rate must be between 0.0 and 10.0: {rate:?}"
                )));
            }
        }

        Ok(FilmQuery::compose(released, genre, self.rate))
    }
}
