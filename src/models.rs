use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Closed set of genres. Declaration order is canonical: listings and lookups walk `ALL`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Genre {
    Action,
    Comedy,
    Drama,
    Horror,
    Romance,
    SciFi,
    Documentary,
    Thriller,
    Animation,
    Fantasy,
    Adventure,
}

impl Genre {
    pub const ALL: [Genre; 11] = [
        Genre::Action,
        Genre::Comedy,
        Genre::Drama,
        Genre::Horror,
        Genre::Romance,
        Genre::SciFi,
        Genre::Documentary,
        Genre::Thriller,
        Genre::Animation,
        Genre::Fantasy,
        Genre::Adventure,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Genre::Action => "ACTION",
            Genre::Comedy => "COMEDY",
            Genre::Drama => "DRAMA",
            Genre::Horror => "HORROR",
            Genre::Romance => "ROMANCE",
            Genre::SciFi => "SCI_FI",
            Genre::Documentary => "DOCUMENTARY",
            Genre::Thriller => "THRILLER",
            Genre::Animation => "ANIMATION",
            Genre::Fantasy => "FANTASY",
            Genre::Adventure => "ADVENTURE",
        }
    }

    /// Exact, case-sensitive match on the enum name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub id: String,
    pub title: String,
    #[serde(default, with = "dmy_date")]
    pub release_date: Option<Date>,
    pub rate: Option<f64>,
    pub casts: Option<String>,
    pub genre: Option<Genre>,
    pub duration: Option<i32>,
    pub poster: Option<String>,
    pub description: Option<String>,
}

impl Film {
    /// Merges a patch into this film. Absent fields keep their value, and a blank title never
    /// replaces the stored one.
    pub fn apply(self, patch: FilmPatch) -> Film {
        Film {
            id: self.id,
            title: patch.title.filter(|t| !t.trim().is_empty()).unwrap_or(self.title),
            release_date: patch.release_date.or(self.release_date),
            rate: patch.rate.or(self.rate),
            casts: patch.casts.or(self.casts),
            genre: patch.genre.or(self.genre),
            duration: patch.duration.or(self.duration),
            poster: patch.poster.or(self.poster),
            description: patch.description.or(self.description),
        }
    }
}

/// Create/update payload. Every field is optional and `None` means "leave unchanged".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilmPatch {
    pub title: Option<String>,
    #[serde(default, with = "dmy_date")]
    pub release_date: Option<Date>,
    pub rate: Option<f64>,
    pub casts: Option<String>,
    pub genre: Option<Genre>,
    pub duration: Option<i32>,
    pub poster: Option<String>,
    pub description: Option<String>,
}

/// Movie details as returned by OMDb's by-id lookup, before normalization.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ExternalMovieRecord {
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "imdbRating")]
    pub rating: Option<String>,
    #[serde(rename = "Released")]
    pub released: Option<String>,
    #[serde(rename = "Runtime")]
    pub runtime: Option<String>,
    #[serde(rename = "Genre")]
    pub genre: Option<String>,
    #[serde(rename = "Actors")]
    pub actors: Option<String>,
    #[serde(rename = "Plot")]
    pub plot: Option<String>,
    #[serde(rename = "Poster")]
    pub poster: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Poster")]
    pub poster: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "Search", default)]
    pub search: Vec<SearchHit>,
    #[serde(rename = "totalResults")]
    pub total_results: Option<String>,
    #[serde(rename = "Response")]
    pub response: String,
}

/// `dd-MM-yyyy` text for optional dates on the wire.
mod dmy_date {
    use jiff::civil::Date;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%d-%m-%Y";

    pub fn serialize<S: Serializer>(date: &Option<Date>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => s.serialize_str(&date.strftime(FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Date>, D::Error> {
        let Some(text) = Option::<String>::deserialize(d)? else {
            return Ok(None);
        };
        Date::strptime(FORMAT, text.trim()).map(Some).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn inception() -> Film {
        Film {
            id: "1".to_string(),
            title: "Inception".to_string(),
            release_date: Some(date(2010, 7, 16)),
            rate: Some(8.8),
            casts: Some("Leonardo DiCaprio".to_string()),
            genre: Some(Genre::SciFi),
            duration: Some(148),
            poster: Some("https://example.com/inception.jpg".to_string()),
            description: Some("A thief who steals corporate secrets.".to_string()),
        }
    }

    #[test]
    fn genre_names_round_trip_in_declared_order() {
        let names: Vec<_> = Genre::ALL.iter().map(|g| g.as_str()).collect();
        assert_eq!(
            names,
            [
                "ACTION", "COMEDY", "DRAMA", "HORROR", "ROMANCE", "SCI_FI", "DOCUMENTARY",
                "THRILLER", "ANIMATION", "FANTASY", "ADVENTURE",
            ]
        );
        for genre in Genre::ALL {
            assert_eq!(Genre::from_name(genre.as_str()), Some(genre));
        }
    }

    #[test]
    fn genre_lookup_is_case_sensitive() {
        assert_eq!(Genre::from_name("SCI_FI"), Some(Genre::SciFi));
        assert_eq!(Genre::from_name("sci_fi"), None);
        assert_eq!(Genre::from_name("Action"), None);
        assert_eq!(Genre::from_name("DOCUMENTARY"), Some(Genre::Documentary));
        assert_eq!(Genre::from_name("WESTERN"), None);
        assert_eq!(Genre::from_name("CRIME"), None);
    }

    #[test]
    fn genre_serializes_as_enum_name() {
        assert_eq!(serde_json::to_string(&Genre::SciFi).unwrap(), "\"SCI_FI\"");
    }

    #[test]
    fn empty_patch_leaves_film_unchanged() {
        let film = inception();
        assert_eq!(film.clone().apply(FilmPatch::default()), film);
    }

    #[test]
    fn patch_overwrites_only_present_fields() {
        let patch = FilmPatch { rate: Some(9.1), ..Default::default() };
        let updated = inception().apply(patch);

        assert_eq!(updated.rate, Some(9.1));
        assert_eq!(updated, Film { rate: Some(9.1), ..inception() });
    }

    #[test]
    fn each_patch_field_overwrites_only_itself() {
        let cases = [
            (
                FilmPatch { title: Some("Tenet".to_string()), ..Default::default() },
                Film { title: "Tenet".to_string(), ..inception() },
            ),
            (
                FilmPatch { release_date: Some(date(2020, 8, 26)), ..Default::default() },
                Film { release_date: Some(date(2020, 8, 26)), ..inception() },
            ),
            (
                FilmPatch { rate: Some(7.3), ..Default::default() },
                Film { rate: Some(7.3), ..inception() },
            ),
            (
                FilmPatch {
                    casts: Some("John David Washington".to_string()),
                    ..Default::default()
                },
                Film { casts: Some("John David Washington".to_string()), ..inception() },
            ),
            (
                FilmPatch { genre: Some(Genre::Thriller), ..Default::default() },
                Film { genre: Some(Genre::Thriller), ..inception() },
            ),
            (
                FilmPatch { duration: Some(150), ..Default::default() },
                Film { duration: Some(150), ..inception() },
            ),
            (
                FilmPatch {
                    poster: Some("https://example.com/tenet.jpg".to_string()),
                    ..Default::default()
                },
                Film { poster: Some("https://example.com/tenet.jpg".to_string()), ..inception() },
            ),
            (
                FilmPatch {
                    description: Some("Time runs backwards.".to_string()),
                    ..Default::default()
                },
                Film { description: Some("Time runs backwards.".to_string()), ..inception() },
            ),
        ];
        for (patch, expected) in cases {
            assert_eq!(inception().apply(patch.clone()), expected, "{patch:?}");
        }
    }

    #[test]
    fn blank_title_in_patch_is_ignored() {
        let patch = FilmPatch { title: Some("   ".to_string()), ..Default::default() };
        assert_eq!(inception().apply(patch).title, "Inception");

        let patch = FilmPatch { title: Some("Tenet".to_string()), ..Default::default() };
        assert_eq!(inception().apply(patch).title, "Tenet");
    }

    #[test]
    fn release_date_uses_day_month_year_on_the_wire() {
        let json = serde_json::to_value(inception()).unwrap();
        assert_eq!(json["release_date"], "16-07-2010");
        assert_eq!(json["genre"], "SCI_FI");

        let patch: FilmPatch =
            serde_json::from_str(r#"{"title":"Heat","release_date":"15-12-1995"}"#).unwrap();
        assert_eq!(patch.release_date, Some(date(1995, 12, 15)));
        assert_eq!(patch.rate, None);
    }

    #[test]
    fn patch_rejects_unknown_genre_and_bad_dates() {
        assert!(serde_json::from_str::<FilmPatch>(r#"{"genre":"WESTERN"}"#).is_err());
        assert!(serde_json::from_str::<FilmPatch>(r#"{"release_date":"1995-12-15"}"#).is_err());
    }

    #[test]
    fn search_response_tolerates_missing_hits() {
        let resp: SearchResponse =
            serde_json::from_str(r#"{"Response":"False","Error":"Movie not found!"}"#).unwrap();
        assert!(resp.search.is_empty());
        assert_eq!(resp.response, "False");
    }
}
