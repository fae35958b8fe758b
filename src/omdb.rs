use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{AppError, AppResult},
    models::{ExternalMovieRecord, SearchHit, SearchResponse},
};

pub struct OmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String) -> Self {
        if api_key.trim().is_empty() {
            tracing::warn!("Using mock OMDb data - no OMDB_API_KEY provided");
        }
        Self { client, api_key, base_url }
    }

    fn is_mock(&self) -> bool {
        self.api_key.trim().is_empty()
    }

    /// Movies whose title matches `title`, in OMDb's search envelope.
    pub async fn search_by_title(&self, title: &str) -> AppResult<SearchResponse> {
        if self.is_mock() {
            return Ok(mock_search());
        }

        debug!(title = %title, "searching OMDb");
        let resp: SearchResponse = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("type", "movie"), ("s", title)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(title = %title, hits = resp.search.len(), total = ?resp.total_results, "OMDb search done");
        Ok(resp)
    }

    pub async fn fetch_by_id(&self, imdb_id: &str) -> AppResult<ExternalMovieRecord> {
        if self.is_mock() {
            return Ok(mock_record());
        }

        debug!(imdb_id = %imdb_id, "fetching OMDb movie details");
        let resp: LookupResponse = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("i", imdb_id)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if resp.response.as_deref().is_some_and(|r| r.eq_ignore_ascii_case("False")) {
            debug!(imdb_id = %imdb_id, error = ?resp.error, "OMDb has no such movie");
            return Err(AppError::not_found("Movie", imdb_id));
        }
        debug!(imdb_id = %imdb_id, title = ?resp.record.title, year = ?resp.record.year, "fetched OMDb movie");
        Ok(resp.record)
    }
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(flatten)]
    record: ExternalMovieRecord,
}

const MOCK_POSTER: &str =
    "https://m.media-amazon.com/images/M/MV5BMjAxMzY3NjcxNF5BMl5BanBnXkFtZTcwNTI5OTM0Mw@@._V1_SX300.jpg";

fn mock_search() -> SearchResponse {
    SearchResponse {
        search: vec![SearchHit {
            title: "Inception".to_string(),
            year: "2010".to_string(),
            imdb_id: "tt1375666".to_string(),
            kind: "movie".to_string(),
            poster: Some(MOCK_POSTER.to_string()),
        }],
        total_results: Some("1".to_string()),
        response: "True".to_string(),
    }
}

fn mock_record() -> ExternalMovieRecord {
    ExternalMovieRecord {
        imdb_id: Some("tt1375666".to_string()),
        title: Some("Inception".to_string()),
        year: Some("2010".to_string()),
        rating: Some("8.8".to_string()),
        released: Some("16 Jul 2010".to_string()),
        runtime: Some("148 min".to_string()),
        genre: Some("Action, Adventure, Sci-Fi".to_string()),
        actors: Some("Leonardo DiCaprio, Joseph Gordon-Levitt, Elliot Page".to_string()),
        plot: Some(
            "A thief who steals corporate secrets through the use of dream-sharing technology \
             is given the inverse task of planting an idea into the mind of a C.E.O."
                .to_string(),
        ),
        poster: Some(MOCK_POSTER.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_client() -> OmdbClient {
        OmdbClient::new(reqwest::Client::new(), String::new(), "http://127.0.0.1:9".to_string())
    }

    #[tokio::test]
    async fn mock_mode_serves_fixed_data_without_network() {
        let client = mock_client();

        let search = client.search_by_title("anything").await.unwrap();
        assert_eq!(search.response, "True");
        assert_eq!(search.search[0].imdb_id, "tt1375666");

        let record = client.fetch_by_id("tt1375666").await.unwrap();
        assert_eq!(record.title.as_deref(), Some("Inception"));
        assert_eq!(record.released.as_deref(), Some("16 Jul 2010"));
    }

    #[test]
    fn lookup_envelope_exposes_record_fields() {
        let json = r#"{
            "Title": "The Matrix", "Year": "1999", "Released": "31 Mar 1999",
            "Runtime": "136 min", "Genre": "Action, Sci-Fi", "Actors": "Keanu Reeves",
            "Plot": "A hacker learns the truth.", "Poster": "N/A", "imdbRating": "8.7",
            "imdbID": "tt0133093", "Response": "True"
        }"#;
        let resp: LookupResponse = serde_json::from_str(json).unwrap();

        assert_eq!(resp.response.as_deref(), Some("True"));
        assert_eq!(resp.record.imdb_id.as_deref(), Some("tt0133093"));
        assert_eq!(resp.record.rating.as_deref(), Some("8.7"));
        assert_eq!(resp.record.runtime.as_deref(), Some("136 min"));
    }

    #[test]
    fn lookup_envelope_for_unknown_id_has_no_record_fields() {
        let resp: LookupResponse =
            serde_json::from_str(r#"{"Response":"False","Error":"Incorrect IMDb ID."}"#).unwrap();

        assert_eq!(resp.error.as_deref(), Some("Incorrect IMDb ID."));
        assert!(resp.record.title.is_none());
        assert!(resp.record.released.is_none());
    }
}
