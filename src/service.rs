use std::sync::Arc;

use jiff::{Span, civil::Date};
use tracing::{debug, info};

use crate::{
    error::{AppError, AppResult},
    filter::{DateRange, FilmFilter, FilmQuery},
    ids::IdGenerator,
    models::{Film, FilmPatch},
    store::FilmStore,
};

#[derive(Clone)]
pub struct FilmService {
    store: FilmStore,
    ids: Arc<dyn IdGenerator>,
}

impl FilmService {
    pub fn new(store: FilmStore, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }

    pub async fn all_films(&self) -> AppResult<Vec<Film>> {
        self.store.find_all().await
    }

    pub async fn add_film(&self, patch: FilmPatch) -> AppResult<Film> {
        let Some(title) = patch.title.clone().filter(|t| !t.trim().is_empty()) else {
            return Err(AppError::Validation("Title cannot be null or blank.".to_string()));
        };

        let film = Film {
            id: self.ids.generate_id(),
            title,
            release_date: patch.release_date,
            rate: patch.rate,
            casts: patch.casts,
            genre: patch.genre,
            duration: patch.duration,
            poster: patch.poster,
            description: patch.description,
        };
        info!(id = %film.id, title = %film.title, "adding film");
        self.store.save(film).await
    }

    pub async fn film_by_id(&self, id: &str) -> AppResult<Film> {
        self.store.find_by_id(id).await?.ok_or_else(|| AppError::not_found("Film", id))
    }

    pub async fn update_film(&self, id: &str, patch: FilmPatch) -> AppResult<Film> {
        let existing = self.film_by_id(id).await?;
        debug!(id = %id, "updating film");
        self.store.save(existing.apply(patch)).await
    }

    pub async fn delete_film(&self, id: &str) -> AppResult<()> {
        if !self.store.exists_by_id(id).await? {
            return Err(AppError::not_found("Film", id));
        }
        info!(id = %id, "deleting film");
        self.store.delete_by_id(id).await
    }

    pub async fn films_by_filter(
        &self,
        filter: &FilmFilter,
        current_year: i16,
    ) -> AppResult<Vec<Film>> {
        let query = filter.resolve(current_year)?;
        self.store.find_by_query(&query).await
    }

    /// Posters of films released within a month either side of `today`.
    pub async fn homepage_images(&self, today: Date) -> AppResult<Vec<String>> {
        let month = Span::new().months(1);
        let window = DateRange { start: today.checked_sub(month)?, end: today.checked_add(month)? };

        let films = self.store.find_by_query(&FilmQuery::Released(window)).await?;
        Ok(films.into_iter().filter_map(|f| f.poster).collect())
    }
}
