use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set,
    sea_query::OnConflict,
};
use tracing::debug;

use crate::{
    entities::film,
    error::AppResult,
    filter::FilmQuery,
    models::{Film, Genre},
};

/// Film persistence over a sea-orm connection. Results come back in storage order.
#[derive(Clone)]
pub struct FilmStore {
    db: DatabaseConnection,
}

impl FilmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Film>> {
        let rows = film::Entity::find().all(&self.db).await?;
        Ok(rows.into_iter().map(Film::from).collect())
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Film>> {
        let row = film::Entity::find_by_id(id.to_string()).one(&self.db).await?;
        Ok(row.map(Film::from))
    }

    pub async fn exists_by_id(&self, id: &str) -> AppResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// Inserts the film, or replaces every column of the row with the same id.
    pub async fn save(&self, film: Film) -> AppResult<Film> {
        film::Entity::insert(active_model(&film))
            .on_conflict(
                OnConflict::column(film::Column::Id)
                    .update_columns([
                        film::Column::Title,
                        film::Column::ReleaseDate,
                        film::Column::Rate,
                        film::Column::Casts,
                        film::Column::Genre,
                        film::Column::Duration,
                        film::Column::Poster,
                        film::Column::Description,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        debug!(id = %film.id, "saved film");
        Ok(film)
    }

    pub async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        let result = film::Entity::delete_by_id(id.to_string()).exec(&self.db).await?;
        debug!(id = %id, rows = result.rows_affected, "deleted film");
        Ok(())
    }

    pub async fn find_by_query(&self, query: &FilmQuery) -> AppResult<Vec<Film>> {
        let rows = film::Entity::find().filter(condition(query)).all(&self.db).await?;
        debug!(query = ?query, matched = rows.len(), "ran film query");
        Ok(rows.into_iter().map(Film::from).collect())
    }
}

fn condition(query: &FilmQuery) -> Condition {
    let mut cond = Condition::all();
    if let Some(genre) = query.genre() {
        cond = cond.add(film::Column::Genre.eq(genre.as_str()));
    }
    if let Some(rate) = query.rate_above() {
        cond = cond.add(film::Column::Rate.gt(rate));
    }
    if let Some(range) = query.released() {
        cond = cond
            .add(film::Column::ReleaseDate.between(range.start.to_string(), range.end.to_string()));
    }
    cond
}

fn active_model(film: &Film) -> film::ActiveModel {
    film::ActiveModel {
        id: Set(film.id.clone()),
        title: Set(film.title.clone()),
        release_date: Set(film.release_date.map(|d| d.to_string())),
        rate: Set(film.rate),
        casts: Set(film.casts.clone()),
        genre: Set(film.genre.map(|g| g.as_str().to_string())),
        duration: Set(film.duration),
        poster: Set(film.poster.clone()),
        description: Set(film.description.clone()),
    }
}

impl From<film::Model> for Film {
    fn from(row: film::Model) -> Self {
        Film {
            id: row.id,
            title: row.title,
            release_date: row.release_date.and_then(|d| d.parse().ok()),
            rate: row.rate,
            casts: row.casts,
            genre: row.genre.and_then(|g| Genre::from_name(&g)),
            duration: row.duration,
            poster: row.poster,
            description: row.description,
        }
    }
}
