use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "films")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    /// ISO `YYYY-MM-DD`, so range filters compare lexicographically.
    pub release_date: Option<String>,
    pub rate: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub casts: Option<String>,
    pub genre: Option<String>,
    pub duration: Option<i32>,
    pub poster: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
