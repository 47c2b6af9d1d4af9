use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of catalog item a result refers to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, DbEnum)]
#[ExistingTypePath = "crate::schema::sql_types::MediaType"]
pub enum MediaType {
    #[serde(rename = "movie")]
    #[db_rename = "movie"]
    Movie,
    #[serde(rename = "tv")]
    #[db_rename = "tv"]
    Tv,
    #[serde(rename = "anime")]
    #[db_rename = "anime"]
    Anime,
    #[serde(rename = "manga")]
    #[db_rename = "manga"]
    Manga,
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
            MediaType::Anime => "anime",
            MediaType::Manga => "manga",
        };
        write!(f, "{}", name)
    }
}
