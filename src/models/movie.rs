use serde::{Deserialize, Serialize};

use crate::domain::MovieId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub year: String,
}

impl From<crate::entities::movies::Model> for Movie {
    fn from(model: crate::entities::movies::Model) -> Self {
        Self {
            id: MovieId::new(model.id),
            title: model.title,
            year: model.year,
        }
    }
}
