use serde::{Serialize, Deserialize};
use uuid::Uuid;

/// One entry of the genres/platforms lists.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TagRecord {
    pub id: String,
    pub name: String,
}

impl TagRecord {
    /// A brand-new tag as the Add button creates it: fresh id, empty name.
    pub fn fresh() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: String::new(),
        }
    }
}

/// Wire shape of the mock endpoint response.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GameRecord {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub released: String,
    pub background_image: String,
    pub rating: f64,
    pub rating_top: i64,
    pub ratings_count: i64,
    pub reviews_count: i64,
    pub created_at: String,
    pub updated_at: String,
    pub genres: Vec<TagRecord>,
    pub platforms: Vec<TagRecord>,
}

/// Editable scalar state of the form.
///
/// Everything is kept as text: the inputs are text fields, and numeric
/// values are formatted exactly once when the record is loaded.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub released: String,
    pub background_image: String,
    pub rating: String,
    pub rating_top: String,
    pub ratings_count: String,
    pub reviews_count: String,
    pub created_at: String,
    pub updated_at: String,
}

impl FormFields {
    pub fn from_record(record: &GameRecord) -> Self {
        Self {
            id: record.id.clone(),
            slug: record.slug.clone(),
            name: record.name.clone(),
            released: record.released.clone(),
            background_image: record.background_image.clone(),
            rating: record.rating.to_string(),
            rating_top: record.rating_top.to_string(),
            ratings_count: record.ratings_count.to_string(),
            reviews_count: record.reviews_count.to_string(),
            created_at: record.created_at.clone(),
            updated_at: record.updated_at.clone(),
        }
    }
}
