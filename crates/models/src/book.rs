use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A purchasable catalog item.
///
/// Books are immutable once created and the catalog exposes no remove
/// operation, so a book id stays resolvable for the life of the store.
/// `price` is a signed unit amount; zero and negative prices are
/// stored as given, without validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub price: i64,
}

impl Book {
    pub fn new(id: Uuid, title: impl Into<String>, price: i64) -> Self {
        Self {
            id,
            title: title.into(),
            price,
        }
    }
}
