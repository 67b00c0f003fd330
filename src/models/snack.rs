use serde::{Deserialize, Serialize};

/// A concession item. Unconstrained inventory; relevant to bookings only
/// as an additive price line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snack {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub description: String,
}

impl Snack {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        description: impl Into<String>,
    ) -> Self {
        Snack {
            id,
            name: name.into(),
            category: category.into(),
            price,
            description: description.into(),
        }
    }
}
