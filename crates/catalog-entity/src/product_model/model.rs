//! Product model entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A row of `"SalesLT"."ProductModel"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProductModel {
    /// Primary key.
    #[serde(rename = "ProductModelID")]
    #[sqlx(rename = "ProductModelID")]
    pub product_model_id: i32,
    /// Model name.
    #[serde(rename = "Name")]
    #[sqlx(rename = "Name")]
    pub name: String,
    /// Free-form catalog description.
    #[serde(rename = "Description")]
    #[sqlx(rename = "Description")]
    pub description: Option<String>,
    pub rowguid: Uuid,
    #[serde(rename = "ModifiedDate")]
    #[sqlx(rename = "ModifiedDate")]
    pub modified_date: DateTime<Utc>,
}

impl ProductModel {
    /// Overwrite the fields present in `changes`.
    pub fn apply(&mut self, changes: &ProductModelChanges) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        self.modified_date = changes.modified_date;
    }
}

/// Data required to insert a product model.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProductModel {
    pub name: String,
    pub description: Option<String>,
    pub rowguid: Uuid,
    pub modified_date: DateTime<Utc>,
}

impl NewProductModel {
    /// Materialize the insert as a record with the given primary key.
    pub fn into_record(self, product_model_id: i32) -> ProductModel {
        ProductModel {
            product_model_id,
            name: self.name,
            description: self.description,
            rowguid: self.rowguid,
            modified_date: self.modified_date,
        }
    }
}

/// A partial product model update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductModelChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub modified_date: DateTime<Utc>,
}
