//! Product category entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A row of `"SalesLT"."ProductCategory"`.
///
/// Categories form a tree through `ParentProductCategoryID`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProductCategory {
    /// Primary key.
    #[serde(rename = "ProductCategoryID")]
    #[sqlx(rename = "ProductCategoryID")]
    pub product_category_id: i32,
    /// Parent category, `None` for a top-level category.
    #[serde(rename = "ParentProductCategoryID")]
    #[sqlx(rename = "ParentProductCategoryID")]
    pub parent_product_category_id: Option<i32>,
    /// Category name.
    #[serde(rename = "Name")]
    #[sqlx(rename = "Name")]
    pub name: String,
    pub rowguid: Uuid,
    /// Last modification time.
    #[serde(rename = "ModifiedDate")]
    #[sqlx(rename = "ModifiedDate")]
    pub modified_date: DateTime<Utc>,
}

impl ProductCategory {
    /// Whether this is a top-level category.
    pub fn is_root(&self) -> bool {
        self.parent_product_category_id.is_none()
    }

    /// Overwrite the fields present in `changes`.
    pub fn apply(&mut self, changes: &ProductCategoryChanges) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(parent) = changes.parent_product_category_id {
            self.parent_product_category_id = parent;
        }
        self.modified_date = changes.modified_date;
    }
}

/// Data required to insert a category.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProductCategory {
    pub parent_product_category_id: Option<i32>,
    pub name: String,
    pub rowguid: Uuid,
    pub modified_date: DateTime<Utc>,
}

impl NewProductCategory {
    /// Materialize the insert as a record with the given primary key.
    pub fn into_record(self, product_category_id: i32) -> ProductCategory {
        ProductCategory {
            product_category_id,
            parent_product_category_id: self.parent_product_category_id,
            name: self.name,
            rowguid: self.rowguid,
            modified_date: self.modified_date,
        }
    }
}

/// A partial category update; `Some(None)` on the parent detaches it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCategoryChanges {
    pub name: Option<String>,
    pub parent_product_category_id: Option<Option<i32>>,
    pub modified_date: DateTime<Utc>,
}
