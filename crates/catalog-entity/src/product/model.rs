//! Product entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A row of `"SalesLT"."Product"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    /// Primary key.
    #[serde(rename = "ProductID")]
    #[sqlx(rename = "ProductID")]
    pub product_id: i32,
    /// Product name.
    #[serde(rename = "Name")]
    #[sqlx(rename = "Name")]
    pub name: String,
    /// Unique product number.
    #[serde(rename = "ProductNumber")]
    #[sqlx(rename = "ProductNumber")]
    pub product_number: String,
    #[serde(rename = "Color")]
    #[sqlx(rename = "Color")]
    pub color: Option<String>,
    /// Cost to produce.
    #[serde(rename = "StandardCost")]
    #[sqlx(rename = "StandardCost")]
    pub standard_cost: Option<f64>,
    /// Selling price.
    #[serde(rename = "ListPrice")]
    #[sqlx(rename = "ListPrice")]
    pub list_price: f64,
    #[serde(rename = "Size")]
    #[sqlx(rename = "Size")]
    pub size: Option<String>,
    #[serde(rename = "Weight")]
    #[sqlx(rename = "Weight")]
    pub weight: Option<f64>,
    /// Reference to `ProductCategory`.
    #[serde(rename = "ProductCategoryID")]
    #[sqlx(rename = "ProductCategoryID")]
    pub product_category_id: Option<i32>,
    /// Reference to `ProductModel`.
    #[serde(rename = "ProductModelID")]
    #[sqlx(rename = "ProductModelID")]
    pub product_model_id: Option<i32>,
    /// When the product went on sale.
    #[serde(rename = "SellStartDate")]
    #[sqlx(rename = "SellStartDate")]
    pub sell_start_date: DateTime<Utc>,
    /// When the product stopped being sold.
    #[serde(rename = "SellEndDate")]
    #[sqlx(rename = "SellEndDate")]
    pub sell_end_date: Option<DateTime<Utc>>,
    /// When the product was discontinued.
    #[serde(rename = "DiscontinuedDate")]
    #[sqlx(rename = "DiscontinuedDate")]
    pub discontinued_date: Option<DateTime<Utc>>,
    /// Thumbnail file name.
    #[serde(rename = "ThumbnailPhotoFileName")]
    #[sqlx(rename = "ThumbnailPhotoFileName")]
    pub thumbnail_photo_file_name: Option<String>,
    /// Row identity used by replication.
    pub rowguid: Uuid,
    /// Last modification time.
    #[serde(rename = "ModifiedDate")]
    #[sqlx(rename = "ModifiedDate")]
    pub modified_date: DateTime<Utc>,
}

impl Product {
    /// Overwrite the fields present in `changes`, leaving all others untouched.
    pub fn apply(&mut self, changes: &ProductChanges) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(product_number) = &changes.product_number {
            self.product_number = product_number.clone();
        }
        if let Some(color) = &changes.color {
            self.color = color.clone();
        }
        if let Some(standard_cost) = changes.standard_cost {
            self.standard_cost = standard_cost;
        }
        if let Some(list_price) = changes.list_price {
            self.list_price = list_price;
        }
        if let Some(size) = &changes.size {
            self.size = size.clone();
        }
        if let Some(weight) = changes.weight {
            self.weight = weight;
        }
        if let Some(category_id) = changes.product_category_id {
            self.product_category_id = category_id;
        }
        if let Some(model_id) = changes.product_model_id {
            self.product_model_id = model_id;
        }
        if let Some(sell_start_date) = changes.sell_start_date {
            self.sell_start_date = sell_start_date;
        }
        if let Some(sell_end_date) = changes.sell_end_date {
            self.sell_end_date = sell_end_date;
        }
        if let Some(discontinued_date) = changes.discontinued_date {
            self.discontinued_date = discontinued_date;
        }
        if let Some(file_name) = &changes.thumbnail_photo_file_name {
            self.thumbnail_photo_file_name = file_name.clone();
        }
        if let Some(rowguid) = changes.rowguid {
            self.rowguid = rowguid;
        }
        self.modified_date = changes.modified_date;
    }
}

/// Data required to insert a product. Generated columns are already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Client-chosen primary key; `None` lets the database assign one.
    pub product_id: Option<i32>,
    pub name: String,
    pub product_number: String,
    pub color: Option<String>,
    pub standard_cost: Option<f64>,
    pub list_price: f64,
    pub size: Option<String>,
    pub weight: Option<f64>,
    pub product_category_id: Option<i32>,
    pub product_model_id: Option<i32>,
    pub sell_start_date: DateTime<Utc>,
    pub sell_end_date: Option<DateTime<Utc>>,
    pub discontinued_date: Option<DateTime<Utc>>,
    pub thumbnail_photo_file_name: Option<String>,
    pub rowguid: Uuid,
    pub modified_date: DateTime<Utc>,
}

impl NewProduct {
    /// Materialize the insert as a record with the given primary key.
    pub fn into_record(self, product_id: i32) -> Product {
        Product {
            product_id,
            name: self.name,
            product_number: self.product_number,
            color: self.color,
            standard_cost: self.standard_cost,
            list_price: self.list_price,
            size: self.size,
            weight: self.weight,
            product_category_id: self.product_category_id,
            product_model_id: self.product_model_id,
            sell_start_date: self.sell_start_date,
            sell_end_date: self.sell_end_date,
            discontinued_date: self.discontinued_date,
            thumbnail_photo_file_name: self.thumbnail_photo_file_name,
            rowguid: self.rowguid,
            modified_date: self.modified_date,
        }
    }
}

/// A partial product update.
///
/// The outer `Option` says whether the field was supplied; for nullable
/// columns the inner `Option` carries the new value, so `Some(None)`
/// clears the column. `modified_date` is always written.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub product_number: Option<String>,
    pub color: Option<Option<String>>,
    pub standard_cost: Option<Option<f64>>,
    pub list_price: Option<f64>,
    pub size: Option<Option<String>>,
    pub weight: Option<Option<f64>>,
    pub product_category_id: Option<Option<i32>>,
    pub product_model_id: Option<Option<i32>>,
    pub sell_start_date: Option<DateTime<Utc>>,
    pub sell_end_date: Option<Option<DateTime<Utc>>>,
    pub discontinued_date: Option<Option<DateTime<Utc>>>,
    pub thumbnail_photo_file_name: Option<Option<String>>,
    pub rowguid: Option<Uuid>,
    pub modified_date: DateTime<Utc>,
}

impl ProductChanges {
    /// A change set that only bumps `ModifiedDate`.
    pub fn touch(modified_date: DateTime<Utc>) -> Self {
        Self {
            name: None,
            product_number: None,
            color: None,
            standard_cost: None,
            list_price: None,
            size: None,
            weight: None,
            product_category_id: None,
            product_model_id: None,
            sell_start_date: None,
            sell_end_date: None,
            discontinued_date: None,
            thumbnail_photo_file_name: None,
            rowguid: None,
            modified_date,
        }
    }
}
