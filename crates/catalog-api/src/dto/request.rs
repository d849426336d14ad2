//! Request DTOs with validation.
//!
//! Field names match the catalog column names on the wire.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use catalog_service::{
    CreateCategoryRequest, CreateModelRequest, CreateProductRequest, UpdateCategoryRequest,
    UpdateModelRequest, UpdateProductRequest,
};

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn max_len(value: &Option<Option<String>>, max: usize) -> bool {
    match value {
        Some(Some(s)) => s.chars().count() <= max,
        _ => true,
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Product creation body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProductCreate {
    #[serde(rename = "ProductID", default)]
    pub product_id: Option<i32>,
    #[serde(rename = "Name")]
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: String,
    #[serde(rename = "ProductNumber")]
    #[validate(length(min = 1, max = 50, message = "ProductNumber must be 1 to 50 characters"))]
    pub product_number: String,
    #[serde(rename = "Color", default)]
    #[validate(length(max = 50, message = "Color must be at most 50 characters"))]
    pub color: Option<String>,
    #[serde(rename = "StandardCost", default)]
    pub standard_cost: Option<f64>,
    #[serde(rename = "ListPrice")]
    pub list_price: f64,
    #[serde(rename = "Size", default)]
    #[validate(length(max = 50, message = "Size must be at most 50 characters"))]
    pub size: Option<String>,
    #[serde(rename = "Weight", default)]
    pub weight: Option<f64>,
    #[serde(rename = "ProductCategoryID", default)]
    pub product_category_id: Option<i32>,
    #[serde(rename = "ProductModelID", default)]
    pub product_model_id: Option<i32>,
    #[serde(rename = "SellStartDate", default)]
    pub sell_start_date: Option<String>,
    #[serde(rename = "SellEndDate", default)]
    pub sell_end_date: Option<String>,
    #[serde(rename = "DiscontinuedDate", default)]
    pub discontinued_date: Option<String>,
    #[serde(rename = "ThumbnailPhotoFileName", default)]
    #[validate(length(
        max = 255,
        message = "ThumbnailPhotoFileName must be at most 255 characters"
    ))]
    pub thumbnail_photo_file_name: Option<String>,
    #[serde(default)]
    pub rowguid: Option<Uuid>,
    #[serde(rename = "ModifiedDate", default)]
    pub modified_date: Option<String>,
}

impl From<ProductCreate> for CreateProductRequest {
    fn from(dto: ProductCreate) -> Self {
        Self {
            product_id: dto.product_id,
            name: dto.name,
            product_number: dto.product_number,
            color: dto.color,
            standard_cost: dto.standard_cost,
            list_price: dto.list_price,
            size: dto.size,
            weight: dto.weight,
            product_category_id: dto.product_category_id,
            product_model_id: dto.product_model_id,
            sell_start_date: dto.sell_start_date,
            sell_end_date: dto.sell_end_date,
            discontinued_date: dto.discontinued_date,
            thumbnail_photo_file_name: dto.thumbnail_photo_file_name,
            rowguid: dto.rowguid,
            modified_date: dto.modified_date,
        }
    }
}

/// Partial product update body.
///
/// Omitted fields are left alone. `null` clears a nullable column and is
/// ignored on a required one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "check_product_update_lengths"))]
pub struct ProductUpdate {
    #[serde(rename = "Name", default)]
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: Option<String>,
    #[serde(rename = "ProductNumber", default)]
    #[validate(length(min = 1, max = 50, message = "ProductNumber must be 1 to 50 characters"))]
    pub product_number: Option<String>,
    #[serde(rename = "Color", default, deserialize_with = "double_option")]
    pub color: Option<Option<String>>,
    #[serde(rename = "StandardCost", default, deserialize_with = "double_option")]
    pub standard_cost: Option<Option<f64>>,
    #[serde(rename = "ListPrice", default)]
    pub list_price: Option<f64>,
    #[serde(rename = "Size", default, deserialize_with = "double_option")]
    pub size: Option<Option<String>>,
    #[serde(rename = "Weight", default, deserialize_with = "double_option")]
    pub weight: Option<Option<f64>>,
    #[serde(rename = "ProductCategoryID", default, deserialize_with = "double_option")]
    pub product_category_id: Option<Option<i32>>,
    #[serde(rename = "ProductModelID", default, deserialize_with = "double_option")]
    pub product_model_id: Option<Option<i32>>,
    #[serde(rename = "SellStartDate", default)]
    pub sell_start_date: Option<String>,
    #[serde(rename = "SellEndDate", default, deserialize_with = "double_option")]
    pub sell_end_date: Option<Option<String>>,
    #[serde(rename = "DiscontinuedDate", default, deserialize_with = "double_option")]
    pub discontinued_date: Option<Option<String>>,
    #[serde(
        rename = "ThumbnailPhotoFileName",
        default,
        deserialize_with = "double_option"
    )]
    pub thumbnail_photo_file_name: Option<Option<String>>,
    #[serde(default)]
    pub rowguid: Option<Uuid>,
    #[serde(rename = "ModifiedDate", default)]
    pub modified_date: Option<String>,
}

fn check_product_update_lengths(update: &ProductUpdate) -> Result<(), ValidationError> {
    let checks = [
        ("Color", &update.color, 50),
        ("Size", &update.size, 50),
        ("ThumbnailPhotoFileName", &update.thumbnail_photo_file_name, 255),
    ];
    for (field, value, max) in checks {
        if !max_len(value, max) {
            return Err(ValidationError::new("length")
                .with_message(format!("{field} must be at most {max} characters").into()));
        }
    }
    Ok(())
}

impl From<ProductUpdate> for UpdateProductRequest {
    fn from(dto: ProductUpdate) -> Self {
        Self {
            name: dto.name,
            product_number: dto.product_number,
            color: dto.color,
            standard_cost: dto.standard_cost,
            list_price: dto.list_price,
            size: dto.size,
            weight: dto.weight,
            product_category_id: dto.product_category_id,
            product_model_id: dto.product_model_id,
            sell_start_date: dto.sell_start_date,
            sell_end_date: dto.sell_end_date,
            discontinued_date: dto.discontinued_date,
            thumbnail_photo_file_name: dto.thumbnail_photo_file_name,
            rowguid: dto.rowguid,
            modified_date: dto.modified_date,
        }
    }
}

/// Category creation body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryCreate {
    #[serde(rename = "Name")]
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: String,
    #[serde(rename = "ParentProductCategoryID", default)]
    pub parent_product_category_id: Option<i32>,
    #[serde(default)]
    pub rowguid: Option<Uuid>,
    #[serde(rename = "ModifiedDate", default)]
    pub modified_date: Option<String>,
}

impl From<CategoryCreate> for CreateCategoryRequest {
    fn from(dto: CategoryCreate) -> Self {
        Self {
            name: dto.name,
            parent_product_category_id: dto.parent_product_category_id,
            rowguid: dto.rowguid,
            modified_date: dto.modified_date,
        }
    }
}

/// Partial category update body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CategoryUpdate {
    #[serde(rename = "Name", default)]
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: Option<String>,
    #[serde(
        rename = "ParentProductCategoryID",
        default,
        deserialize_with = "double_option"
    )]
    pub parent_product_category_id: Option<Option<i32>>,
    #[serde(rename = "ModifiedDate", default)]
    pub modified_date: Option<String>,
}

impl From<CategoryUpdate> for UpdateCategoryRequest {
    fn from(dto: CategoryUpdate) -> Self {
        Self {
            name: dto.name,
            parent_product_category_id: dto.parent_product_category_id,
            modified_date: dto.modified_date,
        }
    }
}

/// Product model creation body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ModelCreate {
    #[serde(rename = "Name")]
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: String,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rowguid: Option<Uuid>,
    #[serde(rename = "ModifiedDate", default)]
    pub modified_date: Option<String>,
}

impl From<ModelCreate> for CreateModelRequest {
    fn from(dto: ModelCreate) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            rowguid: dto.rowguid,
            modified_date: dto.modified_date,
        }
    }
}

/// Partial product model update body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ModelUpdate {
    #[serde(rename = "Name", default)]
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: Option<String>,
    #[serde(rename = "Description", default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(rename = "ModifiedDate", default)]
    pub modified_date: Option<String>,
}

impl From<ModelUpdate> for UpdateModelRequest {
    fn from(dto: ModelUpdate) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            modified_date: dto.modified_date,
        }
    }
}
