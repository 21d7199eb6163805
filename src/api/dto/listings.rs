/*
 * Responsibility
 * - Listing request/response DTOs
 * - Turning requests into domain values (NewListing / ListingPatch), which is
 *   where field presence and price coercion are decided
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Category, Condition, ListingPatch, ListingStatus, ListingView, NewListing, Price,
};

pub const ALL_FIELDS_REQUIRED: &str = "All fields required";
pub const INVALID_PRICE: &str = "price must be a non-negative number";
pub const INVALID_CATEGORY: &str = "Invalid category";
pub const INVALID_CONDITION: &str = "Invalid condition";

/// Price as sent by clients: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl PriceInput {
    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }

    fn to_price(&self) -> Result<Price, &'static str> {
        let price = match self {
            Self::Number(n) => Price::new(*n),
            Self::Text(s) => Price::parse(s),
        };
        price.map_err(|_| INVALID_PRICE)
    }
}

fn present(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|s| !s.trim().is_empty())
}

// Enum fields arrive as text so that "" counts as missing, not as a bad variant.
#[derive(Debug, Default, Deserialize)]
pub struct CreateListingRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub price: Option<PriceInput>,
    pub images: Option<Vec<String>>,
}

impl CreateListingRequest {
    /// Validate and build the listing owned by `seller_id`.
    pub fn into_new_listing(self, seller_id: Uuid) -> Result<NewListing, &'static str> {
        let (Some(title), Some(description), Some(category), Some(condition), Some(price)) = (
            present(&self.title),
            present(&self.description),
            present(&self.category),
            present(&self.condition),
            self.price.as_ref().filter(|p| !p.is_blank()),
        ) else {
            return Err(ALL_FIELDS_REQUIRED);
        };

        let category: Category = category.trim().parse().map_err(|_| INVALID_CATEGORY)?;
        let condition: Condition = condition.trim().parse().map_err(|_| INVALID_CONDITION)?;

        Ok(NewListing {
            title: title.to_string(),
            description: description.to_string(),
            category,
            condition,
            price: price.to_price()?,
            images: self.images.unwrap_or_default(),
            seller_id,
            status: ListingStatus::default(),
        })
    }
}

/// Partial update. A missing or `null` field leaves the stored value alone;
/// a present field overwrites it (including `0` and `[]`).
#[derive(Debug, Default, Deserialize)]
pub struct UpdateListingRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub condition: Option<Condition>,
    pub price: Option<PriceInput>,
    pub images: Option<Vec<String>>,
    pub status: Option<ListingStatus>,
}

impl UpdateListingRequest {
    pub fn into_patch(self) -> Result<ListingPatch, &'static str> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("title cannot be empty");
        }
        if let Some(description) = &self.description
            && description.trim().is_empty()
        {
            return Err("description cannot be empty");
        }

        let price = self.price.as_ref().map(PriceInput::to_price).transpose()?;

        Ok(ListingPatch {
            title: self.title,
            description: self.description,
            category: self.category,
            condition: self.condition,
            price,
            images: self.images,
            status: self.status,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SellerResponse {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub condition: Condition,
    pub price: f64,
    pub images: Vec<String>,
    pub seller: SellerResponse,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ListingView> for ListingResponse {
    fn from(view: ListingView) -> Self {
        let ListingView { listing, seller } = view;
        Self {
            id: listing.id,
            title: listing.title,
            description: listing.description,
            category: listing.category,
            condition: listing.condition,
            price: listing.price.value(),
            images: listing.images,
            seller: SellerResponse {
                id: seller.id,
                name: seller.name,
                email: seller.email,
            },
            status: listing.status,
            created_at: listing.created_at,
            updated_at: listing.updated_at,
        }
    }
}
