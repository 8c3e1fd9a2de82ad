// mesa/app/src/models/restaurant.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::product::Product;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
  pub id: Uuid,
  pub slug: String,
  pub name: String,
  pub description: String,
  pub avatar_image_url: String,
  pub cover_image_url: String,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
  pub id: Uuid,
  pub restaurant_id: Uuid,
  pub name: String,
}

/// A category with its products, as rendered on the menu page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSection {
  #[serde(flatten)]
  pub category: MenuCategory,
  pub products: Vec<Product>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
  pub restaurant: Restaurant,
  pub consumption_method: mesa::ConsumptionMethod,
  pub categories: Vec<MenuSection>,
}
