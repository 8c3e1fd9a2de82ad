// mesa/app/src/models/product.rs

use mesa::{CartProduct, CatalogProduct};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: Uuid,
  pub restaurant_id: Uuid,
  pub menu_category_id: Uuid,
  pub name: String,
  pub description: String,
  pub price: Decimal,
  pub image_url: String,
  pub ingredients: Vec<String>,
}

impl Product {
  pub fn to_catalog(&self) -> CatalogProduct {
    CatalogProduct {
      id: self.id,
      name: self.name.clone(),
      price: self.price,
    }
  }

  pub fn to_cart_product(&self) -> CartProduct {
    CartProduct {
      id: self.id,
      name: self.name.clone(),
      unit_price: self.price,
      image_url: self.image_url.clone(),
    }
  }
}

/// The owning restaurant's branding, shown in the product page header.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantBrand {
  pub slug: String,
  pub name: String,
  pub avatar_image_url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
  #[serde(flatten)]
  pub product: Product,
  pub restaurant: RestaurantBrand,
}

impl ProductDetails {
  /// Slugs compare without regard to case, folded the same way as `lower(slug)` in SQL.
  pub fn belongs_to(&self, slug: &str) -> bool {
    self.restaurant.slug.to_lowercase() == slug.to_lowercase()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn details_for(slug: &str) -> ProductDetails {
    ProductDetails {
      product: Product {
        id: Uuid::new_v4(),
        restaurant_id: Uuid::new_v4(),
        menu_category_id: Uuid::new_v4(),
        name: "Pastel".into(),
        description: String::new(),
        price: dec!(8.00),
        image_url: String::new(),
        ingredients: vec![],
      },
      restaurant: RestaurantBrand {
        slug: slug.into(),
        name: "Feira".into(),
        avatar_image_url: String::new(),
      },
    }
  }

  #[test]
  fn slug_match_folds_case_like_sql_lower() {
    assert!(details_for("acme").belongs_to("ACME"));
    assert!(details_for("café-central").belongs_to("CAFÉ-Central"));
    // Uppercasing would turn both into "STRASSE"; lowercasing keeps them apart.
    assert!(!details_for("straße").belongs_to("STRASSE"));
    assert!(!details_for("acme").belongs_to("acme2"));
  }
}
