// mesa/app/src/db/seed.rs

//! Demo data: restaurant `acme` with a small menu, inserted once.

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::Result;

pub const DEMO_SLUG: &str = "acme";

struct SeedProduct {
  name: &'static str,
  description: &'static str,
  price_cents: i64,
  image_url: &'static str,
  ingredients: &'static [&'static str],
}

const DEMO_MENU: &[(&str, &[SeedProduct])] = &[
  (
    "Combos",
    &[
      SeedProduct {
        name: "Classic Burger Combo",
        description: "Beef burger, fries and a soft drink.",
        price_cents: 3990,
        image_url: "https://cdn.example.com/acme/classic-combo.png",
        ingredients: &["Brioche bun", "Beef patty", "Cheddar", "Fries", "Soft drink"],
      },
      SeedProduct {
        name: "Chicken Combo",
        description: "Crispy chicken sandwich, fries and a soft drink.",
        price_cents: 3590,
        image_url: "https://cdn.example.com/acme/chicken-combo.png",
        ingredients: &["Sesame bun", "Breaded chicken", "Lettuce", "Fries", "Soft drink"],
      },
    ],
  ),
  (
    "Sides",
    &[
      SeedProduct {
        name: "Fries",
        description: "Salted potato fries.",
        price_cents: 1290,
        image_url: "https://cdn.example.com/acme/fries.png",
        ingredients: &["Potato", "Salt"],
      },
      SeedProduct {
        name: "Onion Rings",
        description: "Six battered onion rings.",
        price_cents: 1490,
        image_url: "https://cdn.example.com/acme/onion-rings.png",
        ingredients: &["Onion", "Batter"],
      },
    ],
  ),
  (
    "Drinks",
    &[SeedProduct {
      name: "Lemonade",
      description: "Freshly squeezed.",
      price_cents: 890,
      image_url: "https://cdn.example.com/acme/lemonade.png",
      ingredients: &["Lemon", "Sugar", "Water"],
    }],
  ),
];

/// Inserts the demo restaurant unless a restaurant with its slug already exists.
#[instrument(skip(pool))]
pub async fn seed_demo_restaurant(pool: &PgPool) -> Result<()> {
  let mut tx = pool.begin().await?;

  let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM restaurants WHERE lower(slug) = lower($1))")
    .bind(DEMO_SLUG)
    .fetch_one(&mut *tx)
    .await?;
  if exists {
    info!(slug = DEMO_SLUG, "Demo restaurant already present, skipping seed.");
    return Ok(());
  }

  let restaurant_id = Uuid::new_v4();
  sqlx::query(
    "INSERT INTO restaurants (id, slug, name, description, avatar_image_url, cover_image_url)
     VALUES ($1, $2, $3, $4, $5, $6)",
  )
  .bind(restaurant_id)
  .bind(DEMO_SLUG)
  .bind("Acme Burgers")
  .bind("Burgers, fries and lemonade since 1999.")
  .bind("https://cdn.example.com/acme/avatar.png")
  .bind("https://cdn.example.com/acme/cover.png")
  .execute(&mut *tx)
  .await?;

  let mut num_products = 0;
  for (category_name, products) in DEMO_MENU {
    let category_id = Uuid::new_v4();
    sqlx::query("INSERT INTO menu_categories (id, restaurant_id, name) VALUES ($1, $2, $3)")
      .bind(category_id)
      .bind(restaurant_id)
      .bind(*category_name)
      .execute(&mut *tx)
      .await?;

    for product in products.iter() {
      let ingredients: Vec<String> = product.ingredients.iter().map(|s| s.to_string()).collect();
      sqlx::query(
        "INSERT INTO products
           (id, restaurant_id, menu_category_id, name, description, price, image_url, ingredients)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
      )
      .bind(Uuid::new_v4())
      .bind(restaurant_id)
      .bind(category_id)
      .bind(product.name)
      .bind(product.description)
      .bind(Decimal::new(product.price_cents, 2))
      .bind(product.image_url)
      .bind(ingredients)
      .execute(&mut *tx)
      .await?;
      num_products += 1;
    }
  }

  tx.commit().await?;
  info!(slug = DEMO_SLUG, num_products, "Demo restaurant seeded.");
  Ok(())
}
