// mesa/app/src/models/mod.rs

//! Rows read from and written to PostgreSQL, and the JSON shapes built from them.

pub mod order;
pub mod order_item;
pub mod product;
pub mod restaurant;

pub use order::{NewOrder, Order, OrderRestaurant, OrderRow, OrderSummary};
pub use order_item::{OrderItem, OrderItemDetails};
pub use product::{Product, ProductDetails, RestaurantBrand};
pub use restaurant::{Menu, MenuCategory, MenuSection, Restaurant};
