// mesa/app/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{cart_handlers, order_handlers, restaurant_handlers};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::scope("/restaurants/{slug}")
          .route("", web::get().to(restaurant_handlers::get_restaurant_handler))
          .route("/menu", web::get().to(restaurant_handlers::get_menu_handler))
          .route(
            "/products/{product_id}",
            web::get().to(restaurant_handlers::get_product_handler),
          )
          .route("/orders", web::post().to(order_handlers::place_order_handler)),
      )
      .service(
        web::scope("/carts")
          .route("", web::post().to(cart_handlers::open_cart_handler))
          .route("/{cart_id}", web::get().to(cart_handlers::get_cart_handler))
          .route("/{cart_id}/items", web::post().to(cart_handlers::add_to_cart_handler))
          .route(
            "/{cart_id}/items/{product_id}",
            web::delete().to(cart_handlers::remove_item_handler),
          )
          .route(
            "/{cart_id}/items/{product_id}/increase",
            web::post().to(cart_handlers::increase_item_handler),
          )
          .route(
            "/{cart_id}/items/{product_id}/decrease",
            web::post().to(cart_handlers::decrease_item_handler),
          )
          .route("/{cart_id}/toggle", web::post().to(cart_handlers::toggle_cart_handler)),
      )
      .route("/orders", web::get().to(order_handlers::list_orders_handler)),
  );
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_support::{seed_acme, test_state, InMemoryStore, RecordingCheckout};
  use actix_web::http::StatusCode;
  use actix_web::{test, App};
  use serde_json::{json, Value};
  use std::sync::Arc;

  macro_rules! init_app {
    ($state:expr) => {
      test::init_service(
        App::new()
          .app_data(web::Data::new($state.clone()))
          .configure(configure_app_routes),
      )
      .await
    };
  }

  #[actix_web::test]
  async fn health_is_ok() {
    let state = test_state(Arc::new(InMemoryStore::new()), Arc::new(RecordingCheckout::default()));
    let app = init_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[actix_web::test]
  async fn menu_requires_a_valid_consumption_method() {
    let store = Arc::new(InMemoryStore::new());
    seed_acme(&store);
    let state = test_state(store, Arc::new(RecordingCheckout::default()));
    let app = init_app!(state);

    for uri in [
      "/api/v1/restaurants/acme/menu",
      "/api/v1/restaurants/acme/menu?consumptionMethod=DELIVERY",
      "/api/v1/restaurants/acme/menu?consumptionMethod=%20DINE_IN",
      "/api/v1/restaurants/nowhere/menu?consumptionMethod=DINE_IN",
    ] {
      let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
      assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
    }

    let resp = test::call_service(
      &app,
      test::TestRequest::get()
        .uri("/api/v1/restaurants/ACME/menu?consumptionMethod=takeaway")
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["consumptionMethod"], "TAKEAWAY");
    assert_eq!(body["restaurant"]["slug"], "acme");
    assert_eq!(body["categories"][0]["products"].as_array().map(Vec::len), Some(2));
  }

  #[actix_web::test]
  async fn product_of_another_restaurant_is_not_found() {
    let store = Arc::new(InMemoryStore::new());
    let acme = seed_acme(&store);
    store.add_restaurant("other-place", "Other Place");
    let state = test_state(store, Arc::new(RecordingCheckout::default()));
    let app = init_app!(state);

    let resp = test::call_service(
      &app,
      test::TestRequest::get()
        .uri(&format!("/api/v1/restaurants/other-place/products/{}", acme.product_a.id))
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(
      &app,
      test::TestRequest::get()
        .uri(&format!("/api/v1/restaurants/Acme/products/{}", acme.product_a.id))
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "A");
    assert_eq!(body["restaurant"]["name"], "Acme Burgers");
  }

  #[actix_web::test]
  async fn cart_flow_over_http() {
    let store = Arc::new(InMemoryStore::new());
    let acme = seed_acme(&store);
    let state = test_state(store, Arc::new(RecordingCheckout::default()));
    let app = init_app!(state);

    let resp = test::call_service(&app, test::TestRequest::post().uri("/api/v1/carts").to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let cart_id = body["cartId"].as_str().unwrap().to_string();
    assert_eq!(body["isVisible"], false);

    for (product_id, quantity) in [(acme.product_a.id, 2), (acme.product_b.id, 1)] {
      let resp = test::call_service(
        &app,
        test::TestRequest::post()
          .uri(&format!("/api/v1/carts/{}/items", cart_id))
          .set_json(json!({"productId": product_id, "quantity": quantity}))
          .to_request(),
      )
      .await;
      assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = test::call_service(
      &app,
      test::TestRequest::post()
        .uri(&format!("/api/v1/carts/{}/items/{}/decrease", cart_id, acme.product_b.id))
        .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["itemCount"], 2);
    assert_eq!(body["subtotal"], "20.00");
    assert_eq!(body["isVisible"], true);
    assert_eq!(body["lineItems"].as_array().map(Vec::len), Some(1));

    let resp = test::call_service(
      &app,
      test::TestRequest::post()
        .uri(&format!("/api/v1/carts/{}/items", cart_id))
        .set_json(json!({"productId": acme.product_a.id, "quantity": 0}))
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Oversized quantities on a fresh line and on an existing one.
    for (product_id, quantity) in [(acme.product_b.id, u32::MAX), (acme.product_a.id, mesa::MAX_QUANTITY)] {
      let resp = test::call_service(
        &app,
        test::TestRequest::post()
          .uri(&format!("/api/v1/carts/{}/items", cart_id))
          .set_json(json!({"productId": product_id, "quantity": quantity}))
          .to_request(),
      )
      .await;
      assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    let resp = test::call_service(
      &app,
      test::TestRequest::get().uri(&format!("/api/v1/carts/{}", cart_id)).to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["itemCount"], 2);
    assert_eq!(body["subtotal"], "20.00");
  }

  #[actix_web::test]
  async fn place_order_then_look_it_up() {
    let store = Arc::new(InMemoryStore::new());
    let acme = seed_acme(&store);
    let state = test_state(store, Arc::new(RecordingCheckout::default()));
    let app = init_app!(state);

    let resp = test::call_service(
      &app,
      test::TestRequest::post()
        .uri("/api/v1/restaurants/acme/orders")
        .set_json(json!({
          "customerName": "Ana",
          "customerCpf": "529.982.247-25",
          "consumptionMethod": "DINE_IN",
          "products": [
            {"id": acme.product_a.id, "quantity": 2},
            {"id": acme.product_b.id, "quantity": 1}
          ]
        }))
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let placed: Value = test::read_body_json(resp).await;
    assert_eq!(placed["total"], "25.00");
    assert_eq!(placed["sessionId"], "test_cs_1");

    let resp = test::call_service(
      &app,
      test::TestRequest::get().uri("/api/v1/orders?cpf=52998224725").to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["orders"][0]["id"], placed["orderId"]);
    assert_eq!(body["orders"][0]["status"], "PENDING");
  }

  #[actix_web::test]
  async fn order_lookup_prompts_for_a_valid_cpf() {
    let state = test_state(Arc::new(InMemoryStore::new()), Arc::new(RecordingCheckout::default()));
    let app = init_app!(state);

    for uri in ["/api/v1/orders", "/api/v1/orders?cpf=", "/api/v1/orders?cpf=123.456.789-00"] {
      let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
      assert_eq!(resp.status(), StatusCode::OK);
      let body: Value = test::read_body_json(resp).await;
      assert_eq!(body, json!({"status": "cpf_required"}), "{}", uri);
    }
  }

  #[actix_web::test]
  async fn unknown_product_in_an_order_is_unprocessable() {
    let store = Arc::new(InMemoryStore::new());
    seed_acme(&store);
    let state = test_state(store.clone(), Arc::new(RecordingCheckout::default()));
    let app = init_app!(state);

    let resp = test::call_service(
      &app,
      test::TestRequest::post()
        .uri("/api/v1/restaurants/acme/orders")
        .set_json(json!({
          "customerName": "Ana",
          "customerCpf": "52998224725",
          "consumptionMethod": "TAKEAWAY",
          "products": [{"id": uuid::Uuid::new_v4(), "quantity": 1}]
        }))
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(store.order_count(), 0);
  }

  #[actix_web::test]
  async fn oversized_quantity_in_an_order_is_a_bad_request() {
    let store = Arc::new(InMemoryStore::new());
    let acme = seed_acme(&store);
    let checkout = Arc::new(RecordingCheckout::default());
    let state = test_state(store.clone(), checkout.clone());
    let app = init_app!(state);

    let resp = test::call_service(
      &app,
      test::TestRequest::post()
        .uri("/api/v1/restaurants/acme/orders")
        .set_json(json!({
          "customerName": "Ana",
          "customerCpf": "52998224725",
          "consumptionMethod": "TAKEAWAY",
          "products": [{"id": acme.product_a.id, "quantity": 2_000_000_000u32}]
        }))
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.order_count(), 0);
    assert!(checkout.requests().is_empty());
  }
}
