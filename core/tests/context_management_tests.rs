// tests/context_management_tests.rs
mod common;

use common::*;
use mesa::{CartStore, ContextData};

#[test]
fn test_context_data_clone_shares_data() {
  let original_ctx = ContextData::new(TestContext {
    counter: 1,
    ..Default::default()
  });
  let cloned_ctx = original_ctx.clone();

  original_ctx.write().counter = 5;
  assert_eq!(cloned_ctx.read().counter, 5);

  cloned_ctx.write().counter = 10;
  assert_eq!(original_ctx.read().counter, 10);
}

#[test]
fn test_update_and_snapshot() {
  let ctx = ContextData::new(TestContext::default());
  let new_len = ctx.update(|data| {
    data.message.push_str("hello");
    data.message.len()
  });
  assert_eq!(new_len, 5);

  let snapshot = ctx.snapshot();
  ctx.write().message.clear();
  assert_eq!(snapshot.message, "hello");
  assert!(ctx.read().message.is_empty());
}

#[test]
fn test_map_read_narrows_to_a_field() {
  let ctx = ContextData::new(TestContext {
    message: "narrow".to_string(),
    ..Default::default()
  });
  let message = ctx.map_read(|data| data.message.as_str());
  assert_eq!(&*message, "narrow");
}

#[test]
fn test_shared_cart_sees_mutations_from_every_handle() {
  let cart = ContextData::new(CartStore::new());
  let handle = cart.clone();

  handle.update(|store| store.add_product(burger(), 2)).unwrap();

  let guard = cart.read();
  assert_eq!(guard.item_count(), 2);
  assert!(guard.is_visible());
}
