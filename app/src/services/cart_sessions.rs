// mesa/app/src/services/cart_sessions.rs

//! In-memory cart sessions. A cart lives as long as the browsing session that
//! opened it and is gone after a restart.

use mesa::{CartStore, ContextData};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

use crate::errors::{AppError, Result};

const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(2 * 60 * 60);

struct CartSession {
  cart: ContextData<CartStore>,
  last_used: Instant,
}

#[derive(Clone)]
pub struct CartSessions {
  sessions: Arc<RwLock<HashMap<Uuid, CartSession>>>,
  idle_timeout: Duration,
}

impl Default for CartSessions {
  fn default() -> Self {
    Self::new(DEFAULT_IDLE_TIMEOUT)
  }
}

impl CartSessions {
  pub fn new(idle_timeout: Duration) -> Self {
    Self {
      sessions: Arc::new(RwLock::new(HashMap::new())),
      idle_timeout,
    }
  }

  /// Starts an empty cart. Carts idle for longer than the timeout are dropped on the way.
  pub fn open(&self) -> Uuid {
    let cart_id = Uuid::new_v4();
    let now = Instant::now();
    let mut sessions = self.sessions.write();
    let before = sessions.len();
    sessions.retain(|_, session| now.duration_since(session.last_used) < self.idle_timeout);
    if sessions.len() < before {
      debug!(expired = before - sessions.len(), "Dropped idle cart sessions.");
    }
    sessions.insert(
      cart_id,
      CartSession {
        cart: ContextData::new(CartStore::new()),
        last_used: now,
      },
    );
    cart_id
  }

  pub fn get(&self, cart_id: Uuid) -> Result<ContextData<CartStore>> {
    let mut sessions = self.sessions.write();
    let session = sessions
      .get_mut(&cart_id)
      .ok_or_else(|| AppError::NotFound(format!("Cart {} not found", cart_id)))?;
    session.last_used = Instant::now();
    Ok(session.cart.clone())
  }

  /// Empties the cart after a successful checkout. Returns `false` for an unknown id.
  pub fn clear(&self, cart_id: Uuid) -> bool {
    match self.get(cart_id) {
      Ok(cart) => {
        cart.write().clear();
        true
      }
      Err(_) => false,
    }
  }
}
