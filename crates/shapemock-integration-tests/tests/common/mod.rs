//! Shared collaborators and code under test for integration tests.
//!
//! `Checkout` depends on two traits. The tests hand it `Mocked<dyn Trait>`
//! stand-ins, which implement the traits by forwarding to the mock.

#![allow(dead_code)]

use futures::future::BoxFuture;
use shapemock::Mocked;

/// Synchronous collaborator.
pub trait Inventory: Send + Sync {
    /// Units in stock for `sku`.
    fn available(&self, sku: &str) -> i64;
    /// Reserve `quantity` units; returns whether it succeeded.
    fn reserve(&self, sku: &str, quantity: i64) -> bool;
}

shapemock::mockable!(dyn Inventory { method available, method reserve, property warehouse });

impl Inventory for Mocked<dyn Inventory> {
    fn available(&self, sku: &str) -> i64 {
        self.call("available", (sku,))
            .ok()
            .and_then(|v| v.as_i64())
            .unwrap_or_default()
    }

    fn reserve(&self, sku: &str, quantity: i64) -> bool {
        self.call("reserve", (sku, quantity))
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}

/// Asynchronous collaborator.
pub trait Payments: Send + Sync {
    /// Charge `cents`; resolves to a receipt id or rejects with a reason.
    fn charge(&self, cents: i64) -> BoxFuture<'static, Result<String, String>>;
}

impl Payments for Mocked<dyn Payments> {
    fn charge(&self, cents: i64) -> BoxFuture<'static, Result<String, String>> {
        let result = self.call("charge", (cents,));
        Box::pin(async move {
            let settled = result
                .map_err(|e| e.to_string())?
                .settle()
                .await
                .map_err(|reason| format!("{reason:?}"))?;
            settled
                .as_str()
                .map(str::to_owned)
                .ok_or_else(|| format!("unexpected receipt {settled:?}"))
        })
    }
}

/// Code under test.
pub struct Checkout<'a> {
    pub inventory: &'a dyn Inventory,
    pub payments: &'a dyn Payments,
}

impl Checkout<'_> {
    /// Reserve stock and charge for it.
    pub async fn buy(&self, sku: &str, quantity: i64, unit_cents: i64) -> Result<String, String> {
        if self.inventory.available(sku) < quantity {
            return Err(format!("{sku} out of stock"));
        }
        if !self.inventory.reserve(sku, quantity) {
            return Err(format!("{sku} could not be reserved"));
        }
        self.payments
            .charge(quantity.saturating_mul(unit_cents))
            .await
    }
}
