//! Integration tests for interface mocks.
//!
//! Covers lazy materialization, overrides, direct writes, the `then` guard
//! and nested mocks, through both the untyped and the typed API.

mod common;

use std::sync::{Arc, Barrier};
use std::thread;

use common::{Checkout, Inventory, Payments};
use shapemock::prelude::*;
use shapemock::{SlotOrigin, THEN_PROBE};
use shapemock_test::{RecordingFactory, setup_test_logging};

trait Test {}

trait TestWithProp {}

trait Nested {}

trait TestNested {}

#[test]
fn mocks_an_interface_with_synchronous_functions() {
    setup_test_logging("shapemock=trace");
    let mock = mock_interface::<dyn Test>();

    mock.spy("fn").returns(5);

    assert!(mock.get("fn").is_callable());
    assert_eq!(mock.call("fn", ()).unwrap(), Value::Int(5));
}

#[tokio::test]
async fn mocks_an_interface_with_asynchronous_functions() {
    let mock = mock_interface::<dyn Test>();

    mock.spy("fn").resolves(3);

    assert!(mock.get("fn").is_callable());
    let result = mock.call("fn", ()).unwrap().settle().await;
    assert_eq!(result, Ok(Value::Int(3)));
}

#[tokio::test]
async fn allows_nested_interface_mocks() {
    let nested_mock = mock_interface::<dyn Nested>();
    let mock = mock_interface::<dyn TestNested>();

    mock.spy("fn").resolves(nested_mock.clone());
    nested_mock.spy("nestedFn").resolves(53);

    let resolved = mock.call("fn", ()).unwrap().settle().await.unwrap();
    let nested_fn = resolved.member("nestedFn");
    assert_eq!(nested_fn.call(()).unwrap().settle().await, Ok(Value::Int(53)));

    // The resolved value is the nested mock itself, not a copy.
    assert_eq!(resolved, Value::from(nested_mock));
}

#[test]
fn sets_properties_on_a_mocked_interface() {
    let mock = mock_interface::<dyn TestWithProp>();

    mock.set("prop", 1);
    assert_eq!(mock.get("prop"), Value::Int(1));
}

#[test]
fn tracks_calls_made_to_mocks() {
    let mock = mock_interface::<dyn Test>();

    mock.call("fn", ()).unwrap();
    mock.call("fn", ()).unwrap();

    assert_eq!(mock.spy("fn").call_count(), 2);
}

#[test]
fn allows_overrides_for_properties() {
    let mock = mock_interface_with::<dyn TestWithProp>(Overrides::new().with("prop", "test"));

    assert_eq!(mock.get("prop"), Value::from("test"));
}

#[test]
fn allows_overrides_for_functions() {
    let mock = mock_interface_with::<dyn Test>(Overrides::new().with_fn("fn", |_: &[Value]| 5));

    assert_eq!(mock.call("fn", ()).unwrap(), Value::Int(5));
}

#[test]
fn overrides_from_json() -> anyhow::Result<()> {
    let overrides = Overrides::try_from(serde_json::json!({
        "prop": 7,
        "settings": { "retries": 3 }
    }))?;
    let mock = mock_interface_with::<dyn TestWithProp>(overrides);

    assert_eq!(mock.get("prop"), Value::Int(7));
    assert_eq!(mock.get("settings").member("retries"), Value::Int(3));
    // A missing deep path is just undefined.
    assert!(mock.get("settings").member("timeout").member("secs").is_undefined());
    Ok(())
}

#[test]
fn materialized_members_are_identity_stable() {
    let mock = Mock::interface(Overrides::new());
    for name in ["a", "b", "load", "save"] {
        let first = mock.get(name);
        let second = mock.get(name);
        assert_eq!(first, second, "{name} was re-materialized");
        assert!(first.as_spy().is_some());
    }
    assert_ne!(mock.get("a"), mock.get("b"));
}

#[test]
fn overridden_members_never_materialize() {
    let factory = RecordingFactory::new();
    let mock = MockBuilder::new()
        .overrides(Overrides::new().with("prop", 7).with_fn("fn", |_: &[Value]| 1))
        .factory(factory.clone())
        .build();

    assert_eq!(mock.get("prop"), Value::Int(7));
    assert_eq!(mock.call("fn", ()).unwrap(), Value::Int(1));
    assert_eq!(factory.count(), 0);
}

#[test]
fn writes_win_over_overrides_and_spies() {
    let mock = Mock::interface(Overrides::new().with("prop", 7));

    let spy = mock.get("fn");
    mock.set("fn", 10);
    mock.set("prop", 8);

    assert_eq!(mock.get("fn"), Value::Int(10));
    assert_ne!(mock.get("fn"), spy);
    assert_eq!(mock.get("prop"), Value::Int(8));
    assert_eq!(mock.slot_origin("prop"), Some(SlotOrigin::Assigned));
    // The construction-time overrides are untouched.
    assert_eq!(mock.overrides().get("prop"), Some(&Value::Int(7)));
}

#[tokio::test]
async fn then_probe_is_not_materialized() {
    let factory = RecordingFactory::new();
    let mock = MockBuilder::new().factory(factory.clone()).build();

    assert!(mock.get(THEN_PROBE).is_undefined());
    assert!(!mock.get(THEN_PROBE).is_callable());

    // Awaiting the mock by accident yields the mock itself.
    let settled = Value::from(mock.clone()).settle().await.unwrap();
    assert_eq!(settled, Value::from(mock.clone()));
    assert_eq!(factory.count(), 0);
    assert!(!mock.contains(THEN_PROBE));
}

#[tokio::test]
async fn written_then_makes_mock_awaitable() {
    let mock = Mock::interface(Overrides::new());
    let then = Spy::new("then");
    then.resolves("ready");
    mock.set(THEN_PROBE, then.clone());

    let settled = Value::from(mock).settle().await;
    assert_eq!(settled, Ok(Value::from("ready")));
    assert_eq!(then.call_count(), 1);
}

#[test]
fn nested_mocks_are_independent() {
    let outer = Mock::interface(Overrides::new());
    let first = Mock::interface(Overrides::new());
    let second = Mock::interface(Overrides::new());

    outer.spy("child").returns_once(first.clone()).returns(second.clone());
    let a = outer.call("child", ()).unwrap();
    let b = outer.call("child", ()).unwrap();

    a.as_mock().unwrap().set("value", 1);
    assert_eq!(first.get("value"), Value::Int(1));
    assert!(b.as_mock().unwrap().get("value").as_spy().is_some());
    assert_ne!(first.get("value"), second.get("value"));
}

#[test]
fn concurrent_first_reads_share_one_spy() {
    const THREADS: usize = 8;

    for _ in 0..50 {
        let factory = RecordingFactory::new();
        let mock = MockBuilder::new().factory(factory.clone()).build();
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let mock = mock.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    mock.get("fn")
                })
            })
            .collect();
        let seen: Vec<Value> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        let stored = mock.get("fn");
        assert!(stored.as_spy().is_some());
        assert!(seen.iter().all(|value| *value == stored));
        assert!(mock.is_materialized("fn"));
        assert!(factory.count() >= 1);
    }
}

#[test]
fn spy_counts_match_invocations() {
    let mock = Mock::interface(Overrides::new());
    for (expected, k) in (0_i64..5).enumerate() {
        assert_eq!(mock.spy("fn").call_count(), expected);
        mock.call("fn", (k,)).unwrap();
    }
    assert_eq!(mock.spy("fn").last_call(), Some(vec![Value::Int(4)]));
}

#[tokio::test]
async fn pending_results_settle_later() {
    let mock = Mock::interface(Overrides::new());
    let (promise, settle) = Promise::pending();
    mock.spy("load").returns(promise);

    let pending = mock.call("load", ()).unwrap();
    assert!(!pending.as_promise().unwrap().is_settled());

    let waiter = tokio::spawn(pending.settle());
    assert!(settle.resolve("loaded"));
    assert_eq!(waiter.await.unwrap(), Ok(Value::from("loaded")));
}

#[tokio::test]
async fn checkout_with_typed_mocks() {
    let inventory = mock_interface::<dyn Inventory>();
    let payments = mock_interface::<dyn Payments>();

    inventory.spy("available").returns(10);
    inventory.spy("reserve").returns(true);
    payments.spy("charge").resolves("receipt-1");

    let checkout = Checkout {
        inventory: &inventory,
        payments: &payments,
    };
    let receipt = checkout.buy("sku-1", 2, 250).await;

    assert_eq!(receipt, Ok("receipt-1".to_owned()));
    assert!(inventory.spy("available").was_called_with(("sku-1",)));
    assert!(inventory.spy("reserve").was_called_with(("sku-1", 2)));
    assert!(payments.spy("charge").was_called_with((500,)));
}

#[tokio::test]
async fn checkout_surfaces_rejections() {
    let inventory = mock_interface::<dyn Inventory>();
    let payments = mock_interface::<dyn Payments>();

    inventory.spy("available").returns(1);
    inventory.spy("reserve").returns(true);
    payments.spy("charge").rejects("card declined");

    let checkout = Checkout {
        inventory: &inventory,
        payments: &payments,
    };

    let err = checkout.buy("sku-2", 1, 100).await.unwrap_err();
    assert!(err.contains("card declined"));
}

#[tokio::test]
async fn checkout_stops_before_untouched_members() {
    let inventory = mock_interface::<dyn Inventory>();
    let payments = mock_interface::<dyn Payments>();

    // `available` is never configured: the spy answers undefined, read as 0.
    let checkout = Checkout {
        inventory: &inventory,
        payments: &payments,
    };
    let err = checkout.buy("sku-3", 1, 100).await.unwrap_err();

    assert_eq!(err, "sku-3 out of stock");
    assert!(!inventory.is_materialized("reserve"));
    assert!(!payments.is_materialized("charge"));
}
