mod common;

use common::*;
use proptest::prelude::*;
use serde_json::json;

use parityflow::task::{Task, TaskError};
use parityflow::tasks::{CheckEvenOddTask, GenerateNumberTask, Parity};
use parityflow::types::{RunId, TaskId};
use parityflow::xcom::XcomStore;

async fn pull_generated(xcom: &parityflow::xcom::InMemoryXcom) -> Option<serde_json::Value> {
    xcom.pull(
        &RunId::from(TEST_RUN_ID),
        &TaskId::from("generate_number"),
        GenerateNumberTask::XCOM_KEY,
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn generate_publishes_value_in_range() {
    let (ctx, event_bus, memory, xcom) = make_ctx("generate_number");
    GenerateNumberTask::new().execute(ctx).await.unwrap();
    event_bus.stop_listener().await;

    let value = pull_generated(&xcom).await.expect("value published");
    let n = value.as_i64().expect("integer value");
    assert!((1..=100).contains(&n));

    let events = memory.snapshot();
    assert!(
        events
            .iter()
            .any(|e| e.message() == format!("Generated random number: {n}"))
    );
}

#[tokio::test]
async fn generate_repeated_draws_stay_in_bounds() {
    let (ctx, event_bus, _memory, xcom) = make_ctx("generate_number");
    let task = GenerateNumberTask::new();
    for _ in 0..200 {
        task.execute(ctx.clone()).await.unwrap();
        let n = pull_generated(&xcom).await.unwrap().as_i64().unwrap();
        assert!((1..=100).contains(&n), "out of range draw: {n}");
    }
    event_bus.stop_listener().await;
}

#[tokio::test]
async fn generate_rejects_inverted_bounds() {
    let (ctx, event_bus, _memory, _xcom) = make_ctx("generate_number");
    let err = GenerateNumberTask::bounded(10, 1)
        .execute(ctx)
        .await
        .unwrap_err();
    event_bus.stop_listener().await;
    assert!(matches!(err, TaskError::ValidationFailed(_)));
}

async fn classification_message(n: i64) -> String {
    let (ctx, event_bus, memory, xcom) = make_ctx("check_even_odd");
    xcom.push(
        &RunId::from(TEST_RUN_ID),
        &TaskId::from("generate_number"),
        GenerateNumberTask::XCOM_KEY,
        json!(n),
    )
    .await
    .unwrap();
    CheckEvenOddTask::new("generate_number")
        .execute(ctx)
        .await
        .unwrap();
    event_bus.stop_listener().await;

    memory
        .snapshot()
        .last()
        .map(|e| e.message().to_string())
        .expect("classification emitted")
}

#[tokio::test]
async fn classify_formats_known_values() {
    assert_eq!(classification_message(42).await, "The number 42 is even.");
    assert_eq!(classification_message(7).await, "The number 7 is odd.");
    assert_eq!(classification_message(100).await, "The number 100 is even.");
    assert_eq!(classification_message(1).await, "The number 1 is odd.");
}

#[tokio::test]
async fn classify_missing_value_is_an_error() {
    let (ctx, event_bus, _memory, _xcom) = make_ctx("check_even_odd");
    let err = CheckEvenOddTask::new("generate_number")
        .execute(ctx)
        .await
        .unwrap_err();
    event_bus.stop_listener().await;
    assert!(matches!(
        err,
        TaskError::MissingInput {
            what: "random_number"
        }
    ));
}

#[tokio::test]
async fn classify_rejects_non_integer_value() {
    let (ctx, event_bus, _memory, xcom) = make_ctx("check_even_odd");
    xcom.push(
        &RunId::from(TEST_RUN_ID),
        &TaskId::from("generate_number"),
        GenerateNumberTask::XCOM_KEY,
        json!("not a number"),
    )
    .await
    .unwrap();
    let err = CheckEvenOddTask::new("generate_number")
        .execute(ctx)
        .await
        .unwrap_err();
    event_bus.stop_listener().await;
    assert!(matches!(err, TaskError::ValidationFailed(_)));
}

#[test]
fn parity_examples() {
    assert_eq!(Parity::of(42), Parity::Even);
    assert_eq!(Parity::of(7), Parity::Odd);
    assert_eq!(Parity::of(100), Parity::Even);
    assert_eq!(Parity::of(1), Parity::Odd);
    assert_eq!(Parity::Even.to_string(), "even");
    assert_eq!(Parity::Odd.to_string(), "odd");
}

proptest! {
    #[test]
    fn parity_matches_divisibility(n in 1i64..=100) {
        prop_assert_eq!(Parity::of(n) == Parity::Even, n % 2 == 0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn generated_value_respects_custom_bounds(lo in -50i64..=50, width in 0i64..=100) {
        let hi = lo + width;
        let rt = tokio::runtime::Runtime::new().unwrap();
        let n = rt.block_on(async {
            let (ctx, event_bus, _memory, xcom) = make_ctx("generate_number");
            GenerateNumberTask::bounded(lo, hi).execute(ctx).await.unwrap();
            event_bus.stop_listener().await;
            pull_generated(&xcom).await.unwrap().as_i64().unwrap()
        });
        prop_assert!((lo..=hi).contains(&n));
    }
}
