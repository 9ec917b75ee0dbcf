mod common;

use chrono::{TimeZone, Utc};
use common::*;

use parityflow::dag::{DagBuilder, DagCompileError};
use parityflow::schedule::{Cadence, Schedule};
use parityflow::types::TaskId;

#[test]
fn compile_simple_chain() {
    let dag = DagBuilder::new("chain")
        .add_task("first", NoopTask)
        .add_task("second", NoopTask)
        .add_edge("first", "second")
        .compile()
        .unwrap();

    assert_eq!(dag.id(), "chain");
    assert_eq!(dag.task_count(), 2);
    assert_eq!(
        dag.order(),
        [TaskId::from("first"), TaskId::from("second")]
    );
}

#[test]
fn order_follows_edges_not_insertion() {
    let dag = DagBuilder::new("reversed_insertion")
        .add_task("consumer", NoopTask)
        .add_task("producer", NoopTask)
        .add_edge("producer", "consumer")
        .compile()
        .unwrap();
    assert_eq!(
        dag.order(),
        [TaskId::from("producer"), TaskId::from("consumer")]
    );
}

#[test]
fn empty_dag_is_rejected() {
    let err = DagBuilder::new("empty").compile().unwrap_err();
    assert!(matches!(err, DagCompileError::Empty { dag_id } if dag_id == "empty"));
}

#[test]
fn duplicate_task_id_is_rejected() {
    let err = DagBuilder::new("dups")
        .add_task("a", NoopTask)
        .add_task("a", NoopTask)
        .compile()
        .unwrap_err();
    assert!(matches!(
        err,
        DagCompileError::DuplicateTask { task_id, .. } if task_id.as_str() == "a"
    ));
}

#[test]
fn edge_to_unregistered_task_is_rejected() {
    let err = DagBuilder::new("dangling")
        .add_task("a", NoopTask)
        .add_edge("a", "ghost")
        .compile()
        .unwrap_err();
    assert!(matches!(
        err,
        DagCompileError::UnknownTask { task_id, .. } if task_id.as_str() == "ghost"
    ));
}

#[test]
fn edge_from_unregistered_task_is_rejected() {
    let err = DagBuilder::new("dangling")
        .add_task("a", NoopTask)
        .add_edge("ghost", "a")
        .compile()
        .unwrap_err();
    assert!(matches!(
        err,
        DagCompileError::UnknownTask { task_id, .. } if task_id.as_str() == "ghost"
    ));
}

#[test]
fn cycle_is_rejected() {
    let err = DagBuilder::new("looped")
        .add_task("a", NoopTask)
        .add_task("b", NoopTask)
        .add_edge("a", "b")
        .add_edge("b", "a")
        .compile()
        .unwrap_err();
    assert!(matches!(
        err,
        DagCompileError::Cycle { remaining, .. } if remaining == "a, b"
    ));
}

#[test]
fn diamond_order_is_deterministic() {
    let build = || {
        DagBuilder::new("diamond")
            .add_task("d", NoopTask)
            .add_task("c", NoopTask)
            .add_task("b", NoopTask)
            .add_task("a", NoopTask)
            .add_edge("a", "b")
            .add_edge("a", "c")
            .add_edge("b", "d")
            .add_edge("c", "d")
            .compile()
            .unwrap()
    };
    let expected = ["a", "b", "c", "d"].map(TaskId::from);
    for _ in 0..8 {
        assert_eq!(build().order(), expected);
    }
}

#[test]
fn repeated_edge_is_deduplicated() {
    let dag = DagBuilder::new("repeat")
        .add_task("a", NoopTask)
        .add_task("b", NoopTask)
        .add_edge("a", "b")
        .add_edge("a", "b")
        .compile()
        .unwrap();
    assert_eq!(dag.edges()[&TaskId::from("a")], [TaskId::from("b")]);
    assert_eq!(dag.order(), [TaskId::from("a"), TaskId::from("b")]);
}

#[test]
fn metadata_is_carried_through_compilation() {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let dag = DagBuilder::new("meta")
        .description("does a thing")
        .doc("# Meta\n")
        .schedule(Schedule::new(Cadence::Daily, start).catchup(false))
        .add_task("only", NoopTask)
        .compile()
        .unwrap();

    assert_eq!(dag.description(), Some("does a thing"));
    assert_eq!(dag.doc(), Some("# Meta\n"));
    let schedule = dag.schedule().unwrap();
    assert_eq!(schedule.cadence(), Cadence::Daily);
    assert_eq!(schedule.start(), start);
    assert!(!schedule.catchup_enabled());
}
