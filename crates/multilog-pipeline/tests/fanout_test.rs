//! FanoutConsumer: dispatch order, combined diffs, poisoning, topology.

use std::collections::BTreeMap;

use multilog_core::errors::StreamError;
use multilog_core::{MultilogError, RecordConsumer};
use multilog_pipeline::{FanoutConsumer, RoundProcessor};
use test_fixtures::{CounterOp, FailingConsumer, MemorySource, RecordingConsumer};

// Two outputs over [r1, r2, r3]: each sees every record once, in order, and
// the combined diff has one entry per output in configuration order.
#[tokio::test]
async fn two_outputs_see_every_record_in_order() {
    let first = RecordingConsumer::new("first");
    let second = RecordingConsumer::new("second");
    let (first_log, second_log) = (first.log(), second.log());

    let mut fanout = FanoutConsumer::<String, CounterOp>::builder()
        .output_all("first", first)
        .output_all("second", second)
        .build()
        .unwrap();
    for record in ["r1", "r2", "r3"] {
        fanout.accept(record.to_string()).await.unwrap();
    }
    let diffs = fanout.finish().await.unwrap();

    assert_eq!(*first_log.lock().unwrap(), ["r1", "r2", "r3"]);
    assert_eq!(*second_log.lock().unwrap(), ["r1", "r2", "r3"]);
    assert_eq!(
        diffs,
        vec![CounterOp::new("first", 3), CounterOp::new("second", 3)]
    );
}

#[tokio::test]
async fn routing_filters_and_expands() {
    let evens = RecordingConsumer::new("evens");
    let digits = RecordingConsumer::new("digits");
    let (evens_log, digits_log) = (evens.log(), digits.log());

    let mut fanout = FanoutConsumer::<u32, CounterOp>::builder()
        .output("evens", |r: &u32| (r % 2 == 0).then_some(*r), evens)
        .output(
            "digits",
            |r: &u32| r.to_string().chars().collect::<Vec<_>>(),
            digits,
        )
        .build()
        .unwrap();
    for record in [12u32, 7, 40] {
        fanout.accept(record).await.unwrap();
    }
    let diffs = fanout.finish().await.unwrap();

    assert_eq!(*evens_log.lock().unwrap(), [12, 40]);
    assert_eq!(*digits_log.lock().unwrap(), ['1', '2', '7', '4', '0']);
    assert_eq!(
        diffs,
        vec![CounterOp::new("evens", 2), CounterOp::new("digits", 5)]
    );
}

#[tokio::test]
async fn failing_output_poisons_fanout() {
    let before = RecordingConsumer::new("before");
    let after = RecordingConsumer::new("after");
    let (before_log, after_log) = (before.log(), after.log());
    let failing = FailingConsumer::new(1);

    let mut fanout = FanoutConsumer::<u32, CounterOp>::builder()
        .output_all("before", before)
        .output_all("failing", failing.clone())
        .output_all("after", after)
        .build()
        .unwrap();

    fanout.accept(1u32).await.unwrap();
    let err = fanout.accept(2).await.unwrap_err();
    assert!(matches!(err, MultilogError::Stream(StreamError::Consumer(_))));
    assert!(fanout.is_poisoned());

    // The output after the failing one never saw the second record.
    assert_eq!(*before_log.lock().unwrap(), [1, 2]);
    assert_eq!(*after_log.lock().unwrap(), [1]);

    let err = fanout.accept(3).await.unwrap_err();
    assert!(matches!(err, MultilogError::Stream(StreamError::Aborted)));
    let err = fanout.finish().await.unwrap_err();
    assert!(matches!(err, MultilogError::Stream(StreamError::Aborted)));
    assert_eq!(failing.accepted(), 1);
}

#[test]
fn topology_is_validated_at_build() {
    let empty = FanoutConsumer::<u32, CounterOp>::builder().build();
    assert!(matches!(
        empty.err(),
        Some(MultilogError::Stream(StreamError::Topology(_)))
    ));

    let duplicate = FanoutConsumer::<u32, CounterOp>::builder()
        .output_all("x", RecordingConsumer::new("x"))
        .output_all("x", RecordingConsumer::new("y"))
        .build();
    assert!(matches!(
        duplicate.err(),
        Some(MultilogError::Stream(StreamError::Topology(ref message))) if message.contains('x')
    ));
}

#[tokio::test]
async fn fanout_drives_a_round() {
    let source = MemorySource::new()
        .with_partition("a", vec![1u32, 2])
        .with_partition("b", vec![3]);
    let processor = RoundProcessor::new(source);
    let mut fanout = FanoutConsumer::<u32, CounterOp>::builder()
        .output_all("all", RecordingConsumer::new("all"))
        .output("odd", |r: &u32| (r % 2 == 1).then_some(*r), RecordingConsumer::new("odd"))
        .build()
        .unwrap();

    let diff = processor
        .process(&["a".to_string(), "b".to_string()], &BTreeMap::new(), &mut fanout)
        .await
        .unwrap();
    assert_eq!(diff.partitions().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(
        diff.ops(),
        &[CounterOp::new("all", 3), CounterOp::new("odd", 2)]
    );
}
