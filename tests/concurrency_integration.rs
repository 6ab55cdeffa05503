// Concurrent writers against one accumulator

use bardtally::{FileWorker, Orchestrator, Source, SpeakerAccumulator, SpeakerCount};
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_no_lost_updates_from_tasks() {
    let tally = Arc::new(SpeakerAccumulator::new());

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let tally = Arc::clone(&tally);
            tokio::spawn(async move {
                for _ in 0..100 {
                    tally.add_or_create("CHORUS", 1);
                    tokio::task::yield_now().await;
                }
            })
        })
        .collect();
    for handle in futures::future::join_all(handles).await {
        handle.expect("Task should not panic");
    }

    assert_eq!(tally.get("CHORUS"), Some(1000));
}

#[test]
fn test_workers_on_threads_share_one_tally() {
    let tally = Arc::new(SpeakerAccumulator::new());
    let line = "  WITCH. Double double toil and trouble";

    std::thread::scope(|scope| {
        for _ in 0..16 {
            let tally = &tally;
            scope.spawn(move || {
                let mut worker = FileWorker::new();
                worker.process_lines(std::iter::repeat(line).take(250), tally);
            });
        }
    });

    assert_eq!(tally.get("WITCH"), Some(16 * 250 * 5));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_many_sources_same_speakers() {
    // Every source hits the same keys so workers contend on every line
    let script = "  A. one\n  B. one two\n  A. three four five\n".repeat(200);
    let sources: Vec<Source> = (0..32)
        .map(|i| Source::text(format!("copy{i}"), script.clone()))
        .collect();

    let outcome = Orchestrator::default().run(sources).await.unwrap();

    assert_eq!(
        outcome.ranked,
        vec![SpeakerCount::new("A", 32 * 200 * 4), SpeakerCount::new("B", 32 * 200 * 2)]
    );
    assert_eq!(outcome.stats.total_words, 32 * 200 * 6);
}
