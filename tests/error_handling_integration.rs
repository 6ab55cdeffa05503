use bardtally::{Orchestrator, Source, SpeakerCount, TallyConfig, TallyError};

#[path = "integration/mod.rs"]
mod test_utils;
use test_utils::fixtures::{HAMLET_EXCERPT, ROMEO_TWO_LINES};
use test_utils::TestFixture;

/// Missing files are reported and do not block other workers
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_missing_source_is_skipped() {
    let fixture = TestFixture::new();
    let good = fixture.create_script_file("romeo.txt", ROMEO_TWO_LINES);
    let missing = fixture.missing_path("lear.txt");

    let outcome = Orchestrator::default()
        .run(vec![Source::file(&missing), Source::file(good)])
        .await
        .expect("A missing source should not fail the run");

    assert_eq!(outcome.ranked, vec![SpeakerCount::new("ROMEO", 5)]);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].source, missing.display().to_string());
    assert!(matches!(outcome.failures[0].error, TallyError::SourceUnavailable { .. }));
    assert_eq!(outcome.stats.sources_failed, 1);
    assert_eq!(outcome.stats.sources_processed, 1);
}

/// No readable source at all is an empty result, not a failure
#[tokio::test]
async fn test_all_sources_missing_yields_empty_result() {
    let fixture = TestFixture::new();

    let outcome = Orchestrator::default()
        .run(vec![
            Source::file(fixture.missing_path("a.txt")),
            Source::file(fixture.missing_path("b.txt")),
        ])
        .await
        .expect("Run should still succeed");

    assert!(outcome.ranked.is_empty());
    assert_eq!(outcome.failures.len(), 2);
}

/// require_all turns any failure into a run error
#[tokio::test]
async fn test_require_all_rejects_partial_run() {
    let fixture = TestFixture::new();
    let good = fixture.create_script_file("hamlet.txt", HAMLET_EXCERPT);

    let orchestrator = Orchestrator::new(TallyConfig {
        require_all: true,
        ..Default::default()
    });
    let result = orchestrator
        .run(vec![Source::file(good.clone()), Source::file(fixture.missing_path("x.txt"))])
        .await;
    assert!(matches!(result, Err(TallyError::IncompleteRun { failed: 1, total: 2 })));

    // All sources readable: require_all succeeds
    let outcome = orchestrator.run(vec![Source::file(good)]).await.unwrap();
    assert!(outcome.is_complete());
}

/// Latin-1 bytes mid-file do not stop the source; later lines still count
#[tokio::test]
async fn test_non_utf8_bytes_mid_file() {
    let fixture = TestFixture::new();
    let mut bytes = b"  HAMLET. Adieu\n".to_vec();
    bytes.extend_from_slice(b"  LAERTES. caf\xe9 au lait\n");
    bytes.extend_from_slice(b"  HAMLET. one two three four\n");
    let path = fixture.create_raw_file("latin1.txt", &bytes);

    let outcome = Orchestrator::default().run(vec![Source::file(path)]).await.unwrap();

    assert!(outcome.is_complete());
    assert_eq!(
        outcome.ranked,
        vec![SpeakerCount::new("HAMLET", 5), SpeakerCount::new("LAERTES", 3)]
    );
    assert_eq!(outcome.stats.source_stats[0].lines_read, 3);
    assert_eq!(outcome.stats.source_stats[0].status, "success");
}

/// A speaker line with nothing after its period resets the speaker
#[tokio::test]
async fn test_header_without_dialogue_drops_following_lines() {
    let script = "  HAMLET. Speak\n  GHOST.\n    Mark me.\n";

    let outcome = Orchestrator::default()
        .run(vec![Source::text("ghost", script)])
        .await
        .unwrap();

    assert_eq!(outcome.ranked, vec![SpeakerCount::new("HAMLET", 1)]);
    assert_eq!(outcome.stats.total_dialogue_lines, 1);
}

/// Empty and whitespace-only files are valid and contribute nothing
#[tokio::test]
async fn test_empty_and_blank_files() {
    let fixture = TestFixture::new();
    let empty = fixture.create_script_file("empty.txt", "");
    let blank = fixture.create_script_file("blank.txt", "   \n\n    \n  \n");

    let outcome = Orchestrator::default()
        .run(vec![Source::file(empty), Source::file(blank)])
        .await
        .unwrap();

    assert!(outcome.ranked.is_empty());
    assert!(outcome.is_complete());
    assert_eq!(outcome.stats.total_lines_read, 4);
}

/// Header lines without a terminating period reset the speaker
#[tokio::test]
async fn test_malformed_headers_are_not_errors() {
    let script = "  HAMLET. Words\n  Exit HAMLET\n    stray words here\n";

    let outcome = Orchestrator::default()
        .run(vec![Source::text("malformed", script)])
        .await
        .unwrap();

    assert!(outcome.is_complete());
    assert_eq!(outcome.ranked, vec![SpeakerCount::new("HAMLET", 1)]);
}
