//! End-to-end tests for the console player screen
//!
//! Run the line-based player against the simulated engine with virtual time.

use std::sync::Arc;
use std::time::Duration;
use tapedeck_console::config::SimulationSettings;
use tapedeck_console::{run_player, SimulatedEngine};
use tapedeck_core::Playlist;
use tapedeck_playback::{PlaybackConfig, PlaybackSession};
use tokio::io::{AsyncWriteExt, BufReader};

fn engine(fail_uris: Vec<String>) -> Arc<SimulatedEngine> {
    Arc::new(SimulatedEngine::new(&SimulationSettings {
        status_interval_ms: 50,
        track_duration_secs: 180,
        fail_uris,
    }))
}

fn output(buffer: Vec<u8>) -> Vec<String> {
    String::from_utf8(buffer)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_scripted_navigation() {
    let engine = engine(Vec::new());
    let mut session =
        PlaybackSession::new(engine.clone(), Playlist::demo(), PlaybackConfig::default());
    session.mount().await.unwrap();

    let script = b"status\nnext\nnext\nnext\nprev\nseek 0:10\ndance\nquit\nnext\n";
    let mut out = Vec::new();
    run_player(&mut session, BufReader::new(&script[..]), &mut out)
        .await
        .unwrap();

    assert_eq!(
        output(out),
        vec![
            "track 1: Track 1",
            "playing",
            "[1/3] Track 1  0:00 / 0:00  playing",
            "track 2: Track 2",
            "playing",
            "track 3: Track 3",
            "playing",
            "already at the last track",
            "track 2: Track 2",
            "playing",
            "Unknown command: dance",
        ]
    );

    // Closed on quit; nothing after quit was executed
    assert_eq!(session.current_index(), 1);
    assert!(session.loaded_handle().is_none());
    assert_eq!(engine.live_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_status_reports_flow_while_waiting_for_input() {
    let engine = engine(Vec::new());
    let mut session =
        PlaybackSession::new(engine.clone(), Playlist::demo(), PlaybackConfig::default());
    session.mount().await.unwrap();

    let (reader, mut writer) = tokio::io::duplex(256);
    let typist = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        writer.write_all(b"seek 1:00\nstatus\nquit\n").await.unwrap();
    });

    let mut out = Vec::new();
    run_player(&mut session, BufReader::new(reader), &mut out)
        .await
        .unwrap();
    typist.await.unwrap();

    let lines = output(out);
    let status = lines
        .iter()
        .find(|line| line.starts_with("[1/3]"))
        .expect("status line");
    assert_eq!(status, "[1/3] Track 1  1:00 / 3:00  playing");
    assert_eq!(engine.live_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_failed_load_is_reported_and_retryable() {
    let demo = Playlist::demo();
    let broken = demo.get(1).unwrap().audio_uri.clone();
    let engine = engine(vec![broken]);
    let mut session = PlaybackSession::new(engine.clone(), demo, PlaybackConfig::default());
    session.mount().await.unwrap();

    let script = b"next\nnext\nstatus\nquit\n";
    let mut out = Vec::new();
    run_player(&mut session, BufReader::new(&script[..]), &mut out)
        .await
        .unwrap();

    let lines = output(out);
    assert!(lines.contains(&"track 2: Track 2".to_string()));
    assert!(lines
        .iter()
        .any(|line| line.starts_with("error: Load error:")));
    assert!(lines
        .iter()
        .any(|line| line.starts_with("error: Failed to load")));
    // Moving on from the broken track still works
    assert!(lines.contains(&"track 3: Track 3".to_string()));
    assert_eq!(engine.live_count(), 0);
}
