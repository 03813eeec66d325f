//! Property-based tests for the playback session
//!
//! Uses proptest to drive random operation sequences and verify the session's
//! invariants after every step.

use proptest::prelude::*;
use std::time::Duration;

use test_helpers::{session_with, RecordingEngine};

#[derive(Debug, Clone)]
enum Op {
    Load(usize),
    Next,
    Previous,
    Toggle,
    Seek(u64),
    Report(u64),
    FailNextLoad,
    Close,
}

fn arbitrary_op(len: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        // Includes out-of-range indices
        (0..len + 2).prop_map(Op::Load),
        Just(Op::Next),
        Just(Op::Previous),
        Just(Op::Toggle),
        (0u64..300_000).prop_map(Op::Seek),
        (0u64..300_000).prop_map(Op::Report),
        Just(Op::FailNextLoad),
        Just(Op::Close),
    ]
}

fn scenario() -> impl Strategy<Value = (usize, Vec<Op>)> {
    (1usize..6).prop_flat_map(|len| (Just(len), prop::collection::vec(arbitrary_op(len), 1..40)))
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    /// Property: index in bounds, at most one live resource, and the session's
    /// handle is exactly the engine's live one
    #[test]
    fn session_invariants_hold((len, ops) in scenario()) {
        let rt = runtime();
        rt.block_on(async {
            let engine = RecordingEngine::new();
            let mut session = session_with(&engine, len);

            for op in ops {
                match op {
                    Op::Load(index) => {
                        let _ = session.load_track(index).await;
                    }
                    Op::Next => {
                        let _ = session.next().await;
                    }
                    Op::Previous => {
                        let _ = session.previous().await;
                    }
                    Op::Toggle => {
                        prop_assert!(session.toggle_play_pause().await.is_ok());
                    }
                    Op::Seek(ms) => {
                        prop_assert!(session.seek(Duration::from_millis(ms)).await.is_ok());
                    }
                    Op::Report(ms) => {
                        if let Some(handle) = session.loaded_handle() {
                            engine.report_progress(handle, ms, 300_000);
                        }
                    }
                    Op::FailNextLoad => {
                        let next = (session.current_index() + 1).min(len - 1);
                        engine.fail_uri(&format!("mem://track{}.mp3", next));
                    }
                    Op::Close => session.close().await,
                }

                prop_assert!(session.current_index() < len);
                prop_assert!(engine.max_live() <= 1);
                prop_assert_eq!(engine.live_count(), usize::from(session.loaded_handle().is_some()));
                if let Some(handle) = session.loaded_handle() {
                    prop_assert!(engine.is_live(handle));
                }
            }

            session.close().await;
            prop_assert_eq!(engine.live_count(), 0);
            Ok(())
        })?;
    }

    /// Property: navigation is clamped; next/previous never wrap
    #[test]
    fn navigation_is_clamped(len in 1usize..8, steps in prop::collection::vec(any::<bool>(), 0..30)) {
        let rt = runtime();
        rt.block_on(async {
            let engine = RecordingEngine::new();
            let mut session = session_with(&engine, len);
            session.mount().await.unwrap();

            let mut expected = 0usize;
            for forward in steps {
                let loads_before = engine.loads().len();
                let moved = if forward {
                    session.next().await.unwrap()
                } else {
                    session.previous().await.unwrap()
                };

                let can_move = if forward { expected + 1 < len } else { expected > 0 };
                prop_assert_eq!(moved, can_move);
                if can_move {
                    expected = if forward { expected + 1 } else { expected - 1 };
                    prop_assert_eq!(engine.loads().len(), loads_before + 1);
                } else {
                    prop_assert_eq!(engine.loads().len(), loads_before);
                }
                prop_assert_eq!(session.current_index(), expected);
            }
            Ok(())
        })?;
    }
}
