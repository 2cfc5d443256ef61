use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use dioxus::html::{Code, Location, Modifiers, SerializedKeyboardData};
use dioxus::prelude::*;
use flash_core::model::{Counters, Difficulty, Slot};
use storage::repository::{COUNTERS_KEY, CountersRepository, InMemoryRepository};

use super::test_harness::{
    MiniHost, SlowRepository, ViewHarness, setup_view_harness, setup_view_harness_with_counters,
    setup_view_harness_with_host,
};
use crate::vm::FlashIntent;

fn live_answer_slot(harness: &ViewHarness) -> Slot {
    let snapshot = harness.handles.snapshot();
    harness
        .dom
        .in_runtime(|| {
            snapshot
                .read()
                .as_ref()
                .and_then(|snapshot| snapshot.problem.as_ref().map(|p| p.answer_slot()))
        })
        .expect("live problem")
}

fn has_live_problem(harness: &ViewHarness) -> bool {
    let snapshot = harness.handles.snapshot();
    harness.dom.in_runtime(|| {
        snapshot
            .read()
            .as_ref()
            .is_some_and(|snapshot| snapshot.problem.is_some())
    })
}

fn key_event(key: Key, code: Code) -> KeyboardEvent {
    let data = SerializedKeyboardData::new(
        key,
        code,
        Location::Standard,
        false,
        Modifiers::empty(),
        false,
    );
    Event::new(Rc::new(KeyboardData::new(data)), true)
}

fn press(harness: &ViewHarness, evt: KeyboardEvent) {
    let on_key = harness.handles.on_key();
    harness.dom.in_runtime(|| on_key.call(evt));
}

async fn settle(harness: &mut ViewHarness, rounds: usize) {
    for _ in 0..rounds {
        harness.drive_async().await;
    }
}

fn dispatch(harness: &ViewHarness, intent: FlashIntent) {
    let dispatch = harness.handles.dispatch();
    harness.dom.in_runtime(|| dispatch.call(intent));
}

#[tokio::test(flavor = "current_thread")]
async fn flash_view_smoke_renders_shell_and_problem() {
    let mut harness = setup_view_harness(InMemoryRepository::new(), Difficulty::Normal);
    harness.start().await;

    let html = harness.render();
    for expected in ["Flash Math", "STREAK", "BEST", "ACC", "WEB", "web mode \u{2713}", "reset", "hard"] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(html.contains(" + ") || html.contains(" \u{2212} "), "missing equation in {html}");
    assert!(!html.contains(" \u{d7} "), "multiplication in normal mode: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn flash_view_smoke_shows_mini_pill_when_embedded() {
    let mut harness = setup_view_harness_with_host(
        InMemoryRepository::new(),
        Difficulty::Normal,
        Arc::new(MiniHost),
    );
    harness.start().await;

    let html = harness.render();
    assert!(html.contains("MINI"), "missing pill in {html}");
    assert!(html.contains("pill mini"), "missing mini class in {html}");
    assert!(html.contains("mini app detected \u{2713}"), "missing ready text in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn flash_view_smoke_resumes_stored_counters() {
    let repo = InMemoryRepository::new();
    repo.save_counters(&Counters::from_persisted(3, 7, 10, 8).unwrap())
        .await
        .unwrap();

    let mut harness = setup_view_harness(repo, Difficulty::Hard);
    harness.start().await;

    let html = harness.render();
    assert!(html.contains("80%"), "missing accuracy in {html}");
    let snapshot = harness.handles.snapshot();
    let best = harness
        .dom
        .in_runtime(|| snapshot.read().as_ref().map(|snapshot| snapshot.counters.best()));
    assert_eq!(best, Some(7));
    assert!(html.contains("easy"), "hard launch should offer easy: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn flash_view_smoke_correct_pick_persists_and_advances() {
    let mut harness = setup_view_harness(InMemoryRepository::new(), Difficulty::Normal);
    harness.start().await;

    let slot = live_answer_slot(&harness);
    dispatch(&harness, FlashIntent::Pick(slot));
    harness.drive_async().await;

    let stored = harness.repo.load_counters().await.unwrap().expect("saved");
    assert_eq!(stored.total(), 1);
    assert_eq!(stored.correct(), 1);
    assert_eq!(stored.streak(), 1);
    let html = harness.render();
    assert!(html.contains("\u{2713}"), "missing toast in {html}");
    assert!(html.contains("100%"), "missing accuracy in {html}");

    tokio::time::sleep(Duration::from_millis(300)).await;
    harness.drive_async().await;
    harness.drive_async().await;

    assert!(has_live_problem(&harness), "next problem not dealt");
}

#[tokio::test(flavor = "current_thread")]
async fn flash_view_smoke_wrong_pick_breaks_streak() {
    let repo = InMemoryRepository::new();
    repo.save_counters(&Counters::from_persisted(2, 2, 2, 2).unwrap())
        .await
        .unwrap();
    let mut harness = setup_view_harness(repo, Difficulty::Normal);
    harness.start().await;

    let slot = live_answer_slot(&harness);
    dispatch(&harness, FlashIntent::Pick(slot.opposite()));
    harness.drive_async().await;

    let stored = harness.repo.load_counters().await.unwrap().expect("saved");
    assert_eq!(stored, Counters::from_persisted(0, 2, 3, 2).unwrap());
    let html = harness.render();
    assert!(html.contains("\u{2715}"), "missing toast in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn flash_view_smoke_reset_and_toggle() {
    let repo = InMemoryRepository::new();
    repo.save_counters(&Counters::from_persisted(4, 6, 9, 7).unwrap())
        .await
        .unwrap();
    let mut harness = setup_view_harness(repo, Difficulty::Normal);
    harness.start().await;

    dispatch(&harness, FlashIntent::Reset);
    harness.drive_async().await;

    let raw = harness.repo.raw(COUNTERS_KEY).unwrap().expect("saved");
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"streak": 0, "best": 6, "total": 0, "correct": 0, "last": null})
    );
    let html = harness.render();
    assert!(html.contains("reset"), "missing toast in {html}");
    assert!(html.contains("\u{2014}"), "accuracy should be blank: {html}");

    dispatch(&harness, FlashIntent::ToggleDifficulty);
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("hard mode"), "missing toast in {html}");
    assert!(html.contains("easy"), "missing easy label in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn flash_view_smoke_reset_queued_behind_a_slow_pick_still_lands() {
    let repo = InMemoryRepository::new();
    repo.save_counters(&Counters::from_persisted(4, 6, 9, 7).unwrap())
        .await
        .unwrap();
    let slow = SlowRepository::new(repo.clone(), Duration::from_millis(30));
    let mut harness = setup_view_harness_with_counters(repo, Arc::new(slow), Difficulty::Normal);
    harness.start().await;

    let slot = live_answer_slot(&harness);
    dispatch(&harness, FlashIntent::Pick(slot));
    dispatch(&harness, FlashIntent::Reset);
    harness.drive_async().await;

    // The counters stay on screen while the save is in flight.
    let html = harness.render();
    assert!(html.contains(">6<"), "best vanished mid-save: {html}");

    settle(&mut harness, 12).await;

    let stored = harness.repo.load_counters().await.unwrap().expect("saved");
    assert_eq!(stored, Counters::from_persisted(0, 6, 0, 0).unwrap());
    assert!(has_live_problem(&harness), "reset should deal a problem");
    assert!(harness.render().contains("reset"), "missing reset toast");
}

#[tokio::test(flavor = "current_thread")]
async fn flash_view_smoke_keyboard_drives_the_session() {
    let repo = InMemoryRepository::new();
    repo.save_counters(&Counters::from_persisted(1, 3, 5, 4).unwrap())
        .await
        .unwrap();
    let mut harness = setup_view_harness(repo, Difficulty::Normal);
    harness.start().await;

    let slot = live_answer_slot(&harness);
    let arrow = match slot {
        Slot::Left => key_event(Key::ArrowLeft, Code::ArrowLeft),
        Slot::Right => key_event(Key::ArrowRight, Code::ArrowRight),
    };
    press(&harness, arrow.clone());
    assert!(!arrow.default_action_enabled(), "arrow should not scroll the page");
    harness.drive_async().await;

    let stored = harness.repo.load_counters().await.unwrap().expect("saved");
    assert_eq!(stored, Counters::from_persisted(2, 3, 6, 5).unwrap());

    let reset = key_event(Key::Character("r".into()), Code::KeyR);
    press(&harness, reset.clone());
    assert!(!reset.default_action_enabled());
    harness.drive_async().await;
    let stored = harness.repo.load_counters().await.unwrap().expect("saved");
    assert_eq!(stored, Counters::from_persisted(0, 3, 0, 0).unwrap());

    let other = key_event(Key::Character("x".into()), Code::KeyX);
    press(&harness, other.clone());
    assert!(other.default_action_enabled(), "unmapped keys pass through");
    harness.drive_async().await;
    let stored = harness.repo.load_counters().await.unwrap().expect("saved");
    assert_eq!(stored, Counters::from_persisted(0, 3, 0, 0).unwrap());
}
