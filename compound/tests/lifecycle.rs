use std::time::Duration;

use compound::config::{FRAME_INTERVAL, TRANSITION_DURATION};
use compound::lifecycle::{step, Effect, Input, LifecycleController, Phase};
use hdom::{Document, OwnerId};

const ALL_PHASES: [Phase; 4] = [Phase::Closed, Phase::Opening, Phase::Open, Phase::Closing];
const ALL_INPUTS: [Input; 4] = [
    Input::Open,
    Input::Close,
    Input::FrameElapsed,
    Input::TimerElapsed,
];

/// Advance the scheduler by `by`, feeding every fired task to `controller`.
fn run_until(controller: &mut LifecycleController, doc: &mut Document, owner: OwnerId, by: Duration) -> Vec<Effect> {
    let mut effects = Vec::new();
    for task in doc.scheduler.advance(by) {
        effects.extend(controller.on_task(doc, owner, task));
    }
    effects
}

// ============================================================================
// Pure transition function
// ============================================================================

#[test]
fn test_open_effects_in_order() {
    let transition = step(Phase::Closed, Input::Open);
    assert_eq!(transition.next, Phase::Opening);
    assert_eq!(
        transition.effects,
        vec![
            Effect::CaptureFocus,
            Effect::Mount,
            Effect::LockScroll,
            Effect::AttachListeners,
            Effect::PlaceInitialFocus,
            Effect::RequestFrame,
        ]
    );
}

#[test]
fn test_close_effects_in_order() {
    let transition = step(Phase::Closing, Input::TimerElapsed);
    assert_eq!(transition.next, Phase::Closed);
    assert_eq!(
        transition.effects,
        vec![
            Effect::DetachListeners,
            Effect::Unmount,
            Effect::UnlockScroll,
            Effect::RestoreFocus,
        ]
    );
}

#[test]
fn test_every_phase_input_pair_is_total() {
    for phase in ALL_PHASES {
        for input in ALL_INPUTS {
            let transition = step(phase, input);
            if transition.is_noop() {
                assert_eq!(transition.next, phase, "{phase:?} + {input:?}");
            }
        }
    }
}

#[test]
fn test_scroll_lock_and_focus_effects_pair_up() {
    // Exactly one acquire on the way in and one release on the way out
    let opened = step(Phase::Closed, Input::Open).effects;
    let closed = step(Phase::Closing, Input::TimerElapsed).effects;
    assert_eq!(opened.iter().filter(|e| **e == Effect::LockScroll).count(), 1);
    assert_eq!(closed.iter().filter(|e| **e == Effect::UnlockScroll).count(), 1);
    assert_eq!(opened.iter().filter(|e| **e == Effect::CaptureFocus).count(), 1);
    assert_eq!(closed.iter().filter(|e| **e == Effect::RestoreFocus).count(), 1);

    // Re-opening mid-fade neither locks nor captures again
    let reopened = step(Phase::Closing, Input::Open).effects;
    assert!(!reopened.contains(&Effect::LockScroll));
    assert!(!reopened.contains(&Effect::CaptureFocus));
    assert!(!reopened.contains(&Effect::PlaceInitialFocus));
}

// ============================================================================
// Controller against a scheduler
// ============================================================================

#[test]
fn test_controller_settles_open_after_one_frame() {
    let mut doc = Document::new();
    let owner = OwnerId::next();
    let mut controller = LifecycleController::new();

    let effects = controller.apply(&mut doc, owner, Input::Open);
    assert!(!effects.contains(&Effect::RequestFrame));
    assert_eq!(controller.phase(), Phase::Opening);
    assert!(controller.pending().is_some());

    let effects = run_until(&mut controller, &mut doc, owner, FRAME_INTERVAL);
    assert_eq!(effects, vec![Effect::Show]);
    assert_eq!(controller.phase(), Phase::Open);
    assert_eq!(controller.pending(), None);
}

#[test]
fn test_controller_unmounts_exactly_at_transition_end() {
    let mut doc = Document::new();
    let owner = OwnerId::next();
    let mut controller = LifecycleController::new();
    controller.apply(&mut doc, owner, Input::Open);
    run_until(&mut controller, &mut doc, owner, FRAME_INTERVAL);

    controller.apply(&mut doc, owner, Input::Close);
    assert_eq!(controller.phase(), Phase::Closing);

    let early = run_until(&mut controller, &mut doc, owner, TRANSITION_DURATION - Duration::from_millis(1));
    assert!(early.is_empty());
    assert_eq!(controller.phase(), Phase::Closing);

    let late = run_until(&mut controller, &mut doc, owner, Duration::from_millis(1));
    assert!(late.contains(&Effect::Unmount));
    assert_eq!(controller.phase(), Phase::Closed);
}

#[test]
fn test_close_before_first_frame_cancels_it() {
    let mut doc = Document::new();
    let owner = OwnerId::next();
    let mut controller = LifecycleController::new();

    controller.apply(&mut doc, owner, Input::Open);
    let frame = controller.pending().unwrap();
    controller.apply(&mut doc, owner, Input::Close);

    assert!(!doc.scheduler.is_pending(frame));
    assert_eq!(doc.scheduler.pending_count(), 1);

    let effects = run_until(&mut controller, &mut doc, owner, TRANSITION_DURATION);
    assert!(!effects.contains(&Effect::Show));
    assert_eq!(controller.phase(), Phase::Closed);
}

#[test]
fn test_reopen_during_fade_cancels_unmount() {
    let mut doc = Document::new();
    let owner = OwnerId::next();
    let mut controller = LifecycleController::new();
    controller.apply(&mut doc, owner, Input::Open);
    run_until(&mut controller, &mut doc, owner, FRAME_INTERVAL);

    controller.apply(&mut doc, owner, Input::Close);
    let timer = controller.pending().unwrap();
    run_until(&mut controller, &mut doc, owner, Duration::from_millis(50));

    controller.apply(&mut doc, owner, Input::Open);
    assert!(!doc.scheduler.is_pending(timer));

    let effects = run_until(&mut controller, &mut doc, owner, TRANSITION_DURATION * 2);
    assert_eq!(effects, vec![Effect::Show]);
    assert_eq!(controller.phase(), Phase::Open);
}

#[test]
fn test_stale_task_is_ignored() {
    let mut doc = Document::new();
    let owner = OwnerId::next();
    let mut controller = LifecycleController::new();

    // A task this controller never scheduled
    doc.scheduler.set_timeout(owner, Duration::from_millis(5));
    controller.apply(&mut doc, owner, Input::Open);

    let fired = doc.scheduler.advance(Duration::from_millis(5));
    assert_eq!(fired.len(), 1);
    assert!(controller.on_task(&mut doc, owner, fired[0]).is_empty());
    assert_eq!(controller.phase(), Phase::Opening);
}

#[test]
fn test_reset_cancels_pending() {
    let mut doc = Document::new();
    let owner = OwnerId::next();
    let mut controller = LifecycleController::new();
    controller.apply(&mut doc, owner, Input::Open);

    controller.reset(&mut doc);
    assert_eq!(controller.phase(), Phase::Closed);
    assert_eq!(doc.scheduler.pending_count(), 0);
}
