//! Open/close lifecycle of a dialog.
//!
//! [`step`] is the whole state machine: a pure function from the current
//! phase and an input to the next phase plus the effects to run. The
//! [`LifecycleController`] interprets the scheduling effects against a
//! document's scheduler and hands everything else back to its owner.

use hdom::{Document, FiredTask, OwnerId, TaskId, TaskKind};

use crate::config::TRANSITION_DURATION;

/// Where a dialog is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Not rendered.
    #[default]
    Closed,
    /// Rendered, waiting one frame before becoming visible.
    Opening,
    /// Rendered and visible.
    Open,
    /// Rendered, fading out until the unmount timer fires.
    Closing,
}

/// Inputs to the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    /// The caller set `is_open` to true.
    Open,
    /// The caller set `is_open` to false.
    Close,
    /// The requested animation frame arrived.
    FrameElapsed,
    /// The unmount timer fired.
    TimerElapsed,
}

/// Side effects declared by a transition, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Remember the active element.
    CaptureFocus,
    /// Render the dialog into its portal container.
    Mount,
    /// Acquire the body scroll lock.
    LockScroll,
    /// Register document listeners.
    AttachListeners,
    /// Focus the first focusable element, or the dialog itself.
    PlaceInitialFocus,
    /// Schedule an animation frame.
    RequestFrame,
    /// Cancel whatever frame or timer is pending.
    CancelPending,
    /// Flip the visibility flag on.
    Show,
    /// Flip the visibility flag off.
    Hide,
    /// Start the fixed-duration unmount timer.
    ScheduleUnmount,
    /// Remove document listeners.
    DetachListeners,
    /// Remove the dialog from the document.
    Unmount,
    /// Release the body scroll lock.
    UnlockScroll,
    /// Return focus to the remembered element.
    RestoreFocus,
}

/// Result of one [`step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: Phase,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn to(next: Phase, effects: &[Effect]) -> Self {
        Self {
            next,
            effects: effects.to_vec(),
        }
    }

    fn stay(phase: Phase) -> Self {
        Self::to(phase, &[])
    }

    /// Whether the input was ignored.
    pub fn is_noop(&self) -> bool {
        self.effects.is_empty()
    }
}

/// The lifecycle state machine.
pub fn step(phase: Phase, input: Input) -> Transition {
    use Effect::*;

    match (phase, input) {
        (Phase::Closed, Input::Open) => Transition::to(
            Phase::Opening,
            &[
                CaptureFocus,
                Mount,
                LockScroll,
                AttachListeners,
                PlaceInitialFocus,
                RequestFrame,
            ],
        ),
        (Phase::Opening, Input::FrameElapsed) => Transition::to(Phase::Open, &[Show]),
        (Phase::Opening, Input::Close) => {
            Transition::to(Phase::Closing, &[CancelPending, Hide, ScheduleUnmount])
        }
        (Phase::Open, Input::Close) => Transition::to(Phase::Closing, &[Hide, ScheduleUnmount]),
        (Phase::Closing, Input::TimerElapsed) => Transition::to(
            Phase::Closed,
            &[DetachListeners, Unmount, UnlockScroll, RestoreFocus],
        ),
        // Reopened mid-fade: the unmount timer must not fire
        (Phase::Closing, Input::Open) => {
            Transition::to(Phase::Opening, &[CancelPending, RequestFrame])
        }
        (phase, _) => Transition::stay(phase),
    }
}

/// The externally visible lifecycle triple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DialogState {
    /// Caller-controlled open flag.
    pub is_open: bool,
    /// Whether the dialog is in the document.
    pub should_render: bool,
    /// Visibility flag driving the opacity transition.
    pub is_animating: bool,
}

impl DialogState {
    pub fn new(is_open: bool, phase: Phase) -> Self {
        Self {
            is_open,
            should_render: phase != Phase::Closed,
            is_animating: phase == Phase::Open,
        }
    }
}

/// Drives [`step`] against a document scheduler.
///
/// At most one frame or timer is pending at a time. Tasks that are no longer
/// the pending one are stale and ignored.
#[derive(Debug, Default)]
pub struct LifecycleController {
    phase: Phase,
    pending: Option<TaskId>,
}

impl LifecycleController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pending(&self) -> Option<TaskId> {
        self.pending
    }

    /// Feed an input. Scheduling effects are carried out here; the
    /// remaining effects are returned for the owner to perform.
    pub fn apply(&mut self, doc: &mut Document, owner: OwnerId, input: Input) -> Vec<Effect> {
        let Transition { next, effects } = step(self.phase, input);
        if effects.is_empty() {
            log::trace!("[lifecycle] {:?} ignored in {:?}", input, self.phase);
            return effects;
        }
        log::debug!("[lifecycle] {:?} --{:?}--> {:?}", self.phase, input, next);
        self.phase = next;

        let mut rest = Vec::with_capacity(effects.len());
        for effect in effects {
            match effect {
                Effect::RequestFrame => {
                    self.pending = Some(doc.scheduler.request_frame(owner));
                }
                Effect::ScheduleUnmount => {
                    self.pending = Some(doc.scheduler.set_timeout(owner, TRANSITION_DURATION));
                }
                Effect::CancelPending => {
                    if let Some(task) = self.pending.take() {
                        doc.scheduler.cancel(task);
                    }
                }
                other => rest.push(other),
            }
        }
        rest
    }

    /// Feed a fired task. Returns the effects to perform, empty when the
    /// task is stale.
    pub fn on_task(&mut self, doc: &mut Document, owner: OwnerId, task: FiredTask) -> Vec<Effect> {
        if self.pending != Some(task.id) {
            log::trace!("[lifecycle] stale task {:?} dropped", task.id);
            return Vec::new();
        }
        self.pending = None;
        let input = match task.kind {
            TaskKind::Frame => Input::FrameElapsed,
            TaskKind::Timer => Input::TimerElapsed,
        };
        self.apply(doc, owner, input)
    }

    /// Cancel anything pending and return to `Closed` without effects.
    pub fn reset(&mut self, doc: &mut Document) {
        if let Some(task) = self.pending.take() {
            doc.scheduler.cancel(task);
        }
        self.phase = Phase::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_settles_after_frame() {
        let opening = step(Phase::Closed, Input::Open);
        assert_eq!(opening.next, Phase::Opening);
        assert_eq!(opening.effects.first(), Some(&Effect::CaptureFocus));
        assert_eq!(opening.effects.last(), Some(&Effect::RequestFrame));

        let open = step(Phase::Opening, Input::FrameElapsed);
        assert_eq!(open.next, Phase::Open);
        assert_eq!(open.effects, vec![Effect::Show]);
    }

    #[test]
    fn test_close_unmounts_after_timer() {
        let closing = step(Phase::Open, Input::Close);
        assert_eq!(closing.next, Phase::Closing);
        assert_eq!(closing.effects, vec![Effect::Hide, Effect::ScheduleUnmount]);

        let closed = step(Phase::Closing, Input::TimerElapsed);
        assert_eq!(closed.next, Phase::Closed);
        assert!(closed.effects.contains(&Effect::Unmount));
        assert!(closed.effects.contains(&Effect::RestoreFocus));
    }

    #[test]
    fn test_interrupted_transitions_cancel_pending() {
        assert_eq!(step(Phase::Opening, Input::Close).effects[0], Effect::CancelPending);
        assert_eq!(step(Phase::Closing, Input::Open).effects[0], Effect::CancelPending);
    }

    #[test]
    fn test_irrelevant_inputs_are_noops() {
        let phases = [Phase::Closed, Phase::Opening, Phase::Open, Phase::Closing];
        for phase in phases {
            assert!(step(phase, Input::TimerElapsed).is_noop() || phase == Phase::Closing);
            assert!(step(phase, Input::FrameElapsed).is_noop() || phase == Phase::Opening);
        }
        assert!(step(Phase::Closed, Input::Close).is_noop());
        assert!(step(Phase::Open, Input::Open).is_noop());
        assert!(step(Phase::Opening, Input::Open).is_noop());
    }

    #[test]
    fn test_dialog_state_derivation() {
        assert_eq!(DialogState::new(false, Phase::Closed), DialogState::default());
        let opening = DialogState::new(true, Phase::Opening);
        assert!(opening.should_render && !opening.is_animating);
        let closing = DialogState::new(false, Phase::Closing);
        assert!(closing.should_render && !closing.is_animating);
        assert!(DialogState::new(true, Phase::Open).is_animating);
    }
}
