//! Countdown session lifecycle and the top-level controller state.
//!
//! ```text
//! NoSession --submit--> Running --tick (remaining <= 0)--> Over
//!                        |   ^
//!                  pause |   | resume
//!                        v   |
//!                       Paused
//! any state --reset--> NoSession
//! ```

use crate::form::{validate_event_name, FormError, FormState, TimeUnit};
use crate::{progress_percent, time_left_from_ms, TimeLeft};
use chrono::{Local, TimeZone};
use log::{info, warn};
use std::rc::Rc;
use yew::Reducible;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused { remaining_ms: i64 },
    Over,
}

/// What the countdown shows at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub time_left: TimeLeft,
    pub progress: f64,
    pub remaining_ms: i64,
}

impl Snapshot {
    pub const EMPTY: Snapshot = Snapshot {
        time_left: TimeLeft::ZERO,
        progress: 0.0,
        remaining_ms: 0,
    };
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    event_name: String,
    target_ms: i64,
    start_ms: i64,
    phase: Phase,
}

impl Session {
    /// Begin counting down to `target_ms`, starting the progress window now.
    pub fn start(event_name: &str, target_ms: i64, now_ms: i64) -> Result<Self, FormError> {
        let event_name = validate_event_name(event_name)?;
        if target_ms <= now_ms {
            return Err(FormError::TargetNotInFuture);
        }
        info!(
            "countdown '{}' started, {} ms to go",
            event_name,
            target_ms - now_ms
        );
        Ok(Self {
            event_name: event_name.to_string(),
            target_ms,
            start_ms: now_ms,
            phase: Phase::Running,
        })
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn target_ms(&self) -> i64 {
        self.target_ms
    }

    pub fn start_ms(&self) -> i64 {
        self.start_ms
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, Phase::Paused { .. })
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    /// Compute the display values at `now_ms` without changing state.
    pub fn measure(&self, now_ms: i64) -> Snapshot {
        let remaining_ms = self.target_ms - now_ms;
        if remaining_ms <= 0 {
            return Snapshot {
                time_left: TimeLeft::ZERO,
                progress: 100.0,
                remaining_ms: 0,
            };
        }
        Snapshot {
            time_left: time_left_from_ms(remaining_ms),
            progress: progress_percent(self.start_ms, self.target_ms, now_ms),
            remaining_ms,
        }
    }

    /// Recompute while running. Paused and finished sessions do not tick.
    pub fn tick(&mut self, now_ms: i64) -> Option<Snapshot> {
        if !self.is_running() {
            return None;
        }
        let snapshot = self.measure(now_ms);
        if snapshot.remaining_ms <= 0 {
            info!("countdown '{}' reached its target", self.event_name);
            self.phase = Phase::Over;
        }
        Some(snapshot)
    }

    pub fn pause(&mut self, now_ms: i64) -> bool {
        if !self.is_running() {
            return false;
        }
        let remaining_ms = self.target_ms - now_ms;
        info!("countdown '{}' paused with {} ms left", self.event_name, remaining_ms);
        self.phase = Phase::Paused { remaining_ms };
        true
    }

    pub fn resume(&mut self, now_ms: i64) -> bool {
        let Phase::Paused { remaining_ms } = self.phase else {
            return false;
        };
        let (target_ms, start_ms) =
            resume_window(self.target_ms, self.start_ms, remaining_ms, now_ms);
        info!(
            "countdown '{}' resumed, window shifted by {} ms",
            self.event_name,
            target_ms - self.target_ms
        );
        self.target_ms = target_ms;
        self.start_ms = start_ms;
        self.phase = Phase::Running;
        true
    }

    pub fn toggle_pause(&mut self, now_ms: i64) -> bool {
        match self.phase {
            Phase::Running => self.pause(now_ms),
            Phase::Paused { .. } => self.resume(now_ms),
            Phase::Over => false,
        }
    }
}

/// Shift the `(target, start)` window so `remaining_ms` is left at `now_ms`.
///
/// Both ends move by the same amount, which keeps the planned total duration
/// and the already-elapsed share unchanged.
pub fn resume_window(target_ms: i64, start_ms: i64, remaining_ms: i64, now_ms: i64) -> (i64, i64) {
    let new_target = now_ms + remaining_ms;
    let shift = new_target - target_ms;
    (new_target, start_ms + shift)
}

/// Everything the top-level component owns: the setup form, the live
/// session (if any), and the last computed snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Countdown {
    pub form: FormState,
    pub session: Option<Session>,
    pub snapshot: Snapshot,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CountdownAction {
    SetEventName(String),
    Advance,
    Back,
    SetTargetInput(String),
    AddMinutes { minutes: i64, now_ms: i64 },
    Adjust { unit: TimeUnit, amount: i64 },
    ClearTarget,
    Submit { now_ms: i64 },
    Tick { now_ms: i64 },
    TogglePause { now_ms: i64 },
    Reset,
}

impl Countdown {
    pub fn phase(&self) -> Option<Phase> {
        self.session.as_ref().map(Session::phase)
    }

    pub fn is_over(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_over)
    }

    pub fn is_paused(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_paused)
    }

    /// Whether the countdown tick should be armed.
    pub fn is_ticking(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_running)
    }

    /// Validate the form and start a session. On error nothing changes.
    pub fn submit<Tz: TimeZone>(&mut self, now_ms: i64, tz: &Tz) -> Result<(), FormError> {
        let (name, target_ms) = self.form.resolve(now_ms, tz)?;
        let session = Session::start(&name, target_ms, now_ms)?;
        self.snapshot = session.measure(now_ms);
        self.session = Some(session);
        Ok(())
    }

    pub fn tick(&mut self, now_ms: i64) {
        if let Some(snapshot) = self.session.as_mut().and_then(|s| s.tick(now_ms)) {
            self.snapshot = snapshot;
        }
    }

    pub fn toggle_pause(&mut self, now_ms: i64) -> bool {
        self.session
            .as_mut()
            .is_some_and(|s| s.toggle_pause(now_ms))
    }

    pub fn reset(&mut self) {
        if let Some(session) = &self.session {
            info!("countdown '{}' reset", session.event_name());
        }
        *self = Countdown::default();
    }

    /// Apply `action`, reading local wall-clock time where the form needs it.
    pub fn apply<Tz: TimeZone>(&mut self, action: CountdownAction, tz: &Tz) {
        match action {
            CountdownAction::SetEventName(name) => self.form.event_name = name,
            CountdownAction::Advance => {
                if let Err(err) = self.form.advance() {
                    warn!("cannot leave the name step: {}", err);
                }
            }
            CountdownAction::Back => self.form.back(),
            CountdownAction::SetTargetInput(input) => self.form.target_input = input,
            CountdownAction::AddMinutes { minutes, now_ms } => {
                self.form.add_minutes(minutes, now_ms, tz)
            }
            CountdownAction::Adjust { unit, amount } => self.form.adjust(unit, amount),
            CountdownAction::ClearTarget => self.form.clear_target(),
            CountdownAction::Submit { now_ms } => {
                if let Err(err) = self.submit(now_ms, tz) {
                    warn!("countdown not started: {}", err);
                }
            }
            CountdownAction::Tick { now_ms } => self.tick(now_ms),
            CountdownAction::TogglePause { now_ms } => {
                self.toggle_pause(now_ms);
            }
            CountdownAction::Reset => self.reset(),
        }
    }
}

impl Reducible for Countdown {
    type Action = CountdownAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action, &Local);
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const HOUR_MS: i64 = 3_600_000;
    // 2030-01-01T00:00:00Z
    const T0: i64 = 1_893_456_000_000;

    fn running(target_offset_ms: i64) -> Session {
        Session::start("New Year", T0 + target_offset_ms, T0).unwrap()
    }

    fn countdown_with_form(name: &str, target_input: &str) -> Countdown {
        let mut countdown = Countdown::default();
        countdown.apply(CountdownAction::SetEventName(name.into()), &Utc);
        countdown.apply(CountdownAction::Advance, &Utc);
        countdown.apply(CountdownAction::SetTargetInput(target_input.into()), &Utc);
        countdown
    }

    #[test]
    fn two_hour_countdown_one_second_in() {
        let mut session = running(2 * HOUR_MS);
        let snapshot = session.tick(T0 + 1_000).unwrap();
        assert_eq!(
            snapshot.time_left,
            TimeLeft {
                days: 0,
                hours: 1,
                minutes: 59,
                seconds: 59
            }
        );
        assert!(snapshot.progress > 0.0 && snapshot.progress < 100.0);
        assert!(session.is_running());
    }

    #[test]
    fn target_equal_to_now_is_rejected() {
        assert_eq!(
            Session::start("New Year", T0, T0),
            Err(FormError::TargetNotInFuture)
        );
        assert_eq!(
            Session::start("  ", T0 + 1, T0),
            Err(FormError::EmptyEventName)
        );
    }

    #[test]
    fn submit_at_target_instant_keeps_no_session() {
        let mut countdown = countdown_with_form("New Year", "2030-01-01T00:00:00");
        assert_eq!(
            countdown.submit(T0, &Utc),
            Err(FormError::TargetNotInFuture)
        );
        assert!(countdown.session.is_none());
        assert_eq!(countdown.snapshot, Snapshot::EMPTY);
    }

    #[test]
    fn submit_starts_with_a_fresh_snapshot() {
        let mut countdown = countdown_with_form("New Year", "2030-01-01T02:00:00");
        countdown.apply(CountdownAction::Submit { now_ms: T0 }, &Utc);
        assert_eq!(countdown.phase(), Some(Phase::Running));
        assert_eq!(countdown.snapshot.time_left.hours, 2);
        assert_eq!(countdown.snapshot.progress, 0.0);
        assert!(countdown.is_ticking());
    }

    #[test]
    fn immediate_pause_resume_is_identity() {
        let mut session = running(HOUR_MS);
        let now = T0 + 12_345;
        assert!(session.pause(now));
        assert!(session.resume(now));
        assert_eq!(session.target_ms(), T0 + HOUR_MS);
        assert_eq!(session.start_ms(), T0);
    }

    #[test]
    fn pause_freezes_remaining_time() {
        let mut session = running(2 * HOUR_MS);
        let pause_at = T0 + HOUR_MS;
        assert!(session.pause(pause_at));
        assert_eq!(session.phase(), Phase::Paused { remaining_ms: HOUR_MS });
        assert_eq!(session.tick(pause_at + 5_000), None);

        let resume_at = pause_at + 10_000;
        assert!(session.resume(resume_at));
        assert_eq!(session.measure(resume_at).remaining_ms, HOUR_MS);
        assert_eq!(session.target_ms(), T0 + 2 * HOUR_MS + 10_000);
        assert_eq!(session.start_ms(), T0 + 10_000);
        // Elapsed share carries over unchanged.
        assert_eq!(session.measure(resume_at).progress, 50.0);
    }

    #[test]
    fn resume_window_shifts_both_ends() {
        assert_eq!(resume_window(1_000, 0, 400, 900), (1_300, 300));
        assert_eq!(resume_window(1_000, 0, 400, 600), (1_000, 0));
    }

    #[test]
    fn progress_never_decreases_while_running() {
        let session = running(10_000);
        let mut last = 0.0;
        for step in 0..=12 {
            let snapshot = session.measure(T0 + step * 1_000);
            assert!(snapshot.progress >= last);
            last = snapshot.progress;
        }
        assert_eq!(last, 100.0);
    }

    #[test]
    fn reaching_the_target_ends_the_session() {
        let mut session = running(2_000);
        session.tick(T0 + 1_000);
        assert!(session.is_running());

        let snapshot = session.tick(T0 + 2_000).unwrap();
        assert!(session.is_over());
        assert_eq!(snapshot.progress, 100.0);
        assert_eq!(snapshot.time_left, TimeLeft::ZERO);
        assert_eq!(session.tick(T0 + 3_000), None);
        assert!(!session.toggle_pause(T0 + 3_000));
    }

    #[test]
    fn reset_while_over_returns_to_first_step() {
        let mut countdown = countdown_with_form("New Year", "2030-01-01T00:00:02");
        countdown.apply(CountdownAction::Submit { now_ms: T0 }, &Utc);
        countdown.apply(CountdownAction::Tick { now_ms: T0 + 3_000 }, &Utc);
        assert!(countdown.is_over());
        assert!(!countdown.is_ticking());

        countdown.apply(CountdownAction::Reset, &Utc);
        assert_eq!(countdown, Countdown::default());
        assert!(countdown.form.event_name.is_empty());
        assert_eq!(countdown.form.step, crate::form::FormStep::Name);
    }

    #[test]
    fn paused_countdown_does_not_tick() {
        let mut countdown = countdown_with_form("Launch", "2030-01-01T01:00:00");
        countdown.apply(CountdownAction::Submit { now_ms: T0 }, &Utc);
        countdown.apply(CountdownAction::TogglePause { now_ms: T0 + 1_000 }, &Utc);
        assert!(countdown.is_paused());
        assert!(!countdown.is_ticking());

        let frozen = countdown.snapshot;
        countdown.apply(CountdownAction::Tick { now_ms: T0 + 9_000 }, &Utc);
        assert_eq!(countdown.snapshot, frozen);
    }

    #[test]
    fn reducer_skips_no_op_updates() {
        let state = Rc::new(Countdown::default());
        let next = state.clone().reduce(CountdownAction::Tick { now_ms: T0 });
        assert!(Rc::ptr_eq(&state, &next));
    }
}
