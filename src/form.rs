//! The two-step setup form: event name first, then the target date/time.
//!
//! The pending target is kept exactly as the `datetime-local` input holds it
//! (`YYYY-MM-DDTHH:MM:SS`, wall-clock time in the user's zone) and only turned
//! into an instant on submit.

use crate::config::{DATETIME_INPUT_FORMAT, DATETIME_INPUT_FORMAT_NO_SECONDS};
use chrono::{Duration, NaiveDateTime, TimeZone};
use thiserror::Error;

/// Input problems reported back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please enter an event name.")]
    EmptyEventName,
    #[error("Please choose the event date and time.")]
    MissingTarget,
    #[error("Could not read the date and time '{0}'.")]
    InvalidTarget(String),
    #[error("Please choose a date and time in the future.")]
    TargetNotInFuture,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormStep {
    #[default]
    Name,
    Schedule,
}

/// Field touched by the fine-adjust buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 3] = [TimeUnit::Hours, TimeUnit::Minutes, TimeUnit::Seconds];

    pub fn label(self) -> &'static str {
        match self {
            TimeUnit::Hours => "Hours",
            TimeUnit::Minutes => "Minutes",
            TimeUnit::Seconds => "Seconds",
        }
    }

    fn duration(self, amount: i64) -> Duration {
        match self {
            TimeUnit::Hours => Duration::hours(amount),
            TimeUnit::Minutes => Duration::minutes(amount),
            TimeUnit::Seconds => Duration::seconds(amount),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub step: FormStep,
    pub event_name: String,
    pub target_input: String,
}

impl FormState {
    /// Move from the name step to the schedule step.
    pub fn advance(&mut self) -> Result<(), FormError> {
        validate_event_name(&self.event_name)?;
        self.step = FormStep::Schedule;
        Ok(())
    }

    pub fn back(&mut self) {
        self.step = FormStep::Name;
    }

    pub fn clear_target(&mut self) {
        self.target_input.clear();
    }

    /// Validate both fields and return `(event_name, target_ms)`.
    pub fn resolve<Tz: TimeZone>(
        &self,
        now_ms: i64,
        tz: &Tz,
    ) -> Result<(String, i64), FormError> {
        let target_ms = validate_target(&self.target_input, now_ms, tz)?;
        let name = validate_event_name(&self.event_name)?;
        Ok((name.to_string(), target_ms))
    }

    pub fn add_minutes<Tz: TimeZone>(&mut self, minutes: i64, now_ms: i64, tz: &Tz) {
        if let Some(next) = add_minutes(&self.target_input, minutes, now_ms, tz) {
            self.target_input = next;
        }
    }

    pub fn adjust(&mut self, unit: TimeUnit, amount: i64) {
        if let Some(next) = adjust(&self.target_input, unit, amount) {
            self.target_input = next;
        }
    }
}

/// Trimmed event name, or an error when nothing but whitespace was typed.
pub fn validate_event_name(name: &str) -> Result<&str, FormError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(FormError::EmptyEventName)
    } else {
        Ok(trimmed)
    }
}

/// Parse a `datetime-local` value into wall-clock time.
pub fn parse_input(input: &str) -> Option<NaiveDateTime> {
    let trimmed = input.trim();
    NaiveDateTime::parse_from_str(trimmed, DATETIME_INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, DATETIME_INPUT_FORMAT_NO_SECONDS))
        .ok()
}

/// Resolve a `datetime-local` value to epoch milliseconds in `tz`.
///
/// Wall-clock times that fall into a DST gap have no instant and are
/// reported as invalid; ambiguous ones take the earlier instant.
pub fn input_to_epoch_ms<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<i64, FormError> {
    let naive = parse_input(input).ok_or_else(|| FormError::InvalidTarget(input.to_string()))?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .ok_or_else(|| FormError::InvalidTarget(input.to_string()))
}

/// Format an instant as a `datetime-local` value in `tz`.
pub fn epoch_ms_to_input<Tz: TimeZone>(epoch_ms: i64, tz: &Tz) -> Option<String> {
    tz.timestamp_millis_opt(epoch_ms)
        .single()
        .map(|dt| dt.naive_local().format(DATETIME_INPUT_FORMAT).to_string())
}

/// Check the pending target and return it as epoch milliseconds.
pub fn validate_target<Tz: TimeZone>(input: &str, now_ms: i64, tz: &Tz) -> Result<i64, FormError> {
    if input.trim().is_empty() {
        return Err(FormError::MissingTarget);
    }
    let target_ms = input_to_epoch_ms(input, tz)?;
    if target_ms <= now_ms {
        return Err(FormError::TargetNotInFuture);
    }
    Ok(target_ms)
}

/// Push the pending target `minutes` later.
///
/// Counts from the pending value when it is a valid future instant, and
/// from `now_ms` otherwise.
pub fn add_minutes<Tz: TimeZone>(input: &str, minutes: i64, now_ms: i64, tz: &Tz) -> Option<String> {
    let base_ms = input_to_epoch_ms(input, tz)
        .ok()
        .filter(|&ms| ms > now_ms)
        .unwrap_or(now_ms);
    epoch_ms_to_input(base_ms + minutes * 60_000, tz)
}

/// Nudge one field of the pending target by `amount`, carrying into the
/// neighbouring fields. Returns `None` when there is nothing to adjust.
pub fn adjust(input: &str, unit: TimeUnit, amount: i64) -> Option<String> {
    let naive = parse_input(input)?;
    naive
        .checked_add_signed(unit.duration(amount))
        .map(|dt| dt.format(DATETIME_INPUT_FORMAT).to_string())
}
