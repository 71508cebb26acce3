//! Flip-animation state for a single on-screen digit.
//!
//! A slot is either settled on a digit or in the middle of flipping from one
//! digit to another. Every flip that starts (or restarts because the target
//! changed again mid-flight) gets a fresh epoch; the slot's timers carry the
//! epoch they were armed for, so a signal from a superseded flip is ignored.

use log::debug;
use std::rc::Rc;
use yew::Reducible;

/// Which half of the flip is currently playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipHalf {
    First,
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitState {
    Idle {
        digit: char,
    },
    Flipping {
        previous: char,
        current: char,
        half: FlipHalf,
    },
}

/// What each visual layer of a flip card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitFaces {
    /// Static upper half.
    pub top: char,
    /// Static lower half.
    pub bottom: char,
    /// Transient flipper as `(upper, lower)`, present only while flipping.
    pub flipper: Option<(char, char)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitAnimator {
    state: DigitState,
    epoch: u32,
}

/// Inputs to a digit slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitAction {
    /// The parent wants this slot to show a new digit.
    Retarget(char),
    /// The midpoint timer armed for `epoch` fired.
    Midpoint { epoch: u32 },
    /// The completion timer armed for `epoch` fired.
    Settle { epoch: u32 },
}

impl DigitAnimator {
    pub fn new(digit: char) -> Self {
        Self {
            state: DigitState::Idle { digit },
            epoch: 0,
        }
    }

    pub fn state(&self) -> DigitState {
        self.state
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn is_flipping(&self) -> bool {
        matches!(self.state, DigitState::Flipping { .. })
    }

    /// The digit the slot has committed to showing.
    pub fn current(&self) -> char {
        match self.state {
            DigitState::Idle { digit } => digit,
            DigitState::Flipping { current, .. } => current,
        }
    }

    /// Point the slot at `target`. Returns true when a flip started or
    /// restarted.
    ///
    /// A retarget during a flip abandons the in-flight one: the committed
    /// digit becomes the new `previous`, so the two faces always differ.
    pub fn retarget(&mut self, target: char) -> bool {
        let committed = self.current();
        if committed == target {
            return false;
        }
        if self.is_flipping() {
            debug!("digit flip {} superseded by {}", committed, target);
        }
        self.epoch = self.epoch.wrapping_add(1);
        self.state = DigitState::Flipping {
            previous: committed,
            current: target,
            half: FlipHalf::First,
        };
        true
    }

    /// Advance to the second half of the flip armed for `epoch`.
    pub fn reach_midpoint(&mut self, epoch: u32) -> bool {
        if epoch != self.epoch {
            debug!("ignoring stale midpoint for epoch {}", epoch);
            return false;
        }
        match &mut self.state {
            DigitState::Flipping { half, .. } if *half == FlipHalf::First => {
                *half = FlipHalf::Second;
                true
            }
            _ => false,
        }
    }

    /// Finish the flip armed for `epoch`.
    pub fn settle(&mut self, epoch: u32) -> bool {
        if epoch != self.epoch {
            debug!("ignoring stale settle for epoch {}", epoch);
            return false;
        }
        match self.state {
            DigitState::Flipping { current, .. } => {
                self.state = DigitState::Idle { digit: current };
                true
            }
            DigitState::Idle { .. } => false,
        }
    }

    pub fn apply(&mut self, action: DigitAction) -> bool {
        match action {
            DigitAction::Retarget(target) => self.retarget(target),
            DigitAction::Midpoint { epoch } => self.reach_midpoint(epoch),
            DigitAction::Settle { epoch } => self.settle(epoch),
        }
    }

    pub fn faces(&self) -> DigitFaces {
        match self.state {
            DigitState::Idle { digit } => DigitFaces {
                top: digit,
                bottom: digit,
                flipper: None,
            },
            // The lower half switches to the new digit at the midpoint so
            // nothing pops when the flipper is removed.
            DigitState::Flipping {
                previous,
                current,
                half,
            } => DigitFaces {
                top: current,
                bottom: match half {
                    FlipHalf::First => previous,
                    FlipHalf::Second => current,
                },
                flipper: Some((previous, current)),
            },
        }
    }
}

impl Reducible for DigitAnimator {
    type Action = DigitAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = *self;
        if next.apply(action) {
            Rc::new(next)
        } else {
            self
        }
    }
}
