/// Pause gate between a finished sequence and the next preset.
///
/// Holding starts on the falling edge of "sequence active" between two
/// observations, so sitting idle across many ticks never re-arms it.
#[derive(Clone, Debug)]
pub struct HoldTimer {
    hold_ms: f64,
    was_active: bool,
    hold_start_ms: Option<f64>,
}

impl HoldTimer {
    /// `was_active` starts true: the controller begins with a running sequence.
    pub fn new(hold_ms: f64) -> Self {
        Self {
            hold_ms,
            was_active: true,
            hold_start_ms: None,
        }
    }

    /// Record this tick's sequence state. Returns true when a hold just began.
    pub fn observe(&mut self, active: bool, now_ms: f64) -> bool {
        let falling = self.was_active && !active;
        self.was_active = active;
        if falling {
            self.hold_start_ms = Some(now_ms);
        }
        falling
    }

    pub fn is_expired(&self, now_ms: f64) -> bool {
        self.hold_start_ms
            .is_some_and(|start| now_ms - start > self.hold_ms)
    }

    /// End any hold and treat the sequence as active again.
    ///
    /// Called when a sequence starts, so one that completes within the same
    /// tick still produces a falling edge on the next observation.
    pub fn arm(&mut self) {
        self.hold_start_ms = None;
        self.was_active = true;
    }

    pub fn is_holding(&self) -> bool {
        self.hold_start_ms.is_some()
    }

    pub fn hold_start_ms(&self) -> Option<f64> {
        self.hold_start_ms
    }

    pub fn hold_ms(&self) -> f64 {
        self.hold_ms
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequencer/hold.rs"]
mod tests;
