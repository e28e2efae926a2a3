//! Vesting schedule evaluation.
//!
//! ```text
//! t <  start + cliff       vested = 0
//! t >= start + duration    vested = total
//! otherwise                vested = total * (t - (start + cliff))
//!                                   / max(1, duration - cliff)
//! locked = total - vested
//! ```

use cryptotoolbox_types::{Result, ToolboxError};
use serde::{Deserialize, Serialize};

/// Current wall-clock time in whole seconds since the Unix epoch.
pub fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}

// ---------------------------------------------------------------------------
// VestingSchedule
// ---------------------------------------------------------------------------

/// Cliff + linear vesting schedule.
///
/// # Invariants
///
/// - `total_amount` is finite and `>= 0`.
/// - `duration_seconds >= cliff_seconds >= 0`.
///
/// `duration_seconds` is measured from `start_time` and includes the
/// cliff, so tokens unlock linearly over `duration - cliff` seconds.
///
/// Deserializing goes through [`VestingSchedule::new`], so a schedule read
/// from JSON is validated like one built in code.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScheduleFields")]
pub struct VestingSchedule {
    total_amount: f64,
    start_time: i64,
    cliff_seconds: i64,
    duration_seconds: i64,
}

impl VestingSchedule {
    /// Creates a validated schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ToolboxError::InvalidSchedule`] if the amount is negative
    /// or not finite, the cliff is negative, or the duration is shorter
    /// than the cliff.
    pub fn new(
        total_amount: f64,
        start_time: i64,
        cliff_seconds: i64,
        duration_seconds: i64,
    ) -> Result<Self> {
        if !total_amount.is_finite() || total_amount < 0.0 {
            return Err(ToolboxError::InvalidSchedule {
                reason: format!("total_amount must be finite and >= 0, got {total_amount}"),
            });
        }
        if cliff_seconds < 0 {
            return Err(ToolboxError::InvalidSchedule {
                reason: format!("cliff_seconds must be >= 0, got {cliff_seconds}"),
            });
        }
        if duration_seconds < cliff_seconds {
            return Err(ToolboxError::InvalidSchedule {
                reason: format!(
                    "duration_seconds ({duration_seconds}) must be >= cliff_seconds ({cliff_seconds})"
                ),
            });
        }

        Ok(Self {
            total_amount,
            start_time,
            cliff_seconds,
            duration_seconds,
        })
    }

    // -- Accessors --------------------------------------------------------

    /// Total number of tokens under vesting.
    pub fn total_amount(&self) -> f64 {
        self.total_amount
    }

    /// Vesting start, seconds since epoch.
    pub fn start_time(&self) -> i64 {
        self.start_time
    }

    /// Offset of the cliff from `start_time`, in seconds.
    pub fn cliff_seconds(&self) -> i64 {
        self.cliff_seconds
    }

    /// Offset of full vesting from `start_time`, in seconds.
    pub fn duration_seconds(&self) -> i64 {
        self.duration_seconds
    }

    /// Absolute timestamp of the cliff.
    pub fn cliff_time(&self) -> i64 {
        self.start_time.saturating_add(self.cliff_seconds)
    }

    /// Absolute timestamp at which everything is vested.
    pub fn end_time(&self) -> i64 {
        self.start_time.saturating_add(self.duration_seconds)
    }

    // -- Queries ----------------------------------------------------------

    /// Amount vested (unlocked) at `t`, or now when `t` is `None`.
    pub fn vested_at(&self, t: Option<i64>) -> f64 {
        let t = t.unwrap_or_else(now_unix);

        if t < self.cliff_time() {
            return 0.0;
        }
        if t >= self.end_time() {
            return self.total_amount;
        }

        // Only reachable when duration > cliff, so the guard never fires
        // for a validated schedule. Clamp so a vested amount can never
        // exceed the total.
        let elapsed = t.saturating_sub(self.cliff_time());
        let linear_span = self.duration_seconds.saturating_sub(self.cliff_seconds).max(1);
        let vested = self.total_amount * (elapsed as f64 / linear_span as f64);
        vested.clamp(0.0, self.total_amount)
    }

    /// Amount still locked at `t`, or now when `t` is `None`.
    pub fn locked_at(&self, t: Option<i64>) -> f64 {
        self.total_amount - self.vested_at(t)
    }

    /// Amount vested right now.
    pub fn vested_now(&self) -> f64 {
        self.vested_at(None)
    }

    /// Amount locked right now.
    pub fn locked_now(&self) -> f64 {
        self.locked_at(None)
    }

    /// Evaluates the schedule once at `t` (or now) and bundles the result.
    pub fn report_at(&self, t: Option<i64>) -> VestingReport {
        let when = t.unwrap_or_else(now_unix);
        let vested = self.vested_at(Some(when));
        let report = VestingReport {
            vested,
            locked: self.total_amount - vested,
            when,
        };
        tracing::debug!(when, vested, locked = report.locked, "vesting evaluated");
        report
    }
}

/// Unvalidated wire form of [`VestingSchedule`].
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ScheduleFields {
    total_amount: f64,
    start_time: i64,
    cliff_seconds: i64,
    duration_seconds: i64,
}

impl TryFrom<ScheduleFields> for VestingSchedule {
    type Error = ToolboxError;

    fn try_from(f: ScheduleFields) -> Result<Self> {
        Self::new(f.total_amount, f.start_time, f.cliff_seconds, f.duration_seconds)
    }
}

// ---------------------------------------------------------------------------
// VestingReport
// ---------------------------------------------------------------------------

/// Vested/locked split at a point in time.
///
/// Serializes as `{"vested": <number>, "locked": <number>, "when": <int>}`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct VestingReport {
    /// Unlocked amount.
    pub vested: f64,
    /// Still-locked amount.
    pub locked: f64,
    /// Evaluation timestamp, seconds since epoch.
    pub when: i64,
}
