use std::time::{Duration, Instant};

/// Deadline-based debounce polled by the host loop.
///
/// Every `schedule` replaces the previous deadline, so only the last edit in
/// a burst fires.
#[derive(Debug, Clone)]
pub struct Debouncer {
	delay: Duration,
	deadline: Option<Instant>,
}

impl Debouncer {
	#[must_use]
	pub fn new(delay: Duration) -> Self {
		Self {
			delay,
			deadline: None,
		}
	}

	#[must_use]
	pub fn delay(&self) -> Duration {
		self.delay
	}

	/// Arm (or re-arm) the window starting at `now`.
	pub fn schedule(&mut self, now: Instant) {
		self.deadline = Some(now + self.delay);
	}

	pub fn cancel(&mut self) {
		self.deadline = None;
	}

	#[must_use]
	pub fn is_pending(&self) -> bool {
		self.deadline.is_some()
	}

	#[must_use]
	pub fn deadline(&self) -> Option<Instant> {
		self.deadline
	}

	/// Disarm and return `true` once `now` has reached the deadline.
	pub fn fire_if_due(&mut self, now: Instant) -> bool {
		let Some(deadline) = self.deadline else {
			return false;
		};
		if now < deadline {
			return false;
		}

		let overshoot = now.duration_since(deadline);
		if overshoot.as_millis() > 5 {
			tracing::debug!(
				overshoot_ms = overshoot.as_millis() as u64,
				delay_ms = self.delay.as_millis() as u64,
				"query debounce overshoot"
			);
		}
		self.deadline = None;
		true
	}
}
