use std::sync::{
	Arc,
	atomic::{AtomicBool, Ordering},
};

/// Cooperative cancellation flag shared between a run and whoever may stop it.
///
/// The exporter checks the flag before starting each tile attempt. Attempts
/// already in flight are finished and counted. A raised flag stays raised
/// until [`reset`](Self::reset), so it stops every later run as well.
#[derive(Clone, Debug, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn raise(&self) {
		self.0.store(true, Ordering::SeqCst);
	}

	/// Lowers the flag again so that the next run can proceed.
	pub fn reset(&self) {
		self.0.store(false, Ordering::SeqCst);
	}

	pub fn is_raised(&self) -> bool {
		self.0.load(Ordering::SeqCst)
	}
}
