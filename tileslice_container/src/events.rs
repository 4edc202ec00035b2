//! Events emitted while an extraction runs.
//!
//! Listeners subscribe to an [`EventBus`] and are called synchronously, in
//! subscription order, for every event. The reporting layer (progress bars,
//! summaries) lives entirely in listeners; the exporter never prints.

use crate::RunState;
use arc_swap::ArcSwap;
use std::sync::Arc;
use tileslice_core::TileCoord;

/// Something that happened during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportEvent {
	/// The run moved to a new state.
	State(RunState),

	/// One more tile was attempted. `total` is known before the first attempt.
	Progress { attempted: u64, total: u64 },

	/// A tile could not be read from the archive.
	ReadFailed { coord: TileCoord, reason: String },

	/// A tile could not be written to the output tree.
	WriteFailed { coord: TileCoord, reason: String },

	/// A non-fatal condition, e.g. a clipped request.
	Warning { message: String },
}

/// Identifier returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

type EventListener = Arc<dyn Fn(&ExportEvent) + Send + Sync>;

/// Thread-safe list of event listeners.
///
/// Emitting only loads the current listener list, so frequent progress events
/// never contend with each other.
#[derive(Clone)]
pub struct EventBus {
	listeners: Arc<ArcSwap<Vec<EventListener>>>,
}

impl EventBus {
	pub fn new() -> Self {
		Self {
			listeners: Arc::new(ArcSwap::from_pointee(Vec::new())),
		}
	}

	/// Registers `listener` for all future events.
	pub fn subscribe<F>(&self, listener: F) -> ListenerId
	where
		F: Fn(&ExportEvent) + Send + Sync + 'static,
	{
		let listener: EventListener = Arc::new(listener);
		let id = self.listeners.load().len();
		self.listeners.rcu(|old| {
			let mut new = (**old).clone();
			new.push(listener.clone());
			new
		});
		ListenerId(id)
	}

	/// Calls every listener with `event`.
	///
	/// A panicking listener does not prevent the others from being called.
	pub fn emit(&self, event: ExportEvent) {
		let listeners = self.listeners.load();
		for listener in listeners.iter() {
			let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
				listener(&event);
			}));
		}
	}

	pub fn state(&self, state: RunState) {
		self.emit(ExportEvent::State(state));
	}

	pub fn progress(&self, attempted: u64, total: u64) {
		self.emit(ExportEvent::Progress { attempted, total });
	}

	pub fn warn(&self, message: String) {
		self.emit(ExportEvent::Warning { message });
	}

	pub fn listener_count(&self) -> usize {
		self.listeners.load().len()
	}
}

impl Default for EventBus {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for EventBus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EventBus")
			.field("listeners", &self.listener_count())
			.finish()
	}
}
