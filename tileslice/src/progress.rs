//! Terminal progress bar for extraction runs.
//!
//! Fed from exporter progress events; draws a single line on stderr:
//! `extracting▕███████▍   ▏1234/5000 ( 24%) 312/s  0:12`

use std::{
	io::Write,
	sync::{Mutex, PoisonError},
	time::{Duration, Instant},
};

const REDRAW_INTERVAL: Duration = Duration::from_millis(500);

struct BarState {
	position: u64,
	total: u64,
	start: Instant,
	next_draw: Instant,
	finished: bool,
}

pub struct ProgressBar {
	message: String,
	state: Mutex<BarState>,
	enabled: bool,
}

impl ProgressBar {
	/// A bar that draws only when `enabled` is set, e.g. when stderr is a terminal.
	pub fn new(message: &str, enabled: bool) -> ProgressBar {
		let now = Instant::now();
		ProgressBar {
			message: message.to_string(),
			state: Mutex::new(BarState {
				position: 0,
				total: 0,
				start: now,
				next_draw: now,
				finished: false,
			}),
			enabled,
		}
	}

	pub fn set_position(&self, position: u64, total: u64) {
		let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
		state.total = total;
		state.position = position.min(total);
		let now = Instant::now();
		if state.finished || now < state.next_draw {
			return;
		}
		state.next_draw = now + REDRAW_INTERVAL;
		self.draw(&state);
	}

	/// Draws the final state and moves to the next line.
	pub fn finish(&self) {
		let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
		if state.finished {
			return;
		}
		state.finished = true;
		self.draw(&state);
		if self.enabled {
			eprintln!();
		}
	}

	fn draw(&self, state: &BarState) {
		if !self.enabled {
			return;
		}
		let line = render_line(
			&self.message,
			state.position,
			state.total,
			state.start.elapsed(),
			terminal_width(),
		);
		let mut output = std::io::stderr();
		let _ = write!(output, "\r\x1b[2K{line}");
		let _ = output.flush();
	}
}

fn render_line(message: &str, position: u64, total: u64, elapsed: Duration, width: usize) -> String {
	let total = total.max(1);
	let position = position.min(total);
	let seconds = elapsed.as_secs_f64();
	let per_sec = if seconds > 0.0 { position as f64 / seconds } else { 0.0 };
	let eta = if position > 0 {
		seconds * ((total - position) as f64 / position as f64)
	} else {
		0.0
	};

	let percent = position * 100 / total;
	let rate = format_rate(per_sec);
	let eta = format_eta(Duration::from_secs_f64(eta));
	let line = |bar: &str| format!("{message}▕{bar}▏{position}/{total} ({percent:>3}%) {rate:>5} {eta:>5}");

	let bar_width = width.saturating_sub(line("").chars().count());
	line(&make_bar(position, total, bar_width))
}

/// Tiles per second, shortened with a `k`, `M` or `G` suffix.
fn format_rate(per_sec: f64) -> String {
	if !per_sec.is_finite() || per_sec < 0.0 {
		return "--/s".to_string();
	}
	let mut value = per_sec;
	for suffix in ["", "k", "M"] {
		if value < 1_000.0 {
			return if suffix.is_empty() {
				format!("{value:.0}/s")
			} else {
				format!("{value:.1}{suffix}/s")
			};
		}
		value /= 1_000.0;
	}
	format!("{value:.1}G/s")
}

/// Remaining time as `45s`, `12:34` or `3:05:42`; beyond a day as `2d03h`.
fn format_eta(remaining: Duration) -> String {
	let secs = remaining.as_secs();
	let (hours, minutes, seconds) = (secs / 3_600, secs / 60 % 60, secs % 60);
	match secs {
		0..60 => format!("{seconds}s"),
		60..3_600 => format!("{minutes:02}:{seconds:02}"),
		3_600..86_400 => format!("{hours}:{minutes:02}:{seconds:02}"),
		_ => format!("{}d{:02}h", hours / 24, hours % 24),
	}
}

fn terminal_width() -> usize {
	terminal_size::terminal_size().map_or(80, |(width, _)| usize::from(width.0.max(10)))
}

fn make_bar(position: u64, total: u64, width: usize) -> String {
	// eighths of a cell, thinnest first
	const PARTIALS: [char; 7] = ['▏', '▎', '▍', '▌', '▋', '▊', '▉'];

	let width = width.max(1);
	let frac = (position as f64 / total.max(1) as f64).clamp(0.0, 1.0);
	let exact = frac * width as f64;
	let whole = (exact.floor() as usize).min(width);

	let mut bar = "█".repeat(whole);
	if whole < width {
		let eighths = ((exact - whole as f64) * 8.0).floor() as usize;
		bar.push(if eighths > 0 { PARTIALS[eighths.min(7) - 1] } else { ' ' });
		bar.push_str(&" ".repeat(width - whole - 1));
	}
	bar
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	#[rstest]
	#[case(0, 10, 4, "    ")]
	#[case(10, 10, 4, "████")]
	#[case(5, 10, 4, "██  ")]
	#[case(9, 16, 2, "█▏")]
	#[case(3, 8, 1, "▍")]
	#[case(20, 10, 3, "███")]
	fn bars(#[case] position: u64, #[case] total: u64, #[case] width: usize, #[case] expected: &str) {
		assert_eq!(make_bar(position, total, width), expected);
		assert_eq!(make_bar(position, total, width).chars().count(), width);
	}

	#[rstest]
	#[case(0, "0s")]
	#[case(59, "59s")]
	#[case(754, "12:34")]
	#[case(11_142, "3:05:42")]
	#[case(183_600, "2d03h")]
	fn etas(#[case] seconds: u64, #[case] expected: &str) {
		assert_eq!(format_eta(Duration::from_secs(seconds)), expected);
	}

	#[test]
	fn rates() {
		assert_eq!(format_rate(12.4), "12/s");
		assert_eq!(format_rate(1_234.0), "1.2k/s");
		assert_eq!(format_rate(2_500_000.0), "2.5M/s");
		assert_eq!(format_rate(3_000_000_000.0), "3.0G/s");
		assert_eq!(format_rate(f64::INFINITY), "--/s");
	}

	#[test]
	fn line_fills_the_width() {
		let line = render_line("extracting", 5, 10, Duration::from_secs(5), 60);
		assert!(line.starts_with("extracting▕"));
		assert!(line.ends_with("▏5/10 ( 50%)   1/s    5s"));
		assert_eq!(line.chars().count(), 60);
	}

	#[test]
	fn disabled_bar_is_silent() {
		let bar = ProgressBar::new("x", false);
		bar.set_position(3, 5);
		bar.finish();
		bar.finish();
	}
}
