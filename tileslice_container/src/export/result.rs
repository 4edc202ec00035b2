use std::{collections::BTreeMap, fmt, path::PathBuf};

/// Lifecycle of a run: `Validating → Enumerating → Fetching → Writing →
/// Completed`, or `Aborted` from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
	/// Resolving source and region, checking zoom and boundary.
	Validating,
	/// Computing the tile ranges per zoom level.
	Enumerating,
	/// Fetching tiles from the archive and writing them out.
	Fetching,
	/// Finishing the output tree (tile indexes).
	Writing,
	Completed,
	Aborted,
}

impl fmt::Display for RunState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			RunState::Validating => "validating",
			RunState::Enumerating => "enumerating",
			RunState::Fetching => "fetching",
			RunState::Writing => "writing",
			RunState::Completed => "completed",
			RunState::Aborted => "aborted",
		})
	}
}

/// Summary of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
	pub source_id: String,
	pub region_name: String,
	/// Directory holding the `<z>/<x>/<y>.<ext>` tree.
	pub region_dir: PathBuf,
	pub written: u64,
	pub not_found: u64,
	pub read_failed: u64,
	pub write_failed: u64,
	/// Tiles attempted on each zoom level.
	pub attempted_per_zoom: BTreeMap<u8, u64>,
	/// Number of tiles planned before the run started.
	pub planned: u64,
	pub state: RunState,
	pub warnings: Vec<String>,
}

impl ExtractionResult {
	pub(crate) fn new(source_id: &str, region_name: &str, region_dir: PathBuf, planned: u64) -> Self {
		ExtractionResult {
			source_id: source_id.to_string(),
			region_name: region_name.to_string(),
			region_dir,
			written: 0,
			not_found: 0,
			read_failed: 0,
			write_failed: 0,
			attempted_per_zoom: BTreeMap::new(),
			planned,
			state: RunState::Fetching,
			warnings: vec![],
		}
	}

	pub fn attempted(&self) -> u64 {
		self.attempted_per_zoom.values().sum()
	}

	/// A run succeeds if it completed and wrote at least one tile.
	pub fn is_success(&self) -> bool {
		self.state == RunState::Completed && self.written > 0
	}
}

impl fmt::Display for ExtractionResult {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(
			f,
			"extraction of '{}' from '{}' {}",
			self.region_name, self.source_id, self.state
		)?;
		writeln!(f, "  output:       {}", self.region_dir.display())?;
		writeln!(f, "  attempted:    {} of {}", self.attempted(), self.planned)?;
		writeln!(f, "  written:      {}", self.written)?;
		writeln!(f, "  not found:    {}", self.not_found)?;
		writeln!(f, "  read failed:  {}", self.read_failed)?;
		write!(f, "  write failed: {}", self.write_failed)?;
		for (level, count) in &self.attempted_per_zoom {
			write!(f, "\n  zoom {level:>2}:      {count} attempted")?;
		}
		for warning in &self.warnings {
			write!(f, "\n  warning: {warning}")?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn success_needs_completion_and_tiles() {
		let mut result = ExtractionResult::new("turkey", "ankara", PathBuf::from("tiles/ankara"), 3);
		result.state = RunState::Completed;
		assert!(!result.is_success());

		result.written = 1;
		assert!(result.is_success());

		result.state = RunState::Aborted;
		assert!(!result.is_success());
	}

	#[test]
	fn summary() {
		let mut result = ExtractionResult::new("turkey", "ankara", PathBuf::from("tiles/ankara"), 5);
		result.state = RunState::Completed;
		result.written = 4;
		result.not_found = 1;
		result.attempted_per_zoom.insert(6, 1);
		result.attempted_per_zoom.insert(8, 4);
		result.warnings.push("clipped".to_string());
		assert_eq!(result.attempted(), 5);
		assert_eq!(
			result.to_string(),
			"extraction of 'ankara' from 'turkey' completed\n  output:       tiles/ankara\n  attempted:    5 of 5\n  written:      4\n  not found:    1\n  read failed:  0\n  write failed: 0\n  zoom  6:      1 attempted\n  zoom  8:      4 attempted\n  warning: clipped"
		);
	}
}
