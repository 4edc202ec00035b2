use std::{fmt, path::PathBuf};
use thiserror::Error;
use tileslice_core::{GeoBBox, GeoError, ZoomRange};

/// Reason an archive could not be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveUnavailableReason {
	/// The file does not exist.
	Missing,
	/// The file exists but cannot be opened for reading.
	Unreadable(String),
	/// The file is readable but is not an MBTiles database.
	NotAnArchive(String),
}

impl fmt::Display for ArchiveUnavailableReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ArchiveUnavailableReason::Missing => f.write_str("file does not exist"),
			ArchiveUnavailableReason::Unreadable(reason) => write!(f, "file is not readable: {reason}"),
			ArchiveUnavailableReason::NotAnArchive(reason) => write!(f, "not an MBTiles archive: {reason}"),
		}
	}
}

/// Everything that stops an extraction before the first tile is attempted.
#[derive(Debug, Error)]
pub enum ExtractError {
	#[error("unknown source '{id}', known sources: {}", known.join(", "))]
	UnknownSource { id: String, known: Vec<String> },

	#[error("unknown region '{id}', known regions: {}", known.join(", "))]
	UnknownRegion { id: String, known: Vec<String> },

	#[error("zoom range {requested_min}..={requested_max} is not within the source's zoom range {allowed}")]
	ZoomOutOfRange {
		requested_min: u8,
		requested_max: u8,
		allowed: ZoomRange,
	},

	#[error("requested area {requested:?} does not overlap the coverage {coverage:?} of source '{source_id}'")]
	BoundaryDisjoint {
		source_id: String,
		requested: GeoBBox,
		coverage: GeoBBox,
	},

	#[error(transparent)]
	Geo(#[from] GeoError),

	#[error("archive '{}' is unavailable: {reason}", path.display())]
	ArchiveUnavailable {
		path: PathBuf,
		reason: ArchiveUnavailableReason,
	},

	#[error("output directory '{}' cannot be used: {source}", path.display())]
	OutputUnavailable {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

impl ExtractError {
	pub(crate) fn archive(path: impl Into<PathBuf>, reason: ArchiveUnavailableReason) -> Self {
		ExtractError::ArchiveUnavailable {
			path: path.into(),
			reason,
		}
	}
}
