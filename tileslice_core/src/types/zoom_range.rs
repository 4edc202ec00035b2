use crate::{GeoError, MAX_LEVEL};
use std::{fmt, ops::RangeInclusive};

/// Inclusive range of zoom levels.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoomRange {
	pub min: u8,
	pub max: u8,
}

impl ZoomRange {
	/// # Errors
	/// Fails if `max` exceeds the highest level or `min > max`.
	pub fn new(min: u8, max: u8) -> Result<ZoomRange, GeoError> {
		if max > MAX_LEVEL {
			return Err(GeoError::InvalidLevel(max));
		}
		if min > max {
			return Err(GeoError::InvalidZoomRange { min, max });
		}
		Ok(ZoomRange { min, max })
	}

	pub fn contains(&self, level: u8) -> bool {
		self.min <= level && level <= self.max
	}

	/// Returns `true` if every level of `other` is part of `self`.
	pub fn contains_range(&self, other: &ZoomRange) -> bool {
		self.min <= other.min && other.max <= self.max
	}

	/// Number of levels. A hand-built range with `min > max` has none.
	pub fn len(&self) -> usize {
		self.iter().len()
	}

	pub fn is_empty(&self) -> bool {
		self.min > self.max
	}

	pub fn iter(&self) -> RangeInclusive<u8> {
		self.min..=self.max
	}
}

impl fmt::Debug for ZoomRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "ZoomRange({}..={})", self.min, self.max)
	}
}

impl fmt::Display for ZoomRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}..={}", self.min, self.max)
	}
}
