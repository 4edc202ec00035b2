use crate::{ExtractError, ExtractionRequest};
use std::fmt;
use tileslice_core::{TileBBox, TileCoord};

/// The tile ranges a request covers, one per zoom level, computed before
/// anything is read.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionPlan {
	pub request: ExtractionRequest,
	pub ranges: Vec<TileBBox>,
}

impl ExtractionPlan {
	pub fn new(request: ExtractionRequest) -> Result<ExtractionPlan, ExtractError> {
		let ranges = request
			.zoom
			.iter()
			.map(|level| TileBBox::from_geo(level, &request.bbox))
			.collect::<Result<Vec<_>, _>>()?;
		Ok(ExtractionPlan { request, ranges })
	}

	/// Total number of tile attempts, `Σ (colMax - colMin + 1) * (rowMax - rowMin + 1)`.
	pub fn total(&self) -> u64 {
		self.ranges.iter().map(TileBBox::count_tiles).sum()
	}

	/// All coordinates, zoom level by zoom level, each level in row-major order.
	pub fn coords(&self) -> impl Iterator<Item = TileCoord> + use<> {
		self.ranges.clone().into_iter().flat_map(|range| range.iter_coords())
	}
}

impl fmt::Display for ExtractionPlan {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.request)?;
		for range in &self.ranges {
			write!(
				f,
				"\n  zoom {:>2}: columns {}..={}, rows {}..={}, {} tiles",
				range.level,
				range.x_min,
				range.x_max,
				range.y_min,
				range.y_max,
				range.count_tiles()
			)?;
		}
		write!(f, "\n  total: {} tiles", self.total())
	}
}
