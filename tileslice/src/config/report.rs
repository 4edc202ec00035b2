use std::fmt;

/// Outcome of [`Config::validate`](super::Config::validate).
///
/// Errors make the configuration unusable, warnings do not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigReport {
	pub errors: Vec<String>,
	pub warnings: Vec<String>,
}

impl ConfigReport {
	pub fn error(&mut self, message: impl Into<String>) {
		self.errors.push(message.into());
	}

	pub fn warning(&mut self, message: impl Into<String>) {
		self.warnings.push(message.into());
	}

	pub fn is_valid(&self) -> bool {
		self.errors.is_empty()
	}
}

impl fmt::Display for ConfigReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if !self.errors.is_empty() {
			writeln!(f, "errors ({}):", self.errors.len())?;
			for error in &self.errors {
				writeln!(f, "  - {error}")?;
			}
		}
		if !self.warnings.is_empty() {
			writeln!(f, "warnings ({}):", self.warnings.len())?;
			for warning in &self.warnings {
				writeln!(f, "  - {warning}")?;
			}
		}
		if self.errors.is_empty() && self.warnings.is_empty() {
			writeln!(f, "configuration is valid")?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn display() {
		let mut report = ConfigReport::default();
		assert_eq!(report.to_string(), "configuration is valid\n");

		report.error("source 'a' is missing field 'path'");
		report.warning("no regions defined");
		assert!(!report.is_valid());
		assert_eq!(
			report.to_string(),
			"errors (1):\n  - source 'a' is missing field 'path'\nwarnings (1):\n  - no regions defined\n"
		);
	}
}
