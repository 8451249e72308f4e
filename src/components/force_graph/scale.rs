//! Continuous pixel-mapping scales.

/// Maps a data interval linearly onto a pixel interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
	domain: (f64, f64),
	range: (f64, f64),
}

impl LinearScale {
	pub fn new(range: (f64, f64)) -> Self {
		Self {
			domain: (0.0, 1.0),
			range,
		}
	}

	pub fn set_domain(&mut self, domain: (f64, f64)) {
		self.domain = domain;
	}

	pub fn set_range(&mut self, range: (f64, f64)) {
		self.range = range;
	}

	/// A zero-width domain maps everything to the middle of the range.
	pub fn map(&self, value: f64) -> f64 {
		let t = normalize(self.domain, value);
		self.range.0 + t * (self.range.1 - self.range.0)
	}

	pub fn invert(&self, pixel: f64) -> f64 {
		let t = normalize(self.range, pixel);
		self.domain.0 + t * (self.domain.1 - self.domain.0)
	}
}

#[cfg(test)]
impl LinearScale {
	pub fn domain(&self) -> (f64, f64) {
		self.domain
	}

	pub fn range(&self) -> (f64, f64) {
		self.range
	}
}

fn normalize((a, b): (f64, f64), value: f64) -> f64 {
	let span = b - a;
	if span == 0.0 { 0.5 } else { (value - a) / span }
}

/// Minimum and maximum of the finite values, or `None` when there are none.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
	values
		.into_iter()
		.filter(|v| v.is_finite())
		.fold(None, |acc, v| match acc {
			None => Some((v, v)),
			Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
		})
}
