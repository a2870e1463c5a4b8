//! Transforms between normalized layout space and canvas pixels.

/// How the unit square is fitted onto a canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mapping {
	/// Each axis scaled independently; the shape distorts with aspect ratio.
	#[allow(dead_code)]
	Stretch,
	/// Centered `side x side` square with `side = min(width, height)`.
	#[default]
	AspectFit,
}

impl Mapping {
	/// Scale per axis and offset of the mapped region.
	fn frame(self, width: f64, height: f64) -> (f64, f64, f64, f64) {
		match self {
			Mapping::Stretch => (width, height, 0.0, 0.0),
			Mapping::AspectFit => {
				let side = width.min(height);
				(side, side, (width - side) / 2.0, (height - side) / 2.0)
			}
		}
	}

	pub fn to_pixel(self, x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
		let (sx, sy, ox, oy) = self.frame(width, height);
		(ox + x * sx, oy + y * sy)
	}

	/// Inverse of [`Mapping::to_pixel`]. A zero-sized canvas maps everything
	/// to the origin.
	pub fn to_normalized(self, px: f64, py: f64, width: f64, height: f64) -> (f64, f64) {
		let (sx, sy, ox, oy) = self.frame(width, height);
		let x = if sx > 0.0 { (px - ox) / sx } else { 0.0 };
		let y = if sy > 0.0 { (py - oy) / sy } else { 0.0 };
		(x, y)
	}
}

/// Default padding applied to user-arranged positions before sharing.
pub const NORMALIZE_PAD: f64 = 0.08;

/// Rescale `positions` uniformly into `[pad, 1 - pad]` on both axes, keeping
/// their relative shape and centering the short axis.
pub fn normalize_positions(positions: &[(f64, f64)], pad: f64) -> Vec<(f64, f64)> {
	match positions {
		[] => return Vec::new(),
		[_] => return vec![(0.5, 0.5)],
		_ => {}
	}

	let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
	let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
	for &(x, y) in positions {
		min_x = min_x.min(x);
		max_x = max_x.max(x);
		min_y = min_y.min(y);
		max_y = max_y.max(y);
	}

	let range_x = if max_x - min_x == 0.0 { 1.0 } else { max_x - min_x };
	let range_y = if max_y - min_y == 0.0 { 1.0 } else { max_y - min_y };
	let usable = 1.0 - pad * 2.0;
	let scale = usable / range_x.max(range_y);
	let off_x = pad + (usable - range_x * scale) / 2.0;
	let off_y = pad + (usable - range_y * scale) / 2.0;

	positions
		.iter()
		.map(|&(x, y)| (off_x + (x - min_x) * scale, off_y + (y - min_y) * scale))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	const EPS: f64 = 1e-9;

	fn close(a: (f64, f64), b: (f64, f64)) -> bool {
		(a.0 - b.0).abs() < EPS && (a.1 - b.1).abs() < EPS
	}

	#[test]
	fn aspect_fit_centers_square_on_wide_canvas() {
		assert_eq!(Mapping::AspectFit.to_pixel(0.0, 0.0, 1000.0, 600.0), (200.0, 0.0));
		assert_eq!(Mapping::AspectFit.to_pixel(1.0, 1.0, 1000.0, 600.0), (800.0, 600.0));
		assert_eq!(Mapping::AspectFit.to_pixel(0.5, 0.5, 400.0, 900.0), (200.0, 450.0));
	}

	#[test]
	fn stretch_scales_axes_independently() {
		assert_eq!(Mapping::Stretch.to_pixel(0.5, 0.25, 1000.0, 600.0), (500.0, 150.0));
	}

	#[test]
	fn round_trip_both_policies() {
		let points = [(0.0, 0.0), (0.13, 0.87), (0.5, 0.5), (0.999, 0.001)];
		let canvases = [(800.0, 600.0), (375.0, 812.0), (512.0, 512.0)];
		for mapping in [Mapping::Stretch, Mapping::AspectFit] {
			for &(w, h) in &canvases {
				for &(x, y) in &points {
					let (px, py) = mapping.to_pixel(x, y, w, h);
					assert!(close(mapping.to_normalized(px, py, w, h), (x, y)));
				}
			}
		}
	}

	#[test]
	fn zero_canvas_does_not_divide_by_zero() {
		let (x, y) = Mapping::AspectFit.to_normalized(10.0, 10.0, 0.0, 300.0);
		assert!(x.is_finite() && y.is_finite());
	}

	#[test]
	fn normalize_empty_and_single() {
		assert!(normalize_positions(&[], NORMALIZE_PAD).is_empty());
		assert_eq!(normalize_positions(&[(0.9, 0.1)], NORMALIZE_PAD), vec![(0.5, 0.5)]);
	}

	#[test]
	fn normalize_fits_padded_box_preserving_shape() {
		let input = [(0.0, 0.0), (2.0, 0.0), (2.0, 1.0)];
		let out = normalize_positions(&input, 0.1);
		// width is the long axis: spans the whole usable range
		assert!(close(out[0], (0.1, 0.3)));
		assert!(close(out[1], (0.9, 0.3)));
		assert!(close(out[2], (0.9, 0.7)));
	}

	#[test]
	fn normalize_handles_degenerate_axis() {
		let input = [(0.3, 0.2), (0.3, 0.8)];
		let out = normalize_positions(&input, NORMALIZE_PAD);
		for &(x, y) in &out {
			assert!(x.is_finite() && y.is_finite());
			assert!(x >= NORMALIZE_PAD - EPS && x <= 1.0 - NORMALIZE_PAD + EPS);
			assert!(y >= NORMALIZE_PAD - EPS && y <= 1.0 - NORMALIZE_PAD + EPS);
		}
		// the flat axis is treated as a unit range and starts at the padding
		assert!((out[0].0 - NORMALIZE_PAD).abs() < EPS);
		assert!((out[0].1 - 0.248).abs() < EPS);
		assert!((out[1].1 - 0.752).abs() < EPS);
	}

	#[test]
	fn normalize_identical_points_collapse_to_corner_of_range() {
		let out = normalize_positions(&[(0.4, 0.4), (0.4, 0.4)], NORMALIZE_PAD);
		assert_eq!(out[0], out[1]);
		assert!(out[0].0.is_finite());
	}
}
