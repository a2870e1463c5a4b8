//! Sentence-to-star layout.
//!
//! Stars are spread evenly along the classic parametric heart, starting at the
//! bottom tip and tracing the outline in reading order. A small jitter drawn
//! from a text-seeded RNG keeps the shape from looking mechanical while
//! leaving the result fully deterministic for a given message.

use std::f64::consts::PI;

use log::debug;

use super::rng::{SeededRng, hash_text};
use super::types::{Connection, Constellation, Star};

pub const PADDING: f64 = 0.15;
const JITTER: f64 = 0.015;

// Bounding box of the heart curve in its own coordinates.
const HEART_MIN_X: f64 = -16.0;
const HEART_MAX_X: f64 = 16.0;
const HEART_MIN_Y: f64 = -17.0;
const HEART_MAX_Y: f64 = 15.0;

/// Point on the heart curve at parameter `t`, y pointing down.
pub fn heart_point(t: f64) -> (f64, f64) {
	let x = 16.0 * t.sin().powi(3);
	let y = -(13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos());
	(x, y)
}

/// Heart position for star `i` of `n`, mapped into the padded unit square.
pub fn heart_position(i: usize, n: usize) -> (f64, f64) {
	let t = PI + (i as f64 / n as f64) * 2.0 * PI;
	let (hx, hy) = heart_point(t);
	let usable = 1.0 - 2.0 * PADDING;
	(
		PADDING + (hx - HEART_MIN_X) / (HEART_MAX_X - HEART_MIN_X) * usable,
		PADDING + (hy - HEART_MIN_Y) / (HEART_MAX_Y - HEART_MIN_Y) * usable,
	)
}

pub fn word_count(sentence: &str) -> usize {
	sentence.split_whitespace().count()
}

/// Longer sentences make brighter, larger stars, up to a cap.
pub fn star_size(sentence: &str) -> f64 {
	0.7 + (word_count(sentence) as f64 / 15.0).min(0.6)
}

/// Sequential chain `(i, i + 1)` tracing the reading order.
pub fn sequential_connections(n: usize) -> Vec<Connection> {
	(1..n).map(|to| Connection { from: to - 1, to }).collect()
}

/// Lay out one star per sentence.
///
/// `custom_positions` is used verbatim when it has exactly one entry per
/// sentence; any other length falls back to the heart layout.
pub fn generate_constellation(
	sentences: &[String],
	custom_positions: Option<&[(f64, f64)]>,
) -> Constellation {
	let n = sentences.len();
	let seed = hash_text(&sentences.concat());
	let mut rng = SeededRng::new(seed);
	let custom = custom_positions.filter(|p| p.len() == n);
	let (lo, hi) = (PADDING * 0.5, 1.0 - PADDING * 0.5);

	let stars = sentences
		.iter()
		.enumerate()
		.map(|(i, sentence)| {
			let (x, y) = match custom {
				Some(positions) => positions[i],
				None => {
					let (x, y) = heart_position(i, n);
					let x = x + rng.range(-JITTER, JITTER);
					let y = y + rng.range(-JITTER, JITTER);
					(x.clamp(lo, hi), y.clamp(lo, hi))
				}
			};
			Star {
				x,
				y,
				size: star_size(sentence),
				sentence: sentence.clone(),
			}
		})
		.collect();

	debug!(
		"laid out {} stars (seed {}, {})",
		n,
		seed,
		if custom.is_some() { "custom" } else { "heart" }
	);

	Constellation {
		stars,
		connections: sequential_connections(n),
	}
}
