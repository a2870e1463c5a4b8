//! Deterministic randomness for layouts.
//!
//! A constellation must look the same every time its message is opened, so
//! every random draw in the layout is taken from a [`SeededRng`] whose seed is
//! derived from the message text by [`hash_text`].

/// Mulberry32 generator: a 32-bit counter pushed through an integer mixing
/// permutation. Cheap, restartable and well distributed for the few hundred
/// draws a layout needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededRng {
	state: u32,
}

impl SeededRng {
	pub fn new(seed: u32) -> Self {
		Self { state: seed }
	}

	/// Next value, uniform in `[0, 1)`.
	pub fn next_f64(&mut self) -> f64 {
		self.state = self.state.wrapping_add(0x6d2b_79f5);
		let mut t = self.state;
		t = (t ^ (t >> 15)).wrapping_mul(t | 1);
		t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
		f64::from(t ^ (t >> 14)) / 4_294_967_296.0
	}

	/// Next value, uniform in `[min, max)`.
	pub fn range(&mut self, min: f64, max: f64) -> f64 {
		min + self.next_f64() * (max - min)
	}
}

impl Iterator for SeededRng {
	type Item = f64;

	fn next(&mut self) -> Option<f64> {
		Some(self.next_f64())
	}
}

/// Java-style `h * 31 + c` rolling hash over UTF-16 code units, folded to a
/// non-negative value. Depends only on the code units, so the seed for a
/// message is identical on every platform and every run.
pub fn hash_text(text: &str) -> u32 {
	let hash = text.encode_utf16().fold(0i32, |hash, unit| {
		(hash << 5).wrapping_sub(hash).wrapping_add(i32::from(unit))
	});
	hash.unsigned_abs()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn same_seed_same_stream() {
		let a: Vec<f64> = SeededRng::new(42).take(64).collect();
		let b: Vec<f64> = SeededRng::new(42).take(64).collect();
		assert_eq!(a, b);
	}

	#[test]
	fn different_seeds_diverge() {
		let a: Vec<f64> = SeededRng::new(1).take(8).collect();
		let b: Vec<f64> = SeededRng::new(2).take(8).collect();
		assert_ne!(a, b);
	}

	#[test]
	fn values_stay_in_unit_interval() {
		for v in SeededRng::new(0xdead_beef).take(10_000) {
			assert!((0.0..1.0).contains(&v), "{v} out of range");
		}
	}

	#[test]
	fn stream_is_roughly_uniform() {
		let mut buckets = [0usize; 10];
		for v in SeededRng::new(7).take(10_000) {
			buckets[(v * 10.0) as usize] += 1;
		}
		for count in buckets {
			assert!((800..1200).contains(&count), "bucket count {count}");
		}
	}

	#[test]
	fn range_respects_bounds() {
		let mut rng = SeededRng::new(99);
		for _ in 0..1000 {
			let v = rng.range(-0.015, 0.015);
			assert!((-0.015..0.015).contains(&v));
		}
	}

	#[test]
	fn hash_matches_known_values() {
		assert_eq!(hash_text(""), 0);
		assert_eq!(hash_text("a"), 97);
		assert_eq!(hash_text("ab"), 97 * 31 + 98);
		assert_eq!(hash_text("hello"), 99_162_322);
	}

	#[test]
	fn hash_is_stable_for_long_text() {
		let long = "You are the reason I look up at the stars".repeat(20);
		assert_eq!(hash_text(&long), hash_text(&long));
	}

	#[test]
	fn hash_uses_utf16_units() {
		// U+1F31F is a surrogate pair: two units, not one code point.
		let expected = (0xd83ci32 * 31 + 0xdf1f) as u32;
		assert_eq!(hash_text("\u{1f31f}"), expected);
	}
}
