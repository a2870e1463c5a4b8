use std::f64::consts::PI;

use crate::components::constellation::rng::SeededRng;

/// One background star per this many square CSS pixels.
const STAR_DENSITY: f64 = 3000.0;
const SPAWN_CHANCE: f64 = 0.002;
const MAX_SHOOTING_STARS: usize = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct BgStar {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub opacity: f64,
	pub twinkle_speed: f64,
	pub twinkle_offset: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShootingStar {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub life: f64,
	pub max_life: f64,
	pub length: f64,
}

impl ShootingStar {
	fn progress(&self) -> f64 {
		(self.life / self.max_life).clamp(0.0, 1.0)
	}

	/// Quick fade-in over the first tenth of its life, then a linear fade-out.
	pub fn alpha(&self) -> f64 {
		let p = self.progress();
		if p < 0.1 { p * 10.0 } else { 1.0 - p }
	}

	/// End of the tail, shrinking as the star burns out.
	pub fn tail(&self) -> (f64, f64) {
		let mag = self.vx.hypot(self.vy);
		if mag == 0.0 {
			return (self.x, self.y);
		}
		let len = self.length * (1.0 - self.progress());
		(self.x - self.vx / mag * len, self.y - self.vy / mag * len)
	}
}

pub struct StarfieldState {
	pub stars: Vec<BgStar>,
	pub shooting_stars: Vec<ShootingStar>,
	pub width: f64,
	pub height: f64,
	pub time: u64,
	rng: SeededRng,
}

impl StarfieldState {
	pub fn new(width: f64, height: f64, seed: u32) -> Self {
		let mut state = Self {
			stars: Vec::new(),
			shooting_stars: Vec::new(),
			width,
			height,
			time: 0,
			rng: SeededRng::new(seed),
		};
		state.generate_stars();
		state
	}

	fn generate_stars(&mut self) {
		let count = (self.width * self.height / STAR_DENSITY).max(0.0) as usize;
		let (w, h) = (self.width, self.height);
		let rng = &mut self.rng;
		self.stars = (0..count)
			.map(|_| BgStar {
				x: rng.range(0.0, w),
				y: rng.range(0.0, h),
				radius: rng.range(0.3, 1.5),
				opacity: rng.range(0.2, 0.8),
				twinkle_speed: rng.range(0.005, 0.025),
				twinkle_offset: rng.range(0.0, 2.0 * PI),
			})
			.collect();
	}

	/// Regenerate the sky when the viewport changes size.
	pub fn resize(&mut self, width: f64, height: f64) {
		if (self.width, self.height) == (width, height) {
			return;
		}
		self.width = width;
		self.height = height;
		self.generate_stars();
	}

	pub fn tick(&mut self) {
		self.time += 1;
		self.maybe_spawn_shooting_star();
		for s in &mut self.shooting_stars {
			s.x += s.vx;
			s.y += s.vy;
			s.life += 1.0;
		}
		self.shooting_stars.retain(|s| s.life < s.max_life);
	}

	fn maybe_spawn_shooting_star(&mut self) {
		if self.rng.next_f64() >= SPAWN_CHANCE || self.shooting_stars.len() >= MAX_SHOOTING_STARS {
			return;
		}
		let angle = PI * 0.2 + self.rng.range(0.0, PI * 0.15);
		let speed = self.rng.range(4.0, 8.0);
		let star = ShootingStar {
			x: self.rng.range(0.0, self.width * 0.8),
			y: self.rng.range(0.0, self.height * 0.3),
			vx: angle.cos() * speed,
			vy: angle.sin() * speed,
			life: 0.0,
			max_life: self.rng.range(40.0, 70.0),
			length: self.rng.range(40.0, 100.0),
		};
		self.shooting_stars.push(star);
	}

	pub fn twinkle_alpha(&self, star: &BgStar) -> f64 {
		let twinkle = (self.time as f64 * star.twinkle_speed + star.twinkle_offset).sin();
		(star.opacity + twinkle * 0.15).max(0.05)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn star_count_follows_area() {
		let sky = StarfieldState::new(1200.0, 800.0, 1);
		assert_eq!(sky.stars.len(), 320);
		for star in &sky.stars {
			assert!((0.0..1200.0).contains(&star.x));
			assert!((0.0..800.0).contains(&star.y));
		}
	}

	#[test]
	fn same_seed_same_sky() {
		let a = StarfieldState::new(640.0, 480.0, 9);
		let b = StarfieldState::new(640.0, 480.0, 9);
		assert_eq!(a.stars, b.stars);
	}

	#[test]
	fn resize_regenerates() {
		let mut sky = StarfieldState::new(300.0, 300.0, 3);
		sky.resize(600.0, 300.0);
		assert_eq!(sky.stars.len(), 60);
		sky.resize(0.0, 0.0);
		assert!(sky.stars.is_empty());
	}

	#[test]
	fn shooting_stars_are_capped_and_expire() {
		let mut sky = StarfieldState::new(1000.0, 800.0, 5);
		let mut seen = 0;
		for _ in 0..50_000 {
			sky.tick();
			assert!(sky.shooting_stars.len() <= MAX_SHOOTING_STARS);
			for s in &sky.shooting_stars {
				assert!(s.life < s.max_life);
				assert!((0.0..=1.0).contains(&s.alpha()));
			}
			seen = seen.max(sky.shooting_stars.len());
		}
		assert!(seen > 0);
	}

	#[test]
	fn shooting_star_fades_in_then_out() {
		let mut s = ShootingStar {
			x: 0.0,
			y: 0.0,
			vx: 3.0,
			vy: 4.0,
			life: 0.0,
			max_life: 50.0,
			length: 50.0,
		};
		assert_eq!(s.alpha(), 0.0);
		assert_eq!(s.tail(), (-30.0, -40.0));
		s.life = 2.5;
		assert!((s.alpha() - 0.5).abs() < 1e-12);
		s.life = 40.0;
		assert!((s.alpha() - 0.2).abs() < 1e-12);
	}

	#[test]
	fn twinkle_never_fully_dark() {
		let mut sky = StarfieldState::new(200.0, 200.0, 11);
		for _ in 0..500 {
			sky.tick();
			for star in &sky.stars {
				assert!(sky.twinkle_alpha(star) >= 0.05);
			}
		}
	}
}
