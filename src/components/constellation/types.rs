/// One sentence of the message, placed in normalized layout space.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
	pub x: f64,
	pub y: f64,
	pub size: f64,
	pub sentence: String,
}

impl Star {
	pub fn position(&self) -> (f64, f64) {
		(self.x, self.y)
	}
}

/// Edge between two stars, `from` drawn toward `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Connection {
	pub from: usize,
	pub to: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Constellation {
	pub stars: Vec<Star>,
	pub connections: Vec<Connection>,
}

impl Constellation {
	pub fn len(&self) -> usize {
		self.stars.len()
	}

	pub fn positions(&self) -> Vec<(f64, f64)> {
		self.stars.iter().map(Star::position).collect()
	}
}
