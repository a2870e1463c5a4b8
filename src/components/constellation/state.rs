use log::{debug, info};

use super::scale::Mapping;
use super::types::Constellation;

/// Base star radius in CSS pixels, multiplied by the star's size.
pub const STAR_RADIUS: f64 = 3.0;
pub const HOVER_GROWTH: f64 = 2.0;
pub const DRAG_MIN: f64 = 0.05;
pub const DRAG_MAX: f64 = 0.95;

const TOOLTIP_FADE_IN: f64 = 0.06;
const TOOLTIP_FADE_OUT: f64 = 0.08;
const FLASH_FLOOR: f64 = 0.001;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionMode {
	/// Hover and tooltips only.
	#[default]
	Passive,
	/// Recipient view: stars are read one at a time, in order.
	Reading,
	/// Creation view: stars can be dragged to new positions.
	Drag,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneOptions {
	/// Per-frame easing factor of star alphas.
	pub star_ease: f64,
	/// Per-frame easing factor of connection progress.
	pub line_ease: f64,
	/// Per-frame multiplier applied to flash intensity.
	pub flash_decay: f64,
	/// Hit radius in CSS pixels.
	pub hit_radius: f64,
	/// Stars at or below this alpha cannot be hovered or grabbed.
	pub visible_alpha: f64,
	/// Both endpoints must exceed this alpha before a connection draws.
	pub line_threshold: f64,
	pub mapping: Mapping,
	pub mode: InteractionMode,
}

impl Default for SceneOptions {
	fn default() -> Self {
		Self {
			star_ease: 0.04,
			line_ease: 0.04,
			flash_decay: 0.96,
			hit_radius: 25.0,
			visible_alpha: 0.3,
			line_threshold: 0.5,
			mapping: Mapping::AspectFit,
			mode: InteractionMode::Passive,
		}
	}
}

/// Things the host reacts to. Each is reported at most once per cause.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneEvent {
	RevealComplete,
	AllRead,
	/// Full list of star positions after a drag step.
	PositionsChanged(Vec<(f64, f64)>),
}

/// Timer-driven stepper that reveals one star per delay.
#[derive(Clone, Debug, Default)]
struct RevealSequence {
	revealed_count: usize,
	delay_ms: f64,
	elapsed_ms: f64,
	running: bool,
}

#[derive(Clone, Debug, Default)]
struct HoverState {
	star: Option<usize>,
	/// Last hovered star, kept so the tooltip can fade out.
	last: Option<usize>,
	tooltip_opacity: f64,
}

#[derive(Clone, Debug, Default)]
struct ReadingState {
	active: Option<usize>,
	read: Vec<bool>,
	completed: bool,
}

impl ReadingState {
	fn new(n: usize) -> Self {
		Self {
			active: (n > 0).then_some(0),
			read: vec![false; n],
			completed: false,
		}
	}

	fn is_read(&self, idx: usize) -> bool {
		self.read.get(idx).copied().unwrap_or(false)
	}
}

/// Per-frame visual state of one attached constellation.
///
/// Nothing here touches the DOM: the host calls [`ConstellationState::tick`]
/// once per display frame and forwards pointer input, then draws whatever the
/// accessors report. Stars only move through [`ConstellationState::move_to`]
/// and the reveal counter only advances through the stepper or
/// [`ConstellationState::set_revealed_count_immediate`].
pub struct ConstellationState {
	constellation: Constellation,
	options: SceneOptions,
	reveal: RevealSequence,
	hover: HoverState,
	reading: ReadingState,
	dragging: Option<usize>,
	/// Canvas size in CSS pixels.
	width: f64,
	height: f64,
	frame: u64,
	mode: InteractionMode,
	star_alphas: Vec<f64>,
	flashes: Vec<f64>,
	line_progress: Vec<f64>,
	stopped: bool,
}

impl ConstellationState {
	pub fn new(constellation: Constellation, options: SceneOptions, width: f64, height: f64) -> Self {
		let mut state = Self {
			constellation: Constellation::default(),
			options,
			reveal: RevealSequence::default(),
			hover: HoverState::default(),
			reading: ReadingState::default(),
			dragging: None,
			width,
			height,
			frame: 0,
			mode: options.mode,
			star_alphas: Vec::new(),
			flashes: Vec::new(),
			line_progress: Vec::new(),
			stopped: false,
		};
		state.set_constellation(constellation);
		state
	}

	/// Attach a new layout, discarding all render state of the previous one.
	pub fn set_constellation(&mut self, constellation: Constellation) {
		let (n, m) = (constellation.stars.len(), constellation.connections.len());
		self.constellation = constellation;
		self.star_alphas = vec![0.0; n];
		self.flashes = vec![0.0; n];
		self.line_progress = vec![0.0; m];
		self.reveal = RevealSequence::default();
		self.hover = HoverState::default();
		self.dragging = None;
		self.reading = match self.mode {
			InteractionMode::Reading => ReadingState::new(n),
			_ => ReadingState::default(),
		};
	}

	pub fn mode(&self) -> InteractionMode {
		self.mode
	}

	/// Switch to drag mode. Refused on a reading scene.
	pub fn enable_drag(&mut self) -> bool {
		match self.mode {
			InteractionMode::Reading => false,
			_ => {
				self.mode = InteractionMode::Drag;
				true
			}
		}
	}

	pub fn disable_drag(&mut self) {
		if self.mode == InteractionMode::Drag {
			self.mode = InteractionMode::Passive;
			self.dragging = None;
		}
	}

	/// Begin revealing stars one per `delay_ms`, from the current count.
	pub fn start_reveal(&mut self, delay_ms: f64) {
		if self.stopped {
			return;
		}
		self.reveal.delay_ms = delay_ms.max(0.0);
		self.reveal.elapsed_ms = 0.0;
		self.reveal.running = true;
	}

	/// Jump the reveal counter forward without waiting on the timer. The
	/// counter never moves backwards; a running sequence carries on from the
	/// new count.
	pub fn set_revealed_count_immediate(&mut self, count: usize) {
		if self.stopped {
			return;
		}
		let count = count.min(self.constellation.stars.len());
		for idx in self.reveal.revealed_count..count {
			self.flashes[idx] = 1.0;
		}
		self.reveal.revealed_count = self.reveal.revealed_count.max(count);
	}

	/// Advance timers by `delta_ms` and step every animated value by one frame.
	pub fn tick(&mut self, delta_ms: f64) -> Vec<SceneEvent> {
		let mut events = Vec::new();
		if self.stopped {
			return events;
		}
		self.advance_reveal(delta_ms, &mut events);
		self.step_frame();
		events
	}

	fn advance_reveal(&mut self, delta_ms: f64, events: &mut Vec<SceneEvent>) {
		if !self.reveal.running {
			return;
		}
		self.reveal.elapsed_ms += delta_ms.max(0.0);
		while self.reveal.running && self.reveal.elapsed_ms >= self.reveal.delay_ms {
			self.reveal.elapsed_ms -= self.reveal.delay_ms;
			let count = self.reveal.revealed_count;
			if count < self.constellation.stars.len() {
				self.set_revealed_count_immediate(count + 1);
			} else {
				self.reveal.running = false;
				info!("revealed all {} stars", count);
				events.push(SceneEvent::RevealComplete);
			}
		}
	}

	fn step_frame(&mut self) {
		self.frame += 1;
		let opts = self.options;
		let completed = self.reading.completed;

		for (idx, alpha) in self.star_alphas.iter_mut().enumerate() {
			let target = if idx < self.reveal.revealed_count || completed { 1.0 } else { 0.0 };
			*alpha = (*alpha + (target - *alpha) * opts.star_ease).clamp(0.0, 1.0);
		}

		for flash in &mut self.flashes {
			*flash *= opts.flash_decay;
			if *flash < FLASH_FLOOR {
				*flash = 0.0;
			}
		}

		for (conn, progress) in self.constellation.connections.iter().zip(&mut self.line_progress) {
			if completed {
				*progress = 1.0;
				continue;
			}
			let alpha = |idx: usize| self.star_alphas.get(idx).copied().unwrap_or(0.0);
			let visible = alpha(conn.from) > opts.line_threshold && alpha(conn.to) > opts.line_threshold;
			let unlocked = match self.mode {
				InteractionMode::Reading => self.reading.is_read(conn.from),
				_ => true,
			};
			let target = if visible && unlocked { 1.0 } else { 0.0 };
			*progress = (*progress + (target - *progress) * opts.line_ease).clamp(0.0, 1.0);
		}

		if self.hover.star.is_some() {
			self.hover.last = self.hover.star;
			self.hover.tooltip_opacity = (self.hover.tooltip_opacity + TOOLTIP_FADE_IN).min(1.0);
		} else {
			self.hover.tooltip_opacity = (self.hover.tooltip_opacity - TOOLTIP_FADE_OUT).max(0.0);
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		if (self.width, self.height) != (width, height) {
			debug!("constellation canvas resized to {}x{}", width, height);
		}
		self.width = width;
		self.height = height;
	}

	/// Pixel position of a star at the current canvas size.
	pub fn star_pixel(&self, idx: usize) -> Option<(f64, f64)> {
		let star = self.constellation.stars.get(idx)?;
		Some(self.options.mapping.to_pixel(star.x, star.y, self.width, self.height))
	}

	/// First visible star within the hit radius of `(px, py)`.
	pub fn star_at_position(&self, px: f64, py: f64) -> Option<usize> {
		(0..self.constellation.stars.len()).find(|&idx| {
			if self.star_alpha(idx) <= self.options.visible_alpha {
				return false;
			}
			self.star_pixel(idx)
				.is_some_and(|(sx, sy)| (px - sx).hypot(py - sy) < self.options.hit_radius)
		})
	}

	/// Set a star's normalized position, clamped to the drag bounds.
	pub fn move_to(&mut self, idx: usize, x: f64, y: f64) -> bool {
		let Some(star) = self.constellation.stars.get_mut(idx) else {
			return false;
		};
		star.x = x.clamp(DRAG_MIN, DRAG_MAX);
		star.y = y.clamp(DRAG_MIN, DRAG_MAX);
		true
	}

	pub fn pointer_down(&mut self, px: f64, py: f64) -> bool {
		if self.stopped {
			return false;
		}
		let hit = self.star_at_position(px, py);
		self.hover.star = hit;
		if self.mode != InteractionMode::Drag {
			return false;
		}
		self.dragging = hit;
		hit.is_some()
	}

	pub fn pointer_move(&mut self, px: f64, py: f64) -> Option<SceneEvent> {
		if self.stopped {
			return None;
		}
		if let Some(idx) = self.dragging {
			let (x, y) = self.options.mapping.to_normalized(px, py, self.width, self.height);
			self.move_to(idx, x, y);
			return Some(SceneEvent::PositionsChanged(self.constellation.positions()));
		}
		self.hover.star = self.star_at_position(px, py);
		None
	}

	pub fn pointer_up(&mut self) {
		let dropped = self.dragging.take().and_then(|idx| Some((idx, self.constellation.stars.get(idx)?)));
		if let Some((idx, star)) = dropped {
			debug!("dropped star {} at {:?}", idx, star.position());
		}
	}

	pub fn pointer_leave(&mut self) {
		self.pointer_up();
		self.hover.star = None;
	}

	/// Click or tap at `(px, py)`; only the active star reacts.
	pub fn activate(&mut self, px: f64, py: f64) -> Option<SceneEvent> {
		if self.stopped {
			return None;
		}
		let idx = self.star_at_position(px, py)?;
		self.activate_star(idx)
	}

	/// Mark the active star read and move the cursor to the next unread one.
	pub fn activate_star(&mut self, idx: usize) -> Option<SceneEvent> {
		if self.stopped
			|| self.mode != InteractionMode::Reading
			|| self.reading.completed
			|| self.reading.active != Some(idx)
		{
			return None;
		}
		self.reading.read[idx] = true;
		let n = self.reading.read.len();
		self.reading.active = (idx + 1..n).chain(0..idx).find(|&i| !self.reading.read[i]);
		if self.reading.active.is_some() {
			return None;
		}
		self.reading.completed = true;
		info!("all {} stars read", n);
		Some(SceneEvent::AllRead)
	}

	/// Halt all timers and input handling. Idempotent.
	pub fn stop(&mut self) {
		if !self.stopped {
			info!("constellation renderer stopped");
		}
		self.stopped = true;
		self.reveal.running = false;
		self.dragging = None;
	}

	pub fn is_stopped(&self) -> bool {
		self.stopped
	}

	pub fn constellation(&self) -> &Constellation {
		&self.constellation
	}

	/// Canvas size in CSS pixels.
	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	pub fn frame(&self) -> u64 {
		self.frame
	}

	pub fn revealed_count(&self) -> usize {
		self.reveal.revealed_count
	}

	#[cfg(test)]
	fn is_revealing(&self) -> bool {
		self.reveal.running
	}

	pub fn hovered(&self) -> Option<usize> {
		self.hover.star
	}

	pub fn dragged(&self) -> Option<usize> {
		self.dragging
	}

	#[cfg(test)]
	fn is_read(&self, idx: usize) -> bool {
		self.reading.is_read(idx)
	}

	pub fn star_alpha(&self, idx: usize) -> f64 {
		self.star_alphas.get(idx).copied().unwrap_or(0.0)
	}

	pub fn flash(&self, idx: usize) -> f64 {
		self.flashes.get(idx).copied().unwrap_or(0.0)
	}

	pub fn line_progress(&self, idx: usize) -> f64 {
		self.line_progress.get(idx).copied().unwrap_or(0.0)
	}

	/// Cosmetic radius wobble; never used for hit-testing.
	pub fn pulse(&self, idx: usize) -> f64 {
		(self.frame as f64 * 0.03 + idx as f64).sin() * 0.15
	}

	pub fn star_radius(&self, idx: usize) -> f64 {
		let size = self.constellation.stars.get(idx).map_or(1.0, |s| s.size);
		let hovered = if self.hover.star == Some(idx) { HOVER_GROWTH } else { 0.0 };
		STAR_RADIUS * size + self.pulse(idx) + hovered
	}

	/// Star whose tooltip is showing and its opacity, including fade-out.
	pub fn tooltip(&self) -> Option<(usize, f64)> {
		let idx = self.hover.star.or(self.hover.last)?;
		(self.hover.tooltip_opacity > 0.01).then_some((idx, self.hover.tooltip_opacity))
	}

	pub fn is_active(&self, idx: usize) -> bool {
		self.mode == InteractionMode::Reading && self.reading.active == Some(idx)
	}

	pub fn is_completed(&self) -> bool {
		self.reading.completed
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::constellation::layout::generate_constellation;
	use crate::components::constellation::types::{Connection, Star};

	const FRAME_MS: f64 = 16.0;

	fn sample() -> Constellation {
		let sentences: Vec<String> = ["First.", "Second one.", "Third and last."]
			.iter()
			.map(|s| s.to_string())
			.collect();
		generate_constellation(&sentences, Some(&[(0.2, 0.2), (0.5, 0.5), (0.8, 0.8)][..]))
	}

	fn scene(mode: InteractionMode) -> ConstellationState {
		let options = SceneOptions {
			mode,
			..SceneOptions::default()
		};
		ConstellationState::new(sample(), options, 1000.0, 1000.0)
	}

	fn run_frames(state: &mut ConstellationState, frames: usize) -> Vec<SceneEvent> {
		(0..frames).flat_map(|_| state.tick(FRAME_MS)).collect()
	}

	fn revealed(mode: InteractionMode) -> ConstellationState {
		let mut state = scene(mode);
		state.set_revealed_count_immediate(3);
		run_frames(&mut state, 120);
		state
	}

	#[test]
	fn reveal_steps_once_per_delay() {
		let mut state = scene(InteractionMode::Passive);
		state.start_reveal(800.0);
		assert!(state.tick(799.0).is_empty());
		assert_eq!(state.revealed_count(), 0);
		state.tick(1.0);
		assert_eq!(state.revealed_count(), 1);
		state.tick(800.0);
		state.tick(800.0);
		assert_eq!(state.revealed_count(), 3);
		assert_eq!(state.tick(800.0), vec![SceneEvent::RevealComplete]);
		assert!(!state.is_revealing());
		assert!(run_frames(&mut state, 200).is_empty());
	}

	#[test]
	fn long_frame_completes_in_one_tick() {
		let mut state = scene(InteractionMode::Passive);
		state.start_reveal(800.0);
		let events = state.tick(10_000.0);
		assert_eq!(events, vec![SceneEvent::RevealComplete]);
		assert_eq!(state.revealed_count(), 3);
	}

	#[test]
	fn empty_constellation_still_completes_reveal() {
		let mut state = ConstellationState::new(Constellation::default(), SceneOptions::default(), 800.0, 600.0);
		state.start_reveal(100.0);
		assert_eq!(run_frames(&mut state, 20), vec![SceneEvent::RevealComplete]);
	}

	#[test]
	fn revealed_count_is_monotonic_and_alphas_bounded() {
		let mut state = scene(InteractionMode::Passive);
		state.start_reveal(200.0);
		let mut last = 0;
		for _ in 0..400 {
			state.tick(FRAME_MS);
			assert!(state.revealed_count() >= last);
			last = state.revealed_count();
			for idx in 0..3 {
				let alpha = state.star_alpha(idx);
				assert!((0.0..=1.0).contains(&alpha));
				assert!((0.0..=1.0).contains(&state.flash(idx)));
			}
			for idx in 0..2 {
				assert!((0.0..=1.0).contains(&state.line_progress(idx)));
			}
		}
		state.set_revealed_count_immediate(1);
		assert_eq!(state.revealed_count(), 3);
	}

	#[test]
	fn alpha_fades_in_gradually() {
		let mut state = scene(InteractionMode::Passive);
		state.set_revealed_count_immediate(1);
		state.tick(FRAME_MS);
		let first = state.star_alpha(0);
		assert!(first > 0.0 && first < 0.1);
		run_frames(&mut state, 200);
		assert!(state.star_alpha(0) > 0.99);
		assert_eq!(state.star_alpha(1), 0.0);
	}

	#[test]
	fn flash_fires_on_reveal_and_decays() {
		let mut state = scene(InteractionMode::Passive);
		assert_eq!(state.flash(0), 0.0);
		state.set_revealed_count_immediate(1);
		assert_eq!(state.flash(0), 1.0);
		state.tick(FRAME_MS);
		assert!((state.flash(0) - 0.96).abs() < 1e-12);
		run_frames(&mut state, 400);
		assert_eq!(state.flash(0), 0.0);
		assert_eq!(state.flash(1), 0.0);
	}

	#[test]
	fn connections_wait_for_both_endpoints() {
		let mut state = scene(InteractionMode::Passive);
		state.set_revealed_count_immediate(1);
		run_frames(&mut state, 200);
		assert_eq!(state.line_progress(0), 0.0);
		state.set_revealed_count_immediate(2);
		run_frames(&mut state, 200);
		assert!(state.line_progress(0) > 0.9);
		assert_eq!(state.line_progress(1), 0.0);
	}

	#[test]
	fn hover_requires_visible_star() {
		let mut state = scene(InteractionMode::Passive);
		assert_eq!(state.pointer_move(200.0, 200.0), None);
		assert_eq!(state.hovered(), None);
		let mut state = revealed(InteractionMode::Passive);
		state.pointer_move(210.0, 195.0);
		assert_eq!(state.hovered(), Some(0));
		state.pointer_move(260.0, 200.0);
		assert_eq!(state.hovered(), None);
	}

	#[test]
	fn tooltip_fades_in_and_out_on_last_hovered() {
		let mut state = revealed(InteractionMode::Passive);
		state.pointer_move(500.0, 500.0);
		state.tick(FRAME_MS);
		assert_eq!(state.tooltip(), Some((1, TOOLTIP_FADE_IN)));
		run_frames(&mut state, 30);
		assert_eq!(state.tooltip(), Some((1, 1.0)));
		state.pointer_leave();
		state.tick(FRAME_MS);
		let (idx, opacity) = state.tooltip().expect("tooltip still fading");
		assert_eq!(idx, 1);
		assert!(opacity < 1.0);
		run_frames(&mut state, 20);
		assert_eq!(state.tooltip(), None);
	}

	#[test]
	fn reading_in_order_completes_once() {
		let mut state = revealed(InteractionMode::Reading);
		assert!(state.is_active(0));
		assert_eq!(state.activate_star(1), None);
		assert!(!state.is_read(1));

		assert_eq!(state.activate(200.0, 200.0), None);
		assert!(state.is_active(1));
		assert_eq!(state.activate(500.0, 500.0), None);
		assert_eq!(state.activate(800.0, 800.0), Some(SceneEvent::AllRead));
		assert!(state.is_completed());
		assert_eq!(state.activate(800.0, 800.0), None);
		assert_eq!(state.activate_star(0), None);

		state.tick(FRAME_MS);
		assert_eq!(state.line_progress(0), 1.0);
		assert_eq!(state.line_progress(1), 1.0);
	}

	#[test]
	fn reading_lines_unlock_from_read_source() {
		let mut state = revealed(InteractionMode::Reading);
		assert_eq!(state.line_progress(0), 0.0);
		state.activate_star(0);
		run_frames(&mut state, 200);
		assert!(state.line_progress(0) > 0.9);
		assert_eq!(state.line_progress(1), 0.0);
	}

	#[test]
	fn reading_scene_refuses_drag() {
		let mut state = scene(InteractionMode::Reading);
		assert!(!state.enable_drag());
		assert_eq!(state.mode(), InteractionMode::Reading);
	}

	#[test]
	fn drag_moves_star_and_reports_positions() {
		let mut state = revealed(InteractionMode::Drag);
		assert!(state.pointer_down(505.0, 495.0));
		let event = state.pointer_move(300.0, 600.0);
		let expected = vec![(0.2, 0.2), (0.3, 0.6), (0.8, 0.8)];
		assert_eq!(event, Some(SceneEvent::PositionsChanged(expected)));

		state.pointer_move(5000.0, -40.0);
		assert_eq!(state.constellation().stars[1].position(), (DRAG_MAX, DRAG_MIN));

		state.pointer_up();
		assert_eq!(state.pointer_move(100.0, 100.0), None);
	}

	#[test]
	fn drag_ignored_when_disabled() {
		let mut state = revealed(InteractionMode::Passive);
		assert!(!state.pointer_down(500.0, 500.0));
		assert!(state.enable_drag());
		assert!(state.pointer_down(500.0, 500.0));
		state.disable_drag();
		assert_eq!(state.pointer_move(100.0, 100.0), None);
		assert_eq!(state.constellation().stars[1].position(), (0.5, 0.5));
	}

	#[test]
	fn move_to_clamps_and_rejects_bad_index() {
		let mut state = scene(InteractionMode::Drag);
		assert!(state.move_to(0, -1.0, 2.0));
		assert_eq!(state.constellation().stars[0].position(), (DRAG_MIN, DRAG_MAX));
		assert!(!state.move_to(7, 0.5, 0.5));
	}

	#[test]
	fn hit_test_follows_resize() {
		let mut state = revealed(InteractionMode::Passive);
		assert_eq!(state.star_at_position(500.0, 500.0), Some(1));
		state.resize(2000.0, 1000.0);
		// square of side 1000 centered horizontally
		assert_eq!(state.star_pixel(1), Some((1000.0, 500.0)));
		assert_eq!(state.star_at_position(500.0, 500.0), None);
		assert_eq!(state.star_at_position(1000.0, 500.0), Some(1));
	}

	#[test]
	fn stop_halts_everything() {
		let mut state = scene(InteractionMode::Reading);
		state.start_reveal(100.0);
		state.tick(100.0);
		state.stop();
		state.stop();
		assert!(state.is_stopped());
		assert!(run_frames(&mut state, 100).is_empty());
		assert_eq!(state.revealed_count(), 1);
		assert_eq!(state.activate_star(0), None);
		state.start_reveal(100.0);
		assert!(!state.is_revealing());
	}

	#[test]
	fn new_constellation_resets_render_state() {
		let mut state = revealed(InteractionMode::Reading);
		state.activate_star(0);
		state.pointer_move(500.0, 500.0);
		state.set_constellation(sample());
		assert_eq!(state.revealed_count(), 0);
		assert_eq!(state.star_alpha(0), 0.0);
		assert_eq!(state.hovered(), None);
		assert!(!state.is_read(0));
		assert!(state.is_active(0));
	}

	#[test]
	fn pulse_is_bounded_and_radius_grows_on_hover() {
		let mut state = revealed(InteractionMode::Passive);
		for idx in 0..3 {
			assert!(state.pulse(idx).abs() <= 0.15);
		}
		let before = state.star_radius(1);
		state.pointer_move(500.0, 500.0);
		assert!((state.star_radius(1) - before - HOVER_GROWTH).abs() < 1e-12);
	}

	fn star(x: f64, y: f64) -> Star {
		Star {
			x,
			y,
			size: 1.0,
			sentence: format!("at {}", x),
		}
	}

	#[test]
	fn hit_test_prefers_lower_index_when_stars_overlap() {
		let constellation = Constellation {
			stars: vec![star(0.5, 0.5), star(0.51, 0.5)],
			connections: vec![Connection { from: 0, to: 1 }],
		};
		let mut state = ConstellationState::new(constellation, SceneOptions::default(), 1000.0, 1000.0);
		state.set_revealed_count_immediate(2);
		run_frames(&mut state, 120);
		// 8px from star 0, 2px from star 1
		assert_eq!(state.star_at_position(508.0, 500.0), Some(0));
		state.pointer_move(508.0, 500.0);
		assert_eq!(state.hovered(), Some(0));
	}

	#[test]
	fn pointer_leave_ends_drag() {
		let mut state = revealed(InteractionMode::Drag);
		assert!(state.pointer_down(500.0, 500.0));
		assert_eq!(state.dragged(), Some(1));
		state.pointer_leave();
		assert_eq!(state.dragged(), None);
		assert_eq!(state.pointer_move(300.0, 600.0), None);
		assert_eq!(state.constellation().stars[1].position(), (0.5, 0.5));
	}

	#[test]
	fn hit_radius_ignores_pulse() {
		let mut state = revealed(InteractionMode::Passive);
		for _ in 0..240 {
			state.tick(FRAME_MS);
			assert_eq!(state.star_at_position(524.9, 500.0), Some(1));
			assert_eq!(state.star_at_position(525.1, 500.0), None);
		}
	}

	#[test]
	fn revealed_count_never_exceeds_star_count() {
		let mut state = ConstellationState::new(Constellation::default(), SceneOptions::default(), 100.0, 100.0);
		state.set_revealed_count_immediate(5);
		assert_eq!(state.revealed_count(), 0);
		assert_eq!(state.star_at_position(50.0, 50.0), None);
		let mut state = scene(InteractionMode::Passive);
		state.set_revealed_count_immediate(9);
		assert_eq!(state.revealed_count(), 3);
	}
}
