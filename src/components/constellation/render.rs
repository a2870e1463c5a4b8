use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::ConstellationState;
use crate::message::{Palette, Rgb};

const WHITE: Rgb = Rgb(255, 255, 255);
const PILL_HEIGHT: f64 = 36.0;
const PILL_PAD_X: f64 = 20.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ConstellationState, palette: &Palette, ctx: &CanvasRenderingContext2d) {
	let (w, h) = state.size();
	ctx.clear_rect(0.0, 0.0, w, h);
	draw_connections(state, palette, ctx);
	draw_stars(state, palette, ctx);
	draw_tooltip(state, ctx);
}

fn draw_connections(state: &ConstellationState, palette: &Palette, ctx: &CanvasRenderingContext2d) {
	let completed = state.is_completed();
	for (idx, conn) in state.constellation().connections.iter().enumerate() {
		let progress = state.line_progress(idx);
		if progress < 0.01 {
			continue;
		}
		let (Some((x1, y1)), Some((x2, y2))) = (state.star_pixel(conn.from), state.star_pixel(conn.to)) else {
			continue;
		};
		// The line grows from its source star toward the next one.
		let t = ease_out_cubic(progress);
		let (ex, ey) = (x1 + (x2 - x1) * t, y1 + (y2 - y1) * t);
		let alpha = if completed { 0.6 } else { progress * 0.4 };

		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(ex, ey);
		ctx.set_stroke_style_str(&palette.line.rgba(alpha));
		ctx.set_line_width(1.0);
		ctx.stroke();
	}
}

fn draw_stars(state: &ConstellationState, palette: &Palette, ctx: &CanvasRenderingContext2d) {
	let completed = state.is_completed();
	for idx in 0..state.constellation().stars.len() {
		let alpha = state.star_alpha(idx);
		if alpha < 0.01 {
			continue;
		}
		let Some((px, py)) = state.star_pixel(idx) else {
			continue;
		};
		let pulse = state.pulse(idx);
		let radius = state.star_radius(idx);
		let intensity = if completed { 1.0 } else { alpha };
		let glow_strength = if completed { 0.35 } else { 0.25 };

		let glow_radius = radius * 6.0;
		if let Ok(gradient) = ctx.create_radial_gradient(px, py, 0.0, px, py, glow_radius) {
			let _ = gradient.add_color_stop(0.0, &palette.glow.rgba(intensity * glow_strength));
			let _ = gradient.add_color_stop(0.4, &palette.glow.rgba(intensity * 0.08));
			let _ = gradient.add_color_stop(1.0, "transparent");
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
			ctx.fill_rect(px - glow_radius, py - glow_radius, glow_radius * 2.0, glow_radius * 2.0);
		}

		let flash = state.flash(idx);
		if flash > 0.01 {
			draw_flash(ctx, palette, px, py, radius, flash);
		}

		if state.is_active(idx) {
			let halo = radius * 3.0 + (state.frame() as f64 * 0.08).sin() * 2.0;
			ctx.begin_path();
			let _ = ctx.arc(px, py, halo, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&palette.star.rgba(alpha * 0.5));
			ctx.set_line_width(1.0);
			ctx.stroke();
		}

		ctx.begin_path();
		let _ = ctx.arc(px, py, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&palette.star.rgba(intensity * (0.8 + pulse * 0.2)));
		ctx.fill();

		ctx.begin_path();
		let _ = ctx.arc(px, py, radius * 0.4, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&WHITE.rgba(intensity * 0.9));
		ctx.fill();
	}
}

/// Burst that expands and fades as `flash` decays from 1 to 0.
fn draw_flash(ctx: &CanvasRenderingContext2d, palette: &Palette, px: f64, py: f64, radius: f64, flash: f64) {
	let spread = 1.0 - flash;
	let burst = radius * (2.0 + spread * 10.0);
	if let Ok(gradient) = ctx.create_radial_gradient(px, py, 0.0, px, py, burst) {
		let _ = gradient.add_color_stop(0.0, &WHITE.rgba(flash * 0.8));
		let _ = gradient.add_color_stop(0.3, &palette.glow.rgba(flash * 0.4));
		let _ = gradient.add_color_stop(1.0, "transparent");
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
		ctx.fill_rect(px - burst, py - burst, burst * 2.0, burst * 2.0);
	}
	ctx.begin_path();
	let _ = ctx.arc(px, py, burst, 0.0, 2.0 * PI);
	ctx.set_stroke_style_str(&palette.star.rgba(flash * 0.6));
	ctx.set_line_width(1.5);
	ctx.stroke();
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn draw_tooltip(state: &ConstellationState, ctx: &CanvasRenderingContext2d) {
	let Some((idx, alpha)) = state.tooltip() else {
		return;
	};
	let (Some(star), Some((px, py))) = (state.constellation().stars.get(idx), state.star_pixel(idx)) else {
		return;
	};
	let (w, h) = state.size();

	ctx.save();
	let font_size = (w * 0.022).clamp(16.0, 22.0);
	ctx.set_font(&format!("italic 300 {}px 'Cormorant Garamond', serif", font_size));
	ctx.set_text_align("center");
	ctx.set_text_baseline("bottom");

	let text_width = ctx.measure_text(&star.sentence).map(|m| m.width()).unwrap_or(0.0);
	let max_width = w * 0.7;
	// Below the star near the top edge, above it everywhere else.
	let y_offset = if py < h * 0.25 { 40.0 } else { -30.0 };
	let text_y = py + y_offset;
	let text_x = px.min(w - text_width / 2.0 - 20.0).max(text_width / 2.0 + 20.0);

	let pill_w = (text_width + PILL_PAD_X * 2.0).min(max_width + PILL_PAD_X * 2.0);
	rounded_rect(
		ctx,
		text_x - pill_w / 2.0,
		text_y - PILL_HEIGHT + 5.0,
		pill_w,
		PILL_HEIGHT,
		PILL_HEIGHT / 2.0,
	);
	ctx.set_fill_style_str(&Rgb(10, 10, 26).rgba(alpha * 0.8));
	ctx.fill();

	ctx.set_fill_style_str(&WHITE.rgba(alpha * 0.92));
	let _ = ctx.fill_text_with_max_width(&star.sentence, text_x, text_y, max_width);
	ctx.restore();
}
