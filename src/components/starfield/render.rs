use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::StarfieldState;
use crate::message::{Palette, Rgb};

const WHITE: Rgb = Rgb(255, 255, 255);

pub fn render(state: &StarfieldState, palette: &Palette, ctx: &CanvasRenderingContext2d) {
	let (w, h) = (state.width, state.height);

	let sky = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
	let _ = sky.add_color_stop(0.0, "#0a0a1a");
	let _ = sky.add_color_stop(0.5, "#0f0f2e");
	let _ = sky.add_color_stop(1.0, "#0a0a1a");
	#[allow(deprecated)]
	ctx.set_fill_style(&sky);
	ctx.fill_rect(0.0, 0.0, w, h);

	draw_nebula(ctx, palette, w * 0.3, h * 0.25, w * 0.4);
	draw_nebula(ctx, palette, w * 0.75, h * 0.65, w * 0.35);

	for star in &state.stars {
		ctx.begin_path();
		let _ = ctx.arc(star.x, star.y, star.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&WHITE.rgba(state.twinkle_alpha(star)));
		ctx.fill();
	}

	for s in &state.shooting_stars {
		let (tail_x, tail_y) = s.tail();
		let trail = ctx.create_linear_gradient(tail_x, tail_y, s.x, s.y);
		let _ = trail.add_color_stop(0.0, &WHITE.rgba(0.0));
		let _ = trail.add_color_stop(1.0, &WHITE.rgba(s.alpha() * 0.7));
		ctx.begin_path();
		ctx.move_to(tail_x, tail_y);
		ctx.line_to(s.x, s.y);
		#[allow(deprecated)]
		ctx.set_stroke_style(&trail);
		ctx.set_line_width(1.5);
		ctx.stroke();
	}
}

fn draw_nebula(ctx: &CanvasRenderingContext2d, palette: &Palette, cx: f64, cy: f64, r: f64) {
	if r <= 0.0 {
		return;
	}
	let Ok(gradient) = ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, r) else {
		return;
	};
	let _ = gradient.add_color_stop(0.0, &palette.nebula.rgba(0.08));
	let _ = gradient.add_color_stop(1.0, "transparent");
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(cx - r, cy - r, r * 2.0, r * 2.0);
}
