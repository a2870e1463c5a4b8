use std::time::Duration;

use leptos::prelude::*;
use log::info;

use super::base_url;
use super::not_found::NotFound;
use crate::ActiveTheme;
use crate::components::constellation::{
	ConstellationCanvas, InteractionMode, RevealPolicy, generate_constellation,
};
use crate::message::{ConstellationData, decode, split_sentences};

const INTRO_MS: u64 = 3000;
const INTRO_FADE_MS: u64 = 1000;
const FOOTER_DELAY_MS: u64 = 2000;
const REVEAL_DELAY_MS: f64 = 1000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
	Intro,
	FadingIntro,
	Sky,
}

/// Recipient page for an encoded constellation link.
#[component]
pub fn ViewPage(encoded: String) -> impl IntoView {
	match decode(&encoded) {
		Ok(data) => view! { <Recipient data=data /> }.into_any(),
		Err(_) => view! { <NotFound /> }.into_any(),
	}
}

#[component]
fn Recipient(data: ConstellationData) -> impl IntoView {
	let ActiveTheme(theme) = expect_context::<ActiveTheme>();
	theme.set(data.theme);

	let sentences = split_sentences(&data.message);
	let constellation = RwSignal::new(generate_constellation(&sentences, data.pos.as_deref()));
	info!("opening constellation of {} stars from {}", sentences.len(), data.from);

	let phase = RwSignal::new(Phase::Intro);
	let show_hint = RwSignal::new(false);
	let show_footer = RwSignal::new(false);

	set_timeout(move || phase.set(Phase::FadingIntro), Duration::from_millis(INTRO_MS));
	set_timeout(
		move || phase.set(Phase::Sky),
		Duration::from_millis(INTRO_MS + INTRO_FADE_MS),
	);

	let on_reveal_complete = Callback::new(move |()| {
		show_hint.set(true);
		set_timeout(move || show_footer.set(true), Duration::from_millis(FOOTER_DELAY_MS));
	});
	let on_all_read = Callback::new(move |()| {
		show_hint.set(false);
		show_footer.set(true);
	});

	let home = base_url();
	let reply = format!(
		"{}?replyTo={}",
		home,
		String::from(js_sys::encode_uri_component(&data.from))
	);

	view! {
		<div class="view-page">
			<Show when=move || phase.get() == Phase::Sky>
				<ConstellationCanvas
					constellation=constellation
					theme=theme
					mode=InteractionMode::Reading
					reveal=RevealPolicy::Sequenced { delay_ms: REVEAL_DELAY_MS }
					fullscreen=true
					on_reveal_complete=on_reveal_complete
					on_all_read=on_all_read
				/>
			</Show>

			<div
				class="view-intro"
				class:fade-out=move || phase.get() == Phase::FadingIntro
				class:hidden=move || phase.get() == Phase::Sky
			>
				<p class="intro-from">{format!("{} wrote you a constellation", data.from)}</p>
			</div>

			<div class="view-hint" class:hidden=move || !show_hint.get() class:fade-in=move || show_hint.get()>
				<p>"touch the stars to read the message"</p>
			</div>

			<div class="view-footer" class:hidden=move || !show_footer.get() class:fade-in=move || show_footer.get()>
				<p class="footer-valentine">"Happy Valentine's Day"</p>
				<p class="footer-names">{format!("To {}, with love from {}", data.to, data.from)}</p>
				<a href=home class="footer-create">"Write your own constellation"</a>
				<a href=reply class="footer-reply">"Write one back"</a>
			</div>
		</div>
	}
}
