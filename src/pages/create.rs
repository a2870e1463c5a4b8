use std::time::Duration;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use log::{info, warn};
use web_sys::{KeyboardEvent, SubmitEvent};

use super::base_url;
use crate::ActiveTheme;
use crate::components::constellation::{ConstellationCanvas, RevealPolicy, generate_constellation};
use crate::message::{ConstellationData, Theme, build_share_url, compact_positions};

const DEFAULT_SENTENCE: &str = "You are the reason I look up at the stars";
const HINT_MS: u64 = 3000;
const COPIED_MS: u64 = 2000;

/// Message composer with a live, rearrangeable preview.
#[component]
pub fn CreatePage() -> impl IntoView {
	let ActiveTheme(theme) = expect_context::<ActiveTheme>();
	let query = use_query_map();

	let to = RwSignal::new(query.with_untracked(|q| q.get("replyTo")).unwrap_or_default());
	let from = RwSignal::new(String::new());
	let draft = RwSignal::new(String::new());
	let sentences = RwSignal::new(vec![DEFAULT_SENTENCE.to_owned()]);
	let custom_positions: RwSignal<Option<Vec<(f64, f64)>>> = RwSignal::new(None);
	// Bumped to force a fresh heart layout without touching the sentences.
	let layout_epoch = RwSignal::new(0u32);
	let drag_mode = RwSignal::new(false);
	let drag_hint = RwSignal::new(false);
	let mobile_preview = RwSignal::new(false);
	let share_url: RwSignal<Option<String>> = RwSignal::new(None);
	let copied = RwSignal::new(false);

	// Dragging updates the stored positions but must not re-layout the preview.
	let preview = Signal::derive(move || {
		layout_epoch.track();
		let sentences = sentences.get();
		let positions = custom_positions.get_untracked();
		generate_constellation(&sentences, positions.as_deref())
	});

	let add_sentence = move || {
		let text = draft.get_untracked().trim().to_owned();
		if text.is_empty() {
			return;
		}
		custom_positions.set(None);
		sentences.update(|s| s.push(text));
		draft.set(String::new());
	};

	let remove_sentence = move |idx: usize| {
		custom_positions.set(None);
		sentences.update(|s| {
			if idx < s.len() {
				s.remove(idx);
			}
		});
	};

	let toggle_drag = move |_| {
		let enabled = !drag_mode.get_untracked();
		drag_mode.set(enabled);
		drag_hint.set(enabled);
		if enabled {
			set_timeout(move || drag_hint.set(false), Duration::from_millis(HINT_MS));
		}
	};

	let reset_positions = move |_| {
		custom_positions.set(None);
		layout_epoch.update(|e| *e += 1);
	};

	let on_positions_change = Callback::new(move |positions: Vec<(f64, f64)>| {
		custom_positions.set(Some(positions));
	});

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let sentences = sentences.get_untracked();
		let (to, from) = (to.get_untracked().trim().to_owned(), from.get_untracked().trim().to_owned());
		if sentences.is_empty() || to.is_empty() || from.is_empty() {
			return;
		}
		let pos = custom_positions
			.get_untracked()
			.filter(|p| p.len() == sentences.len())
			.map(|p| compact_positions(&p));
		let data = ConstellationData {
			to,
			from,
			message: sentences.join("\n"),
			theme: theme.get_untracked(),
			pos,
		};
		match build_share_url(&base_url(), &data) {
			Ok(url) => {
				info!("built share link ({} bytes)", url.len());
				share_url.set(Some(url));
			}
			Err(err) => warn!("could not build share link: {}", err),
		}
	};

	let copy_link = move |_| {
		let (Some(url), Some(window)) = (share_url.get_untracked(), web_sys::window()) else {
			return;
		};
		let _ = window.navigator().clipboard().write_text(&url);
		copied.set(true);
		set_timeout(move || copied.set(false), Duration::from_millis(COPIED_MS));
	};

	view! {
		<div class="create-page">
			<div class="create-content">
				<h1 class="create-title">"Write someone a constellation"</h1>
				<p class="create-subtitle">
					"Your words become stars. Each sentence, a point of light in their sky."
				</p>

				<form class="create-form" on:submit=on_submit>
					<div class="form-row">
						<div class="form-field">
							<label for="field-to">"To"</label>
							<input type="text" id="field-to" placeholder="Their name" maxlength="50" bind:value=to />
						</div>
						<div class="form-field">
							<label for="field-from">"From"</label>
							<input type="text" id="field-from" placeholder="Your name" maxlength="50" bind:value=from />
						</div>
					</div>

					<div class="form-field">
						<label for="field-sentence">"Add a sentence (press Enter)"</label>
						<div class="sentence-input-row">
							<input
								type="text"
								id="field-sentence"
								placeholder="Write something from the heart..."
								maxlength="200"
								bind:value=draft
								on:keydown=move |ev: KeyboardEvent| {
									if ev.key() == "Enter" {
										ev.prevent_default();
										add_sentence();
									}
								}
							/>
							<button type="button" class="btn-add-sentence" on:click=move |_| add_sentence()>
								"Add"
							</button>
						</div>
					</div>

					<div class="form-field">
						<label>
							"Your stars "
							{move || {
								let n = sentences.with(Vec::len);
								format!("({} star{})", n, if n == 1 { "" } else { "s" })
							}}
						</label>
						<div class="sentence-list">
							{move || {
								let list = sentences.get();
								if list.is_empty() {
									return view! {
										<div class="sentence-empty">
											"No stars yet. Type a sentence above and press Enter."
										</div>
									}
										.into_any();
								}
								list.into_iter()
									.enumerate()
									.map(|(idx, sentence)| {
										view! {
											<div class="sentence-chip">
												<span class="sentence-number">{idx + 1}</span>
												<span class="sentence-text">{sentence}</span>
												<button
													type="button"
													class="sentence-remove"
													title="Remove"
													on:click=move |_| remove_sentence(idx)
												>
													"×"
												</button>
											</div>
										}
									})
									.collect_view()
									.into_any()
							}}
						</div>
					</div>

					<div class="form-field">
						<label>"Color theme"</label>
						<div class="theme-picker">
							{Theme::ALL
								.into_iter()
								.map(|t| {
									view! {
										<button
											type="button"
											class="theme-btn"
											class:active=move || theme.get() == t
											title=t.label()
											on:click=move |_| theme.set(t)
										>
											<span class=format!("theme-dot theme-dot-{}", t)></span>
											<span class="theme-label">{t.label()}</span>
										</button>
									}
								})
								.collect_view()}
						</div>
					</div>

					<button type="submit" class="btn-create" class:hidden=move || share_url.with(Option::is_some)>
						"Create Constellation"
					</button>
				</form>
			</div>

			<div class="create-preview">
				<div class="preview-toolbar">
					<button
						type="button"
						class="preview-tool-btn"
						class:active=move || drag_mode.get()
						title="Drag stars to rearrange"
						on:click=toggle_drag
					>
						"Arrange stars"
					</button>
					<button
						type="button"
						class="preview-tool-btn"
						class:active=move || mobile_preview.get()
						title="Preview on mobile"
						on:click=move |_| mobile_preview.update(|m| *m = !*m)
					>
						"Mobile view"
					</button>
					<button
						type="button"
						class="preview-tool-btn"
						class:hidden=move || custom_positions.with(Option::is_none)
						title="Reset to heart shape"
						on:click=reset_positions
					>
						"Reset"
					</button>
				</div>
				<div class="preview-frame" class:mobile-frame=move || mobile_preview.get()>
					<ConstellationCanvas
						constellation=preview
						theme=theme
						reveal=RevealPolicy::Immediate
						drag_enabled=drag_mode
						on_positions_change=on_positions_change
					/>
				</div>
				<div class="drag-hint" class:hidden=move || !drag_hint.get()>
					"Drag any star to rearrange your constellation"
				</div>
			</div>

			<Show when=move || share_url.with(Option::is_some)>
				<div class="share-panel">
					<div class="share-panel-inner">
						<h2>"Your constellation is ready"</h2>
						<p class="share-subtitle">
							"Share this link and they'll see a sky written just for them."
						</p>
						<div class="share-link-box">
							<input type="text" readonly prop:value=move || share_url.get().unwrap_or_default() />
							<button type="button" class="btn-copy" on:click=copy_link>
								{move || if copied.get() { "Copied!" } else { "Copy" }}
							</button>
						</div>
						<div class="share-actions">
							<a
								class="btn-preview"
								target="_blank"
								href=move || share_url.get().unwrap_or_default()
							>
								"Preview"
							</a>
						</div>
						<button type="button" class="btn-back" on:click=move |_| share_url.set(None)>
							"Write another"
						</button>
					</div>
				</div>
			</Show>
		</div>
	}
}
