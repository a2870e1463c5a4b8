//! Leptos client-side app wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod components;
mod message;
mod pages;

use crate::components::starfield::StarfieldCanvas;
use crate::message::Theme;
// Top-Level pages
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Theme of the page currently shown, shared through context.
#[derive(Clone, Copy)]
pub(crate) struct ActiveTheme(pub(crate) RwSignal<Theme>);

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the creation page, a shared constellation, or a 404.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();
	let theme = RwSignal::new(Theme::default());
	provide_context(ActiveTheme(theme));

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:class=move || theme.get().class_name() />

		// sets the document title
		<Title text="Written in the Stars" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<StarfieldCanvas theme=theme />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
