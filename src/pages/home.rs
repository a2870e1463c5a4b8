use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::pages::create::CreatePage;
use crate::pages::view::ViewPage;

/// Shows a shared constellation when the link carries a `d` payload and the
/// creation page otherwise.
#[component]
pub fn Home() -> impl IntoView {
	let query = use_query_map();

	move || match query.with(|q| q.get("d")) {
		Some(encoded) => view! { <ViewPage encoded=encoded /> }.into_any(),
		None => view! { <CreatePage /> }.into_any(),
	}
}
