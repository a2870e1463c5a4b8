use leptos::prelude::*;

use super::base_url;

/// The one failure a visitor ever sees: a link that does not decode.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="view-error">
			<h1>"This constellation couldn't be found"</h1>
			<p>"The link may be incomplete or expired."</p>
			<a href=base_url()>"Write a new constellation"</a>
		</div>
	}
}
