pub mod create;
pub mod home;
pub mod not_found;
pub mod view;

/// Origin plus path of the app, without any query string.
pub fn base_url() -> String {
	web_sys::window()
		.and_then(|w| {
			let location = w.location();
			Some(format!("{}{}", location.origin().ok()?, location.pathname().ok()?))
		})
		.unwrap_or_else(|| "/".to_owned())
}
