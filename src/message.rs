//! The shareable message: URL payload, themes and sentence splitting.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use log::warn;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::components::constellation::scale::{NORMALIZE_PAD, normalize_positions};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
	#[default]
	Gold,
	Rose,
	Arctic,
	Aurora,
}

impl Theme {
	pub const ALL: [Theme; 4] = [Theme::Gold, Theme::Rose, Theme::Arctic, Theme::Aurora];

	pub fn as_str(self) -> &'static str {
		match self {
			Theme::Gold => "gold",
			Theme::Rose => "rose",
			Theme::Arctic => "arctic",
			Theme::Aurora => "aurora",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Theme::Gold => "Warm Gold",
			Theme::Rose => "Rose Quartz",
			Theme::Arctic => "Arctic Blue",
			Theme::Aurora => "Aurora",
		}
	}

	/// Class set on the document element; gold is the unstyled default.
	pub fn class_name(self) -> &'static str {
		match self {
			Theme::Gold => "",
			Theme::Rose => "theme-rose",
			Theme::Arctic => "theme-arctic",
			Theme::Aurora => "theme-aurora",
		}
	}

	pub fn palette(self) -> Palette {
		match self {
			Theme::Gold => Palette {
				star: Rgb(255, 223, 150),
				glow: Rgb(255, 196, 87),
				line: Rgb(255, 214, 140),
				nebula: Rgb(90, 40, 80),
			},
			Theme::Rose => Palette {
				star: Rgb(255, 190, 210),
				glow: Rgb(255, 120, 170),
				line: Rgb(255, 170, 200),
				nebula: Rgb(110, 30, 70),
			},
			Theme::Arctic => Palette {
				star: Rgb(200, 230, 255),
				glow: Rgb(120, 190, 255),
				line: Rgb(170, 210, 255),
				nebula: Rgb(30, 60, 110),
			},
			Theme::Aurora => Palette {
				star: Rgb(190, 255, 220),
				glow: Rgb(90, 240, 180),
				line: Rgb(150, 240, 210),
				nebula: Rgb(40, 90, 90),
			},
		}
	}
}

impl fmt::Display for Theme {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Theme {
	type Err = PayloadError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Theme::ALL
			.into_iter()
			.find(|t| t.as_str() == s)
			.ok_or_else(|| PayloadError::UnknownTheme(s.to_owned()))
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
	pub fn rgba(self, alpha: f64) -> String {
		format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, alpha.clamp(0.0, 1.0))
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
	pub star: Rgb,
	pub glow: Rgb,
	pub line: Rgb,
	pub nebula: Rgb,
}

/// Everything a recipient link carries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstellationData {
	pub to: String,
	pub from: String,
	pub message: String,
	pub theme: Theme,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pos: Option<Vec<(f64, f64)>>,
}

#[derive(Debug, Error)]
pub enum PayloadError {
	#[error("payload is empty")]
	Empty,
	#[error("payload is not valid compressed data")]
	Decompress,
	#[error("payload is not valid JSON: {0}")]
	Json(#[from] serde_json::Error),
	#[error("missing required field `{0}`")]
	MissingField(&'static str),
	#[error("unknown theme `{0}`")]
	UnknownTheme(String),
}

/// Compress `data` into a URL-safe string.
pub fn encode(data: &ConstellationData) -> Result<String, PayloadError> {
	let json = serde_json::to_string(data)?;
	Ok(lz_str::compress_to_encoded_uri_component(json.as_str()))
}

/// Inverse of [`encode`]. Rejects payloads missing any of the required
/// fields; a `pos` that is not a list of pairs is dropped instead.
pub fn decode(encoded: &str) -> Result<ConstellationData, PayloadError> {
	let result = decode_inner(encoded);
	if let Err(err) = &result {
		warn!("rejected constellation payload: {}", err);
	}
	result
}

fn decode_inner(encoded: &str) -> Result<ConstellationData, PayloadError> {
	if encoded.is_empty() {
		return Err(PayloadError::Empty);
	}
	let units = lz_str::decompress_from_encoded_uri_component(encoded).ok_or(PayloadError::Decompress)?;
	let json = String::from_utf16(&units).map_err(|_| PayloadError::Decompress)?;
	if json.is_empty() {
		return Err(PayloadError::Decompress);
	}
	let value: Value = serde_json::from_str(&json)?;

	let field = |name: &'static str| {
		value
			.get(name)
			.and_then(Value::as_str)
			.filter(|s| !s.is_empty())
			.map(str::to_owned)
			.ok_or(PayloadError::MissingField(name))
	};
	let to = field("to")?;
	let from = field("from")?;
	let message = field("message")?;
	let theme = field("theme")?.parse()?;
	let pos = value
		.get("pos")
		.filter(|v| v.is_array())
		.and_then(|v| Vec::<(f64, f64)>::deserialize(v).ok());

	Ok(ConstellationData {
		to,
		from,
		message,
		theme,
		pos,
	})
}

/// Recipient link for `data` under `base` (origin plus path).
pub fn build_share_url(base: &str, data: &ConstellationData) -> Result<String, PayloadError> {
	Ok(format!("{}?d={}", base, encode(data)?))
}

/// Fit user-arranged positions into the safe zone and round them to three
/// decimals to keep links short.
pub fn compact_positions(positions: &[(f64, f64)]) -> Vec<(f64, f64)> {
	let round = |v: f64| (v * 1000.0).round() / 1000.0;
	normalize_positions(positions, NORMALIZE_PAD)
		.into_iter()
		.map(|(x, y)| (round(x), round(y)))
		.collect()
}

const CLAUSE_FALLBACK_CHARS: usize = 80;
const CHUNK_FALLBACK_CHARS: usize = 120;
const CHUNK_WORDS: usize = 12;

static SENTENCE_BREAK: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[.!?]\s+|\n+").expect("sentence break pattern is valid"));
static CLAUSE_BREAK: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r";\s*|,\s+").expect("clause break pattern is valid"));

fn trimmed_fragments<'a>(pieces: impl Iterator<Item = &'a str>) -> Vec<String> {
	pieces
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.map(str::to_owned)
		.collect()
}

/// Split on terminal punctuation followed by whitespace, or on newlines. The
/// punctuation stays with its sentence.
fn split_on_breaks(text: &str) -> Vec<String> {
	let mut pieces = Vec::new();
	let mut start = 0;
	for m in SENTENCE_BREAK.find_iter(text) {
		let end = if m.as_str().starts_with('\n') { m.start() } else { m.start() + 1 };
		pieces.push(&text[start..end]);
		start = m.end();
	}
	pieces.push(&text[start..]);
	trimmed_fragments(pieces.into_iter())
}

fn chunk_words(sentence: &str) -> Vec<String> {
	let words: Vec<&str> = sentence.split_whitespace().collect();
	let chunks = words.len().div_ceil(CHUNK_WORDS).max(1);
	let size = words.len().div_ceil(chunks).max(1);
	words.chunks(size).map(|chunk| chunk.join(" ")).collect()
}

/// Break a free-text message into the sentences that become stars.
///
/// Long text with no sentence breaks is split on semicolons and commas, and a
/// single overlong sentence is cut into even chunks of about a dozen words.
/// Blank text yields no sentences, so a whitespace-only message draws an empty
/// sky instead of one star holding the trimmed text.
pub fn split_sentences(text: &str) -> Vec<String> {
	let raw = split_on_breaks(text);

	if raw.len() <= 1 && text.chars().count() > CLAUSE_FALLBACK_CHARS {
		let clauses = trimmed_fragments(CLAUSE_BREAK.split(text));
		if clauses.len() > 1 {
			return clauses;
		}
	}

	if let [only] = raw.as_slice() {
		if only.chars().count() > CHUNK_FALLBACK_CHARS {
			return chunk_words(only);
		}
	}

	raw
}
