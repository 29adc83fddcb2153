//! Stickerpacks in the format expected by WhatsApp sticker importer apps.
//!
//! The field names of [`OutputManifest`] and [`OutputPack`] are read by the importer and must not be changed.

use crate::slug::slugify;
use serde::{Deserialize, Serialize};

mod metadata;
pub use metadata::MetaData;

mod payload;
pub use payload::{build, build_default};

/// WhatsApp does not accept more stickers at one pack.
pub const MAX_STICKERS_PER_PACK: usize = 30;
/// Used for stickers without any emoji.
pub const FALLBACK_EMOJI: &str = "✨";
/// Tray image of a pack without stickers.
pub const FALLBACK_TRAY_IMAGE: &str = "tray.png";

/// A stickerpack before it was split into WhatsApp packs.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct StickerSet {
	#[serde(default)]
	pub name: String,
	/// url and file name safe identifier; [`slugify`]ed name if `None`
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub identifier: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub publisher: Option<String>,
	#[serde(default)]
	pub stickers: Vec<StickerRef>
}

impl StickerSet {
	/// The identifier of the set, or the slug of its name if no identifier is set.
	pub fn identifier(&self) -> String {
		match self.identifier.as_deref().map(str::trim) {
			Some(identifier) if !identifier.is_empty() => identifier.to_owned(),
			_ => slugify(&self.name)
		}
	}
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct StickerRef {
	pub image_file: String,
	#[serde(default)]
	pub emojis: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub source_url: Option<String>,
	/// file id to download the sticker from telegram
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub telegram_file_id: Option<String>
}

impl StickerRef {
	pub fn new<S: Into<String>>(image_file: S, emoji: Option<String>) -> Self {
		Self {
			image_file: image_file.into(),
			emojis: normalize_emojis(emoji),
			source_url: None,
			telegram_file_id: None
		}
	}

	/// The emojis of this sticker, or [`FALLBACK_EMOJI`] if it has none.
	pub fn normalized_emojis(&self) -> Vec<String> {
		normalize_emojis(self.emojis.iter().cloned())
	}
}

fn normalize_emojis<I>(emojis: I) -> Vec<String>
where
	I: IntoIterator<Item = String>
{
	let emojis: Vec<String> = emojis.into_iter().filter(|emoji| !emoji.trim().is_empty()).collect();
	if emojis.is_empty() {
		return vec![FALLBACK_EMOJI.to_owned()];
	}
	emojis
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct OutputSticker {
	pub image_file: String,
	pub emojis: Vec<String>
}

impl From<&StickerRef> for OutputSticker {
	fn from(value: &StickerRef) -> Self {
		Self {
			image_file: value.image_file.clone(),
			emojis: value.normalized_emojis()
		}
	}
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct OutputPack {
	pub identifier: String,
	pub name: String,
	pub publisher: String,
	pub tray_image_file: String,
	pub publisher_email: String,
	pub publisher_website: String,
	pub privacy_policy_website: String,
	pub license_agreement_website: String,
	pub stickers: Vec<OutputSticker>
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct OutputManifest {
	pub sticker_packs: Vec<OutputPack>
}

impl OutputManifest {
	pub fn sticker_count(&self) -> usize {
		self.sticker_packs.iter().map(|pack| pack.stickers.len()).sum()
	}
}
