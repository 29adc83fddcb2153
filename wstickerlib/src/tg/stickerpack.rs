use super::{sticker::Sticker, tg_get, Config};
use crate::{
	error::{Error, InvalidPackUrl},
	whatsapp::{StickerRef, StickerSet}
};
use log::info;
use serde::Deserialize;
use strum_macros::Display;

const LINK_SCHEMES: [&str; 2] = ["https://", "http://"];
const LINK_HOSTS: [&str; 2] = ["t.me/", "telegram.me/"];
const LINK_KINDS: [&str; 2] = ["addstickers/", "addemoji/"];
const DEEP_LINK: &str = "tg://addstickers?set=";

/// Extract the name of the pack from a link (`https://t.me/addstickers/<name>`),
/// a handle (`@name`) or a bare name.
pub fn pack_url_to_name(url: &str) -> Result<&str, InvalidPackUrl> {
	let err = || InvalidPackUrl(url.to_owned());
	let input = url.trim();
	if input.is_empty() {
		return Err(err());
	}
	let deep_link = input
		.get(..DEEP_LINK.len())
		.filter(|prefix| prefix.eq_ignore_ascii_case(DEEP_LINK));
	if deep_link.is_some() {
		let name = input[DEEP_LINK.len()..].split(['&', '#']).next().unwrap_or_default();
		return non_empty_name(name).ok_or_else(err);
	}
	// `split` does always return at least one item
	let input = input.split(['?', '#']).next().unwrap_or_default();
	if let Some(name) = link_name(input) {
		return Ok(name);
	}
	if let Some(handle) = input.strip_prefix('@') {
		return non_empty_name(handle).ok_or_else(err);
	}
	non_empty_name(input).ok_or_else(err)
}

fn non_empty_name(name: &str) -> Option<&str> {
	if name.is_empty() || name.contains('/') {
		return None;
	}
	Some(name)
}

fn link_name(input: &str) -> Option<&str> {
	let input = LINK_SCHEMES
		.iter()
		.find_map(|scheme| {
			input
				.get(..scheme.len())
				.filter(|prefix| prefix.eq_ignore_ascii_case(scheme))
				.map(|_| &input[scheme.len()..])
		})
		.unwrap_or(input);
	for host in LINK_HOSTS {
		for kind in LINK_KINDS {
			let pattern = format!("{host}{kind}");
			let Some(rest) = input
				.get(..pattern.len())
				.filter(|prefix| prefix.eq_ignore_ascii_case(&pattern))
				.map(|_| &input[pattern.len()..])
			else {
				continue;
			};
			let name = rest.split('/').next().unwrap_or_default();
			if !name.is_empty() {
				return Some(name);
			}
		}
	}
	None
}

#[derive(Debug, Deserialize)]
pub struct StickerPack {
	pub name: String,
	pub title: String,
	pub stickers: Vec<Sticker>
}

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum SkipReason {
	Animated,
	Video
}

/// Sticker, which was not included in the converted [`StickerSet`], since WhatsApp stickers must be static.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SkippedSticker {
	/// name of the Telegram pack
	pub pack: String,
	/// zero based position at the Telegram pack
	pub position: usize,
	pub emoji: Option<String>,
	pub reason: SkipReason
}

impl StickerPack {
	pub async fn get(name: &str, tg_config: &Config) -> Result<Self, Error> {
		let pack: Self = tg_get(tg_config, "getStickerSet", [("name", name)]).await?;
		info!(
			"found Telegram stickerpack {}({}) with {} stickers",
			pack.title,
			pack.name,
			pack.stickers.len()
		);
		Ok(pack)
	}

	/// Convert to a [`StickerSet`].
	/// Animated and video stickers are left out and returned separately.
	/// The remaining stickers are named `<pack name>_<n>.webp`, counting from 1.
	pub fn into_sticker_set(self) -> (StickerSet, Vec<SkippedSticker>) {
		let mut stickers = Vec::with_capacity(self.stickers.len());
		let mut skipped = Vec::new();
		for (i, sticker) in self.stickers.into_iter().enumerate() {
			let reason = if sticker.is_video {
				Some(SkipReason::Video)
			} else if sticker.is_animated {
				Some(SkipReason::Animated)
			} else {
				None
			};
			if let Some(reason) = reason {
				skipped.push(SkippedSticker {
					pack: self.name.clone(),
					position: i,
					emoji: sticker.emoji,
					reason
				});
				continue;
			}
			let image_file = format!("{}_{}.webp", self.name, stickers.len() + 1);
			let mut sticker_ref = StickerRef::new(image_file, sticker.emoji);
			sticker_ref.telegram_file_id = Some(sticker.file_id);
			stickers.push(sticker_ref);
		}
		let set = StickerSet {
			name: self.title,
			identifier: Some(self.name.clone()),
			publisher: Some(self.name),
			stickers
		};
		(set, skipped)
	}
}
