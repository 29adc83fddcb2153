use super::{
	MetaData, OutputManifest, OutputPack, OutputSticker, StickerSet, FALLBACK_TRAY_IMAGE, MAX_STICKERS_PER_PACK
};
use log::debug;
use std::collections::HashSet;

/// [`build`] with [`MAX_STICKERS_PER_PACK`] and the default [`MetaData`].
pub fn build_default(sets: &[StickerSet]) -> OutputManifest {
	build(sets, MAX_STICKERS_PER_PACK, &MetaData::default())
}

/// Split every set into packs of at most `max_per_pack` stickers.
///
/// The packs of a set are named `<set identifier>_<n>`, counting from 1.
/// Sets without stickers do not produce any pack.
/// If two sets share the same identifier, the later one gets a numeric suffix (`_2`, `_3`, ...),
/// so that the identifiers of all packs are unique.
pub fn build(sets: &[StickerSet], max_per_pack: usize, metadata: &MetaData) -> OutputManifest {
	let max_per_pack = max_per_pack.max(1);
	let mut used_identifiers = HashSet::new();
	let mut sticker_packs = Vec::new();
	for set in sets {
		if set.stickers.is_empty() {
			debug!("skip empty sticker set {:?}", set.name);
			continue;
		}
		let identifier = unique_identifier(set.identifier(), &mut used_identifiers);
		let name = match set.name.trim() {
			"" => identifier.as_str(),
			name => name
		};
		let publisher = match set.publisher.as_deref().map(str::trim) {
			Some(publisher) if !publisher.is_empty() => publisher,
			_ => metadata.publisher.as_str()
		};
		for (i, chunk) in set.stickers.chunks(max_per_pack).enumerate() {
			let start = i * max_per_pack;
			let end = start + chunk.len();
			let stickers: Vec<OutputSticker> = chunk.iter().map(OutputSticker::from).collect();
			let tray_image_file = stickers
				.first()
				.map(|sticker| sticker.image_file.clone())
				.unwrap_or_else(|| FALLBACK_TRAY_IMAGE.to_owned());
			sticker_packs.push(OutputPack {
				identifier: format!("{identifier}_{}", i + 1),
				name: format!("{name} ({start}-{end})"),
				publisher: publisher.to_owned(),
				tray_image_file,
				publisher_email: metadata.publisher_email.clone(),
				publisher_website: metadata.publisher_website.clone(),
				privacy_policy_website: metadata.privacy_policy_website.clone(),
				license_agreement_website: metadata.license_agreement_website.clone(),
				stickers
			});
		}
		debug!(
			"split sticker set {identifier:?} with {} stickers into {} packs",
			set.stickers.len(),
			set.stickers.len().div_ceil(max_per_pack)
		);
	}
	OutputManifest { sticker_packs }
}

fn unique_identifier(identifier: String, used: &mut HashSet<String>) -> String {
	if used.insert(identifier.clone()) {
		return identifier;
	}
	let mut n = 2;
	loop {
		let candidate = format!("{identifier}_{n}");
		if used.insert(candidate.clone()) {
			return candidate;
		}
		n += 1;
	}
}
