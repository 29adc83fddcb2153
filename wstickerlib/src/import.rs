//! Convert whole Telegram stickerpacks in one go:
//! fetch the packs, download and convert every sticker and build the WhatsApp manifest.

use crate::{
	error::Error,
	image::{Image, Transcoder},
	tg::{self, pack_url_to_name, SkippedSticker, StickerPack},
	whatsapp::{build, MetaData, OutputManifest, StickerRef, StickerSet, MAX_STICKERS_PER_PACK}
};
use colored::*;
use futures_util::future::try_join_all;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};
use tokio::fs;

/// File name of the manifest written by [`save_manifest`].
pub const MANIFEST_FILE: &str = "sticker_packs.json";

/// additonal, optional configuration for importing stickers
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct ImportConfig {
	/// maximum number of stickers per WhatsApp pack
	pub max_per_pack: usize,
	/// publisher and legal information added to every pack
	pub metadata: MetaData,
	/// Only fetch the sticker lists; do not download any sticker.
	pub dry_run: bool,
	/// directory where the stickers are stored
	pub out_dir: PathBuf
}

impl Default for ImportConfig {
	fn default() -> Self {
		Self {
			max_per_pack: MAX_STICKERS_PER_PACK,
			metadata: MetaData::default(),
			dry_run: false,
			out_dir: PathBuf::from("stickers")
		}
	}
}

/// A sticker written to disk, ready to be shared.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoredSticker {
	pub path: PathBuf,
	pub mime_type: String
}

/// Result of [`convert`].
#[derive(Debug)]
pub struct Conversion {
	pub sets: Vec<StickerSet>,
	/// animated and video stickers, which are not supported by WhatsApp
	pub skipped: Vec<SkippedSticker>,
	pub manifest: OutputManifest,
	/// empty at a dry run
	pub stored: Vec<StoredSticker>
}

impl Conversion {
	pub fn summary(&self) -> String {
		let mut summary = summary(&self.sets);
		if !self.skipped.is_empty() {
			summary += &format!(" Skipped {} animated or video stickers.", self.skipped.len());
		}
		summary
	}
}

/// Short human readable description of the loaded sets.
pub fn summary(sets: &[StickerSet]) -> String {
	if sets.is_empty() {
		return "No sticker packs loaded.".to_owned();
	}
	let stickers: usize = sets.iter().map(|set| set.stickers.len()).sum();
	format!("{} packs loaded with {stickers} stickers.", sets.len())
}

/// Import the Telegram packs `packs`, given as links, handles or names.
///
/// All packs are parsed before anything is fetched.
/// Stickers are downloaded concurrently; the first failed download aborts the whole conversion.
pub async fn convert<T, S>(
	packs: &[S],
	tg_config: &tg::Config,
	transcoder: &T,
	config: &ImportConfig
) -> Result<Conversion, Error>
where
	T: Transcoder,
	S: AsRef<str>
{
	let names = packs
		.iter()
		.map(|pack| pack_url_to_name(pack.as_ref()))
		.collect::<Result<Vec<_>, _>>()?;
	if names.is_empty() {
		return Err(Error::InvalidImport("no sticker pack was given".to_owned()));
	}
	tg_config.bot_key()?;

	let tg_packs = try_join_all(names.iter().map(|name| StickerPack::get(name, tg_config))).await?;
	let mut sets = Vec::with_capacity(tg_packs.len());
	let mut skipped = Vec::new();
	for tg_pack in tg_packs {
		let (set, pack_skipped) = tg_pack.into_sticker_set();
		if !pack_skipped.is_empty() {
			warn!(
				"sticker pack {} include {} animated or video stickers. This are not supported by WhatsApp and will be skipped.",
				set.identifier(),
				pack_skipped.len()
			);
		}
		sets.push(set);
		skipped.extend(pack_skipped);
	}

	let stored = if config.dry_run {
		info!("dry run; skip download of {} stickers", sets.iter().map(|set| set.stickers.len()).sum::<usize>());
		Vec::new()
	} else {
		download_stickers(&sets, tg_config, transcoder, &config.out_dir).await?
	};

	let manifest = build(&sets, config.max_per_pack, &config.metadata);
	Ok(Conversion {
		sets,
		skipped,
		manifest,
		stored
	})
}

async fn download_stickers<T>(
	sets: &[StickerSet],
	tg_config: &tg::Config,
	transcoder: &T,
	out_dir: &Path
) -> Result<Vec<StoredSticker>, Error>
where
	T: Transcoder
{
	let count: usize = sets.iter().map(|set| set.stickers.len()).sum();
	let pb = ProgressBar::new(count as u64);
	pb.set_style(
		ProgressStyle::default_bar()
			.template("[{wide_bar:.cyan/blue}] {pos:>3}/{len} {msg}")
			.unwrap_or_else(|_| ProgressStyle::default_bar())
			.progress_chars("#> ")
	);
	let sticker_futures = sets
		.iter()
		.flat_map(|set| set.stickers.iter())
		.map(|sticker| import_sticker(sticker, &pb, tg_config, transcoder));
	let images = match try_join_all(sticker_futures).await {
		Ok(images) => {
			pb.finish();
			images
		},
		Err(err) => {
			pb.abandon();
			return Err(err);
		}
	};

	// nothing is written before every sticker was converted
	fs::create_dir_all(out_dir).await?;
	let mut stored = Vec::with_capacity(images.len());
	for image in images.into_iter().flatten() {
		let path = out_dir.join(&image.file_name);
		fs::write(&path, &image.data).await?;
		stored.push(StoredSticker {
			path,
			mime_type: image.mime_type()?
		});
	}
	Ok(stored)
}

async fn import_sticker<T>(
	sticker: &StickerRef,
	pb: &ProgressBar,
	tg_config: &tg::Config,
	transcoder: &T
) -> Result<Option<Image>, Error>
where
	T: Transcoder
{
	let Some(file_id) = sticker.telegram_file_id.as_deref() else {
		pb.println(
			format!("    skip sticker {}, no telegram file", sticker.image_file)
				.yellow()
				.to_string()
		);
		pb.inc(1);
		return Ok(None);
	};
	pb.println(format!(
		"download sticker {} {}",
		sticker.image_file,
		sticker.normalized_emojis().concat()
	));
	let image = tg::resolve_file(file_id, tg_config).await?.download().await?;
	let mut image = transcoder.transcode(image).await?;
	image.file_name = sticker.image_file.clone();
	pb.inc(1);
	Ok(Some(image))
}

/// Write `manifest` as [`MANIFEST_FILE`] to `dir` and return the path of the file.
pub async fn save_manifest(manifest: &OutputManifest, dir: &Path, pretty: bool) -> Result<PathBuf, Error> {
	let json = match pretty {
		true => serde_json::to_string_pretty(manifest)?,
		false => serde_json::to_string(manifest)?
	};
	fs::create_dir_all(dir).await?;
	let path = dir.join(MANIFEST_FILE);
	fs::write(&path, json).await?;
	Ok(path)
}

/// Read sticker sets from a json file, containing an array of [`StickerSet`]s.
pub async fn load_sets_json<P: AsRef<Path>>(path: P) -> Result<Vec<StickerSet>, Error> {
	let text = fs::read_to_string(path).await?;
	parse_sets_json(&text)
}

pub fn parse_sets_json(text: &str) -> Result<Vec<StickerSet>, Error> {
	let value: serde_json::Value = serde_json::from_str(text).map_err(|err| Error::InvalidImport(err.to_string()))?;
	if !value.is_array() {
		return Err(Error::InvalidImport("JSON must be an array of sticker packs.".to_owned()));
	}
	serde_json::from_value(value).map_err(|err| Error::InvalidImport(err.to_string()))
}

/// Two sets to try the conversion without a Telegram bot.
pub fn demo_sets() -> Vec<StickerSet> {
	let demo_set = |name: &str, identifier: &str, prefix: &str, count: usize, emoji: &str| StickerSet {
		name: name.to_owned(),
		identifier: Some(identifier.to_owned()),
		publisher: Some("Tele2Whats Studio".to_owned()),
		stickers: (1..=count)
			.map(|i| StickerRef::new(format!("{prefix}_{i}.webp"), Some(emoji.to_owned())))
			.collect()
	};
	vec![
		demo_set("Astral Cats", "astral_cats", "astral", 65, "😺"),
		demo_set("Retro Waves", "retro_waves", "retro", 18, "🌊")
	]
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{error::ErrorKind, image::Passthrough, tg::tests::mock_config, whatsapp::build_default};
	use wiremock::{
		matchers::{any, method, path, query_param},
		Mock, MockServer, ResponseTemplate
	};

	const PACK: &str = r#"{"ok": true, "result": {
		"name": "animals",
		"title": "Animals",
		"stickers": [
			{"file_id": "a", "file_unique_id": "ua", "width": 512, "height": 512, "is_animated": false, "is_video": false, "emoji": "🐶"},
			{"file_id": "b", "file_unique_id": "ub", "width": 512, "height": 512, "is_animated": true, "is_video": false, "emoji": "🐱"},
			{"file_id": "c", "file_unique_id": "uc", "width": 512, "height": 512, "is_animated": false, "is_video": false}
		]
	}}"#;

	async fn mount_pack(server: &MockServer) {
		Mock::given(method("GET"))
			.and(path("/bottest_token/getStickerSet"))
			.and(query_param("name", "animals"))
			.respond_with(ResponseTemplate::new(200).set_body_string(PACK))
			.expect(1)
			.mount(server)
			.await;
	}

	async fn mount_file(server: &MockServer, file_id: &str, status: u16) {
		Mock::given(path("/bottest_token/getFile"))
			.and(query_param("file_id", file_id))
			.respond_with(ResponseTemplate::new(200).set_body_string(format!(
				r#"{{"ok": true, "result": {{"file_path": "stickers/{file_id}.webp"}}}}"#
			)))
			.mount(server)
			.await;
		Mock::given(path(format!("/file/bottest_token/stickers/{file_id}.webp")))
			.respond_with(ResponseTemplate::new(status).set_body_bytes(format!("data {file_id}").into_bytes()))
			.mount(server)
			.await;
	}

	fn config(out_dir: &Path) -> ImportConfig {
		ImportConfig {
			out_dir: out_dir.to_owned(),
			..Default::default()
		}
	}

	#[tokio::test]
	async fn convert_pack() {
		let server = MockServer::start().await;
		mount_pack(&server).await;
		mount_file(&server, "a", 200).await;
		mount_file(&server, "c", 200).await;
		let dir = tempfile::tempdir().unwrap();

		let conversion = convert(
			&["https://t.me/addstickers/animals"],
			&mock_config(&server),
			&Passthrough,
			&config(dir.path())
		)
		.await
		.unwrap();

		assert_eq!(conversion.sets.len(), 1);
		assert_eq!(conversion.skipped.len(), 1);
		assert_eq!(conversion.skipped[0].position, 1);
		assert_eq!(
			conversion.summary(),
			"1 packs loaded with 2 stickers. Skipped 1 animated or video stickers."
		);

		let packs = &conversion.manifest.sticker_packs;
		assert_eq!(packs.len(), 1);
		assert_eq!(packs[0].identifier, "animals_1");
		assert_eq!(packs[0].name, "Animals (0-2)");
		assert_eq!(packs[0].publisher, "animals");
		assert_eq!(packs[0].tray_image_file, "animals_1.webp");
		assert_eq!(packs[0].stickers[1].emojis, vec!["✨"]);

		assert_eq!(
			conversion.stored,
			vec![
				StoredSticker {
					path: dir.path().join("animals_1.webp"),
					mime_type: "image/webp".to_owned()
				},
				StoredSticker {
					path: dir.path().join("animals_2.webp"),
					mime_type: "image/webp".to_owned()
				}
			]
		);
		assert_eq!(
			std::fs::read(dir.path().join("animals_2.webp")).unwrap(),
			b"data c"
		);
	}

	#[tokio::test]
	async fn dry_run() {
		let server = MockServer::start().await;
		mount_pack(&server).await;
		Mock::given(path("/bottest_token/getFile"))
			.respond_with(ResponseTemplate::new(500))
			.expect(0)
			.mount(&server)
			.await;
		let dir = tempfile::tempdir().unwrap();
		let mut config = config(&dir.path().join("out"));
		config.dry_run = true;

		let conversion = convert(&["@animals"], &mock_config(&server), &Passthrough, &config)
			.await
			.unwrap();
		assert!(conversion.stored.is_empty());
		assert_eq!(conversion.manifest.sticker_count(), 2);
		assert!(!dir.path().join("out").exists());
	}

	#[tokio::test]
	async fn failed_download_aborts() {
		let server = MockServer::start().await;
		mount_pack(&server).await;
		mount_file(&server, "a", 200).await;
		mount_file(&server, "c", 404).await;
		let dir = tempfile::tempdir().unwrap();

		let err = convert(&["animals"], &mock_config(&server), &Passthrough, &config(dir.path()))
			.await
			.unwrap_err();
		assert!(matches!(err, Error::DownloadStatus { .. }));
		assert_eq!(err.kind(), ErrorKind::Upstream);
	}

	#[tokio::test]
	async fn failed_download_keeps_previous_stickers() {
		let server = MockServer::start().await;
		mount_pack(&server).await;
		mount_file(&server, "a", 200).await;
		Mock::given(path("/bottest_token/getFile"))
			.and(query_param("file_id", "c"))
			.respond_with(
				ResponseTemplate::new(200)
					.set_body_string(r#"{"ok": true, "result": {"file_path": "stickers/c.webp"}}"#)
			)
			.mount(&server)
			.await;
		Mock::given(path("/file/bottest_token/stickers/c.webp"))
			.respond_with(ResponseTemplate::new(404).set_delay(std::time::Duration::from_millis(500)))
			.mount(&server)
			.await;
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join("animals_1.webp"), b"old").unwrap();

		let err = convert(&["animals"], &mock_config(&server), &Passthrough, &config(dir.path()))
			.await
			.unwrap_err();
		assert!(matches!(err, Error::DownloadStatus { .. }));
		assert_eq!(std::fs::read(dir.path().join("animals_1.webp")).unwrap(), b"old");
		assert!(!dir.path().join("animals_2.webp").exists());
	}

	#[tokio::test]
	async fn invalid_input_before_network() {
		let server = MockServer::start().await;
		Mock::given(any())
			.respond_with(ResponseTemplate::new(500))
			.expect(0)
			.mount(&server)
			.await;
		let dir = tempfile::tempdir().unwrap();

		let err = convert(
			&["animals", "not/a/link"],
			&mock_config(&server),
			&Passthrough,
			&config(dir.path())
		)
		.await
		.unwrap_err();
		assert_eq!(err.kind(), ErrorKind::InvalidInput);

		let no_packs: [&str; 0] = [];
		let err = convert(&no_packs, &mock_config(&server), &Passthrough, &config(dir.path()))
			.await
			.unwrap_err();
		assert_eq!(err.kind(), ErrorKind::InvalidInput);

		let mut tg_config = mock_config(&server);
		tg_config.bot_key.clear();
		let err = convert(&["animals"], &tg_config, &Passthrough, &config(dir.path()))
			.await
			.unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Auth);
	}

	#[test]
	fn import_json() {
		let sets = parse_sets_json(
			r#"[
				{"name": "Astral Cats", "stickers": [{"image_file": "astral_1.webp", "emojis": ["😺"]}]},
				{"name": "Empty"}
			]"#
		)
		.unwrap();
		assert_eq!(sets.len(), 2);
		assert_eq!(sets[0].identifier(), "astral_cats");
		assert!(sets[1].stickers.is_empty());
		assert_eq!(summary(&sets), "2 packs loaded with 1 stickers.");
		assert_eq!(build_default(&sets).sticker_packs.len(), 1);
	}

	#[test]
	fn import_json_invalid() {
		let err = parse_sets_json(r#"{"name": "Astral Cats"}"#).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::InvalidInput);
		assert_eq!(
			err.to_string(),
			"failed to import sticker sets: JSON must be an array of sticker packs."
		);
		assert!(parse_sets_json("[").is_err());
		assert!(parse_sets_json(r#"[{"stickers": [{"emojis": []}]}]"#).is_err());
	}

	#[test]
	fn demo() {
		let sets = demo_sets();
		assert_eq!(summary(&sets), "2 packs loaded with 83 stickers.");
		let manifest = build_default(&sets);
		let identifiers: Vec<&str> = manifest
			.sticker_packs
			.iter()
			.map(|pack| pack.identifier.as_str())
			.collect();
		assert_eq!(
			identifiers,
			vec!["astral_cats_1", "astral_cats_2", "astral_cats_3", "retro_waves_1"]
		);
		assert_eq!(manifest.sticker_packs[3].tray_image_file, "retro_1.webp");
	}

	#[test]
	fn no_sets() {
		assert_eq!(summary(&[]), "No sticker packs loaded.");
	}

	#[tokio::test]
	async fn save() {
		let dir = tempfile::tempdir().unwrap();
		let manifest = build_default(&demo_sets());
		let path = save_manifest(&manifest, dir.path(), true).await.unwrap();
		assert_eq!(path, dir.path().join(MANIFEST_FILE));
		let saved: OutputManifest = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
		assert_eq!(saved, manifest);
	}
}
