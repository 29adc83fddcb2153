use super::{tg_get, Config, File};
use crate::{
	error::{Error, TelegramApiError},
	get_client,
	image::Image
};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Sticker {
	///Emoji associated with the sticker
	pub emoji: Option<String>,
	///Identifier for this file, which can be used to download or reuse the file
	pub file_id: String,
	///Unique identifier for this file, which is supposed to be the same over time and for different bots. Can't be used to download or reuse the file.
	#[serde(default)]
	pub file_unique_id: String,
	///Sticker width
	#[serde(default)]
	pub width: u32,
	///Sticker height
	#[serde(default)]
	pub height: u32,
	///True, if the sticker is [animated](https://telegram.org/blog/animated-stickers)
	#[serde(default)]
	pub is_animated: bool,
	///True, if the sticker is a [video sticker](https://telegram.org/blog/video-stickers-better-reactions)
	#[serde(default)]
	pub is_video: bool
}

/// Where a sticker file can be downloaded from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileLocation {
	/// download url; contains the bot key, do not log it
	pub url: String,
	/// path of the file at the Telegram server
	pub file_path: String,
	/// last segment of the file path, or `<file_id>.webp` if Telegram does not provide one
	pub suggested_file_name: String
}

/// Look up where the file with `file_id` is stored.
pub async fn resolve_file(file_id: &str, tg_config: &Config) -> Result<FileLocation, Error> {
	let file: File = tg_get(tg_config, "getFile", [("file_id", file_id)]).await?;
	let file_path = file
		.file_path
		.filter(|path| !path.is_empty())
		.ok_or_else(|| TelegramApiError {
			error_code: None,
			description: Some(format!("Telegram has not returned a path for file {file_id:?}"))
		})?;
	let suggested_file_name = match file_path.rsplit('/').next() {
		Some(name) if !name.is_empty() => name.to_owned(),
		_ => format!("{file_id}.webp")
	};
	Ok(FileLocation {
		url: format!(
			"{}/file/bot{}/{}",
			tg_config.api_url(),
			tg_config.bot_key()?,
			file_path
		),
		file_path,
		suggested_file_name
	})
}

impl FileLocation {
	pub async fn download(&self) -> Result<Image, Error> {
		let resp = get_client()
			.get(&self.url)
			.send()
			.await
			.map_err(reqwest::Error::without_url)?;
		if !resp.status().is_success() {
			return Err(Error::DownloadStatus {
				status: resp.status(),
				file_path: self.file_path.clone()
			});
		}
		let data = resp.bytes().await.map_err(reqwest::Error::without_url)?.to_vec();
		Ok(Image {
			file_name: self.suggested_file_name.clone(),
			data
		})
	}
}

impl Sticker {
	pub async fn resolve(&self, tg_config: &Config) -> Result<FileLocation, Error> {
		resolve_file(&self.file_id, tg_config).await
	}

	pub async fn download_image(&self, tg_config: &Config) -> Result<Image, Error> {
		self.resolve(tg_config).await?.download().await
	}
}
