use reqwest::StatusCode;
use std::{fmt::Display, io};
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Error, Debug)]
#[error("{0:?} does not look like a Telegram StickerPack\nPack url should look like \"https://t.me/addstickers/animals\", \"@animals\" or \"animals\"")]
pub struct InvalidPackUrl(pub String);

#[derive(Error, Debug)]
#[error("missing Telegram bot key; set `bot_key` at the config file or the `TELEGRAM_BOT_TOKEN` environment variable")]
pub struct MissingBotKey;

/// Telegram has answered with `"ok": false`, or with an error status and no readable body.
#[derive(Error, Debug)]
pub struct TelegramApiError {
	pub error_code: Option<u32>,
	pub description: Option<String>
}

impl Display for TelegramApiError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Telegram request was not successful:")?;
		if let Some(error_code) = self.error_code {
			write!(f, " {error_code}")?;
		}
		match &self.description {
			Some(description) => write!(f, " {description}"),
			None => write!(f, " Telegram did not provide an error description")
		}
	}
}

#[derive(Error, Debug)]
#[error("no extension/mimetype found at sticker filename {0:?}")]
pub struct NoMimeType(pub String);

/// Coarse classification of [`Error`], to decide how an error should be reported to the user.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
	/// Bad pack url or import file; can be fixed by the user
	InvalidInput,
	/// Missing or rejected bot key
	Auth,
	/// Telegram has returned an error or an unexpected answer
	Upstream,
	/// Failed to store, read or convert a local file
	LocalIo
}

#[derive(Error, Debug)]
pub enum Error {
	#[error(transparent)]
	InvalidPackUrl(#[from] InvalidPackUrl),
	#[error("failed to import sticker sets: {0}")]
	InvalidImport(String),
	#[error(transparent)]
	MissingBotKey(#[from] MissingBotKey),
	#[error("failed to perform request: {0}")]
	Reqwest(#[from] reqwest::Error),
	/// Telegram api has return an error
	#[error("failed to perform request: {0}")]
	Telegram(#[from] TelegramApiError),
	#[error("Telegram has answered with an unexpected response: {0}")]
	MalformedResponse(serde_json::Error),
	/// the file url contains the bot key, so only the file path is kept
	#[error("failed to download sticker {file_path:?}: {status}")]
	DownloadStatus { status: StatusCode, file_path: String },
	#[error(transparent)]
	IoError(#[from] io::Error),
	#[error("failed to join task: {0}")]
	JoinError(#[from] JoinError),
	#[error("failed to convert sticker: {0}")]
	Image(#[from] ::image::ImageError),
	#[error(transparent)]
	NoMimeType(#[from] NoMimeType),
	#[error("failed to serialize stickerpacks: {0}")]
	Json(#[from] serde_json::Error)
}

impl Error {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::InvalidPackUrl(_) | Self::InvalidImport(_) => ErrorKind::InvalidInput,
			Self::MissingBotKey(_) => ErrorKind::Auth,
			Self::Telegram(TelegramApiError {
				error_code: Some(401),
				..
			}) => ErrorKind::Auth,
			Self::Reqwest(_) | Self::Telegram(_) | Self::MalformedResponse(_) | Self::DownloadStatus { .. } => {
				ErrorKind::Upstream
			},
			Self::IoError(_) | Self::JoinError(_) | Self::Image(_) | Self::NoMimeType(_) | Self::Json(_) => {
				ErrorKind::LocalIo
			},
		}
	}
}
