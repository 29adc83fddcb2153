use crate::{
	error::{Error, MissingBotKey, TelegramApiError},
	get_client
};
use log::debug;
use monostate::MustBe;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

mod sticker;
pub use sticker::{resolve_file, FileLocation, Sticker};

mod stickerpack;
pub use stickerpack::{pack_url_to_name, SkipReason, SkippedSticker, StickerPack};

pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

fn default_api_url() -> String {
	TELEGRAM_API_URL.to_owned()
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub bot_key: String,
	/// root of the bot api; only needs to be changed for a local bot api server
	#[serde(default = "default_api_url")]
	pub api_url: String
}

impl Default for Config {
	fn default() -> Self {
		Self {
			bot_key: String::new(),
			api_url: default_api_url()
		}
	}
}

impl Config {
	pub fn new<S: Into<String>>(bot_key: S) -> Self {
		Self {
			bot_key: bot_key.into(),
			..Default::default()
		}
	}

	/// Return the bot key, or an error if none is configured.
	pub fn bot_key(&self) -> Result<&str, MissingBotKey> {
		match self.bot_key.trim() {
			"" => Err(MissingBotKey),
			key => Ok(key)
		}
	}

	fn api_url(&self) -> &str {
		self.api_url.trim_end_matches('/')
	}
}

/// File storage at Telegram; see <https://core.telegram.org/bots/api#file>
#[derive(Debug, Deserialize)]
struct File {
	file_path: Option<String>
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TgResponse<T> {
	Ok {
		#[allow(dead_code)]
		ok: MustBe!(true),

		result: T
	},
	Err {
		#[allow(dead_code)]
		ok: MustBe!(false),

		error_code: Option<u32>,
		description: Option<String>
	}
}

async fn tg_get<T, P>(tg_config: &Config, operation: &str, params: P) -> Result<T, Error>
where
	T: DeserializeOwned,
	P: Serialize,
	P: Sized
{
	let bot_key = tg_config.bot_key()?;
	debug!("telegram request {operation}");
	// the url contains the bot key, so it is removed from every error
	let resp = get_client()
		.get(format!("{}/bot{}/{}", tg_config.api_url(), bot_key, operation))
		.query(&params)
		.send()
		.await
		.map_err(reqwest::Error::without_url)?;
	let status = resp.status();
	let body = resp.bytes().await.map_err(reqwest::Error::without_url)?;
	let resp: TgResponse<T> = match serde_json::from_slice(&body) {
		Ok(resp) => resp,
		Err(_) if !status.is_success() => {
			return Err(TelegramApiError {
				error_code: Some(status.as_u16().into()),
				description: status.canonical_reason().map(str::to_owned)
			}
			.into())
		},
		Err(err) => return Err(Error::MalformedResponse(err))
	};
	match resp {
		TgResponse::Ok { result, .. } => Ok(result),
		TgResponse::Err {
			error_code, description, ..
		} => Err(TelegramApiError { error_code, description }.into())
	}
}
