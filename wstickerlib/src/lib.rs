#![allow(clippy::tabs_in_doc_comments)]
#![warn(unreachable_pub)]
#![cfg_attr(all(doc, nightly), feature(doc_auto_cfg))]

//! Convert Telegram stickerpacks to stickerpacks, which can be imported by WhatsApp sticker apps.
//!
//! The usual flow is
//! [`tg::pack_url_to_name`] → [`tg::StickerPack::get`] → [`tg::resolve_file`] (per sticker) → [`whatsapp::build`].
//! [`import::convert`] drives all of these steps at once.

pub mod error;
pub mod image;
pub mod import;
pub mod slug;
pub mod tg;
pub mod whatsapp;

use once_cell::sync::OnceCell;

static CLIENT: OnceCell<reqwest::Client> = OnceCell::new();

/// Set the http client used for all requests to telegram.
///
/// Panics if a client was already set or if [`get_client`] was already called.
pub fn set_client(client: reqwest::Client) {
	if CLIENT.set(client).is_err() {
		panic!("reqwest client was already set")
	}
}

/// Return the http client, creating a default one on first use.
pub fn get_client() -> &'static reqwest::Client {
	CLIENT.get_or_init(reqwest::Client::new)
}
