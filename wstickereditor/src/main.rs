#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use directories::ProjectDirs;
use log::debug;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::{env, fs, io, process::exit};
use wstickerlib::{tg, whatsapp::MetaData};

mod sub_commands;
use sub_commands::*;

const CONFIG_FILE: &str = "config.toml";
const BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
const CARGO_PKG_NAME: &str = env!("CARGO_PKG_NAME");
static PROJECT_DIRS: Lazy<ProjectDirs> =
	Lazy::new(|| ProjectDirs::from("dev", "luckyturtle", CARGO_PKG_NAME).expect("failed to get project dirs"));

/// Load the config file; a missing file is not an error.
/// The bot key can be overwritten by the `TELEGRAM_BOT_TOKEN` environment variable.
pub fn load_config_file() -> anyhow::Result<Config> {
	let path = PROJECT_DIRS.config_dir().join(CONFIG_FILE);
	let mut config: Config = match fs::read_to_string(&path) {
		Ok(text) => {
			toml::from_str(&text).with_context(|| format!("Failed to prase config file {:?}", path.to_string_lossy()))?
		},
		Err(err) if err.kind() == io::ErrorKind::NotFound => {
			debug!("config file {:?} not found, use defaults", path.to_string_lossy());
			Config::default()
		},
		Err(err) => {
			return Err(err).with_context(|| format!("Failed to open config file {:?}", path.to_string_lossy()));
		}
	};
	if let Ok(bot_key) = env::var(BOT_TOKEN_ENV) {
		if !bot_key.trim().is_empty() {
			config.telegram.bot_key = bot_key;
		}
	}
	Ok(config)
}

#[derive(Default, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub telegram: tg::Config,
	#[serde(default)]
	pub metadata: MetaData
}

#[derive(Debug, Parser)]
#[clap(version, about)]
enum Opt {
	/// import Stickerpacks from telegram and convert them for WhatsApp
	Import(import::Opt),
	/// build the WhatsApp stickerpacks from a json file with sticker sets
	Build(build::Opt),
	/// build the WhatsApp stickerpacks from demo data
	Demo(demo::Opt),
	/// print shell completion for a given shell
	ShellCompletion(print_shell_completion::Opt)
}

fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let result = match Opt::parse() {
		Opt::Import(opt) => import::run(opt),
		Opt::Build(opt) => build::run(opt),
		Opt::Demo(opt) => demo::run(opt),
		Opt::ShellCompletion(opt) => print_shell_completion::run(opt)
	};
	if let Err(error) = result {
		eprintln!("{error:?}");
		exit(1);
	}
}
