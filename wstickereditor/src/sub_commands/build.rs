use super::OutputOpt;
use crate::load_config_file;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use wstickerlib::{
	import::{load_sets_json, summary},
	whatsapp::build
};

#[derive(Debug, Parser)]
pub struct Opt {
	/// json file with an array of sticker sets
	file: PathBuf,

	#[clap(flatten)]
	output: OutputOpt
}

#[tokio::main(flavor = "current_thread")]
pub async fn run(opt: Opt) -> anyhow::Result<()> {
	let config = load_config_file()?;
	let sets = load_sets_json(&opt.file)
		.await
		.with_context(|| format!("failed to load {}", opt.file.display()))?;
	println!("{}", summary(&sets));
	let manifest = build(&sets, opt.output.max_per_pack, &config.metadata);
	opt.output.save(&manifest).await
}
