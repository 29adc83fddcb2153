use super::OutputOpt;
use crate::load_config_file;
use anyhow::Context;
use clap::Parser;
use wstickerlib::{
	image::{Passthrough, WebpTranscoder},
	import::{convert, Conversion, ImportConfig}
};

#[derive(Debug, Parser)]
pub struct Opt {
	/// Pack urls, handles or names; comma separated lists are also accepted
	#[clap(required = true)]
	packs: Vec<String>,

	#[clap(flatten)]
	output: OutputOpt,

	/// Only fetch the sticker lists; do not download any sticker
	#[clap(short = 'd', long)]
	dryrun: bool,

	/// Do not format the stickers;
	/// The stickers may not be accepted by WhatsApp
	#[clap(short = 'F', long)]
	noformat: bool
}

fn split_packs(packs: &[String]) -> Vec<&str> {
	packs
		.iter()
		.flat_map(|pack| pack.split(','))
		.map(str::trim)
		.filter(|pack| !pack.is_empty())
		.collect()
}

#[tokio::main(flavor = "current_thread")]
pub async fn run(opt: Opt) -> anyhow::Result<()> {
	let config = load_config_file()?;
	let packs = split_packs(&opt.packs);

	let mut import_config = ImportConfig::default();
	import_config.max_per_pack = opt.output.max_per_pack;
	import_config.metadata = config.metadata;
	import_config.dry_run = opt.dryrun;
	import_config.out_dir = opt.output.output.clone();

	let conversion: Result<Conversion, _> = match opt.noformat {
		true => convert(&packs, &config.telegram, &Passthrough, &import_config).await,
		false => convert(&packs, &config.telegram, &WebpTranscoder::default(), &import_config).await
	};
	let conversion = conversion.with_context(|| format!("failed to import {}", packs.join(", ")))?;

	println!("{}", conversion.summary());
	opt.output.save(&conversion.manifest).await
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn comma_separated() {
		let packs = vec!["animals, @cats".to_owned(), "https://t.me/addstickers/dogs".to_owned(), " ,".to_owned()];
		assert_eq!(split_packs(&packs), vec!["animals", "@cats", "https://t.me/addstickers/dogs"]);
	}
}
