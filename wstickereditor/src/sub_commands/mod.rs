use clap::Parser;
use std::path::PathBuf;
use wstickerlib::{
	import::save_manifest,
	whatsapp::{OutputManifest, MAX_STICKERS_PER_PACK}
};

pub mod build;
pub mod demo;
pub mod import;
pub mod print_shell_completion;

/// options shared by all sub commands, which write a manifest
#[derive(Debug, Parser)]
pub struct OutputOpt {
	/// Directory for the stickers and the `sticker_packs.json`
	#[clap(short, long, default_value = "stickers")]
	output: PathBuf,

	/// Maximum number of stickers per WhatsApp pack
	#[clap(long, default_value_t = MAX_STICKERS_PER_PACK)]
	max_per_pack: usize,

	/// pretty human readable sticker_packs.json
	#[clap(short, long)]
	pretty: bool
}

impl OutputOpt {
	async fn save(&self, manifest: &OutputManifest) -> anyhow::Result<()> {
		let path = save_manifest(manifest, &self.output, self.pretty).await?;
		println!(
			"save {} WhatsApp stickerpacks with {} stickers to {}",
			manifest.sticker_packs.len(),
			manifest.sticker_count(),
			path.display()
		);
		Ok(())
	}
}
