use super::OutputOpt;
use crate::load_config_file;
use clap::Parser;
use wstickerlib::{
	import::{demo_sets, summary},
	whatsapp::build
};

#[derive(Debug, Parser)]
pub struct Opt {
	#[clap(flatten)]
	output: OutputOpt
}

#[tokio::main(flavor = "current_thread")]
pub async fn run(opt: Opt) -> anyhow::Result<()> {
	let config = load_config_file()?;
	let sets = demo_sets();
	println!("{}", summary(&sets));
	let manifest = build(&sets, opt.output.max_per_pack, &config.metadata);
	opt.output.save(&manifest).await
}
