use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = bidwell_api::Args::parse();

	bidwell_api::run(args).await
}
