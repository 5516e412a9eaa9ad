use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = funnel_api::Args::parse();
	funnel_api::run(args).await
}
