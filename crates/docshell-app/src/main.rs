use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    docshell_core::init_logging();

    let args = docshell_app::Args::parse();
    let report = docshell_app::run(args).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
