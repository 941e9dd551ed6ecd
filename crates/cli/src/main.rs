use clap::Parser;

use boq_cli::{Cli, receipts_json, run};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    boq_observability::init_with(cli.log_format, "info");

    let receipts = run(&cli).inspect_err(|err| {
        tracing::error!(error = %format!("{err:#}"), "export failed");
    })?;

    if !cli.stdout {
        println!("{}", serde_json::to_string_pretty(&receipts_json(&receipts))?);
    }
    Ok(())
}
