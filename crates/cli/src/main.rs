//! Prints the integration table with secrets redacted

use tracing::info;

mod report;

use report::Args;

fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("integrations=info".parse()?)
                .add_directive("common=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse(std::env::args().skip(1))?;

    let table = common::integrations();
    let statuses = report::select(table, &args);
    info!("📋 Reporting {} integration(s)", statuses.len());

    if args.json {
        println!("{}", report::render_json(&statuses)?);
    } else {
        print!("{}", report::render_text(&statuses));
    }

    Ok(())
}
