use anyhow::{anyhow, bail, Context};
use chrono::Utc;
use fansite_api::utils::{
    config::Config,
    logging::init_tracing,
    seed::{populate, SeedDocument, BUNDLED_SEED},
    state::AppState,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing(env!("CARGO_CRATE_NAME"));

    let raw = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read seed file {}", path))?,
        None => BUNDLED_SEED.to_string(),
    };

    let document = SeedDocument::parse(&raw).context("invalid seed document")?;
    let rows = document.into_rows(Utc::now()).map_err(|e| anyhow!(e))?;

    let config = Config::init()?;
    let state = AppState::init(config);

    info!(
        categories = rows.categories.len(),
        tags = rows.tags.len(),
        posts = rows.posts.len(),
        "Populating news tables"
    );
    let report = populate(&state, &rows).await;
    info!(inserted = report.inserted, failed = report.failed, "Seeding finished");

    if report.failed > 0 {
        bail!("{} rows failed to insert", report.failed);
    }
    Ok(())
}
