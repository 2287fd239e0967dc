//! Analyze Sample
//!
//! Runs one form submission from the command line and prints the results HTML.
//! Fields not given keep their form defaults.
//!
//! Run with: cargo run --features web --bin analyze_sample -- nitrogen=90 ph=6.5 rainfall=202.9

use anyhow::{bail, Context};
use crop_advisor_rust::{AdvisorConfig, Field, FormController, HttpPredictClient, PageState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "crop_advisor_rust=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AdvisorConfig::from_env()?;

    let mut page = PageState::new();
    for arg in std::env::args().skip(1) {
        let (id, value) = arg
            .split_once('=')
            .with_context(|| format!("expected field=value, got '{}'", arg))?;
        let Some(field) = Field::from_id(id) else {
            bail!("unknown field '{}' (expected one of: {})", id, field_list());
        };
        page.set_field(field, value);
    }

    let client = HttpPredictClient::new(config.predict_url.clone());
    eprintln!("Endpoint: {}", client.endpoint());
    let mut controller = FormController::new(page, client).with_lang(config.lang.clone());

    let sample = controller.read_sample();
    for field in Field::ALL {
        eprintln!("  {:<12} {}", field.id(), sample.get(field));
    }
    let outcome = controller.submit().await;
    eprintln!("Outcome: {:?}", outcome);

    println!("{}", controller.view().results_html());
    Ok(())
}

fn field_list() -> String {
    Field::ALL.map(Field::id).join(", ")
}
