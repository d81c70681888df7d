//! Search visibility agent CLI
//!
//! Generates search-style queries for a brand, asks a chat model each one,
//! then reports how often the brand shows up and in what tone.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use console::Term;
use dialoguer::{theme::ColorfulTheme, Input};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use visibility_core::{
    export,
    sentiment::{shared_classifier, OpenAIClassifier},
    BrandProfile, Config, OpenAIClient, QueryCount, SentimentClassifier, Summary,
    VisibilityPipeline,
};

mod output;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SentimentBackend {
    /// Local keyword lexicon (no network)
    Lexicon,
    /// Ask the chat model for a verdict
    Llm,
}

#[derive(Parser)]
#[command(name = "visibility")]
#[command(about = "Measure brand visibility and sentiment in AI-generated answers")]
#[command(version)]
struct Cli {
    /// Brand name to look for in answers
    #[arg(long)]
    brand: Option<String>,

    /// Comma-separated product names (the first is used in queries)
    #[arg(long)]
    products: Option<String>,

    /// Product category (e.g., "Air Care")
    #[arg(long)]
    category: Option<String>,

    /// Comma-separated competitor names (the first is used in queries)
    #[arg(long)]
    competitors: Option<String>,

    /// Number of queries to run (10-100)
    #[arg(short = 'n', long, default_value = "20", value_parser = parse_count)]
    count: QueryCount,

    /// Prompt for every input, pre-filled with the current values
    #[arg(short, long)]
    interactive: bool,

    /// Where to write the CSV export
    #[arg(short, long, default_value = export::DEFAULT_FILE_NAME)]
    output: PathBuf,

    /// Completion model (overrides VISIBILITY_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Answer length bound in tokens (overrides VISIBILITY_MAX_TOKENS)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_tokens: Option<u32>,

    /// Sentiment classifier to use
    #[arg(long, value_enum, default_value_t = SentimentBackend::Lexicon)]
    sentiment: SentimentBackend,
}

fn parse_count(raw: &str) -> std::result::Result<QueryCount, String> {
    let count: usize = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a whole number"))?;
    QueryCount::new(count).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,visibility=info,visibility_core=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let term = Term::stdout();
    output::print_banner();

    let config = match Config::from_env() {
        Ok(config) => apply_overrides(config, &cli),
        Err(e) => {
            warn!(error = %e, "Configuration invalid, not starting run");
            output::print_warning(&e.to_string());
            output::print_warning("Set OPENAI_API_KEY in your environment or a .env file.");
            return Ok(ExitCode::from(1));
        }
    };

    let defaults = BrandProfile::default();
    let mut profile = BrandProfile::new(
        cli.brand.clone().unwrap_or(defaults.brand),
        cli.products.clone().unwrap_or(defaults.products),
        cli.category.clone().unwrap_or(defaults.category),
        cli.competitors.clone().unwrap_or(defaults.competitors),
    );
    let mut count = cli.count;

    if cli.interactive || (cli.brand.is_none() && term.is_term()) {
        (profile, count) = prompt_inputs(&term, profile, count)?;
    }
    output::print_inputs(&profile, count);

    info!(
        brand = %profile.brand,
        queries = count.get(),
        model = %config.model,
        sentiment = ?cli.sentiment,
        "Starting visibility run"
    );

    let client = OpenAIClient::from_config(&config);
    let llm_classifier;
    let classifier: &dyn SentimentClassifier = match cli.sentiment {
        SentimentBackend::Lexicon => shared_classifier(),
        SentimentBackend::Llm => {
            llm_classifier = OpenAIClassifier::new(client.clone());
            &llm_classifier
        }
    };
    let pipeline = VisibilityPipeline::new(&client, classifier);

    let queries = pipeline.generate(&profile, count);
    output::print_step(&format!("Generated {} queries", queries.len()));

    let bar = output::progress_bar(queries.len(), "Fetching answers")?;
    let on_answer = |done: usize, _total: usize| bar.set_position(done as u64);
    let answers = pipeline.fetch(&queries, Some(&on_answer)).await;
    bar.finish_and_clear();
    output::print_step(&format!("Fetched {} answers from {}", answers.len(), config.model));

    let bar = output::progress_bar(queries.len(), "Analyzing answers")?;
    let on_row = |done: usize, _total: usize| bar.set_position(done as u64);
    let rows = pipeline
        .analyze(&queries, &answers, &profile.brand, Some(&on_row))
        .await;
    bar.finish_and_clear();
    output::print_step("Analysis complete");

    let summary = Summary::from_rows(&rows);
    output::print_summary(&summary);
    output::print_sentiment_chart(&summary);
    output::print_results_table(&rows);

    export::write_csv(&cli.output, &rows)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    info!(
        path = %cli.output.display(),
        visibility_rate = summary.visibility_rate,
        "Run complete"
    );
    output::print_export(&cli.output);

    Ok(ExitCode::SUCCESS)
}

/// Flags take precedence over environment configuration.
fn apply_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(model) = &cli.model {
        info!(model = %model, "Model overridden by flag");
        config = config.with_model(model);
    }
    if let Some(max_tokens) = cli.max_tokens {
        info!(max_tokens, "Max tokens overridden by flag");
        config = config.with_max_tokens(max_tokens);
    }
    config
}

/// Ask for each input, pre-filled with the values collected so far.
fn prompt_inputs(
    term: &Term,
    profile: BrandProfile,
    count: QueryCount,
) -> Result<(BrandProfile, QueryCount)> {
    let theme = ColorfulTheme::default();

    let brand: String = Input::with_theme(&theme)
        .with_prompt("Brand name")
        .default(profile.brand)
        .interact_text_on(term)?;
    let products: String = Input::with_theme(&theme)
        .with_prompt("Product names (comma-separated)")
        .default(profile.products)
        .interact_text_on(term)?;
    let category: String = Input::with_theme(&theme)
        .with_prompt("Product category")
        .default(profile.category)
        .interact_text_on(term)?;
    let competitors: String = Input::with_theme(&theme)
        .with_prompt("Competitors (comma-separated)")
        .default(profile.competitors)
        .allow_empty(true)
        .interact_text_on(term)?;
    let queries: usize = Input::with_theme(&theme)
        .with_prompt(format!(
            "Number of queries ({}-{})",
            QueryCount::MIN,
            QueryCount::MAX
        ))
        .default(count.get())
        .validate_with(|n: &usize| QueryCount::new(*n).map(|_| ()).map_err(|e| e.to_string()))
        .interact_text_on(term)?;

    Ok((
        BrandProfile::new(brand, products, category, competitors),
        QueryCount::new(queries)?,
    ))
}
