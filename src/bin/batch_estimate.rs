use anyhow::Context;
use clap::Parser;
use savings_estimator::config::toml_config::{BatchConfig, TomlConfig};
use savings_estimator::core::report;
use savings_estimator::domain::ports::{Pipeline, Storage};
use savings_estimator::utils::{logger, validation::Validate};
use savings_estimator::{BatchPipeline, EstimateEngine, LocalStorage, SavingsCalculator};

#[derive(Parser)]
#[command(name = "batch-estimate")]
#[command(about = "Estimate savings for every request in a CSV file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "estimator.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the request file from config
    #[arg(long)]
    input: Option<String>,

    /// Override the output directory from config
    #[arg(long)]
    output: Option<String>,

    /// Show what would be processed without writing reports
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    logger::init_logger(args.verbose, config.log_level(), config.json_logs());
    tracing::info!("Loaded configuration from: {}", args.config);

    if let Some(batch) = config.batch.as_mut() {
        if let Some(input) = &args.input {
            batch.input_file = input.clone();
            tracing::info!("Request file overridden to: {}", input);
        }
        if let Some(output) = &args.output {
            batch.output_path = output.clone();
            tracing::info!("Output directory overridden to: {}", output);
        }
    }

    let validated = config.validate().and_then(|_| config.require_batch().cloned());
    let batch = match validated {
        Ok(batch) => batch,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    display_config_summary(&config, &batch, &args);

    let table = config.savings_table()?;
    let calculator = SavingsCalculator::new(config.assumptions());
    let pipeline = BatchPipeline::new(LocalStorage::new("."), batch.clone(), table, calculator)
        .with_currency_symbol(config.currency_symbol());

    if args.dry_run {
        tracing::info!("DRY RUN MODE - no reports will be written");
        perform_dry_run(&config, &batch, &pipeline)?;
        return Ok(());
    }

    let engine = EstimateEngine::new(pipeline);

    match engine.run() {
        Ok(outcome) => {
            println!("✅ Batch estimate completed");
            print!(
                "{}",
                report::render_batch_summary(&outcome.report, config.currency_symbol())
            );
            println!("📁 Reports saved to: {}", outcome.output_path);
        }
        Err(e) => {
            tracing::error!(
                "Batch estimate failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, batch: &BatchConfig, args: &Args) {
    let assumptions = config.assumptions();
    println!("📋 Configuration Summary:");
    println!("  Estimator: {}", config.name());
    println!("  Requests: {}", batch.input_file);
    println!("  Output: {}", batch.output_path);
    println!("  Formats: {}", batch.output_formats.join(", "));
    println!(
        "  Admin recovery rate: {}, units per employee per order: {}",
        assumptions.admin_recovery_rate, assumptions.units_per_employee_per_order
    );

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run<S: Storage>(
    config: &TomlConfig,
    batch: &BatchConfig,
    pipeline: &BatchPipeline<S, BatchConfig>,
) -> anyhow::Result<()> {
    let table = config
        .savings_table()
        .context("building the product savings table")?;
    let forms = pipeline
        .extract()
        .with_context(|| format!("reading request file '{}'", batch.input_file))?;
    let unreadable = forms.iter().filter(|(_, form)| form.is_err()).count();

    println!("🔍 Dry Run Analysis:");
    println!("  Request rows: {}", forms.len());
    if unreadable > 0 {
        println!("  ⚠️  Unreadable rows: {}", unreadable);
    }
    println!("  Products configured: {}", table.len());
    for (id, amount) in table.sorted_entries() {
        println!("    {} -> {}{}", id, config.currency_symbol(), amount);
    }
    println!(
        "  Invalid rows: {}",
        batch.on_invalid_row.as_deref().unwrap_or("skip")
    );
    println!();
    println!("✅ Dry run analysis complete.");

    Ok(())
}
