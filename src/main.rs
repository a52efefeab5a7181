use clap::Parser;
use savings_estimator::core::report;
use savings_estimator::utils::error::EstimatorError;
use savings_estimator::utils::{logger, validation};
use savings_estimator::utils::validation::Validate;
use savings_estimator::{CliConfig, ProductSavingsTable, SavingsCalculator, TomlConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    let file_config = match &config.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(file_config) => file_config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(e.exit_code());
            }
        },
        None => TomlConfig::default(),
    };

    logger::init_logger(config.verbose, file_config.log_level(), file_config.json_logs());

    tracing::info!("Starting savings-estimator");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config, &file_config) {
        tracing::error!(
            "Estimate failed: {} (Category: {:?}, Severity: {:?})",
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

    Ok(())
}

fn run(config: &CliConfig, file_config: &TomlConfig) -> Result<(), EstimatorError> {
    config.validate()?;
    file_config.validate()?;

    let table = file_config.savings_table()?;
    let symbol = file_config.currency_symbol();

    if config.list_products {
        print_products(&table, symbol);
        return Ok(());
    }

    let form = config.to_form()?;
    let request = validation::validate_form(&form)?;
    tracing::debug!("Validated request: {:?}", request);

    let calculator = SavingsCalculator::new(file_config.assumptions());
    let result = calculator.compute(&request, &table);
    tracing::info!(
        admin = %result.admin_savings,
        product = %result.product_savings,
        total = %result.total_savings,
        "Computed estimate"
    );

    if config.json_output() {
        println!("{}", report::render_json(&request, &result, symbol)?);
    } else {
        print!("{}", report::render_text(&request, &result, symbol));
    }

    Ok(())
}

fn print_products(table: &ProductSavingsTable, symbol: &str) {
    println!("Products ({}):", table.len());
    for (id, amount) in table.sorted_entries() {
        println!("  {:<16} {}{} per unit", id, symbol, amount);
    }
}
