use parcelfare::cli::{batch_output, Cli};
use parcelfare::config::{Config, ConfigLoader};
use parcelfare::debug_println;
use parcelfare::pricing::{quote, ParcelType, Quote, QuoteRequest};
use std::io;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();
    let config_path = ConfigLoader::resolve_path(cli.config.as_deref());

    // Handle configuration commands
    if cli.init {
        if Config::init_at(&config_path)? {
            println!("Created config at {}", config_path.display());
        } else {
            println!("Config already exists at {}", config_path.display());
        }
        return Ok(());
    }

    let config = Config::load_from(&config_path)?;

    if cli.print {
        config.print()?;
        return Ok(());
    }

    if cli.check {
        config.check()?;
        println!("✓ Configuration valid");
        return Ok(());
    }

    if cli.list_types {
        print_parcel_types(&config);
        return Ok(());
    }

    if cli.list_locations {
        for location in &config.locations {
            println!(
                "{:<16} {:<10} {:>9.4}, {:>9.4}",
                location.name, location.county, location.latitude, location.longitude
            );
        }
        return Ok(());
    }

    // Quoting needs a schedule that passes validation
    config.schedule.validate()?;

    if cli.batch {
        let stdin = io::stdin();
        let requests: Vec<QuoteRequest> = serde_json::from_reader(stdin.lock())?;
        let output = batch_output(&config.schedule, &requests);

        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let input = match cli.quote_input(&config) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };
    debug_println!(
        "Quoting {} {}kg over {}km",
        input.parcel_type,
        input.weight,
        input.distance
    );

    let request = QuoteRequest {
        parcel_type: input.parcel_type,
        weight: input.weight,
        distance: input.distance,
    };

    let quote = match quote(&config.schedule, &request) {
        Ok(quote) => quote,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!(
                "Valid parcel types: {}",
                ParcelType::ALL.map(|t| t.key()).join(", ")
            );
            std::process::exit(1);
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    } else {
        print_quote(&quote, &config.schedule.currency);
    }

    Ok(())
}

fn print_quote(quote: &Quote, currency: &str) {
    println!("Estimated cost: {} {}", currency, quote.breakdown.total);
    if let Some(lines) = &quote.breakdown.explanation {
        for line in lines {
            println!("  {}", line);
        }
    }
    println!(
        "  Quoted at {}",
        quote.quoted_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}

fn print_parcel_types(config: &Config) {
    for (parcel_type, def) in &config.schedule.parcel_types {
        println!(
            "{:<10} {:<22} up to {}kg  {} {}  {}",
            parcel_type.key(),
            def.label,
            def.max_weight,
            config.schedule.currency,
            def.base_price,
            def.description
        );
    }
    println!(
        "Weight above the allowance: {} {} per kg",
        config.schedule.currency, config.schedule.weight_penalty_rate
    );
}
