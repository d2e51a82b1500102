use anyhow::Context;
use clap::Parser;
use customer_desk::core::export::write_csv;
use customer_desk::utils::error::ErrorSeverity;
use customer_desk::utils::{logger, validation::Validate};
use customer_desk::{
    validate_customer, CliConfig, Command, ConfigProvider, Customer, CustomerDesk,
    CustomerListView, DeskError, JsonFileRepository, ListingOptions, Outcome, Rejection,
    SortState, TomlConfig,
};
use std::io::{BufRead, Write};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let mut toml = match &cli.config {
        Some(path) => Some(
            TomlConfig::from_file(path)
                .with_context(|| format!("Failed to load config file '{}'", path))?,
        ),
        None => None,
    };

    let verbose = cli.verbose || toml.as_ref().is_some_and(TomlConfig::verbose);
    if cli.json_logs || toml.as_ref().is_some_and(TomlConfig::json_logs) {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    if let Some(config) = toml.as_mut() {
        cli.apply_overrides(config);
    }

    let validation = match &toml {
        Some(config) => config.validate(),
        None => cli.validate(),
    };
    if let Err(e) = validation {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let command = cli.command.clone();
    let code = match &toml {
        Some(config) => run(config, command).await,
        None => run(&cli, command).await,
    };

    match code {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code)
        }
    }
}

async fn run<C: ConfigProvider>(config: &C, command: Command) -> Result<i32, DeskError> {
    let repository = JsonFileRepository::new(config.data_path());
    let desk = CustomerDesk::with_options(
        repository,
        ListingOptions {
            default_sort: config.default_sort(),
            search_scope: config.search_scope(),
        },
    );
    let rules = config.validation_rules();

    tracing::info!("Using customer data at {}", config.data_path());

    let outcome = match command {
        Command::List { search, sort, json } => {
            let sort = sort_token(sort.as_deref(), config.default_sort());
            let outcome = desk.index(search.as_deref(), Some(sort)).await;
            if let Outcome::Listed(view) = &outcome {
                if json {
                    println!("{}", serde_json::to_string_pretty(view)?);
                } else {
                    print_listing(view);
                }
            }
            outcome
        }
        Command::Show { id } => {
            let outcome = desk.show(id).await;
            if let Outcome::Found(customer) = &outcome {
                print_customer(customer);
            }
            outcome
        }
        Command::Create {
            first_name,
            last_name,
            address,
            discount,
        } => {
            let draft = Customer {
                first_name,
                last_name,
                address,
                discount,
                ..desk.new_form()
            };
            let errors = validate_customer(&draft, &rules);
            desk.create(draft, &errors).await
        }
        Command::Edit {
            id,
            first_name,
            last_name,
            address,
            discount,
            expected_version,
        } => {
            let current = match desk.edit_form(id).await {
                Outcome::Found(customer) => customer,
                other => return Ok(report(other)),
            };
            let draft = Customer {
                first_name: first_name.unwrap_or(current.first_name),
                last_name: last_name.unwrap_or(current.last_name),
                address: address.unwrap_or(current.address),
                discount: discount.unwrap_or(current.discount),
                version: expected_version.unwrap_or(current.version),
                id: current.id,
            };
            let errors = validate_customer(&draft, &rules);
            desk.edit(id, draft, &errors).await
        }
        Command::Delete { id, yes } => {
            if !yes {
                match desk.delete_confirm(id).await {
                    Outcome::Found(customer) => {
                        print_customer(&customer);
                        if !confirm("Delete this customer?")? {
                            println!("Cancelled");
                            return Ok(0);
                        }
                    }
                    other => return Ok(report(other)),
                }
            }
            desk.delete(id).await
        }
        Command::Export {
            search,
            sort,
            output,
        } => {
            let sort = sort_token(sort.as_deref(), config.default_sort());
            let outcome = desk.index(search.as_deref(), Some(sort)).await;
            if let Outcome::Listed(view) = &outcome {
                match &output {
                    Some(path) => {
                        let file = std::fs::File::create(path)?;
                        write_csv(&view.customers, file)?;
                        tracing::info!("📁 Exported {} customers to {}", view.len(), path);
                    }
                    None => write_csv(&view.customers, std::io::stdout().lock())?,
                }
            }
            outcome
        }
    };

    Ok(report(outcome))
}

fn sort_token(token: Option<&str>, default: SortState) -> SortState {
    if let Some(t) = token {
        if t.parse::<SortState>().is_err() {
            tracing::warn!("Unknown sort token '{}', using {}", t, default);
        }
    }
    SortState::from_token_or(token, default)
}

/// Prints the outcome and returns the process exit code for it.
fn report(outcome: Outcome) -> i32 {
    match outcome {
        Outcome::Listed(_) | Outcome::Found(_) => 0,
        Outcome::Created(id) => {
            println!("✅ Created customer {}", id);
            0
        }
        Outcome::Updated(id) => {
            println!("✅ Updated customer {}", id);
            0
        }
        Outcome::Deleted(id) => {
            println!("✅ Deleted customer {}", id);
            0
        }
        Outcome::NotFound => {
            eprintln!("❌ Customer not found");
            4
        }
        Outcome::Invalid(reason) => {
            eprintln!("❌ Request failed: {}", reason);
            1
        }
        Outcome::Conflict { id } => {
            eprintln!("❌ Customer {} was changed by someone else; reload and retry", id);
            2
        }
        Outcome::Rejected(Rejection::Draft { draft, errors }) => {
            eprintln!("❌ Customer '{}' was not saved:", draft.full_name().trim());
            for (field, message) in errors.iter() {
                eprintln!("   {}: {}", field, message);
            }
            5
        }
        Outcome::Rejected(Rejection::Delete { id, reason }) => {
            eprintln!("❌ Could not delete customer {}: {}", id, reason);
            eprintln!("💡 Run `delete {}` again to retry", id);
            5
        }
    }
}

fn print_listing(view: &CustomerListView) {
    if let Some(filter) = &view.current_filter {
        println!("Filter: {:?}", filter);
    }
    println!(
        "Sorted by {} (next: first={} last={} address={} discount={})",
        view.current_sort,
        view.links.first_name,
        view.links.last_name,
        view.links.address,
        view.links.discount
    );
    println!(
        "{:>5}  {:<15} {:<15} {:<25} {:>8}",
        "ID", "FIRST NAME", "LAST NAME", "ADDRESS", "DISCOUNT"
    );
    for c in &view.customers {
        println!(
            "{:>5}  {:<15} {:<15} {:<25} {:>8}",
            c.id, c.first_name, c.last_name, c.address, c.discount
        );
    }
    println!("{} customer(s)", view.len());
}

fn print_customer(customer: &Customer) {
    println!("Id:         {}", customer.id);
    println!("First name: {}", customer.first_name);
    println!("Last name:  {}", customer.last_name);
    println!("Address:    {}", customer.address);
    println!("Discount:   {}", customer.discount);
    println!("Version:    {}", customer.version);
}

fn confirm(prompt: &str) -> Result<bool, DeskError> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
