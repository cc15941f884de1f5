use areacode_locator::config::{timeout_from_secs, ResolverConfig};
use areacode_locator::location::phone::{self, ParserOptions};
use areacode_locator::location::{
    AreaCodeKind, AreaCodeTable, CallDirection, PhoneCall, PhoneResolver, UNKNOWN_LOCATION,
};
use areacode_locator::logging;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Area code lookup and phone number geolocation.
///
/// Remote validation providers are used when their keys are set
/// (NUMVERIFY_API_KEY, ABSTRACT_API_KEY); otherwise numbers are located
/// from the built-in area code table.
///
/// Examples:
///   areacode lookup 212 800
///   areacode resolve "+1 (212) 555-0100"
///   areacode resolve --offline --json 4155550123 13125550142
///   areacode parse --strict "+44 20 7946 0958"
///   areacode call --direction inbound --agent 8005550199 --external 2125550100
///   areacode table --special
#[derive(Parser)]
#[command(name = "areacode", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON file of extra area codes ({"212": "New York City, NY", ...}).
    /// Entries override the built-in table.
    #[arg(long, global = true)]
    table: Option<PathBuf>,

    /// Per-request provider timeout in seconds.
    #[arg(long, global = true)]
    timeout: Option<f64>,

    /// NumVerify API key (overrides NUMVERIFY_API_KEY).
    #[arg(long, global = true)]
    numverify_key: Option<String>,

    /// Abstract API key (overrides ABSTRACT_API_KEY).
    #[arg(long, global = true)]
    abstract_key: Option<String>,

    /// Reject digit strings that are not 10 digits or 1 + 10 digits
    /// instead of guessing an area code from the leading digits.
    #[arg(long, global = true)]
    strict: bool,

    /// Debug logging.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Look up labels for area codes.
    Lookup {
        #[arg(required = true)]
        codes: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Locate phone numbers through the provider chain.
    Resolve {
        #[arg(required = true)]
        numbers: Vec<String>,
        /// Only use the built-in table.
        #[arg(long)]
        offline: bool,
        #[arg(long)]
        json: bool,
    },
    /// Print the area code extracted from each number.
    Parse {
        #[arg(required = true)]
        numbers: Vec<String>,
    },
    /// Summarize a call and locate its primary number.
    Call {
        /// inbound, outbound, or anything else for unknown.
        #[arg(long, default_value = "unknown")]
        direction: String,
        #[arg(long)]
        agent: Option<String>,
        #[arg(long)]
        external: Option<String>,
        #[arg(long)]
        offline: bool,
    },
    /// List the area code table.
    Table {
        /// Only special-service codes.
        #[arg(long)]
        special: bool,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct LookupRow<'a> {
    code: &'a str,
    label: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<AreaCodeKind>,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let table = Arc::new(load_table(cli.table.as_ref()));
    let config = build_config(&cli);

    match &cli.command {
        Command::Lookup { codes, json } => {
            let rows: Vec<LookupRow> = codes
                .iter()
                .map(|code| match table.get(code) {
                    Some(e) => LookupRow { code, label: &e.label, kind: Some(e.kind) },
                    None => LookupRow { code, label: UNKNOWN_LOCATION, kind: None },
                })
                .collect();
            if *json {
                print_json(&rows);
            } else {
                for row in &rows {
                    let kind = match row.kind {
                        Some(AreaCodeKind::Special) => "  (special service)",
                        _ => "",
                    };
                    println!("{}  {}{}", row.code, row.label, kind);
                }
            }
        }

        Command::Resolve { numbers, offline, json } => {
            let mut resolver = PhoneResolver::from_config(&config, table);
            resolver.set_offline(*offline);
            let results: Vec<_> = numbers.iter().map(|n| resolver.resolve(n)).collect();
            if *json {
                print_json(&results);
            } else {
                for (number, loc) in numbers.iter().zip(&results) {
                    println!("{}  {}", phone::format_for_display(number), loc.display_line());
                }
            }
        }

        Command::Parse { numbers } => {
            for number in numbers {
                let note = if phone::is_plausible(number) { "" } else { "  (implausible)" };
                match phone::extract_area_code_with(number, config.parser) {
                    Ok(code) => {
                        println!("{}  {}  {}{}", number, code, table.lookup(code.as_str()), note)
                    }
                    Err(e) => println!("{}  -  {}{}", number, e, note),
                }
            }
        }

        Command::Call { direction, agent, external, offline } => {
            let call = PhoneCall {
                direction: CallDirection::parse(direction),
                agent_number: agent.clone(),
                external_number: external.clone(),
            };
            println!("{}", call.summary());

            let mut resolver = PhoneResolver::from_config(&config, table);
            resolver.set_offline(*offline);
            match resolver.resolve_call(&call) {
                Some(loc) => println!("{}", loc.display_line()),
                None => {
                    eprintln!("Error: call has no phone number to locate.");
                    std::process::exit(1);
                }
            }
        }

        Command::Table { special, json } => {
            let entries: Vec<_> = table
                .iter()
                .filter(|e| !*special || e.kind == AreaCodeKind::Special)
                .collect();
            if *json {
                print_json(&entries);
            } else {
                for e in &entries {
                    println!("{}  {}", e.code, e.label);
                }
                eprintln!("  {} entries", entries.len());
            }
        }
    }
}

fn load_table(path: Option<&PathBuf>) -> AreaCodeTable {
    let builtin = AreaCodeTable::builtin();
    match path {
        Some(path) => match AreaCodeTable::load_json(path) {
            Ok(extra) => builtin.with_overrides(extra),
            Err(e) => {
                eprintln!("Error: Cannot load area code table '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => builtin,
    }
}

fn build_config(cli: &Cli) -> ResolverConfig {
    let mut config = ResolverConfig::from_env()
        .with_numverify_key(cli.numverify_key.clone())
        .with_abstract_key(cli.abstract_key.clone());

    if let Some(secs) = cli.timeout {
        match timeout_from_secs(secs) {
            Some(timeout) => config = config.with_timeout(timeout),
            None => {
                eprintln!("Error: Invalid timeout '{}'. Use a positive number of seconds.", secs);
                std::process::exit(1);
            }
        }
    }
    if cli.strict {
        config = config.with_parser(ParserOptions::strict());
    }
    config
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
