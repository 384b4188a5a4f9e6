use clap::{Parser, Subcommand};
use colored::Colorize;
use in_subnet::config::{load_config, CONFIG_ENV};
use in_subnet::output::{format_classify_row, format_verdict};
use in_subnet::{classify_parsed, parse_address, SubnetChecker};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "in-subnet", version, about = "Check IP addresses against CIDR subnets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print true if ADDRESS is in any of the subnets (exit 0), else false (exit 1)
    Check {
        address: String,
        /// Subnets in CIDR notation; required unless --list is given
        #[arg(required_unless_present = "list")]
        subnets: Vec<String>,
        /// Also check against this named list from the config file
        #[arg(long)]
        list: Option<String>,
        /// Allow-list config file
        #[arg(long, env = CONFIG_ENV)]
        config: Option<PathBuf>,
    },
    /// Print the well-known categories of each address
    Classify {
        #[arg(required = true)]
        addresses: Vec<String>,
    },
}

fn main() -> ExitCode {
    // Keep main() thin, argument handling is tested below through Cli
    dotenv::dotenv().ok();
    init_logging();
    log::info!("#Start main()");

    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            log::error!("{e}");
            eprintln!("{} {e}", "error:".on_red());
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool, Box<dyn Error>> {
    match cli.command {
        Command::Check {
            address,
            subnets,
            list,
            config,
        } => {
            let address = parse_address(&address)?;
            let mut checker = SubnetChecker::new(&subnets)?;
            if let Some(name) = list {
                let path = config.ok_or_else(|| {
                    format!("--list {name} needs --config or {CONFIG_ENV} to be set")
                })?;
                let named = load_config(&path)?.checker(&name)?;
                checker.extend(named.subnets().iter().copied());
            }
            log::debug!("Checking {address} against {} subnets", checker.len());

            let member = checker.contains_parsed(&address);
            println!("{}", format_verdict(member));
            Ok(member)
        }
        Command::Classify { addresses } => {
            for text in &addresses {
                let address = parse_address(text)?;
                let categories = classify_parsed(&address);
                println!("{}", format_classify_row(&address, &categories));
            }
            Ok(true)
        }
    }
}

/// Load `log4rs.yml`, falling back to warnings on stderr.
fn init_logging() {
    if log4rs::init_file("log4rs.yml", Default::default()).is_ok() {
        return;
    }
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {t} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn));
    match config {
        Ok(config) => {
            if let Err(e) = log4rs::init_config(config) {
                eprintln!("Error initializing log4rs: {e}");
            }
        }
        Err(e) => eprintln!("Error building log4rs config: {e}"),
    }
}
