use clap::builder::PossibleValuesParser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use menugen::{ConfigKey, FetchStrategy};
use strum::VariantNames;

pub const OUTPUT_FORMATS: &[&str] = &["html", "json"];
pub const LOG_FORMATS: &[&str] = &["text", "json"];
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

fn arg_config_file() -> Arg {
    Arg::new(ConfigKey::ConfigFile.to_string())
        .short('c')
        .long(ConfigKey::ConfigFile.to_string())
        .env("MENUGEN_CONFIG_FILE")
        .num_args(1)
        .help("Path to a configuration file")
        .global(true)
}

fn arg_backend_url() -> Arg {
    Arg::new(ConfigKey::BackendUrl.to_string())
        .short('u')
        .long(ConfigKey::BackendUrl.to_string())
        .env("MENUGEN_BACKEND_URL")
        .num_args(1)
        .help("Base URL of the generator backend [default: http://localhost:8000]")
        .global(true)
}

fn arg_placeholder() -> Arg {
    Arg::new(ConfigKey::Placeholder.to_string())
        .long(ConfigKey::Placeholder.to_string())
        .env("MENUGEN_PLACEHOLDER")
        .num_args(1)
        .help("Selector value that means no cuisine was chosen")
        .global(true)
}

fn arg_fetch_mode() -> Arg {
    Arg::new(ConfigKey::FetchMode.to_string())
        .long(ConfigKey::FetchMode.to_string())
        .env("MENUGEN_FETCH_MODE")
        .num_args(1)
        .value_parser(PossibleValuesParser::new(FetchStrategy::VARIANTS))
        .help("How the recipe and playlist requests are issued [default: sequential]")
        .global(true)
}

fn arg_request_timeout() -> Arg {
    Arg::new(ConfigKey::RequestTimeout.to_string())
        .long(ConfigKey::RequestTimeout.to_string())
        .env("MENUGEN_REQUEST_TIMEOUT")
        .num_args(1)
        .help("Per-request timeout in milliseconds, 0 waits indefinitely")
        .global(true)
}

pub fn build() -> Command {
    Command::new("menugen")
        .about("Generates a cuisine-themed menu and playlist from the generator backend.")
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(true)
        .arg(arg_config_file())
        .arg(arg_backend_url())
        .arg(arg_placeholder())
        .arg(arg_fetch_mode())
        .arg(arg_request_timeout())
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .num_args(1)
                .default_value("info")
                .value_parser(PossibleValuesParser::new(LOG_LEVELS))
                .help("Log level written to stderr")
                .global(true),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .num_args(1)
                .default_value("text")
                .value_parser(PossibleValuesParser::new(LOG_FORMATS))
                .help("Log line format")
                .global(true),
        )
        .subcommand(
            Command::new("generate")
                .about("Runs one generation and prints the resulting page.")
                .arg(
                    Arg::new("cuisine")
                        .long("cuisine")
                        .required(true)
                        .num_args(1)
                        .help("Cuisine to select before triggering the generator"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .num_args(1)
                        .default_value("html")
                        .value_parser(PossibleValuesParser::new(OUTPUT_FORMATS))
                        .help("Format of the rendered page"),
                ),
        )
        .subcommand(
            Command::new("watch")
                .about("Reads one cuisine per line from stdin and regenerates for each.")
                .arg(
                    Arg::new("quiet")
                        .short('q')
                        .long("quiet")
                        .action(ArgAction::SetTrue)
                        .help("Only print failures"),
                ),
        )
        .subcommand(Command::new("config").about("Prints the default configuration file."))
}
