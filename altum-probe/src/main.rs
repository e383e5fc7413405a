use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use tracing_subscriber::{EnvFilter, fmt};

use altum_probe::config::{DEFAULT_POSTCODE, DEFAULT_STREET_FILTER};
use altum_probe::{ApiProbe, ColorMode, ProbeConfig};

fn build_cli() -> Command {
    Command::new("altum-probe")
        .about("Send one autosearch request to the Altum API and dump everything it returns")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("endpoint")
                .long("endpoint")
                .value_name("URL")
                .env("ALTUM_ENDPOINT")
                .help("Full autosearch endpoint URL (default: https://api.altum.ai/autosearch)"),
        )
        .arg(
            Arg::new("api-key")
                .long("api-key")
                .value_name("KEY")
                .env("ALTUM_API_KEY")
                .hide_env_values(true)
                .help("Altum API key sent as x-api-key"),
        )
        .arg(
            Arg::new("sandbox")
                .long("sandbox")
                .env("USE_SANDBOX")
                .action(ArgAction::SetTrue)
                .help("Use the sandbox endpoint and SANDBOX_API_KEY"),
        )
        .arg(
            Arg::new("sandbox-api-key")
                .long("sandbox-api-key")
                .value_name("KEY")
                .env("SANDBOX_API_KEY")
                .hide_env_values(true)
                .help("API key used with --sandbox"),
        )
        .arg(
            Arg::new("postcode")
                .long("postcode")
                .short('p')
                .value_name("POSTCODE")
                .env("ALTUM_POSTCODE")
                .default_value(DEFAULT_POSTCODE)
                .help("Postcode to search; spaces and case are normalized"),
        )
        .arg(
            Arg::new("sort")
                .long("sort")
                .value_name("FIELD")
                .default_value("datum")
                .help("Sort key passed to the API"),
        )
        .arg(
            Arg::new("limit")
                .long("limit")
                .short('n')
                .value_name("N")
                .value_parser(value_parser!(u32))
                .default_value("10")
                .help("Maximum number of listings to request"),
        )
        .arg(
            Arg::new("street")
                .long("street")
                .short('s')
                .value_name("TEXT")
                .default_value(DEFAULT_STREET_FILTER)
                .help("Case-insensitive street name fragment to look for"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECS")
                .value_parser(value_parser!(u64))
                .default_value("30")
                .help("Request timeout in seconds"),
        )
        .arg(
            Arg::new("color")
                .long("color")
                .value_name("WHEN")
                .value_parser(["auto", "always", "never"])
                .default_value("auto")
                .help("Control color output"),
        )
        .after_help(
            "EXAMPLES:\n\
             \x20 ALTUM_API_KEY=... altum-probe\n\
             \x20 altum-probe --postcode \"1016 GV\" --street keizersgracht --limit 25\n\
             \x20 USE_SANDBOX=true SANDBOX_API_KEY=... altum-probe\n\n\
             Logging goes to stderr and is controlled with RUST_LOG (e.g. RUST_LOG=debug).",
        )
}

fn config_from_matches(matches: &ArgMatches) -> ProbeConfig {
    let mut config = ProbeConfig::new();

    let sandbox = matches.get_flag("sandbox");
    if sandbox {
        config = config.with_sandbox();
    }
    if let Some(endpoint) = matches.get_one::<String>("endpoint") {
        config = config.with_endpoint(endpoint);
    }

    let key_arg = if sandbox { "sandbox-api-key" } else { "api-key" };
    if let Some(api_key) = matches.get_one::<String>(key_arg) {
        config = config.with_api_key(api_key);
    }

    if let Some(postcode) = matches.get_one::<String>("postcode") {
        config = config.with_postcode(postcode);
    }
    if let Some(sort) = matches.get_one::<String>("sort") {
        config = config.with_sort(sort);
    }
    if let Some(limit) = matches.get_one::<u32>("limit") {
        config = config.with_limit(*limit);
    }
    if let Some(street) = matches.get_one::<String>("street") {
        config = config.with_street_filter(street);
    }
    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        config = config.with_timeout(*timeout);
    }
    if let Some(color) = matches.get_one::<String>("color")
        && let Ok(mode) = color.parse::<ColorMode>()
    {
        config = config.with_color_mode(mode);
    }

    config
}

fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();
    let probe = ApiProbe::new(config_from_matches(&matches));

    // Always exits 0: every outcome of the run is reported on stdout
    let mut stdout = std::io::stdout().lock();
    probe.run_blocking(&mut stdout);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ProbeConfig {
        let mut argv = vec!["altum-probe"];
        argv.extend_from_slice(args);
        config_from_matches(&build_cli().try_get_matches_from(argv).unwrap())
    }

    #[test]
    fn test_cli_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = parse(&[
            "--postcode",
            "1016 gv",
            "--street",
            "Keizersgracht",
            "--limit",
            "25",
            "--timeout",
            "5",
            "--color",
            "never",
            "--api-key",
            "flag-key",
        ]);

        assert_eq!(config.search_request().search, "1016GV");
        assert_eq!(config.street_filter, "Keizersgracht");
        assert_eq!(config.limit, 25);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.color_mode, ColorMode::Never);
        assert_eq!(config.api_key.as_deref(), Some("flag-key"));
    }

    #[test]
    fn test_sandbox_uses_sandbox_key_and_endpoint() {
        let config = parse(&[
            "--sandbox",
            "--api-key",
            "production",
            "--sandbox-api-key",
            "sandbox",
        ]);

        assert_eq!(config.endpoint, "https://api.altum.ai/sandbox/autosearch");
        assert_eq!(config.api_key.as_deref(), Some("sandbox"));
    }

    #[test]
    fn test_explicit_endpoint_wins_over_sandbox() {
        let config = parse(&["--sandbox", "--endpoint", "http://localhost:8080/autosearch"]);
        assert_eq!(config.endpoint, "http://localhost:8080/autosearch");
    }

    #[test]
    fn test_timeout_default_matches_config() {
        let matches = build_cli().try_get_matches_from(["altum-probe"]).unwrap();
        assert_eq!(
            matches.get_one::<u64>("timeout").copied(),
            Some(altum_probe::config::DEFAULT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_rejects_non_numeric_limit() {
        assert!(
            build_cli()
                .try_get_matches_from(["altum-probe", "--limit", "ten"])
                .is_err()
        );
    }
}
