use clap::{Arg, ArgAction, ArgMatches, Command};

/// Creates the root `pjson` command with its global flags and subcommands.
///
/// `--verbose` / `-v` turns on debug logging. When combined with `--json`,
/// verbose output is suppressed to keep JSON clean.
pub fn create_root_command() -> Command {
    Command::new("pjson")
        .about("Read and write values in their JSON string form")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable verbose output"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Output reports in JSON format"),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Pretty-print JSON output"),
        )
        .subcommand(Command::new("kinds").about("List the value kinds pjson understands"))
        .subcommand(
            Command::new("encode")
                .aliases(["e", "enc"])
                .about("Parse text as a kind and print its JSON form")
                .arg(kind_arg())
                .arg(
                    Arg::new("text")
                        .required(true)
                        .allow_hyphen_values(true)
                        .help("Text to parse, e.g. 10.0.0.1"),
                ),
        )
        .subcommand(
            Command::new("decode")
                .aliases(["d", "dec"])
                .about("Read a JSON string or null and print the parsed value")
                .arg(kind_arg())
                .arg(json_input_arg()),
        )
        .subcommand(
            Command::new("check")
                .aliases(["c", "chk"])
                .about("Validate a JSON array (or single value) against a kind")
                .arg(kind_arg())
                .arg(json_input_arg()),
        )
}

fn kind_arg() -> Arg {
    Arg::new("kind")
        .required(true)
        .help("Value kind, see `pjson kinds`")
}

fn json_input_arg() -> Arg {
    Arg::new("input")
        .required(true)
        .allow_hyphen_values(true)
        .help("JSON document, or - to read stdin")
}

/// Returns whether verbose mode is active based on parsed matches.
///
/// Verbose is suppressed when `--json` is also set, to keep JSON output clean.
pub fn is_verbose(matches: &ArgMatches) -> bool {
    let verbose = matches.get_flag("verbose");
    let json = matches.get_flag("json");
    verbose && !json
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subcommand_required() {
        let cmd = create_root_command();
        assert!(cmd.try_get_matches_from(["pjson"]).is_err());
    }

    #[test]
    fn test_encode_args() {
        let matches = create_root_command()
            .try_get_matches_from(["pjson", "encode", "i32", "42"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "encode");
        assert_eq!(sub.get_one::<String>("kind").unwrap(), "i32");
        assert_eq!(sub.get_one::<String>("text").unwrap(), "42");
    }

    #[test]
    fn test_encode_negative_number() {
        let matches = create_root_command()
            .try_get_matches_from(["pjson", "encode", "i64", "-5"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(sub.get_one::<String>("text").unwrap(), "-5");
    }

    #[test]
    fn test_decode_accepts_stdin_marker() {
        let matches = create_root_command()
            .try_get_matches_from(["pjson", "decode", "guid", "-"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(sub.get_one::<String>("input").unwrap(), "-");
    }

    #[test]
    fn test_check_alias() {
        let matches = create_root_command()
            .try_get_matches_from(["pjson", "chk", "ip", "[\"::1\"]"])
            .unwrap();
        assert_eq!(matches.subcommand_name(), Some("check"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let matches = create_root_command()
            .try_get_matches_from(["pjson", "kinds", "--json", "--pretty"])
            .unwrap();
        assert!(matches.get_flag("json"));
        assert!(matches.get_flag("pretty"));
    }

    #[test]
    fn test_verbose_suppressed_with_json() {
        let matches = create_root_command()
            .try_get_matches_from(["pjson", "-v", "--json", "kinds"])
            .unwrap();
        assert!(!is_verbose(&matches));
    }

    #[test]
    fn test_short_verbose_flag() {
        let matches = create_root_command()
            .try_get_matches_from(["pjson", "-v", "kinds"])
            .unwrap();
        assert!(is_verbose(&matches));
    }
}
