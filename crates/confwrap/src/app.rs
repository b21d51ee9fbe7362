use clap::{Arg, ArgAction, ArgGroup, Command};
use confwrap_core::TextEncoding;

fn parse_encoding(label: &str) -> Result<TextEncoding, String> {
    TextEncoding::from_label(label).ok_or_else(|| format!("unknown text encoding '{}'", label))
}

pub fn build_cli() -> Command {
    Command::new("confwrap")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Read and edit configuration stores through one typed interface")
        .long_about("confwrap reads INI files, JSON and TOML documents, directory hives and the process environment with the same commands. Pick exactly one source, then list keys, read a value converted to a type, or (for hives) write and delete values.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("ini")
                .long("ini")
                .value_name("PATH")
                .help("Read an INI file")
        )
        .arg(
            Arg::new("json")
                .long("json")
                .value_name("PATH")
                .help("Read a JSON document")
        )
        .arg(
            Arg::new("toml")
                .long("toml")
                .value_name("PATH")
                .help("Read a TOML document")
        )
        .arg(
            Arg::new("env")
                .long("env")
                .value_name("PREFIX")
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("")
                .help("Read environment variables, optionally only those starting with PREFIX (--env=PREFIX)")
        )
        .arg(
            Arg::new("hive")
                .long("hive")
                .value_name("DIR")
                .help("Read or write a directory laid out as a hive (HKEY_CURRENT_USER/...)")
        )
        .arg(
            Arg::new("encoding")
                .long("encoding")
                .value_name("LABEL")
                .value_parser(parse_encoding)
                .conflicts_with_all(["env", "hive"])
                .help("Text encoding of the INI, JSON or TOML file (e.g. utf-8, latin1); defaults to UTF-8")
        )
        .group(
            ArgGroup::new("source")
                .args(["ini", "json", "toml", "env", "hive"])
                .required(true)
                .multiple(false),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("keys")
                .about("List keys")
                .arg(
                    Arg::new("prefix")
                        .long("prefix")
                        .short('p')
                        .help("Only keys under this prefix (required for hives)")
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("get")
                .about("Read a value")
                .arg(
                    Arg::new("key")
                        .help("Key to read")
                        .required(true)
                        .index(1)
                )
                .arg(
                    Arg::new("type")
                        .long("type")
                        .short('t')
                        .help("Type to convert the value to")
                        .value_parser(["string", "int", "float", "bool"])
                        .default_value("string")
                )
                .arg(
                    Arg::new("default")
                        .long("default")
                        .short('d')
                        .allow_hyphen_values(true)
                        .help("Value to print when the key is missing or does not convert")
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Fail instead of falling back to --default when the value does not convert")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("separators")
                        .long("separators")
                        .short('s')
                        .help("Read a list, splitting on any of these characters")
                )
        )
        .subcommand(
            Command::new("set")
                .about("Write a value (hives only)")
                .arg(
                    Arg::new("key")
                        .help("Key to write")
                        .required(true)
                        .index(1)
                )
                .arg(
                    Arg::new("value")
                        .help("Value to store")
                        .required(true)
                        .allow_hyphen_values(true)
                        .index(2)
                )
                .arg(
                    Arg::new("create")
                        .long("create")
                        .help("Create missing subkeys on the way")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a value and the subkey of the same name (hives only)")
                .arg(
                    Arg::new("key")
                        .help("Key to delete")
                        .required(true)
                        .index(1)
                )
        )
}
