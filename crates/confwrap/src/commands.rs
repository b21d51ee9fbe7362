use std::fmt::Display;
use std::path::PathBuf;

use clap::ArgMatches;
use tracing::{error, info};

use confwrap_core::coercion::{self, Coerce};
use confwrap_core::{
    CoercionPolicy, EnvironmentOptions, IniOptions, ReadableStore, Resolver, StoreSource,
    TextEncoding,
};

/// Builds the source named by the single source flag.
fn source_from_matches(matches: &ArgMatches) -> Result<StoreSource, Box<dyn std::error::Error>> {
    let path = |name: &str| matches.get_one::<String>(name).map(PathBuf::from);
    let encoding = matches
        .get_one::<TextEncoding>("encoding")
        .copied()
        .unwrap_or_default();

    if let Some(path) = path("ini") {
        return Ok(StoreSource::Ini {
            path,
            options: IniOptions {
                encoding,
                ..IniOptions::default()
            },
        });
    }
    if let Some(path) = path("json") {
        return Ok(StoreSource::Json { path, encoding });
    }
    if let Some(path) = path("toml") {
        return Ok(StoreSource::Toml { path, encoding });
    }
    if let Some(prefix) = matches.get_one::<String>("env") {
        return Ok(StoreSource::Environment {
            options: EnvironmentOptions::with_prefix(prefix.as_str()),
        });
    }
    if let Some(path) = path("hive") {
        return Ok(StoreSource::Hive { path });
    }

    Err("One of --ini, --json, --toml, --env or --hive is required".into())
}

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let source = source_from_matches(matches)?;

    info!(event = "cli.command_started", source = source.kind());

    match matches.subcommand() {
        Some(("keys", sub_matches)) => handle_keys_command(&source, sub_matches),
        Some(("get", sub_matches)) => handle_get_command(&source, sub_matches),
        Some(("set", sub_matches)) => handle_set_command(&source, sub_matches),
        Some(("delete", sub_matches)) => handle_delete_command(&source, sub_matches),
        _ => {
            error!(event = "cli.unknown_command");
            Err("Unknown command".into())
        }
    }
}

fn handle_keys_command(
    source: &StoreSource,
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let prefix = matches.get_one::<String>("prefix");

    let resolver = source.bind()?;
    let keys = match prefix {
        Some(prefix) => resolver.all_keys_with_prefix(prefix)?,
        None => resolver.all_keys()?,
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&keys)?);
    } else {
        for key in &keys {
            println!("{}", key);
        }
    }

    info!(event = "cli.keys_completed", count = keys.len());
    resolver.close();
    Ok(())
}

fn handle_get_command(
    source: &StoreSource,
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let key = matches
        .get_one::<String>("key")
        .ok_or("Key argument is required")?;
    let value_type = matches
        .get_one::<String>("type")
        .map(String::as_str)
        .unwrap_or("string");
    let request = GetRequest {
        key,
        default: matches.get_one::<String>("default").map(String::as_str),
        policy: CoercionPolicy::from(matches.get_flag("strict")),
        separators: matches
            .get_one::<String>("separators")
            .map(|separators| separators.chars().collect()),
    };

    let resolver = source.bind()?;
    let lines = match value_type {
        "int" => request.read::<i64>(&resolver)?,
        "float" => request.read::<f64>(&resolver)?,
        "bool" => request.read::<bool>(&resolver)?,
        _ => request.read::<String>(&resolver)?,
    };

    for line in &lines {
        println!("{}", line);
    }

    info!(event = "cli.get_completed", key = key.as_str(), value_type = value_type);
    resolver.close();
    Ok(())
}

/// Options of one `get` invocation.
struct GetRequest<'a> {
    key: &'a str,
    default: Option<&'a str>,
    policy: CoercionPolicy,
    /// Present for list reads.
    separators: Option<Vec<char>>,
}

impl GetRequest<'_> {
    /// Reads the value as `T` and renders it, one line per list element.
    fn read<T: Coerce + Display>(
        &self,
        resolver: &Resolver<Box<dyn ReadableStore>>,
    ) -> Result<Vec<String>, Box<dyn std::error::Error>> {
        let values: Vec<T> = match (&self.separators, self.default) {
            (Some(separators), Some(default)) => {
                let default = coercion::convert_list(&default.into(), separators)?;
                resolver.get_list_or_with(self.key, default, separators, self.policy)?
            }
            (Some(separators), None) => resolver.get_list(self.key, separators)?,
            (None, Some(default)) => {
                let default = coercion::convert(&default.into())?;
                vec![resolver.get_or_with(self.key, default, self.policy)?]
            }
            (None, None) => vec![resolver.get(self.key)?],
        };

        Ok(values.iter().map(ToString::to_string).collect())
    }
}

fn handle_set_command(
    source: &StoreSource,
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let key = matches
        .get_one::<String>("key")
        .ok_or("Key argument is required")?;
    let value = matches
        .get_one::<String>("value")
        .ok_or("Value argument is required")?;
    let create = matches.get_flag("create");

    let mut resolver = source.bind_writable()?;
    resolver.set_with(key, value, create)?;
    resolver.close();

    println!("Set '{}'", key);
    info!(event = "cli.set_completed", key = key.as_str(), create = create);
    Ok(())
}

fn handle_delete_command(
    source: &StoreSource,
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let key = matches
        .get_one::<String>("key")
        .ok_or("Key argument is required")?;

    let mut resolver = source.bind_writable()?;
    resolver.delete(key)?;
    resolver.close();

    println!("Deleted '{}'", key);
    info!(event = "cli.delete_completed", key = key.as_str());
    Ok(())
}
