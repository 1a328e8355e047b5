//! Subcommand handlers. Each writes its result to `out` and returns an error
//! for anything the user should see on stderr.

use std::any::Any;
use std::io::Write;

use anyhow::{anyhow, bail, Context, Result};
use clap::ArgMatches;
use parsable_json::{Converter, ConverterRegistry};
use serde_json::{json, Value};

use crate::output;

/// Output switches shared by every subcommand.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub json: bool,
    pub pretty: bool,
}

/// Route the parsed command line to its handler.
pub fn dispatch(
    matches: &ArgMatches,
    registry: &ConverterRegistry,
    options: Options,
    out: &mut dyn Write,
) -> Result<()> {
    match matches.subcommand() {
        Some(("kinds", _)) => kinds(registry, options, out),
        Some(("encode", sub)) => {
            let converter = lookup_kind(registry, sub)?;
            encode(converter, required(sub, "text")?, options, out)
        }
        Some(("decode", sub)) => {
            let converter = lookup_kind(registry, sub)?;
            let input = read_input(required(sub, "input")?)?;
            decode(converter, &input, out)
        }
        Some(("check", sub)) => {
            let converter = lookup_kind(registry, sub)?;
            let input = read_input(required(sub, "input")?)?;
            check(converter, &input, options, out)
        }
        Some((name, _)) => bail!("unknown command: {name}"),
        None => bail!("no command given"),
    }
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing argument <{id}>"))
}

fn lookup_kind<'r>(registry: &'r ConverterRegistry, matches: &ArgMatches) -> Result<&'r dyn Converter> {
    let kind = required(matches, "kind")?;
    registry
        .find_by_name(kind)
        .with_context(|| format!("run `pjson kinds` to list the {} known kinds", registry.names().len()))
}

fn read_input(arg: &str) -> Result<String> {
    if arg == "-" {
        std::io::read_to_string(std::io::stdin()).context("failed to read stdin")
    } else {
        Ok(arg.to_string())
    }
}

fn render(value: &Value, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

/// Formatted text of a decoded value, taken from its wire form.
fn format_value(converter: &dyn Converter, value: &dyn Any) -> Result<String> {
    match converter.to_value(value)? {
        Value::String(text) => Ok(text),
        other => Ok(other.to_string()),
    }
}

fn kinds(registry: &ConverterRegistry, options: Options, out: &mut dyn Write) -> Result<()> {
    let mut listing = serde_json::Map::new();
    for name in registry.names() {
        let type_name = registry.find_by_name(name)?.type_name();
        if options.json {
            listing.insert(name.to_string(), Value::String(type_name));
        } else {
            writeln!(out, "  {:<10} {}", name, type_name)?;
        }
    }
    if options.json {
        writeln!(out, "{}", render(&Value::Object(listing), options.pretty)?)?;
    }
    Ok(())
}

fn encode(converter: &dyn Converter, text: &str, options: Options, out: &mut dyn Write) -> Result<()> {
    let value = converter
        .from_value(Value::String(text.to_string()))?
        .ok_or_else(|| anyhow!("{} produced no value for {text:?}", converter.type_name()))?;
    let wire = converter.to_value(&*value)?;
    tracing::debug!(kind = %converter.type_name(), "encoded value");
    writeln!(out, "{}", render(&wire, options.pretty)?)?;
    Ok(())
}

fn decode(converter: &dyn Converter, input: &str, out: &mut dyn Write) -> Result<()> {
    let document: Value = serde_json::from_str(input.trim()).context("input is not valid JSON")?;
    match converter.from_value(document)? {
        Some(value) => writeln!(out, "{}", format_value(converter, &*value)?)?,
        None => writeln!(out, "null")?,
    }
    Ok(())
}

fn check(converter: &dyn Converter, input: &str, options: Options, out: &mut dyn Write) -> Result<()> {
    let document: Value = serde_json::from_str(input.trim()).context("input is not valid JSON")?;
    let items = match document {
        Value::Array(items) => items,
        single => vec![single],
    };
    let total = items.len();
    if total == 0 {
        output::warning("input array is empty, nothing to check");
    }
    let mut invalid = 0;
    let mut report = Vec::with_capacity(total);

    for (index, item) in items.into_iter().enumerate() {
        let entry = match converter.from_value(item) {
            Ok(Some(value)) => {
                let text = format_value(converter, &*value)?;
                json!({ "index": index, "valid": true, "value": text })
            }
            Ok(None) => json!({ "index": index, "valid": true, "value": null }),
            Err(e) => {
                invalid += 1;
                json!({ "index": index, "valid": false, "error": e.to_string() })
            }
        };
        if !options.json {
            match (&entry["valid"], &entry["value"]) {
                (Value::Bool(true), Value::String(text)) => writeln!(out, "ok   [{index}] {text}")?,
                (Value::Bool(true), _) => writeln!(out, "ok   [{index}] null")?,
                _ => writeln!(out, "FAIL [{index}] {}", entry["error"].as_str().unwrap_or_default())?,
            }
        }
        report.push(entry);
    }

    if options.json {
        writeln!(out, "{}", render(&Value::Array(report), options.pretty)?)?;
    }
    if invalid > 0 {
        bail!("{invalid} of {total} values are not valid {}", converter.type_name());
    }
    Ok(())
}
