//! Map command handler

use super::load_mapper;
use crate::cli::MapArgs;
use crate::config::{Config, FileFormat};
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use remodel_core::{Mapper, Record};
use serde_json::Value;
use std::io::{Read, Write};
use tracing::{debug, info, instrument};

/// Handle the map command
#[instrument(skip(config, input, out), fields(plan = %args.plan.display()))]
pub fn handle_map(
    args: MapArgs,
    config: &Config,
    input: &mut dyn Read,
    out: &mut dyn Write,
) -> Result<()> {
    let _timer = Timer::new("map_command");

    let mapper = load_mapper(&args.plan)?;
    let records = read_input(&args, input)?;

    let mapped = match records {
        Value::Array(items) => {
            info!(records = items.len(), "Mapping record list");
            let mapped = items
                .iter()
                .enumerate()
                .map(|(index, item)| map_one(&mapper, item, Some(index)))
                .collect::<Result<Vec<_>>>()?;
            Value::Array(mapped)
        }
        record => map_one(&mapper, &record, None)?,
    };

    if args.pretty || config.output.pretty {
        serde_json::to_writer_pretty(&mut *out, &mapped)?;
    } else {
        serde_json::to_writer(&mut *out, &mapped)?;
    }
    writeln!(out)?;

    Ok(())
}

fn map_one(mapper: &Mapper<Record>, record: &Value, index: Option<usize>) -> Result<Value> {
    if !record.is_object() {
        let position = index.map(|i| format!(" at index {}", i)).unwrap_or_default();
        return Err(Error::InvalidInput(format!("expected an object{}", position)));
    }
    Ok(Value::Object(mapper.map(record)?))
}

/// Read the input document from `--input` or the given reader
fn read_input(args: &MapArgs, stdin: &mut dyn Read) -> Result<Value> {
    let (content, format) = match &args.input {
        Some(path) => {
            if !path.exists() {
                return Err(Error::FileNotFound { path: path.clone() });
            }
            (std::fs::read_to_string(path)?, Some(FileFormat::from_path(path)))
        }
        None => {
            let mut content = String::new();
            stdin.read_to_string(&mut content)?;
            (content, None)
        }
    };
    debug!("Read {} bytes of input", content.len());

    match format {
        Some(FileFormat::Yaml) => serde_yaml::from_str(&content).map_err(|e| input_error(args, "YAML", e)),
        Some(_) => serde_json::from_str(&content).map_err(|e| input_error(args, "JSON", e)),
        // Stdin carries no extension; JSON first, YAML otherwise
        None => serde_json::from_str::<Value>(&content)
            .or_else(|_| serde_yaml::from_str(&content))
            .map_err(|e| input_error(args, "JSON or YAML", e)),
    }
}

fn input_error(args: &MapArgs, expected: &str, error: impl std::fmt::Display) -> Error {
    Error::InvalidFormat {
        path: args.input.clone().unwrap_or_else(|| "<stdin>".into()),
        expected: expected.to_string(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const PLAN: &str = r#"
entries:
  - group: name
    translation: { kind: rotation, to: title }
  - group: inner
    translation:
      kind: projection
      schema: { name: Inner, fields: [{ name: a }, { name: b }] }
"#;

    fn plan_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("plan.yaml");
        fs::write(&path, PLAN).unwrap();
        path
    }

    fn run(args: MapArgs, config: &Config, stdin: &str) -> Result<String> {
        let mut out = Vec::new();
        handle_map(args, config, &mut stdin.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_maps_single_record_from_stdin() {
        let dir = TempDir::new().unwrap();
        let args = MapArgs {
            plan: plan_file(&dir),
            input: None,
            pretty: false,
        };

        let output = run(args, &Config::default(), r#"{"name": "n", "inner": {"a": 1, "b": 2}}"#).unwrap();
        assert_eq!(output, "{\"title\":\"n\",\"inner_a\":1,\"inner_b\":2}\n");
    }

    #[test]
    fn test_maps_yaml_list_from_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("records.yaml");
        fs::write(
            &input,
            "- { name: x, inner: { a: 1, b: 2 } }\n- { name: y, inner: { a: 3, b: 4 } }\n",
        )
        .unwrap();
        let args = MapArgs {
            plan: plan_file(&dir),
            input: Some(input),
            pretty: false,
        };

        let output = run(args, &Config::default(), "").unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"title": "x", "inner_a": 1, "inner_b": 2},
                {"title": "y", "inner_a": 3, "inner_b": 4}
            ])
        );
    }

    #[test]
    fn test_config_enables_pretty_output() {
        let dir = TempDir::new().unwrap();
        let args = MapArgs {
            plan: plan_file(&dir),
            input: None,
            pretty: false,
        };
        let mut config = Config::default();
        config.output.pretty = true;

        let output = run(args, &config, r#"{"name": "n", "inner": {"a": 1, "b": 2}}"#).unwrap();
        assert!(output.contains("\n  \"title\": \"n\""));
    }

    #[test]
    fn test_missing_property_surfaces_as_core_error() {
        let dir = TempDir::new().unwrap();
        let args = MapArgs {
            plan: plan_file(&dir),
            input: None,
            pretty: false,
        };

        let err = run(args, &Config::default(), r#"{"name": "n"}"#).unwrap_err();
        match err {
            Error::Core(core) => assert_eq!(core.property(), Some("inner")),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_scalar_items_are_rejected() {
        let dir = TempDir::new().unwrap();
        let args = MapArgs {
            plan: plan_file(&dir),
            input: None,
            pretty: false,
        };

        let err = run(args, &Config::default(), "[1]").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(ref message) if message.contains("index 0")));
    }

    #[test]
    fn test_missing_input_file() {
        let dir = TempDir::new().unwrap();
        let args = MapArgs {
            plan: plan_file(&dir),
            input: Some(dir.path().join("absent.json")),
            pretty: false,
        };

        assert!(matches!(
            run(args, &Config::default(), ""),
            Err(Error::FileNotFound { .. })
        ));
    }
}
