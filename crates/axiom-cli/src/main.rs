use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use axiom_core::{AxiomConfig, AxiomError};
use axiom_guards::ParamEnvelope;
use axiom_tools::{tool_names, ToolRunner};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde_json::{json, Map, Value};
use tracing::{debug, Level};

fn param_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .global(true)
        .value_name("NUM")
        .value_parser(value_parser!(f64))
        .allow_negative_numbers(true)
        .help(help)
}

fn cli() -> Command {
    Command::new("axiom")
        .about("Evaluate and simulate the Universal Axiom intelligence model")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("PATH")
                .help("JSON file with model parameters; flags override it"),
        )
        .arg(
            Arg::new("envelope")
                .long("envelope")
                .global(true)
                .value_name("PATH")
                .help("JSON file overriding input validation bounds"),
        )
        .arg(param_arg("impulses", "A: fundamental drives"))
        .arg(param_arg("elements", "B: core components"))
        .arg(param_arg("pressure", "C: constraints and forces"))
        .arg(param_arg("subjectivity", "X: subjectivity level in [0, 1]"))
        .arg(param_arg("purpose", "Y: purpose strength"))
        .arg(param_arg("time", "Z: temporal factor"))
        .arg(
            Arg::new("n")
                .long("n")
                .global(true)
                .value_name("INT")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .help("Evolution index"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON on stderr"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity"),
        )
        .subcommand(Command::new("compute").about("Print the current state"))
        .subcommand(
            Command::new("evolve")
                .about("Simulate repeated evolution")
                .arg(steps_arg("10"))
                .arg(
                    Arg::new("delta-time")
                        .long("delta-time")
                        .value_parser(value_parser!(f64))
                        .default_value("1.0"),
                ),
        )
        .subcommand(
            Command::new("contradiction")
                .about("Simulate a pressure spike and its resolution")
                .arg(steps_arg("5"))
                .arg(
                    Arg::new("initial-pressure")
                        .long("initial-pressure")
                        .value_parser(value_parser!(f64))
                        .allow_negative_numbers(true)
                        .default_value("2.0"),
                ),
        )
        .subcommand(Command::new("coherence").about("Print the coherence metric"))
        .subcommand(
            Command::new("predict")
                .about("Predict a trajectory under environmental drift")
                .arg(steps_arg("10"))
                .arg(
                    Arg::new("pressure-per-step")
                        .long("pressure-per-step")
                        .value_parser(value_parser!(f64))
                        .allow_negative_numbers(true),
                )
                .arg(
                    Arg::new("subjectivity-per-step")
                        .long("subjectivity-per-step")
                        .value_parser(value_parser!(f64))
                        .allow_negative_numbers(true),
                )
                .arg(
                    Arg::new("purpose-multiplier-per-step")
                        .long("purpose-multiplier-per-step")
                        .value_parser(value_parser!(f64)),
                ),
        )
        .subcommand(
            Command::new("tool")
                .about("Run a named tool with JSON arguments")
                .arg(Arg::new("name").required(true).value_name("NAME"))
                .arg(
                    Arg::new("args")
                        .long("args")
                        .value_name("JSON")
                        .default_value("{}"),
                ),
        )
        .subcommand(Command::new("tools").about("List tool names"))
}

fn steps_arg(default: &'static str) -> Arg {
    Arg::new("steps")
        .long("steps")
        .value_parser(value_parser!(i64))
        .allow_negative_numbers(true)
        .default_value(default)
}

fn init_logging(matches: &ArgMatches) {
    let level = match matches.get_count("verbose") {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level);
    if matches.get_flag("log-json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_file(path: &str) -> Result<String> {
    fs::read_to_string(Path::new(path)).with_context(|| format!("reading {path}"))
}

/// Config file, then per-parameter flags on top.
fn load_config(matches: &ArgMatches) -> Result<AxiomConfig> {
    let base = match matches.get_one::<String>("config") {
        Some(path) => AxiomConfig::from_json(&read_file(path)?)?,
        None => AxiomConfig::default(),
    };

    let flag = |name: &str| matches.get_one::<f64>(name).copied();
    let overrides = AxiomConfig {
        impulses: flag("impulses"),
        elements: flag("elements"),
        pressure: flag("pressure"),
        subjectivity: flag("subjectivity"),
        purpose: flag("purpose"),
        time: flag("time"),
        n: matches.get_one::<i64>("n").copied(),
    };
    debug!(?base, ?overrides, "loaded config");
    Ok(base.merge(&overrides))
}

fn load_envelope(matches: &ArgMatches) -> Result<ParamEnvelope> {
    match matches.get_one::<String>("envelope") {
        Some(path) => Ok(ParamEnvelope::from_json(&read_file(path)?)?),
        None => Ok(ParamEnvelope::default()),
    }
}

/// Flat tool arguments for the configured model, without unset fields.
fn model_args(config: &AxiomConfig) -> Result<Map<String, Value>> {
    let Value::Object(mut args) = serde_json::to_value(config)? else {
        return Ok(Map::new());
    };
    args.retain(|_, value| !value.is_null());
    Ok(args)
}

/// Global flags are read from the subcommand's matches, which see them
/// wherever they were given on the command line.
fn run(command: &str, sub: &ArgMatches) -> Result<Value> {
    if command == "tools" {
        return Ok(json!(tool_names()));
    }

    let runner = ToolRunner::new(load_envelope(sub)?);
    let mut args = model_args(&load_config(sub)?)?;
    let steps = || sub.get_one::<i64>("steps").copied();

    let tool = match command {
        "compute" => "compute_intelligence",
        "coherence" => "get_coherence_metric",
        "evolve" => {
            args.insert("steps".into(), json!(steps()));
            args.insert("delta_time".into(), json!(sub.get_one::<f64>("delta-time")));
            "simulate_evolution"
        }
        "contradiction" => {
            args.insert("resolution_steps".into(), json!(steps()));
            args.insert(
                "initial_pressure".into(),
                json!(sub.get_one::<f64>("initial-pressure")),
            );
            "simulate_contradiction_resolution"
        }
        "predict" => {
            args.insert("future_steps".into(), json!(steps()));
            args.insert(
                "environmental_changes".into(),
                json!({
                    "pressure_per_step": sub.get_one::<f64>("pressure-per-step"),
                    "subjectivity_per_step": sub.get_one::<f64>("subjectivity-per-step"),
                    "purpose_multiplier_per_step":
                        sub.get_one::<f64>("purpose-multiplier-per-step"),
                }),
            );
            "predict_trajectory"
        }
        "tool" => {
            let name = sub
                .get_one::<String>("name")
                .map(String::as_str)
                .unwrap_or_default();
            let raw = sub.get_one::<String>("args").map(String::as_str).unwrap_or("{}");
            let mut tool_args: Value =
                serde_json::from_str(raw).context("parsing --args as JSON")?;
            // Model flags fill in whatever the JSON leaves out.
            if let Value::Object(object) = &mut tool_args {
                for (key, value) in args {
                    object.entry(key).or_insert(value);
                }
            }
            return Ok(runner.execute(name, &tool_args)?);
        }
        other => anyhow::bail!("unhandled command {other}"),
    };

    Ok(runner.execute(tool, &Value::Object(args))?)
}

fn main() {
    let matches = cli().get_matches();
    let Some((command, sub)) = matches.subcommand() else {
        return;
    };
    init_logging(sub);

    match run(command, sub) {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("axiom: {e}");
                std::process::exit(1);
            }
        },
        Err(err) => {
            match err.downcast_ref::<AxiomError>() {
                Some(AxiomError::Validation(errors)) => {
                    eprintln!("axiom: validation FAILED");
                    for e in errors {
                        eprintln!("- {e}");
                    }
                }
                _ => eprintln!("axiom: {err:#}"),
            }
            std::process::exit(1);
        }
    }
}
