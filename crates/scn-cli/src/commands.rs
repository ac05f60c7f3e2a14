use anyhow::Context;
use colored::Colorize;
use scn_document::SpecDocument;
use scn_engine::{Scenario, ScenarioConfig};
use scn_handlers::{EntityHandler, HandlerRegistry};
use scn_types::ObjectRef;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Build(args) => cmd_build(args, &cli.format),
        Command::Check(args) => cmd_check(args, &cli.format),
    }
}

fn cmd_build(args: BuildArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let scenario = load_scenario(&args)?;
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&to_json(&scenario)?)?);
        }
        OutputFormat::Text => {
            for type_name in scenario.type_names() {
                let collection = scenario.store().collection(&type_name)?;
                println!("{} ({})", type_name.bold(), collection.len());
                for (id, object) in collection.iter() {
                    println!("  {}{} {}", type_name.cyan(), format!("#{id}").yellow(), render(object));
                }
            }
        }
    }
    Ok(())
}

fn cmd_check(args: BuildArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let scenario = load_scenario(&args)?;
    match format {
        OutputFormat::Json => {
            let counts: serde_json::Map<String, serde_json::Value> = scenario
                .type_names()
                .into_iter()
                .map(|t| {
                    let count = scenario.ids(&t).map(|ids| ids.len()).unwrap_or(0);
                    (t, serde_json::Value::from(count))
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&counts)?);
        }
        OutputFormat::Text => {
            println!(
                "{} {} objects across {} types",
                "✓".green().bold(),
                scenario.len().to_string().bold(),
                scenario.type_names().len()
            );
        }
    }
    Ok(())
}

fn load_scenario(args: &BuildArgs) -> anyhow::Result<Scenario> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str::<ScenarioConfig>(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ScenarioConfig::default(),
    };
    if !args.priority.is_empty() {
        config.load_priority = args.priority.clone();
    }

    let document = SpecDocument::from_path(&args.file)?;
    let handlers = entity_handlers(&document, &config);
    Scenario::builder(handlers)
        .config(config)
        .build_document(document)
        .with_context(|| format!("building scenario from {}", args.file.display()))
}

/// One generic entity handler per declared type.
///
/// Keys are singularised through the configured irregular plurals first,
/// then by stripping the plural suffix.
fn entity_handlers(document: &SpecDocument, config: &ScenarioConfig) -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    for key in document.type_keys() {
        let type_name = config.singular_of(key);
        let mut handler = EntityHandler::new(type_name);
        if key != type_name {
            handler = handler.with_plural(key);
        }
        registry.register(handler);
    }
    registry
}

fn render(object: &ObjectRef) -> String {
    let fields: Vec<String> = object
        .attr_names()
        .into_iter()
        .filter_map(|name| {
            let value = object.attr(&name)?;
            Some(format!("{name}: {value}"))
        })
        .collect();
    format!("{{{}}}", fields.join(", "))
}

fn to_json(scenario: &Scenario) -> anyhow::Result<serde_json::Value> {
    let mut out = serde_json::Map::new();
    for type_name in scenario.type_names() {
        let collection = scenario.store().collection(&type_name)?;
        let objects = collection
            .iter()
            .map(|(id, object)| {
                let mut entry = serde_json::Map::new();
                entry.insert("id".into(), serde_json::Value::from(id.get()));
                for name in object.attr_names() {
                    if let Some(value) = object.attr(&name) {
                        entry.insert(name, value.to_json());
                    }
                }
                serde_json::Value::Object(entry)
            })
            .collect();
        out.insert(type_name, serde_json::Value::Array(objects));
    }
    Ok(serde_json::Value::Object(out))
}
