//! Convert, create and inspect DublinCore catalogs.
//!
//! Usage:
//!   dccat convert --file episode.xml --to json
//!   dccat new episode --generate-id --series s-1 --add dcterms:title="Lecture 1"
//!   dccat show < series.json
//!
//! `DCCAT_FORMAT` and `DCCAT_PRETTY` set the output defaults; `DCCAT_LOG`
//! takes `tracing` filter directives (default `warn`).

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dublincore::config::{self, DEFAULT_LOG_FILTER, ENV_LOG};
use dublincore::opencast::OpencastDcterms;
use dublincore::vocabulary::vocabulary;
use dublincore::{DublinCoreCatalog, DublinCoreValue, EName, Format, WriteOptions, factory};
use std::fs::File;
use std::io::stdin;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dccat")]
#[command(about = "Convert, create and inspect DublinCore catalogs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read a catalog in either format and write it in the chosen one.
    Convert {
        /// Input file; reads stdin when omitted.
        #[arg(long)]
        file: Option<PathBuf>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Build a new Opencast catalog.
    New {
        kind: Kind,
        /// Value for dcterms:identifier.
        #[arg(long)]
        id: Option<String>,
        /// Generate a random identifier.
        #[arg(long, conflicts_with = "id")]
        generate_id: bool,
        /// Series the episode is part of.
        #[arg(long = "series")]
        series_id: Option<String>,
        /// Append a value, as `prefix:name=value` or `{uri}name=value`.
        #[arg(long = "add", value_name = "NAME=VALUE")]
        values: Vec<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print flavor, root tag, bindings and one line per value.
    Show {
        /// Input file; reads stdin when omitted.
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output format; defaults to DCCAT_FORMAT or xml.
    #[arg(long)]
    to: Option<Format>,
    /// Disable indentation.
    #[arg(long)]
    compact: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Episode,
    Series,
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Convert { file, output } => {
            let catalog = read_input(file)?;
            emit(&catalog, &output)
        }
        Command::New {
            kind,
            id,
            generate_id,
            series_id,
            values,
            output,
        } => {
            let catalog = build(kind, id, generate_id, series_id, &values)?;
            emit(&catalog, &output)
        }
        Command::Show { file } => {
            let catalog = read_input(file)?;
            print!("{}", describe(&catalog));
            Ok(())
        }
    }
}

fn read_input(file: Option<PathBuf>) -> Result<DublinCoreCatalog> {
    match file {
        Some(path) => {
            let input = File::open(&path)
                .with_context(|| format!("opening input file {}", path.display()))?;
            dublincore::read(input).with_context(|| format!("reading catalog {}", path.display()))
        }
        None => dublincore::read(stdin().lock()).context("reading catalog from stdin"),
    }
}

fn build(
    kind: Kind,
    id: Option<String>,
    generate_id: bool,
    series_id: Option<String>,
    values: &[String],
) -> Result<DublinCoreCatalog> {
    let id = match (id, generate_id) {
        (Some(id), _) => Some(id),
        (None, true) => Some(factory::generate_random_identifier()),
        (None, false) => None,
    };
    let catalog = match kind {
        Kind::Episode => {
            factory::make_episode_catalog(id.as_deref(), series_id.as_deref()).catalog()
        }
        Kind::Series => {
            if series_id.is_some() {
                bail!("--series only applies to episode catalogs");
            }
            factory::make_series_catalog(id.as_deref()).catalog()
        }
    };

    for raw in values {
        let (name, value) = parse_assignment(raw)?;
        debug!(%name, value, "adding value");
        catalog.borrow_mut().add(&name, DublinCoreValue::new(value));
    }
    let snapshot = catalog.borrow().clone();
    Ok(snapshot)
}

fn parse_assignment(raw: &str) -> Result<(EName, &str)> {
    let Some((name, value)) = raw.split_once('=') else {
        bail!("expected NAME=VALUE, got '{raw}'");
    };
    let Some(resolved) = vocabulary().resolve(name.trim()) else {
        bail!("unknown property name '{name}'; use a well-known prefix such as dcterms:title or {{uri}}name");
    };
    Ok((resolved, value))
}

fn emit(catalog: &DublinCoreCatalog, output: &OutputArgs) -> Result<()> {
    let format = match output.to {
        Some(format) => format,
        None => config::default_output_format()?,
    };
    let mut options = WriteOptions::from_env();
    if output.compact {
        options.pretty = false;
    }
    let text = format.write(catalog, &options)?;
    println!("{text}");
    Ok(())
}

fn describe(catalog: &DublinCoreCatalog) -> String {
    let mut out = String::new();
    if let Some(flavor) = catalog.flavor() {
        out.push_str(&format!("flavor: {flavor}\n"));
    }
    if let Some(root) = catalog.root_tag() {
        out.push_str(&format!("root: {root}\n"));
    }
    for binding in catalog.bindings() {
        let prefix = if binding.is_default() {
            "(default)"
        } else {
            binding.prefix()
        };
        out.push_str(&format!("xmlns {prefix} = {}\n", binding.uri()));
    }
    for property in catalog.properties() {
        let name = display_name(catalog, property.name());
        for value in property.values() {
            out.push_str(&name);
            if let Some(language) = value.language() {
                out.push_str(&format!(" [{language}]"));
            }
            if let Some(scheme) = value.encoding_scheme() {
                out.push_str(&format!(" ({})", display_name(catalog, scheme)));
            }
            out.push_str(&format!(": {}\n", value.value()));
        }
    }
    out
}

/// `prefix:local` when the catalog binds the namespace, Clark notation otherwise.
fn display_name(catalog: &DublinCoreCatalog, name: &EName) -> String {
    match catalog.bindings().attribute_prefix(name.namespace()) {
        Some(prefix) => format!("{prefix}:{}", name.local_name()),
        None => name.to_string(),
    }
}
