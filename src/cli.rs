//! CLI: signature files → decode/encode fragments (or a debug view of the codec tree).
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use serde_json::{json, Value};

use crate::generate::{self, GenOptions};
use crate::ir::{Field, Signature};
use crate::names::NameAllocator;
use crate::resolve::resolve;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate XML-RPC decode/encode Go fragments from shape descriptions
#[derive(Parser, Debug)]
#[command(version)]
pub struct CommandLineInterface {
    /// log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// emit a decode fragment for every param and result
    Decode(FragmentOut),
    /// emit an encode fragment for every param and result
    Encode(FragmentOut),
    /// decode params and encode results, per signature
    Generate(GenerateOut),
    /// print the resolved codec tree as JSON
    Tree(TreeOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more signature files. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct ScopeSettings {
    /// wire element params are decoded from
    #[arg(long, default_value = "element")]
    source: String,

    /// wire element results are encoded into
    #[arg(long, default_value = "element")]
    target: String,

    /// error variable of the enclosing generated function
    #[arg(long, default_value = "err")]
    error_var: String,
}

#[derive(clap::Parser, Debug)]
struct FragmentOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    scope: ScopeSettings,

    /// output .go file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    scope: ScopeSettings,

    /// skip signatures with unsupported shapes instead of aborting
    #[arg(long, default_value_t = false)]
    keep_going: bool,

    /// process input files in parallel (identifier numbering then depends on scheduling)
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// output .go file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct TreeOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load(&self) -> Result<Vec<(PathBuf, Vec<Signature>)>> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        source_paths
            .into_iter()
            .map(|path| {
                let sigs = crate::path_de::load_signatures(&path)?;
                tracing::info!(path = %path.display(), signatures = sigs.len(), "loaded");
                Ok((path, sigs))
            })
            .collect()
    }
}

impl ScopeSettings {
    fn options(&self) -> GenOptions {
        GenOptions {
            source: self.source.clone(),
            target: self.target.clone(),
            error_var: self.error_var.clone(),
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        let names = NameAllocator::new();
        match &self.cmd {
            Command::Decode(target) => {
                let opts = target.scope.options();
                let src = emit_fields(&target.input_settings, |field| {
                    Ok(generate::decode_field(field, &opts, &names)?)
                })?;
                write_output(target.out.as_deref(), &src)
            }
            Command::Encode(target) => {
                let opts = target.scope.options();
                let src = emit_fields(&target.input_settings, |field| {
                    Ok(generate::encode_field(field, &opts, &names)?)
                })?;
                write_output(target.out.as_deref(), &src)
            }
            Command::Generate(target) => {
                let files = target.input_settings.load()?;
                let opts = target.scope.options();
                let per_file = |(path, sigs): &(PathBuf, Vec<Signature>)| {
                    generate_file(path, sigs, &opts, &names, target.keep_going)
                };
                let chunks: Vec<String> = if target.parallel {
                    files.par_iter().map(per_file).collect::<Result<_>>()?
                } else {
                    files.iter().map(per_file).collect::<Result<_>>()?
                };
                write_output(target.out.as_deref(), &chunks.concat())
            }
            Command::Tree(target) => {
                let mut trees = Vec::new();
                for (_, sigs) in target.input_settings.load()? {
                    for sig in &sigs {
                        trees.push(describe_signature(sig)?);
                    }
                }
                let src = serde_json::to_string_pretty(&Value::Array(trees))?;
                write_output(target.out.as_deref(), &src)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn emit_fields(
    input: &InputSettings,
    mut emit: impl FnMut(&Field) -> Result<generate::Fragment>,
) -> Result<String> {
    let mut out = String::new();
    for (_, sigs) in input.load()? {
        for sig in &sigs {
            let fragments = sig
                .params
                .iter()
                .chain(&sig.results)
                .map(&mut emit)
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("signature `{}`", sig.name))?;
            let generated = generate::GeneratedSignature { name: sig.name.clone(), fragments };
            out.push_str(&generated.to_source());
        }
    }
    Ok(out)
}

fn generate_file(
    path: &Path,
    sigs: &[Signature],
    opts: &GenOptions,
    names: &NameAllocator,
    keep_going: bool,
) -> Result<String> {
    let mut out = String::new();
    for sig in sigs {
        match generate::generate_signature(sig, opts, names) {
            Ok(generated) => out.push_str(&generated.to_source()),
            Err(error) if keep_going => {
                tracing::warn!(path = %path.display(), %error, "skipping signature");
            }
            Err(error) => {
                return Err(error).with_context(|| format!("in {}", path.display()));
            }
        }
    }
    Ok(out)
}

fn describe_signature(sig: &Signature) -> Result<Value> {
    let describe = |fields: &[Field]| -> Result<Vec<Value>> {
        fields
            .iter()
            .map(|f| Ok(resolve(&f.shape, &f.name)?.describe()))
            .collect()
    };
    let params = describe(&sig.params).with_context(|| format!("signature `{}`", sig.name))?;
    let results = describe(&sig.results).with_context(|| format!("signature `{}`", sig.name))?;
    Ok(json!({
        "signature": sig.name,
        "params": params,
        "results": results,
    }))
}

fn write_output(out: Option<&Path>, src: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))?;
            tracing::info!(path = %out.display(), bytes = src.len(), "wrote output");
        }
        None => println!("{src}"),
    }
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
