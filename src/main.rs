mod bsd;
mod cli;
mod generator;
mod naming;

use anyhow::Context;
use clap::Parser;

use generator::GeneratorOptions;

fn run(cli: &cli::Cli) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&cli.types_xml)
        .with_context(|| format!("failed to read {}", cli.types_xml.display()))?;
    let options = roxmltree::ParsingOptions {
        allow_dtd: cli.allow_dtd,
        ..roxmltree::ParsingOptions::default()
    };
    let document = roxmltree::Document::parse_with_options(&text, options)
        .with_context(|| format!("failed to parse {}", cli.types_xml.display()))?;

    let registry = bsd::read_schema(&document)
        .with_context(|| format!("failed to resolve types of {}", cli.types_xml.display()))?;
    let idl = generator::generate_idl(
        &registry,
        GeneratorOptions {
            emit_docs: cli.emit_docs,
        },
    );

    let output = cli.output_path();
    std::fs::write(&output, idl)
        .with_context(|| format!("failed to write {}", output.display()))?;
    log::info!("wrote {}", output.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();
    run(&cli)
}
