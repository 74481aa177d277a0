use clap::Parser as _;
use miette::{Result, miette};
use tracing_subscriber::EnvFilter;

use kumo_action::Action;
use kumo_frontend::{OutputPathResolver, PrincipalLocation, RealFileSystem};

mod cli;

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::default()
                .context_lines(3)
                .build(),
        )
    }))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let (options, debug) = cli::Args::parse().into_options()?;

    let before = std::time::Instant::now();
    let resolver = OutputPathResolver::new(&options, RealFileSystem);
    let resolved = resolver.resolve();
    if debug.time_compilation {
        eprintln!(
            "resolved outputs in {} µs",
            (std::time::Instant::now() - before).as_micros()
        );
    }

    for warning in resolved.warnings() {
        eprintln!(
            "{:?}",
            miette!(severity = miette::Severity::Warning, "{warning}")
        );
    }

    let errors = resolved.errors().collect::<Vec<_>>();
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("{:?}", miette!("{error}"));
        }

        miette::bail!(
            "could not plan the outputs of `{}` due to {} previous error(s)",
            resolved.action,
            errors.len()
        );
    }

    println!("action: {}", resolved.action);
    if let Some(module_name) = &resolved.module_name {
        println!("module: {module_name}");
    }
    if let (Some(suffix), textual) = resolver.principal_output_identity() {
        println!(
            "principal output: .{suffix} ({})",
            if textual { "textual" } else { "binary" }
        );
    }

    for output in &resolved.principal {
        let location = match &output.location {
            PrincipalLocation::Stdout => "<stdout>".to_string(),
            PrincipalLocation::Suppressed => "<none>".to_string(),
            location => location
                .path()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
        };

        println!("{} -> {location}", output.input.display());
    }

    for (kind, path) in &resolved.auxiliary {
        println!("{kind} -> {}", path.display());
    }

    if options.action == Action::EmitPCH {
        println!("pch hash: {:016x}", options.pch_hash_components());
    }

    if debug.print_stats {
        eprintln!(
            "inputs: {}, auxiliary outputs: {}, warnings: {}",
            options.inputs.len(),
            resolved.auxiliary.len(),
            resolved.warnings().count()
        );
    }

    Ok(())
}
