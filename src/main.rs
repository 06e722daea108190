use anyhow::{Context, Result};
use h2o_assembly::cli::commands::{FitCommand, OpCommand, PojoCommand, ValidateCommand};
use h2o_assembly::cli::output::*;
use h2o_assembly::cli::{Cli, Command};
use h2o_assembly::core::config::AssemblyConfig;
use h2o_assembly::core::{Assembly, Frame};
use h2o_assembly::{ConnectionConfig, H2oConnection};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("Failed to set logging subscriber")?;

    match &cli.command {
        Command::Fit(cmd) => fit_assembly(cmd, &cli).await?,
        Command::Validate(cmd) => validate_assembly(cmd)?,
        Command::Pojo(cmd) => export_pojo(cmd, &cli).await?,
        Command::Op(cmd) => apply_op(cmd, &cli).await?,
    }

    Ok(())
}

fn connect(cli: &Cli) -> Result<H2oConnection> {
    let mut config = ConnectionConfig::load().context("Failed to load connection config")?;
    if let Some(url) = &cli.url {
        config = config.with_url(url.clone());
    }
    H2oConnection::new(config).context("Failed to create H2O connection")
}

async fn fit_assembly(cmd: &FitCommand, cli: &Cli) -> Result<()> {
    let config = AssemblyConfig::from_file(&cmd.file)
        .with_context(|| format!("Failed to load assembly definition {}", cmd.file))?;
    let mut assembly = config.to_assembly()?;

    println!(
        "{} Loaded assembly {} with {} steps",
        INFO,
        style(config.name.as_deref().unwrap_or("<unnamed>")).bold(),
        style(assembly.steps.len()).cyan()
    );

    let conn = connect(cli)?;
    let spinner = create_spinner(format!("Fitting on {}", cmd.frame));
    let fitted = async {
        let frame = Frame::get(&conn, &cmd.frame).await?;
        let result = assembly.fit(&conn, &frame).await?;
        Ok::<_, anyhow::Error>((frame, result))
    }
    .await;
    spinner.finish_and_clear();

    let (frame, result) = match fitted {
        Ok(pair) => pair,
        Err(e) => {
            println!("{} Fit failed:", CROSS);
            println!("  {}", style(&e).red());
            std::process::exit(1);
        }
    };

    println!("{} Input:  {}", INFO, format_frame(&frame));
    println!("{} Result: {}", CHECK, format_frame(&result));
    println!("  Columns: {}", style(format_columns(&result.columns, 8)).dim());
    if let Some(id) = assembly.id() {
        println!("  Assembly: {}", style(id).cyan());
    }

    if let Some(options) = cmd.pojo_options(config.name.as_deref()) {
        let export = assembly
            .to_pojo(&conn, options)
            .await
            .context("Failed to export POJO")?;
        println!("{}", format_pojo_export(&export));
    }

    Ok(())
}

fn validate_assembly(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating assembly...", INFO);

    let loaded = AssemblyConfig::from_file(&cmd.file).and_then(|config| {
        let assembly = config.to_assembly()?;
        Ok((config, assembly))
    });

    match loaded {
        Ok((config, assembly)) => {
            println!("{} Assembly definition is valid!", CHECK);
            println!(
                "  Name: {}",
                style(config.name.as_deref().unwrap_or("<unnamed>")).bold()
            );
            if let Some(description) = &config.description {
                println!("  Description: {}", description);
            }
            println!("  Steps: {}", style(assembly.steps.len()).cyan());
            for step in &assembly.steps {
                println!("    {} {}", style(&step.name).bold(), style(step.to_rest()).dim());
            }

            if cmd.json {
                let json = serde_json::json!({
                    "definition": config,
                    "steps": assembly.steps_payload(),
                });
                println!("\n{}", serde_json::to_string_pretty(&json)?);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(e).red());
            std::process::exit(1);
        }
    }
}

async fn export_pojo(cmd: &PojoCommand, cli: &Cli) -> Result<()> {
    let conn = connect(cli)?;
    let assembly = Assembly::attach(&cmd.assembly_id);
    let options = cmd.pojo_options();
    let printing = options.path.is_none();

    if printing && !cmd.no_jar {
        eprintln!("{} No directory given, h2o-genmodel.jar is not downloaded", WARN);
    }

    let export = assembly
        .to_pojo(&conn, options)
        .await
        .with_context(|| format!("Failed to export assembly {}", cmd.assembly_id))?;

    if !printing {
        println!("{}", format_pojo_export(&export));
    }
    Ok(())
}

async fn apply_op(cmd: &OpCommand, cli: &Cli) -> Result<()> {
    let conn = connect(cli)?;

    let left = Frame::get(&conn, &cmd.left)
        .await
        .with_context(|| format!("Failed to fetch frame {}", cmd.left))?;
    let right = Frame::get(&conn, &cmd.right)
        .await
        .with_context(|| format!("Failed to fetch frame {}", cmd.right))?;

    let spinner = create_spinner(format!("{} {} {}", cmd.left, cmd.op, cmd.right));
    let result = left.elementwise(&conn, cmd.op, &right).await;
    spinner.finish_and_clear();

    let result = result.with_context(|| format!("Failed to apply {}", cmd.op.name()))?;
    println!("{} {}: {}", CHECK, style(cmd.op.name()).bold(), format_frame(&result));
    Ok(())
}
