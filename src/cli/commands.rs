//! Command dispatch

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use tracing::{debug, info, instrument};

use crate::application::IoResultExt;
use crate::cli::args::{Cli, Commands, ConfigCommands, InputArgs, StyleArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{ExportFormat, TreeNodeConvert};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

const DEFAULT_STEM: &str = "outline";

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Render {
            input,
            format,
            output_dir,
            name,
            style,
        }) => cmd_render(cli, input, format, output_dir.as_deref(), name.as_deref(), style),
        Some(Commands::Dot { input, json, style }) => cmd_dot(cli, input, *json, style),
        Some(Commands::Tree { input }) => cmd_tree(cli, input),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Cli::command()
            .print_help()
            .map_err(|e| CliError::from(InfraError::io("print help", e))),
    }
}

/// Layered settings plus command-line overrides.
fn load_settings(cli: &Cli, input: &InputArgs, style: Option<&StyleArgs>) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(width) = input.indent_width {
        settings.indent_width = width;
    }
    if let Some(style) = style {
        style.apply_to(&mut settings);
    }
    settings.validate()?;
    debug!("effective settings: {:?}", settings);
    Ok(settings)
}

fn read_outline(container: &ServiceContainer, input: &InputArgs) -> CliResult<String> {
    if input.is_stdin() {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .with_context("read outline from stdin")?;
        Ok(text)
    } else {
        Ok(container
            .fs
            .read_to_string(&input.file)
            .with_path_context("read outline", &input.file)?)
    }
}

fn export_stem(input: &InputArgs, name: Option<&str>) -> String {
    if let Some(name) = name {
        return name.to_string();
    }
    if input.is_stdin() {
        return DEFAULT_STEM.to_string();
    }
    input
        .file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_STEM.to_string())
}

#[instrument(level = "debug", skip(cli, style))]
fn cmd_render(
    cli: &Cli,
    input: &InputArgs,
    formats: &[ExportFormat],
    output_dir: Option<&Path>,
    name: Option<&str>,
    style: &StyleArgs,
) -> CliResult<()> {
    let settings = load_settings(cli, input, Some(style))?;
    let formats = if formats.is_empty() {
        settings.renderer.formats.clone()
    } else {
        formats.to_vec()
    };
    if formats.is_empty() {
        return Err(CliError::Usage(
            "no export formats: pass --format or set renderer.formats".to_string(),
        ));
    }
    let dir: PathBuf = output_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| settings.output_dir.clone());
    let stem = export_stem(input, name);

    let container = ServiceContainer::new(settings);
    let service = container.conversion_service();
    let outline = read_outline(&container, input)?;
    let conversion = service.convert(&outline, &container.settings.conversion_options())?;
    output::action("Nodes", &conversion.node_count());

    let mut renderer_missing = false;
    for artifact in service.export_all(&conversion, &formats) {
        match artifact.payload {
            Ok(bytes) => {
                let path = service.write_artifact(&dir, &stem, artifact.format, &bytes)?;
                output::success(&path.display());
            }
            Err(e) => {
                renderer_missing |= matches!(e, InfraError::RendererUnavailable { .. });
                output::warning(&format!("{} export skipped: {}", artifact.format, e));
            }
        }
    }
    if renderer_missing {
        output::detail(&format!(
            "install Graphviz or set renderer.command (current: {}); dot, json and outline exports do not need it",
            container.settings.renderer.command
        ));
    }
    Ok(())
}

#[instrument(level = "debug", skip(cli, style))]
fn cmd_dot(cli: &Cli, input: &InputArgs, json: bool, style: &StyleArgs) -> CliResult<()> {
    let settings = load_settings(cli, input, Some(style))?;
    let container = ServiceContainer::new(settings);
    let service = container.conversion_service();
    let outline = read_outline(&container, input)?;
    let conversion = service.convert(&outline, &container.settings.conversion_options())?;
    info!("{} nodes", conversion.node_count());

    let format = if json {
        ExportFormat::Json
    } else {
        ExportFormat::Dot
    };
    let bytes = service.export(&conversion, format)?;
    output::info(&String::from_utf8_lossy(&bytes).trim_end());
    Ok(())
}

#[instrument(level = "debug", skip(cli))]
fn cmd_tree(cli: &Cli, input: &InputArgs) -> CliResult<()> {
    let settings = load_settings(cli, input, None)?;
    let container = ServiceContainer::new(settings);
    let service = container.conversion_service();
    let outline = read_outline(&container, input)?;
    let conversion = service.convert(&outline, &container.settings.conversion_options())?;

    let tree = &conversion.tree;
    output::info(&tree.to_tree_string());
    output::detail(&format!(
        "{} nodes, depth {}, {} leaves",
        tree.len(),
        tree.depth(),
        tree.leaf_nodes().len()
    ));
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action(
                    "Global",
                    &format!("{} ({})", path.display(), presence(&path)),
                ),
                None => output::action("Global", &"unavailable (no home directory)"),
            }
            let local = cli.config.clone().unwrap_or_else(local_config_path);
            output::action("Local", &format!("{} ({})", local.display(), presence(&local)));
        }
    }
    Ok(())
}

fn presence(path: &Path) -> &'static str {
    if path.exists() {
        "found"
    } else {
        "missing"
    }
}
