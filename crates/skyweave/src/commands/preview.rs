use anyhow::Context;
use colored::Colorize;
use skyweave_config::{ConfigError, StackConfig, find_stack_file};
use skyweave_deploy::{Deployment, TestOptions};
use skyweave_engine::MockEngine;
use skyweave_output::Output;
use skyweave_website::StaticWebsiteStack;
use std::path::PathBuf;

pub async fn handle(
    config_path: Option<PathBuf>,
    project: &str,
    stack: &str,
    show_secrets: bool,
) -> anyhow::Result<()> {
    println!("{}", "Previewing stack...".blue().bold());
    println!("Project: {}  Stack: {}", project.cyan(), stack.cyan());

    let config = load_config(config_path, project, stack)?;

    let engine = MockEngine::new();
    let options = TestOptions::new(project, stack)
        .with_config(config)
        .with_preview(true);
    let run = Deployment::test::<StaticWebsiteStack>(&engine, options).await?;

    println!();
    println!(
        "{}",
        format!("Resources ({}):", run.resources.len()).bold()
    );
    for resource in &run.resources {
        println!(
            "  {} {} {} ({})",
            "+".green(),
            resource.type_token().dimmed(),
            resource.logical_name().green(),
            resource.id()
        );
    }

    println!();
    println!("{}", "Outputs:".bold());
    print_export("primaryStorageKey", &run.stack.primary_storage_key, show_secrets).await?;
    print_export("webEndpoint", &run.stack.web_endpoint, show_secrets).await?;

    println!();
    println!(
        "{}",
        format!("✓ {} requests answered", engine.journal().len())
            .green()
            .bold()
    );
    Ok(())
}

/// Stack file (explicit or discovered) overlaid with `SKYWEAVE_CONFIG`
fn load_config(
    config_path: Option<PathBuf>,
    project: &str,
    stack: &str,
) -> anyhow::Result<StackConfig> {
    let path = match config_path {
        Some(path) => Some(path),
        None => match find_stack_file(stack) {
            Ok(path) => Some(path),
            Err(ConfigError::StackFileNotFound { .. }) => None,
            Err(e) => return Err(e.into()),
        },
    };

    let base = match &path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Using stack file");
            StackConfig::from_yaml_file(project, path)
                .with_context(|| format!("failed to load stack file {}", path.display()))?
        }
        None => StackConfig::new(project),
    };

    let overrides = StackConfig::from_env(project).context("invalid SKYWEAVE_CONFIG")?;
    Ok(base.merge(overrides))
}

async fn print_export(name: &str, output: &Output<String>, show_secrets: bool) -> anyhow::Result<()> {
    let value = output
        .await_resolved()
        .await
        .with_context(|| format!("export '{}' did not resolve", name))?;
    let shown = if output.is_secret() && !show_secrets {
        "[secret]".yellow().to_string()
    } else {
        value
    };
    println!("  {}: {}", name.cyan(), shown);
    Ok(())
}
