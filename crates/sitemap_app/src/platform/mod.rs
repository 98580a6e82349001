pub mod app;
pub mod cli;
pub mod config;
pub mod effects;
pub mod ui;

use std::process::ExitCode;

use anyhow::Context;
use log::LevelFilter;
use sitemap_core::{ArtifactKind, FormFields, Msg, Workflow};
use sitemap_engine::EngineHandle;
use sitemap_logging::{sitemap_error, sitemap_info};

use app::Console;
use cli::{Cli, Command};

pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if !sitemap_logging::initialize(cli.log.into(), level) {
        eprintln!("Logging could not be initialized; continuing without a log.");
    }

    let mut config = config::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    let engine = EngineHandle::new(config.service_settings()?)
        .context("starting the request engine")?;
    let mut console = Console::new(&config, engine);
    sitemap_info!("Using sitemap service at {}", config.base_url);

    match cli.command {
        Command::Generate {
            website_url,
            fields,
            download,
        } => {
            let mut form = FormFields::with_website_url(website_url);
            for (name, value) in fields {
                form.push(name, value);
            }
            console.dispatch(Msg::GenerateSubmitted(form));
            console.wait_until_settled();
            if download {
                save_artifact(&mut console, Workflow::Generation, ArtifactKind::Sitemap);
            }
        }
        Command::Validate { show_all, download } => {
            console.dispatch(Msg::ValidateSubmitted);
            console.wait_until_settled();
            if show_all {
                console.dispatch(Msg::ShowAllValidationRequested);
            }
            if download {
                save_artifact(
                    &mut console,
                    Workflow::Validation,
                    ArtifactKind::ValidationReport,
                );
            }
        }
        Command::RunBoth { website_url } => {
            console.dispatch(Msg::GenerateSubmitted(FormFields::with_website_url(
                website_url,
            )));
            console.dispatch(Msg::ValidateSubmitted);
            console.wait_until_settled();
        }
        Command::Download { kind, filename } => {
            let path = console.download(kind.into(), &filename)?;
            println!("Saved {}", path.display());
            return Ok(ExitCode::SUCCESS);
        }
    }

    for line in console.render() {
        println!("{line}");
    }
    Ok(if console.any_failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn save_artifact(console: &mut Console, workflow: Workflow, kind: ArtifactKind) {
    let Some(filename) = console.artifact(workflow) else {
        return;
    };
    match console.download(kind, &filename) {
        Ok(path) => println!("Saved {}", path.display()),
        Err(err) => sitemap_error!("Could not save {}: {:#}", filename, err),
    }
}
