//! Run command - executes a whole workflow in the terminal

use std::path::PathBuf;

use clap::Args;
use tracing::{info, warn};

use crate::infrastructure::credentials::EnvCredentialProvider;
use crate::infrastructure::services::{ExportDocument, WorkflowService};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Workflow id, see `workflows`
    pub workflow_id: String,

    /// Form input as key=value, repeatable
    #[arg(short, long = "input", value_parser = super::parse_key_val)]
    pub inputs: Vec<(String, String)>,

    /// Write the export to this file instead of the default file name
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Attempts per step when generation fails
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=10))]
    pub attempts: u32,
}

pub async fn run(args: RunArgs) -> anyhow::Result<()> {
    let config = super::init()?;
    let service =
        crate::create_workflow_service(&config, &EnvCredentialProvider::default()).await?;

    let document = run_workflow(&service, &args).await?;
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&document.file_name));

    tokio::fs::write(&path, &document.content).await?;
    info!(path = %path.display(), "Export written");
    println!("Saved {}", path.display());

    Ok(())
}

/// Run every step, printing each result, and return the export
async fn run_workflow(service: &WorkflowService, args: &RunArgs) -> anyhow::Result<ExportDocument> {
    let session = service
        .create_session(&args.workflow_id, args.inputs.clone())
        .await?;
    let id = session.id.to_string();

    println!("{}", session.snapshot.workflow_name);

    loop {
        let mut attempt = 1;
        let outcome = loop {
            match service.run_step(&id).await {
                Ok(outcome) => break outcome,
                Err(e) if e.is_retryable() && attempt < args.attempts => {
                    warn!(attempt, error = %e, "Step failed, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        };

        println!(
            "\n== Step {}: {} ==\n{}",
            outcome.step_index + 1,
            outcome.step_title,
            outcome.content.trim_end()
        );

        if service.advance(&id).await?.snapshot.completed {
            break;
        }
    }

    Ok(service.export(&id).await?)
}
