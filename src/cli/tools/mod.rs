//! One-shot commands: catalog listing, keyword lookup, page fetch, rendering

use std::collections::BTreeMap;

use clap::Args;

use crate::domain::keyword::render_table;
use crate::domain::workflow::catalog;
use crate::domain::{fill_template, WorkflowDefinition};
use crate::infrastructure::credentials::EnvCredentialProvider;

#[derive(Args, Debug)]
pub struct WorkflowsArgs {
    /// Print full definitions as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct KeywordsArgs {
    /// Seed keyword
    pub seed: String,
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// http(s) URL to read
    pub url: String,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Template text with {placeholder} markers
    pub template: String,

    /// Placeholder value as key=value, repeatable
    #[arg(short, long = "input", value_parser = super::parse_key_val)]
    pub inputs: Vec<(String, String)>,
}

pub async fn workflows(args: WorkflowsArgs) -> anyhow::Result<()> {
    let definitions = catalog::list();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&definitions)?);
    } else {
        print!("{}", workflow_table(&definitions));
    }

    Ok(())
}

pub async fn keywords(args: KeywordsArgs) -> anyhow::Result<()> {
    let config = super::init()?;
    let service =
        crate::create_workflow_service(&config, &EnvCredentialProvider::default()).await?;

    let metrics = service.keyword_metrics(&args.seed).await?;
    println!("{}", render_table(&metrics));

    Ok(())
}

pub async fn fetch(args: FetchArgs) -> anyhow::Result<()> {
    let config = super::init()?;
    let service =
        crate::create_workflow_service(&config, &EnvCredentialProvider::default()).await?;

    let page = service.fetch_page(&args.url).await?;
    println!("{}", page.to_prompt_text());

    Ok(())
}

pub async fn render(args: RenderArgs) -> anyhow::Result<()> {
    println!("{}", render_template(&args));
    Ok(())
}

fn render_template(args: &RenderArgs) -> String {
    let values: BTreeMap<String, String> = args.inputs.iter().cloned().collect();
    fill_template(&args.template, &values)
}

fn workflow_table(definitions: &[&WorkflowDefinition]) -> String {
    let width = definitions.iter().map(|d| d.id.len()).max().unwrap_or(0);

    definitions
        .iter()
        .map(|d| {
            format!(
                "{:width$}  {} ({} steps)\n",
                d.id,
                d.name,
                d.step_count(),
                width = width
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_template_fills_and_marks_missing() {
        let args = RenderArgs {
            template: "Title: {title}, audience: {audience}".to_string(),
            inputs: vec![("title".to_string(), "Knife skills".to_string())],
        };

        assert_eq!(
            render_template(&args),
            "Title: Knife skills, audience: [audience not provided]"
        );
    }

    #[test]
    fn test_workflow_table_lists_catalog() {
        let table = workflow_table(&catalog::list());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 8);
        assert!(lines[0].starts_with("channel_concept"));
        assert!(lines[0].ends_with("Channel Concept Design (4 steps)"));
    }
}
