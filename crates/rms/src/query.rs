use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use rms_search::{ContainerContent, ResultBoard, ResultRenderer, SearchType};

use crate::config::Config;
use crate::display::{badge_colored, leading_text};

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Search type: customers, menu or orders
    pub search_type: SearchType,

    /// Search text
    pub text: String,

    /// Print the raw records as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: QueryArgs, config: &Config) -> Result<()> {
    let min = config.search.min_query_chars;
    if args.text.chars().count() < min {
        anyhow::bail!("Search text must be at least {min} characters");
    }

    let client = config.client()?;
    let results = client
        .search(&config.endpoint_map(), args.search_type, &args.text)
        .with_context(|| format!("{} search for '{}' failed", args.search_type, args.text))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    let mut board = ResultBoard::with_types(&[args.search_type]);
    ResultRenderer::new().render(&mut board, results, args.search_type);
    let Some(container) = board.container(args.search_type) else {
        return Ok(());
    };

    match container.content() {
        ContainerContent::Results(nodes) => {
            for node in nodes {
                let leading = leading_text(&node.view.leading);
                let leading = match &node.view.leading {
                    rms_search::Leading::Badge { color, .. } => badge_colored(&leading, *color),
                    _ => leading.cyan(),
                };
                println!("{} {}", leading, node.view.title.bold());
                println!("    {}", node.view.detail.dimmed());
            }
        }
        ContainerContent::Placeholder(message) => println!("{}", message.dimmed()),
        ContainerContent::Blank => {}
    }
    Ok(())
}
