//! Search command implementation

use crate::cli::SearchArgs;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::output::format_groups;
use crate::search::AutoSearch;
use tracing::info;

/// Run the search command
pub async fn run(args: SearchArgs, mut config: Config) -> Result<()> {
    if let Some(model) = args.model {
        config.upstream.model = model;
    }
    config.validate()?;

    let search = AutoSearch::from_config(&config)?;
    info!(model = %search.model(), "Running one-shot keyword search");

    let groups = search.auto_search(&args.query).await?;
    print!("{}", format_groups(&groups, args.json));

    Ok(())
}
