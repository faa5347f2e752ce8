//! Parse command implementation
//!
//! Runs the keyword parser on a model answer without contacting the model.

use std::io::Read;

use crate::cli::ParseArgs;
use crate::core::error::Result;
use crate::output::format_groups;
use crate::search::parse_keywords;

/// Run the parse command
pub fn run(args: ParseArgs) -> Result<()> {
    let text = match args.text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let groups = parse_keywords(&text);
    print!("{}", format_groups(&groups, args.json));

    Ok(())
}
