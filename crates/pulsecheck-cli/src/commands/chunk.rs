//! Chunk command implementation.

use crate::cli::ChunkArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use pulsecheck_extractor::TextChunker;
use std::fs;

/// Execute the chunk command.
pub fn execute_chunk(args: ChunkArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let max_size = args.max_size.unwrap_or(config.extractor.max_chunk_size);
    if max_size == 0 {
        return Err(CliError::InvalidInput(
            "max size must be greater than 0".to_string(),
        ));
    }

    let text = fs::read_to_string(&args.file)?;
    let chunks = TextChunker::new(max_size).chunk(&text);

    println!("{}", formatter.format_chunks(&chunks)?);
    eprintln!(
        "{}",
        formatter.info(&format!(
            "{} chunk(s) of at most {} characters from {} characters",
            chunks.len(),
            max_size,
            text.chars().count()
        ))
    );

    Ok(())
}
