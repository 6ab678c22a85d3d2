use crate::config::RenderOptions;
use crate::error::Result;
use crate::render::render_blocks;
use std::path::Path;
use tracing::debug;

/// Where the bytes to visualize come from
#[derive(Debug, Clone)]
pub enum ShowSource<'a> {
    Text(&'a str),
    File(&'a Path),
}

/// Visualize text or file contents as blocks
pub fn show_blocks(source: ShowSource<'_>, options: &RenderOptions) -> Result<String> {
    match source {
        ShowSource::Text(text) => render_blocks(text.as_bytes(), "Data Blocks", options),
        ShowSource::File(path) => {
            let data = std::fs::read(path)?;
            debug!(path = %path.display(), len = data.len(), "read input file");
            render_blocks(&data, &format!("Data Blocks: {}", path.display()), options)
        }
    }
}
