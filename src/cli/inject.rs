use crate::blocks::InjectionReport;
use crate::config::{OutputFormat, RenderOptions, DEFAULT_FILLER, DEFAULT_TARGET};
use crate::error::Result;
use crate::render::render_injection;

/// Options for the inject command
#[derive(Debug, Clone)]
pub struct InjectOptions {
    pub target: String,
    pub filler: u8,
    pub format: OutputFormat,
    pub render: RenderOptions,
}

impl Default for InjectOptions {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            filler: DEFAULT_FILLER,
            format: OutputFormat::default(),
            render: RenderOptions::default(),
        }
    }
}

/// Run one injection demonstration and return the formatted report
pub fn run_injection(count: usize, options: &InjectOptions) -> Result<String> {
    let report = InjectionReport::build(
        &options.target,
        count,
        options.filler,
        options.render.block_size,
    )?;

    match options.format {
        OutputFormat::Text => render_injection(&report, &options.render),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&report)?;
            json.push('\n');
            Ok(json)
        }
    }
}
