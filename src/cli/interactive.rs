use crate::cli::inject::{run_injection, InjectOptions};
use crate::error::{EcbVizError, Result};
use std::io::{BufRead, Write};
use tracing::debug;

pub const PROMPT: &str = "Enter number of bytes to inject: ";

const QUIT_WORDS: [&str; 3] = ["q", "quit", "exit"];

/// Parse an injection count typed by the user
pub fn parse_count(line: &str) -> Result<usize> {
    let trimmed = line.trim();
    trimmed.parse::<usize>().map_err(|_| {
        EcbVizError::InvalidCount(format!("{:?} is not a non-negative integer", trimmed))
    })
}

/// Print the tool banner
pub fn write_banner<W: Write>(output: &mut W, options: &InjectOptions) -> Result<()> {
    let size = options.render.block_size;
    writeln!(output, "🔐 AES ECB Block Visualization Tool")?;
    writeln!(output, "{}", "=".repeat(50))?;
    writeln!(output, "Block size: {} bytes ({} bits)", size, size.bits())?;
    writeln!(
        output,
        "This tool helps visualize ECB block boundaries and injection effects."
    )?;
    Ok(())
}

/// Prompt for injection counts until EOF or a quit word.
///
/// Each line is handled on its own: a valid count prints the injection
/// report, anything else prints `Error: ...` and the loop carries on.
/// Returns the number of reports printed.
pub fn run_interactive<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
    options: &InjectOptions,
) -> Result<usize> {
    write_banner(output, options)?;

    let mut served = 0;
    let mut line = String::new();
    loop {
        write!(output, "\n{}", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output, "\n\nGoodbye!")?;
            break;
        }

        let request = line.trim();
        if request.is_empty() {
            continue;
        }
        if QUIT_WORDS.contains(&request.to_lowercase().as_str()) {
            writeln!(output, "\nGoodbye!")?;
            break;
        }

        match parse_count(request).and_then(|count| run_injection(count, options)) {
            Ok(report) => {
                output.write_all(report.as_bytes())?;
                served += 1;
            }
            Err(e) => {
                debug!(error = %e, "request failed");
                writeln!(output, "Error: {}", e)?;
            }
        }
    }

    Ok(served)
}
