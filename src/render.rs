//! Text rendering of block tables and injection reports.

use crate::blocks::{padding_needed, segment, Block, InjectionReport};
use crate::config::{HexCase, RenderOptions, RULE_WIDTH};
use crate::error::{EcbVizError, Result};

/// Render one block's bytes as space-separated hex pairs
pub fn hex_pairs(bytes: &[u8], case: HexCase) -> String {
    let encoded = match case {
        HexCase::Lower => hex::encode(bytes),
        HexCase::Upper => hex::encode_upper(bytes),
    };
    encoded
        .as_bytes()
        .chunks(2)
        .map(|pair| String::from_utf8_lossy(pair).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Printable ASCII (space through tilde) as-is, everything else as `placeholder`
pub fn ascii_column(bytes: &[u8], placeholder: char) -> String {
    bytes
        .iter()
        .map(|&b| if (32..=126).contains(&b) { b as char } else { placeholder })
        .collect()
}

fn position_row(block: &Block<'_>) -> String {
    block
        .positions()
        .map(|p| format!("{:2}", p))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render `data` as a table of blocks with a title, offsets and totals
pub fn render_blocks(data: &[u8], title: &str, options: &RenderOptions) -> Result<String> {
    let size = options.block_size.get();
    let hex_width = size
        .checked_mul(3)
        .map(|w| w - 1)
        .ok_or_else(|| {
            EcbVizError::InvalidArgument(format!("block size {} is too large to render", size))
        })?;
    let blocks = segment(data, size)?;

    let mut output = String::new();
    output.push_str(&format!("\n{}\n", title));
    output.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH)));

    for block in &blocks {
        let hex = hex_pairs(block.bytes, options.hex_case);
        let mut line = format!("Block {:2} │ {:<width$}", block.number(), hex, width = hex_width);
        if options.show_ascii {
            let ascii = ascii_column(block.bytes, options.placeholder);
            line.push_str(&format!(" │ [{:<width$}]", ascii, width = size));
        }
        output.push_str(line.trim_end());
        output.push('\n');

        if options.show_positions && block.index == 0 {
            output.push_str(&format!(
                "Position │ {:<width$} │\n",
                position_row(block),
                width = hex_width
            ));
            output.push_str(&format!("{}\n", "─".repeat(RULE_WIDTH)));
        }
    }

    output.push_str(&format!(
        "\nTotal: {} bytes, {} blocks\n",
        data.len(),
        blocks.len()
    ));
    let padding = padding_needed(data.len(), size)?;
    if padding > 0 {
        output.push_str(&format!(
            "Padding needed: {} bytes to complete last block\n",
            padding
        ));
    }

    Ok(output)
}

fn describe_filler(filler: u8) -> String {
    if (32..=126).contains(&filler) {
        format!("'{}'", filler as char)
    } else {
        format!("0x{:02x}", filler)
    }
}

/// Render the full before/after injection demonstration
pub fn render_injection(report: &InjectionReport, options: &RenderOptions) -> Result<String> {
    let injected = report.injected_data();
    let prefix_len = report.injected_bytes;

    let mut output = String::new();
    output.push_str("\n🎯 INJECTION ATTACK DEMONSTRATION\n");
    output.push_str(&format!("{}\n", "=".repeat(60)));
    output.push_str(&format!("Target: '{}'\n", report.target));
    output.push_str(&format!(
        "Injected: {} {} bytes\n",
        prefix_len,
        describe_filler(report.filler)
    ));
    output.push_str(&format!(
        "Result: '{}{}'\n",
        String::from_utf8_lossy(&injected[..prefix_len]),
        report.target
    ));

    output.push_str(&render_blocks(report.target.as_bytes(), "Original Target", options)?);
    output.push_str(&render_blocks(&injected, "After Injection", options)?);

    if report.spills() {
        output.push_str(&format!(
            "⚠️  Target data spread across {} additional block(s)\n",
            report.block_delta
        ));
    }
    if report.bytes_to_boundary > 0 {
        output.push_str(&format!(
            "Hint: injecting {} byte(s) ends the target on a block boundary\n",
            report.bytes_to_boundary
        ));
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BlockSize;

    #[test]
    fn test_hex_pairs() {
        assert_eq!(hex_pairs(b"AB\xff", HexCase::Lower), "41 42 ff");
        assert_eq!(hex_pairs(b"\xab", HexCase::Upper), "AB");
        assert_eq!(hex_pairs(b"", HexCase::Lower), "");
    }

    #[test]
    fn test_ascii_column() {
        assert_eq!(ascii_column(b"a\x00~\x7f ", '.'), "a.~. ");
        assert_eq!(ascii_column(b"\n", '?'), "?");
    }

    #[test]
    fn test_render_blocks_layout() {
        let out = render_blocks(b"0123456789abcdefXY", "Data Blocks", &RenderOptions::default()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "Data Blocks");
        assert_eq!(lines[2], "=".repeat(80));
        assert_eq!(
            lines[3],
            "Block  1 │ 30 31 32 33 34 35 36 37 38 39 61 62 63 64 65 66 │ [0123456789abcdef]"
        );
        assert!(lines[4].starts_with("Position │  0  1  2"));
        assert!(lines[4].ends_with("15 │"));
        assert_eq!(lines[5], "─".repeat(80));
        assert_eq!(
            lines[6],
            format!("Block  2 │ {:<47} │ [{:<16}]", "58 59", "XY")
        );
        assert!(out.contains("Total: 18 bytes, 2 blocks"));
        assert!(out.contains("Padding needed: 14 bytes to complete last block"));
    }

    #[test]
    fn test_render_blocks_options() {
        let options = RenderOptions {
            block_size: BlockSize::new(4).unwrap(),
            show_ascii: false,
            show_positions: false,
            ..Default::default()
        };
        let out = render_blocks(b"abcdefgh", "T", &options).unwrap();
        assert!(out.contains("Block  1 │ 61 62 63 64\n"));
        assert!(out.contains("Block  2 │ 65 66 67 68\n"));
        assert!(!out.contains("Position"));
        assert!(!out.contains('['));
        assert!(!out.contains("Padding needed"));
    }

    #[test]
    fn test_render_rejects_unrenderable_block_size() {
        let options = RenderOptions {
            block_size: BlockSize::new(usize::MAX).unwrap(),
            ..Default::default()
        };
        assert!(matches!(
            render_blocks(b"abc", "T", &options),
            Err(EcbVizError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_render_empty() {
        let out = render_blocks(b"", "Empty", &RenderOptions::default()).unwrap();
        assert!(!out.contains("Block "));
        assert!(out.contains("Total: 0 bytes, 0 blocks"));
    }

    #[test]
    fn test_render_injection_warns_on_spill() {
        let target = "z".repeat(64);
        let report = InjectionReport::build(&target, 1, b'A', BlockSize::default()).unwrap();
        let out = render_injection(&report, &RenderOptions::default()).unwrap();
        assert!(out.contains("Injected: 1 'A' bytes"));
        assert!(out.contains(&format!("Result: 'A{}'", target)));
        assert!(out.contains("Original Target"));
        assert!(out.contains("After Injection"));
        assert!(out.contains("Block  5 │ 7a"));
        assert!(out.contains("spread across 1 additional block(s)"));
        assert!(!out.contains("Hint:"));
    }

    #[test]
    fn test_render_injection_no_spill() {
        let target = "z".repeat(60);
        let report = InjectionReport::build(&target, 4, 0, BlockSize::default()).unwrap();
        let out = render_injection(&report, &RenderOptions::default()).unwrap();
        assert!(out.contains("Injected: 4 0x00 bytes"));
        assert!(!out.contains("additional block"));
        assert!(out.contains("Hint: injecting 4 byte(s)"));
    }
}
