use crate::blocks::segment::{block_count, injection_block_delta, padding_needed};
use crate::config::{BlockSize, MAX_INJECTED_LEN};
use crate::error::{EcbVizError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Prepend `count` copies of `filler` to `target`
pub fn inject(target: &[u8], count: usize, filler: u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(count.saturating_add(target.len()));
    data.resize(count, filler);
    data.extend_from_slice(target);
    data
}

/// Injected bytes needed to push the target's end onto a block boundary
pub fn bytes_to_next_boundary(target_length: usize, block_size: usize) -> Result<usize> {
    padding_needed(target_length, block_size)
}

/// Block facts for a target before and after prefix injection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectionReport {
    pub target: String,
    pub filler: u8,
    pub injected_bytes: usize,
    pub block_size: BlockSize,
    pub original_len: usize,
    pub injected_len: usize,
    pub original_blocks: usize,
    pub injected_blocks: usize,
    pub block_delta: usize,
    pub original_padding: usize,
    pub injected_padding: usize,
    pub bytes_to_boundary: usize,
}

impl InjectionReport {
    pub fn build(target: &str, injected_bytes: usize, filler: u8, block_size: BlockSize) -> Result<Self> {
        let size = block_size.get();
        let original_len = target.len();
        let injected_len = original_len
            .checked_add(injected_bytes)
            .filter(|&len| len <= MAX_INJECTED_LEN)
            .ok_or_else(|| {
                EcbVizError::InvalidCount(format!(
                    "{} injected bytes exceed the {} byte limit",
                    injected_bytes, MAX_INJECTED_LEN
                ))
            })?;

        let report = Self {
            target: target.to_string(),
            filler,
            injected_bytes,
            block_size,
            original_len,
            injected_len,
            original_blocks: block_count(original_len, size)?,
            injected_blocks: block_count(injected_len, size)?,
            block_delta: injection_block_delta(original_len, injected_bytes, size)?,
            original_padding: padding_needed(original_len, size)?,
            injected_padding: padding_needed(injected_len, size)?,
            bytes_to_boundary: bytes_to_next_boundary(original_len, size)?,
        };

        debug!(
            injected = injected_bytes,
            before = report.original_blocks,
            after = report.injected_blocks,
            "built injection report"
        );
        Ok(report)
    }

    /// The injected sequence: filler prefix followed by the target bytes
    pub fn injected_data(&self) -> Vec<u8> {
        inject(self.target.as_bytes(), self.injected_bytes, self.filler)
    }

    /// Whether injection pushed target bytes into additional blocks
    pub fn spills(&self) -> bool {
        self.block_delta > 0
    }

    /// Whether the injected sequence ends exactly on a block boundary
    pub fn aligned(&self) -> bool {
        self.injected_padding == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inject_prefix() {
        assert_eq!(inject(b"flag", 3, b'A'), b"AAAflag".to_vec());
        assert_eq!(inject(b"flag", 0, b'A'), b"flag".to_vec());
        assert_eq!(inject(b"", 2, 0), vec![0, 0]);
    }

    #[test]
    fn test_report_fills_last_block() {
        let target = "x".repeat(60);
        let report = InjectionReport::build(&target, 4, b'A', BlockSize::default()).unwrap();
        assert_eq!(report.original_blocks, 4);
        assert_eq!(report.injected_blocks, 4);
        assert_eq!(report.block_delta, 0);
        assert_eq!(report.original_padding, 4);
        assert_eq!(report.bytes_to_boundary, 4);
        assert!(report.aligned());
        assert!(!report.spills());
    }

    #[test]
    fn test_report_spills() {
        let target = "y".repeat(64);
        let report = InjectionReport::build(&target, 1, b'A', BlockSize::default()).unwrap();
        assert_eq!(report.injected_len, 65);
        assert_eq!(report.block_delta, 1);
        assert_eq!(report.injected_padding, 15);
        assert!(report.spills());
        assert_eq!(&report.injected_data()[..2], b"Ay");
    }

    #[test]
    fn test_report_rejects_oversized_injection() {
        for count in [usize::MAX, usize::MAX / 2, MAX_INJECTED_LEN] {
            assert!(matches!(
                InjectionReport::build("abc", count, b'A', BlockSize::default()),
                Err(EcbVizError::InvalidCount(_))
            ));
        }
        let report =
            InjectionReport::build("abc", MAX_INJECTED_LEN - 3, b'A', BlockSize::default()).unwrap();
        assert_eq!(report.injected_len, MAX_INJECTED_LEN);
    }

    #[test]
    fn test_report_counts_utf8_bytes() {
        let report = InjectionReport::build("é", 0, b'A', BlockSize::default()).unwrap();
        assert_eq!(report.original_len, 2);
    }

    #[test]
    fn test_report_serializes_snake_case() {
        let report = InjectionReport::build("abc", 2, b'A', BlockSize::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["block_size"], 16);
        assert_eq!(json["injected_len"], 5);
        assert_eq!(json["block_delta"], 0);
    }
}
