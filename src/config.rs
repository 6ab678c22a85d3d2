use crate::error::{EcbVizError, Result};
use serde::{Deserialize, Serialize};

/// AES block size in bytes (128 bits)
pub const DEFAULT_BLOCK_SIZE: usize = 16;

/// Byte prepended to the target during injection
pub const DEFAULT_FILLER: u8 = b'A';

/// Printed in place of non-printable bytes
pub const DEFAULT_PLACEHOLDER: char = '.';

/// Sample secret used when no target is supplied
pub const DEFAULT_TARGET: &str = "ctf.aesflag{oQWSvPxT039eUynNH1GVecf3A8z.QX0MzN5wSO0ATNyEzW}";

/// Width of the horizontal rules in text output
pub const RULE_WIDTH: usize = 80;

/// Largest block size accepted on the command line
pub const MAX_BLOCK_SIZE: usize = 4096;

/// Largest injected sequence a report will render (1 MiB)
pub const MAX_INJECTED_LEN: usize = 1 << 20;

/// A block size known to be non-zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct BlockSize(usize);

impl BlockSize {
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(EcbVizError::InvalidArgument(
                "block size must be greater than zero".into(),
            ));
        }
        Ok(Self(size))
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn bits(self) -> usize {
        self.0.saturating_mul(8)
    }
}

impl Default for BlockSize {
    fn default() -> Self {
        Self(DEFAULT_BLOCK_SIZE)
    }
}

impl TryFrom<usize> for BlockSize {
    type Error = EcbVizError;
    fn try_from(size: usize) -> Result<Self> {
        Self::new(size)
    }
}

impl From<BlockSize> for usize {
    fn from(size: BlockSize) -> usize {
        size.0
    }
}

impl std::fmt::Display for BlockSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Letter case for hex digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HexCase {
    #[default]
    Lower,
    Upper,
}

impl std::str::FromStr for HexCase {
    type Err = EcbVizError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "lower" => Ok(Self::Lower),
            "upper" => Ok(Self::Upper),
            _ => Err(EcbVizError::UnsupportedOption(format!("hex case: {}", s))),
        }
    }
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = EcbVizError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(EcbVizError::UnsupportedOption(format!("format: {}", s))),
        }
    }
}

/// Options controlling block table rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub block_size: BlockSize,
    pub show_ascii: bool,
    pub show_positions: bool,
    pub placeholder: char,
    pub hex_case: HexCase,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            block_size: BlockSize::default(),
            show_ascii: true,
            show_positions: true,
            placeholder: DEFAULT_PLACEHOLDER,
            hex_case: HexCase::default(),
        }
    }
}

/// Parse a block size given on the command line, bounded to `1..=MAX_BLOCK_SIZE`
pub fn parse_block_size(s: &str) -> Result<BlockSize> {
    let size: usize = s
        .trim()
        .parse()
        .map_err(|e| EcbVizError::InvalidArgument(format!("block size {}: {}", s, e)))?;
    if size > MAX_BLOCK_SIZE {
        return Err(EcbVizError::InvalidArgument(format!(
            "block size {} exceeds maximum of {}",
            size, MAX_BLOCK_SIZE
        )));
    }
    BlockSize::new(size)
}

/// Parse a filler given on the command line.
///
/// Accepts a single ASCII character (`A`) or a hex byte (`0x41`).
pub fn parse_filler(s: &str) -> Result<u8> {
    if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        let bytes = hex::decode(digits)
            .map_err(|e| EcbVizError::InvalidArgument(format!("filler {}: {}", s, e)))?;
        return match bytes.as_slice() {
            [b] => Ok(*b),
            _ => Err(EcbVizError::InvalidArgument(format!(
                "filler {} must be a single byte",
                s
            ))),
        };
    }

    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(EcbVizError::InvalidArgument(format!(
            "filler {} must be one ASCII character or a 0x-prefixed byte",
            s
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_size_rejects_zero() {
        assert!(matches!(
            BlockSize::new(0),
            Err(EcbVizError::InvalidArgument(_))
        ));
        assert_eq!(BlockSize::new(8).unwrap().get(), 8);
        assert_eq!(BlockSize::default().bits(), 128);
    }

    #[test]
    fn test_parse_block_size_bounds() {
        assert_eq!(parse_block_size("16").unwrap().get(), 16);
        assert_eq!(parse_block_size("4096").unwrap().get(), MAX_BLOCK_SIZE);
        assert!(matches!(
            parse_block_size("4097"),
            Err(EcbVizError::InvalidArgument(_))
        ));
        assert!(parse_block_size("18446744073709551615").is_err());
        assert!(parse_block_size("0").is_err());
        assert!(parse_block_size("-1").is_err());
        assert_eq!(BlockSize::new(usize::MAX).unwrap().bits(), usize::MAX);
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("UPPER".parse::<HexCase>().unwrap(), HexCase::Upper);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_parse_filler() {
        assert_eq!(parse_filler("A").unwrap(), b'A');
        assert_eq!(parse_filler("0x00").unwrap(), 0);
        assert_eq!(parse_filler("0XfF").unwrap(), 0xff);
        assert!(parse_filler("AB").is_err());
        assert!(parse_filler("0x4142").is_err());
        assert!(parse_filler("").is_err());
        assert!(parse_filler("é").is_err());
    }

    #[test]
    fn test_block_size_serde_validates() {
        let ok: BlockSize = serde_json::from_str("32").unwrap();
        assert_eq!(ok.get(), 32);
        assert!(serde_json::from_str::<BlockSize>("0").is_err());
    }
}
