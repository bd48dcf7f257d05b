use std::{fmt, path::PathBuf, str::FromStr};

use crate::result::ReleaseError;

const FIELD_SEPARATOR: char = ':';

/**
    A single file to upload as a release asset.

    Parsed from a `source:target:type` string, for example
    `dist/app.bin:app.bin:application/octet-stream`.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSpec {
    pub source: PathBuf,
    pub target: String,
    pub content_type: String,
}

impl FromStr for AssetSpec {
    type Err = ReleaseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| ReleaseError::InvalidAsset {
            entry: s.to_string(),
            reason,
        };

        let fields = s.split(FIELD_SEPARATOR).collect::<Vec<_>>();
        let [source, target, content_type] = fields.as_slice() else {
            return Err(invalid(format!(
                "expected 3 fields 'source:target:type', found {}",
                fields.len()
            )));
        };

        if source.is_empty() {
            return Err(invalid("source path is empty".to_string()));
        }
        if target.is_empty() {
            return Err(invalid("target name is empty".to_string()));
        }
        if content_type.is_empty() {
            return Err(invalid("content type is empty".to_string()));
        }

        Ok(Self {
            source: PathBuf::from(source),
            target: (*target).to_string(),
            content_type: (*content_type).to_string(),
        })
    }
}

impl fmt::Display for AssetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
            self.source.display(),
            self.target,
            self.content_type
        )
    }
}

/**
    Parses a whitespace-separated list of asset specs.

    Order is preserved and duplicates are kept, an empty
    or whitespace-only list yields no assets.

    # Errors

    - If any entry is not a valid [`AssetSpec`].
*/
pub fn parse_asset_list(s: &str) -> Result<Vec<AssetSpec>, ReleaseError> {
    s.split_whitespace().map(AssetSpec::from_str).collect()
}
