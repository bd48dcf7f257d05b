use std::{collections::HashMap, env::var, fmt};

use crate::result::{ReleaseError, ReleaseResult};

mod asset;

pub use self::asset::{AssetSpec, parse_asset_list};

/**
    A source of named action inputs.
*/
pub trait InputSource {
    /**
        Gets the raw value of the input with the given name, if it was provided.
    */
    fn get(&self, name: &str) -> Option<String>;
}

/**
    Reads inputs the way GitHub Actions passes them to actions:
    input `some name` is found in the `INPUT_SOME_NAME` environment variable.
*/
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvInputs;

impl EnvInputs {
    #[must_use]
    pub fn variable_name(name: &str) -> String {
        format!("INPUT_{}", name.replace(' ', "_").to_ascii_uppercase())
    }
}

impl InputSource for EnvInputs {
    fn get(&self, name: &str) -> Option<String> {
        var(Self::variable_name(name)).ok()
    }
}

impl InputSource for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

/**
    All inputs for a single publish run.

    The `Debug` output never includes the token.
*/
#[derive(Clone, PartialEq, Eq)]
pub struct Inputs {
    /// Release display title.
    pub name: String,
    /// Release tag.
    pub code: String,
    /// Release description.
    pub body: String,
    /// Content hash, passed through as given.
    pub hash: String,
    pub prerelease: bool,
    pub recreate: bool,
    pub assets: Vec<AssetSpec>,
    pub token: String,
}

impl Inputs {
    /**
        Resolves all inputs from the given source.

        Values are trimmed. Flags are only enabled by the exact value `true`.

        # Errors

        - If `code` or `token` are missing or empty.
        - If any entry in `assets` is malformed.
    */
    pub fn resolve(source: &impl InputSource) -> ReleaseResult<Self> {
        let get = |name: &str| {
            source
                .get(name)
                .map(|value| value.trim().to_string())
                .unwrap_or_default()
        };
        let required = |name: &'static str| {
            let value = get(name);
            if value.is_empty() {
                Err(ReleaseError::MissingInput(name))
            } else {
                Ok(value)
            }
        };

        let code = required("code")?;
        let token = required("token")?;

        Ok(Self {
            name: get("name"),
            code,
            body: get("body"),
            hash: get("hash"),
            prerelease: get("prerelease") == "true",
            recreate: get("recreate") == "true",
            assets: parse_asset_list(&get("assets"))?,
            token,
        })
    }
}

impl fmt::Debug for Inputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inputs")
            .field("name", &self.name)
            .field("code", &self.code)
            .field("body", &self.body)
            .field("hash", &self.hash)
            .field("prerelease", &self.prerelease)
            .field("recreate", &self.recreate)
            .field("assets", &self.assets)
            .field("token", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn variable_names() {
        assert_eq!(EnvInputs::variable_name("code"), "INPUT_CODE");
        assert_eq!(EnvInputs::variable_name("some name"), "INPUT_SOME_NAME");
    }

    #[test]
    fn resolve_all() {
        let inputs = Inputs::resolve(&source(&[
            ("name", "Widgets 1.0"),
            ("code", " v1.0.0 "),
            ("body", "First release"),
            ("hash", "deadbeef"),
            ("prerelease", "true"),
            ("recreate", "true"),
            ("assets", "dist/app.bin:app.bin:application/octet-stream"),
            ("token", "ghs_secret"),
        ]))
        .unwrap();

        assert_eq!(inputs.name, "Widgets 1.0");
        assert_eq!(inputs.code, "v1.0.0");
        assert_eq!(inputs.body, "First release");
        assert_eq!(inputs.hash, "deadbeef");
        assert!(inputs.prerelease);
        assert!(inputs.recreate);
        assert_eq!(inputs.assets.len(), 1);
        assert_eq!(inputs.assets[0].target, "app.bin");
    }

    #[test]
    fn resolve_flags_require_exact_true() {
        let inputs = Inputs::resolve(&source(&[
            ("code", "v1"),
            ("token", "t"),
            ("prerelease", "yes"),
            ("recreate", "TRUE"),
        ]))
        .unwrap();
        assert!(!inputs.prerelease);
        assert!(!inputs.recreate);
        assert!(inputs.assets.is_empty());
    }

    #[test]
    fn resolve_missing_required() {
        let err = Inputs::resolve(&source(&[("token", "t")])).unwrap_err();
        assert!(matches!(err, ReleaseError::MissingInput("code")));

        let err = Inputs::resolve(&source(&[("code", "v1"), ("token", "  ")])).unwrap_err();
        assert!(matches!(err, ReleaseError::MissingInput("token")));
    }

    #[test]
    fn resolve_malformed_assets() {
        let err = Inputs::resolve(&source(&[
            ("code", "v1"),
            ("token", "t"),
            ("assets", "dist/app.bin:app.bin"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ReleaseError::InvalidAsset { .. }));
    }

    #[test]
    fn debug_hides_token() {
        let inputs = Inputs::resolve(&source(&[
            ("code", "v1.0.0"),
            ("token", "ghs_secret"),
        ]))
        .unwrap();

        let printed = format!("{inputs:?}");
        assert!(!printed.contains("ghs_secret"));
        assert!(printed.contains("token: \"***\""));
        assert!(printed.contains("v1.0.0"));
    }
}
