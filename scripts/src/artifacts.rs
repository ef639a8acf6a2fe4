//! Loading & linking Hardhat compilation artifacts

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use alloy::primitives::{Address, Bytes};
use serde::Deserialize;
use tracing::debug;

use crate::{
    constants::{ARTIFACT_EXTENSION, BUILD_INFO_DIR, DEBUG_ARTIFACT_SUFFIX, NUM_BYTES_ADDRESS},
    errors::ScriptError,
};

/// The location of a library placeholder within creation bytecode
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct LinkOffset {
    /// The byte offset of the placeholder
    pub start: usize,
    /// The byte length of the placeholder
    pub length: usize,
}

/// Library placeholders in a contract's bytecode, keyed by source file and then
/// by library name
pub type LinkReferences = BTreeMap<String, BTreeMap<String, Vec<LinkOffset>>>;

/// A Hardhat compilation artifact
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// The name of the contract
    pub contract_name: String,
    /// The source file defining the contract
    pub source_name: String,
    /// The unlinked creation bytecode, in hex
    pub bytecode: String,
    /// The library placeholders in `bytecode`
    #[serde(default)]
    pub link_references: LinkReferences,
}

impl Artifact {
    /// Whether the bytecode references any libraries
    pub fn needs_linking(&self) -> bool {
        self.link_references.values().any(|libs| !libs.is_empty())
    }

    /// The fully qualified `<source>:<name>` identifier of the contract
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }

    /// Resolve the creation bytecode, substituting each referenced library's
    /// address into its placeholders.
    ///
    /// Libraries are looked up by name, or by `<source>:<name>` when the name
    /// alone is ambiguous.
    pub fn link(&self, libraries: &HashMap<String, Address>) -> Result<Bytes, ScriptError> {
        let mut code = self
            .bytecode
            .strip_prefix("0x")
            .unwrap_or(&self.bytecode)
            .to_string();
        if !code.is_ascii() {
            return Err(ScriptError::Linking(format!(
                "{} bytecode is not hex",
                self.qualified_name()
            )));
        }

        for (source, libs) in &self.link_references {
            for (lib, offsets) in libs {
                let address = libraries
                    .get(&format!("{source}:{lib}"))
                    .or_else(|| libraries.get(lib))
                    .ok_or_else(|| {
                        ScriptError::Linking(format!(
                            "{} requires library `{}` which was not provided",
                            self.qualified_name(),
                            lib
                        ))
                    })?;
                let address_hex = hex::encode(address.as_slice());

                for offset in offsets {
                    if offset.length != NUM_BYTES_ADDRESS {
                        return Err(ScriptError::Linking(format!(
                            "{}: placeholder for `{}` is {} bytes, expected {}",
                            self.qualified_name(),
                            lib,
                            offset.length,
                            NUM_BYTES_ADDRESS
                        )));
                    }

                    // Offsets are in bytes, the bytecode is hex
                    let range = offset
                        .start
                        .checked_mul(2)
                        .and_then(|start| Some(start..start.checked_add(NUM_BYTES_ADDRESS * 2)?))
                        .filter(|range| range.end <= code.len())
                        .ok_or_else(|| {
                            ScriptError::Linking(format!(
                                "{}: placeholder for `{}` at byte {} lies outside the bytecode",
                                self.qualified_name(),
                                lib,
                                offset.start
                            ))
                        })?;
                    code.replace_range(range, &address_hex);
                }

                debug!("Linked {} into {} at {}", lib, self.qualified_name(), address);
            }
        }

        hex::decode(&code).map(Bytes::from).map_err(|e| {
            ScriptError::Linking(format!(
                "{} has unresolved bytecode: {}",
                self.qualified_name(),
                e
            ))
        })
    }

    /// The creation bytecode of a contract with no library references
    pub fn unlinked_bytecode(&self) -> Result<Bytes, ScriptError> {
        if self.needs_linking() {
            return Err(ScriptError::Linking(format!(
                "{} must be linked before it is deployed",
                self.qualified_name()
            )));
        }

        self.link(&HashMap::new())
    }
}

/// The set of artifacts available to a deployment, keyed by contract name
#[derive(Clone, Debug, Default)]
pub struct ArtifactStore {
    /// The artifacts, by contract name
    artifacts: HashMap<String, Artifact>,
}

impl ArtifactStore {
    /// Index the given in-memory artifacts
    pub fn from_artifacts(artifacts: impl IntoIterator<Item = Artifact>) -> Self {
        let artifacts = artifacts
            .into_iter()
            .map(|artifact| (artifact.contract_name.clone(), artifact))
            .collect();
        Self { artifacts }
    }

    /// Load the named contracts' artifacts from a Hardhat artifacts directory.
    ///
    /// Each contract must have exactly one `<name>.json` file somewhere under
    /// `root`.
    pub fn from_dir<S: AsRef<str>>(root: &Path, contracts: &[S]) -> Result<Self, ScriptError> {
        let mut files = Vec::new();
        collect_artifact_files(root, &mut files)?;

        let mut artifacts = HashMap::new();
        for contract in contracts {
            let contract = contract.as_ref();
            let file_name = format!("{contract}.{ARTIFACT_EXTENSION}");
            let mut matches = files
                .iter()
                .filter(|path| path.file_name().is_some_and(|name| name == file_name.as_str()));

            let path = matches.next().ok_or_else(|| {
                ScriptError::ArtifactParsing(format!(
                    "no artifact for {} under {}",
                    contract,
                    root.display()
                ))
            })?;
            if let Some(other) = matches.next() {
                return Err(ScriptError::ArtifactParsing(format!(
                    "multiple artifacts for {}: {} and {}",
                    contract,
                    path.display(),
                    other.display()
                )));
            }

            let artifact = read_artifact(path)?;
            if artifact.contract_name != contract {
                return Err(ScriptError::ArtifactParsing(format!(
                    "{} describes {}, expected {}",
                    path.display(),
                    artifact.contract_name,
                    contract
                )));
            }

            debug!("Loaded artifact for {} from {}", contract, path.display());
            artifacts.insert(contract.to_string(), artifact);
        }

        Ok(Self { artifacts })
    }

    /// Get the artifact for the given contract
    pub fn get(&self, contract: &str) -> Result<&Artifact, ScriptError> {
        self.artifacts
            .get(contract)
            .ok_or_else(|| ScriptError::ArtifactParsing(format!("no artifact for {contract}")))
    }
}

/// Parse a single artifact file
fn read_artifact(path: &Path) -> Result<Artifact, ScriptError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&contents)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))
}

/// Recursively collect every artifact file under `dir`, skipping debug files
/// and build info
fn collect_artifact_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), ScriptError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", dir.display(), e)))?;

    for entry in entries {
        let path = entry
            .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?
            .path();

        if path.is_dir() {
            if path.file_name().is_some_and(|name| name == BUILD_INFO_DIR) {
                continue;
            }
            collect_artifact_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == ARTIFACT_EXTENSION)
            && !path.to_string_lossy().ends_with(DEBUG_ARTIFACT_SUFFIX)
        {
            files.push(path);
        }
    }

    Ok(())
}
