//! Utilities for writing the addresses file

use std::{fs, path::Path};

use crate::{errors::ScriptError, types::DeployedAddresses};

/// Write the deployed addresses to the given file as a JSON object,
/// replacing any previous contents
pub fn write_deployed_addresses(
    file_path: &Path,
    addresses: &DeployedAddresses,
) -> Result<(), ScriptError> {
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
    }

    let contents = serde_json::to_string_pretty(addresses)
        .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
    fs::write(file_path, contents).map_err(|e| ScriptError::WriteDeployments(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use alloy::primitives::{address, Address};
    use serde_json::Value;

    use super::*;
    use crate::{
        constants::{UPGRADE_GATEKEEPER_KEY, ZNS_CONTROLLER_PROXY_KEY},
        types::{DeployedToken, ProxyAddresses},
    };

    /// A full set of addresses with a single token
    fn dummy_addresses() -> DeployedAddresses {
        DeployedAddresses {
            proxies: ProxyAddresses {
                governance: address!("0000000000000000000000000000000000000001"),
                asset_governance: address!("0000000000000000000000000000000000000002"),
                verifier: address!("0000000000000000000000000000000000000003"),
                zns_controller: address!("0000000000000000000000000000000000000004"),
                zns_resolver: address!("0000000000000000000000000000000000000005"),
                zecrey_legend: address!("0000000000000000000000000000000000000006"),
                gatekeeper: address!("0000000000000000000000000000000000000007"),
            },
            tokens: vec![DeployedToken {
                symbol: "LEG".to_string(),
                address: address!("0000000000000000000000000000000000000008"),
            }],
        }
    }

    /// Read back the address stored under `key`, if any
    fn read_address(path: &Path, key: &str) -> Option<Address> {
        let json: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        json.get(key)
            .and_then(Value::as_str)
            .map(|s| Address::from_str(s).unwrap())
    }

    #[test]
    fn test_write_creates_parent_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("info").join("addresses.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"stale": "0x00"}"#).unwrap();

        write_deployed_addresses(&path, &dummy_addresses()).unwrap();

        let json: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 8);
        assert!(!obj.contains_key("stale"));
        assert!(obj.contains_key("LEGToken"));

        assert_eq!(
            read_address(&path, ZNS_CONTROLLER_PROXY_KEY),
            Some(address!("0000000000000000000000000000000000000004"))
        );
        assert_eq!(
            read_address(&path, UPGRADE_GATEKEEPER_KEY),
            Some(address!("0000000000000000000000000000000000000007"))
        );
    }

    #[test]
    fn test_write_into_fresh_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("info").join("addresses.json");

        write_deployed_addresses(&path, &dummy_addresses()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_only_deployed_tokens_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("addresses.json");
        write_deployed_addresses(&path, &dummy_addresses()).unwrap();

        assert!(read_address(&path, "LEGToken").is_some());
        assert_eq!(read_address(&path, "REYToken"), None);
    }
}
