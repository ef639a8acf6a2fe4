//! Definitions of Solidity functions & events used during deployment

use alloy::sol;

sol! {
    #[allow(missing_docs)]
    interface IAssetGovernance {
        function addAsset(address asset) external;
    }

    #[allow(missing_docs)]
    interface IZNSRegistry {
        function setSubnodeOwner(bytes32 node, bytes32 label, address owner, bytes32 pubKey) external returns (bytes32);
    }

    #[allow(missing_docs)]
    interface IDeployFactory {
        event Addresses(
            address governance,
            address assetGovernance,
            address verifier,
            address znsController,
            address znsResolver,
            address zecreyLegend,
            address gatekeeper
        );
    }
}
