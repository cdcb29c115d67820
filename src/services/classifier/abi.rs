//! ABI bindings for the events the monitor decodes.

use alloy::sol;

sol! {
	/// One entry of an EIP-2535 diamond cut. `action` is 0 = Add, 1 = Replace, 2 = Remove.
	#[derive(Debug)]
	struct FacetCut {
		address facetAddress;
		uint8 action;
		bytes4[] functionSelectors;
	}

	#[derive(Debug)]
	event DiamondCut(FacetCut[] _diamondCut, address _init, bytes _calldata);

	#[derive(Debug)]
	event OwnershipTransferred(address indexed previousOwner, address indexed newOwner);

	#[derive(Debug)]
	event FacetAdded(address indexed facetAddress, bytes4[] functionSelectors);

	#[derive(Debug)]
	event FacetReplaced(address indexed facetAddress, bytes4[] functionSelectors);

	#[derive(Debug)]
	event FacetRemoved(address indexed facetAddress, bytes4[] functionSelectors);

	/// Safe wallet (v1.3+) execution results
	#[derive(Debug)]
	event ExecutionSuccess(bytes32 txHash, uint256 payment);

	#[derive(Debug)]
	event ExecutionFailure(bytes32 txHash, uint256 payment);
}
