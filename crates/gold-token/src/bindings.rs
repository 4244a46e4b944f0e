//! Generated contract bindings
//!
//! Human-readable ABI fragments for the two deployed contracts. The oracle
//! follows the Chainlink aggregator convention (int256, 8 decimals); the
//! token is an 18-decimal ERC-20 with owner-gated minting and a withdraw
//! entry point.

use ethers::contract::abigen;

abigen!(
    GoldPriceOracle,
    r#"[
        function getLatestPrice() external view returns (int256)
    ]"#
);

abigen!(
    GoldToken,
    r#"[
        function totalSupply() external view returns (uint256)
        function balanceOf(address account) external view returns (uint256)
        function owner() external view returns (address)
        function withdraw(uint256 amount) external
        function mint(address to, uint256 amount) external
    ]"#
);
