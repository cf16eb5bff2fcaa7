//! Contract entry points the planner encodes calls for or decodes results from.

use alloy_sol_types::sol;

sol! {
    // proxy factory
    function callAll(bytes[] data, address referral) external payable;

    function createCount(address owner) external view returns (uint256 count);

    function minDonate() external view returns (uint256 amount);

    // sub-account
    function callTarget(address target, uint256 value, bytes data) external payable;

    // XEN
    function claimRank(uint256 term) external;

    /// Public getter of the `userMints` mapping; a zero `user` means no mint.
    function userMints(address account) external view returns (
        address user,
        uint256 term,
        uint256 maturityTs,
        uint256 rank,
        uint256 amplifier,
        uint256 eaaRate
    );
}
