use tbtc_deposit::test_utils::{StubOwnerTokens, StubRelay, StubSigningGroup, StubSystem};
use tbtc_primitives::Address;

/// Every external collaborator a deposit talks to, wired with mainnet defaults.
#[derive(Clone, Debug)]
pub struct Collaborators {
    pub system: StubSystem,
    pub gateway: StubSigningGroup,
    pub tokens: StubOwnerTokens,
    pub relay: StubRelay,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            system: StubSystem::default(),
            gateway: StubSigningGroup::default(),
            tokens: StubOwnerTokens::default(),
            relay: StubRelay::mainnet(),
        }
    }
}

impl Collaborators {
    /// Publishes `key` for the signing group at `keep`, if there is one.
    ///
    /// Returns the group address, or `None` if no group was requested yet.
    pub fn publish_key_for(&mut self, keep: Option<&Address>, key: &[u8]) -> Option<Address> {
        let keep = *keep?;
        self.gateway.set_public_key(&keep, key);
        Some(keep)
    }
}
