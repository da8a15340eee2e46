//! Capability discovery.
//!
//! A market instance advertises which named operation groups it supports.
//! Each group is identified by a 4-byte selector: the XOR-fold of the first
//! four bytes of a domain-prefixed SHA-256 over every operation signature in
//! the group. Selectors are stable across releases as long as the signature
//! lists are; the discovery group itself is supported by every instance.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::constants::SELECTOR_DOMAIN;

/// 4-byte capability selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterfaceId(pub [u8; 4]);

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// A named group of operations a market instance may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterfaceGroup {
    /// The discovery query itself.
    Discovery,
    /// The read surface plus offer submission.
    MarketPlace,
    /// Request lifecycle management.
    ManageableMarketPlace,
    /// Ownership and manager-set administration.
    MultiManager,
    /// Array-encoded extra-data submission.
    ArrayExtraData,
}

impl InterfaceGroup {
    /// Every group, in a stable order.
    pub const ALL: [Self; 5] = [
        Self::Discovery,
        Self::MarketPlace,
        Self::ManageableMarketPlace,
        Self::MultiManager,
        Self::ArrayExtraData,
    ];

    /// The operation signatures that define this group.
    #[must_use]
    pub fn signatures(self) -> &'static [&'static str] {
        match self {
            Self::Discovery => &["supports_interface(interface_id)"],
            Self::MarketPlace => &[
                "get_market_information()",
                "get_open_request_identifiers()",
                "get_closed_request_identifiers()",
                "is_request_defined(request_id)",
                "get_request(request_id)",
                "get_request_extra(request_id)",
                "get_request_offer_ids(request_id)",
                "is_request_decided(request_id)",
                "get_request_decision(request_id)",
                "is_offer_defined(offer_id)",
                "get_offer(offer_id)",
                "get_offer_extra(offer_id)",
                "submit_offer(request_id)",
                "submit_offer_extra(offer_id,values)",
                "withdraw_offer(offer_id)",
                "get_type()",
            ],
            Self::ManageableMarketPlace => &[
                "submit_request(deadline)",
                "submit_request_extra(request_id,values)",
                "close_request(request_id)",
                "decide_request(request_id,offer_ids)",
                "delete_request(request_id)",
            ],
            Self::MultiManager => &[
                "change_owner(actor)",
                "add_manager(actor)",
                "revoke_manager(actor)",
            ],
            Self::ArrayExtraData => &[
                "submit_request_array_extra(request_id,values)",
                "submit_offer_array_extra(offer_id,values)",
            ],
        }
    }

    /// The 4-byte selector identifying this group.
    #[must_use]
    pub fn selector(self) -> InterfaceId {
        let mut folded = [0u8; 4];
        for signature in self.signatures() {
            let hash = selector_hash(signature);
            for (acc, byte) in folded.iter_mut().zip(hash) {
                *acc ^= byte;
            }
        }
        InterfaceId(folded)
    }
}

impl fmt::Display for InterfaceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Discovery => "discovery",
            Self::MarketPlace => "market-place",
            Self::ManageableMarketPlace => "manageable-market-place",
            Self::MultiManager => "multi-manager",
            Self::ArrayExtraData => "array-extra-data",
        };
        write!(f, "{name}")
    }
}

/// First four bytes of the domain-prefixed SHA-256 of one signature.
fn selector_hash(signature: &str) -> [u8; 4] {
    let mut hasher = Sha256::new();
    hasher.update(SELECTOR_DOMAIN);
    hasher.update(signature.as_bytes());
    let digest = hasher.finalize();
    [digest[0], digest[1], digest[2], digest[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_are_deterministic() {
        for group in InterfaceGroup::ALL {
            assert_eq!(group.selector(), group.selector());
        }
    }

    #[test]
    fn selectors_are_pairwise_distinct() {
        let selectors: Vec<InterfaceId> =
            InterfaceGroup::ALL.iter().map(|g| g.selector()).collect();
        for (i, a) in selectors.iter().enumerate() {
            for b in &selectors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn selector_depends_on_every_signature() {
        // XOR-folding means removing or altering any signature changes the
        // group selector; spot-check against a single-signature hash.
        let lone = selector_hash("change_owner(actor)");
        assert_ne!(InterfaceGroup::MultiManager.selector(), InterfaceId(lone));
    }

    #[test]
    fn display_is_hexadecimal() {
        let shown = InterfaceGroup::Discovery.selector().to_string();
        assert!(shown.starts_with("0x"));
        assert_eq!(shown.len(), 10);
    }
}
