//! Accepted-list validation.
//!
//! Markets whose decision strategy takes the proposed list at face value
//! must reject any malformed input before touching state: duplicates, ids
//! of unknown offers, offers belonging to a different request, and offers
//! that are not open. The check is a pure function over a snapshot of the
//! request's offers — no side effects, no partial application.

use std::collections::BTreeSet;

use opentender_types::{ExtraData, MarketError, Offer, OfferId, Result, constants};

/// Validate an explicit accepted-offer list against the offers of the
/// request being decided. Returns the accepted ids in the proposed order.
///
/// `offers` must be exactly the offers linked to the request under
/// decision; an id absent from it is either unknown or linked elsewhere,
/// and both are improper here.
pub fn validate_accepted_list<X: ExtraData>(
    proposed: &[OfferId],
    offers: &[&Offer<X>],
) -> Result<Vec<OfferId>> {
    if proposed.is_empty() {
        return Err(MarketError::ImproperList {
            reason: "empty accepted-offer list".into(),
        });
    }
    if proposed.len() > constants::MAX_DECISION_LIST_LEN {
        return Err(MarketError::ImproperList {
            reason: format!("list exceeds {} entries", constants::MAX_DECISION_LIST_LEN),
        });
    }

    let mut seen = BTreeSet::new();
    for &id in proposed {
        if !seen.insert(id) {
            return Err(MarketError::ImproperList {
                reason: format!("duplicate entry {id}"),
            });
        }
        let Some(offer) = offers.iter().find(|offer| offer.id == id) else {
            return Err(MarketError::ImproperList {
                reason: format!("{id} is not an offer on this request"),
            });
        };
        if !offer.is_open() {
            return Err(MarketError::ImproperList {
                reason: format!("{id} is not open"),
            });
        }
    }
    Ok(proposed.to_vec())
}
