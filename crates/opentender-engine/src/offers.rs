//! Offer registry.
//!
//! Stores every offer of one market instance. The id counter is market-wide
//! and independent of the request counter. A per-request index keeps offers
//! in submission order, which is the order `get_request_offer_ids` must
//! present. Offers are never deleted — a request deletion leaves its offers
//! behind as queryable orphans.

use std::collections::{BTreeMap, HashMap};

use opentender_types::{
    ActorId, ExtraData, MarketError, Offer, OfferId, OfferStage, RequestId, Result,
};
use tracing::debug;

/// Lifecycle and storage of [`Offer`] entities.
#[derive(Debug, Clone)]
pub struct OfferRegistry<X: ExtraData> {
    entries: BTreeMap<OfferId, Offer<X>>,
    /// Submission-order index per request.
    by_request: HashMap<RequestId, Vec<OfferId>>,
    next_id: OfferId,
}

impl<X: ExtraData> OfferRegistry<X> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            by_request: HashMap::new(),
            next_id: OfferId::first(),
        }
    }

    /// Allocate the next id and store a new pending offer.
    pub fn create(&mut self, request_id: RequestId, maker: ActorId, now: u64) -> OfferId {
        let id = self.next_id;
        self.next_id = id.next();
        self.entries.insert(id, Offer::new(id, request_id, maker, now));
        self.by_request.entry(request_id).or_default().push(id);
        debug!(%id, %request_id, %maker, "offer created");
        id
    }

    pub fn get(&self, id: OfferId) -> Result<&Offer<X>> {
        self.entries.get(&id).ok_or(MarketError::UnknownOffer(id))
    }

    #[must_use]
    pub fn is_defined(&self, id: OfferId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Attach the domain payload. Allowed exactly once, while pending;
    /// moves the offer to the open stage. Returns the array encoding of the
    /// payload for the notification event.
    pub fn set_extra(&mut self, id: OfferId, extra: X) -> Result<Vec<u64>> {
        let offer = self.get_mut(id)?;
        if offer.stage != OfferStage::Pending {
            return Err(MarketError::OfferNotPending(id));
        }
        let values = extra.encode();
        offer.extra = Some(extra);
        offer.stage = OfferStage::Open;
        debug!(%id, "offer extra set, offer open");
        Ok(values)
    }

    /// Move the offer to the withdrawn stage. Terminal.
    pub fn withdraw(&mut self, id: OfferId) -> Result<()> {
        let offer = self.get_mut(id)?;
        if offer.stage == OfferStage::Withdrawn {
            return Err(MarketError::OfferNotPending(id));
        }
        offer.stage = OfferStage::Withdrawn;
        debug!(%id, "offer withdrawn");
        Ok(())
    }

    /// Offer ids for a request, in submission order. Empty for a request
    /// with no offers.
    #[must_use]
    pub fn ids_for(&self, request_id: RequestId) -> &[OfferId] {
        self.by_request.get(&request_id).map_or(&[], Vec::as_slice)
    }

    /// All offers of a request, in submission order.
    #[must_use]
    pub fn offers_for(&self, request_id: RequestId) -> Vec<&Offer<X>> {
        self.ids_for(request_id)
            .iter()
            .filter_map(|id| self.entries.get(id))
            .collect()
    }

    /// Whether `maker` already has a non-withdrawn offer on `request_id`.
    #[must_use]
    pub fn has_live_offer(&self, request_id: RequestId, maker: ActorId) -> bool {
        self.offers_for(request_id)
            .iter()
            .any(|offer| offer.maker == maker && offer.is_live())
    }

    fn get_mut(&mut self, id: OfferId) -> Result<&mut Offer<X>> {
        self.entries.get_mut(&id).ok_or(MarketError::UnknownOffer(id))
    }
}

impl<X: ExtraData> Default for OfferRegistry<X> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentender_types::StatusCode;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct Price {
        amount: u64,
    }

    impl ExtraData for Price {
        const FIELD_COUNT: usize = 1;

        fn decode(values: &[u64]) -> Result<Self> {
            opentender_types::extra::expect_arity(values, Self::FIELD_COUNT)?;
            Ok(Self { amount: values[0] })
        }

        fn encode(&self) -> Vec<u64> {
            vec![self.amount]
        }
    }

    const NOW: u64 = 1_700_000_000;

    #[test]
    fn ids_are_dense_and_independent_of_requests() {
        let mut registry: OfferRegistry<Price> = OfferRegistry::new();
        assert_eq!(registry.create(RequestId(3), ActorId::random(), NOW), OfferId(1));
        assert_eq!(registry.create(RequestId(7), ActorId::random(), NOW), OfferId(2));
        assert_eq!(registry.create(RequestId(3), ActorId::random(), NOW), OfferId(3));
    }

    #[test]
    fn per_request_index_preserves_submission_order() {
        let mut registry: OfferRegistry<Price> = OfferRegistry::new();
        registry.create(RequestId(3), ActorId::random(), NOW);
        registry.create(RequestId(1), ActorId::random(), NOW);
        registry.create(RequestId(3), ActorId::random(), NOW);
        registry.create(RequestId(3), ActorId::random(), NOW);

        assert_eq!(registry.ids_for(RequestId(3)), &[OfferId(1), OfferId(3), OfferId(4)]);
        assert_eq!(registry.ids_for(RequestId(1)), &[OfferId(2)]);
        assert!(registry.ids_for(RequestId(9)).is_empty());
    }

    #[test]
    fn extra_opens_the_offer_once() {
        let mut registry: OfferRegistry<Price> = OfferRegistry::new();
        let maker = ActorId::random();
        let id = registry.create(RequestId(1), maker, NOW);

        let values = registry.set_extra(id, Price { amount: 252 }).unwrap();
        assert_eq!(values, vec![252]);
        assert_eq!(registry.get(id).unwrap().stage, OfferStage::Open);

        let err = registry.set_extra(id, Price { amount: 254 }).unwrap_err();
        assert_eq!(err.status(), StatusCode::NotPending);
    }

    #[test]
    fn withdrawal_is_terminal() {
        let mut registry: OfferRegistry<Price> = OfferRegistry::new();
        let id = registry.create(RequestId(1), ActorId::random(), NOW);

        registry.withdraw(id).unwrap();
        assert_eq!(registry.get(id).unwrap().stage, OfferStage::Withdrawn);

        let err = registry.withdraw(id).unwrap_err();
        assert_eq!(err.status(), StatusCode::NotPending);
    }

    #[test]
    fn live_offer_lookup_ignores_withdrawn() {
        let mut registry: OfferRegistry<Price> = OfferRegistry::new();
        let maker = ActorId::random();
        let id = registry.create(RequestId(1), maker, NOW);
        assert!(registry.has_live_offer(RequestId(1), maker));
        assert!(!registry.has_live_offer(RequestId(1), ActorId::random()));
        assert!(!registry.has_live_offer(RequestId(2), maker));

        registry.withdraw(id).unwrap();
        assert!(!registry.has_live_offer(RequestId(1), maker));
    }

    #[test]
    fn unknown_ids_are_reported() {
        let registry: OfferRegistry<Price> = OfferRegistry::new();
        assert!(!registry.is_defined(OfferId(22)));
        assert_eq!(registry.get(OfferId(22)).unwrap_err().status(), StatusCode::UndefinedId);
    }
}
