//! Request registry.
//!
//! Stores every request of one market instance, keyed by its dense id.
//! `BTreeMap` keeps the table in id order, which is exactly the order the
//! identifier listings must present. Deletion removes the record; the id
//! counter never moves backwards, so a deleted id is never reissued.

use std::collections::BTreeMap;

use opentender_types::{
    ActorId, ExtraData, MarketError, OfferId, Request, RequestId, RequestStage, Result,
};
use tracing::{debug, info};

/// Lifecycle and storage of [`Request`] entities.
#[derive(Debug, Clone)]
pub struct RequestRegistry<X: ExtraData> {
    entries: BTreeMap<RequestId, Request<X>>,
    next_id: RequestId,
}

impl<X: ExtraData> RequestRegistry<X> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: RequestId::first(),
        }
    }

    /// Allocate the next id and store a new pending request.
    pub fn create(&mut self, maker: ActorId, deadline: u64, now: u64) -> RequestId {
        let id = self.next_id;
        self.next_id = id.next();
        self.entries.insert(id, Request::new(id, maker, deadline, now));
        debug!(%id, %maker, deadline, "request created");
        id
    }

    pub fn get(&self, id: RequestId) -> Result<&Request<X>> {
        self.entries.get(&id).ok_or(MarketError::UnknownRequest(id))
    }

    #[must_use]
    pub fn is_defined(&self, id: RequestId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Attach the domain payload. Allowed exactly once, while pending;
    /// moves the request to the open stage. Returns the array encoding of
    /// the payload for the notification event.
    pub fn set_extra(&mut self, id: RequestId, extra: X) -> Result<Vec<u64>> {
        let request = self.get_mut(id)?;
        if !request.accepts_extra() {
            return Err(MarketError::RequestNotPending(id));
        }
        let values = extra.encode();
        request.extra = Some(extra);
        request.stage = RequestStage::Open;
        debug!(%id, "request extra set, request open");
        Ok(values)
    }

    /// Move the request to the closed stage. Pending and open requests may
    /// be closed; re-closing is rejected.
    pub fn close(&mut self, id: RequestId) -> Result<()> {
        let request = self.get_mut(id)?;
        if request.is_closed() {
            return Err(MarketError::RequestNotOpen(id));
        }
        request.stage = RequestStage::Closed;
        info!(%id, "request closed");
        Ok(())
    }

    /// Record the accepted-offer set. A request is decided at most once;
    /// recording closes it if it was not closed already.
    pub fn record_decision(&mut self, id: RequestId, accepted: Vec<OfferId>) -> Result<()> {
        let request = self.get_mut(id)?;
        if request.is_decided() {
            return Err(MarketError::AlreadyDecided(id));
        }
        request.decision = Some(accepted);
        request.stage = RequestStage::Closed;
        info!(%id, "request decided");
        Ok(())
    }

    /// Remove a closed request from the registry.
    pub fn delete(&mut self, id: RequestId) -> Result<()> {
        let request = self.get(id)?;
        if !request.is_closed() {
            return Err(MarketError::RequestNotClosed(id));
        }
        self.entries.remove(&id);
        info!(%id, "request deleted");
        Ok(())
    }

    /// Ids of requests that have not been closed yet (pending or open),
    /// ascending.
    #[must_use]
    pub fn open_ids(&self) -> Vec<RequestId> {
        self.entries
            .values()
            .filter(|request| !request.is_closed())
            .map(|request| request.id)
            .collect()
    }

    /// Ids of closed requests, ascending.
    #[must_use]
    pub fn closed_ids(&self) -> Vec<RequestId> {
        self.entries
            .values()
            .filter(|request| request.is_closed())
            .map(|request| request.id)
            .collect()
    }

    fn get_mut(&mut self, id: RequestId) -> Result<&mut Request<X>> {
        self.entries.get_mut(&id).ok_or(MarketError::UnknownRequest(id))
    }
}

impl<X: ExtraData> Default for RequestRegistry<X> {
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
    struct Note {
        value: u64,
    }

    impl ExtraData for Note {
        const FIELD_COUNT: usize = 1;

        fn decode(values: &[u64]) -> Result<Self> {
            opentender_types::extra::expect_arity(values, Self::FIELD_COUNT)?;
            Ok(Self { value: values[0] })
        }

        fn encode(&self) -> Vec<u64> {
            vec![self.value]
        }
    }

    const NOW: u64 = 1_700_000_000;
    const DEADLINE: u64 = 2_000_000_000;

    fn registry_with(count: u64) -> RequestRegistry<Note> {
        let mut registry = RequestRegistry::new();
        for _ in 0..count {
            registry.create(ActorId::random(), DEADLINE, NOW);
        }
        registry
    }

    #[test]
    fn ids_are_dense_from_one() {
        let mut registry: RequestRegistry<Note> = RequestRegistry::new();
        assert_eq!(registry.create(ActorId::random(), DEADLINE, NOW), RequestId(1));
        assert_eq!(registry.create(ActorId::random(), DEADLINE, NOW), RequestId(2));
        assert_eq!(registry.create(ActorId::random(), DEADLINE, NOW), RequestId(3));
    }

    #[test]
    fn extra_opens_the_request_once() {
        let mut registry = registry_with(1);
        let values = registry.set_extra(RequestId(1), Note { value: 20 }).unwrap();
        assert_eq!(values, vec![20]);
        assert_eq!(registry.get(RequestId(1)).unwrap().stage, RequestStage::Open);

        let err = registry.set_extra(RequestId(1), Note { value: 45 }).unwrap_err();
        assert_eq!(err.status(), StatusCode::NotPending);
    }

    #[test]
    fn closing_works_from_pending_and_open_but_not_twice() {
        let mut registry = registry_with(2);
        registry.set_extra(RequestId(1), Note { value: 1 }).unwrap();

        registry.close(RequestId(1)).unwrap();
        registry.close(RequestId(2)).unwrap();

        let err = registry.close(RequestId(1)).unwrap_err();
        assert_eq!(err.status(), StatusCode::RequestNotOpen);

        // A closed request no longer accepts extra data.
        let err = registry.set_extra(RequestId(2), Note { value: 9 }).unwrap_err();
        assert_eq!(err.status(), StatusCode::NotPending);
    }

    #[test]
    fn decision_is_recorded_once_and_closes() {
        let mut registry = registry_with(1);
        registry.set_extra(RequestId(1), Note { value: 7 }).unwrap();
        registry.record_decision(RequestId(1), vec![OfferId(2)]).unwrap();

        let request = registry.get(RequestId(1)).unwrap();
        assert!(request.is_closed());
        assert_eq!(request.decision.as_deref(), Some(&[OfferId(2)][..]));

        let err = registry.record_decision(RequestId(1), vec![]).unwrap_err();
        assert_eq!(err.status(), StatusCode::RequestNotOpen);
    }

    #[test]
    fn deletion_requires_closed_and_erases() {
        let mut registry = registry_with(2);

        let err = registry.delete(RequestId(1)).unwrap_err();
        assert_eq!(err.status(), StatusCode::RequestNotClosed);

        registry.close(RequestId(1)).unwrap();
        registry.delete(RequestId(1)).unwrap();
        assert!(!registry.is_defined(RequestId(1)));
        assert_eq!(registry.get(RequestId(1)).unwrap_err().status(), StatusCode::UndefinedId);

        // The id is not reused.
        assert_eq!(registry.create(ActorId::random(), DEADLINE, NOW), RequestId(3));
    }

    #[test]
    fn listings_split_by_stage_ascending() {
        let mut registry = registry_with(3);
        registry.set_extra(RequestId(1), Note { value: 1 }).unwrap();
        registry.set_extra(RequestId(3), Note { value: 3 }).unwrap();
        registry.close(RequestId(2)).unwrap();

        assert_eq!(registry.open_ids(), vec![RequestId(1), RequestId(3)]);
        assert_eq!(registry.closed_ids(), vec![RequestId(2)]);

        registry.close(RequestId(3)).unwrap();
        assert_eq!(registry.closed_ids(), vec![RequestId(2), RequestId(3)]);

        registry.delete(RequestId(2)).unwrap();
        assert_eq!(registry.closed_ids(), vec![RequestId(3)]);
    }

    #[test]
    fn unknown_ids_are_reported() {
        let registry = registry_with(0);
        assert!(!registry.is_defined(RequestId(56)));
        assert_eq!(registry.get(RequestId(56)).unwrap_err().status(), StatusCode::UndefinedId);
    }
}
