//! The market facade.
//!
//! [`Market`] is the public operation surface of one deployed market
//! instance. Every call takes the acting identity explicitly, runs its
//! checks in a fixed order, and answers with the uniform
//! `(status, payload)` envelope; mutating calls additionally append their
//! notification events to the instance journal.
//!
//! Check ordering is part of the external contract:
//!
//! - privilege is checked before existence (`AccessDenied` beats
//!   `UndefinedId` on manager-gated calls),
//! - existence is checked before any state-dependent condition,
//! - `submit_offer` checks the deadline before the request stage.
//!
//! A failed call leaves all state untouched.

use opentender_types::{
    ActorId, ExtraData, InterfaceGroup, InterfaceId, MarketError, MarketEvent, MarketId, OfferId,
    OfferView, RequestId, RequestView, Response, Result, StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::access::AccessControl;
use crate::clock::{Clock, SystemClock};
use crate::offers::OfferRegistry;
use crate::profile::{MarketProfile, Selection};
use crate::requests::RequestRegistry;

/// Payload of `get_market_information`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketInfo {
    pub owner: ActorId,
    pub instance: MarketId,
}

/// One deployed market instance: profile + access control + registries.
pub struct Market<P: MarketProfile> {
    profile: P,
    instance: MarketId,
    access: AccessControl,
    requests: RequestRegistry<P::RequestExtra>,
    offers: OfferRegistry<P::OfferExtra>,
    clock: Box<dyn Clock>,
    events: Vec<MarketEvent>,
}

impl<P: MarketProfile> Market<P> {
    /// Deploy a fresh instance owned by `owner`, on the system clock.
    #[must_use]
    pub fn new(profile: P, owner: ActorId) -> Self {
        Self::with_clock(profile, owner, Box::new(SystemClock))
    }

    /// Deploy a fresh instance with an injected time source.
    #[must_use]
    pub fn with_clock(profile: P, owner: ActorId, clock: Box<dyn Clock>) -> Self {
        let instance = MarketId::new();
        info!(%instance, %owner, type_id = profile.type_id(), "market deployed");
        Self {
            profile,
            instance,
            access: AccessControl::new(owner),
            requests: RequestRegistry::new(),
            offers: OfferRegistry::new(),
            clock,
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn instance_id(&self) -> MarketId {
        self.instance
    }

    /// Drain the notification journal: every event emitted since the last
    /// drain, in emission order.
    pub fn take_events(&mut self) -> Vec<MarketEvent> {
        std::mem::take(&mut self.events)
    }

    // =================================================================
    // Capability discovery
    // =================================================================

    /// The advertised capability groups, discovery first.
    #[must_use]
    pub fn interfaces(&self) -> Vec<InterfaceGroup> {
        let mut groups = vec![InterfaceGroup::Discovery];
        for &group in self.profile.interfaces() {
            if group != InterfaceGroup::Discovery {
                groups.push(group);
            }
        }
        groups
    }

    /// Whether this instance supports the capability group named by
    /// `selector`.
    #[must_use]
    pub fn supports_interface(&self, selector: InterfaceId) -> bool {
        self.interfaces()
            .iter()
            .any(|group| group.selector() == selector)
    }

    /// The market type identifier.
    pub fn get_type(&self) -> Response<String> {
        Response::ok(self.profile.type_id().to_string())
    }

    // =================================================================
    // Ownership & managers
    // =================================================================

    pub fn get_market_information(&self) -> Response<MarketInfo> {
        Response::ok(MarketInfo {
            owner: self.access.owner(),
            instance: self.instance,
        })
    }

    pub fn add_manager(&mut self, caller: ActorId, actor: ActorId) -> Response<()> {
        match self.access.add_manager(caller, actor) {
            Ok(()) => self.succeed((), MarketEvent::ManagerAdded { actor }),
            Err(err) => self.fail(&err),
        }
    }

    pub fn revoke_manager(&mut self, caller: ActorId, actor: ActorId) -> Response<()> {
        match self.access.revoke_manager(caller, actor) {
            Ok(_was_member) => self.succeed((), MarketEvent::ManagerRevoked { actor }),
            Err(err) => self.fail(&err),
        }
    }

    pub fn change_owner(&mut self, caller: ActorId, new_owner: ActorId) -> Response<()> {
        match self.access.change_owner(caller, new_owner) {
            Ok(previous) => self.succeed((), MarketEvent::OwnerChanged { previous, new_owner }),
            Err(err) => self.fail(&err),
        }
    }

    // =================================================================
    // Request lifecycle
    // =================================================================

    pub fn submit_request(&mut self, caller: ActorId, deadline: u64) -> Response<RequestId> {
        match self.try_submit_request(caller, deadline) {
            Ok(id) => self.succeed(id, MarketEvent::RequestAdded { request: id, deadline }),
            Err(err) => self.fail(&err),
        }
    }

    fn try_submit_request(&mut self, caller: ActorId, deadline: u64) -> Result<RequestId> {
        if !self.profile.open_submission() && !self.access.is_privileged(caller) {
            return Err(MarketError::AccessDenied { actor: caller });
        }
        let now = self.clock.now();
        Ok(self.requests.create(caller, deadline, now))
    }

    /// Attach the typed request payload. Manager/owner-gated.
    pub fn submit_request_extra(
        &mut self,
        caller: ActorId,
        request_id: RequestId,
        extra: P::RequestExtra,
    ) -> Response<()> {
        match self.try_submit_request_extra(caller, request_id, extra) {
            Ok(values) => {
                self.succeed((), MarketEvent::RequestExtraAdded { request: request_id, values })
            }
            Err(err) => self.fail(&err),
        }
    }

    /// Array-encoded variant of [`Market::submit_request_extra`];
    /// semantically identical.
    pub fn submit_request_array_extra(
        &mut self,
        caller: ActorId,
        request_id: RequestId,
        values: &[u64],
    ) -> Response<()> {
        match P::RequestExtra::decode(values)
            .and_then(|extra| self.try_submit_request_extra(caller, request_id, extra))
        {
            Ok(values) => {
                self.succeed((), MarketEvent::RequestExtraAdded { request: request_id, values })
            }
            Err(err) => self.fail(&err),
        }
    }

    fn try_submit_request_extra(
        &mut self,
        caller: ActorId,
        request_id: RequestId,
        extra: P::RequestExtra,
    ) -> Result<Vec<u64>> {
        self.require_privileged(caller)?;
        self.requests.set_extra(request_id, extra)
    }

    pub fn close_request(&mut self, caller: ActorId, request_id: RequestId) -> Response<()> {
        let result = self
            .require_privileged(caller)
            .and_then(|()| self.requests.close(request_id));
        match result {
            Ok(()) => self.succeed((), MarketEvent::RequestClosed { request: request_id }),
            Err(err) => self.fail(&err),
        }
    }

    pub fn delete_request(&mut self, caller: ActorId, request_id: RequestId) -> Response<()> {
        let result = self
            .require_privileged(caller)
            .and_then(|()| self.requests.delete(request_id));
        match result {
            Ok(()) => self.succeed((), MarketEvent::RequestDeleted { request: request_id }),
            Err(err) => self.fail(&err),
        }
    }

    /// Decide a request. Manager/owner-gated. The profile's strategy
    /// receives the proposed list and the request's offers; it may validate
    /// the list or select internally. A recorded decision closes the
    /// request; a successful call that selects nothing changes nothing and
    /// carries an empty payload.
    pub fn decide_request(
        &mut self,
        caller: ActorId,
        request_id: RequestId,
        proposed: &[OfferId],
    ) -> Response<Vec<OfferId>> {
        match self.try_decide_request(caller, request_id, proposed) {
            Ok(Some(accepted)) => {
                info!(%request_id, accepted = accepted.len(), "decision recorded");
                self.succeed(
                    accepted.clone(),
                    MarketEvent::RequestDecided { request: request_id, accepted },
                )
            }
            Ok(None) => {
                debug!(%request_id, "no offer selected, request left undecided");
                self.events.push(MarketEvent::Status(StatusCode::Success));
                Response::ok_empty()
            }
            Err(err) => self.fail(&err),
        }
    }

    fn try_decide_request(
        &mut self,
        caller: ActorId,
        request_id: RequestId,
        proposed: &[OfferId],
    ) -> Result<Option<Vec<OfferId>>> {
        self.require_privileged(caller)?;
        let selection = {
            let request = self.requests.get(request_id)?;
            if request.is_decided() {
                return Err(MarketError::AlreadyDecided(request_id));
            }
            let offers = self.offers.offers_for(request_id);
            self.profile.select_offers(request, &offers, proposed)?
        };
        match selection {
            Selection::Accepted(accepted) => {
                self.requests.record_decision(request_id, accepted.clone())?;
                Ok(Some(accepted))
            }
            Selection::NotMade => Ok(None),
        }
    }

    // =================================================================
    // Request read accessors
    // =================================================================

    pub fn get_open_request_identifiers(&self) -> Response<Vec<RequestId>> {
        Response::ok(self.requests.open_ids())
    }

    pub fn get_closed_request_identifiers(&self) -> Response<Vec<RequestId>> {
        Response::ok(self.requests.closed_ids())
    }

    pub fn is_request_defined(&self, request_id: RequestId) -> Response<bool> {
        Response::ok(self.requests.is_defined(request_id))
    }

    pub fn get_request(&self, request_id: RequestId) -> Response<RequestView> {
        self.requests.get(request_id).map(|request| request.view()).into()
    }

    /// The request's domain payload. Success with an empty payload when the
    /// payload has not been submitted yet.
    pub fn get_request_extra(&self, request_id: RequestId) -> Response<P::RequestExtra> {
        match self.requests.get(request_id) {
            Ok(request) => match &request.extra {
                Some(extra) => Response::ok(extra.clone()),
                None => Response::ok_empty(),
            },
            Err(err) => Response::fail(err.status()),
        }
    }

    pub fn get_request_offer_ids(&self, request_id: RequestId) -> Response<Vec<OfferId>> {
        self.requests
            .get(request_id)
            .map(|_| self.offers.ids_for(request_id).to_vec())
            .into()
    }

    pub fn is_request_decided(&self, request_id: RequestId) -> Response<bool> {
        self.requests.get(request_id).map(|request| request.is_decided()).into()
    }

    pub fn get_request_decision(&self, request_id: RequestId) -> Response<Vec<OfferId>> {
        let result = self.requests.get(request_id).and_then(|request| {
            request
                .decision
                .clone()
                .ok_or(MarketError::RequestNotDecided(request_id))
        });
        result.into()
    }

    // =================================================================
    // Offer lifecycle
    // =================================================================

    pub fn submit_offer(&mut self, caller: ActorId, request_id: RequestId) -> Response<OfferId> {
        match self.try_submit_offer(caller, request_id) {
            Ok(id) => self.succeed(
                id,
                MarketEvent::OfferAdded { offer: id, request: request_id, maker: caller },
            ),
            Err(err) => self.fail(&err),
        }
    }

    fn try_submit_offer(&mut self, caller: ActorId, request_id: RequestId) -> Result<OfferId> {
        let now = self.clock.now();
        let request = self.requests.get(request_id)?;
        if now >= request.deadline {
            return Err(MarketError::DeadlinePassed { deadline: request.deadline, now });
        }
        if !request.accepts_offers() {
            return Err(MarketError::RequestNotOpen(request_id));
        }
        if self.profile.one_offer_per_maker() && self.offers.has_live_offer(request_id, caller) {
            return Err(MarketError::AlreadyOffered { request: request_id, maker: caller });
        }
        Ok(self.offers.create(request_id, caller, now))
    }

    /// Attach the typed offer payload. Maker-only.
    pub fn submit_offer_extra(
        &mut self,
        caller: ActorId,
        offer_id: OfferId,
        extra: P::OfferExtra,
    ) -> Response<()> {
        match self.try_submit_offer_extra(caller, offer_id, extra) {
            Ok(values) => {
                self.succeed((), MarketEvent::OfferExtraAdded { offer: offer_id, values })
            }
            Err(err) => self.fail(&err),
        }
    }

    /// Array-encoded variant of [`Market::submit_offer_extra`];
    /// semantically identical.
    pub fn submit_offer_array_extra(
        &mut self,
        caller: ActorId,
        offer_id: OfferId,
        values: &[u64],
    ) -> Response<()> {
        match P::OfferExtra::decode(values)
            .and_then(|extra| self.try_submit_offer_extra(caller, offer_id, extra))
        {
            Ok(values) => {
                self.succeed((), MarketEvent::OfferExtraAdded { offer: offer_id, values })
            }
            Err(err) => self.fail(&err),
        }
    }

    fn try_submit_offer_extra(
        &mut self,
        caller: ActorId,
        offer_id: OfferId,
        extra: P::OfferExtra,
    ) -> Result<Vec<u64>> {
        let (maker, request_id) = {
            let offer = self.offers.get(offer_id)?;
            (offer.maker, offer.request_id)
        };
        if maker != caller {
            return Err(MarketError::AccessDenied { actor: caller });
        }
        // The linked request must still be collecting: a request that
        // closed (or vanished) while the offer sat pending wins over the
        // pending check.
        let request_open = self
            .requests
            .get(request_id)
            .map(opentender_types::Request::accepts_offers)
            .unwrap_or(false);
        if !request_open {
            return Err(MarketError::RequestNotOpen(request_id));
        }
        self.offers.set_extra(offer_id, extra)
    }

    /// Withdraw an offer. Maker-only; impossible once the linked request
    /// has been decided.
    pub fn withdraw_offer(&mut self, caller: ActorId, offer_id: OfferId) -> Response<()> {
        match self.try_withdraw_offer(caller, offer_id) {
            Ok(()) => self.succeed((), MarketEvent::OfferWithdrawn { offer: offer_id }),
            Err(err) => self.fail(&err),
        }
    }

    fn try_withdraw_offer(&mut self, caller: ActorId, offer_id: OfferId) -> Result<()> {
        let (maker, request_id) = {
            let offer = self.offers.get(offer_id)?;
            (offer.maker, offer.request_id)
        };
        if maker != caller {
            return Err(MarketError::AccessDenied { actor: caller });
        }
        let decided = self
            .requests
            .get(request_id)
            .map(|request| request.is_decided())
            .unwrap_or(false);
        if decided {
            return Err(MarketError::AlreadyDecided(request_id));
        }
        self.offers.withdraw(offer_id)
    }

    // =================================================================
    // Offer read accessors
    // =================================================================

    pub fn is_offer_defined(&self, offer_id: OfferId) -> Response<bool> {
        Response::ok(self.offers.is_defined(offer_id))
    }

    pub fn get_offer(&self, offer_id: OfferId) -> Response<OfferView> {
        self.offers.get(offer_id).map(|offer| offer.view()).into()
    }

    /// The offer's domain payload. Success with an empty payload when the
    /// payload has not been submitted yet.
    pub fn get_offer_extra(&self, offer_id: OfferId) -> Response<P::OfferExtra> {
        match self.offers.get(offer_id) {
            Ok(offer) => match &offer.extra {
                Some(extra) => Response::ok(extra.clone()),
                None => Response::ok_empty(),
            },
            Err(err) => Response::fail(err.status()),
        }
    }

    // =================================================================
    // Internals
    // =================================================================

    fn require_privileged(&self, caller: ActorId) -> Result<()> {
        if self.access.is_privileged(caller) {
            Ok(())
        } else {
            Err(MarketError::AccessDenied { actor: caller })
        }
    }

    fn succeed<T>(&mut self, payload: T, event: MarketEvent) -> Response<T> {
        self.events.push(MarketEvent::Status(StatusCode::Success));
        self.events.push(event);
        Response::ok(payload)
    }

    fn fail<T>(&mut self, err: &MarketError) -> Response<T> {
        warn!(error = %err, status = %err.status(), "call rejected");
        self.events.push(MarketEvent::Status(err.status()));
        Response::fail(err.status())
    }
}
