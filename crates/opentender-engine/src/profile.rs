//! The market-profile seam.
//!
//! Concrete markets differ in four things only: the shape of the request
//! payload, the shape of the offer payload, a handful of behavioral flags,
//! and how a decision is reached. Everything else — registries, access
//! control, id allocation, events, check ordering — is the engine's and
//! identical across markets. A profile implements this trait; the engine
//! does the rest.

use opentender_types::{ExtraData, InterfaceGroup, Offer, OfferId, Request, Result};

/// Outcome of a profile's decision strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Record these offers as the accepted set and close the request.
    Accepted(Vec<OfferId>),
    /// Nothing could be selected; leave the request untouched.
    NotMade,
}

/// Per-market configuration and strategy.
pub trait MarketProfile: Send + Sync + 'static {
    /// Domain payload attached to requests.
    type RequestExtra: ExtraData;
    /// Domain payload attached to offers.
    type OfferExtra: ExtraData;

    /// Reverse-DNS identifier of the market type.
    fn type_id(&self) -> &'static str;

    /// The capability groups this market advertises. [`InterfaceGroup::Discovery`]
    /// is implied and need not be listed.
    fn interfaces(&self) -> &'static [InterfaceGroup];

    /// Whether any actor may submit requests. When `false`, request
    /// submission requires manager or owner privilege.
    fn open_submission(&self) -> bool {
        true
    }

    /// Whether a maker is limited to one live offer per request.
    fn one_offer_per_maker(&self) -> bool {
        false
    }

    /// Choose the accepted offers for `request`.
    ///
    /// `offers` holds every offer linked to the request, in submission
    /// order, withdrawn ones included — the strategy sees the same snapshot
    /// the registries hold. `proposed` is the caller-supplied list; a
    /// strategy may take it as authoritative (validated) or ignore it and
    /// select internally. Returning an error rejects the call with no state
    /// change; returning [`Selection::NotMade`] ends the call successfully
    /// without recording anything.
    fn select_offers(
        &self,
        request: &Request<Self::RequestExtra>,
        offers: &[&Offer<Self::OfferExtra>],
        proposed: &[OfferId],
    ) -> Result<Selection>;
}
