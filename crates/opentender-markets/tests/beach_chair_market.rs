//! Beach-chair market integration suite.
//!
//! The beach-chair profile is the strict one: array-encoded payloads, one
//! live offer per maker per request, and a manager-supplied accepted list
//! that the engine validates entry by entry.

use opentender_engine::{ManualClock, Market};
use opentender_markets::{BeachChairMarket, BeachChairOfferExtra, BeachChairRequestExtra};
use opentender_types::{
    ActorId, InterfaceGroup, MarketEvent, OfferId, OfferStage, RequestId, RequestStage, StatusCode,
};

const NOW: u64 = 1_700_000_000;
const DEADLINE: u64 = 2_000_000_000;

struct Deployment {
    market: Market<BeachChairMarket>,
    owner: ActorId,
}

fn deploy() -> Deployment {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    let owner = ActorId::random();
    let clock = ManualClock::new(NOW);
    let market = Market::with_clock(BeachChairMarket, owner, Box::new(clock));
    Deployment { market, owner }
}

#[test]
fn owner_and_managers() {
    let mut d = deploy();
    let [m1, m2, m3] = [ActorId::random(), ActorId::random(), ActorId::random()];

    assert_eq!(d.market.get_market_information().unwrap().owner, d.owner);

    assert!(d.market.add_manager(d.owner, m1).is_success());
    assert!(d.market.add_manager(d.owner, m2).is_success());
    assert!(d.market.add_manager(d.owner, d.owner).is_success());
    assert!(d.market.add_manager(d.owner, m3).is_success());
    assert!(d.market.revoke_manager(d.owner, m1).is_success());
    assert!(d.market.revoke_manager(d.owner, m3).is_success());
    assert!(d.market.add_manager(d.owner, m1).is_success());

    assert!(d.market.change_owner(d.owner, m3).is_success());
    assert_eq!(d.market.get_market_information().unwrap().owner, m3);
    assert!(d.market.change_owner(m3, d.owner).is_success());
    assert_eq!(d.market.get_market_information().unwrap().owner, d.owner);
}

#[test]
#[allow(clippy::too_many_lines)]
fn requests_and_offers() {
    let mut d = deploy();
    let renter = d.owner;
    let [s1, s2, s3] = [ActorId::random(), ActorId::random(), ActorId::random()];

    let r1 = d.market.submit_request(renter, DEADLINE).unwrap();
    assert_eq!(r1, RequestId(1));
    assert_eq!(d.market.get_request(r1).unwrap().maker, renter);

    assert!(d.market.submit_request_array_extra(renter, r1, &[20, 20_180_809]).is_success());
    let extra = d.market.get_request_extra(r1).unwrap();
    assert_eq!(extra.quantity, 20);
    assert_eq!(extra.date, 20_180_809);

    let r2 = d.market.submit_request(renter, DEADLINE).unwrap();
    assert!(d.market.submit_request_array_extra(renter, r2, &[45, 20_191_111]).is_success());
    let r3 = d.market.submit_request(renter, DEADLINE).unwrap();
    assert!(d.market.submit_request_array_extra(renter, r3, &[100, 20_180_927]).is_success());

    assert!(d.market.close_request(renter, r2).is_success());
    assert_eq!(d.market.get_open_request_identifiers().unwrap(), vec![r1, r3]);
    assert!(d.market.is_request_defined(r2).unwrap());
    assert!(!d.market.is_request_defined(RequestId(8)).unwrap());

    let view = d.market.get_request(r3).unwrap();
    assert_eq!(view.deadline, DEADLINE);
    assert_eq!(view.stage, RequestStage::Open);

    // Offers: four on request 3 (one per supplier), one on request 1.
    let o1 = d.market.submit_offer(s1, r3).unwrap();
    assert_eq!(o1, OfferId(1));
    assert_eq!(
        d.market.take_events().last(),
        Some(&MarketEvent::OfferAdded { offer: o1, request: r3, maker: s1 })
    );
    assert!(d.market.submit_offer_array_extra(s1, o1, &[83, 1200]).is_success());
    let extra = d.market.get_offer_extra(o1).unwrap();
    assert_eq!((extra.quantity, extra.total_price), (83, 1200));

    let o2 = d.market.submit_offer(s2, r3).unwrap();
    assert!(d.market.submit_offer_array_extra(s2, o2, &[13, 250]).is_success());
    let o3 = d.market.submit_offer(s3, r3).unwrap();
    assert!(d.market.submit_offer_array_extra(s3, o3, &[25, 500]).is_success());
    let o4 = d.market.submit_offer(renter, r3).unwrap();
    assert!(d.market.submit_offer_array_extra(renter, o4, &[85, 1234]).is_success());
    let o5 = d.market.submit_offer(s1, r1).unwrap();
    assert!(d.market.submit_offer_array_extra(s1, o5, &[34, 323]).is_success());

    assert!(d.market.is_offer_defined(o2).unwrap());
    assert!(!d.market.is_offer_defined(OfferId(22)).unwrap());

    let view = d.market.get_offer(o2).unwrap();
    assert_eq!(view.request_id, r3);
    assert_eq!(view.maker, s2);
    assert_eq!(view.stage, OfferStage::Open);
    let extra = d.market.get_offer_extra(o2).unwrap();
    assert_eq!((extra.quantity, extra.total_price), (13, 250));

    assert_eq!(d.market.get_request_offer_ids(r3).unwrap(), vec![o1, o2, o3, o4]);

    // Explicit decision: three partial offers cover the block together.
    let accepted = d.market.decide_request(renter, r3, &[o1, o2, o4]).unwrap();
    assert_eq!(accepted, vec![o1, o2, o4]);
    assert!(d.market.is_request_decided(r3).unwrap());
    assert!(!d.market.is_request_decided(r2).unwrap());
    assert_eq!(d.market.get_request_decision(r3).unwrap(), vec![o1, o2, o4]);

    assert_eq!(d.market.get_closed_request_identifiers().unwrap(), vec![r2, r3]);
    assert!(d.market.delete_request(renter, r2).is_success());
    assert_eq!(d.market.get_closed_request_identifiers().unwrap(), vec![r3]);
}

#[test]
fn status_codes() {
    let mut d = deploy();
    let stranger = ActorId::random();
    let supplier = ActorId::random();

    let response = d.market.add_manager(stranger, ActorId::random());
    assert_eq!(response.status, StatusCode::AccessDenied);

    assert_eq!(d.market.get_request(RequestId(56)).status, StatusCode::UndefinedId);

    let expired = d.market.submit_request(d.owner, 50).unwrap();
    let response = d.market.submit_offer(supplier, expired);
    assert_eq!(response.status, StatusCode::DeadlinePassed);

    let pending = d.market.submit_request(d.owner, DEADLINE).unwrap();
    let response = d.market.submit_offer(supplier, pending);
    assert_eq!(response.status, StatusCode::RequestNotOpen);

    // An open request for the offer-side checks.
    let open = d.market.submit_request(d.owner, DEADLINE).unwrap();
    assert!(d.market.submit_request_array_extra(d.owner, open, &[20, 20_200_101]).is_success());

    let offer = d.market.submit_offer(d.owner, open).unwrap();
    assert!(d.market.submit_offer_array_extra(d.owner, offer, &[11, 111]).is_success());
    let response = d.market.submit_offer_array_extra(d.owner, offer, &[12, 112]);
    assert_eq!(response.status, StatusCode::NotPending);

    assert_eq!(d.market.get_request_decision(open).status, StatusCode::RequestNotDecided);

    let response = d.market.delete_request(d.owner, open);
    assert_eq!(response.status, StatusCode::RequestNotClosed);

    // One live offer per maker per request.
    let second = d.market.submit_offer(supplier, open).unwrap();
    assert!(d.market.submit_offer_array_extra(supplier, second, &[9, 90]).is_success());
    let response = d.market.submit_offer(supplier, open);
    assert_eq!(response.status, StatusCode::AlreadyOffered);

    // The decision list is validated before anything changes.
    let foreign_request = d.market.submit_request(d.owner, DEADLINE).unwrap();
    assert!(
        d.market
            .submit_request_array_extra(d.owner, foreign_request, &[5, 20_200_102])
            .is_success()
    );
    let foreign_offer = d.market.submit_offer(ActorId::random(), foreign_request).unwrap();

    let response = d.market.decide_request(d.owner, open, &[offer, offer]);
    assert_eq!(response.status, StatusCode::ImproperList);

    let response = d.market.decide_request(d.owner, open, &[foreign_offer, offer]);
    assert_eq!(response.status, StatusCode::ImproperList);

    assert!(!d.market.is_request_decided(open).unwrap());

    let accepted = d.market.decide_request(d.owner, open, &[offer, second]).unwrap();
    assert_eq!(accepted, vec![offer, second]);
}

#[test]
fn withdrawal_frees_the_single_offer_slot() {
    let mut d = deploy();
    let supplier = ActorId::random();

    let r = d.market.submit_request(d.owner, DEADLINE).unwrap();
    assert!(d.market.submit_request_array_extra(d.owner, r, &[10, 20_200_601]).is_success());

    let first = d.market.submit_offer(supplier, r).unwrap();
    let response = d.market.submit_offer(supplier, r);
    assert_eq!(response.status, StatusCode::AlreadyOffered);

    assert!(d.market.withdraw_offer(supplier, first).is_success());
    // The withdrawn offer no longer counts against its maker.
    let second = d.market.submit_offer(supplier, r);
    assert!(second.is_success());
}

#[test]
fn empty_decision_lists_are_rejected() {
    let mut d = deploy();
    let r = d.market.submit_request(d.owner, DEADLINE).unwrap();
    assert!(d.market.submit_request_array_extra(d.owner, r, &[10, 20_200_601]).is_success());

    let response = d.market.decide_request(d.owner, r, &[]);
    assert_eq!(response.status, StatusCode::ImproperList);
    assert!(!d.market.is_request_decided(r).unwrap());
    assert_eq!(d.market.get_request(r).unwrap().stage, RequestStage::Open);
}

#[test]
fn type_and_capabilities() {
    let d = deploy();
    assert_eq!(d.market.get_type().unwrap(), "io.opentender.markets.beach-chair");

    for group in [
        InterfaceGroup::Discovery,
        InterfaceGroup::MarketPlace,
        InterfaceGroup::ManageableMarketPlace,
        InterfaceGroup::MultiManager,
        InterfaceGroup::ArrayExtraData,
    ] {
        assert!(d.market.supports_interface(group.selector()), "missing {group}");
    }
}
