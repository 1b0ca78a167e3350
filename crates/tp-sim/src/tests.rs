//! Integration tests for tp-sim.

use tp_core::{CarArrivalPolicy, CarId, LineId, PassengerId, SimConfig, SimRng, StationId, Step};
use tp_entity::{CarState, PassengerState};
use tp_topology::{Router, ShortestPathRouter, StationRef, Topology, TopologyBuilder, TopologySpec};

use crate::{EventCollector, Sim, SimBuilder, SimError, SimEvent, SpawnTarget};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Ring A - B - C - D - A.
fn ring() -> Topology {
    let mut b = TopologyBuilder::new();
    let ids: Vec<StationId> = ["A", "B", "C", "D"]
        .into_iter()
        .map(|n| b.add_station(n).unwrap())
        .collect();
    for i in 0..4 {
        b.add_line(ids[i], ids[(i + 1) % 4]).unwrap();
    }
    b.build()
}

/// Two components {P - Q} and {X - Y - Z}, plus isolated station I.
fn split() -> Topology {
    TopologySpec::from_json_str(
        r#"{
            "kind": "explicit",
            "stations": ["P", "Q", "X", "Y", "Z", "I"],
            "lines": [{"a": "P", "b": "Q"}, {"a": "X", "b": "Y"}, {"a": "Y", "b": "Z"}]
        }"#,
    )
    .unwrap()
    .build()
    .unwrap()
}

fn config(policy: CarArrivalPolicy) -> SimConfig {
    SimConfig {
        arrival_policy: policy,
        total_steps: 50,
        ..SimConfig::default()
    }
}

fn sim(topology: Topology, config: SimConfig) -> Sim<ShortestPathRouter, EventCollector> {
    SimBuilder::seeded(topology, config)
        .observer(EventCollector::new())
        .build()
        .unwrap()
}

fn route(names: &[&str]) -> SpawnTarget {
    SpawnTarget::Route(names.iter().map(|&n| StationRef::from(n)).collect())
}

fn to(name: &str) -> SpawnTarget {
    SpawnTarget::Destination(name.into())
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn zero_default_capacity_rejected() {
        let cfg = SimConfig { default_car_capacity: 0, ..SimConfig::default() };
        assert!(matches!(SimBuilder::seeded(ring(), cfg).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn seeded_router_draws_from_the_router_stream() {
        let grid = || TopologySpec::Grid { rows: 3, cols: 3 }.build().unwrap();
        let cfg = SimConfig { seed: 17, ..SimConfig::default() };
        let mut s = sim(grid(), cfg);

        let net = grid();
        let mut expected = ShortestPathRouter::with_rng(SimRng::new(17).child(SimRng::ROUTER_STREAM));
        for from in net.stations() {
            let id = s.spawn_car(from, SpawnTarget::Random).unwrap();
            let want = expected.random_route_from(&net, from).unwrap();
            assert_eq!(s.car(id).unwrap().route(), &want);
        }
    }

    #[test]
    fn new_sim_is_empty_and_quiescent() {
        let s = sim(ring(), SimConfig::default());
        assert_eq!(s.current_step(), Step::ZERO);
        assert!(s.registry().is_empty());
        assert!(s.is_quiescent());
        assert_eq!(s.topology().station_count(), 4);
    }
}

// ── Spawning ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod spawn_tests {
    use super::*;

    #[test]
    fn explicit_route_and_destination() {
        let mut s = sim(ring(), SimConfig::default());
        let c = s.spawn_car("A", route(&["A", "B", "C"])).unwrap();
        let p = s.spawn_passenger(StationId(3), to("B")).unwrap();
        assert_eq!(c, CarId(0));
        assert_eq!(p, PassengerId(0));

        let car = s.car(c).unwrap();
        assert_eq!(car.state(), CarState::Pending);
        assert_eq!(car.capacity(), 20);
        assert_eq!(car.destination(), StationId(2));

        let pass = s.passenger(p).unwrap();
        assert_eq!(pass.origin(), StationId(3));
        assert_eq!(pass.destination(), StationId(1));
        assert_eq!(pass.state(), PassengerState::Waiting);
        assert_eq!(pass.car(), None);

        assert_eq!(s.observer().of_kind("spawn").count(), 2);
    }

    #[test]
    fn unknown_stations_are_invalid() {
        let mut s = sim(ring(), SimConfig::default());
        assert!(matches!(s.spawn_car("nowhere", SpawnTarget::Random), Err(SimError::InvalidStation(_))));
        assert!(matches!(s.spawn_car(StationId(99), SpawnTarget::Random), Err(SimError::InvalidStation(_))));
        assert!(matches!(s.spawn_passenger("A", to("nope")), Err(SimError::InvalidStation(_))));
        assert!(matches!(s.spawn_car("A", route(&["A", "Zed"])), Err(SimError::InvalidStation(_))));
        assert!(s.registry().is_empty());
    }

    #[test]
    fn bad_explicit_routes_are_rejected() {
        let mut s = sim(ring(), SimConfig::default());
        // does not start at origin
        assert!(matches!(s.spawn_car("A", route(&["B", "C"])), Err(SimError::InvalidRoute(_))));
        // A and C are not adjacent on the ring
        assert!(matches!(s.spawn_car("A", route(&["A", "C"])), Err(SimError::InvalidRoute(_))));
        assert!(matches!(s.spawn_car("A", SpawnTarget::Route(vec![])), Err(SimError::InvalidRoute(_))));
        assert!(s.registry().is_empty());
    }

    #[test]
    fn unreachable_destination_fails_at_spawn() {
        let mut s = sim(split(), SimConfig::default());
        let err = s.spawn_passenger("P", to("Z")).err().unwrap();
        assert!(matches!(err, SimError::Unreachable { from: StationId(0), to: StationId(4) }));
        assert!(!err.is_fatal());
        assert!(matches!(s.spawn_car("X", to("Q")), Err(SimError::Unreachable { .. })));
        assert!(s.registry().is_empty());
    }

    #[test]
    fn random_from_isolated_station_has_no_route() {
        let mut s = sim(split(), SimConfig::default());
        assert!(matches!(s.spawn_car("I", SpawnTarget::Random), Err(SimError::NoRoute(StationId(5)))));
    }

    #[test]
    fn bulk_spawn_is_all_or_nothing() {
        let mut s = sim(split(), SimConfig::default());
        assert!(s.spawn_cars("I", SpawnTarget::Random, 3).is_err());
        assert!(s.registry().is_empty());

        let cars = s.spawn_cars("X", SpawnTarget::Random, 4).unwrap();
        assert_eq!(cars, vec![CarId(0), CarId(1), CarId(2), CarId(3)]);
        for &c in &cars {
            let dest = s.car(c).unwrap().destination();
            assert!(dest == StationId(3) || dest == StationId(4), "stays in X's component");
        }
        let ps = s.spawn_passengers("P", to("Q"), 2).unwrap();
        assert_eq!(ps, vec![PassengerId(0), PassengerId(1)]);
    }

    #[test]
    fn explicit_capacity() {
        let mut s = sim(ring(), SimConfig::default());
        let c = s.spawn_car_with_capacity("A", to("C"), 3).unwrap();
        assert_eq!(s.car(c).unwrap().capacity(), 3);
        assert!(matches!(s.spawn_car_with_capacity("A", to("C"), 0), Err(SimError::Config(_))));
    }

    #[test]
    fn unknown_ids_fail_lookup() {
        let s = sim(ring(), SimConfig::default());
        assert!(matches!(s.car(CarId(0)), Err(SimError::Lookup(_))));
        assert!(matches!(s.passenger(PassengerId(3)), Err(SimError::Lookup(_))));
    }
}

// ── Stepping ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use super::*;

    #[test]
    fn ring_scenario() {
        let mut s = sim(ring(), SimConfig::default());
        let c = s.spawn_car("A", route(&["A", "B", "C"])).unwrap();
        let p = s.spawn_passenger("A", to("C")).unwrap();

        // Step 1: the car departs and picks the passenger up at A.
        let r = s.step().unwrap();
        assert_eq!(r.step, Step(1));
        assert_eq!((r.departed, r.boarded, r.moved), (1, 1, 0));
        assert_eq!(s.car(c).unwrap().station(), StationId(0));
        assert_eq!(s.passenger(p).unwrap().state(), PassengerState::Boarded);

        // Step 2: boarded, at B.
        s.step().unwrap();
        let pass = s.passenger(p).unwrap();
        assert_eq!(pass.state(), PassengerState::Boarded);
        assert_eq!(pass.station(), StationId(1));
        assert_eq!(pass.car(), Some(c));
        assert_eq!(s.car(c).unwrap().riders(), &[p]);

        // Step 3: arrived at C, car retired.
        let r = s.step().unwrap();
        assert_eq!((r.alighted, r.passengers_arrived, r.cars_arrived, r.retired), (1, 1, 1, 1));
        let pass = s.passenger(p).unwrap();
        assert_eq!(pass.state(), PassengerState::Arrived);
        assert_eq!(pass.station(), StationId(2));
        assert_eq!(pass.car(), None);
        assert_eq!(s.car(c).unwrap().state(), CarState::Arrived);
        assert!(s.car(c).unwrap().riders().is_empty());

        assert!(s.is_quiescent());
        assert_eq!(s.current_step(), Step(3));
    }

    #[test]
    fn events_follow_commit_order() {
        let mut s = sim(ring(), SimConfig::default());
        s.spawn_car("A", route(&["A", "B"])).unwrap();
        s.spawn_passenger("A", to("B")).unwrap();
        s.run_steps(5).unwrap();

        let kinds: Vec<&str> = s.observer().events.iter().map(|(_, e)| e.kind()).collect();
        assert_eq!(
            kinds,
            vec!["spawn", "spawn", "board", "move", "alight", "arrive", "arrive", "retire"]
        );
        let (step, last) = s.observer().events.last().unwrap();
        assert_eq!(*step, Step(2));
        assert_eq!(last, &SimEvent::Retired { car: CarId(0), station: StationId(1) });
        assert_eq!(s.observer().reports.len(), 2);
    }

    #[test]
    fn quiescent_step_changes_nothing() {
        let mut s = sim(split(), SimConfig::default());
        s.spawn_passenger("X", to("Z")).unwrap(); // no car will ever come
        let before = s.get_stat(crate::StatKind::Passengers);

        for _ in 0..3 {
            let r = s.step().unwrap();
            assert!(r.idle);
            assert_eq!(r.step, Step::ZERO);
        }
        assert_eq!(s.current_step(), Step::ZERO);
        assert_eq!(s.get_stat(crate::StatKind::Passengers), before);
        assert!(s.observer().reports.is_empty());
        assert_eq!(s.run().unwrap(), 0);
    }

    #[test]
    fn passenger_at_destination_arrives_next_step() {
        let mut s = sim(ring(), SimConfig::default());
        let p = s.spawn_passenger("B", to("B")).unwrap();
        assert!(!s.is_quiescent());
        let r = s.step().unwrap();
        assert_eq!(r.passengers_arrived, 1);
        assert_eq!(s.passenger(p).unwrap().state(), PassengerState::Arrived);
        assert!(s.is_quiescent());
    }

    #[test]
    fn lowest_car_id_wins() {
        let mut s = sim(ring(), SimConfig::default());
        s.spawn_car("A", route(&["A", "B", "C"])).unwrap();
        s.spawn_car("A", route(&["A", "B", "C"])).unwrap();
        let p = s.spawn_passenger("A", to("B")).unwrap();
        s.step().unwrap();
        assert_eq!(s.passenger(p).unwrap().car(), Some(CarId(0)));
    }

    #[test]
    fn capacity_limits_boarding() {
        let mut s = sim(ring(), SimConfig::default());
        let c0 = s.spawn_car_with_capacity("A", route(&["A", "B", "C"]), 1).unwrap();
        let c1 = s.spawn_car_with_capacity("A", route(&["A", "B", "C"]), 1).unwrap();
        let ps = s.spawn_passengers("A", to("C"), 3).unwrap();
        s.step().unwrap();

        assert_eq!(s.passenger(ps[0]).unwrap().car(), Some(c0));
        assert_eq!(s.passenger(ps[1]).unwrap().car(), Some(c1));
        assert_eq!(s.passenger(ps[2]).unwrap().state(), PassengerState::Waiting);
        assert_eq!(s.car(c0).unwrap().load(), 1);
    }

    #[test]
    fn car_must_cover_destination() {
        let mut s = sim(ring(), SimConfig::default());
        s.spawn_car("A", route(&["A", "B"])).unwrap();
        let p = s.spawn_passenger("A", route(&["A", "D"])).unwrap();
        s.run_steps(10).unwrap();
        assert_eq!(s.passenger(p).unwrap().state(), PassengerState::Waiting);
        assert!(s.is_quiescent());
    }

    #[test]
    fn car_drives_the_lightest_parallel_line() {
        let topo = TopologySpec::from_json_str(
            r#"{
                "kind": "explicit",
                "stations": ["A", "B"],
                "lines": [{"a": "A", "b": "B", "weight": 9}, {"a": "A", "b": "B", "weight": 1}]
            }"#,
        )
        .unwrap()
        .build()
        .unwrap();
        let mut s = sim(topo, SimConfig::default());
        let c = s.spawn_car("A", to("B")).unwrap();
        s.run().unwrap();

        let moves: Vec<&SimEvent> = s.observer().of_kind("move").collect();
        assert_eq!(
            moves,
            vec![&SimEvent::CarMoved { car: c, from: StationId(0), to: StationId(1), line: LineId(1) }]
        );
        assert_eq!(s.topology().line_weight(LineId(1)), Some(1));
    }

    #[test]
    fn boarding_happens_mid_route() {
        let mut s = sim(ring(), SimConfig::default());
        let c = s.spawn_car("A", route(&["A", "B", "C", "D"])).unwrap();
        let p = s.spawn_passenger("B", to("C")).unwrap();
        s.step().unwrap(); // departs
        s.step().unwrap(); // at B, boards
        assert_eq!(s.passenger(p).unwrap().car(), Some(c));
        s.step().unwrap(); // at C
        assert_eq!(s.passenger(p).unwrap().state(), PassengerState::Arrived);
        assert_eq!(s.car(c).unwrap().state(), CarState::Moving);
    }

    #[test]
    fn passenger_state_never_regresses() {
        let topo = TopologySpec::Random { size: 12, max_lines: Some(30), seed: 9 }.build().unwrap();
        let mut s = sim(topo, config(CarArrivalPolicy::Regenerate));
        for origin in 0..12u32 {
            let _ = s.spawn_cars(StationId(origin), SpawnTarget::Random, 2);
            let _ = s.spawn_passengers(StationId(origin), SpawnTarget::Random, 3);
        }
        let mut last: Vec<PassengerState> = s.registry().passengers().map(|p| p.state()).collect();
        for _ in 0..40 {
            s.step().unwrap();
            let now: Vec<PassengerState> = s.registry().passengers().map(|p| p.state()).collect();
            for (before, after) in last.iter().zip(&now) {
                assert!(before <= after, "{before} -> {after}");
            }
            last = now;
        }
    }

    #[test]
    fn same_seed_same_run() {
        let play = || {
            let topo = TopologySpec::Grid { rows: 3, cols: 4 }.build().unwrap();
            let mut s = sim(topo, config(CarArrivalPolicy::Regenerate));
            s.spawn_cars("R0C0", SpawnTarget::Random, 5).unwrap();
            s.spawn_passengers("R1C1", SpawnTarget::Random, 10).unwrap();
            s.run_steps(25).unwrap();
            (s.get_stat(crate::StatKind::Cars), s.get_stat(crate::StatKind::Passengers))
        };
        assert_eq!(play(), play());
    }
}

// ── Arrival policy ────────────────────────────────────────────────────────────

#[cfg(test)]
mod policy_tests {
    use super::*;

    #[test]
    fn regenerate_keeps_car_in_service() {
        let mut s = sim(ring(), config(CarArrivalPolicy::Regenerate));
        let c = s.spawn_car("A", route(&["A", "B"])).unwrap();
        s.step().unwrap();
        let r = s.step().unwrap();
        assert_eq!((r.cars_arrived, r.regenerated, r.retired), (1, 1, 0));

        let car = s.car(c).unwrap();
        assert_eq!(car.state(), CarState::Pending);
        assert_eq!(car.station(), StationId(1));
        assert_eq!(car.route().origin(), StationId(1));
        assert_ne!(car.destination(), StationId(1));
        assert_eq!(s.observer().of_kind("regenerate").count(), 1);

        // never quiescent, so run() uses the whole budget
        assert_eq!(s.run().unwrap(), 48);
        assert_eq!(s.current_step(), Step(50));
        assert_eq!(s.observer().finished_at, Some(Step(50)));
    }

    #[test]
    fn regenerated_car_boards_at_its_new_origin() {
        // S0 - S1 - S2: every route out of S0 passes S1.
        let topo = TopologySpec::Line { size: 3 }.build().unwrap();
        let mut s = sim(topo, config(CarArrivalPolicy::Regenerate));
        let c = s.spawn_car("S1", route(&["S1", "S0"])).unwrap();
        s.run_steps(2).unwrap();
        assert_eq!(s.car(c).unwrap().station(), StationId(0));
        assert!(s.car(c).unwrap().covers(StationId(1)));

        let p = s.spawn_passenger("S0", to("S1")).unwrap();
        let r = s.step().unwrap();
        assert_eq!((r.departed, r.moved, r.boarded), (1, 0, 1));
        assert_eq!(s.passenger(p).unwrap().car(), Some(c));
        assert_eq!(s.car(c).unwrap().station(), StationId(0));

        s.step().unwrap();
        assert_eq!(s.passenger(p).unwrap().state(), PassengerState::Arrived);
        assert_eq!(s.passenger(p).unwrap().station(), StationId(1));
    }

    #[test]
    fn regenerate_without_destinations_retires() {
        let mut s = sim(split(), config(CarArrivalPolicy::Regenerate));
        let c = s.spawn_car("I", route(&["I"])).unwrap();
        let r = s.step().unwrap();
        assert_eq!((r.regenerated, r.retired), (0, 1));
        assert_eq!(s.car(c).unwrap().state(), CarState::Arrived);
        assert!(s.is_quiescent());
    }

    #[test]
    fn retire_keeps_car_for_statistics() {
        let mut s = sim(ring(), SimConfig::default());
        let c = s.spawn_car("A", to("B")).unwrap();
        s.run().unwrap();
        assert_eq!(s.current_step(), Step(2));
        assert_eq!(s.car(c).unwrap().state(), CarState::Arrived);
        assert_eq!(s.registry().car_count(), 1);
    }
}

// ── Consistency ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod consistency_tests {
    use super::*;

    #[test]
    fn failed_step_rolls_back() {
        let mut s = sim(ring(), SimConfig::default());
        let good = s.spawn_car("A", route(&["A", "B"])).unwrap();
        let bad = s.spawn_car("A", route(&["A", "B"])).unwrap();

        // A route built on another network: A -> C has no line on the ring.
        let complete = TopologySpec::Complete { size: 4 }.build().unwrap();
        let foreign = complete.validate_route(&[StationId(0), StationId(2)]).unwrap();
        let car = s.registry.car_mut(bad).unwrap();
        car.reroute(foreign).unwrap();
        car.depart().unwrap();

        let err = s.step().err().unwrap();
        assert!(matches!(err, SimError::Consistency(_)));
        assert!(err.is_fatal());

        // car 0 was processed before the failure but its departure is gone
        assert_eq!(s.car(good).unwrap().state(), CarState::Pending);
        assert_eq!(s.car(bad).unwrap().station(), StationId(0));
        assert_eq!(s.car(bad).unwrap().state(), CarState::Moving);
        assert_eq!(s.current_step(), Step::ZERO);
        assert_eq!(s.observer().of_kind("spawn").count(), 2);
        assert_eq!(s.observer().events.len(), 2);
        assert!(s.observer().reports.is_empty());
    }
}
