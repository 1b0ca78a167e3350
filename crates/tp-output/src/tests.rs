//! Unit tests for tp-output.

use tp_core::SimConfig;
use tp_sim::{Sim, SimBuilder, SpawnTarget};
use tp_topology::{ShortestPathRouter, Topology, TopologySpec};

use crate::{EventLog, EventLogObserver, MemoryEventLog, ObjectType, OutputError};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Ring A - B - C - D - A.
fn ring() -> Topology {
    TopologySpec::from_json_str(
        r#"{
            "kind": "explicit",
            "stations": ["A", "B", "C", "D"],
            "lines": [
                {"a": "A", "b": "B"}, {"a": "B", "b": "C"},
                {"a": "C", "b": "D"}, {"a": "D", "b": "A"}
            ]
        }"#,
    )
    .unwrap()
    .build()
    .unwrap()
}

/// Car A -> B -> C with a passenger A -> C, run to completion.
fn run_scenario<L: EventLog>(log: L) -> Sim<ShortestPathRouter, EventLogObserver<L>> {
    let mut sim = SimBuilder::seeded(ring(), SimConfig::default())
        .observer(EventLogObserver::new(log))
        .build()
        .unwrap();
    sim.spawn_car("A", SpawnTarget::Route(vec!["A".into(), "B".into(), "C".into()]))
        .unwrap();
    sim.spawn_passenger("A", SpawnTarget::Destination("C".into())).unwrap();
    sim.run().unwrap();
    sim
}

// ── Tags ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tag_tests {
    use super::*;

    #[test]
    fn builtin_tags() {
        assert_eq!(ObjectType::sys().as_str(), "sys");
        assert_eq!(ObjectType::car().to_string(), "car");
        assert_eq!("pgr".parse::<ObjectType>().unwrap(), ObjectType::pgr());
    }

    #[test]
    fn tags_longer_than_three_chars_rejected() {
        assert!(matches!(ObjectType::new("cars"), Err(OutputError::InvalidTag(t)) if t == "cars"));
        assert!(ObjectType::new("").is_err());
        assert!(ObjectType::new("a-b").is_err());
        assert!(ObjectType::new("st").is_ok());
    }
}

// ── Memory log + observer ─────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[test]
    fn memory_log_assigns_sequential_ids() {
        let mut log = MemoryEventLog::new();
        assert_eq!(log.record(&ObjectType::car(), 4, "a").unwrap(), 1);
        assert_eq!(log.record(&ObjectType::pgr(), 2, "b").unwrap(), 2);
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[1].object_id, 2);
    }

    #[test]
    fn scenario_is_logged_in_order() {
        let mut sim = run_scenario(MemoryEventLog::new());
        assert!(sim.observer_mut().take_error().is_none());
        let entries = sim.into_observer().into_log().into_entries();

        let first = &entries[0];
        assert_eq!(first.id, 1);
        assert_eq!(first.object_type, ObjectType::car());
        assert_eq!(first.object_id, 0);
        assert_eq!(first.message, "S0 spawned at StationId(0) bound for StationId(2) (capacity 20)");

        assert_eq!(entries[1].object_type, ObjectType::pgr());
        assert_eq!(entries[2].message, "S1 boarded CarId(0) at StationId(0)");

        let last = entries.last().unwrap();
        assert_eq!(last.object_type, ObjectType::sys());
        assert_eq!(last.message, "run finished at S3");

        let pgr_arrivals = entries
            .iter()
            .filter(|e| e.object_type == ObjectType::pgr() && e.message.starts_with("S3 arrived"))
            .count();
        assert_eq!(pgr_arrivals, 1);

        for (i, e) in entries.iter().enumerate() {
            assert_eq!(e.id, i as u64 + 1);
        }
    }

    #[test]
    fn note_writes_sys_entry() {
        let mut obs = EventLogObserver::new(MemoryEventLog::new());
        obs.note("seed 42").unwrap();
        let log = obs.into_log();
        assert_eq!(log.entries()[0].object_type, ObjectType::sys());
        assert_eq!(log.entries()[0].object_id, 0);
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use super::*;
    use crate::{write_stat_csv, write_stat_csv_path, CsvEventLog};
    use tempfile::tempdir;
    use tp_sim::{Labels, StatKind};

    #[test]
    fn csv_log_matches_memory_log() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.csv");

        let mut sim = run_scenario(CsvEventLog::create(&path).unwrap());
        assert!(sim.observer_mut().take_error().is_none());
        drop(sim);

        let expected = run_scenario(MemoryEventLog::new()).into_observer().into_log().into_entries();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<&str> = reader.headers().unwrap().iter().collect();
        assert_eq!(headers, vec!["id", "object_type", "object_id", "message"]);
        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), expected.len());
        for (row, entry) in rows.iter().zip(&expected) {
            assert_eq!(row[0], entry.id.to_string());
            assert_eq!(&row[1], entry.object_type.as_str());
            assert_eq!(row[2], entry.object_id.to_string());
            assert_eq!(&row[3], entry.message);
        }
    }

    #[test]
    fn stats_export_with_names() {
        let sim = {
            let mut sim = SimBuilder::seeded(ring(), SimConfig::default()).build().unwrap();
            sim.spawn_car("A", SpawnTarget::Destination("C".into())).unwrap();
            sim.spawn_passenger("B", SpawnTarget::Destination("C".into())).unwrap();
            sim
        };

        let mut out = Vec::new();
        let table = sim.get_stat(StatKind::Passengers);
        write_stat_csv(&mut out, &table, sim.topology(), Labels::Names).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "id,state,station,origin,destination,car\n0,waiting,B,B,C,\n"
        );

        let dir = tempdir().unwrap();
        let path = dir.path().join("stations.csv");
        let table = sim.get_stat(StatKind::Stations);
        write_stat_csv_path(&path, &table, sim.topology(), Labels::Index).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "index,name,degree,waiting,cars");
        assert_eq!(lines[1], "0,A,2,0,1");
        assert_eq!(lines[2], "1,B,2,1,0");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn empty_table_exports_header_only() {
        let sim = SimBuilder::seeded(ring(), SimConfig::default()).build().unwrap();
        let mut out = Vec::new();
        write_stat_csv(&mut out, &sim.get_stat(StatKind::Cars), sim.topology(), Labels::Index).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "id,state,station,next,destination,remaining,passengers,capacity\n"
        );
    }
}

// ── SQLite ────────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use super::*;
    use crate::SqliteEventLog;
    use tempfile::tempdir;

    #[test]
    fn sqlite_log_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.db");

        let mut sim = run_scenario(SqliteEventLog::open(&path).unwrap());
        assert!(sim.observer_mut().take_error().is_none());
        let written = sim.into_observer().into_log();
        drop(written);

        let conn = rusqlite::Connection::open(&path).unwrap();
        let (count, max_id): (i64, i64) = conn
            .query_row("SELECT COUNT(*), MAX(id) FROM log", [], |r| Ok((r.get(0)?, r.get(1)?)))
            .unwrap();
        assert_eq!(count, max_id);

        let (tag, object_id, message): (String, i64, String) = conn
            .query_row(
                "SELECT object_type, object_id, message FROM log WHERE id = 1",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!(tag, "car");
        assert_eq!(object_id, 0);
        assert!(message.starts_with("S0 spawned"));

        let sys: i64 = conn
            .query_row("SELECT COUNT(*) FROM log WHERE object_type = 'sys'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(sys, 1);
    }

    #[test]
    fn ids_continue_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.db");
        {
            let mut log = SqliteEventLog::open(&path).unwrap();
            assert_eq!(log.record(&ObjectType::sys(), 0, "first").unwrap(), 1);
            log.finish().unwrap();
        }
        let mut log = SqliteEventLog::open(&path).unwrap();
        assert_eq!(log.record(&ObjectType::car(), 7, "second").unwrap(), 2);
    }

    #[test]
    fn in_memory_database() {
        let mut log = SqliteEventLog::open_in_memory().unwrap();
        log.record(&ObjectType::pgr(), 1, "x").unwrap();
        let n: i64 = log
            .connection()
            .query_row("SELECT COUNT(*) FROM log", [], |r| r.get(0))
            .unwrap();
        assert_eq!(n, 1);
    }
}
