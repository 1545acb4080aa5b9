//! Tests for cn-output.

use tempfile::TempDir;

use crate::csv::CsvWriter;
use crate::writer::OutputWriter;

fn tmp() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn read(dir: &TempDir, file: &str) -> (Vec<String>, Vec<csv::StringRecord>) {
    let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
    let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
    let rows = rdr.records().map(|r| r.unwrap()).collect();
    (headers, rows)
}

#[cfg(test)]
mod csv_tests {
    use super::*;
    use cn_agent::AgentState;
    use cn_core::ClockTime;

    use crate::row::{AgentSnapshotRow, MovementKind, MovementRow, TickRow};

    #[test]
    fn files_and_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(read(&dir, "clock_ticks.csv").0, ["tick", "time", "is_night", "moving"]);
        assert_eq!(read(&dir, "agent_frames.csv").0, ["agent_id", "time", "ms", "x", "y"]);
        assert_eq!(
            read(&dir, "movements.csv").0,
            ["agent_id", "time", "event", "origin", "destination", "weight"]
        );
        assert_eq!(
            read(&dir, "agent_snapshots.csv").0,
            ["agent_id", "tick", "time", "state", "cursor", "x", "y"]
        );
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("run").join("day1");
        CsvWriter::new(&nested).unwrap();
        assert!(nested.join("clock_ticks.csv").exists());
    }

    #[test]
    fn tick_row() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick(&TickRow { tick: 3, time: ClockTime::new(19, 5).unwrap(), is_night: true, moving: 2 })
            .unwrap();
        w.finish().unwrap();

        let (_, rows) = read(&dir, "clock_ticks.csv");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["3", "19:05", "1", "2"]);
    }

    #[test]
    fn movement_labels_are_one_based() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let time = ClockTime::new(8, 20).unwrap();
        w.write_movement(&MovementRow {
            agent_id: 4, time, kind: MovementKind::RouteFailed, origin: 0, destination: 15, weight: None,
        })
        .unwrap();
        w.write_movement(&MovementRow {
            agent_id: 4, time, kind: MovementKind::Arrival, origin: u32::MAX, destination: 2, weight: None,
        })
        .unwrap();
        w.finish().unwrap();

        let (_, rows) = read(&dir, "movements.csv");
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["4", "08:20", "route_failed", "1", "16", ""]);
        assert_eq!(rows[1].iter().collect::<Vec<_>>(), ["4", "08:20", "arrival", "", "3", ""]);
    }

    #[test]
    fn unplaced_agent_has_empty_position() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let time = ClockTime::new(7, 0).unwrap();
        let row = |agent_id, position| AgentSnapshotRow {
            agent_id, tick: 0, time, state: AgentState::Idle, cursor: 0, position,
        };
        w.write_snapshots(&[row(0, Some((1.5, 2.0))), row(1, None)]).unwrap();
        w.write_snapshots(&[]).unwrap();
        w.finish().unwrap();

        let (_, rows) = read(&dir, "agent_snapshots.csv");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["0", "0", "07:00", "idle", "0", "1.5", "2"]);
        assert_eq!(&rows[1][5], "");
    }

    #[test]
    fn finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use super::*;
    use cn_agent::AgentStoreBuilder;
    use cn_core::{AgentId, ClockTime, NodeId, Point, SimConfig};
    use cn_graph::{CampusGraph, CampusGraphBuilder};
    use cn_schedule::{Timetable, TimetableEvent};
    use cn_sim::{DisplaySnapshot, SimBuilder, SimObserver};

    use crate::row::{AgentSnapshotRow, FrameRow, MovementRow, TickRow};
    use crate::{OutputError, OutputResult, SimOutputObserver};

    fn t(h: u32, m: u32) -> ClockTime {
        ClockTime::new(h, m).unwrap()
    }

    /// 0 ↔ 1 ↔ 2 in a line plus an isolated node 3.
    fn graph() -> CampusGraph {
        let mut b = CampusGraphBuilder::new();
        let n: Vec<NodeId> = (0..3).map(|i| b.add_node(Point::new(100.0 * i as f32, 0.0))).collect();
        b.add_node(Point::new(0.0, 500.0));
        b.add_road(n[0], n[1], 10.0);
        b.add_road(n[1], n[2], 10.0);
        b.build().unwrap()
    }

    fn config() -> SimConfig {
        SimConfig {
            start_time:            t(7, 0),
            tick_interval_ms:      1_000,
            segment_duration_ms:   1_000,
            steps_per_segment:     10,
            output_interval_ticks: 5,
            ..SimConfig::default()
        }
    }

    #[test]
    fn integration_csv() {
        let timetable = Timetable::new(vec![
            TimetableEvent::new(t(7, 1), NodeId(0), NodeId(2)),
            TimetableEvent::new(t(7, 10), NodeId(2), NodeId(3)),
        ]);
        let agents = AgentStoreBuilder::new().agent(timetable).build();
        let mut sim = SimBuilder::all_pairs(config(), graph(), agents).build().unwrap();

        let dir = tmp();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.start();
        sim.run_ticks(10, &mut obs).unwrap();
        obs.finish().unwrap();

        let (_, ticks) = read(&dir, "clock_ticks.csv");
        assert_eq!(ticks.len(), 10);
        assert_eq!(ticks[0].iter().collect::<Vec<_>>(), ["1", "07:01", "0", "0"]);
        assert_eq!(&ticks[9][1], "07:10");

        let (_, frames) = read(&dir, "agent_frames.csv");
        assert_eq!(frames.len(), 20);
        assert_eq!(frames[19].iter().collect::<Vec<_>>(), ["0", "07:02", "3000", "200", "0"]);

        let (_, moves) = read(&dir, "movements.csv");
        assert_eq!(moves.len(), 3);
        assert_eq!(moves[0].iter().collect::<Vec<_>>(), ["0", "07:01", "departure", "1", "3", "20"]);
        assert_eq!(moves[1].iter().collect::<Vec<_>>(), ["0", "07:02", "arrival", "1", "3", "20"]);
        assert_eq!(moves[2].iter().collect::<Vec<_>>(), ["0", "07:09", "route_failed", "3", "4", ""]);

        let (_, snaps) = read(&dir, "agent_snapshots.csv");
        assert_eq!(snaps.len(), 2);
        assert_eq!(snaps[0].iter().collect::<Vec<_>>(), ["0", "5", "07:05", "waiting", "1", "200", "0"]);
        assert_eq!(&snaps[1][3], "idle");
    }

    #[test]
    fn frames_can_be_skipped() {
        let timetable = Timetable::new(vec![TimetableEvent::new(t(7, 1), NodeId(0), NodeId(1))]);
        let agents = AgentStoreBuilder::new().agent(timetable).build();
        let mut sim = SimBuilder::all_pairs(config(), graph(), agents).build().unwrap();

        let dir = tmp();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap()).record_frames(false);
        sim.start();
        sim.run_ticks(3, &mut obs).unwrap();
        obs.finish().unwrap();

        assert!(read(&dir, "agent_frames.csv").1.is_empty());
        assert_eq!(read(&dir, "movements.csv").1.len(), 2);
    }

    /// Fails every write.
    struct BrokenWriter {
        calls: usize,
    }

    impl BrokenWriter {
        fn fail(&mut self) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::Io(std::io::Error::other(format!("write {}", self.calls))))
        }
    }

    impl OutputWriter for BrokenWriter {
        fn write_tick(&mut self, _row: &TickRow) -> OutputResult<()> { self.fail() }
        fn write_frame(&mut self, _row: &FrameRow) -> OutputResult<()> { self.fail() }
        fn write_movement(&mut self, _row: &MovementRow) -> OutputResult<()> { self.fail() }
        fn write_snapshots(&mut self, _rows: &[AgentSnapshotRow]) -> OutputResult<()> { self.fail() }
        fn finish(&mut self) -> OutputResult<()> { self.fail() }
    }

    #[test]
    fn keeps_first_error() {
        let mut obs = SimOutputObserver::new(BrokenWriter { calls: 0 });
        let display = DisplaySnapshot { hours: 7, minutes: 1, is_night: false, day_ended: false };
        obs.on_clock_tick(1, &display, 0);
        obs.on_arrival(AgentId(0), t(7, 1), NodeId(1));

        let err = obs.take_error().unwrap();
        assert_eq!(err.to_string(), "I/O error: write 1");
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().calls, 2);
    }
}
