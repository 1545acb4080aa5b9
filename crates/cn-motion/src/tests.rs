//! Unit tests for cn-motion.

use cn_core::{AgentId, NodeId, Point};
use cn_graph::Route;

use crate::{Animation, MotionError, MotionEvent, MotionStore};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Dorm → crossing → lecture hall, as on the campus map.
fn waypoints() -> Vec<Point> {
    vec![Point::new(315.0, 175.0), Point::new(415.0, 175.0), Point::new(415.0, 285.0)]
}

fn route() -> Route {
    Route { nodes: vec![NodeId(0), NodeId(1), NodeId(5)], total_weight: 210.0 }
}

// ── Animation ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod animation {
    use super::*;

    #[test]
    fn frame_count_and_offsets() {
        let anim = Animation::new(waypoints(), 800, 10).unwrap();
        assert_eq!(anim.segment_count(), 2);
        assert_eq!(anim.frame_count(), 20);
        assert_eq!(anim.len(), 20);
        assert_eq!(anim.total_duration_ms(), 1_600);

        let frames: Vec<_> = anim.collect();
        assert_eq!(frames.len(), 20);
        assert_eq!(frames[0].offset_ms, 80);
        assert_eq!((frames[0].segment, frames[0].step), (0, 1));
        assert_eq!(frames[9].offset_ms, 800);
        assert_eq!(frames[10].offset_ms, 880);
        assert_eq!((frames[10].segment, frames[10].step), (1, 1));
        assert_eq!(frames[19].offset_ms, 1_600);
        assert!(frames.windows(2).all(|w| w[0].offset_ms < w[1].offset_ms));
    }

    #[test]
    fn segment_ends_land_exactly_on_waypoints() {
        let pts = vec![Point::new(0.1, 0.2), Point::new(1.0 / 3.0, 7.7), Point::new(-2.9, 1.0 / 7.0)];
        let frames: Vec<_> = Animation::new(pts.clone(), 1_000, 7).unwrap().collect();
        assert_eq!(frames[6].position, pts[1]);
        assert_eq!(frames[13].position, pts[2]);
    }

    #[test]
    fn intermediate_positions_interpolate() {
        let frames: Vec<_> = Animation::new(waypoints(), 800, 10).unwrap().collect();
        assert_eq!(frames[4].position, Point::new(365.0, 175.0));
        assert_eq!(frames[14].position, Point::new(415.0, 230.0));
    }

    #[test]
    fn uneven_step_interval_still_ends_on_segment_boundary() {
        let frames: Vec<_> = Animation::new(waypoints(), 1_000, 3).unwrap().collect();
        let offsets: Vec<u64> = frames.iter().map(|f| f.offset_ms).collect();
        assert_eq!(offsets, vec![333, 666, 1_000, 1_333, 1_666, 2_000]);
    }

    #[test]
    fn single_waypoint_has_no_frames() {
        let mut anim = Animation::new(vec![Point::new(5.0, 5.0)], 800, 10).unwrap();
        assert_eq!(anim.total_duration_ms(), 0);
        assert!(anim.is_finished());
        assert_eq!(anim.next(), None);
    }

    #[test]
    fn cancel_stops_frames_and_never_finishes() {
        let mut anim = Animation::new(waypoints(), 800, 10).unwrap();
        anim.next();
        anim.next();
        anim.cancel();
        assert_eq!(anim.next(), None);
        assert_eq!(anim.next_offset_ms(), None);
        assert!(anim.is_cancelled());
        assert!(!anim.is_finished());
        assert_eq!(anim.len(), 0);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(Animation::new(vec![], 800, 10).unwrap_err(), MotionError::NoWaypoints);
        assert_eq!(Animation::new(waypoints(), 800, 0).unwrap_err(), MotionError::ZeroSteps);
    }
}

// ── MotionStore ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use super::*;

    #[test]
    fn advance_until_arrival() {
        let mut store = MotionStore::new(2);
        let a = AgentId(1);
        let first = store.begin(a, route(), waypoints(), 5_000, 800, 10).unwrap();
        assert_eq!(first, Some(5_080));
        assert!(store.is_moving(a));
        assert_eq!(store.position(a), Some(Point::new(315.0, 175.0)));

        let mut frames = 0;
        let arrived = loop {
            match store.advance(a).unwrap() {
                MotionEvent::Frame { next_due_ms, .. } => {
                    frames += 1;
                    assert!(next_due_ms > 5_000);
                }
                MotionEvent::Arrived { frame, route: r } => break (frame, r),
            }
        };
        assert_eq!(frames, 19);
        assert_eq!(arrived.0.offset_ms, 1_600);
        assert_eq!(arrived.1, route());
        assert_eq!(store.position(a), Some(Point::new(415.0, 285.0)));
        assert!(!store.is_moving(a));

        // Completion happens once; a stale timer is a no-op.
        assert_eq!(store.advance(a), None);
    }

    #[test]
    fn only_one_animation_per_agent() {
        let mut store = MotionStore::new(1);
        store.begin(AgentId(0), route(), waypoints(), 0, 800, 10).unwrap();
        assert_eq!(
            store.begin(AgentId(0), route(), waypoints(), 0, 800, 10),
            Err(MotionError::AlreadyMoving(AgentId(0)))
        );
    }

    #[test]
    fn single_node_route_is_not_stored() {
        let mut store = MotionStore::new(1);
        let r = Route { nodes: vec![NodeId(3)], total_weight: 0.0 };
        let first = store.begin(AgentId(0), r, vec![Point::new(9.0, 9.0)], 0, 800, 10).unwrap();
        assert_eq!(first, None);
        assert!(!store.is_moving(AgentId(0)));
        assert_eq!(store.position(AgentId(0)), Some(Point::new(9.0, 9.0)));
    }

    #[test]
    fn cancel_all_stops_every_agent() {
        let mut store = MotionStore::new(3);
        for i in 0..3 {
            store.begin(AgentId(i), route(), waypoints(), 0, 800, 10).unwrap();
            store.advance(AgentId(i));
        }
        assert_eq!(store.moving_count(), 3);
        assert_eq!(store.cancel_all(), 3);
        assert_eq!(store.moving_count(), 0);
        for i in 0..3 {
            assert_eq!(store.advance(AgentId(i)), None);
        }
        assert!(!store.cancel(AgentId(0)));
    }

    #[test]
    fn unknown_agent() {
        let mut store = MotionStore::new(1);
        assert_eq!(
            store.begin(AgentId(4), route(), waypoints(), 0, 800, 10),
            Err(MotionError::UnknownAgent(AgentId(4)))
        );
        assert!(store.place(AgentId(4), None).is_err());
        assert_eq!(store.position(AgentId(4)), None);
    }
}
