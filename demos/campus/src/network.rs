//! Embedded demo campus.
//!
//! Sixteen junctions on the campus map plane (pixel coordinates, y down).
//! Node labels used in the timetable are 1-based: label `n` is `NodeId(n - 1)`.

use cn_core::{NodeId, Point};
use cn_graph::{CampusGraph, CampusGraphBuilder, GraphResult};

const POSITIONS: [(f32, f32); 16] = [
    (315.0, 175.0), (415.0, 175.0), (515.0, 175.0), (615.0, 175.0),
    (315.0, 285.0), (415.0, 285.0), (515.0, 285.0), (615.0, 285.0),
    (355.0, 285.0), (445.0, 285.0), (485.0, 285.0), (575.0, 285.0),
    (315.0, 365.0), (355.0, 365.0), (415.0, 365.0), (445.0, 365.0),
];

/// Walkways between 1-based labels; weight is the straight-line distance.
const WALKWAYS: [(u32, u32); 22] = [
    (1, 2), (2, 3), (3, 4),
    (1, 5), (2, 6), (3, 7), (4, 8),
    (5, 9), (9, 6), (6, 10), (10, 11), (11, 7), (7, 12), (12, 8),
    (5, 13), (13, 14), (14, 15), (15, 16),
    (9, 14), (6, 15), (10, 16), (11, 16),
];

/// Named buildings at their entrance junctions.
#[derive(Debug, Clone, Copy)]
pub struct Places {
    pub dormitory_d5e: NodeId,
    pub dormitory_d5f: NodeId,
    pub library_e3:    NodeId,
    pub teaching_f3a:  NodeId,
    pub teaching_f3b:  NodeId,
    pub canteen_f5b:   NodeId,
    pub gym_d6:        NodeId,
    pub canteen_d5b:   NodeId,
}

impl Places {
    pub fn legend(&self) -> [(&'static str, NodeId); 8] {
        [
            ("dormitory D5e", self.dormitory_d5e),
            ("dormitory D5f", self.dormitory_d5f),
            ("library E3",    self.library_e3),
            ("teaching F3a",  self.teaching_f3a),
            ("teaching F3b",  self.teaching_f3b),
            ("canteen F5b",   self.canteen_f5b),
            ("gym D6",        self.gym_d6),
            ("canteen D5b",   self.canteen_d5b),
        ]
    }
}

fn label(n: u32) -> NodeId {
    NodeId(n - 1)
}

/// Build the 16-junction demo campus.
pub fn build_campus() -> GraphResult<(CampusGraph, Places)> {
    let mut b = CampusGraphBuilder::new();
    for (x, y) in POSITIONS {
        b.add_node(Point::new(x, y));
    }
    for (a, c) in WALKWAYS {
        b.add_walkway(label(a), label(c));
    }
    // Paved service lane from the canteen to the gym, cheaper than going
    // round by junction 12.
    b.add_road(label(7), label(8), 90.0);

    let places = Places {
        dormitory_d5e: label(13),
        dormitory_d5f: label(14),
        library_e3:    label(2),
        teaching_f3a:  label(3),
        teaching_f3b:  label(4),
        canteen_f5b:   label(7),
        gym_d6:        label(8),
        canteen_d5b:   label(16),
    };
    Ok((b.build()?, places))
}
