//! Static trail table: named waypoints from Independence to the Willamette Valley.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const ORIGIN_NAME: &str = "Independence, Missouri";
const TRAIL_NODE_COUNT: usize = 18;

/// Geometry of a river crossing, in feet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RiverData {
    pub width_ft: u32,
    pub depth_ft: u32,
}

/// Waypoint kind; river geometry only exists on the `River` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MilestoneKind {
    Town,
    Fort,
    Landmark,
    River(RiverData),
}

impl MilestoneKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Town => "town",
            Self::Fort => "fort",
            Self::Landmark => "landmark",
            Self::River(_) => "river",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Milestone {
    pub name: String,
    /// Miles from Independence.
    pub distance: u32,
    pub kind: MilestoneKind,
}

impl Milestone {
    #[must_use]
    pub const fn river(&self) -> Option<RiverData> {
        match self.kind {
            MilestoneKind::River(data) => Some(data),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_river(&self) -> bool {
        matches!(self.kind, MilestoneKind::River(_))
    }

    /// Forts and towns sell supplies.
    #[must_use]
    pub const fn has_store(&self) -> bool {
        matches!(self.kind, MilestoneKind::Fort | MilestoneKind::Town)
    }
}

const fn river(width_ft: u32, depth_ft: u32) -> MilestoneKind {
    MilestoneKind::River(RiverData { width_ft, depth_ft })
}

const MILESTONE_DEFS: [(&str, u32, MilestoneKind); TRAIL_NODE_COUNT] = [
    (ORIGIN_NAME, 0, MilestoneKind::Town),
    ("Kansas River Crossing", 102, river(620, 4)),
    ("Big Blue River Crossing", 185, river(300, 3)),
    ("Fort Kearney", 304, MilestoneKind::Fort),
    ("Chimney Rock", 554, MilestoneKind::Landmark),
    ("Fort Laramie", 640, MilestoneKind::Fort),
    ("Independence Rock", 830, MilestoneKind::Landmark),
    ("South Pass", 932, MilestoneKind::Landmark),
    ("Fort Bridger", 989, MilestoneKind::Fort),
    ("Green River Crossing", 1151, river(400, 6)),
    ("Soda Springs", 1295, MilestoneKind::Landmark),
    ("Fort Hall", 1395, MilestoneKind::Fort),
    ("Snake River Crossing", 1534, river(1000, 7)),
    ("Fort Boise", 1648, MilestoneKind::Fort),
    ("Blue Mountains", 1808, MilestoneKind::Landmark),
    ("Fort Walla Walla", 1863, MilestoneKind::Fort),
    ("The Dalles", 1973, MilestoneKind::Town),
    ("Willamette Valley", 2040, MilestoneKind::Town),
];

/// The full trail, ordered by strictly increasing distance.
#[must_use]
pub fn milestones() -> &'static [Milestone] {
    static TABLE: OnceLock<Vec<Milestone>> = OnceLock::new();
    TABLE.get_or_init(|| {
        MILESTONE_DEFS
            .iter()
            .map(|&(name, distance, kind)| Milestone {
                name: name.to_string(),
                distance,
                kind,
            })
            .collect()
    })
}

fn last_milestone() -> &'static Milestone {
    let table = milestones();
    &table[table.len() - 1]
}

/// Total length of the trail in miles.
#[must_use]
pub fn trail_length() -> u32 {
    last_milestone().distance
}

/// First milestone strictly beyond `miles_traveled`; the final entry repeats
/// once the table is exhausted.
#[must_use]
pub fn next_milestone_after(miles_traveled: u32) -> &'static Milestone {
    milestones()
        .iter()
        .find(|milestone| milestone.distance > miles_traveled)
        .unwrap_or_else(last_milestone)
}

/// Last milestone at or behind `miles_traveled`.
#[must_use]
pub fn previous_milestone(miles_traveled: u32) -> &'static Milestone {
    milestones()
        .iter()
        .take_while(|milestone| milestone.distance <= miles_traveled)
        .last()
        .unwrap_or(&milestones()[0])
}

/// Look up a milestone by name.
#[must_use]
pub fn find_milestone(name: &str) -> Option<&'static Milestone> {
    milestones().iter().find(|milestone| milestone.name == name)
}
