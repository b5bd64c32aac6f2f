use glam::{I64Vec3, IVec3};
use levelgen_common::GridBox;
use levelgen_kernel::{RandomSequence, Sector};

use crate::config::SearchConfig;
use crate::frontier::Frontier;
use crate::successors::successors;

/// Errors from a sector search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("invalid search configuration: {reason}")]
    InvalidConfig { reason: String },
    #[error("frontier exhausted after {pops} pops ({nodes} nodes) without reaching the target")]
    Exhausted { pops: usize, nodes: usize },
    #[error("pop limit of {max_pops} reached ({nodes} nodes) without reaching the target")]
    PopLimit { max_pops: usize, nodes: usize },
}

/// A successful search: the sector chain from the root to the goal.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Root first, goal last.
    pub path: Vec<Sector>,
    /// Frontier pops performed, including the goal pop.
    pub pops: usize,
    /// Search nodes created, including the root.
    pub nodes: usize,
}

/// Arena entry. Nodes are never mutated after creation.
#[derive(Debug)]
struct Node {
    parent: Option<usize>,
    sector: Sector,
}

/// True if the center of `bounds` lies within `tolerance` cells of `target`
/// on every axis. Compared in doubled coordinates.
pub fn is_goal(bounds: &GridBox, target: IVec3, tolerance: i32) -> bool {
    doubled_offset(bounds, target)
        .abs()
        .cmple(I64Vec3::splat(tolerance as i64 * 2))
        .all()
}

/// `2 * (center - target)`, widened so grid extremes cannot overflow.
fn doubled_offset(bounds: &GridBox, target: IVec3) -> I64Vec3 {
    bounds.min.as_i64vec3() + bounds.max.as_i64vec3() - target.as_i64vec3() * 2
}

/// Randomized best-first search over sector placements.
///
/// Nodes live in an arena and point at their parent by index. Walking the
/// parent links of a node yields the partial path it extends, which is what
/// `can_place` checks candidates against.
pub struct SectorSearch {
    config: SearchConfig,
    nodes: Vec<Node>,
    frontier: Frontier,
}

impl SectorSearch {
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            config,
            nodes: Vec::new(),
            frontier: Frontier::new(),
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Number of nodes created by the last run.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Search from `root` towards `target`, avoiding `committed` geometry.
    ///
    /// `rng` drives the priority jitter; the same state and inputs always
    /// produce the same path.
    pub fn run(
        &mut self,
        root: Sector,
        target: IVec3,
        committed: &[Sector],
        rng: &mut RandomSequence,
    ) -> Result<SearchOutcome, SearchError> {
        let _span = tracing::info_span!("sector_search", ?target).entered();

        self.nodes.clear();
        self.frontier.clear();
        self.nodes.push(Node {
            parent: None,
            sector: root,
        });
        self.frontier.push(0.0, 0);

        let mut candidates = Vec::new();
        let mut pops = 0;
        while let Some((priority, index)) = self.frontier.pop() {
            pops += 1;
            if pops > self.config.max_pops {
                tracing::debug!(pops, nodes = self.nodes.len(), "pop limit reached");
                return Err(SearchError::PopLimit {
                    max_pops: self.config.max_pops,
                    nodes: self.nodes.len(),
                });
            }

            if is_goal(&self.nodes[index].sector.bounds, target, self.config.goal_tolerance) {
                let path = self.path_to(index);
                tracing::debug!(
                    pops,
                    nodes = self.nodes.len(),
                    length = path.len(),
                    "goal reached"
                );
                return Ok(SearchOutcome {
                    path,
                    pops,
                    nodes: self.nodes.len(),
                });
            }

            candidates.clear();
            successors(&self.nodes[index].sector, &self.config, &mut candidates);
            let generated = candidates.len();
            let mut accepted = 0;
            for candidate in candidates.drain(..) {
                if !self.can_place(&candidate.bounds, index, committed) {
                    continue;
                }
                let priority = self.priority(&candidate.bounds, target, rng);
                self.nodes.push(Node {
                    parent: Some(index),
                    sector: candidate,
                });
                self.frontier.push(priority, self.nodes.len() - 1);
                accepted += 1;
            }

            tracing::trace!(
                node = index,
                priority,
                generated,
                accepted,
                frontier = self.frontier.len(),
                "expanded"
            );
        }

        tracing::debug!(pops, nodes = self.nodes.len(), "frontier exhausted");
        Err(SearchError::Exhausted {
            pops,
            nodes: self.nodes.len(),
        })
    }

    /// False if `bounds` overlaps committed geometry or any sector on the
    /// chain ending at `node`.
    pub fn can_place(&self, bounds: &GridBox, node: usize, committed: &[Sector]) -> bool {
        if committed.iter().any(|s| s.bounds.overlaps(bounds)) {
            return false;
        }
        !self.ancestors(node).any(|n| n.sector.bounds.overlaps(bounds))
    }

    /// The node itself followed by its parents up to the root.
    fn ancestors(&self, node: usize) -> impl Iterator<Item = &Node> + '_ {
        std::iter::successors(Some(&self.nodes[node]), |n| n.parent.map(|p| &self.nodes[p]))
    }

    fn path_to(&self, node: usize) -> Vec<Sector> {
        let mut path: Vec<Sector> = self.ancestors(node).map(|n| n.sector.clone()).collect();
        path.reverse();
        path
    }

    /// Distance-to-target priority, scaled and jittered by `rng`.
    fn priority(&self, bounds: &GridBox, target: IVec3, rng: &mut RandomSequence) -> f64 {
        let d = doubled_offset(bounds, target).as_dvec3();
        let distance = d.length().round() as i64;
        let base = (distance / 4) as f64;
        base * rng.uniform_range(64.0, 128.0) / 128.0 + rng.uniform(1.0)
    }
}
