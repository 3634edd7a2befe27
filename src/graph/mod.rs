//! Dependency graph construction and structural analysis.
//!
//! After loading, the registry's skills pass through a pipeline of pure
//! analysis phases: a case-insensitive name map, cycle detection over the
//! `depends_on` edges, conflict symmetry checking, and inferred-dependency
//! resolution. Each phase takes the previous phase's output by reference
//! and returns a fresh value, so phases compose and test in isolation.
//!
//! All findings here are diagnostic. A cycle or a bad conflict declaration
//! never removes a skill from the map; the records simply accumulate in
//! the manifest for callers to act on.

use crate::skills::SkillEntry;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use tracing::warn;

/// Case-insensitive skill map, keyed by lowercased folder name.
///
/// A `BTreeMap` keeps key order stable, which makes manifest serialization
/// and analysis traversal deterministic across runs.
pub type SkillMap = BTreeMap<String, SkillEntry>;

/// Why a `conflicts_with` declaration was flagged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// The declared target is not a key in the skill map
    MissingConflictTarget,
    /// The target exists but does not declare the conflict back
    AsymmetricConflict,
}

/// A diagnostic record for one `(skill, target)` conflict declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConflictIssue {
    /// Map key of the skill that made the declaration
    pub skill: String,

    /// What went wrong with the declaration
    #[serde(rename = "type")]
    pub kind: ConflictKind,

    /// The declared target, as written in the header
    pub conflicts: Vec<String>,

    /// Human-readable detail, present for asymmetric conflicts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Build the case-insensitive skill map from loaded entries.
///
/// Keys are lowercased folder names (derived from each entry's file path).
/// When two folders collide under case-insensitive comparison, the later
/// entry silently overwrites the earlier one; a warning trace records the
/// overwrite but no error is raised.
#[must_use]
pub fn build_skill_map(entries: &[SkillEntry]) -> SkillMap {
    let mut map = SkillMap::new();

    for entry in entries {
        let key = folder_key(entry);
        if let Some(previous) = map.insert(key.clone(), entry.clone()) {
            warn!(
                "Duplicate skill key '{key}': {} overwrites {}",
                entry.file_path, previous.file_path
            );
        }
    }

    map
}

/// Lowercased folder name for an entry, falling back to its display name
/// when the file path has no parent directory.
fn folder_key(entry: &SkillEntry) -> String {
    Path::new(&entry.file_path)
        .parent()
        .and_then(Path::file_name)
        .map_or_else(|| entry.name.to_lowercase(), |n| n.to_string_lossy().to_lowercase())
}

/// Compute inferred dependencies for every entry.
///
/// For each skill, `inferred_dependencies` is its referenced-skill list
/// minus its own name minus everything in `depends_on`, compared
/// case-insensitively, with the reference order preserved. Declared
/// `optional` edges are deliberately not subtracted: a soft edge does not
/// make a prose reference any less undeclared.
///
/// Returns new entries; the inputs are left untouched.
#[must_use]
pub fn resolve_inferred_dependencies(entries: &[SkillEntry]) -> Vec<SkillEntry> {
    entries
        .iter()
        .map(|entry| {
            let own_name = entry.name.to_lowercase();
            let declared: HashSet<String> =
                entry.depends_on.iter().map(|dep| dep.to_lowercase()).collect();

            let inferred = entry
                .referenced_skills
                .iter()
                .filter(|reference| reference.to_lowercase() != own_name)
                .filter(|reference| !declared.contains(&reference.to_lowercase()))
                .cloned()
                .collect();

            SkillEntry {
                inferred_dependencies: inferred,
                ..entry.clone()
            }
        })
        .collect()
}

/// Check every `conflicts_with` declaration in the map.
///
/// A declaration naming an absent skill produces a
/// [`ConflictKind::MissingConflictTarget`] issue. A declaration whose
/// target exists but does not declare the conflict back produces a
/// [`ConflictKind::AsymmetricConflict`] issue. Nothing else is validated:
/// a skill may declare both a dependency and a conflict on the same name,
/// and a symmetric pair passes silently.
#[must_use]
pub fn analyze_conflicts(map: &SkillMap) -> Vec<ConflictIssue> {
    let mut issues = Vec::new();

    for (skill_key, entry) in map {
        for target in &entry.conflicts_with {
            match map.get(&target.to_lowercase()) {
                None => issues.push(ConflictIssue {
                    skill: skill_key.clone(),
                    kind: ConflictKind::MissingConflictTarget,
                    conflicts: vec![target.clone()],
                    message: None,
                }),
                Some(target_entry) => {
                    let reciprocal = target_entry
                        .conflicts_with
                        .iter()
                        .any(|back| back.to_lowercase() == *skill_key);
                    if !reciprocal {
                        issues.push(ConflictIssue {
                            skill: skill_key.clone(),
                            kind: ConflictKind::AsymmetricConflict,
                            conflicts: vec![target.clone()],
                            message: Some(format!(
                                "{skill_key} conflicts with {target} but not vice versa"
                            )),
                        });
                    }
                }
            }
        }
    }

    issues
}

/// Color states for cycle detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Node has not been visited.
    White,
    /// Node is on the current traversal path.
    Gray,
    /// Node has been fully explored.
    Black,
}

/// One suspended level of the depth-first traversal.
struct Frame {
    node: NodeIndex,
    neighbors: Vec<NodeIndex>,
    cursor: usize,
}

/// Directed dependency graph over the skill map's keys.
///
/// Edges follow `depends_on` declarations whose targets exist in the map;
/// declarations naming unknown skills contribute no edge and are never
/// flagged here. Soft `optional` edges are not part of the graph.
pub struct SkillGraph {
    graph: DiGraph<String, ()>,
    node_indices: HashMap<String, NodeIndex>,
}

impl SkillGraph {
    /// Build the graph from a skill map.
    ///
    /// Nodes are inserted in the map's sorted key order, so traversal
    /// order and therefore cycle reporting order are deterministic.
    #[must_use]
    pub fn from_map(map: &SkillMap) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();

        for key in map.keys() {
            let index = graph.add_node(key.clone());
            node_indices.insert(key.clone(), index);
        }

        for (key, entry) in map {
            let from = node_indices[key];
            for dep in &entry.depends_on {
                if let Some(&to) = node_indices.get(&dep.to_lowercase())
                    && !graph.contains_edge(from, to)
                {
                    graph.add_edge(from, to, ());
                }
            }
        }

        Self {
            graph,
            node_indices,
        }
    }

    /// Total number of skills in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Total number of resolved dependency edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Find every dependency cycle in the graph.
    ///
    /// Runs a depth-first search from each unexplored node with an explicit
    /// frame stack, so pathological dependency chains cannot overflow the
    /// call stack. Node states move unvisited, in-progress, done; hitting
    /// an in-progress node emits the slice of the current path that starts
    /// at that node as one cycle record. A self-dependency yields a
    /// one-element record.
    ///
    /// Cycles reachable from multiple starting points are reported once,
    /// because the first traversal to finish marks their nodes done. No
    /// rotation canonicalization is applied; records read in the order the
    /// traversal walked them.
    #[must_use]
    pub fn detect_cycles(&self) -> Vec<Vec<String>> {
        let mut colors: HashMap<NodeIndex, Color> =
            self.graph.node_indices().map(|node| (node, Color::White)).collect();
        let mut cycles = Vec::new();

        // node_indices() iterates in insertion order, which is sorted key order
        for start in self.graph.node_indices() {
            if colors[&start] != Color::White {
                continue;
            }

            let mut path: Vec<NodeIndex> = Vec::new();
            let mut stack: Vec<Frame> = Vec::new();

            colors.insert(start, Color::Gray);
            path.push(start);
            stack.push(self.frame_for(start));

            while !stack.is_empty() {
                let top = stack.len() - 1;
                let next = {
                    let frame = &mut stack[top];
                    if let Some(&neighbor) = frame.neighbors.get(frame.cursor) {
                        frame.cursor += 1;
                        Some(neighbor)
                    } else {
                        None
                    }
                };

                match next {
                    Some(next) => match colors[&next] {
                        Color::Gray => {
                            // Gray nodes are always on the current path
                            let cycle_start =
                                path.iter().position(|&node| node == next).unwrap();
                            cycles.push(
                                path[cycle_start..]
                                    .iter()
                                    .map(|&node| self.graph[node].clone())
                                    .collect(),
                            );
                        }
                        Color::White => {
                            colors.insert(next, Color::Gray);
                            path.push(next);
                            stack.push(self.frame_for(next));
                        }
                        Color::Black => {}
                    },
                    None => {
                        if let Some(finished) = stack.pop() {
                            path.pop();
                            colors.insert(finished.node, Color::Black);
                        }
                    }
                }
            }
        }

        cycles
    }

    fn frame_for(&self, node: NodeIndex) -> Frame {
        // petgraph returns neighbors most-recent-edge-first; reverse to
        // walk dependencies in declaration order
        let mut neighbors: Vec<NodeIndex> = self.graph.neighbors(node).collect();
        neighbors.reverse();
        Frame {
            node,
            neighbors,
            cursor: 0,
        }
    }
}
