//! CPU affinity model
//!
//! A tri-state tree mirroring the hardware topology (packages/cores/CPUs)
//! used by the interactive affinity panel to pin a process to a subset of
//! CPUs. When topology information is unavailable the tree degenerates to
//! a single flat level of CPU leaves.

use std::collections::BTreeSet;

/// Tri-state value of an affinity tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriState {
    Off,
    Partial,
    On,
}

/// One node of the affinity tree: either a leaf bound to a single CPU, or
/// an inner node (package/core) grouping other nodes.
#[derive(Debug, Clone)]
pub enum AffinityNode {
    Cpu {
        label: String,
        cpu: u32,
        on: bool,
    },
    Group {
        label: String,
        children: Vec<AffinityNode>,
    },
}

impl AffinityNode {
    pub fn leaf(label: impl Into<String>, cpu: u32, on: bool) -> Self {
        AffinityNode::Cpu {
            label: label.into(),
            cpu,
            on,
        }
    }

    pub fn group(label: impl Into<String>, children: Vec<AffinityNode>) -> Self {
        AffinityNode::Group {
            label: label.into(),
            children,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            AffinityNode::Cpu { label, .. } => label,
            AffinityNode::Group { label, .. } => label,
        }
    }

    pub fn children(&self) -> &[AffinityNode] {
        match self {
            AffinityNode::Cpu { .. } => &[],
            AffinityNode::Group { children, .. } => children,
        }
    }

    /// The node's tri-state: `On` iff every descendant leaf is on, `Off`
    /// iff every descendant leaf is off, `Partial` otherwise.
    pub fn state(&self) -> TriState {
        match self {
            AffinityNode::Cpu { on, .. } => {
                if *on {
                    TriState::On
                } else {
                    TriState::Off
                }
            }
            AffinityNode::Group { children, .. } => {
                let mut any_on = false;
                let mut any_off = false;
                for child in children {
                    match child.state() {
                        TriState::On => any_on = true,
                        TriState::Off => any_off = true,
                        TriState::Partial => {
                            any_on = true;
                            any_off = true;
                        }
                    }
                }
                match (any_on, any_off) {
                    (true, false) => TriState::On,
                    (false, true) | (false, false) => TriState::Off,
                    (true, true) => TriState::Partial,
                }
            }
        }
    }

    /// Force every leaf under this node to `on`.
    pub fn set_all(&mut self, on: bool) {
        match self {
            AffinityNode::Cpu { on: leaf_on, .. } => *leaf_on = on,
            AffinityNode::Group { children, .. } => {
                for child in children {
                    child.set_all(on);
                }
            }
        }
    }

    /// Toggle this node: if it is fully or partially on, switch it off;
    /// if it is off, switch it fully on. Mirrors the source's "select all /
    /// none" behavior on a Space keypress over an inner node.
    pub fn toggle(&mut self) {
        match self.state() {
            TriState::On | TriState::Partial => self.set_all(false),
            TriState::Off => self.set_all(true),
        }
    }

    fn collect_on(&self, out: &mut BTreeSet<u32>) {
        match self {
            AffinityNode::Cpu { cpu, on, .. } => {
                if *on {
                    out.insert(*cpu);
                }
            }
            AffinityNode::Group { children, .. } => {
                for child in children {
                    child.collect_on(out);
                }
            }
        }
    }

    fn set_leaf(&mut self, cpu: u32, on: bool) -> bool {
        match self {
            AffinityNode::Cpu {
                cpu: leaf_cpu,
                on: leaf_on,
                ..
            } => {
                if *leaf_cpu == cpu {
                    *leaf_on = on;
                    true
                } else {
                    false
                }
            }
            AffinityNode::Group { children, .. } => {
                let mut found = false;
                for child in children {
                    found |= child.set_leaf(cpu, on);
                }
                found
            }
        }
    }
}

/// The CPU affinity tree for one process, plus the committed set extracted
/// from it. `root` is a synthetic top-level group ("Package", "Core", ...
/// or a flat list of CPUs when no topology is known).
#[derive(Debug, Clone)]
pub struct Affinity {
    pub root: Vec<AffinityNode>,
}

impl Affinity {
    /// Build a flat (non-topological) affinity tree: one leaf per CPU.
    pub fn flat(num_cpus: u32, current: &BTreeSet<u32>) -> Self {
        let root = (0..num_cpus)
            .map(|cpu| AffinityNode::leaf(format!("CPU {cpu}"), cpu, current.contains(&cpu)))
            .collect();
        Affinity { root }
    }

    /// Build a two-level package/core topology tree from
    /// `(cpu, package_id, core_id)` tuples, as read from
    /// `/sys/devices/system/cpu/cpuN/topology/*` on Linux.
    pub fn from_topology(topo: &[(u32, u32, u32)], current: &BTreeSet<u32>) -> Self {
        use std::collections::BTreeMap;

        let mut packages: BTreeMap<u32, BTreeMap<u32, Vec<u32>>> = BTreeMap::new();
        for &(cpu, pkg, core) in topo {
            packages.entry(pkg).or_default().entry(core).or_default().push(cpu);
        }

        let root = packages
            .into_iter()
            .map(|(pkg_id, cores)| {
                let core_nodes = cores
                    .into_iter()
                    .map(|(core_id, cpus)| {
                        let leaves = cpus
                            .into_iter()
                            .map(|cpu| {
                                AffinityNode::leaf(format!("CPU {cpu}"), cpu, current.contains(&cpu))
                            })
                            .collect();
                        AffinityNode::group(format!("Core {core_id}"), leaves)
                    })
                    .collect();
                AffinityNode::group(format!("Package {pkg_id}"), core_nodes)
            })
            .collect();

        Affinity { root }
    }

    /// Extract the union of CPUs currently marked `on`.
    pub fn committed_set(&self) -> BTreeSet<u32> {
        let mut out = BTreeSet::new();
        for node in &self.root {
            node.collect_on(&mut out);
        }
        out
    }

    pub fn set_cpu(&mut self, cpu: u32, on: bool) {
        for node in &mut self.root {
            if node.set_leaf(cpu, on) {
                break;
            }
        }
    }

    /// Flatten the tree into display rows in depth-first order:
    /// `(row_index, depth, label, state)`. The returned `row_index`
    /// identifies the row for [`Affinity::toggle_row`].
    pub fn flatten(&self) -> Vec<(usize, usize, String, TriState)> {
        let mut out = Vec::new();
        for node in &self.root {
            flatten_into(node, 0, &mut out);
        }
        out
    }

    /// Toggle the node at the given flattened row index (as produced by
    /// [`Affinity::flatten`]).
    pub fn toggle_row(&mut self, row_index: usize) {
        let mut counter = 0usize;
        for node in &mut self.root {
            if toggle_at(node, row_index, &mut counter) {
                return;
            }
        }
    }
}

fn flatten_into(node: &AffinityNode, depth: usize, out: &mut Vec<(usize, usize, String, TriState)>) {
    let row = out.len();
    out.push((row, depth, node.label().to_string(), node.state()));
    for child in node.children() {
        flatten_into(child, depth + 1, out);
    }
}

fn toggle_at(node: &mut AffinityNode, target: usize, counter: &mut usize) -> bool {
    let here = *counter;
    *counter += 1;
    if here == target {
        node.toggle();
        return true;
    }
    match node {
        AffinityNode::Cpu { .. } => false,
        AffinityNode::Group { children, .. } => {
            for child in children {
                if toggle_at(child, target, counter) {
                    return true;
                }
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tristate_pure_off_on() {
        let leaf_off = AffinityNode::leaf("x", 0, false);
        assert_eq!(leaf_off.state(), TriState::Off);
        let leaf_on = AffinityNode::leaf("x", 0, true);
        assert_eq!(leaf_on.state(), TriState::On);
    }

    #[test]
    fn scenario_f_topology_toggle() {
        // package P with cores C0 {cpu0,cpu1}, C1 {cpu2,cpu3}
        let topo = [(0, 0, 0), (1, 0, 0), (2, 0, 1), (3, 0, 1)];
        let mut aff = Affinity::from_topology(&topo, &BTreeSet::new());
        assert_eq!(aff.root.len(), 1);

        // toggle P on
        aff.root[0].toggle();
        assert_eq!(aff.root[0].state(), TriState::On);

        // toggle cpu2 off
        aff.set_cpu(2, false);

        let state_of = |label: &str, node: &AffinityNode| -> TriState {
            node.children()
                .iter()
                .find(|c| c.label() == label)
                .unwrap()
                .state()
        };

        assert_eq!(aff.committed_set(), BTreeSet::from([0u32, 1, 3]));
        assert_eq!(state_of("Core 0", &aff.root[0]), TriState::On);
        assert_eq!(state_of("Core 1", &aff.root[0]), TriState::Partial);
        assert_eq!(aff.root[0].state(), TriState::Partial);
    }

    #[test]
    fn tristate_consistency_property(
    ) {
        // For any internal node: off iff all descendants off, on iff all on, partial otherwise.
        let topo = [(0, 0, 0), (1, 0, 0), (2, 1, 0), (3, 1, 0)];
        let mut aff = Affinity::from_topology(&topo, &BTreeSet::new());
        aff.set_cpu(0, true);
        aff.set_cpu(2, true);
        aff.set_cpu(3, true);
        // package 0: partial (cpu0 on, cpu1 off); package 1: on
        assert_eq!(aff.root[0].state(), TriState::Partial);
        assert_eq!(aff.root[1].state(), TriState::On);
    }

    #[test]
    fn flat_mode_without_topology() {
        let current = BTreeSet::from([1u32, 2]);
        let aff = Affinity::flat(4, &current);
        assert_eq!(aff.committed_set(), current);
    }

    #[test]
    fn flatten_and_toggle_row_roundtrip() {
        let topo = [(0, 0, 0), (1, 0, 0)];
        let mut aff = Affinity::from_topology(&topo, &BTreeSet::new());
        let rows = aff.flatten();
        // Package 0 / Core 0 / CPU 0 / CPU 1
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].2, "CPU 1");
        aff.toggle_row(2);
        assert_eq!(aff.committed_set(), BTreeSet::from([1u32]));
    }
}
