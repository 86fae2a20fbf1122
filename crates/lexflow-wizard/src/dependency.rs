//! Task dependency graph
//!
//! Edges point from a task to the tasks it waits on. Built fresh from the
//! task list whenever a dependency is checked; the list stays the source of
//! truth.

use crate::error::ShapingError;
use lexflow_template::{Task, TaskId};
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Adjacency view over a task list
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    order: Vec<TaskId>,
    adjacency: BTreeMap<TaskId, Vec<TaskId>>,
}

impl DependencyGraph {
    /// Build the graph from tasks, in list order
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut graph = Self::default();
        for task in tasks {
            graph.order.push(task.id);
            graph
                .adjacency
                .insert(task.id, task.dependencies.clone());
        }
        graph
    }

    /// Number of tasks
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    /// Number of dependency edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Direct dependencies of a task
    #[must_use]
    pub fn dependencies(&self, task: TaskId) -> &[TaskId] {
        self.adjacency.get(&task).map_or(&[], Vec::as_slice)
    }

    /// Check if making `task` wait on `dependency` would close a cycle
    #[must_use]
    pub fn would_create_cycle(&self, task: TaskId, dependency: TaskId) -> bool {
        task == dependency || self.path(dependency, task).is_some()
    }

    /// The cycle `task -> dependency -> ... -> task` an edge would close
    #[must_use]
    pub fn cycle_through(&self, task: TaskId, dependency: TaskId) -> Option<Vec<TaskId>> {
        if task == dependency {
            return Some(vec![task, task]);
        }
        let mut path = self.path(dependency, task)?;
        path.insert(0, task);
        Some(path)
    }

    /// A dependency path from `source` to `target`, both included
    #[must_use]
    pub fn path(&self, source: TaskId, target: TaskId) -> Option<Vec<TaskId>> {
        let mut parent: HashMap<TaskId, TaskId> = HashMap::new();
        let mut visited = HashSet::new();
        let mut stack = vec![source];

        while let Some(node) = stack.pop() {
            if node == target {
                let mut path = vec![node];
                let mut current = node;
                while let Some(&prev) = parent.get(&current) {
                    path.push(prev);
                    current = prev;
                }
                path.reverse();
                return Some(path);
            }
            if !visited.insert(node) {
                continue;
            }
            for &next in self.dependencies(node) {
                if !visited.contains(&next) {
                    parent.entry(next).or_insert(node);
                    stack.push(next);
                }
            }
        }

        None
    }

    /// Find any cycle, returned with its first task repeated at the end
    #[must_use]
    pub fn find_cycle(&self) -> Option<Vec<TaskId>> {
        fn dfs(
            node: TaskId,
            graph: &DependencyGraph,
            visiting: &mut Vec<TaskId>,
            visited: &mut HashSet<TaskId>,
        ) -> Option<Vec<TaskId>> {
            if let Some(pos) = visiting.iter().position(|&n| n == node) {
                let mut cycle = visiting[pos..].to_vec();
                cycle.push(node);
                return Some(cycle);
            }
            if visited.contains(&node) {
                return None;
            }

            visiting.push(node);
            for &next in graph.dependencies(node) {
                if let Some(cycle) = dfs(next, graph, visiting, visited) {
                    return Some(cycle);
                }
            }
            visiting.pop();
            visited.insert(node);
            None
        }

        let mut visiting = Vec::new();
        let mut visited = HashSet::new();
        for &node in &self.order {
            if let Some(cycle) = dfs(node, self, &mut visiting, &mut visited) {
                return Some(cycle);
            }
        }
        None
    }

    /// Tasks ordered so every dependency comes before its dependents
    ///
    /// Dependencies on ids outside the task list are ignored.
    ///
    /// # Errors
    /// `ShapingError::CyclicDependency` if the graph has a cycle.
    pub fn topological_order(&self) -> Result<Vec<TaskId>, ShapingError> {
        let mut graph = DiGraphMap::<TaskId, ()>::new();
        for &task in &self.order {
            graph.add_node(task);
        }
        for &task in &self.order {
            for &dependency in self.dependencies(task) {
                if self.adjacency.contains_key(&dependency) {
                    graph.add_edge(dependency, task, ());
                }
            }
        }

        toposort(&graph, None).map_err(|_| ShapingError::CyclicDependency {
            path: self.find_cycle().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexflow_template::Priority;

    fn task(dependencies: Vec<TaskId>) -> Task {
        Task {
            id: TaskId::new(),
            name: "task".to_string(),
            description: String::new(),
            stage_id: None,
            estimated_hours: 1.0,
            priority: Priority::Medium,
            assignee_role: None,
            due_days_after_start: 0,
            dependencies,
            is_automatic: false,
        }
    }

    #[test]
    fn chain_detects_back_edge() {
        let a = task(vec![]);
        let b = task(vec![a.id]);
        let c = task(vec![b.id]);
        let graph = DependencyGraph::from_tasks(&[a.clone(), b.clone(), c.clone()]);

        assert_eq!(graph.edge_count(), 2);
        assert!(graph.would_create_cycle(a.id, c.id));
        assert!(!graph.would_create_cycle(c.id, a.id));
        assert_eq!(
            graph.cycle_through(a.id, c.id),
            Some(vec![a.id, c.id, b.id, a.id])
        );
    }

    #[test]
    fn self_edge_is_a_cycle() {
        let a = task(vec![]);
        let graph = DependencyGraph::from_tasks(std::slice::from_ref(&a));
        assert!(graph.would_create_cycle(a.id, a.id));
    }

    #[test]
    fn topological_order_puts_dependencies_first() {
        let a = task(vec![]);
        let b = task(vec![a.id]);
        let c = task(vec![a.id, b.id]);
        let graph = DependencyGraph::from_tasks(&[c.clone(), b.clone(), a.clone()]);

        let order = graph.topological_order().unwrap();
        let pos = |id| order.iter().position(|&t| t == id).unwrap();
        assert!(pos(a.id) < pos(b.id));
        assert!(pos(b.id) < pos(c.id));
    }

    #[test]
    fn existing_cycle_is_reported() {
        let mut a = task(vec![]);
        let b = task(vec![a.id]);
        a.dependencies.push(b.id);
        let graph = DependencyGraph::from_tasks(&[a.clone(), b.clone()]);

        let cycle = graph.find_cycle().unwrap();
        assert_eq!(cycle.first(), cycle.last());
        assert_eq!(cycle.len(), 3);
        assert!(matches!(
            graph.topological_order(),
            Err(ShapingError::CyclicDependency { .. })
        ));
    }

    #[test]
    fn unknown_dependencies_are_ignored_for_ordering() {
        let a = task(vec![TaskId::new()]);
        let graph = DependencyGraph::from_tasks(std::slice::from_ref(&a));
        assert_eq!(graph.topological_order().unwrap(), vec![a.id]);
    }
}
