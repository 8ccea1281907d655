//! Depth-first dependency resolution over local packages.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::collection::{Collection, Named};
use crate::error::{Error, Result};

/// The dependency relation of a [`Node`].
///
/// Dependencies are exposed either positionally or keyed by name; both
/// shapes are flattened into one ordered sequence before traversal.
pub enum Children<'a, T> {
    Empty,
    Collection(&'a Collection<T>),
    Ordered(&'a [Arc<T>]),
    Named(&'a IndexMap<String, Arc<T>>),
}

impl<T: Named> Children<'_, T> {
    /// Flattens the relation into traversal order.
    pub fn into_ordered(self) -> Vec<Arc<T>> {
        match self {
            Children::Empty => Vec::new(),
            Children::Collection(collection) => collection.to_vec(),
            Children::Ordered(items) => items.to_vec(),
            Children::Named(map) => map.values().cloned().collect(),
        }
    }
}

/// A participant in dependency resolution.
pub trait Node: Named + Sized {
    fn children(&self) -> Children<'_, Self>;
}

/// Per-traversal visit state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitStatus {
    Unseen,
    InProgress,
    Done,
}

/// A node on the traversal stack and how far into its children the walk is.
struct Frame<T> {
    node: Arc<T>,
    children: Vec<Arc<T>>,
    next: usize,
}

struct Traversal<'r, T> {
    root: &'r str,
    status: FxHashMap<String, VisitStatus>,
    stack: Vec<Frame<T>>,
    closure: Collection<T>,
}

impl<'r, T: Node> Traversal<'r, T> {
    fn new(root: &'r str) -> Self {
        Self {
            root,
            status: FxHashMap::default(),
            stack: Vec::new(),
            closure: Collection::new(),
        }
    }

    #[inline]
    fn status(&self, name: &str) -> VisitStatus {
        self.status
            .get(name)
            .copied()
            .unwrap_or(VisitStatus::Unseen)
    }

    /// Walks everything reachable from `root` with an explicit stack, so
    /// dependency depth is bounded by heap rather than thread stack.
    fn run(&mut self, root: &Arc<T>) -> Result<()> {
        self.enter(root)?;

        loop {
            let next = match self.stack.last_mut() {
                Some(frame) => {
                    let child = frame.children.get(frame.next).cloned();
                    frame.next += 1;
                    child
                }
                None => return Ok(()),
            };

            match next {
                Some(child) => self.enter(&child)?,
                None => self.leave(),
            }
        }
    }

    fn enter(&mut self, node: &Arc<T>) -> Result<()> {
        match self.status(node.name()) {
            VisitStatus::Done => Ok(()),
            VisitStatus::InProgress => Err(self.cycle_through(node.name())),
            VisitStatus::Unseen => {
                self.status
                    .insert(node.name().to_string(), VisitStatus::InProgress);
                self.stack.push(Frame {
                    node: Arc::clone(node),
                    children: node.children().into_ordered(),
                    next: 0,
                });
                Ok(())
            }
        }
    }

    fn leave(&mut self) {
        let Some(Frame { node, .. }) = self.stack.pop() else {
            return;
        };

        if node.name() != self.root {
            trace!(package = node.name(), "dependency resolved");
            self.closure.add(Arc::clone(&node));
        }
        self.status.insert(node.name().to_string(), VisitStatus::Done);
    }

    /// Builds the error for a revisit of `name` while it is still on the stack.
    fn cycle_through(&self, name: &str) -> Error {
        let start = self
            .stack
            .iter()
            .position(|frame| frame.node.name() == name)
            .unwrap_or(0);
        let mut path: Vec<String> = self.stack[start..]
            .iter()
            .map(|frame| frame.node.name().to_string())
            .collect();
        path.push(name.to_string());
        Error::CyclicDependency { path }
    }
}

/// Computes every local dependency of `root`, transitively.
///
/// The result is in post-order: each package appears after all of its own
/// dependencies, so it is safe to process front to back. `root` itself is
/// never part of the result.
///
/// # Errors
///
/// Returns [`Error::CyclicDependency`] with the offending path if the
/// dependency relation reachable from `root` contains a cycle.
pub fn resolve<T: Node>(root: &Arc<T>) -> Result<Collection<T>> {
    let mut traversal = Traversal::new(root.name());
    traversal.run(root)?;
    debug!(
        root = root.name(),
        dependencies = traversal.closure.len(),
        "resolved dependency closure"
    );
    Ok(traversal.closure)
}

/// Unions the closures of several roots, in root order.
///
/// A root only appears in the result if another root depends on it.
///
/// # Errors
///
/// Propagates the first [`Error::CyclicDependency`] found.
pub fn resolve_all<'a, T, I>(roots: I) -> Result<Collection<T>>
where
    T: Node + 'a,
    I: IntoIterator<Item = &'a Arc<T>>,
{
    let mut union = Collection::new();
    for root in roots {
        union.extend_from(&resolve(root)?);
    }
    Ok(union)
}

/// Orders `roots` together with everything they depend on.
///
/// Each root is placed directly after its own closure, giving one linear
/// order in which every package follows its local dependencies.
///
/// # Errors
///
/// Propagates the first [`Error::CyclicDependency`] found.
pub fn resolve_inclusive<'a, T, I>(roots: I) -> Result<Collection<T>>
where
    T: Node + 'a,
    I: IntoIterator<Item = &'a Arc<T>>,
{
    let mut ordered = Collection::new();
    for root in roots {
        ordered.extend_from(&resolve(root)?);
        ordered.add(Arc::clone(root));
    }
    Ok(ordered)
}
