//! Sierpinski subdivision.
//!
//! Two realizations of the same contract:
//! - [`subdivide`] returns a lazy, cloneable iterator over leaf triangles
//! - [`for_each_leaf`] pushes each leaf into a sink callback
//!
//! Both emit leaves in the same order (A-corner, C-corner, B-corner at every
//! level), so they are interchangeable.

use std::iter::FusedIterator;

use super::Triangle;

/// Number of leaves produced at `depth` (3^depth), saturating at `u64::MAX`.
#[inline]
pub fn leaf_count(depth: u32) -> u64 {
    3u64.saturating_pow(depth)
}

/// Returns the leaf triangles of `triangle` subdivided `depth` times.
///
/// `depth == 0` yields `triangle` itself. The iterator is `Clone`; a clone
/// replays the remaining sequence.
#[inline]
pub fn subdivide(triangle: Triangle, depth: u32) -> Subdivide {
    Subdivide::new(triangle, depth)
}

/// Calls `sink` once per leaf triangle, in the same order as [`subdivide`].
pub fn for_each_leaf<F>(triangle: Triangle, depth: u32, mut sink: F)
where
    F: FnMut(Triangle),
{
    fn recurse<F: FnMut(Triangle)>(t: Triangle, depth: u32, sink: &mut F) {
        if depth == 0 {
            sink(t);
            return;
        }
        for child in t.corners() {
            recurse(child, depth - 1, sink);
        }
    }

    recurse(triangle, depth, &mut sink);
}

/// Lazy iterator over leaf triangles.
///
/// Uses an explicit work stack that grows by two entries per level descended.
/// Once `f32` midpoints stop moving (the A-corner child equals its parent),
/// the remaining levels of that chain are walked one at a time instead of
/// being stacked, so even `u32::MAX` yields its first leaf after a few dozen
/// steps.
#[derive(Debug, Clone)]
pub struct Subdivide {
    stack: Vec<Work>,
    /// Leaves left to yield; `u64::MAX` means the count saturated.
    remaining: u64,
}

#[derive(Debug, Clone)]
enum Work {
    /// Subdivide the triangle `depth` more times.
    Node(Triangle, u32),
    /// C-corner then B-corner subtrees at `level`, then at each deeper level
    /// below `depth`. Left behind by a triangle that is its own A-corner.
    Chain {
        c: Triangle,
        b: Triangle,
        level: u32,
        depth: u32,
    },
}

impl Subdivide {
    pub fn new(triangle: Triangle, depth: u32) -> Self {
        Self {
            stack: vec![Work::Node(triangle, depth)],
            remaining: leaf_count(depth),
        }
    }

    fn emit(&mut self, t: Triangle) -> Option<Triangle> {
        if self.remaining != u64::MAX {
            self.remaining = self.remaining.saturating_sub(1);
        }
        Some(t)
    }
}

impl Iterator for Subdivide {
    type Item = Triangle;

    fn next(&mut self) -> Option<Triangle> {
        while let Some(work) = self.stack.pop() {
            match work {
                Work::Node(t, 0) => return self.emit(t),

                Work::Node(t, depth) => {
                    let [ca, cc, cb] = t.corners();

                    if ca == t {
                        // Every A-corner below is `t` again: its first leaf is
                        // `t`, followed by the C and B subtrees of each level.
                        self.stack.push(Work::Chain {
                            c: cc,
                            b: cb,
                            level: 0,
                            depth,
                        });
                        return self.emit(t);
                    }

                    // Reversed so the A-corner pops first.
                    self.stack.push(Work::Node(cb, depth - 1));
                    self.stack.push(Work::Node(cc, depth - 1));
                    self.stack.push(Work::Node(ca, depth - 1));
                }

                Work::Chain { c, b, level, depth } => {
                    if level + 1 < depth {
                        self.stack.push(Work::Chain {
                            c,
                            b,
                            level: level + 1,
                            depth,
                        });
                    }
                    self.stack.push(Work::Node(b, level));
                    self.stack.push(Work::Node(c, level));
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.remaining == u64::MAX {
            return (usize::MAX, None);
        }
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for Subdivide {}
