//! Myers' diff in linear space: find the middle snake of the edit graph,
//! split there and recurse on both halves.
//!
//! Every search is bounded by [`MAX_COST`]. A region that cannot be matched
//! within that many edits is reported as one removal followed by one
//! insertion instead.

use derive_new::new;
use std::ops::{Index, IndexMut, Range};

/// Largest half edit distance searched before giving up on a region.
pub const MAX_COST: usize = 2048;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit<T> {
    Delete { value: T },
    Insert { value: T },
    Equal { value: T },
}

impl<T> Edit<T> {
    pub fn value(&self) -> &T {
        match self {
            Edit::Delete { value } | Edit::Insert { value } | Edit::Equal { value } => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MyersDiff<'d, T> {
    a: &'d [T],
    b: &'d [T],
    #[new(value = "MAX_COST")]
    max_cost: usize,
}

/// Furthest x reached on each diagonal `k = x - y`.
struct Frontier {
    offset: isize,
    xs: Vec<isize>,
}

impl Frontier {
    fn new(max_d: isize) -> Self {
        Frontier {
            offset: max_d + 1,
            xs: vec![0; 2 * max_d as usize + 3],
        }
    }

    /// Start of round `d` on diagonal `k`: an insertion from `k + 1` or a
    /// deletion from `k - 1`, whichever got further.
    fn step(&self, k: isize, d: isize) -> isize {
        if k == -d || (k != d && self[k - 1] < self[k + 1]) {
            self[k + 1]
        } else {
            self[k - 1] + 1
        }
    }
}

impl Index<isize> for Frontier {
    type Output = isize;

    fn index(&self, k: isize) -> &isize {
        &self.xs[(k + self.offset) as usize]
    }
}

impl IndexMut<isize> for Frontier {
    fn index_mut(&mut self, k: isize) -> &mut isize {
        &mut self.xs[(k + self.offset) as usize]
    }
}

impl<'d, T: Eq + Clone> MyersDiff<'d, T> {
    pub fn with_max_cost(mut self, max_cost: usize) -> Self {
        self.max_cost = max_cost;
        self
    }

    /// The edit script turning `a` into `b`. Within a changed run deletions
    /// come before insertions.
    pub fn diff(&self) -> Vec<Edit<T>> {
        let mut edits = Vec::with_capacity(self.a.len().max(self.b.len()));
        self.conquer(0..self.a.len(), 0..self.b.len(), &mut edits);

        for run in edits.split_mut(|edit| matches!(edit, Edit::Equal { .. })) {
            run.sort_by_key(|edit| matches!(edit, Edit::Insert { .. }));
        }

        edits
    }

    fn conquer(&self, mut a: Range<usize>, mut b: Range<usize>, edits: &mut Vec<Edit<T>>) {
        let prefix = common_prefix(&self.a[a.clone()], &self.b[b.clone()]);
        self.equal(a.start..a.start + prefix, edits);
        a.start += prefix;
        b.start += prefix;

        let suffix = common_suffix(&self.a[a.clone()], &self.b[b.clone()]);
        let tail = a.end - suffix..a.end;
        a.end -= suffix;
        b.end -= suffix;

        if a.is_empty() || b.is_empty() {
            self.replace(a, b, edits);
        } else if let Some((x, y)) = self.middle_snake(a.clone(), b.clone()) {
            self.conquer(a.start..x, b.start..y, edits);
            self.conquer(x..a.end, y..b.end, edits);
        } else {
            self.replace(a, b, edits);
        }

        self.equal(tail, edits);
    }

    /// A point on a shortest path through the region, strictly between its
    /// corners, or `None` when the search gives up.
    fn middle_snake(&self, a: Range<usize>, b: Range<usize>) -> Option<(usize, usize)> {
        let (old, new) = (&self.a[a.clone()], &self.b[b.clone()]);
        let (n, m) = (old.len() as isize, new.len() as isize);
        let delta = n - m;
        let odd = delta & 1 == 1;
        let max_d = ((n + m + 1) / 2 + 1).min(self.max_cost as isize);

        let mut forward = Frontier::new(max_d);
        // indexed in reversed coordinates, so diagonal `k` here is `delta - k` forwards
        let mut backward = Frontier::new(max_d);

        let split = |x: isize, y: isize| {
            let inside = (0..=n).contains(&x) && (0..=m).contains(&y) && (1..n + m).contains(&(x + y));
            inside.then(|| (a.start + x as usize, b.start + y as usize))
        };

        for d in 0..max_d {
            for k in (-d..=d).rev().step_by(2) {
                let mut x = forward.step(k, d);
                let (x0, y0) = (x, x - k);
                if (0..n).contains(&x) && (0..m).contains(&y0) {
                    x += common_prefix(&old[x as usize..], &new[y0 as usize..]) as isize;
                }
                forward[k] = x;

                if odd && (k - delta).abs() < d && forward[k] + backward[delta - k] >= n {
                    return split(x0, y0);
                }
            }

            for k in (-d..=d).rev().step_by(2) {
                let mut x = backward.step(k, d);
                let mut y = x - k;
                if (0..n).contains(&x) && (0..m).contains(&y) {
                    let run =
                        common_suffix(&old[..(n - x) as usize], &new[..(m - y) as usize]) as isize;
                    x += run;
                    y += run;
                }
                backward[k] = x;

                if !odd && (k - delta).abs() <= d && backward[k] + forward[delta - k] >= n {
                    return split(n - x, m - y);
                }
            }
        }

        None
    }

    fn equal(&self, range: Range<usize>, edits: &mut Vec<Edit<T>>) {
        edits.extend(self.a[range].iter().map(|value| Edit::Equal {
            value: value.clone(),
        }));
    }

    fn replace(&self, a: Range<usize>, b: Range<usize>, edits: &mut Vec<Edit<T>>) {
        edits.extend(self.a[a].iter().map(|value| Edit::Delete {
            value: value.clone(),
        }));
        edits.extend(self.b[b].iter().map(|value| Edit::Insert {
            value: value.clone(),
        }));
    }
}

fn common_prefix<T: Eq>(a: &[T], b: &[T]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix<T: Eq>(a: &[T], b: &[T]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}
