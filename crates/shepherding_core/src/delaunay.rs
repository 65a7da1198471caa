//! Incremental Bowyer–Watson triangulation.
//!
//! Two points share a Voronoi ridge exactly when they share a Delaunay edge, so
//! the adjacency produced here is the Voronoi neighborhood of every point.

use crate::geometry::EPSILON;
use shepherding_data::Vec2;

#[derive(Debug, Clone, Copy)]
struct Triangle {
    v: [usize; 3],
    centre: Vec2,
    radius_sq: f64,
}

impl Triangle {
    fn new(v: [usize; 3], pts: &[Vec2]) -> Option<Self> {
        let (a, b, c) = (pts[v[0]], pts[v[1]], pts[v[2]]);
        let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
        let scale = (b - a).length() * (c - a).length();
        if d.abs() <= scale * 1e-12 {
            return None;
        }
        let a2 = a.dot(a);
        let b2 = b.dot(b);
        let c2 = c.dot(c);
        let centre = Vec2::new(
            (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
            (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
        );
        let dx = a - centre;
        Some(Self {
            v,
            centre,
            radius_sq: dx.dot(dx),
        })
    }

    fn circumcircle_contains(&self, p: Vec2) -> bool {
        let d = p - self.centre;
        d.dot(d) <= self.radius_sq * (1.0 + 1e-12)
    }

    fn has_edge(&self, a: usize, b: usize) -> bool {
        self.v.contains(&a) && self.v.contains(&b)
    }
}

/// Neighbor lists (ascending) for every input point.
///
/// Points coinciding with an earlier point are left out of the triangulation
/// and get no neighbors. Fewer than two points yield empty lists.
#[must_use]
pub fn neighbors(points: &[Vec2]) -> Vec<Vec<usize>> {
    let n = points.len();
    let mut adjacency = vec![Vec::new(); n];
    if n < 2 {
        return adjacency;
    }

    let mut inserted: Vec<usize> = Vec::with_capacity(n);
    for (i, p) in points.iter().enumerate() {
        if !p.is_finite() {
            continue;
        }
        if inserted
            .iter()
            .any(|&j| points[j].distance_to(*p) < EPSILON)
        {
            continue;
        }
        inserted.push(i);
    }
    if inserted.len() < 2 {
        return adjacency;
    }

    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for &i in &inserted {
        let p = points[i];
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let span = (max_x - min_x).max(max_y - min_y).max(1.0);
    let mid = Vec2::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);

    // Input points keep their indices; the super-triangle follows them.
    let mut pts: Vec<Vec2> = points.to_vec();
    let s0 = pts.len();
    pts.push(Vec2::new(mid.x - 40.0 * span, mid.y - 20.0 * span));
    pts.push(Vec2::new(mid.x, mid.y + 40.0 * span));
    pts.push(Vec2::new(mid.x + 40.0 * span, mid.y - 20.0 * span));

    let Some(root) = Triangle::new([s0, s0 + 1, s0 + 2], &pts) else {
        return adjacency;
    };
    let mut triangles = vec![root];

    for &i in &inserted {
        let p = pts[i];
        let (bad, good): (Vec<Triangle>, Vec<Triangle>) = triangles
            .into_iter()
            .partition(|t| t.circumcircle_contains(p));
        triangles = good;

        let mut boundary: Vec<(usize, usize)> = Vec::new();
        for (k, t) in bad.iter().enumerate() {
            for e in 0..3 {
                let (a, b) = (t.v[e], t.v[(e + 1) % 3]);
                let shared = bad
                    .iter()
                    .enumerate()
                    .any(|(m, other)| m != k && other.has_edge(a, b));
                if !shared {
                    boundary.push((a, b));
                }
            }
        }

        for (a, b) in boundary {
            if let Some(t) = Triangle::new([a, b, i], &pts) {
                triangles.push(t);
            }
        }
    }

    for t in &triangles {
        for e in 0..3 {
            let (a, b) = (t.v[e], t.v[(e + 1) % 3]);
            if a >= s0 || b >= s0 {
                continue;
            }
            if !adjacency[a].contains(&b) {
                adjacency[a].push(b);
            }
            if !adjacency[b].contains(&a) {
                adjacency[b].push(a);
            }
        }
    }
    for list in &mut adjacency {
        list.sort_unstable();
    }
    adjacency
}
