//! Collision against static geometry
//!
//! Trees are boxes of half-extent `radius` around points in an [`ObstacleSet`].
//! Walls are the square `(-bound, bound)` on x and y. Both checks work per axis:
//! an axis that would end up inside geometry is put back where it was before
//! the move, so the player slides along whatever they bump into.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Tree x-coordinate with a total order so it can key a `BTreeMap`
#[derive(Debug, Clone, Copy)]
struct TreeX(f32);

impl PartialEq for TreeX {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TreeX {}

impl PartialOrd for TreeX {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TreeX {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Tree positions sorted by x (x → y)
///
/// Built once at level load. Two trees with the same x collapse into the one
/// inserted last.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Vec2>", into = "Vec<Vec2>")]
pub struct ObstacleSet {
    trees: BTreeMap<TreeX, f32>,
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, x: f32, y: f32) {
        self.trees.insert(TreeX(x), y);
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Trees in ascending x
    pub fn iter(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.trees.iter().map(|(x, y)| Vec2::new(x.0, *y))
    }

    /// Tree with the greatest x that is `<= x`
    pub fn at_or_below(&self, x: f32) -> Option<Vec2> {
        self.trees
            .range(..=TreeX(x))
            .next_back()
            .map(|(tx, ty)| Vec2::new(tx.0, *ty))
    }

    /// Tree with the smallest x that is `>= x`
    pub fn at_or_above(&self, x: f32) -> Option<Vec2> {
        self.trees
            .range(TreeX(x)..)
            .next()
            .map(|(tx, ty)| Vec2::new(tx.0, *ty))
    }
}

impl FromIterator<Vec2> for ObstacleSet {
    fn from_iter<I: IntoIterator<Item = Vec2>>(iter: I) -> Self {
        let mut set = Self::new();
        for tree in iter {
            set.insert(tree.x, tree.y);
        }
        set
    }
}

impl From<Vec<Vec2>> for ObstacleSet {
    fn from(trees: Vec<Vec2>) -> Self {
        trees.into_iter().collect()
    }
}

impl From<ObstacleSet> for Vec<Vec2> {
    fn from(set: ObstacleSet) -> Self {
        set.iter().collect()
    }
}

/// Put back the axes of `new` that run into the trees nearest in x
///
/// Only the nearest tree at or below and the nearest at or above the new x are
/// considered; a missing neighbour is skipped. The x test pairs the new x with
/// the old y and the y test pairs the new y with the old x, so a diagonal move
/// past a corner keeps whichever axis is still clear.
pub fn resolve_trees(old: Vec3, new: Vec3, trees: &ObstacleSet, radius: f32) -> Vec3 {
    let mut resolved = new;
    let neighbours = [trees.at_or_below(new.x), trees.at_or_above(new.x)];
    for tree in neighbours.into_iter().flatten() {
        if (resolved.x - tree.x).abs() <= radius && (old.y - tree.y).abs() <= radius {
            resolved.x = old.x;
        }
        if (resolved.y - tree.y).abs() <= radius && (old.x - tree.x).abs() <= radius {
            resolved.y = old.y;
        }
    }
    resolved
}

/// Put back any axis of `new` that reaches the outer walls
pub fn resolve_walls(old: Vec3, new: Vec3, bound: f32) -> Vec3 {
    let mut resolved = new;
    if resolved.x >= bound || resolved.x <= -bound {
        resolved.x = old.x;
    }
    if resolved.y >= bound || resolved.y <= -bound {
        resolved.y = old.y;
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest() -> ObstacleSet {
        [
            Vec2::new(-20.0, 4.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(30.0, -5.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_neighbour_lookup() {
        let trees = forest();
        assert_eq!(trees.at_or_below(5.0), Some(Vec2::new(0.0, 10.0)));
        assert_eq!(trees.at_or_above(5.0), Some(Vec2::new(10.0, 0.0)));
        // Exact hits return the same tree both ways
        assert_eq!(trees.at_or_below(10.0), Some(Vec2::new(10.0, 0.0)));
        assert_eq!(trees.at_or_above(10.0), Some(Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn test_neighbour_lookup_past_the_ends() {
        let trees = forest();
        assert_eq!(trees.at_or_below(-50.0), None);
        assert_eq!(trees.at_or_above(-50.0), Some(Vec2::new(-20.0, 4.0)));
        assert_eq!(trees.at_or_above(50.0), None);
        assert_eq!(trees.at_or_below(50.0), Some(Vec2::new(30.0, -5.0)));
        assert_eq!(ObstacleSet::new().at_or_below(0.0), None);
    }

    #[test]
    fn test_same_x_keeps_last() {
        let mut trees = ObstacleSet::new();
        trees.insert(3.0, 1.0);
        trees.insert(3.0, 7.0);
        assert_eq!(trees.len(), 1);
        assert_eq!(trees.at_or_below(3.0), Some(Vec2::new(3.0, 7.0)));
    }

    #[test]
    fn test_walk_into_tree_reverts_x() {
        let trees = forest();
        let old = Vec3::new(8.4, 0.0, 2.0);
        let new = Vec3::new(8.6, 0.0, 2.0);
        let resolved = resolve_trees(old, new, &trees, 1.5);
        assert_eq!(resolved.x, 8.4);
        assert_eq!(resolved.y, 0.0);
    }

    #[test]
    fn test_clear_move_is_kept() {
        let trees = forest();
        let old = Vec3::new(5.0, 0.0, 2.0);
        let new = Vec3::new(5.2, 0.3, 2.0);
        assert_eq!(resolve_trees(old, new, &trees, 1.5), new);
    }

    #[test]
    fn test_slide_along_tree() {
        // Moving diagonally into the tree's side: x blocked, y still free
        let trees = forest();
        let old = Vec3::new(8.4, 1.0, 2.0);
        let new = Vec3::new(8.6, 1.2, 2.0);
        let resolved = resolve_trees(old, new, &trees, 1.5);
        assert_eq!(resolved.x, 8.4);
        assert_eq!(resolved.y, 1.2);
    }

    #[test]
    fn test_approach_from_above_reverts_y() {
        let trees = forest();
        let old = Vec3::new(10.0, 1.6, 2.0);
        let new = Vec3::new(10.0, 1.4, 2.0);
        let resolved = resolve_trees(old, new, &trees, 1.5);
        assert_eq!(resolved.y, 1.6);
    }

    #[test]
    fn test_walls() {
        let old = Vec3::new(98.9, -98.9, 2.0);
        let resolved = resolve_walls(old, Vec3::new(99.0, -99.1, 2.0), 99.0);
        assert_eq!(resolved, old);

        let inside = Vec3::new(10.0, -10.0, 2.0);
        assert_eq!(resolve_walls(old, inside, 99.0), inside);
    }

    #[test]
    fn test_serde_as_point_list() {
        let trees = forest();
        let json = serde_json::to_string(&trees).unwrap();
        let back: ObstacleSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trees);
        assert!(json.starts_with("[["));
    }
}
