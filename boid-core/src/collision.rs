use alloc::vec::Vec;

use crate::entity::SpaceObject;

/// Every overlapping `(a, b)` pair across the two sets, `a`-major.
///
/// An object never collides with itself, even if it appears in both sets.
pub fn detect<'a>(
    set_a: &'a [SpaceObject],
    set_b: &'a [SpaceObject],
) -> Vec<(&'a SpaceObject, &'a SpaceObject)> {
    let mut collisions = Vec::new();
    for a in set_a {
        for b in set_b {
            if a.id != b.id && a.overlaps(b) {
                collisions.push((a, b));
            }
        }
    }
    collisions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityId;
    use crate::vector::Vector2D;

    fn disc(id: u32, x: f32, radius: f32) -> SpaceObject {
        SpaceObject::ship(EntityId(id), Vector2D::new(x, 0.0), radius)
    }

    #[test]
    fn test_collision_threshold_is_strict() {
        let a = [disc(1, 0.0, 5.0)];
        let touching = [disc(2, 8.0, 3.0)];
        let overlapping = [disc(3, 8.0 - 1e-3, 3.0)];
        let apart = [disc(4, 9.0, 3.0)];

        assert!(detect(&a, &touching).is_empty());
        assert!(detect(&a, &apart).is_empty());
        assert_eq!(detect(&a, &overlapping).len(), 1);
    }

    #[test]
    fn test_self_pairs_are_skipped() {
        let set = [disc(1, 0.0, 5.0), disc(2, 1.0, 5.0)];
        let pairs: Vec<_> = detect(&set, &set)
            .into_iter()
            .map(|(a, b)| (a.id.0, b.id.0))
            .collect();
        assert_eq!(pairs, [(1, 2), (2, 1)]);
    }

    #[test]
    fn test_pairs_are_a_major() {
        let a = [disc(1, 0.0, 5.0), disc(2, 2.0, 5.0)];
        let b = [disc(10, 1.0, 1.0), disc(11, 3.0, 1.0)];
        let pairs: Vec<_> = detect(&a, &b)
            .into_iter()
            .map(|(a, b)| (a.id.0, b.id.0))
            .collect();
        assert_eq!(pairs, [(1, 10), (1, 11), (2, 10), (2, 11)]);
    }

    #[test]
    fn test_empty_sets() {
        let a = [disc(1, 0.0, 5.0)];
        assert!(detect(&a, &[]).is_empty());
        assert!(detect(&[], &a).is_empty());
    }
}
