use rand::Rng;

use crate::*;

/// Picks `count` distinct items uniformly at random, in no particular order.
///
/// `items` is left untouched, picks are drawn from a private copy using swap-removal. Not suitable for adversarial or
/// cryptographic use.
pub fn choose_without_replacement<T, R>(items: &[T], count: usize, rng: &mut R) -> Result<Vec<T>>
where
    T: Clone,
    R: Rng + ?Sized,
{
    if count > items.len() {
        return Err(GameError::NotEnoughCandidates {
            requested: count,
            available: items.len(),
        });
    }

    let mut remaining = items.to_vec();
    let mut chosen = Vec::with_capacity(count);
    while chosen.len() < count {
        let index = rng.random_range(0..remaining.len());
        chosen.push(remaining.swap_remove(index));
    }
    Ok(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn chooses_distinct_items_from_input() {
        let mut rng = SmallRng::seed_from_u64(7);
        let items: Vec<u32> = (0..50).collect();

        let mut chosen = choose_without_replacement(&items, 20, &mut rng).unwrap();

        assert_eq!(chosen.len(), 20);
        assert!(chosen.iter().all(|item| items.contains(item)));
        chosen.sort_unstable();
        chosen.dedup();
        assert_eq!(chosen.len(), 20);
    }

    #[test]
    fn input_is_not_mutated() {
        let mut rng = SmallRng::seed_from_u64(1);
        let items = vec!['a', 'b', 'c', 'd'];

        choose_without_replacement(&items, 3, &mut rng).unwrap();

        assert_eq!(items, ['a', 'b', 'c', 'd']);
    }

    #[test]
    fn choosing_everything_returns_a_permutation() {
        let mut rng = SmallRng::seed_from_u64(3);
        let items = [5, 6, 7];

        let mut chosen = choose_without_replacement(&items, 3, &mut rng).unwrap();
        chosen.sort_unstable();

        assert_eq!(chosen, [5, 6, 7]);
        assert!(choose_without_replacement(&items, 0, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn rejects_count_above_len() {
        let mut rng = SmallRng::seed_from_u64(0);

        assert_eq!(
            choose_without_replacement(&[1, 2], 3, &mut rng),
            Err(GameError::NotEnoughCandidates {
                requested: 3,
                available: 2
            })
        );
    }

    #[test]
    fn every_item_gets_picked_eventually() {
        let mut rng = SmallRng::seed_from_u64(42);
        let items: Vec<usize> = (0..6).collect();
        let mut seen = [false; 6];

        for _ in 0..200 {
            for item in choose_without_replacement(&items, 1, &mut rng).unwrap() {
                seen[item] = true;
            }
        }

        assert!(seen.iter().all(|&hit| hit));
    }
}
