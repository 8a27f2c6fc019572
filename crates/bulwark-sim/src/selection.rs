//! Weighted random selection and drop-chance rolls.
//!
//! All randomness flows through the session's generator so a seed fully
//! determines every pick.

use rand::Rng;

use bulwark_core::definitions::{EnemyDefinition, EnemyDropDefinition, EnemySpawnEntry};

/// Non-positive (or NaN) weights count as 1.
fn effective_weight(weight: f32) -> f32 {
    if weight > 0.0 {
        weight
    } else {
        1.0
    }
}

/// Pick an index with probability proportional to its weight.
///
/// `weight_of` returns `None` for candidates that must be skipped. A single
/// candidate is returned without consuming randomness. If the roll runs past
/// the cumulative total, the last valid candidate wins.
pub fn pick_weighted_index<T, R>(
    candidates: &[T],
    weight_of: impl Fn(&T) -> Option<f32>,
    rng: &mut R,
) -> Option<usize>
where
    R: Rng + ?Sized,
{
    match candidates {
        [] => return None,
        [only] => return weight_of(only).map(|_| 0),
        _ => {}
    }

    let total: f32 = candidates
        .iter()
        .filter_map(|c| weight_of(c))
        .map(effective_weight)
        .sum();
    if total <= 0.0 {
        return candidates.iter().position(|c| weight_of(c).is_some());
    }

    let roll = rng.gen::<f32>() * total;
    let mut cumulative = 0.0;
    let mut last_valid = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let Some(weight) = weight_of(candidate) else {
            continue;
        };
        cumulative += effective_weight(weight);
        last_valid = Some(index);
        if roll <= cumulative {
            return Some(index);
        }
    }
    last_valid
}

/// Choose an enemy archetype from the spawn table.
pub fn pick_spawn_definition<'a, R>(entries: &'a [EnemySpawnEntry], rng: &mut R) -> Option<&'a EnemyDefinition>
where
    R: Rng + ?Sized,
{
    let index = pick_weighted_index(entries, |e| e.definition.as_ref().map(|_| e.weight), rng)?;
    entries[index].definition.as_ref()
}

/// Draw up to `count` distinct indices from `0..pool_len`, equally weighted.
pub fn draw_distinct<R>(count: usize, pool_len: usize, rng: &mut R) -> Vec<usize>
where
    R: Rng + ?Sized,
{
    let mut remaining: Vec<usize> = (0..pool_len).collect();
    let mut picks = Vec::with_capacity(count.min(pool_len));
    while picks.len() < count {
        let Some(slot) = pick_weighted_index(&remaining, |_| Some(1.0), rng) else {
            break;
        };
        picks.push(remaining.remove(slot));
    }
    picks
}

/// Drop chance after the luck bonus, clamped into `[0, 1]`.
pub fn effective_drop_chance(base: f32, luck: f32, bonus_per_point: f32) -> f32 {
    (base + luck * bonus_per_point).clamp(0.0, 1.0)
}

/// Whether a drop-table entry pays out. Guaranteed drops skip the roll;
/// entries with no base chance never drop, whatever the luck.
pub fn roll_drop<R>(drop: &EnemyDropDefinition, luck: f32, bonus_per_point: f32, rng: &mut R) -> bool
where
    R: Rng + ?Sized,
{
    if drop.guaranteed {
        return true;
    }
    let base = drop.probability();
    if base <= 0.0 {
        return false;
    }
    rng.gen::<f32>() <= effective_drop_chance(base, luck, bonus_per_point)
}
