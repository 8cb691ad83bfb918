use swipd_core::Direction;

/// Turns a chronological coordinate sequence into one of the four compass
/// directions, or `None` when there is not enough data.
///
/// Only the net displacement over the whole sequence matters, which makes
/// this robust against per sample jitter. The sequence is walked most recent
/// first and the adjacent deltas are summed; the sum telescopes to
/// last-minus-first, so a swipe towards decreasing y is `North` and a swipe
/// towards increasing x is `East`.
pub fn infer(coords: &[(i32, i32)]) -> Option<Direction> {
    let reversed: Vec<(i32, i32)> = coords.iter().rev().cloned().collect();
    if reversed.len() < 2 {
        return None;
    }

    let (dx, dy) = reversed.windows(2).fold((0, 0), |(dx, dy), pair| {
        (dx + pair[0].0 - pair[1].0, dy + pair[0].1 - pair[1].1)
    });

    if dx.abs() < dy.abs() {
        // more movement along the y axis
        Some(if dy < 0 {
            Direction::North
        } else {
            Direction::South
        })
    } else {
        // equal |dx| and |dy| lands here because the comparison is strict
        Some(if dx < 0 {
            Direction::West
        } else {
            Direction::East
        })
    }
}
