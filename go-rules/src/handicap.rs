//! Traditional handicap placements on the star points.

use crate::Point;
use crate::error::GoError;

/// Largest traditional handicap for a board of the given dimension.
///
/// Only odd boards from 7x7 up have a centre star point, and only boards
/// from 13x13 up have side star points.
pub fn max_handicap(dimension: u8) -> u8 {
    match dimension {
        d if d < 7 || d.is_multiple_of(2) => 0,
        d if d < 13 => 5,
        _ => 9,
    }
}

/// Star points for a `count`-stone handicap, or `None` when the board has no
/// traditional placement for that many stones.
///
/// Corners fill first, starting with the diagonal left open for White. The
/// centre is used for odd counts from five, the side points from six.
pub fn standard_placements(dimension: u8, count: u8) -> Option<Vec<Point>> {
    if count < 2 || count > max_handicap(dimension) {
        return None;
    }

    // 4th line on large boards, 3rd line otherwise.
    let near = if dimension >= 13 { 4 } else { 3 };
    let far = dimension + 1 - near;
    let mid = dimension / 2 + 1;

    let corners = [(far, near), (near, far), (far, far), (near, near)];
    let mut chosen: Vec<(u8, u8)> = corners.into_iter().take(count.min(4) as usize).collect();
    if count >= 6 {
        chosen.extend([(near, mid), (far, mid)]);
    }
    if count >= 8 {
        chosen.extend([(mid, near), (mid, far)]);
    }
    if count >= 5 && count % 2 == 1 {
        chosen.push((mid, mid));
    }

    chosen
        .into_iter()
        .map(|(column, row)| Point::new(column, row).ok())
        .collect()
}

pub(crate) fn require_standard_placements(dimension: u8, count: u8) -> Result<Vec<Point>, GoError> {
    standard_placements(dimension, count).ok_or_else(|| {
        GoError::argument(format!(
            "no traditional placement for {count} handicap stones on a {dimension}x{dimension} board \
             (maximum {})",
            max_handicap(dimension)
        ))
    })
}
