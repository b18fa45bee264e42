use crate::board::Board;
use crate::group;
use crate::intersection::Intersection;

/// Points each player holds on a cleaned board under area counting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct AreaCount {
    pub black: f64,
    pub white: f64,
}

/// Area (Chinese) counting: stones count for their owner, an empty region
/// counts for the colour it borders and is split evenly when it borders both.
/// A region bordering neither colour belongs to nobody.
pub(crate) fn count_area(board: &Board) -> AreaCount {
    let mut count = AreaCount::default();

    for group in group::partition(board, false) {
        let liberty = group.kind().counts_as_liberty();
        let black = group.kind() == Intersection::Black || (liberty && group.borders_black());
        let white = group.kind() == Intersection::White || (liberty && group.borders_white());

        let mut points = group.len() as f64;
        if black && white {
            points /= 2.0;
        }
        if black {
            count.black += points;
        }
        if white {
            count.white += points;
        }
    }

    count
}
