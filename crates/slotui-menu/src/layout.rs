//! Pure slot-layout arithmetic shared by menus and builders.

use crate::error::MenuError;

/// Resolve the slot index a shape character addresses.
///
/// Rows are scanned top to bottom and characters within a row left to
/// right; the first occurrence wins. The resolved index is the row index
/// plus the column index of that occurrence.
pub fn compute_slot_index(shape: Option<&[String]>, c: char) -> Result<usize, MenuError> {
    let shape = shape.ok_or(MenuError::ShapeNotSet)?;
    for (row, line) in shape.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            if ch == c {
                return Ok(row + col);
            }
        }
    }
    Err(MenuError::NoMatchingChar(c))
}

/// Smallest legal slot count covering `item_count` items: a multiple of
/// nine, at least one row and at most six.
pub fn calculate_slot_count(item_count: usize) -> usize {
    if item_count < 9 {
        9
    } else if item_count > 54 {
        54
    } else {
        item_count.div_ceil(9) * 9
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(rows: &[&str]) -> Vec<String> {
        rows.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn index_adds_row_and_column() {
        let s = shape(&["AB", "CD"]);
        assert_eq!(compute_slot_index(Some(&s), 'A'), Ok(0));
        assert_eq!(compute_slot_index(Some(&s), 'B'), Ok(1));
        assert_eq!(compute_slot_index(Some(&s), 'C'), Ok(1));
        assert_eq!(compute_slot_index(Some(&s), 'D'), Ok(2));
    }

    #[test]
    fn first_occurrence_wins() {
        let s = shape(&["XX", "_X"]);
        assert_eq!(compute_slot_index(Some(&s), 'X'), Ok(0));
    }

    #[test]
    fn missing_shape_and_missing_char() {
        assert_eq!(compute_slot_index(None, 'A'), Err(MenuError::ShapeNotSet));
        let s = shape(&["AB"]);
        assert_eq!(compute_slot_index(Some(&s), 'Z'), Err(MenuError::NoMatchingChar('Z')));
    }

    #[test]
    fn slot_count_bounds() {
        assert_eq!(calculate_slot_count(0), 9);
        assert_eq!(calculate_slot_count(8), 9);
        assert_eq!(calculate_slot_count(9), 9);
        assert_eq!(calculate_slot_count(10), 18);
        assert_eq!(calculate_slot_count(20), 27);
        assert_eq!(calculate_slot_count(54), 54);
        assert_eq!(calculate_slot_count(55), 54);
        assert_eq!(calculate_slot_count(100), 54);
    }
}
