/// Per-pixel escape counts for one frame, row-major.
///
/// Every value lies in `[0, iter_max]`; `iter_max` marks a pixel whose orbit
/// stayed bounded. Kept separate from colored pixels so a frame can be
/// recolored without re-iterating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationField {
    pub width: u32,
    pub height: u32,
    pub iter_max: u32,
    pub data: Vec<u32>,
}

impl IterationField {
    pub fn new(width: u32, height: u32, iter_max: u32) -> Self {
        Self {
            width,
            height,
            iter_max,
            data: vec![0; width as usize * height as usize],
        }
    }

    /// Escape count at column `x`, row `y`.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get((y * self.width + x) as usize).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of pixels that never escaped.
    pub fn bounded_count(&self) -> usize {
        self.data.iter().filter(|&&n| n >= self.iter_max).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_field_is_zeroed() {
        let f = IterationField::new(3, 2, 10);
        assert_eq!(f.data, vec![0; 6]);
        assert_eq!(f.bounded_count(), 0);
    }

    #[test]
    fn get_is_row_major_and_bounds_checked() {
        let mut f = IterationField::new(3, 2, 10);
        f.data[1 * 3 + 2] = 7;
        assert_eq!(f.get(2, 1), Some(7));
        assert_eq!(f.get(3, 0), None);
        assert_eq!(f.get(0, 2), None);
    }

    #[test]
    fn bounded_count_counts_iter_max() {
        let f = IterationField {
            width: 2,
            height: 2,
            iter_max: 5,
            data: vec![5, 1, 5, 4],
        };
        assert_eq!(f.bounded_count(), 2);
    }
}
