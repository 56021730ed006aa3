//! Pagination arithmetic for 1-based remote APIs.

use crate::core::PageRange;

/// Inclusive 1-based range for a batch starting at zero-based `start_index`.
///
/// No clamping: callers pass an already validated `batch_size >= 1`.
pub fn page_range(start_index: u64, batch_size: u64) -> PageRange {
    let start = start_index + 1;
    PageRange { start, end: start + batch_size - 1 }
}

/// Number of items covered by an inclusive range; inverse of [`page_range`].
///
/// Signed so a short or inverted response (`end < start`) comes out as zero
/// or negative instead of overflowing.
pub fn effective_size(start: u64, end: u64) -> i64 {
    end as i64 - start as i64 + 1
}

impl PageRange {
    /// Items covered; 0 for an inverted range.
    pub fn len(&self) -> u64 {
        u64::try_from(effective_size(self.start, self.end)).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Zero-based offset of the first item.
    pub fn offset(&self) -> u64 {
        self.start.saturating_sub(1)
    }
}

/// Consecutive ranges covering `total` items; the last one may be short.
pub fn page_ranges(total: u64, batch_size: u64) -> PageRanges {
    PageRanges { next: 0, total, batch_size: batch_size.max(1) }
}

/// Iterator returned by [`page_ranges`].
#[derive(Debug, Clone)]
pub struct PageRanges {
    next: u64,
    total: u64,
    batch_size: u64,
}

impl Iterator for PageRanges {
    type Item = PageRange;

    fn next(&mut self) -> Option<PageRange> {
        if self.next >= self.total {
            return None;
        }
        let size = self.batch_size.min(self.total - self.next);
        let range = page_range(self.next, size);
        self.next += size;
        Some(range)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total.saturating_sub(self.next).div_ceil(self.batch_size) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PageRanges {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_page_is_one_based() {
        assert_eq!(page_range(0, 20), PageRange { start: 1, end: 20 });
        assert_eq!(page_range(40, 20), PageRange { start: 41, end: 60 });
    }

    #[test]
    fn effective_size_inverts_range() {
        for start in [0, 1, 19, 1000] {
            for size in 1..=50 {
                let range = page_range(start, size);
                assert_eq!(effective_size(range.start, range.end), size as i64);
                assert_eq!(range.len(), size);
                assert_eq!(range.offset(), start);
            }
        }
    }

    #[test]
    fn inverted_range_counts_as_empty() {
        assert_eq!(effective_size(10, 9), 0);
        assert_eq!(effective_size(10, 5), -4);

        let inverted = PageRange { start: 10, end: 5 };
        assert!(inverted.is_empty());
        assert_eq!(inverted.len(), 0);
        assert!(!page_range(0, 1).is_empty());
    }

    #[test]
    fn zero_start_has_zero_offset() {
        let range = PageRange { start: 0, end: 4 };
        assert_eq!(range.offset(), 0);
        assert_eq!(range.len(), 5);
    }

    #[test]
    fn ranges_cover_total_exactly() {
        let ranges: Vec<_> = page_ranges(45, 20).collect();
        assert_eq!(
            ranges,
            vec![
                PageRange { start: 1, end: 20 },
                PageRange { start: 21, end: 40 },
                PageRange { start: 41, end: 45 },
            ]
        );
        assert_eq!(page_ranges(45, 20).len(), 3);
    }

    #[test]
    fn zero_batch_size_is_floored() {
        assert_eq!(page_ranges(3, 0).count(), 3);
        assert_eq!(page_ranges(0, 10).next(), None);
    }
}
