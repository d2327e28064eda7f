/// Splits a sequence into fixed-size pages, numbered from 1.
pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: u32,
    page_count: u32,
}

impl<'a, T> Paginator<'a, T> {
    /// A page size of 0 is treated as 1.
    pub fn from(items: &'a [T], page_size: u32) -> Self {
        let page_size = page_size.max(1);
        let item_count = items.len() as u32;
        let page_count = item_count.div_ceil(page_size);

        Paginator {
            items,
            page_size,
            page_count,
        }
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Page 0 and pages past the last one are empty.
    pub fn get_page(&self, page: u32) -> &'a [T] {
        if page == 0 || page > self.page_count {
            return &[];
        }

        let start = ((page - 1) * self.page_size) as usize;
        let end = (start + self.page_size as usize).min(self.items.len());
        &self.items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_case() {
        let items = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13];
        let paginator = Paginator::from(&items, 3);
        assert_eq!(paginator.page_count(), 5);
        assert_eq!(paginator.item_count(), 13);
        assert_eq!(paginator.get_page(1), [1, 2, 3]);
        assert_eq!(paginator.get_page(2), [4, 5, 6]);
        assert_eq!(paginator.get_page(3), [7, 8, 9]);
        assert_eq!(paginator.get_page(4), [10, 11, 12]);
        assert_eq!(paginator.get_page(5), [13]);
    }

    #[test]
    fn test_out_of_range_is_empty() {
        let items = vec![1, 2, 3, 4];
        let paginator = Paginator::from(&items, 3);
        assert!(paginator.get_page(0).is_empty());
        assert!(paginator.get_page(3).is_empty());
        assert!(paginator.get_page(u32::MAX).is_empty());
    }

    #[test]
    fn test_empty() {
        let items: Vec<u32> = vec![];
        let paginator = Paginator::from(&items, 3);
        assert_eq!(paginator.page_count(), 0);
        assert!(paginator.get_page(0).is_empty());
        assert!(paginator.get_page(1).is_empty());
    }

    #[test]
    fn test_eight_items_six_per_page() {
        let items: Vec<u32> = (1..=8).collect();
        let paginator = Paginator::from(&items, 6);
        assert_eq!(paginator.page_count(), 2);
        assert_eq!(paginator.get_page(1).len(), 6);
        assert_eq!(paginator.get_page(2), [7, 8]);
    }

    #[test]
    fn test_page_larger_than_items() {
        let items = vec!["a", "b"];
        let paginator = Paginator::from(&items, 10);
        assert_eq!(paginator.page_count(), 1);
        assert_eq!(paginator.get_page(1), ["a", "b"]);
    }

    #[test]
    fn test_zero_page_size() {
        let items = vec![1, 2];
        let paginator = Paginator::from(&items, 0);
        assert_eq!(paginator.page_count(), 2);
        assert_eq!(paginator.get_page(2), [2]);
    }

    #[test]
    fn test_pages_cover_everything_once() {
        let items: Vec<u32> = (0..23).collect();
        for page_size in 1..=25 {
            let paginator = Paginator::from(&items, page_size);
            let joined: Vec<u32> = (1..=paginator.page_count())
                .flat_map(|p| paginator.get_page(p).iter().copied())
                .collect();
            assert_eq!(joined, items);
        }
    }
}
