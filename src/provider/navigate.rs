use super::MaskedTextProvider;
use super::model::{CharDescriptor, Direction};

impl MaskedTextProvider {
    fn find_in_range(
        &self,
        start: usize,
        end: usize,
        direction: Direction,
        accept: impl Fn(&CharDescriptor) -> bool,
    ) -> Option<usize> {
        let last = self.len().checked_sub(1)?;
        let end = end.min(last);
        if start > end {
            return None;
        }

        let window = &self.descriptors[start..=end];
        let offset = match direction {
            Direction::Forward => window.iter().position(accept),
            Direction::Backward => window.iter().rposition(accept),
        };
        offset.map(|offset| start + offset)
    }

    fn range_from(&self, position: usize, direction: Direction) -> (usize, usize) {
        match direction {
            Direction::Forward => (position, self.len().saturating_sub(1)),
            Direction::Backward => (0, position),
        }
    }

    pub fn find_edit_position_in_range(
        &self,
        start: usize,
        end: usize,
        direction: Direction,
    ) -> Option<usize> {
        self.find_in_range(start, end, direction, CharDescriptor::is_edit)
    }

    pub fn find_edit_position_from(&self, position: usize, direction: Direction) -> Option<usize> {
        let (start, end) = self.range_from(position, direction);
        self.find_edit_position_in_range(start, end, direction)
    }

    pub fn find_assigned_edit_position_in_range(
        &self,
        start: usize,
        end: usize,
        direction: Direction,
    ) -> Option<usize> {
        self.find_in_range(start, end, direction, |descriptor| {
            descriptor.is_edit() && descriptor.assigned
        })
    }

    pub fn find_assigned_edit_position_from(
        &self,
        position: usize,
        direction: Direction,
    ) -> Option<usize> {
        let (start, end) = self.range_from(position, direction);
        self.find_assigned_edit_position_in_range(start, end, direction)
    }

    pub fn find_unassigned_edit_position_in_range(
        &self,
        start: usize,
        end: usize,
        direction: Direction,
    ) -> Option<usize> {
        self.find_in_range(start, end, direction, |descriptor| {
            descriptor.is_edit() && !descriptor.assigned
        })
    }

    pub fn find_unassigned_edit_position_from(
        &self,
        position: usize,
        direction: Direction,
    ) -> Option<usize> {
        let (start, end) = self.range_from(position, direction);
        self.find_unassigned_edit_position_in_range(start, end, direction)
    }

    pub fn find_non_edit_position_in_range(
        &self,
        start: usize,
        end: usize,
        direction: Direction,
    ) -> Option<usize> {
        self.find_in_range(start, end, direction, |descriptor| !descriptor.is_edit())
    }

    pub fn find_non_edit_position_from(
        &self,
        position: usize,
        direction: Direction,
    ) -> Option<usize> {
        let (start, end) = self.range_from(position, direction);
        self.find_non_edit_position_in_range(start, end, direction)
    }

    pub fn last_assigned_position(&self) -> Option<usize> {
        self.descriptors
            .iter()
            .rposition(|descriptor| descriptor.is_edit() && descriptor.assigned)
    }

    /// Next edit position strictly after `position`.
    pub(super) fn next_edit_position(&self, position: usize) -> Option<usize> {
        self.find_edit_position_from(position + 1, Direction::Forward)
    }
}

#[cfg(test)]
mod tests {
    use crate::provider::{Direction, MaskedTextProvider};

    #[test]
    fn edit_positions_in_both_directions() {
        let provider = MaskedTextProvider::new("(000) 000").expect("provider");
        assert_eq!(provider.find_edit_position_from(0, Direction::Forward), Some(1));
        assert_eq!(provider.find_edit_position_from(4, Direction::Forward), Some(6));
        assert_eq!(provider.find_edit_position_from(5, Direction::Backward), Some(3));
        assert_eq!(provider.find_edit_position_from(0, Direction::Backward), None);
        assert_eq!(provider.find_edit_position_from(9, Direction::Forward), None);
    }

    #[test]
    fn range_end_is_clamped_and_empty_range_is_none() {
        let provider = MaskedTextProvider::new("00-00").expect("provider");
        assert_eq!(
            provider.find_edit_position_in_range(2, 100, Direction::Backward),
            Some(4)
        );
        assert_eq!(provider.find_edit_position_in_range(3, 1, Direction::Forward), None);
        assert_eq!(provider.find_non_edit_position_in_range(0, 4, Direction::Forward), Some(2));
        assert_eq!(provider.find_non_edit_position_from(3, Direction::Forward), None);
    }

    #[test]
    fn assigned_and_unassigned_lookups() {
        let mut provider = MaskedTextProvider::new("00-00").expect("provider");
        assert!(provider.set("1_3").succeeded());

        assert_eq!(
            provider.find_assigned_edit_position_from(0, Direction::Forward),
            Some(0)
        );
        assert_eq!(
            provider.find_assigned_edit_position_from(1, Direction::Forward),
            Some(3)
        );
        assert_eq!(
            provider.find_unassigned_edit_position_from(0, Direction::Forward),
            Some(1)
        );
        assert_eq!(
            provider.find_unassigned_edit_position_in_range(2, 4, Direction::Backward),
            Some(4)
        );
        assert_eq!(provider.last_assigned_position(), Some(3));
    }
}
