use super::MaskedTextProvider;
use super::model::{CaseConversion, CharKind, Direction, EditOutcome, ResultHint};
use tracing::{debug, trace};

/// Source and destination of one character moved while shifting.
type Move = (usize, usize);

impl MaskedTextProvider {
    /// Appends `ch` at the first edit position after the last assigned one.
    pub fn add_char(&mut self, ch: char) -> EditOutcome {
        let len = self.len();
        let start = self.last_assigned_position().map_or(0, |last| last + 1);
        let Some(position) = self.find_edit_position_from(start, Direction::Forward) else {
            return self.rejected(EditOutcome::new(ResultHint::UnavailableEditPosition, len));
        };
        self.test_set_char(ch, position)
    }

    pub fn add_str(&mut self, input: &str) -> EditOutcome {
        let input: Vec<char> = input.chars().collect();
        let position = self.last_assigned_position().map_or(0, |last| last + 1);
        if input.is_empty() {
            return EditOutcome::new(ResultHint::NoEffect, position);
        }
        self.test_set_string(&input, position)
    }

    /// Resets every assigned position.
    pub fn clear(&mut self) -> EditOutcome {
        if self.assigned_count == 0 {
            return EditOutcome::new(ResultHint::NoEffect, 0);
        }
        for position in 0..self.len() {
            self.reset_char(position);
        }
        EditOutcome::new(ResultHint::Success, 0)
    }

    pub fn insert_char_at(&mut self, ch: char, position: usize) -> EditOutcome {
        self.insert_at(&[ch], position)
    }

    pub fn insert_str_at(&mut self, input: &str, position: usize) -> EditOutcome {
        let input: Vec<char> = input.chars().collect();
        self.insert_at(&input, position)
    }

    /// Resets the last assigned position.
    pub fn remove(&mut self) -> EditOutcome {
        match self.last_assigned_position() {
            Some(last) => {
                self.reset_char(last);
                EditOutcome::new(ResultHint::Success, last)
            }
            None => EditOutcome::new(ResultHint::NoEffect, 0),
        }
    }

    pub fn remove_at(&mut self, position: usize) -> EditOutcome {
        self.remove_range(position, position)
    }

    /// Deletes the input held in `start..=end` and shifts the characters that
    /// follow to the left.
    pub fn remove_range(&mut self, start: usize, end: usize) -> EditOutcome {
        if let Err(outcome) = self.check_range(start, end) {
            return self.rejected(outcome);
        }
        self.remove_range_internal(start, end)
    }

    /// Overwrites the next edit position at or after `position`.
    pub fn replace_char_at(&mut self, ch: char, position: usize) -> EditOutcome {
        if position >= self.len() {
            return self.rejected(EditOutcome::new(ResultHint::PositionOutOfRange, position));
        }
        let target = if self.test_escape_char(ch, position) {
            Some(position)
        } else {
            self.find_edit_position_from(position, Direction::Forward)
        };
        let Some(target) = target else {
            return self.rejected(EditOutcome::new(ResultHint::UnavailableEditPosition, position));
        };
        self.test_set_char(ch, target)
    }

    pub fn replace_char_range(&mut self, ch: char, start: usize, end: usize) -> EditOutcome {
        if let Err(outcome) = self.check_range(start, end) {
            return self.rejected(outcome);
        }
        self.replace_range_internal(&[ch], start, end)
    }

    /// Overwrites from `position` without shifting anything.
    pub fn replace_str_at(&mut self, input: &str, position: usize) -> EditOutcome {
        if position >= self.len() {
            return self.rejected(EditOutcome::new(ResultHint::PositionOutOfRange, position));
        }
        let input: Vec<char> = input.chars().collect();
        if input.is_empty() {
            return self.remove_range_internal(position, position);
        }
        self.test_set_string(&input, position)
    }

    /// Replaces the selection `start..=end` with `input`, shifting the text
    /// after the selection left or right as needed.
    pub fn replace_str_range(&mut self, input: &str, start: usize, end: usize) -> EditOutcome {
        if let Err(outcome) = self.check_range(start, end) {
            return self.rejected(outcome);
        }
        let input: Vec<char> = input.chars().collect();
        if input.is_empty() {
            return self.remove_range_internal(start, end);
        }
        self.replace_range_internal(&input, start, end)
    }

    /// Replaces the whole content starting at position 0.
    pub fn set(&mut self, input: &str) -> EditOutcome {
        let input: Vec<char> = input.chars().collect();
        if input.is_empty() {
            return self.clear();
        }

        let outcome = match self.test_string(&input, 0) {
            Ok(outcome) => outcome,
            Err(outcome) => return self.rejected(outcome),
        };
        self.set_string(&input, 0);
        if let Some(last) = self.len().checked_sub(1) {
            self.reset_range(outcome.position + 1, last);
        }
        outcome
    }

    /// Tests `input` as `set` would, without changing anything.
    pub fn verify_str(&self, input: &str) -> EditOutcome {
        let input: Vec<char> = input.chars().collect();
        match self.test_string(&input, 0) {
            Ok(outcome) | Err(outcome) => outcome,
        }
    }

    pub fn verify_char(&self, ch: char, position: usize) -> EditOutcome {
        if position >= self.len() {
            return EditOutcome::new(ResultHint::PositionOutOfRange, position);
        }
        EditOutcome::new(self.test_char(ch, position), position)
    }

    pub fn verify_escape_char(&self, ch: char, position: usize) -> bool {
        position < self.len() && self.test_escape_char(ch, position)
    }

    fn check_range(&self, start: usize, end: usize) -> Result<(), EditOutcome> {
        if end >= self.len() {
            return Err(EditOutcome::new(ResultHint::PositionOutOfRange, end));
        }
        if start > end {
            return Err(EditOutcome::new(ResultHint::PositionOutOfRange, start));
        }
        Ok(())
    }

    fn rejected(&self, outcome: EditOutcome) -> EditOutcome {
        debug!(
            mask = %self.mask,
            hint = ?outcome.hint,
            position = outcome.position,
            "input rejected"
        );
        outcome
    }

    fn test_set_char(&mut self, ch: char, position: usize) -> EditOutcome {
        let hint = self.test_char(ch, position);
        if !hint.is_success() {
            return self.rejected(EditOutcome::new(hint, position));
        }
        if matches!(hint, ResultHint::Success | ResultHint::SideEffect) {
            self.set_char(ch, position);
        }
        EditOutcome::new(hint, position)
    }

    fn test_set_string(&mut self, input: &[char], position: usize) -> EditOutcome {
        match self.test_string(input, position) {
            Ok(outcome) => {
                self.set_string(input, position);
                outcome
            }
            Err(outcome) => self.rejected(outcome),
        }
    }

    fn insert_at(&mut self, input: &[char], position: usize) -> EditOutcome {
        let len = self.len();
        if position >= len {
            return self.rejected(EditOutcome::new(ResultHint::PositionOutOfRange, position));
        }
        if input.is_empty() {
            return EditOutcome::new(ResultHint::NoEffect, position);
        }

        let mut outcome = match self.test_string(input, position) {
            Ok(outcome) => outcome,
            Err(outcome) => return self.rejected(outcome),
        };

        let first_edit = self.find_edit_position_from(position, Direction::Forward);
        let shift_needed = first_edit.is_some_and(|src| {
            self.find_assigned_edit_position_in_range(src, outcome.position, Direction::Forward)
                .is_some()
        });

        let mut moves = Vec::new();
        if let (true, Some(src)) = (shift_needed, first_edit) {
            if outcome.position + 1 >= len {
                return self.rejected(EditOutcome::new(ResultHint::UnavailableEditPosition, len));
            }
            moves = match self.plan_shift_right(src, outcome.position + 1) {
                Ok(moves) => moves,
                Err(outcome) => return self.rejected(outcome),
            };
            outcome.hint = outcome.hint.max(ResultHint::SideEffect);
        }

        self.apply_shift_right(&moves);
        self.set_string(input, position);
        outcome
    }

    fn replace_range_internal(&mut self, input: &[char], start: usize, end: usize) -> EditOutcome {
        let mut outcome = match self.test_string(input, start) {
            Ok(outcome) => outcome,
            Err(outcome) => return self.rejected(outcome),
        };

        if self.assigned_count > 0 {
            if outcome.position < end {
                let removed = self.remove_range_internal(outcome.position + 1, end);
                if !removed.succeeded() {
                    return removed;
                }
                if matches!(removed.hint, ResultHint::Success | ResultHint::SideEffect) {
                    outcome.hint = outcome.hint.max(ResultHint::SideEffect);
                }
            } else if outcome.position > end {
                let tail = self
                    .find_edit_position_from(end + 1, Direction::Forward)
                    .filter(|&src| {
                        self.find_assigned_edit_position_from(src, Direction::Forward)
                            .is_some()
                    });
                if let Some(src) = tail {
                    let moves = match self.plan_shift_right(src, outcome.position + 1) {
                        Ok(moves) => moves,
                        Err(outcome) => return self.rejected(outcome),
                    };
                    self.apply_shift_right(&moves);
                    outcome.hint = outcome.hint.max(ResultHint::SideEffect);
                }
            }
        }

        self.set_string(input, start);
        outcome
    }

    /// Pairs every edit position from `src` up to the last assigned one with
    /// successive edit positions from `dst_from`, testing each assigned
    /// character at its destination.
    fn plan_shift_right(&self, src: usize, dst_from: usize) -> Result<Vec<Move>, EditOutcome> {
        let len = self.len();
        let Some(last_assigned) = self.last_assigned_position() else {
            return Ok(Vec::new());
        };

        let mut moves = Vec::new();
        let mut src = Some(src);
        let mut dst = self.find_edit_position_from(dst_from, Direction::Forward);
        while let Some(from) = src {
            let Some(to) = dst else {
                return Err(EditOutcome::new(ResultHint::UnavailableEditPosition, len));
            };
            if self.descriptors[from].assigned {
                let hint = self.test_char(self.buffer[from], to);
                if !hint.is_success() {
                    return Err(EditOutcome::new(hint, to));
                }
            }
            moves.push((from, to));
            if from >= last_assigned {
                break;
            }
            src = self.next_edit_position(from);
            dst = self.next_edit_position(to);
        }
        Ok(moves)
    }

    fn apply_shift_right(&mut self, moves: &[Move]) {
        for &(from, to) in moves.iter().rev() {
            if self.descriptors[from].assigned {
                self.set_char(self.buffer[from], to);
            } else {
                self.reset_char(to);
            }
        }
        if !moves.is_empty() {
            trace!(moved = moves.len(), "shifted right");
        }
    }

    fn remove_range_internal(&mut self, start: usize, end: usize) -> EditOutcome {
        let no_effect = EditOutcome::new(ResultHint::NoEffect, start);
        let Some(last_assigned) = self.last_assigned_position() else {
            return no_effect;
        };
        let Some(first_edit) = self.find_edit_position_in_range(start, end, Direction::Forward)
        else {
            return no_effect;
        };
        if first_edit > last_assigned {
            return no_effect;
        }

        let hint = if self
            .find_assigned_edit_position_in_range(start, end, Direction::Forward)
            .is_some()
        {
            ResultHint::Success
        } else {
            ResultHint::SideEffect
        };

        let mut moves = Vec::<Move>::new();
        if end < last_assigned {
            let mut src = self.find_edit_position_from(end + 1, Direction::Forward);
            let mut dst = Some(first_edit);
            while let (Some(from), Some(to)) = (src, dst) {
                if self.descriptors[from].assigned {
                    let char_hint = self.test_char(self.buffer[from], to);
                    if !char_hint.is_success() {
                        return self.rejected(EditOutcome::new(char_hint, to));
                    }
                }
                moves.push((from, to));
                if from >= last_assigned {
                    break;
                }
                src = self.next_edit_position(from);
                dst = self.next_edit_position(to);
            }
        }

        let mut reset_from = start;
        for &(from, to) in &moves {
            if self.descriptors[from].assigned {
                self.set_char(self.buffer[from], to);
                self.reset_char(from);
            } else {
                self.reset_char(to);
            }
            reset_from = to + 1;
        }
        if !moves.is_empty() {
            trace!(moved = moves.len(), "shifted left");
        }
        self.reset_range(reset_from, end);

        EditOutcome::new(hint, start)
    }

    fn set_string(&mut self, input: &[char], position: usize) {
        let mut position = position;
        for &ch in input {
            if !self.test_escape_char(ch, position) {
                match self.find_edit_position_from(position, Direction::Forward) {
                    Some(next) => position = next,
                    None => return,
                }
            }
            self.set_char(ch, position);
            position += 1;
        }
    }

    pub(super) fn set_char(&mut self, ch: char, position: usize) {
        if self.test_escape_char(ch, position) {
            self.reset_char(position);
            return;
        }

        let descriptor = &mut self.descriptors[position];
        self.buffer[position] = convert_case(ch, descriptor.case);
        if !descriptor.assigned {
            descriptor.assigned = true;
            self.assigned_count += 1;
            if descriptor.kind == CharKind::EditRequired {
                self.assigned_required_count += 1;
            }
        }
    }

    fn reset_char(&mut self, position: usize) {
        let descriptor = &mut self.descriptors[position];
        if !descriptor.is_edit() || !descriptor.assigned {
            return;
        }
        descriptor.assigned = false;
        self.buffer[position] = self.options.prompt_char;
        self.assigned_count -= 1;
        if descriptor.kind == CharKind::EditRequired {
            self.assigned_required_count -= 1;
        }
    }

    fn reset_range(&mut self, start: usize, end: usize) {
        if start > end {
            return;
        }
        let end = end.min(self.len().saturating_sub(1));
        for position in start..=end {
            self.reset_char(position);
        }
    }
}

fn convert_case(ch: char, case: CaseConversion) -> char {
    match case {
        CaseConversion::ToUpper if ch.is_lowercase() => single_char(ch.to_uppercase(), ch),
        CaseConversion::ToLower if ch.is_uppercase() => single_char(ch.to_lowercase(), ch),
        _ => ch,
    }
}

/// Case mappings that expand to several chars (`ß` -> `SS`) keep the input.
fn single_char(mut mapped: impl Iterator<Item = char>, fallback: char) -> char {
    match (mapped.next(), mapped.next()) {
        (Some(ch), None) => ch,
        _ => fallback,
    }
}
