// Listenstat -- Aggregation engine for personal listening history
// Copyright 2026 The Listenstat Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! Defines a specialized table keyed on the day of the week.

use chrono::Weekday;

use crate::prim::WEEKDAYS;

/// A table with one slot per day of the week.
///
/// The key domain is fixed and tiny, so rather than a map, this is an array
/// indexed by the number of days since Monday. Every day always has a value;
/// a fresh table starts out with `T::default()` in every slot. This is what
/// makes weekday views report all seven days, also the ones without plays.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct WeekdayTable<T: Copy> {
    elements: [T; 7],
}

impl<T: Copy + Default> WeekdayTable<T> {
    pub fn new() -> WeekdayTable<T> {
        WeekdayTable {
            elements: [T::default(); 7],
        }
    }
}

impl<T: Copy> WeekdayTable<T> {
    #[inline(always)]
    fn index(day: Weekday) -> usize {
        day.num_days_from_monday() as usize
    }

    #[inline]
    pub fn get(&self, day: Weekday) -> T {
        self.elements[Self::index(day)]
    }

    #[inline]
    pub fn get_mut(&mut self, day: Weekday) -> &mut T {
        &mut self.elements[Self::index(day)]
    }

    /// Iterate all seven days, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, T)> + '_ {
        WEEKDAYS.iter().map(move |day| (*day, self.get(*day)))
    }

    /// Return the days and their values as a vector, Monday first.
    pub fn to_vec(&self) -> Vec<(Weekday, T)> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;
    use super::WeekdayTable;

    #[test]
    fn weekday_table_is_zero_filled_and_ordered() {
        let mut t = WeekdayTable::<u64>::new();
        *t.get_mut(Weekday::Sun) += 3;
        *t.get_mut(Weekday::Wed) += 1;

        let days: Vec<(Weekday, u64)> = t.to_vec();
        assert_eq!(days, vec![
            (Weekday::Mon, 0),
            (Weekday::Tue, 0),
            (Weekday::Wed, 1),
            (Weekday::Thu, 0),
            (Weekday::Fri, 0),
            (Weekday::Sat, 0),
            (Weekday::Sun, 3),
        ]);
    }
}
