//! Per-pool capacity counters on an [`Event`].
//!
//! These operate on an event the caller has already row-locked; nothing here
//! takes a lock of its own.

use crate::database::models::{Event, RolePool};

impl Event {
    pub fn required(&self, role: RolePool) -> i32 {
        match role {
            RolePool::Captain => self.required_captains,
            RolePool::SubCaptain => self.required_sub_captains,
            RolePool::MainBoy => self.required_main_boys,
            RolePool::JuniorBoy => self.required_juniors,
        }
    }

    pub fn remaining(&self, role: RolePool) -> i32 {
        match role {
            RolePool::Captain => self.remaining_captains,
            RolePool::SubCaptain => self.remaining_sub_captains,
            RolePool::MainBoy => self.remaining_main_boys,
            RolePool::JuniorBoy => self.remaining_juniors,
        }
    }

    pub fn booked(&self, role: RolePool) -> i32 {
        self.required(role) - self.remaining(role)
    }

    fn remaining_mut(&mut self, role: RolePool) -> &mut i32 {
        match role {
            RolePool::Captain => &mut self.remaining_captains,
            RolePool::SubCaptain => &mut self.remaining_sub_captains,
            RolePool::MainBoy => &mut self.remaining_main_boys,
            RolePool::JuniorBoy => &mut self.remaining_juniors,
        }
    }

    fn required_mut(&mut self, role: RolePool) -> &mut i32 {
        match role {
            RolePool::Captain => &mut self.required_captains,
            RolePool::SubCaptain => &mut self.required_sub_captains,
            RolePool::MainBoy => &mut self.required_main_boys,
            RolePool::JuniorBoy => &mut self.required_juniors,
        }
    }

    /// Takes one slot from `role`'s pool. Returns false when the pool is empty.
    pub fn try_reserve(&mut self, role: RolePool) -> bool {
        let remaining = self.remaining_mut(role);
        if *remaining <= 0 {
            return false;
        }
        *remaining -= 1;
        true
    }

    /// Gives one slot back to `role`'s pool. Returns false if the pool is already full.
    pub fn release(&mut self, role: RolePool) -> bool {
        let required = self.required(role);
        let remaining = self.remaining_mut(role);
        if *remaining >= required {
            return false;
        }
        *remaining += 1;
        true
    }

    /// Changes the size of `role`'s pool, keeping every existing booking.
    /// Returns false when `new_required` is below the number already booked.
    pub fn resize(&mut self, role: RolePool, new_required: i32) -> bool {
        let booked = self.booked(role);
        if new_required < booked {
            return false;
        }
        *self.required_mut(role) = new_required;
        *self.remaining_mut(role) = new_required - booked;
        true
    }

    pub fn total_required(&self) -> i64 {
        RolePool::ALL
            .iter()
            .map(|role| i64::from(self.required(*role)))
            .sum()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::database::models::{EventStatus, TimeSlot};
    use chrono::{NaiveDate, NaiveTime, Utc};
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    pub(crate) fn sample_event(captains: i32, juniors: i32) -> Event {
        let now = Utc::now();
        Event {
            id: Uuid::new_v4(),
            name: "Wedding reception".to_string(),
            event_date: NaiveDate::from_ymd_opt(2030, 5, 1).unwrap(),
            time_slot: TimeSlot::Night,
            reporting_time: NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
            work_type: "catering".to_string(),
            location_link: None,
            required_captains: captains,
            required_sub_captains: 0,
            required_main_boys: 0,
            required_juniors: juniors,
            remaining_captains: captains,
            remaining_sub_captains: 0,
            remaining_main_boys: 0,
            remaining_juniors: juniors,
            long_work: false,
            extra_wage_amount: 0,
            transport_provided: false,
            transport_type: None,
            status: EventStatus::Upcoming,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn reserve_stops_at_zero() {
        let mut event = sample_event(1, 0);
        assert!(event.try_reserve(RolePool::Captain));
        assert!(!event.try_reserve(RolePool::Captain));
        assert_eq!(event.remaining(RolePool::Captain), 0);
        assert_eq!(event.booked(RolePool::Captain), 1);
        assert!(!event.try_reserve(RolePool::JuniorBoy));
    }

    #[test]
    fn release_never_exceeds_required() {
        let mut event = sample_event(2, 0);
        assert!(!event.release(RolePool::Captain));
        assert!(event.try_reserve(RolePool::Captain));
        assert!(event.release(RolePool::Captain));
        assert_eq!(event.remaining(RolePool::Captain), 2);
    }

    #[test]
    fn total_required_does_not_wrap() {
        let mut event = sample_event(i32::MAX, i32::MAX);
        event.required_main_boys = i32::MAX;
        assert_eq!(event.total_required(), 3 * i64::from(i32::MAX));
    }

    #[test]
    fn pools_are_independent() {
        let mut event = sample_event(1, 3);
        assert!(event.try_reserve(RolePool::JuniorBoy));
        assert_eq!(event.remaining(RolePool::Captain), 1);
        assert_eq!(event.remaining(RolePool::JuniorBoy), 2);
        assert_eq!(event.total_required(), 4);
    }

    #[test]
    fn resize_keeps_booked_slots() {
        let mut event = sample_event(0, 5);
        for _ in 0..3 {
            assert!(event.try_reserve(RolePool::JuniorBoy));
        }
        assert!(!event.resize(RolePool::JuniorBoy, 2));
        assert_eq!(event.required(RolePool::JuniorBoy), 5);

        assert!(event.resize(RolePool::JuniorBoy, 3));
        assert_eq!(event.remaining(RolePool::JuniorBoy), 0);

        assert!(event.resize(RolePool::JuniorBoy, 8));
        assert_eq!(event.remaining(RolePool::JuniorBoy), 5);
        assert_eq!(event.booked(RolePool::JuniorBoy), 3);
    }
}
