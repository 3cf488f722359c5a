//! The `/bookings` page. No bookings are ever made, so the list is always
//! empty.

use labfinder_core::user::UserProfile;

pub const EMPTY_TITLE: &str = "No Bookings Yet";
pub const EMPTY_MESSAGE: &str = "You haven't made any lab test bookings yet. Start by searching \
                                 for a lab and booking an appointment.";

#[derive(Debug, Clone, PartialEq)]
pub struct BookingsView {
    pub profile: UserProfile,
}
