//! Launch routing: decide which screen the app opens on.

use crate::UserProfile;

/// First screen shown after launch
#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    /// Collect the user's details
    Setup,
    /// Show heart rate and calorie estimates for this profile
    Home(UserProfile),
}

/// Go home only when a complete profile was loaded
pub fn route(profile: Option<UserProfile>) -> Screen {
    match profile {
        Some(profile) if profile.is_valid => Screen::Home(profile),
        Some(_) => {
            tracing::info!("Stored profile is incomplete, routing to setup");
            Screen::Setup
        }
        None => Screen::Setup,
    }
}
