//! View Module
//!
//! UI layer. Rendering only, actions go through the viewmodels.

pub mod login_view;
pub mod notice_view;
pub mod profile_view;
pub mod signup_view;

pub use login_view::render_login;
pub use notice_view::render_notices;
pub use profile_view::render_profile;
pub use signup_view::render_signup;
