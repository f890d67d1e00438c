//! ViewModel Module
//!
//! Screen state plus the actions that kick off background requests.

pub mod login_vm;
pub mod profile_vm;
pub mod signup_vm;

pub use login_vm::LoginViewModel;
pub use profile_vm::ProfileViewModel;
pub use signup_vm::SignupViewModel;
