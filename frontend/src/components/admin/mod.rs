//! Admin panel: credential check, category management and the template list
//! leading to the editor.

mod categories;
mod dashboard;
mod login;

pub use dashboard::AdminDashboard;
pub use login::AdminLogin;
