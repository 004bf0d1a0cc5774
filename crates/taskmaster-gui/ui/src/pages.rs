mod dashboard;
mod login;
mod signup;

pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use signup::SignUpPage;
