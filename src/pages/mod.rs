mod dashboard;
mod import;
mod link_page;

pub use dashboard::DashboardPage;
pub use import::ImportPage;
pub use link_page::LinkPage;
