pub mod dashboard;
pub mod list;
pub mod tabs;

pub use dashboard::InstanceDashboard;
pub use list::InstanceList;
