pub mod dashboards;
pub mod enums;
