pub mod app;
pub mod board;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod highlight;
pub mod schedule;
pub mod search;
pub mod ui;

pub use board::{BoardError, ScheduleBoard, TodaySlot};
pub use catalog::{Catalog, CatalogError, ScheduleSlot, StaffRecord, Weekday};
pub use config::{AppConfig, ConfigLoader, ConfigPaths};
