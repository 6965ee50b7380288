pub mod refresh_report;
