pub mod aggregate_service;
pub mod report_writer;

pub use aggregate_service::AggregateService;
pub use report_writer::ReportWriter;
