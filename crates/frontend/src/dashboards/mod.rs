pub mod d400_sales_report;

pub use d400_sales_report::ui::SalesReportDashboard;
