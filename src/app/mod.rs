pub mod ports;
pub mod thresholds_use_case;
pub mod workbook_use_case;

pub use thresholds_use_case::ThresholdsUseCase;
pub use workbook_use_case::WorkbookUseCase;
