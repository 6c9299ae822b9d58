pub mod review;
pub mod validate;

pub use self::review::ReviewUseCase;
pub use self::validate::{BulkValidationReport, ValidateUseCase};
