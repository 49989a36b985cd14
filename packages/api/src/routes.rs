pub mod calibration;
pub mod confidence_curve;
pub mod confusion_matrix;
pub mod errors_by_class;
pub mod export;
pub mod health;
pub mod labels;
pub mod overview;
pub mod predictions;
