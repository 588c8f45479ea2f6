//! Terminal output

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_determination, display_error, display_outcome,
    display_status, display_success, format_determination, format_outcome,
};
