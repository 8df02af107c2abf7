pub mod content_service;
pub mod grading_service;
pub mod lifecycle_service;
pub mod render_service;
pub mod schema_service;
