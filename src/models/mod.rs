pub mod grade;
pub mod package;
pub mod submission;
pub mod template;
pub mod test_instance;
