pub mod auth;

pub mod users;

pub mod students;

pub mod teachers;

pub mod classes;

pub mod subjects;

pub mod grades;

pub mod results;

pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use grades::configure_grades_routes;
pub use results::configure_results_routes;
pub use students::configure_students_routes;
pub use subjects::configure_subjects_routes;
pub use teachers::configure_teachers_routes;
pub use users::configure_user_routes;
