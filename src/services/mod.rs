pub mod auth;
pub mod classes;
pub mod grades;
pub mod results;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod users;

pub use auth::AuthService;
pub use classes::ClassService;
pub use grades::GradeService;
pub use results::ResultService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use teachers::TeacherService;
pub use users::UserService;
