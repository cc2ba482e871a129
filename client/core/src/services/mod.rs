mod comments;
mod latency;
mod messages;
mod notifications;
mod posts;
mod users;

pub use comments::CommentService;
pub use latency::Latency;
pub use messages::MessageService;
pub use notifications::NotificationService;
pub use posts::PostService;
pub use users::UserService;
