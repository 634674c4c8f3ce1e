pub mod recorder;
pub mod registration;
pub mod server;

pub use recorder::MatchRecorder;
pub use registration::RegistrationService;
pub use server::ServerService;
