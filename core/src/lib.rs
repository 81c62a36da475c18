//! Domain types and state machines for the `recast` draft composer.
//!
//! Everything in this crate is pure: no terminal, no filesystem, no network.
//! The front end feeds user actions into [`SourceInput`] and [`ContentPicker`]
//! and recomputes [`readiness::is_ready`] after every mutation.

mod byte_format;
mod catalog;
mod credentials;
mod draft;
mod input;
pub mod readiness;
mod selection;
mod session;
mod upload;

pub use byte_format::format_file_size;
pub use catalog::PlatformCatalog;
pub use catalog::PlatformOption;
pub use credentials::PasswordStrength;
pub use credentials::check_password_strength;
pub use credentials::is_valid_email;
pub use draft::InputDraft;
pub use draft::SourceFile;
pub use input::InputMode;
pub use input::SourceInput;
pub use selection::ContentPicker;
pub use selection::SelectionMap;
pub use session::AuthError;
pub use session::Session;
pub use session::SessionProvider;
pub use session::SignInRequest;
pub use session::SignUpRequest;
pub use session::User;
pub use upload::AcceptedCategory;
pub use upload::UploadConstraints;
pub use upload::UploadError;
pub use upload::validate_upload;
