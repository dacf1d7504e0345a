mod email_client;

pub use email_client::{Email, EmailAuthorizationToken, EmailClient};
