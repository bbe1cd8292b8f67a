mod callback;

pub use callback::oauth_callback;
