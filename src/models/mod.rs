mod reset_token;

pub use reset_token::ResetToken;
