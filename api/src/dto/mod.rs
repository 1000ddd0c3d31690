//! Request and response bodies

pub mod verification;

pub use lh_shared::ErrorResponse;
pub use verification::{SendCodeRequest, SendCodeResponse, VerifyCodeRequest, VerifyCodeResponse};
