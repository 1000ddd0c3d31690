//! Business services containing domain logic and use cases.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    Clock, CooldownActive, IssuedCode, MailServiceTrait, ManualClock, SendCodeResult,
    SweepResult, SweeperConfig, SystemClock, VerificationCodeStore, VerificationService,
    VerificationServiceConfig, VerificationSweeper,
};
